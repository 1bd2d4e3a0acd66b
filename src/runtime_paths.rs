// This file is part of the product Atelier.
// SPDX-FileCopyrightText: 2025-2026 Atelier Studio
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use std::path::{Path, PathBuf};

/// On-disk layout derived from the runtime root.
#[derive(Debug, Clone)]
pub struct RuntimePaths {
    pub root: PathBuf,
    /// Document collections, one directory per collection.
    pub data_dir: PathBuf,
    /// Stored media objects, addressed by object key.
    pub objects_dir: PathBuf,
    /// Artifacts written by the offline SEO generator.
    pub output_dir: PathBuf,
    pub config_file: PathBuf,
    /// Optional on-disk override for the embedded index shell template.
    pub index_template_file: PathBuf,
}

impl RuntimePaths {
    pub fn from_root(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
            data_dir: root.join("data"),
            objects_dir: root.join("objects"),
            output_dir: root.join("out"),
            config_file: root.join("config.yaml"),
            index_template_file: root.join("index.template.html"),
        }
    }
}
