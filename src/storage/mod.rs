// This file is part of the product Atelier.
// SPDX-FileCopyrightText: 2025-2026 Atelier Studio
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

pub mod backend;
pub mod resolver;

pub use backend::{LocalObjectStore, StorageBackend, StorageError};
pub use resolver::{StorageUrlResolver, extract_path_from_url, is_absolute_url};
