// This file is part of the product Atelier.
// SPDX-FileCopyrightText: 2025-2026 Atelier Studio
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use std::sync::Arc;

use crate::diagnostics::{Diagnostics, LogDiagnostics};
use crate::public::error::ErrorRenderer;
use crate::runtime_paths::RuntimePaths;
use crate::templates::{MiniJinjaEngine, TemplateEngine};

pub struct AppState {
    pub templates: Arc<dyn TemplateEngine>,
    pub error_renderer: ErrorRenderer,
    pub diagnostics: Arc<dyn Diagnostics>,
    pub runtime_paths: RuntimePaths,
}

impl AppState {
    pub fn new(app_name: &str, runtime_paths: RuntimePaths) -> Self {
        Self::with_diagnostics(app_name, runtime_paths, Arc::new(LogDiagnostics))
    }

    pub fn with_diagnostics(
        app_name: &str,
        runtime_paths: RuntimePaths,
        diagnostics: Arc<dyn Diagnostics>,
    ) -> Self {
        Self {
            templates: Arc::new(MiniJinjaEngine::new()),
            error_renderer: ErrorRenderer::new(app_name.to_string()),
            diagnostics,
            runtime_paths,
        }
    }
}
