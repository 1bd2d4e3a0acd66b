// This file is part of the product Atelier.
// SPDX-FileCopyrightText: 2025-2026 Atelier Studio
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use std::fmt::Display;

/// Collaborator that receives errors which are deliberately swallowed at the
/// public boundary. Public reads substitute safe defaults for failures; this
/// is where the failure still gets recorded.
pub trait Diagnostics: Send + Sync {
    fn report(&self, source: &str, error: &dyn Display);
}

/// Production reporter: forwards to the log.
pub struct LogDiagnostics;

impl Diagnostics for LogDiagnostics {
    fn report(&self, source: &str, error: &dyn Display) {
        log::error!("[{}] {}", source, error);
    }
}

/// Test reporter that records every report for assertions.
#[derive(Default)]
pub struct RecordingDiagnostics {
    reports: std::sync::Mutex<Vec<(String, String)>>,
}

impl RecordingDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reports(&self) -> Vec<(String, String)> {
        self.reports.lock().expect("diagnostics lock").clone()
    }

    pub fn is_empty(&self) -> bool {
        self.reports.lock().expect("diagnostics lock").is_empty()
    }
}

impl Diagnostics for RecordingDiagnostics {
    fn report(&self, source: &str, error: &dyn Display) {
        self.reports
            .lock()
            .expect("diagnostics lock")
            .push((source.to_string(), error.to_string()));
    }
}
