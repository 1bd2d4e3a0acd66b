// This file is part of the product Atelier.
// SPDX-FileCopyrightText: 2025-2026 Atelier Studio
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use crate::config::{Config, ConfigError, ValidatedConfig, default_config_yaml};
use crate::runtime_paths::RuntimePaths;
use std::fmt;
use std::fs;
use std::path::Path;

#[derive(Debug)]
pub enum BootstrapError {
    Io(std::io::Error),
    Config(ConfigError),
}

impl fmt::Display for BootstrapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BootstrapError::Io(err) => write!(f, "runtime layout error: {}", err),
            BootstrapError::Config(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for BootstrapError {}

impl From<std::io::Error> for BootstrapError {
    fn from(err: std::io::Error) -> Self {
        BootstrapError::Io(err)
    }
}

impl From<ConfigError> for BootstrapError {
    fn from(err: ConfigError) -> Self {
        BootstrapError::Config(err)
    }
}

pub struct BootstrapResult {
    pub config: ValidatedConfig,
    pub runtime_paths: RuntimePaths,
    pub created_config: bool,
}

/// Prepare the runtime root: create the directory layout, write a default
/// config on first run, then load and validate it.
pub fn bootstrap_runtime(root: &Path) -> Result<BootstrapResult, BootstrapError> {
    let runtime_paths = RuntimePaths::from_root(root);

    fs::create_dir_all(&runtime_paths.data_dir)?;
    fs::create_dir_all(&runtime_paths.objects_dir)?;
    fs::create_dir_all(&runtime_paths.output_dir)?;

    let created_config = if runtime_paths.config_file.exists() {
        false
    } else {
        fs::write(&runtime_paths.config_file, default_config_yaml("Atelier"))?;
        log::info!(
            "created default configuration at {}",
            runtime_paths.config_file.display()
        );
        true
    };

    let config = Config::load_from_file(&runtime_paths.config_file)?.validate()?;

    Ok(BootstrapResult {
        config,
        runtime_paths,
        created_config,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::test_fixtures::TestFixtureRoot;

    #[test]
    fn first_run_creates_layout_and_config() {
        let fixture = TestFixtureRoot::new_unique("bootstrap").expect("fixture root");
        let result = bootstrap_runtime(fixture.path()).expect("bootstrap");
        assert!(result.created_config);
        assert!(result.runtime_paths.data_dir.is_dir());
        assert!(result.runtime_paths.objects_dir.is_dir());
        assert!(result.runtime_paths.config_file.is_file());
    }

    #[test]
    fn second_run_keeps_existing_config() {
        let fixture = TestFixtureRoot::new_unique("bootstrap-rerun").expect("fixture root");
        bootstrap_runtime(fixture.path()).expect("first bootstrap");
        let again = bootstrap_runtime(fixture.path()).expect("second bootstrap");
        assert!(!again.created_config);
    }
}
