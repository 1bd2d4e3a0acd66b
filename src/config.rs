// This file is part of the product Atelier.
// SPDX-FileCopyrightText: 2025-2026 Atelier Studio
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug)]
pub enum ConfigError {
    LoadError(String),
    ValidationError(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::LoadError(msg) => write!(f, "Configuration load error: {}", msg),
            ConfigError::ValidationError(msg) => {
                write!(f, "Configuration validation error: {}", msg)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    #[serde(default = "default_app_name")]
    pub name: String,
}

fn default_app_name() -> String {
    "Atelier".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            name: default_app_name(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_bind_address() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            port: default_port(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AdminConfig {
    #[serde(default = "default_admin_path")]
    pub path: String,
    /// Emails allowed through the admin gate. Matching is exact and
    /// case-sensitive.
    #[serde(default)]
    pub emails: Vec<String>,
}

fn default_admin_path() -> String {
    "/admin".to_string()
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            path: default_admin_path(),
            emails: Vec::new(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct EnvironmentConfig {
    #[serde(default = "default_production")]
    pub production: bool,
    #[serde(default)]
    pub emulator: bool,
}

fn default_production() -> bool {
    true
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            production: default_production(),
            emulator: false,
        }
    }
}

impl EnvironmentConfig {
    /// Development convenience: when running outside production against the
    /// local emulator, the admin gate is wide open.
    pub fn emulator_bypass(&self) -> bool {
        !self.production && self.emulator
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct StorageConfig {
    #[serde(default = "default_bucket")]
    pub bucket: String,
    /// Base URL under which stored objects are publicly reachable. Download
    /// URLs are minted beneath `<public_base_url>/v0/b/<bucket>/o/`.
    #[serde(default)]
    pub public_base_url: String,
}

fn default_bucket() -> String {
    "atelier-media".to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            bucket: default_bucket(),
            public_base_url: String::new(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct SiteConfig {
    /// Canonical site origin used by the offline generators, where no
    /// request host is available. May stay empty for server-only setups.
    #[serde(default)]
    pub base_url: String,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub app: AppConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub admin: AdminConfig,
    #[serde(default)]
    pub environment: EnvironmentConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub site: SiteConfig,
}

/// Configuration that passed validation. Handlers only ever see this type.
#[derive(Debug, Clone)]
pub struct ValidatedConfig {
    pub app: AppConfig,
    pub server: ServerConfig,
    pub admin: AdminConfig,
    pub environment: EnvironmentConfig,
    pub storage: StorageConfig,
    pub site: SiteConfig,
}

impl Config {
    pub fn load_from_file(path: &Path) -> Result<Config, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| {
            ConfigError::LoadError(format!("cannot read {}: {}", path.display(), e))
        })?;
        serde_yaml::from_str(&content).map_err(|e| {
            ConfigError::LoadError(format!("cannot parse {}: {}", path.display(), e))
        })
    }

    pub fn validate(self) -> Result<ValidatedConfig, ConfigError> {
        if self.app.name.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "app.name must not be empty".to_string(),
            ));
        }
        if self.server.port == 0 {
            return Err(ConfigError::ValidationError(
                "server.port must not be 0".to_string(),
            ));
        }
        if !self.admin.path.starts_with('/') || self.admin.path.len() < 2 {
            return Err(ConfigError::ValidationError(format!(
                "admin.path '{}' must start with '/' and name a path segment",
                self.admin.path
            )));
        }
        if self.storage.bucket.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "storage.bucket must not be empty".to_string(),
            ));
        }
        if self.admin.emails.iter().any(|email| email.trim().is_empty()) {
            return Err(ConfigError::ValidationError(
                "admin.emails must not contain empty entries".to_string(),
            ));
        }
        if self.admin.emails.is_empty() && !self.environment.emulator_bypass() {
            log::warn!(
                "admin.emails is empty and the emulator bypass is off; the admin panel is unreachable"
            );
        }

        Ok(ValidatedConfig {
            app: self.app,
            server: self.server,
            admin: self.admin,
            environment: self.environment,
            storage: self.storage,
            site: self.site,
        })
    }
}

impl ValidatedConfig {
    pub fn is_admin_email(&self, email: &str) -> bool {
        self.admin.emails.iter().any(|allowed| allowed == email)
    }
}

pub fn default_config_yaml(app_name: &str) -> String {
    format!(
        r#"app:
  name: {}
server:
  bind_address: 127.0.0.1
  port: 8080
admin:
  path: /admin
  emails: []
environment:
  production: true
  emulator: false
storage:
  bucket: atelier-media
  public_base_url: ""
site:
  base_url: ""
"#,
        app_name
    )
}
