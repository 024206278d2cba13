//! Configuration system for Crestgate
//!
//! Configuration values are resolved in the following order (highest
//! priority wins):
//!
//! 1. **Code** (builder pattern / explicit structs)
//! 2. **Environment variables**
//! 3. **Config file** (crestgate.toml)
//! 4. **Defaults** (built-in capability table, info-level logging)
//!
//! The capability table is the one external configuration surface of
//! the authorization layer. When the file declares any roles, the
//! declared table replaces the built-in one wholesale; anything it does
//! not mention stays denied, so a sparse file can only narrow access,
//! never widen it.
//!
//! # Example
//!
//! ```toml
//! [logging]
//! level = "debug"
//!
//! [roles.officer.service_entry]
//! can_view = true
//! can_approve = true
//! visible_fields = "all"
//!
//! [roles.member.dues_record]
//! can_view = true
//! visible_fields = ["amount", "status", "due_date"]
//! ```

pub mod logging;
pub mod registry;

pub use logging::LoggingConfig;
pub use registry::RegistryConfig;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;

/// Environment variable naming the config file to load.
pub const CONFIG_PATH_ENV: &str = "CREST_CONFIG";

/// Default config file name, looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "crestgate.toml";

/// Complete Crestgate configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct CrestgateConfig {
    pub logging: LoggingConfig,
    pub roles: RegistryConfig,
}

impl CrestgateConfig {
    /// Load with full supersedence: defaults, then the config file (if
    /// present), then environment variables.
    pub fn load() -> Result<Self> {
        let path = env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_FILE.to_string());
        let mut config = if Path::new(&path).exists() {
            Self::from_file(&path)?
        } else {
            Self::default()
        };
        config.apply_env_vars();
        config.validate()?;
        Ok(config)
    }

    /// Load from a specific TOML file (environment variables still
    /// apply on top).
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        let config: Self = toml::from_str(&raw)
            .with_context(|| format!("failed to parse config file {}", path.display()))?;
        Ok(config)
    }

    /// Apply environment variable overrides.
    pub fn apply_env_vars(&mut self) {
        self.logging.apply_env_vars();
    }

    /// Validate the configuration (role names, resource kinds, log
    /// level). Called by [`CrestgateConfig::load`]; call it yourself
    /// when building configs in code.
    pub fn validate(&self) -> Result<()> {
        self.logging.validate()?;
        self.roles.validate()?;
        Ok(())
    }

    /// Build the role registry this configuration describes: the
    /// built-in table when no roles are declared, otherwise exactly the
    /// declared table.
    pub fn build_registry(&self) -> Result<crate::authz::RoleRegistry> {
        self.roles.build_registry().map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource::ResourceKind;
    use crate::session::Role;
    use std::io::Write;

    #[test]
    fn test_default_config_uses_builtin_table() {
        let config = CrestgateConfig::default();
        config.validate().unwrap();
        let registry = config.build_registry().unwrap();
        assert!(registry.capabilities(Role::Admin, ResourceKind::Member).can_view);
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
            [logging]
            level = "debug"

            [roles.officer.service_entry]
            can_view = true
            can_approve = true
            visible_fields = "all"
            "#
        )
        .unwrap();

        let config = CrestgateConfig::from_file(file.path()).unwrap();
        config.validate().unwrap();
        assert_eq!(config.logging.level, "debug");

        let registry = config.build_registry().unwrap();
        let cap = registry.capabilities(Role::Officer, ResourceKind::ServiceEntry);
        assert!(cap.can_view && cap.can_approve);
        // Declared tables replace the built-in one wholesale.
        assert!(!registry.capabilities(Role::Admin, ResourceKind::Member).can_view);
    }

    #[test]
    fn test_missing_file_errors_with_context() {
        let err = CrestgateConfig::from_file("/nonexistent/crestgate.toml").unwrap_err();
        assert!(err.to_string().contains("failed to read config file"));
    }

    #[test]
    fn test_declared_table_is_fail_closed_elsewhere() {
        let config: CrestgateConfig = toml::from_str(
            r#"
            [roles.member.message]
            can_view = true
            visible_fields = "all"
            "#,
        )
        .unwrap();
        let registry = config.build_registry().unwrap();
        assert!(registry.capabilities(Role::Member, ResourceKind::Message).can_view);
        assert!(!registry.capabilities(Role::Member, ResourceKind::Event).can_view);
    }
}
