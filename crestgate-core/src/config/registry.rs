//! Capability-table configuration
//!
//! The TOML surface for the role registry. Role and kind names are
//! strings in the file and are validated against the closed sets when
//! the registry is built; a typo fails loudly at startup instead of
//! silently denying (or worse, granting) at request time.

use crate::authz::{AuthzError, AuthzResult, Capability, FieldVisibility, RoleRegistry};
use crate::resource::ResourceKind;
use crate::session::Role;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Declared capability table: role name -> kind name -> capability.
///
/// Empty means "use the built-in table". A non-empty table replaces the
/// built-in one entirely; unlisted (role, kind) pairs deny.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(transparent)]
pub struct RegistryConfig(pub BTreeMap<String, BTreeMap<String, Capability>>);

impl RegistryConfig {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Check every role and kind name against the closed sets.
    pub fn validate(&self) -> AuthzResult<()> {
        for (role_name, kinds) in &self.0 {
            role_name.parse::<Role>()?;
            for kind_name in kinds.keys() {
                kind_name.parse::<ResourceKind>()?;
            }
        }
        Ok(())
    }

    /// Materialize the declared table, or the built-in one when nothing
    /// is declared.
    pub fn build_registry(&self) -> AuthzResult<RoleRegistry> {
        if self.is_empty() {
            return Ok(RoleRegistry::builtin());
        }

        let mut registry = RoleRegistry::empty();
        for (role_name, kinds) in &self.0 {
            let role = role_name.parse::<Role>()?;
            for (kind_name, capability) in kinds {
                let kind = kind_name.parse::<ResourceKind>()?;
                if capability.can_view && capability.visible_fields == FieldVisibility::default() {
                    return Err(AuthzError::InvalidCapabilityTable(format!(
                        "role \"{role_name}\" can view {kind_name} but has no visible_fields; \
                         use \"all\" or list the fields"
                    )));
                }
                registry = registry.with_capability(role, kind, capability.clone());
            }
        }
        Ok(registry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_builds_builtin() {
        let config = RegistryConfig::default();
        let registry = config.build_registry().unwrap();
        assert!(registry.capabilities(Role::Member, ResourceKind::Message).can_view);
    }

    #[test]
    fn test_unknown_role_name_fails_validation() {
        let config: RegistryConfig = toml::from_str(
            r#"
            [superuser.member]
            can_view = true
            visible_fields = "all"
            "#,
        )
        .unwrap();
        assert!(matches!(config.validate(), Err(AuthzError::UnknownRole(_))));
        assert!(config.build_registry().is_err());
    }

    #[test]
    fn test_unknown_kind_name_fails_validation() {
        let config: RegistryConfig = toml::from_str(
            r#"
            [member.payment]
            can_view = true
            visible_fields = "all"
            "#,
        )
        .unwrap();
        assert!(matches!(
            config.validate(),
            Err(AuthzError::UnknownResourceKind(_))
        ));
    }

    #[test]
    fn test_viewable_without_fields_is_rejected() {
        let config: RegistryConfig = toml::from_str(
            r#"
            [member.message]
            can_view = true
            "#,
        )
        .unwrap();
        let err = config.build_registry().unwrap_err();
        assert!(matches!(err, AuthzError::InvalidCapabilityTable(_)));
    }

    #[test]
    fn test_declared_table_round_trips() {
        let config: RegistryConfig = toml::from_str(
            r#"
            [officer.approval]
            can_view = true
            can_approve = true
            visible_fields = ["type", "priority", "submitted_date"]
            "#,
        )
        .unwrap();
        config.validate().unwrap();
        let registry = config.build_registry().unwrap();
        let cap = registry.capabilities(Role::Officer, ResourceKind::Approval);
        assert!(cap.can_approve);
        assert!(cap.visible_fields.allows("priority"));
        assert!(!cap.visible_fields.allows("amount"));
    }
}
