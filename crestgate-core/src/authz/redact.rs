//! Field redaction: project a record down to what a role may see

use crate::authz::{FieldVisibility, RoleRegistry};
use crate::resource::Resource;
use crate::session::Role;
use serde_json::Map;
use std::sync::Arc;

/// Fields that are never redacted. `id` lives on the envelope and is
/// always carried; `name` is kept whenever the record has one.
const IDENTITY_FIELDS: [&str; 1] = ["name"];

/// Projects records down to the fields a role is allowed to see.
///
/// Redaction is deterministic per (role, kind): the same pair always
/// yields the same field set, so projections can be memoized and
/// compared across renders. The input record is never mutated.
#[derive(Clone)]
pub struct FieldRedactor {
    registry: Arc<RoleRegistry>,
}

impl FieldRedactor {
    pub fn new(registry: Arc<RoleRegistry>) -> Self {
        Self { registry }
    }

    /// Return a copy of `record` containing only the fields visible to
    /// `role`, plus the identity fields.
    pub fn redact(&self, role: Role, record: &Resource) -> Resource {
        let capability = self.registry.capabilities(role, record.kind);
        match &capability.visible_fields {
            FieldVisibility::All => record.clone(),
            FieldVisibility::Only(_) => {
                let mut projection = record.clone();
                projection.fields = self.project_fields(record, &capability.visible_fields);
                projection
            }
        }
    }

    fn project_fields(&self, record: &Resource, visibility: &FieldVisibility) -> Map<String, serde_json::Value> {
        record
            .fields
            .iter()
            .filter(|(key, _)| IDENTITY_FIELDS.contains(&key.as_str()) || visibility.allows(key))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource::ResourceKind;

    fn dues_record() -> Resource {
        Resource::new("d-1", ResourceKind::DuesRecord)
            .in_chapter("Beta")
            .owned_by("u-2")
            .with_field("name", "Madison Taylor")
            .with_field("amount", 450)
            .with_field("status", "paid")
            .with_field("quarter", "Q1")
            .with_field("total_collected", 5175)
            .with_field("payment_method", "card")
    }

    fn redactor() -> FieldRedactor {
        FieldRedactor::new(Arc::new(RoleRegistry::builtin()))
    }

    #[test]
    fn test_member_view_hides_financial_aggregates() {
        let projection = redactor().redact(Role::Member, &dues_record());
        assert!(projection.fields.contains_key("amount"));
        assert!(projection.fields.contains_key("status"));
        assert!(!projection.fields.contains_key("total_collected"));
        assert!(!projection.fields.contains_key("payment_method"));
    }

    #[test]
    fn test_identity_fields_survive_redaction() {
        let projection = redactor().redact(Role::Member, &dues_record());
        assert_eq!(projection.id, "d-1");
        assert_eq!(projection.name(), Some("Madison Taylor"));
    }

    #[test]
    fn test_admin_sees_everything() {
        let record = dues_record();
        let projection = redactor().redact(Role::Admin, &record);
        assert_eq!(projection, record);
    }

    #[test]
    fn test_input_record_is_untouched() {
        let record = dues_record();
        let before = record.clone();
        let _ = redactor().redact(Role::Member, &record);
        assert_eq!(record, before);
    }

    #[test]
    fn test_projection_is_subset_of_configured_fields() {
        let registry = RoleRegistry::builtin();
        let projection = redactor().redact(Role::Member, &dues_record());
        let visibility = &registry
            .capabilities(Role::Member, ResourceKind::DuesRecord)
            .visible_fields;
        for key in projection.fields.keys() {
            assert!(
                key == "name" || visibility.allows(key),
                "unexpected field {key} in projection"
            );
        }
    }

    #[test]
    fn test_scope_attrs_survive_for_recomposition() {
        // The projection must stay routable through the pipeline.
        let projection = redactor().redact(Role::Member, &dues_record());
        assert_eq!(projection.chapter_owner.as_deref(), Some("Beta"));
        assert_eq!(projection.member_owner.as_deref(), Some("u-2"));
    }
}
