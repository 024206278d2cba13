//! Per-(role, kind) capability flags and field visibility

use serde::de::{self, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeSet;
use std::fmt;

/// What a role may do with one resource kind.
///
/// The default is deny-all: a capability that was never granted behaves
/// exactly like an explicit denial, so holes in a table never leak
/// access.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Capability {
    pub can_view: bool,
    /// Bypass chapter/region matching entirely (org-wide roles).
    pub can_view_all_scopes: bool,
    pub can_edit: bool,
    pub can_approve: bool,
    pub can_create: bool,
    pub can_delete: bool,
    pub visible_fields: FieldVisibility,
}

impl Capability {
    /// The fail-closed capability: nothing visible, nothing permitted.
    pub fn deny_all() -> Self {
        Self::default()
    }

    /// View-only capability showing every field.
    pub fn viewer() -> Self {
        Self {
            can_view: true,
            visible_fields: FieldVisibility::All,
            ..Self::default()
        }
    }

    /// View-only capability restricted to the listed fields.
    pub fn viewer_of<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            can_view: true,
            visible_fields: FieldVisibility::only(fields),
            ..Self::default()
        }
    }

    /// Full capability: all scopes, all fields, all actions.
    pub fn full() -> Self {
        Self {
            can_view: true,
            can_view_all_scopes: true,
            can_edit: true,
            can_approve: true,
            can_create: true,
            can_delete: true,
            visible_fields: FieldVisibility::All,
        }
    }

    /// Allow editing
    pub fn with_edit(mut self) -> Self {
        self.can_edit = true;
        self
    }

    /// Allow approving
    pub fn with_approve(mut self) -> Self {
        self.can_approve = true;
        self
    }

    /// Allow creating
    pub fn with_create(mut self) -> Self {
        self.can_create = true;
        self
    }

    /// Allow deleting
    pub fn with_delete(mut self) -> Self {
        self.can_delete = true;
        self
    }

    /// Disallow deleting
    pub fn without_delete(mut self) -> Self {
        self.can_delete = false;
        self
    }
}

/// Which fields of a record a role may see.
///
/// Serialized as the string `"all"` or a list of field names, the same
/// shape in TOML tables and JSON payloads. Identity fields (`id`, and
/// `name` when present) are never redacted regardless of this setting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldVisibility {
    All,
    Only(BTreeSet<String>),
}

impl FieldVisibility {
    /// Build an explicit field list.
    pub fn only<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        FieldVisibility::Only(fields.into_iter().map(Into::into).collect())
    }

    /// Whether a field of this name may be shown.
    pub fn allows(&self, field: &str) -> bool {
        match self {
            FieldVisibility::All => true,
            FieldVisibility::Only(fields) => fields.contains(field),
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, FieldVisibility::All)
    }
}

impl Default for FieldVisibility {
    fn default() -> Self {
        FieldVisibility::Only(BTreeSet::new())
    }
}

impl Serialize for FieldVisibility {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            FieldVisibility::All => serializer.serialize_str("all"),
            FieldVisibility::Only(fields) => fields.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for FieldVisibility {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct FieldVisibilityVisitor;

        impl<'de> Visitor<'de> for FieldVisibilityVisitor {
            type Value = FieldVisibility;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("the string \"all\" or a list of field names")
            }

            fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
                if value.eq_ignore_ascii_case("all") {
                    Ok(FieldVisibility::All)
                } else {
                    Err(E::invalid_value(de::Unexpected::Str(value), &self))
                }
            }

            fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
                let mut fields = BTreeSet::new();
                while let Some(field) = seq.next_element::<String>()? {
                    fields.insert(field);
                }
                Ok(FieldVisibility::Only(fields))
            }
        }

        deserializer.deserialize_any(FieldVisibilityVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_deny_all() {
        let cap = Capability::default();
        assert!(!cap.can_view);
        assert!(!cap.can_view_all_scopes);
        assert!(!cap.can_edit);
        assert!(!cap.can_approve);
        assert!(!cap.can_create);
        assert!(!cap.can_delete);
        assert!(!cap.visible_fields.allows("name"));
    }

    #[test]
    fn test_builders() {
        let cap = Capability::viewer_of(["amount", "status"])
            .with_create()
            .with_edit();
        assert!(cap.can_view && cap.can_create && cap.can_edit);
        assert!(!cap.can_approve && !cap.can_delete);
        assert!(cap.visible_fields.allows("amount"));
        assert!(!cap.visible_fields.allows("total_collected"));
    }

    #[test]
    fn test_visibility_serde_all() {
        let json = serde_json::to_string(&FieldVisibility::All).unwrap();
        assert_eq!(json, "\"all\"");
        let back: FieldVisibility = serde_json::from_str("\"all\"").unwrap();
        assert!(back.is_all());
    }

    #[test]
    fn test_visibility_serde_list() {
        let vis = FieldVisibility::only(["status", "amount"]);
        let json = serde_json::to_string(&vis).unwrap();
        // BTreeSet keeps the list sorted
        assert_eq!(json, "[\"amount\",\"status\"]");
        let back: FieldVisibility = serde_json::from_str(&json).unwrap();
        assert_eq!(back, vis);
    }

    #[test]
    fn test_visibility_rejects_other_strings() {
        let result: Result<FieldVisibility, _> = serde_json::from_str("\"everything\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_capability_from_partial_toml() {
        let cap: Capability = toml::from_str(
            r#"
            can_view = true
            can_approve = true
            visible_fields = "all"
            "#,
        )
        .unwrap();
        assert!(cap.can_view && cap.can_approve);
        assert!(!cap.can_delete);
        assert!(cap.visible_fields.is_all());
    }
}
