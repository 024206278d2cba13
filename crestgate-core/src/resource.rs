//! Domain records and the closed resource-kind set
//!
//! Every record the dashboard shows (a member profile, a dues entry, a
//! service-hour submission, ...) is carried through the authorization
//! layer as a [`Resource`]: a typed envelope holding the record id, its
//! kind, its scope attributes, and a free-form field map. The field map
//! keeps the layer agnostic of each page's exact columns while still
//! letting the redactor project fields away.

use crate::authz::AuthzError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

/// The closed set of resource kinds the platform manages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    Member,
    DuesRecord,
    ServiceEntry,
    Message,
    Event,
    Campaign,
    Title,
    Approval,
}

impl ResourceKind {
    /// Every kind, for totality checks and capability-matrix rendering.
    pub const ALL: [ResourceKind; 8] = [
        ResourceKind::Member,
        ResourceKind::DuesRecord,
        ResourceKind::ServiceEntry,
        ResourceKind::Message,
        ResourceKind::Event,
        ResourceKind::Campaign,
        ResourceKind::Title,
        ResourceKind::Approval,
    ];

    /// Canonical wire name of the kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::Member => "member",
            ResourceKind::DuesRecord => "dues_record",
            ResourceKind::ServiceEntry => "service_entry",
            ResourceKind::Message => "message",
            ResourceKind::Event => "event",
            ResourceKind::Campaign => "campaign",
            ResourceKind::Title => "title",
            ResourceKind::Approval => "approval",
        }
    }

    /// Whether records of this kind are expected to carry scope
    /// attributes.
    ///
    /// Unscoped kinds (announcements, the title catalog) are org-wide:
    /// a record with no scope attributes is visible to anyone who can
    /// view the kind. For scoped kinds the same missing attributes mean
    /// the record is malformed and stays out of scope.
    pub fn is_scoped(&self) -> bool {
        !matches!(self, ResourceKind::Message | ResourceKind::Title)
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResourceKind {
    type Err = AuthzError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "member" => Ok(ResourceKind::Member),
            "dues_record" => Ok(ResourceKind::DuesRecord),
            "service_entry" => Ok(ResourceKind::ServiceEntry),
            "message" => Ok(ResourceKind::Message),
            "event" => Ok(ResourceKind::Event),
            "campaign" => Ok(ResourceKind::Campaign),
            "title" => Ok(ResourceKind::Title),
            "approval" => Ok(ResourceKind::Approval),
            other => Err(AuthzError::UnknownResourceKind(other.to_string())),
        }
    }
}

/// A tagged domain record flowing through the authorization pipeline.
///
/// The envelope fields (`id`, `kind`, scope attributes, `submitted_by`)
/// are what the resolver and gate reason about; everything page-specific
/// lives in the flattened `fields` map and is only touched by the
/// redactor. Resources are immutable value types: the pipeline clones
/// and projects, it never mutates its input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    pub id: String,
    pub kind: ResourceKind,
    /// Chapter the record belongs to, if chapter-scoped.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chapter_owner: Option<String>,
    /// Region the record belongs to, if region-scoped.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region_owner: Option<String>,
    /// User who owns the record; ownership always grants visibility.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub member_owner: Option<String>,
    /// User who submitted the record for approval, if any. Approvals by
    /// the submitter themselves are always denied.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub submitted_by: Option<String>,
    /// Page-specific columns (name, amounts, statuses, ...).
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl Resource {
    pub fn new(id: impl Into<String>, kind: ResourceKind) -> Self {
        Self {
            id: id.into(),
            kind,
            chapter_owner: None,
            region_owner: None,
            member_owner: None,
            submitted_by: None,
            fields: Map::new(),
        }
    }

    /// Set the owning chapter
    pub fn in_chapter(mut self, chapter: impl Into<String>) -> Self {
        self.chapter_owner = Some(chapter.into());
        self
    }

    /// Set the owning region
    pub fn in_region(mut self, region: impl Into<String>) -> Self {
        self.region_owner = Some(region.into());
        self
    }

    /// Set the owning user
    pub fn owned_by(mut self, user_id: impl Into<String>) -> Self {
        self.member_owner = Some(user_id.into());
        self
    }

    /// Set the submitting user
    pub fn from_submitter(mut self, user_id: impl Into<String>) -> Self {
        self.submitted_by = Some(user_id.into());
        self
    }

    /// Add a page-specific field
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    /// True if any scope attribute is present on the record.
    pub fn has_scope_attrs(&self) -> bool {
        self.chapter_owner.is_some() || self.region_owner.is_some() || self.member_owner.is_some()
    }

    /// The record's display name, when the page supplied one.
    pub fn name(&self) -> Option<&str> {
        self.fields.get("name").and_then(Value::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_round_trip() {
        for kind in ResourceKind::ALL {
            assert_eq!(kind.as_str().parse::<ResourceKind>().unwrap(), kind);
        }
    }

    #[test]
    fn test_unknown_kind_is_rejected() {
        let err = "payment".parse::<ResourceKind>().unwrap_err();
        assert!(matches!(err, AuthzError::UnknownResourceKind(name) if name == "payment"));
    }

    #[test]
    fn test_unscoped_kinds() {
        assert!(!ResourceKind::Message.is_scoped());
        assert!(!ResourceKind::Title.is_scoped());
        assert!(ResourceKind::Member.is_scoped());
        assert!(ResourceKind::DuesRecord.is_scoped());
        assert!(ResourceKind::Approval.is_scoped());
    }

    #[test]
    fn test_builder_and_helpers() {
        let record = Resource::new("d-4", ResourceKind::DuesRecord)
            .in_chapter("Beta")
            .owned_by("u-2")
            .with_field("name", "Madison Taylor")
            .with_field("amount", 450);

        assert!(record.has_scope_attrs());
        assert_eq!(record.name(), Some("Madison Taylor"));
        assert_eq!(record.fields.get("amount"), Some(&Value::from(450)));
    }

    #[test]
    fn test_serde_flattens_fields() {
        let json = serde_json::json!({
            "id": "s-1",
            "kind": "service_entry",
            "chapter_owner": "Beta",
            "member_owner": "u-3",
            "name": "Emma Wilson",
            "hours": 6,
            "status": "pending"
        });

        let record: Resource = serde_json::from_value(json.clone()).unwrap();
        assert_eq!(record.kind, ResourceKind::ServiceEntry);
        assert_eq!(record.chapter_owner.as_deref(), Some("Beta"));
        assert_eq!(record.fields.get("hours"), Some(&Value::from(6)));

        let back = serde_json::to_value(&record).unwrap();
        assert_eq!(back, json);
    }
}
