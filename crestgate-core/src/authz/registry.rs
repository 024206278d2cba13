//! Role registry: the declarative capability table
//!
//! The registry is process-wide static configuration, built once at
//! startup (from the built-in table or from a config file) and treated
//! as immutable afterwards. Role definitions change via redeployment,
//! not user action.
//!
//! Lookups are total over the closed [`Role`] and [`ResourceKind`] sets:
//! a combination the table never mentions resolves to the deny-all
//! capability. Role names arriving as strings go through
//! [`RoleRegistry::capabilities_for_name`], which fails closed and logs
//! instead of silently granting anything.

use crate::authz::{AuthzError, AuthzResult, Capability};
use crate::resource::ResourceKind;
use crate::session::Role;
use std::collections::HashMap;
use std::str::FromStr;

/// Immutable mapping from (role, resource kind) to a [`Capability`].
#[derive(Debug, Clone)]
pub struct RoleRegistry {
    table: HashMap<Role, HashMap<ResourceKind, Capability>>,
    /// Returned for combinations the table does not mention.
    deny: Capability,
}

impl RoleRegistry {
    /// An empty registry: every lookup denies.
    pub fn empty() -> Self {
        Self {
            table: HashMap::new(),
            deny: Capability::deny_all(),
        }
    }

    /// Grant a capability to a role for one resource kind.
    pub fn with_capability(mut self, role: Role, kind: ResourceKind, capability: Capability) -> Self {
        self.table.entry(role).or_default().insert(kind, capability);
        self
    }

    /// Grant the same capability to a role for several resource kinds.
    pub fn with_capabilities<I>(mut self, role: Role, kinds: I, capability: Capability) -> Self
    where
        I: IntoIterator<Item = ResourceKind>,
    {
        for kind in kinds {
            self = self.with_capability(role, kind, capability.clone());
        }
        self
    }

    /// Capability lookup, total over the closed role/kind sets.
    pub fn capabilities(&self, role: Role, kind: ResourceKind) -> &Capability {
        self.table
            .get(&role)
            .and_then(|kinds| kinds.get(&kind))
            .unwrap_or(&self.deny)
    }

    /// Capability lookup from an untrusted role name.
    ///
    /// Unknown names are logged and rejected; callers that cannot
    /// propagate the error should treat it as deny-all.
    pub fn capabilities_for_name(&self, role: &str, kind: ResourceKind) -> AuthzResult<&Capability> {
        match Role::from_str(role) {
            Ok(role) => Ok(self.capabilities(role, kind)),
            Err(err) => {
                log::warn!("denying access for unrecognized role \"{role}\"");
                Err(err)
            }
        }
    }

    /// Roles that have at least one capability granted.
    pub fn roles(&self) -> impl Iterator<Item = Role> + '_ {
        Role::ALL.iter().copied().filter(|role| self.table.contains_key(role))
    }

    /// The built-in table, reproducing the membership dashboard's gates.
    ///
    /// admin and national_hq are org-wide; regional sees its region;
    /// chapter, officer, and member see their chapter. Financial
    /// aggregates (total_collected, collection_rate) stay with admin and
    /// national_hq only. The one asymmetry between admin and national_hq
    /// is member deletion, which only admin holds.
    pub fn builtin() -> Self {
        let mut registry = Self::empty()
            .with_capabilities(Role::Admin, ResourceKind::ALL, Capability::full())
            .with_capabilities(Role::NationalHq, ResourceKind::ALL, Capability::full());

        registry = registry.with_capability(
            Role::NationalHq,
            ResourceKind::Member,
            Capability::full().without_delete(),
        );

        // Regional: region-scoped oversight, no approvals.
        registry = registry
            .with_capability(
                Role::Regional,
                ResourceKind::Member,
                Capability::viewer().with_create().with_edit(),
            )
            .with_capability(
                Role::Regional,
                ResourceKind::DuesRecord,
                Capability::viewer_of(["amount", "status", "due_date", "quarter", "year"]),
            )
            .with_capability(Role::Regional, ResourceKind::ServiceEntry, Capability::viewer())
            .with_capability(Role::Regional, ResourceKind::Message, Capability::viewer().with_create())
            .with_capability(Role::Regional, ResourceKind::Event, Capability::viewer().with_create())
            .with_capability(Role::Regional, ResourceKind::Campaign, Capability::viewer().with_create())
            .with_capability(Role::Regional, ResourceKind::Title, Capability::viewer());

        // Officer: runs the chapter day to day, approves submissions.
        registry = registry
            .with_capability(
                Role::Officer,
                ResourceKind::Member,
                Capability::viewer().with_create().with_edit(),
            )
            .with_capability(
                Role::Officer,
                ResourceKind::DuesRecord,
                Capability::viewer_of([
                    "amount",
                    "status",
                    "due_date",
                    "paid_date",
                    "quarter",
                    "year",
                    "payment_method",
                    "notes",
                ])
                .with_create()
                .with_edit(),
            )
            .with_capability(
                Role::Officer,
                ResourceKind::ServiceEntry,
                Capability::viewer().with_edit().with_approve(),
            )
            .with_capability(Role::Officer, ResourceKind::Message, Capability::viewer().with_create())
            .with_capability(
                Role::Officer,
                ResourceKind::Event,
                Capability::viewer().with_create().with_edit(),
            )
            .with_capability(Role::Officer, ResourceKind::Campaign, Capability::viewer().with_create())
            .with_capability(Role::Officer, ResourceKind::Title, Capability::viewer())
            .with_capability(
                Role::Officer,
                ResourceKind::Approval,
                Capability::viewer().with_approve(),
            );

        // Chapter: chapter-level viewing plus roster/event intake.
        registry = registry
            .with_capability(Role::Chapter, ResourceKind::Member, Capability::viewer().with_create())
            .with_capability(
                Role::Chapter,
                ResourceKind::DuesRecord,
                Capability::viewer_of(["amount", "status", "due_date", "quarter", "year"]),
            )
            .with_capability(Role::Chapter, ResourceKind::ServiceEntry, Capability::viewer())
            .with_capability(Role::Chapter, ResourceKind::Message, Capability::viewer().with_create())
            .with_capability(Role::Chapter, ResourceKind::Event, Capability::viewer().with_create())
            .with_capability(Role::Chapter, ResourceKind::Campaign, Capability::viewer())
            .with_capability(Role::Chapter, ResourceKind::Title, Capability::viewer());

        // Member: sees their chapter, logs their own service hours.
        registry = registry
            .with_capability(
                Role::Member,
                ResourceKind::Member,
                Capability::viewer_of([
                    "email",
                    "major",
                    "graduation_year",
                    "status",
                    "service_hours",
                    "chapter",
                    "region",
                ]),
            )
            .with_capability(
                Role::Member,
                ResourceKind::DuesRecord,
                Capability::viewer_of(["amount", "status", "due_date", "quarter", "year"]),
            )
            .with_capability(
                Role::Member,
                ResourceKind::ServiceEntry,
                Capability::viewer().with_create(),
            )
            .with_capability(Role::Member, ResourceKind::Message, Capability::viewer())
            .with_capability(Role::Member, ResourceKind::Event, Capability::viewer())
            .with_capability(Role::Member, ResourceKind::Campaign, Capability::viewer())
            .with_capability(Role::Member, ResourceKind::Title, Capability::viewer());

        registry
    }
}

impl Default for RoleRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}
