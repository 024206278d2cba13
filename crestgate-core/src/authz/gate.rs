//! Action gating: may this session perform an action?

use crate::authz::{in_scope, AuthzError, RoleRegistry};
use crate::resource::{Resource, ResourceKind};
use crate::session::Session;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Actions a page can offer on a resource kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    View,
    Create,
    Edit,
    Approve,
    Delete,
}

impl Action {
    pub const ALL: [Action; 5] = [
        Action::View,
        Action::Create,
        Action::Edit,
        Action::Approve,
        Action::Delete,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Action::View => "view",
            Action::Create => "create",
            Action::Edit => "edit",
            Action::Approve => "approve",
            Action::Delete => "delete",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Action {
    type Err = AuthzError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "view" => Ok(Action::View),
            "create" => Ok(Action::Create),
            "edit" => Ok(Action::Edit),
            "approve" => Ok(Action::Approve),
            "delete" => Ok(Action::Delete),
            other => Err(AuthzError::UnknownAction(other.to_string())),
        }
    }
}

/// Enforces the capability flags for concrete actions.
///
/// Create and delete are pure capability checks. View and edit
/// additionally require the record to be in scope when one is supplied:
/// an officer cannot edit a record outside their chapter even if they
/// can view a redacted version of it. Approve requires scope as well,
/// and always denies self-approval regardless of role.
#[derive(Clone)]
pub struct ActionGate {
    registry: Arc<RoleRegistry>,
}

impl ActionGate {
    pub fn new(registry: Arc<RoleRegistry>) -> Self {
        Self { registry }
    }

    /// Permit/deny decision for one action. A denial is a valid business
    /// answer; this never errors.
    pub fn can_perform(
        &self,
        session: &Session,
        action: Action,
        kind: ResourceKind,
        record: Option<&Resource>,
    ) -> bool {
        let capability = self.registry.capabilities(session.role, kind);
        match action {
            Action::Create => capability.can_create,
            Action::Delete => capability.can_delete,
            Action::View => {
                capability.can_view
                    && record.map_or(true, |r| in_scope(session, capability, r))
            }
            Action::Edit => {
                capability.can_edit
                    && record.map_or(true, |r| in_scope(session, capability, r))
            }
            Action::Approve => {
                if !capability.can_approve {
                    return false;
                }
                match record {
                    // A submitter never approves their own submission.
                    Some(r) if r.submitted_by.as_deref() == Some(session.user_id.as_str()) => false,
                    Some(r) => in_scope(session, capability, r),
                    None => true,
                }
            }
        }
    }
}
