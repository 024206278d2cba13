//! User sessions and the closed role set
//!
//! A [`Session`] is what the authorization layer computes views against:
//! who the user is, which role they hold, and which chapter/region they
//! belong to. Sessions are created at login by an external auth
//! collaborator and are immutable for the duration of a view computation.
//!
//! Role strings arrive from outside the trust boundary (tokens, config,
//! CLI flags), so the string-to-[`Role`] conversion is the fail-closed
//! gate: an unrecognized role never maps onto an existing one.

use crate::authz::AuthzError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The closed set of roles recognized by the platform.
///
/// Capabilities are explicit per role, not inferred from rank; the
/// ordering of variants carries no hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    NationalHq,
    Regional,
    Chapter,
    Officer,
    Member,
}

impl Role {
    /// Every role, for totality checks and capability-matrix rendering.
    pub const ALL: [Role; 6] = [
        Role::Admin,
        Role::NationalHq,
        Role::Regional,
        Role::Chapter,
        Role::Officer,
        Role::Member,
    ];

    /// Canonical wire name of the role.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::NationalHq => "national_hq",
            Role::Regional => "regional",
            Role::Chapter => "chapter",
            Role::Officer => "officer",
            Role::Member => "member",
        }
    }

    /// Which organizational attribute this role is matched against when a
    /// record is not globally visible to it.
    pub fn scope(&self) -> RoleScope {
        match self {
            Role::Admin | Role::NationalHq => RoleScope::Organization,
            Role::Regional => RoleScope::Region,
            Role::Chapter | Role::Officer | Role::Member => RoleScope::Chapter,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = AuthzError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Role::Admin),
            "national_hq" => Ok(Role::NationalHq),
            "regional" => Ok(Role::Regional),
            "chapter" => Ok(Role::Chapter),
            "officer" => Ok(Role::Officer),
            "member" => Ok(Role::Member),
            other => Err(AuthzError::UnknownRole(other.to_string())),
        }
    }
}

/// Scope level a role operates at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleScope {
    /// Matched against the record's `chapter_owner`.
    Chapter,
    /// Matched against the record's `region_owner`.
    Region,
    /// Org-wide role; visibility comes from `can_view_all_scopes`, not
    /// from attribute matching.
    Organization,
}

/// Raw session material as it arrives from the login collaborator.
///
/// Everything is a string here; conversion into a [`Session`] is where
/// unknown roles are rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionClaims {
    pub user_id: String,
    pub role: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chapter: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
}

impl SessionClaims {
    pub fn new(user_id: impl Into<String>, role: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            role: role.into(),
            chapter: None,
            region: None,
        }
    }

    /// Set the chapter affiliation
    pub fn with_chapter(mut self, chapter: impl Into<String>) -> Self {
        self.chapter = Some(chapter.into());
        self
    }

    /// Set the region affiliation
    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }
}

/// A validated user session.
///
/// Created at login, discarded at logout. All view computations are pure
/// functions of a `Session` plus a record set, so sessions can be shared
/// freely across threads and evaluations without cross-contamination.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub user_id: String,
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chapter: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    /// When the session was issued, for audit trails.
    pub issued_at: DateTime<Utc>,
}

impl Session {
    /// Create a session for a known role.
    pub fn new(user_id: impl Into<String>, role: Role) -> Self {
        Self {
            user_id: user_id.into(),
            role,
            chapter: None,
            region: None,
            issued_at: Utc::now(),
        }
    }

    /// Set the chapter affiliation
    pub fn with_chapter(mut self, chapter: impl Into<String>) -> Self {
        self.chapter = Some(chapter.into());
        self
    }

    /// Set the region affiliation
    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }
}

impl TryFrom<SessionClaims> for Session {
    type Error = AuthzError;

    fn try_from(claims: SessionClaims) -> Result<Self, Self::Error> {
        let role = claims.role.parse::<Role>()?;
        Ok(Session {
            user_id: claims.user_id,
            role,
            chapter: claims.chapter,
            region: claims.region,
            issued_at: Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_round_trip() {
        for role in Role::ALL {
            assert_eq!(role.as_str().parse::<Role>().unwrap(), role);
        }
    }

    #[test]
    fn test_unknown_role_is_rejected() {
        let err = "superuser".parse::<Role>().unwrap_err();
        assert!(matches!(err, AuthzError::UnknownRole(name) if name == "superuser"));
    }

    #[test]
    fn test_role_scopes() {
        assert_eq!(Role::Admin.scope(), RoleScope::Organization);
        assert_eq!(Role::NationalHq.scope(), RoleScope::Organization);
        assert_eq!(Role::Regional.scope(), RoleScope::Region);
        assert_eq!(Role::Chapter.scope(), RoleScope::Chapter);
        assert_eq!(Role::Officer.scope(), RoleScope::Chapter);
        assert_eq!(Role::Member.scope(), RoleScope::Chapter);
    }

    #[test]
    fn test_claims_to_session() {
        let claims = SessionClaims::new("u-17", "officer")
            .with_chapter("Beta")
            .with_region("Southeast");

        let session = Session::try_from(claims).unwrap();
        assert_eq!(session.user_id, "u-17");
        assert_eq!(session.role, Role::Officer);
        assert_eq!(session.chapter.as_deref(), Some("Beta"));
        assert_eq!(session.region.as_deref(), Some("Southeast"));
    }

    #[test]
    fn test_claims_with_bad_role_fail_closed() {
        let claims = SessionClaims::new("u-1", "root");
        assert!(Session::try_from(claims).is_err());
    }

    #[test]
    fn test_role_serde_uses_snake_case() {
        let json = serde_json::to_string(&Role::NationalHq).unwrap();
        assert_eq!(json, "\"national_hq\"");
        let back: Role = serde_json::from_str("\"regional\"").unwrap();
        assert_eq!(back, Role::Regional);
    }
}
