//! Scope resolution: is a record inside a session's horizon?

use crate::authz::Capability;
use crate::resource::Resource;
use crate::session::{RoleScope, Session};

/// Decide whether `record` is in scope for `session`.
///
/// Resolution order:
///
/// 1. `can_view_all_scopes` short-circuits everything.
/// 2. Self-ownership: a user always sees their own record, even when its
///    chapter or region no longer matches (transfers, edge accounts).
/// 3. A record with no scope attributes at all is org-wide when its kind
///    is declared unscoped; for scoped kinds the missing attributes mean
///    the record is malformed and stays out of scope.
/// 4. Chapter-scoped roles match `chapter_owner` against the session's
///    chapter; region-scoped roles match `region_owner` against the
///    session's region.
///
/// Note this decides scope only; whether the kind is viewable at all is
/// the capability's `can_view`, checked by the gate and the composer.
pub fn in_scope(session: &Session, capability: &Capability, record: &Resource) -> bool {
    if capability.can_view_all_scopes {
        return true;
    }

    if let Some(owner) = record.member_owner.as_deref() {
        if owner == session.user_id {
            return true;
        }
    }

    if !record.has_scope_attrs() {
        return !record.kind.is_scoped();
    }

    match session.role.scope() {
        RoleScope::Chapter => match (record.chapter_owner.as_deref(), session.chapter.as_deref()) {
            (Some(record_chapter), Some(session_chapter)) => record_chapter == session_chapter,
            _ => false,
        },
        RoleScope::Region => match (record.region_owner.as_deref(), session.region.as_deref()) {
            (Some(record_region), Some(session_region)) => record_region == session_region,
            _ => false,
        },
        // Org-wide roles without can_view_all_scopes have no narrower
        // attribute to match against.
        RoleScope::Organization => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource::ResourceKind;
    use crate::session::Role;

    fn chapter_session() -> Session {
        Session::new("u-1", Role::Member)
            .with_chapter("Beta")
            .with_region("Southeast")
    }

    #[test]
    fn test_all_scopes_short_circuits() {
        let session = Session::new("u-1", Role::Admin);
        let record = Resource::new("m-9", ResourceKind::Member).in_chapter("Gamma");
        let cap = Capability::full();
        assert!(in_scope(&session, &cap, &record));
    }

    #[test]
    fn test_ownership_beats_scope_mismatch() {
        let session = chapter_session();
        // Transferred account: chapter no longer matches, still visible.
        let record = Resource::new("m-1", ResourceKind::Member)
            .in_chapter("Gamma")
            .owned_by("u-1");
        assert!(in_scope(&session, &Capability::viewer(), &record));
    }

    #[test]
    fn test_chapter_match() {
        let session = chapter_session();
        let ours = Resource::new("d-1", ResourceKind::DuesRecord)
            .in_chapter("Beta")
            .owned_by("u-other");
        let theirs = Resource::new("d-2", ResourceKind::DuesRecord)
            .in_chapter("Gamma")
            .owned_by("u-other");
        assert!(in_scope(&session, &Capability::viewer(), &ours));
        assert!(!in_scope(&session, &Capability::viewer(), &theirs));
    }

    #[test]
    fn test_region_match() {
        let session = Session::new("u-5", Role::Regional).with_region("Southeast");
        let ours = Resource::new("e-1", ResourceKind::Event).in_region("Southeast");
        let theirs = Resource::new("e-2", ResourceKind::Event).in_region("Northeast");
        assert!(in_scope(&session, &Capability::viewer(), &ours));
        assert!(!in_scope(&session, &Capability::viewer(), &theirs));
    }

    #[test]
    fn test_unscoped_kind_without_attrs_is_global() {
        let session = chapter_session();
        // A national announcement carries no scope attributes.
        let announcement = Resource::new("msg-1", ResourceKind::Message);
        assert!(in_scope(&session, &Capability::viewer(), &announcement));
    }

    #[test]
    fn test_scoped_kind_without_attrs_is_denied() {
        let session = chapter_session();
        // A dues record with no owners is malformed, not global.
        let stray = Resource::new("d-9", ResourceKind::DuesRecord);
        assert!(!in_scope(&session, &Capability::viewer(), &stray));
    }

    #[test]
    fn test_chapter_role_ignores_region_attr() {
        // Chapter-scoped role, record only carries a region: no match.
        let session = chapter_session();
        let record = Resource::new("e-3", ResourceKind::Event).in_region("Southeast");
        assert!(!in_scope(&session, &Capability::viewer(), &record));
    }

    #[test]
    fn test_session_without_affiliation_matches_nothing() {
        let session = Session::new("u-7", Role::Member); // no chapter set
        let record = Resource::new("m-2", ResourceKind::Member).in_chapter("Beta");
        assert!(!in_scope(&session, &Capability::viewer(), &record));
    }
}
