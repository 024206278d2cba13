//! View composition: the consumer-facing entry point
//!
//! A page render asks the composer one question: given this session and
//! these records, what exactly may I show? The answer is a
//! [`ComposedView`]: the scope-filtered, field-redacted records plus the
//! page-level [`ActionSet`].
//!
//! Composition is a single pass with no retained state, so the same
//! composer can serve any number of sessions concurrently without
//! cross-contamination, and composing a view over its own items yields
//! the same items again.

use crate::authz::{in_scope, Action, ActionGate, FieldRedactor, RoleRegistry};
use crate::resource::{Resource, ResourceKind};
use crate::session::{Session, SessionClaims};
use serde::Serialize;
use std::sync::Arc;

/// Page-level actions available to a session for one resource kind.
///
/// Actions here are page-level ("can create a new campaign"), not
/// per-record; per-record decisions go through [`ActionGate`] directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
pub struct ActionSet {
    pub can_create: bool,
    pub can_edit: bool,
    pub can_approve: bool,
    pub can_delete: bool,
}

impl ActionSet {
    /// The empty action set.
    pub fn deny_all() -> Self {
        Self::default()
    }

    pub fn allows(&self, action: Action) -> bool {
        match action {
            Action::View => false, // view is expressed by items, not actions
            Action::Create => self.can_create,
            Action::Edit => self.can_edit,
            Action::Approve => self.can_approve,
            Action::Delete => self.can_delete,
        }
    }
}

/// A render-ready projection of a record set.
#[derive(Debug, Clone, Serialize)]
pub struct ComposedView {
    pub items: Vec<Resource>,
    pub actions: ActionSet,
}

impl ComposedView {
    /// An empty, deny-all view.
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            actions: ActionSet::deny_all(),
        }
    }
}

/// Combines scope resolution, redaction, and action gating into the
/// exact dataset a page may render.
#[derive(Clone)]
pub struct ViewComposer {
    registry: Arc<RoleRegistry>,
    redactor: FieldRedactor,
    gate: ActionGate,
}

impl ViewComposer {
    pub fn new(registry: Arc<RoleRegistry>) -> Self {
        Self {
            redactor: FieldRedactor::new(registry.clone()),
            gate: ActionGate::new(registry.clone()),
            registry,
        }
    }

    /// Composer over the built-in capability table.
    pub fn builtin() -> Self {
        Self::new(Arc::new(RoleRegistry::builtin()))
    }

    /// Lazy single-pass projection of the records visible to `session`.
    ///
    /// Records of a different kind than requested are skipped with a
    /// warning rather than failing the whole page; one bad record must
    /// not block rendering the rest.
    pub fn visible<'a>(
        &'a self,
        session: &'a Session,
        kind: ResourceKind,
        records: &'a [Resource],
    ) -> impl Iterator<Item = Resource> + 'a {
        let capability = self.registry.capabilities(session.role, kind);
        records
            .iter()
            .filter(move |record| {
                if record.kind != kind {
                    log::warn!(
                        "skipping record \"{}\": kind {} in a {} view",
                        record.id,
                        record.kind,
                        kind
                    );
                    return false;
                }
                capability.can_view && in_scope(session, capability, record)
            })
            .map(move |record| self.redactor.redact(session.role, record))
    }

    /// Produce the full render-ready view for one page.
    pub fn compose(&self, session: &Session, kind: ResourceKind, records: &[Resource]) -> ComposedView {
        ComposedView {
            items: self.visible(session, kind, records).collect(),
            actions: self.page_actions(session, kind),
        }
    }

    /// Compose directly from raw session claims.
    ///
    /// The fail-closed boundary for untrusted role strings: an unknown
    /// role yields an empty, deny-all view and a log line, never an
    /// error or a panic in the rendering path.
    pub fn compose_for_claims(
        &self,
        claims: &SessionClaims,
        kind: ResourceKind,
        records: &[Resource],
    ) -> ComposedView {
        match Session::try_from(claims.clone()) {
            Ok(session) => self.compose(&session, kind, records),
            Err(err) => {
                log::warn!("composing deny-all view: {err}");
                ComposedView::empty()
            }
        }
    }

    fn page_actions(&self, session: &Session, kind: ResourceKind) -> ActionSet {
        ActionSet {
            can_create: self.gate.can_perform(session, Action::Create, kind, None),
            can_edit: self.gate.can_perform(session, Action::Edit, kind, None),
            can_approve: self.gate.can_perform(session, Action::Approve, kind, None),
            can_delete: self.gate.can_perform(session, Action::Delete, kind, None),
        }
    }
}
