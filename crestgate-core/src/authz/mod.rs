//! Crestgate authorization pipeline
//!
//! One declarative capability table, evaluated through one pipeline,
//! instead of per-page role conditionals.
//!
//! The pipeline runs leaf-first:
//!
//! - [`registry`] - static role -> capability lookup, fail-closed
//! - [`scope`] - is this record inside the session's chapter/region?
//! - [`redact`] - which fields of a visible record may be shown?
//! - [`gate`] - may this session perform an action on this kind?
//! - [`view`] - the consumer-facing composition of all of the above
//!
//! Everything here is a pure function of (session, capability table,
//! records). There is no internal state, no I/O, and denials are valid
//! answers rather than exceptional conditions: the only errors surfaced
//! are unrecognized role or kind names crossing the string boundary.

pub mod capability;
pub mod gate;
pub mod redact;
pub mod registry;
pub mod scope;
pub mod view;

pub use capability::{Capability, FieldVisibility};
pub use gate::{Action, ActionGate};
pub use redact::FieldRedactor;
pub use registry::RoleRegistry;
pub use scope::in_scope;
pub use view::{ActionSet, ComposedView, ViewComposer};

/// Result alias for authorization operations
pub type AuthzResult<T> = Result<T, AuthzError>;

/// Errors surfaced by the authorization layer.
///
/// All of them fail closed: the caller gets a denial, never an implicit
/// grant, and view composition converts them into empty projections
/// rather than propagating.
#[derive(thiserror::Error, Debug)]
pub enum AuthzError {
    #[error("unknown role \"{0}\"")]
    UnknownRole(String),

    #[error("unknown resource kind \"{0}\"")]
    UnknownResourceKind(String),

    #[error("unknown action \"{0}\"")]
    UnknownAction(String),

    #[error("invalid capability table: {0}")]
    InvalidCapabilityTable(String),
}
