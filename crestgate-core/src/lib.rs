//! Crestgate - Core
//!
//! Role-aware view authorization for membership-management platforms.
//!
//! # Overview
//!
//! Crestgate answers one question for a rendering layer: given a user
//! session (role, chapter, region) and a collection of records, which
//! records are visible, which of their fields may be shown, and which
//! actions are available? The answer is computed by a pipeline of pure
//! functions over a declarative capability table, replacing the
//! per-page role conditionals such dashboards tend to accumulate.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use crestgate_core::prelude::*;
//!
//! let composer = ViewComposer::builtin();
//! let session = Session::new("u-17", Role::Officer).with_chapter("Beta");
//!
//! let view = composer.compose(&session, ResourceKind::ServiceEntry, &records);
//! for item in &view.items {
//!     // already scope-filtered and field-redacted
//! }
//! if view.actions.can_approve {
//!     // render the approve button
//! }
//! ```
//!
//! # Architecture
//!
//! - [`session`] - user sessions and the closed role set
//! - [`resource`] - domain records and the closed resource-kind set
//! - [`authz`] - capability registry, scope resolver, field redactor,
//!   action gate, and the view composer that ties them together
//! - [`config`] - TOML capability tables with env-var supersedence
//! - [`sample`] - the demo dataset used by the CLI and integration tests
//!
//! # Guarantees
//!
//! - **Fail closed**: unknown roles, kinds, or table holes deny; they
//!   never grant and never panic the rendering path
//! - **Pure**: every operation is a function of (session, table, data);
//!   no I/O, no hidden state, safe to share across threads
//! - **Non-destructive**: input records are never mutated; redaction
//!   returns new projections with identity fields intact

pub mod authz;
pub mod config;
pub mod prelude;
pub mod resource;
pub mod sample;
pub mod session;

pub use authz::{AuthzError, AuthzResult};
