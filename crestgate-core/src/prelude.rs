//! Prelude module for convenient imports.
//!
//! Import everything you need with a single line:
//!
//! ```rust,ignore
//! use crestgate_core::prelude::*;
//! ```

// === Sessions and records ===
pub use crate::resource::{Resource, ResourceKind};
pub use crate::session::{Role, RoleScope, Session, SessionClaims};

// === Authorization pipeline ===
pub use crate::authz::{
    in_scope, Action, ActionGate, ActionSet, AuthzError, AuthzResult, Capability, ComposedView,
    FieldRedactor, FieldVisibility, RoleRegistry, ViewComposer,
};

// === Configuration ===
pub use crate::config::{CrestgateConfig, LoggingConfig, RegistryConfig};
