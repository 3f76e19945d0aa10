//! Declarative EDM schema records and load-time structural validation.

pub mod error;
pub mod node;
pub mod validate;

/// Maximum length for simple identifiers (element, property and parameter names).
pub const MAX_IDENTIFIER_LEN: usize = 128;

/// Maximum length for a dotted namespace.
pub const MAX_NAMESPACE_LEN: usize = 511;

///
/// Prelude
///

pub mod prelude {
    pub use crate::{
        err,
        error::ErrorTree,
        node::*,
        validate::validate_schemas,
    };
    pub use serde::{Deserialize, Serialize};
}

