//! edmkit: typed EDM metadata, overload resolution and mutation requests.
//!
//! ## Crate layout
//! - `core`: typed model, lazy type registry, overload resolution, mutation
//!   requests and client configuration.
//! - `schema`: declarative schema records and load-time validation.
//!
//! Schema declarations come in as [`schema::node::SchemaDef`] values (decoded
//! by the caller, typically with serde), are loaded into a [`core::edm::Edm`],
//! and are then queried, resolved against and used to build requests.

pub use edmkit_core as core;
pub use edmkit_schema as schema;

//
// Consts
//

/// Workspace version re-export for downstream tooling/tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use crate::core::Error;

///
/// Prelude
///

pub mod prelude {
    pub use crate::core::prelude::*;
    pub use crate::schema::node::{
        ActionDef, ComplexTypeDef, EntityContainerDef, EntitySetDef, EntityTypeDef, FunctionDef,
        ParameterDef, PropertyDef, ReturnTypeDef, SchemaDef,
    };
    pub use serde::{Deserialize, Serialize};
}
