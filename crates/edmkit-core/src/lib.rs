//! Core runtime for edmkit: the typed model, the lazy type registry, overload
//! resolution and mutation request construction.

pub mod config;
pub mod edm;
pub mod error;
pub mod fqn;
pub mod model;
pub mod operation;
pub mod request;

pub use error::Error;

///
/// Prelude
///

pub mod prelude {
    pub use crate::{
        config::ClientConfig,
        edm::{Edm, EdmSchema, TypeKind},
        error::{Error, ErrorClass, ErrorOrigin},
        fqn::FullQualifiedName,
        model::{
            ComplexType, EdmPrimitive, EntityContainer, EntityType, EnumType, NamedElement,
            Operation, StructuredType, Term, TypeDefinition,
        },
        operation::{ArgShape, OverloadQuery},
        request::{
            HttpMethod, MutationKind, MutationRequest, MutationRequestFactory, Payload,
            UpdateKind,
        },
    };
}
