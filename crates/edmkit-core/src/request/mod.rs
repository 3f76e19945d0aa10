//! Mutation request construction.
//!
//! Turns a create/update/delete intent into a [`MutationRequest`]: target,
//! wire verb, optional method-override header and payload. Nothing here
//! performs I/O.

mod factory;
mod method;
pub mod payload;

#[cfg(test)]
mod tests;

pub use factory::{
    METHOD_OVERRIDE_HEADER, MutationRequest, MutationRequestFactory, Payload, RequestError,
};
pub use method::{HttpMethod, MutationKind, UpdateKind};
