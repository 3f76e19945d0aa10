//! Overload resolution for actions and functions.
//!
//! Operations sharing a name form an overload set. A call site describes
//! what it supplies (an optional binding shape plus positional argument
//! shapes) and the resolver picks the single signature that accepts it.

mod resolve;

pub use resolve::OverloadResolver;

use crate::{error::ErrorClass, fqn::FullQualifiedName};
use thiserror::Error as ThisError;

///
/// ArgShape
///
/// Type and cardinality of one supplied argument. Nullability is not part
/// of the shape.
///

#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct ArgShape {
    pub type_name: FullQualifiedName,
    pub collection: bool,
}

impl ArgShape {
    #[must_use]
    pub const fn single(type_name: FullQualifiedName) -> Self {
        Self {
            type_name,
            collection: false,
        }
    }

    #[must_use]
    pub const fn collection(type_name: FullQualifiedName) -> Self {
        Self {
            type_name,
            collection: true,
        }
    }
}

///
/// OverloadKind
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum OverloadKind {
    Action,
    Function,
}

///
/// OverloadQuery
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OverloadQuery {
    pub name: FullQualifiedName,
    pub kind: OverloadKind,
    pub binding: Option<ArgShape>,
    pub arguments: Vec<ArgShape>,
}

impl OverloadQuery {
    #[must_use]
    pub const fn action(name: FullQualifiedName) -> Self {
        Self {
            name,
            kind: OverloadKind::Action,
            binding: None,
            arguments: Vec::new(),
        }
    }

    #[must_use]
    pub const fn function(name: FullQualifiedName) -> Self {
        Self {
            name,
            kind: OverloadKind::Function,
            binding: None,
            arguments: Vec::new(),
        }
    }

    #[must_use]
    pub fn bound_to(mut self, binding: ArgShape) -> Self {
        self.binding = Some(binding);
        self
    }

    #[must_use]
    pub fn with_argument(mut self, argument: ArgShape) -> Self {
        self.arguments.push(argument);
        self
    }
}

///
/// ResolveError
///

#[remain::sorted]
#[derive(Debug, ThisError)]
pub enum ResolveError {
    #[error("{matched} overloads of '{name}' accept the supplied arguments")]
    AmbiguousOverload {
        name: FullQualifiedName,
        matched: usize,

        /// At least two matching signatures are declared identically.
        duplicate: bool,
    },

    #[error("no overload of '{name}' accepts the supplied arguments")]
    NoMatchingOverload { name: FullQualifiedName },
}

impl ResolveError {
    #[must_use]
    pub const fn class(&self) -> ErrorClass {
        match self {
            Self::AmbiguousOverload { .. } => ErrorClass::AmbiguousOverload,
            Self::NoMatchingOverload { .. } => ErrorClass::NoMatchingOverload,
        }
    }
}
