//! Declarative schema records.
//!
//! These are the already-parsed declarations handed over by whatever reads
//! the external metadata document. They are plain data: names are strings,
//! references to other elements are unresolved qualified names, and nothing
//! here knows about the runtime model built from them.

mod annotation;
mod container;
mod r#enum;
mod operation;
mod property;
mod schema;
mod structured;
mod term;
mod type_definition;

pub use annotation::*;
pub use container::*;
pub use r#enum::*;
pub use operation::*;
pub use property::*;
pub use schema::*;
pub use structured::*;
pub use term::*;
pub use type_definition::*;

use crate::error::ErrorTree;
use derive_more::Display;
use serde::{Deserialize, Serialize};

///
/// ElementKind
///
/// Kinds of named schema elements. Names are unique per kind within one
/// namespace, except for actions and functions which overload by name.
///

#[derive(Clone, Copy, Debug, Deserialize, Display, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[remain::sorted]
pub enum ElementKind {
    Action,
    AnnotationGroup,
    ComplexType,
    EntityContainer,
    EntityType,
    EnumType,
    Function,
    Term,
    TypeDefinition,
}

impl ElementKind {
    /// Whether several declarations may share one name.
    #[must_use]
    pub const fn allows_overloads(self) -> bool {
        matches!(self, Self::Action | Self::Function)
    }
}

///
/// NamedNode
///

pub trait NamedNode {
    const KIND: ElementKind;

    fn name(&self) -> &str;
}

///
/// ValidateNode
///
/// Local, reference-free structural checks for one declaration.
///

pub trait ValidateNode {
    fn validate(&self) -> Result<(), ErrorTree> {
        Ok(())
    }
}
