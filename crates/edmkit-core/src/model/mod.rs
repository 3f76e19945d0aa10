//! Runtime model elements.
//!
//! Schema records in `edmkit_schema` describe *what is declared*; the types
//! here are what the registry hands out. Every element is immutable once
//! built and shared through `Arc`. References to other elements stay as
//! canonical FQNs and are resolved through [`crate::edm::Edm`], which is
//! where broken references surface.

pub mod container;
pub mod element;
pub mod operation;
pub mod primitive;
pub mod term;
pub mod types;

pub use container::{ActionImport, EntityContainer, EntitySet, FunctionImport, Singleton};
pub use element::{NamedElement, NavigationProperty, Property, StructuralShape, StructuredType};
pub use operation::{Operation, OperationKind, Parameter, ReturnType, SignatureKey};
pub use primitive::{EDM_NAMESPACE, EdmPrimitive};
pub use term::{Annotation, AnnotationGroup, Term};
pub use types::{ComplexType, EntityType, EnumMember, EnumType, TypeDefinition};
