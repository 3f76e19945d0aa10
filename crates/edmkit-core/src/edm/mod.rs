//! Type registry.
//!
//! [`Edm`] owns one [`EdmSchema`] per namespace and a model-wide index that
//! is frozen on first lookup. Load-time validation only covers structure;
//! references between elements resolve here, lazily, and a reference that
//! does not resolve is reported as [`SchemaError`] when it is first walked.

mod index;
mod schema;


pub use schema::EdmSchema;

use crate::{
    error::{Error, ErrorClass, ErrorOrigin},
    fqn::{FullQualifiedName, NamespaceAliases},
    model::{
        ComplexType, EdmPrimitive, EntityContainer, EntityType, EnumType, Operation,
        StructuredType, Term, TypeDefinition,
    },
};
use edmkit_schema::{error::ErrorTree, node::SchemaDef, validate::validate_schemas};
use index::TypeIndex;
use std::{
    collections::BTreeSet,
    sync::{Arc, OnceLock},
};
use thiserror::Error as ThisError;

///
/// SchemaError
///

#[remain::sorted]
#[derive(Debug, ThisError)]
pub enum SchemaError {
    #[error("inheritance cycle through '{0}'")]
    InheritanceCycle(FullQualifiedName),

    #[error("default container '{0}' is not declared")]
    MissingDefaultContainer(FullQualifiedName),

    #[error("default container declared twice: '{first}' and '{second}'")]
    MultipleDefaultContainers {
        first: FullQualifiedName,
        second: FullQualifiedName,
    },

    #[error("'{ty}' derives from unknown type '{base}'")]
    UnknownBaseType {
        ty: FullQualifiedName,
        base: FullQualifiedName,
    },

    #[error("unknown type '{0}'")]
    UnknownType(FullQualifiedName),

    #[error("schema validation failed:\n{0}")]
    Validation(ErrorTree),
}

impl SchemaError {
    #[must_use]
    pub const fn class(&self) -> ErrorClass {
        ErrorClass::MalformedSchema
    }

    /// Validation failures come from the declarations themselves; the rest
    /// surface while the registry walks references.
    #[must_use]
    pub const fn origin(&self) -> ErrorOrigin {
        match self {
            Self::Validation(_) => ErrorOrigin::Schema,
            _ => ErrorOrigin::Registry,
        }
    }
}

///
/// TypeKind
///
/// What a type reference names once resolved.
///

#[derive(Clone, Debug)]
pub enum TypeKind {
    Complex(Arc<ComplexType>),
    Definition(Arc<TypeDefinition>),
    Entity(Arc<EntityType>),
    Enum(Arc<EnumType>),
    Primitive(EdmPrimitive),
}

impl TypeKind {
    #[must_use]
    pub const fn is_structured(&self) -> bool {
        matches!(self, Self::Complex(_) | Self::Entity(_))
    }
}

///
/// Edm
///
/// Read-only model built from a set of schema declarations. A new metadata
/// generation needs a new `Edm`.
///

#[derive(Debug)]
pub struct Edm {
    schemas: Vec<Arc<EdmSchema>>,
    aliases: Arc<NamespaceAliases>,
    index: OnceLock<TypeIndex>,
}

impl Edm {
    /// Validate the declarations and wrap them; no element is built yet.
    pub fn new(defs: Vec<SchemaDef>) -> Result<Self, Error> {
        validate_schemas(&defs).map_err(SchemaError::Validation)?;

        let mut aliases = NamespaceAliases::new();
        for def in &defs {
            if let Some(alias) = &def.alias {
                aliases.insert(alias.clone(), def.namespace.clone());
            }
        }
        let aliases = Arc::new(aliases);

        let schemas = defs
            .into_iter()
            .map(|def| Arc::new(EdmSchema::new(def, Arc::clone(&aliases))))
            .collect();

        Ok(Self {
            schemas,
            aliases,
            index: OnceLock::new(),
        })
    }

    #[must_use]
    pub fn schemas(&self) -> &[Arc<EdmSchema>] {
        &self.schemas
    }

    /// Schema by namespace or alias.
    #[must_use]
    pub fn schema(&self, namespace_or_alias: &str) -> Option<&Arc<EdmSchema>> {
        let namespace = self.aliases.namespace_of(namespace_or_alias);

        self.schemas.iter().find(|s| s.namespace() == namespace)
    }

    #[must_use]
    pub fn aliases(&self) -> &NamespaceAliases {
        &self.aliases
    }

    /// Build every indexed element kind now instead of on first lookup.
    pub fn freeze(&self) {
        let _ = self.index();
    }

    fn index(&self) -> &TypeIndex {
        self.index.get_or_init(|| TypeIndex::build(&self.schemas))
    }

    //
    // lookups
    //

    #[must_use]
    pub fn entity_type(&self, fqn: &FullQualifiedName) -> Option<Arc<EntityType>> {
        self.index()
            .entity_types
            .get(&self.aliases.canonical(fqn))
            .cloned()
    }

    #[must_use]
    pub fn complex_type(&self, fqn: &FullQualifiedName) -> Option<Arc<ComplexType>> {
        self.index()
            .complex_types
            .get(&self.aliases.canonical(fqn))
            .cloned()
    }

    #[must_use]
    pub fn enum_type(&self, fqn: &FullQualifiedName) -> Option<Arc<EnumType>> {
        self.index()
            .enum_types
            .get(&self.aliases.canonical(fqn))
            .cloned()
    }

    #[must_use]
    pub fn type_definition(&self, fqn: &FullQualifiedName) -> Option<Arc<TypeDefinition>> {
        self.index()
            .type_definitions
            .get(&self.aliases.canonical(fqn))
            .cloned()
    }

    #[must_use]
    pub fn term(&self, fqn: &FullQualifiedName) -> Option<Arc<Term>> {
        self.index().terms.get(&self.aliases.canonical(fqn)).cloned()
    }

    #[must_use]
    pub fn entity_container_named(&self, fqn: &FullQualifiedName) -> Option<Arc<EntityContainer>> {
        self.index()
            .containers
            .get(&self.aliases.canonical(fqn))
            .cloned()
    }

    /// The model's default container. At most one schema may name one.
    pub fn entity_container(&self) -> Result<Option<Arc<EntityContainer>>, Error> {
        let mut found: Option<Arc<EntityContainer>> = None;

        for schema in &self.schemas {
            let Some(container) = schema.entity_container()? else {
                continue;
            };
            if let Some(first) = &found {
                return Err(SchemaError::MultipleDefaultContainers {
                    first: first.fqn.clone(),
                    second: container.fqn.clone(),
                }
                .into());
            }
            found = Some(container);
        }

        Ok(found)
    }

    /// Every action signature sharing `fqn`; empty when the name is unknown.
    #[must_use]
    pub fn actions(&self, fqn: &FullQualifiedName) -> &[Arc<Operation>] {
        self.index()
            .actions
            .get(&self.aliases.canonical(fqn))
            .map_or(&[], Vec::as_slice)
    }

    /// Every function signature sharing `fqn`; empty when the name is unknown.
    #[must_use]
    pub fn functions(&self, fqn: &FullQualifiedName) -> &[Arc<Operation>] {
        self.index()
            .functions
            .get(&self.aliases.canonical(fqn))
            .map_or(&[], Vec::as_slice)
    }

    //
    // type graph
    //

    /// Classify a type reference. Primitives resolve without an entry.
    pub fn resolve_type(&self, fqn: &FullQualifiedName) -> Result<TypeKind, Error> {
        let fqn = self.aliases.canonical(fqn);

        if let Some(primitive) = EdmPrimitive::from_fqn(&fqn) {
            return Ok(TypeKind::Primitive(primitive));
        }
        if let Some(ty) = self.entity_type(&fqn) {
            return Ok(TypeKind::Entity(ty));
        }
        if let Some(ty) = self.complex_type(&fqn) {
            return Ok(TypeKind::Complex(ty));
        }
        if let Some(ty) = self.enum_type(&fqn) {
            return Ok(TypeKind::Enum(ty));
        }
        if let Some(ty) = self.type_definition(&fqn) {
            return Ok(TypeKind::Definition(ty));
        }

        Err(SchemaError::UnknownType(fqn).into())
    }

    pub fn base_entity_type(&self, ty: &EntityType) -> Result<Option<Arc<EntityType>>, Error> {
        base_of(ty, |fqn| self.entity_type(fqn))
    }

    pub fn base_complex_type(&self, ty: &ComplexType) -> Result<Option<Arc<ComplexType>>, Error> {
        base_of(ty, |fqn| self.complex_type(fqn))
    }

    /// `ty` followed by each of its base types, nearest first.
    pub fn entity_ancestry(&self, ty: &Arc<EntityType>) -> Result<Vec<Arc<EntityType>>, Error> {
        ancestry(Arc::clone(ty), |fqn| self.entity_type(fqn)).map_err(Error::from)
    }

    /// `ty` followed by each of its base types, nearest first.
    pub fn complex_ancestry(&self, ty: &Arc<ComplexType>) -> Result<Vec<Arc<ComplexType>>, Error> {
        ancestry(Arc::clone(ty), |fqn| self.complex_type(fqn)).map_err(Error::from)
    }

    /// Effective key of an entity type: the nearest declared key on its
    /// inheritance chain.
    pub fn key_of(&self, ty: &Arc<EntityType>) -> Result<Vec<String>, Error> {
        let chain = self.entity_ancestry(ty)?;

        Ok(chain
            .iter()
            .find(|t| !t.key.is_empty())
            .map(|t| t.key.clone())
            .unwrap_or_default())
    }

    /// Whether a value of type `sub` may stand where `sup` is expected:
    /// the same type, or an entity/complex type deriving from it.
    pub fn is_assignable(
        &self,
        sub: &FullQualifiedName,
        sup: &FullQualifiedName,
    ) -> Result<bool, Error> {
        let sub = self.aliases.canonical(sub);
        let sup = self.aliases.canonical(sup);

        if sub == sup {
            return Ok(true);
        }
        if let Some(ty) = self.entity_type(&sub) {
            let chain = self.entity_ancestry(&ty)?;
            return Ok(chain.iter().any(|t| t.fqn == sup));
        }
        if let Some(ty) = self.complex_type(&sub) {
            let chain = self.complex_ancestry(&ty)?;
            return Ok(chain.iter().any(|t| t.fqn == sup));
        }

        Ok(false)
    }
}

// Resolve one base reference of the same structural kind.
fn base_of<T: StructuredType>(
    ty: &T,
    lookup: impl Fn(&FullQualifiedName) -> Option<Arc<T>>,
) -> Result<Option<Arc<T>>, Error> {
    let Some(base) = ty.base_type_name() else {
        return Ok(None);
    };

    match lookup(base) {
        Some(found) => Ok(Some(found)),
        None => Err(SchemaError::UnknownBaseType {
            ty: ty.fqn().clone(),
            base: base.clone(),
        }
        .into()),
    }
}

// Walk base references until the chain ends, failing on a cycle or an
// unresolved base.
fn ancestry<T: StructuredType>(
    start: Arc<T>,
    lookup: impl Fn(&FullQualifiedName) -> Option<Arc<T>>,
) -> Result<Vec<Arc<T>>, SchemaError> {
    let mut seen = BTreeSet::new();
    let mut chain = Vec::new();
    let mut current = start;

    loop {
        let fqn = current.fqn().clone();
        if !seen.insert(fqn.clone()) {
            return Err(SchemaError::InheritanceCycle(fqn));
        }

        let base = current.base_type_name().cloned();
        chain.push(current);

        let Some(base) = base else {
            return Ok(chain);
        };
        current = lookup(&base).ok_or(SchemaError::UnknownBaseType { ty: fqn, base })?;
    }
}
