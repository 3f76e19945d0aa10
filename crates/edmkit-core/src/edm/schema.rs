use crate::{
    edm::SchemaError,
    fqn::{FullQualifiedName, NamespaceAliases},
    model::{
        Annotation, AnnotationGroup, ComplexType, EntityContainer, EntityType, EnumType,
        Operation, Term, TypeDefinition,
    },
};
use edmkit_schema::node::SchemaDef;
use std::{
    collections::BTreeMap,
    sync::{Arc, OnceLock},
};
use tracing::debug;

///
/// EdmSchema
///
/// Typed view over one namespace. Every element kind is built on first
/// access and kept for the lifetime of the schema; later calls hand back
/// the same slice, and concurrent first callers all observe one build.
///

#[derive(Debug)]
pub struct EdmSchema {
    def: SchemaDef,
    aliases: Arc<NamespaceAliases>,

    entity_types: OnceLock<Vec<Arc<EntityType>>>,
    complex_types: OnceLock<Vec<Arc<ComplexType>>>,
    enum_types: OnceLock<Vec<Arc<EnumType>>>,
    type_definitions: OnceLock<Vec<Arc<TypeDefinition>>>,
    actions: OnceLock<Vec<Arc<Operation>>>,
    functions: OnceLock<Vec<Arc<Operation>>>,
    terms: OnceLock<Vec<Arc<Term>>>,
    annotation_groups: OnceLock<Vec<Arc<AnnotationGroup>>>,
    annotations: OnceLock<Vec<Arc<Annotation>>>,
    containers: OnceLock<ContainerIndex>,
}

// Declared containers plus their FQN index, built together.
#[derive(Debug)]
struct ContainerIndex {
    ordered: Vec<Arc<EntityContainer>>,
    by_fqn: BTreeMap<FullQualifiedName, Arc<EntityContainer>>,
}

impl EdmSchema {
    #[must_use]
    pub(crate) fn new(def: SchemaDef, aliases: Arc<NamespaceAliases>) -> Self {
        Self {
            def,
            aliases,
            entity_types: OnceLock::new(),
            complex_types: OnceLock::new(),
            enum_types: OnceLock::new(),
            type_definitions: OnceLock::new(),
            actions: OnceLock::new(),
            functions: OnceLock::new(),
            terms: OnceLock::new(),
            annotation_groups: OnceLock::new(),
            annotations: OnceLock::new(),
            containers: OnceLock::new(),
        }
    }

    #[must_use]
    pub fn namespace(&self) -> &str {
        &self.def.namespace
    }

    #[must_use]
    pub fn alias(&self) -> Option<&str> {
        self.def.alias.as_deref()
    }

    /// Declarations this schema was built from.
    #[must_use]
    pub const fn def(&self) -> &SchemaDef {
        &self.def
    }

    //
    // element builders
    //

    #[must_use]
    pub fn entity_types(&self) -> &[Arc<EntityType>] {
        self.build_once(&self.entity_types, "entity_type", || {
            self.def
                .entity_types()
                .iter()
                .map(|def| Arc::new(EntityType::from_def(self.namespace(), def, &self.aliases)))
                .collect()
        })
    }

    #[must_use]
    pub fn complex_types(&self) -> &[Arc<ComplexType>] {
        self.build_once(&self.complex_types, "complex_type", || {
            self.def
                .complex_types()
                .iter()
                .map(|def| Arc::new(ComplexType::from_def(self.namespace(), def, &self.aliases)))
                .collect()
        })
    }

    #[must_use]
    pub fn enum_types(&self) -> &[Arc<EnumType>] {
        self.build_once(&self.enum_types, "enum_type", || {
            self.def
                .enum_types()
                .iter()
                .map(|def| Arc::new(EnumType::from_def(self.namespace(), def, &self.aliases)))
                .collect()
        })
    }

    #[must_use]
    pub fn type_definitions(&self) -> &[Arc<TypeDefinition>] {
        self.build_once(&self.type_definitions, "type_definition", || {
            self.def
                .type_definitions()
                .iter()
                .map(|def| {
                    Arc::new(TypeDefinition::from_def(
                        self.namespace(),
                        def,
                        &self.aliases,
                    ))
                })
                .collect()
        })
    }

    /// Every action signature, overloads included, in declaration order.
    #[must_use]
    pub fn actions(&self) -> &[Arc<Operation>] {
        self.build_once(&self.actions, "action", || {
            self.def
                .actions()
                .iter()
                .map(|def| Arc::new(Operation::from_action(self.namespace(), def, &self.aliases)))
                .collect()
        })
    }

    /// Every function signature, overloads included, in declaration order.
    #[must_use]
    pub fn functions(&self) -> &[Arc<Operation>] {
        self.build_once(&self.functions, "function", || {
            self.def
                .functions()
                .iter()
                .map(|def| {
                    Arc::new(Operation::from_function(
                        self.namespace(),
                        def,
                        &self.aliases,
                    ))
                })
                .collect()
        })
    }

    #[must_use]
    pub fn terms(&self) -> &[Arc<Term>] {
        self.build_once(&self.terms, "term", || {
            self.def
                .terms()
                .iter()
                .map(|def| Arc::new(Term::from_def(self.namespace(), def, &self.aliases)))
                .collect()
        })
    }

    #[must_use]
    pub fn annotation_groups(&self) -> &[Arc<AnnotationGroup>] {
        self.build_once(&self.annotation_groups, "annotation_group", || {
            self.def
                .annotation_groups()
                .iter()
                .map(|def| Arc::new(AnnotationGroup::from_def(def, &self.aliases)))
                .collect()
        })
    }

    /// Annotations attached to the schema itself.
    #[must_use]
    pub fn annotations(&self) -> &[Arc<Annotation>] {
        self.build_once(&self.annotations, "annotation", || {
            self.def
                .annotations()
                .iter()
                .map(|def| Arc::new(Annotation::from_def(def, &self.aliases)))
                .collect()
        })
    }

    /// Schema annotation for `term`. When the term is applied more than
    /// once, the last application is returned.
    #[must_use]
    pub fn annotation(&self, term: &FullQualifiedName) -> Option<Arc<Annotation>> {
        let term = self.aliases.canonical(term);

        self.annotations()
            .iter()
            .rev()
            .find(|a| a.term == term)
            .cloned()
    }

    //
    // containers
    //

    #[must_use]
    pub fn entity_containers(&self) -> &[Arc<EntityContainer>] {
        &self.container_index().ordered
    }

    #[must_use]
    pub fn entity_container_named(&self, fqn: &FullQualifiedName) -> Option<Arc<EntityContainer>> {
        let fqn = self.aliases.canonical(fqn);

        self.container_index().by_fqn.get(&fqn).cloned()
    }

    /// The container this schema marks as default, if any.
    pub fn entity_container(&self) -> Result<Option<Arc<EntityContainer>>, SchemaError> {
        let Some(name) = self.def.default_container.as_deref() else {
            return Ok(None);
        };
        let fqn = FullQualifiedName::new(self.namespace(), name);

        self.container_index()
            .by_fqn
            .get(&fqn)
            .cloned()
            .map(Some)
            .ok_or(SchemaError::MissingDefaultContainer(fqn))
    }

    fn container_index(&self) -> &ContainerIndex {
        self.containers.get_or_init(|| {
            let ordered: Vec<_> = self
                .def
                .entity_containers()
                .iter()
                .map(|def| {
                    Arc::new(EntityContainer::from_def(
                        self.namespace(),
                        def,
                        &self.aliases,
                    ))
                })
                .collect();
            let by_fqn = ordered
                .iter()
                .map(|c| (c.fqn.clone(), Arc::clone(c)))
                .collect();

            debug!(
                namespace = self.namespace(),
                kind = "entity_container",
                count = ordered.len(),
                "materialized schema elements"
            );

            ContainerIndex { ordered, by_fqn }
        })
    }

    // Run `build` at most once per cell.
    fn build_once<'a, T>(
        &self,
        cell: &'a OnceLock<Vec<Arc<T>>>,
        kind: &'static str,
        build: impl FnOnce() -> Vec<Arc<T>>,
    ) -> &'a [Arc<T>] {
        cell.get_or_init(|| {
            let built = build();
            debug!(
                namespace = self.namespace(),
                kind,
                count = built.len(),
                "materialized schema elements"
            );

            built
        })
    }
}
