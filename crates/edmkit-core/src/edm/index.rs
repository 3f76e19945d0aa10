use crate::{
    edm::EdmSchema,
    fqn::FullQualifiedName,
    model::{
        ComplexType, EntityContainer, EntityType, EnumType, NamedElement, Operation, Term,
        TypeDefinition,
    },
};
use std::{collections::HashMap, sync::Arc};
use tracing::debug;

///
/// TypeIndex
///
/// Model-wide FQN maps, frozen once from the schemas' memoized element
/// sets. Entries are the very `Arc`s the schemas hold.
///

#[derive(Debug, Default)]
pub(crate) struct TypeIndex {
    pub entity_types: HashMap<FullQualifiedName, Arc<EntityType>>,
    pub complex_types: HashMap<FullQualifiedName, Arc<ComplexType>>,
    pub enum_types: HashMap<FullQualifiedName, Arc<EnumType>>,
    pub type_definitions: HashMap<FullQualifiedName, Arc<TypeDefinition>>,
    pub terms: HashMap<FullQualifiedName, Arc<Term>>,
    pub containers: HashMap<FullQualifiedName, Arc<EntityContainer>>,

    // overload sets: one name, many signatures
    pub actions: HashMap<FullQualifiedName, Vec<Arc<Operation>>>,
    pub functions: HashMap<FullQualifiedName, Vec<Arc<Operation>>>,
}

impl TypeIndex {
    pub fn build(schemas: &[Arc<EdmSchema>]) -> Self {
        let mut index = Self::default();

        for schema in schemas {
            insert_all(&mut index.entity_types, schema.entity_types());
            insert_all(&mut index.complex_types, schema.complex_types());
            insert_all(&mut index.enum_types, schema.enum_types());
            insert_all(&mut index.type_definitions, schema.type_definitions());
            insert_all(&mut index.terms, schema.terms());
            insert_all(&mut index.containers, schema.entity_containers());

            group_all(&mut index.actions, schema.actions());
            group_all(&mut index.functions, schema.functions());
        }

        debug!(
            schemas = schemas.len(),
            entity_types = index.entity_types.len(),
            complex_types = index.complex_types.len(),
            actions = index.actions.len(),
            functions = index.functions.len(),
            "froze type index"
        );

        index
    }
}

fn insert_all<T: NamedElement>(
    map: &mut HashMap<FullQualifiedName, Arc<T>>,
    elements: &[Arc<T>],
) {
    for element in elements {
        map.insert(element.fqn().clone(), Arc::clone(element));
    }
}

fn group_all(map: &mut HashMap<FullQualifiedName, Vec<Arc<Operation>>>, ops: &[Arc<Operation>]) {
    for op in ops {
        map.entry(op.fqn.clone()).or_default().push(Arc::clone(op));
    }
}
