use crate::{
    fqn::{FullQualifiedName, NamespaceAliases},
    model::element::NamedElement,
};
use edmkit_schema::node::EntityContainerDef;

///
/// EntityContainer
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EntityContainer {
    pub fqn: FullQualifiedName,
    pub extends: Option<FullQualifiedName>,
    pub entity_sets: Vec<EntitySet>,
    pub singletons: Vec<Singleton>,
    pub action_imports: Vec<ActionImport>,
    pub function_imports: Vec<FunctionImport>,
}

impl EntityContainer {
    pub(crate) fn from_def(
        namespace: &str,
        def: &EntityContainerDef,
        aliases: &NamespaceAliases,
    ) -> Self {
        Self {
            fqn: FullQualifiedName::new(namespace, def.name.clone()),
            extends: def.extends.as_deref().map(|name| aliases.qualify(name)),
            entity_sets: def
                .entity_sets
                .iter()
                .map(|set| EntitySet {
                    name: set.name.clone(),
                    entity_type: aliases.qualify(&set.entity_type),
                    include_in_service_document: set.include_in_service_document,
                })
                .collect(),
            singletons: def
                .singletons
                .iter()
                .map(|singleton| Singleton {
                    name: singleton.name.clone(),
                    type_name: aliases.qualify(&singleton.type_name),
                })
                .collect(),
            action_imports: def
                .action_imports
                .iter()
                .map(|import| ActionImport {
                    name: import.name.clone(),
                    action: aliases.qualify(&import.action),
                    entity_set: import.entity_set.clone(),
                })
                .collect(),
            function_imports: def
                .function_imports
                .iter()
                .map(|import| FunctionImport {
                    name: import.name.clone(),
                    function: aliases.qualify(&import.function),
                    entity_set: import.entity_set.clone(),
                    include_in_service_document: import.include_in_service_document,
                })
                .collect(),
        }
    }

    #[must_use]
    pub fn entity_set(&self, name: &str) -> Option<&EntitySet> {
        self.entity_sets.iter().find(|s| s.name == name)
    }

    #[must_use]
    pub fn singleton(&self, name: &str) -> Option<&Singleton> {
        self.singletons.iter().find(|s| s.name == name)
    }

    #[must_use]
    pub fn action_import(&self, name: &str) -> Option<&ActionImport> {
        self.action_imports.iter().find(|i| i.name == name)
    }

    #[must_use]
    pub fn function_import(&self, name: &str) -> Option<&FunctionImport> {
        self.function_imports.iter().find(|i| i.name == name)
    }
}

impl NamedElement for EntityContainer {
    fn fqn(&self) -> &FullQualifiedName {
        &self.fqn
    }
}

///
/// EntitySet
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EntitySet {
    pub name: String,
    pub entity_type: FullQualifiedName,
    pub include_in_service_document: bool,
}

///
/// Singleton
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Singleton {
    pub name: String,
    pub type_name: FullQualifiedName,
}

///
/// ActionImport
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ActionImport {
    pub name: String,
    pub action: FullQualifiedName,
    pub entity_set: Option<String>,
}

///
/// FunctionImport
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FunctionImport {
    pub name: String,
    pub function: FullQualifiedName,
    pub entity_set: Option<String>,
    pub include_in_service_document: bool,
}
