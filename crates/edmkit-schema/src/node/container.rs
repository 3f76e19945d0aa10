use crate::{
    error::ErrorTree,
    node::{ElementKind, NamedNode, ValidateNode},
    validate::naming::{validate_identifier, validate_qualified_name},
};
use serde::{Deserialize, Serialize};
use std::{collections::BTreeSet, ops::Not};

///
/// EntityContainerDef
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct EntityContainerDef {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extends: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub entity_sets: Vec<EntitySetDef>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub singletons: Vec<SingletonDef>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub action_imports: Vec<ActionImportDef>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub function_imports: Vec<FunctionImportDef>,
}

impl EntityContainerDef {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_entity_set(mut self, entity_set: EntitySetDef) -> Self {
        self.entity_sets.push(entity_set);
        self
    }

    #[must_use]
    pub fn with_singleton(mut self, singleton: SingletonDef) -> Self {
        self.singletons.push(singleton);
        self
    }

    #[must_use]
    pub fn with_function_import(mut self, import: FunctionImportDef) -> Self {
        self.function_imports.push(import);
        self
    }

    #[must_use]
    pub fn with_action_import(mut self, import: ActionImportDef) -> Self {
        self.action_imports.push(import);
        self
    }
}

impl NamedNode for EntityContainerDef {
    const KIND: ElementKind = ElementKind::EntityContainer;

    fn name(&self) -> &str {
        &self.name
    }
}

impl ValidateNode for EntityContainerDef {
    fn validate(&self) -> Result<(), ErrorTree> {
        let mut errs = ErrorTree::new();

        if let Err(e) = validate_identifier(&self.name) {
            errs.add(e);
        }
        if let Some(extends) = &self.extends
            && let Err(e) = validate_qualified_name(extends)
        {
            errs.add(format!("extends: {e}"));
        }

        // all children share one name scope
        let members = self
            .entity_sets
            .iter()
            .map(|s| (s.name.as_str(), s.entity_type.as_str()))
            .chain(self.singletons.iter().map(|s| (s.name.as_str(), s.type_name.as_str())))
            .chain(self.action_imports.iter().map(|i| (i.name.as_str(), i.action.as_str())))
            .chain(
                self.function_imports
                    .iter()
                    .map(|i| (i.name.as_str(), i.function.as_str())),
            );

        let mut seen = BTreeSet::new();
        for (name, reference) in members {
            let mut member_errs = ErrorTree::new();
            if let Err(e) = validate_identifier(name) {
                member_errs.add(e);
            }
            if let Err(e) = validate_qualified_name(reference) {
                member_errs.add(e);
            }
            errs.add_child(name, member_errs);

            if !seen.insert(name) {
                errs.add(format!("duplicate container member '{name}'"));
            }
        }

        errs.result()
    }
}

///
/// EntitySetDef
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct EntitySetDef {
    pub name: String,
    pub entity_type: String,

    #[serde(default = "default_true", skip_serializing_if = "is_true")]
    pub include_in_service_document: bool,
}

impl EntitySetDef {
    #[must_use]
    pub fn new(name: impl Into<String>, entity_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entity_type: entity_type.into(),
            include_in_service_document: true,
        }
    }
}

///
/// SingletonDef
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct SingletonDef {
    pub name: String,

    #[serde(rename = "type")]
    pub type_name: String,
}

impl SingletonDef {
    #[must_use]
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
        }
    }
}

///
/// ActionImportDef
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct ActionImportDef {
    pub name: String,
    pub action: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity_set: Option<String>,
}

impl ActionImportDef {
    #[must_use]
    pub fn new(name: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            action: action.into(),
            entity_set: None,
        }
    }
}

///
/// FunctionImportDef
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct FunctionImportDef {
    pub name: String,
    pub function: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity_set: Option<String>,

    #[serde(default, skip_serializing_if = "Not::not")]
    pub include_in_service_document: bool,
}

impl FunctionImportDef {
    #[must_use]
    pub fn new(name: impl Into<String>, function: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            function: function.into(),
            entity_set: None,
            include_in_service_document: false,
        }
    }
}

const fn default_true() -> bool {
    true
}

#[allow(clippy::trivially_copy_pass_by_ref)]
const fn is_true(value: &bool) -> bool {
    *value
}
