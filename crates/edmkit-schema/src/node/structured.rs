use crate::{
    error::ErrorTree,
    node::{ElementKind, NamedNode, NavigationPropertyDef, PropertyDef, ValidateNode},
    validate::naming::{validate_identifier, validate_qualified_name},
};
use serde::{Deserialize, Serialize};
use std::{collections::BTreeSet, ops::Not};

///
/// EntityTypeDef
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct EntityTypeDef {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_type: Option<String>,

    #[serde(default, skip_serializing_if = "Not::not")]
    pub is_abstract: bool,

    #[serde(default, skip_serializing_if = "Not::not")]
    pub open_type: bool,

    #[serde(default, skip_serializing_if = "Not::not")]
    pub has_stream: bool,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub key: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub properties: Vec<PropertyDef>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub navigation_properties: Vec<NavigationPropertyDef>,
}

impl EntityTypeDef {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_base(mut self, base_type: impl Into<String>) -> Self {
        self.base_type = Some(base_type.into());
        self
    }

    #[must_use]
    pub fn with_key(mut self, property: impl Into<String>) -> Self {
        self.key.push(property.into());
        self
    }

    #[must_use]
    pub fn with_property(mut self, property: PropertyDef) -> Self {
        self.properties.push(property);
        self
    }

    #[must_use]
    pub fn with_navigation(mut self, navigation: NavigationPropertyDef) -> Self {
        self.navigation_properties.push(navigation);
        self
    }

    #[must_use]
    pub const fn abstract_type(mut self) -> Self {
        self.is_abstract = true;
        self
    }
}

impl NamedNode for EntityTypeDef {
    const KIND: ElementKind = ElementKind::EntityType;

    fn name(&self) -> &str {
        &self.name
    }
}

impl ValidateNode for EntityTypeDef {
    fn validate(&self) -> Result<(), ErrorTree> {
        let mut errs = validate_structure(
            &self.name,
            self.base_type.as_deref(),
            &self.properties,
            &self.navigation_properties,
        );

        // key properties must be declared locally unless a base type may supply them
        if self.base_type.is_none() {
            for key in &self.key {
                if !self.properties.iter().any(|p| &p.name == key) {
                    errs.add(format!("key property '{key}' is not declared"));
                }
            }
        }

        errs.result()
    }
}

///
/// ComplexTypeDef
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct ComplexTypeDef {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_type: Option<String>,

    #[serde(default, skip_serializing_if = "Not::not")]
    pub is_abstract: bool,

    #[serde(default, skip_serializing_if = "Not::not")]
    pub open_type: bool,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub properties: Vec<PropertyDef>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub navigation_properties: Vec<NavigationPropertyDef>,
}

impl ComplexTypeDef {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_base(mut self, base_type: impl Into<String>) -> Self {
        self.base_type = Some(base_type.into());
        self
    }

    #[must_use]
    pub fn with_property(mut self, property: PropertyDef) -> Self {
        self.properties.push(property);
        self
    }
}

impl NamedNode for ComplexTypeDef {
    const KIND: ElementKind = ElementKind::ComplexType;

    fn name(&self) -> &str {
        &self.name
    }
}

impl ValidateNode for ComplexTypeDef {
    fn validate(&self) -> Result<(), ErrorTree> {
        validate_structure(
            &self.name,
            self.base_type.as_deref(),
            &self.properties,
            &self.navigation_properties,
        )
        .result()
    }
}

// Checks shared by entity and complex types: own name, base reference shape,
// and member names unique across structural and navigation properties.
fn validate_structure(
    name: &str,
    base_type: Option<&str>,
    properties: &[PropertyDef],
    navigation_properties: &[NavigationPropertyDef],
) -> ErrorTree {
    let mut errs = ErrorTree::new();

    if let Err(e) = validate_identifier(name) {
        errs.add(e);
    }
    if let Some(base) = base_type
        && let Err(e) = validate_qualified_name(base)
    {
        errs.add(format!("base type: {e}"));
    }

    let mut seen = BTreeSet::new();
    for property in properties {
        if let Err(e) = property.validate() {
            errs.add_child(property.name.clone(), e);
        }
        if !seen.insert(property.name.as_str()) {
            errs.add(format!("duplicate member '{}'", property.name));
        }
    }
    for navigation in navigation_properties {
        if let Err(e) = navigation.validate() {
            errs.add_child(navigation.name.clone(), e);
        }
        if !seen.insert(navigation.name.as_str()) {
            errs.add(format!("duplicate member '{}'", navigation.name));
        }
    }

    errs
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entity_key_must_be_declared() {
        let def = EntityTypeDef::new("Person")
            .with_key("Id")
            .with_property(PropertyDef::new("Name", "Edm.String"));

        let err = def.validate().expect_err("undeclared key should fail");
        assert!(err.to_string().contains("key property 'Id'"));
    }

    #[test]
    fn derived_entity_may_inherit_key() {
        let def = EntityTypeDef::new("Employee")
            .with_base("Demo.Person")
            .with_key("Id");

        assert!(def.validate().is_ok());
    }

    #[test]
    fn duplicate_members_are_rejected() {
        let def = ComplexTypeDef::new("Address")
            .with_property(PropertyDef::new("Street", "Edm.String"))
            .with_property(PropertyDef::new("Street", "Edm.String"));

        let err = def.validate().expect_err("duplicate member should fail");
        assert_eq!(err.len(), 1);
    }

    #[test]
    fn unqualified_property_type_is_reported_under_property_route() {
        let def = ComplexTypeDef::new("Address").with_property(PropertyDef::new("City", "String"));

        let err = def.validate().expect_err("unqualified type should fail");
        assert_eq!(err.flatten()[0].0, "City");
    }
}
