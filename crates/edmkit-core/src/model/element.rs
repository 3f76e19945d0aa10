use crate::fqn::{FullQualifiedName, NamespaceAliases};
use edmkit_schema::node::{NavigationPropertyDef, PropertyDef};

///
/// NamedElement
///

pub trait NamedElement {
    fn fqn(&self) -> &FullQualifiedName;

    fn name(&self) -> &str {
        self.fqn().name()
    }
}

///
/// StructuredType
///
/// Capability shared by entity and complex types: declared members plus an
/// optional, still unresolved base type reference.
///

pub trait StructuredType: NamedElement {
    fn shape(&self) -> &StructuralShape;

    fn base_type_name(&self) -> Option<&FullQualifiedName> {
        self.shape().base_type.as_ref()
    }

    /// Declared (not inherited) structural property by name.
    fn property(&self, name: &str) -> Option<&Property> {
        self.shape().properties.iter().find(|p| p.name == name)
    }

    /// Declared (not inherited) navigation property by name.
    fn navigation_property(&self, name: &str) -> Option<&NavigationProperty> {
        self.shape()
            .navigation_properties
            .iter()
            .find(|p| p.name == name)
    }
}

///
/// StructuralShape
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StructuralShape {
    pub base_type: Option<FullQualifiedName>,
    pub is_abstract: bool,
    pub open_type: bool,
    pub properties: Vec<Property>,
    pub navigation_properties: Vec<NavigationProperty>,
}

impl StructuralShape {
    pub(crate) fn from_parts(
        base_type: Option<&str>,
        is_abstract: bool,
        open_type: bool,
        properties: &[PropertyDef],
        navigation_properties: &[NavigationPropertyDef],
        aliases: &NamespaceAliases,
    ) -> Self {
        Self {
            base_type: base_type.map(|base| aliases.qualify(base)),
            is_abstract,
            open_type,
            properties: properties
                .iter()
                .map(|def| Property::from_def(def, aliases))
                .collect(),
            navigation_properties: navigation_properties
                .iter()
                .map(|def| NavigationProperty::from_def(def, aliases))
                .collect(),
        }
    }
}

///
/// Property
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Property {
    pub name: String,
    pub type_name: FullQualifiedName,
    pub collection: bool,
    pub nullable: bool,
    pub default_value: Option<String>,
    pub max_length: Option<u32>,
}

impl Property {
    pub(crate) fn from_def(def: &PropertyDef, aliases: &NamespaceAliases) -> Self {
        Self {
            name: def.name.clone(),
            type_name: aliases.qualify(&def.type_name),
            collection: def.collection,
            nullable: def.nullable,
            default_value: def.default_value.clone(),
            max_length: def.max_length,
        }
    }
}

///
/// NavigationProperty
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct NavigationProperty {
    pub name: String,
    pub type_name: FullQualifiedName,
    pub collection: bool,
    pub nullable: bool,
    pub partner: Option<String>,
    pub contains_target: bool,
}

impl NavigationProperty {
    pub(crate) fn from_def(def: &NavigationPropertyDef, aliases: &NamespaceAliases) -> Self {
        Self {
            name: def.name.clone(),
            type_name: aliases.qualify(&def.type_name),
            collection: def.collection,
            nullable: def.nullable,
            partner: def.partner.clone(),
            contains_target: def.contains_target,
        }
    }
}
