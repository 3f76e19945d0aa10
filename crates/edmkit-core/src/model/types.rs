use crate::{
    fqn::{FullQualifiedName, NamespaceAliases},
    model::{
        element::{NamedElement, StructuralShape, StructuredType},
        primitive::EdmPrimitive,
    },
};
use edmkit_schema::node::{ComplexTypeDef, EntityTypeDef, EnumTypeDef, TypeDefinitionDef};

///
/// EntityType
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EntityType {
    pub fqn: FullQualifiedName,
    pub shape: StructuralShape,

    /// Declared key property names; empty when the key comes from a base type.
    pub key: Vec<String>,
    pub has_stream: bool,
}

impl EntityType {
    pub(crate) fn from_def(
        namespace: &str,
        def: &EntityTypeDef,
        aliases: &NamespaceAliases,
    ) -> Self {
        Self {
            fqn: FullQualifiedName::new(namespace, def.name.clone()),
            shape: StructuralShape::from_parts(
                def.base_type.as_deref(),
                def.is_abstract,
                def.open_type,
                &def.properties,
                &def.navigation_properties,
                aliases,
            ),
            key: def.key.clone(),
            has_stream: def.has_stream,
        }
    }
}

impl NamedElement for EntityType {
    fn fqn(&self) -> &FullQualifiedName {
        &self.fqn
    }
}

impl StructuredType for EntityType {
    fn shape(&self) -> &StructuralShape {
        &self.shape
    }
}

///
/// ComplexType
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ComplexType {
    pub fqn: FullQualifiedName,
    pub shape: StructuralShape,
}

impl ComplexType {
    pub(crate) fn from_def(
        namespace: &str,
        def: &ComplexTypeDef,
        aliases: &NamespaceAliases,
    ) -> Self {
        Self {
            fqn: FullQualifiedName::new(namespace, def.name.clone()),
            shape: StructuralShape::from_parts(
                def.base_type.as_deref(),
                def.is_abstract,
                def.open_type,
                &def.properties,
                &def.navigation_properties,
                aliases,
            ),
        }
    }
}

impl NamedElement for ComplexType {
    fn fqn(&self) -> &FullQualifiedName {
        &self.fqn
    }
}

impl StructuredType for ComplexType {
    fn shape(&self) -> &StructuralShape {
        &self.shape
    }
}

///
/// EnumType
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EnumType {
    pub fqn: FullQualifiedName,
    pub underlying_type: FullQualifiedName,
    pub is_flags: bool,
    pub members: Vec<EnumMember>,
}

impl EnumType {
    pub(crate) fn from_def(namespace: &str, def: &EnumTypeDef, aliases: &NamespaceAliases) -> Self {
        // implicit values count up from zero, continuing after explicit ones
        let mut next = 0_i64;
        let members = def
            .members
            .iter()
            .map(|member| {
                let value = member.value.unwrap_or(next);
                next = value.saturating_add(1);

                EnumMember {
                    name: member.name.clone(),
                    value,
                }
            })
            .collect();

        Self {
            fqn: FullQualifiedName::new(namespace, def.name.clone()),
            underlying_type: def
                .underlying_type
                .as_deref()
                .map_or_else(|| EdmPrimitive::Int32.fqn(), |name| aliases.qualify(name)),
            is_flags: def.is_flags,
            members,
        }
    }

    #[must_use]
    pub fn member(&self, name: &str) -> Option<&EnumMember> {
        self.members.iter().find(|m| m.name == name)
    }

    #[must_use]
    pub fn member_by_value(&self, value: i64) -> Option<&EnumMember> {
        self.members.iter().find(|m| m.value == value)
    }
}

impl NamedElement for EnumType {
    fn fqn(&self) -> &FullQualifiedName {
        &self.fqn
    }
}

///
/// EnumMember
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EnumMember {
    pub name: String,
    pub value: i64,
}

///
/// TypeDefinition
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TypeDefinition {
    pub fqn: FullQualifiedName,
    pub underlying_type: FullQualifiedName,
    pub max_length: Option<u32>,
    pub precision: Option<u32>,
    pub scale: Option<u32>,
}

impl TypeDefinition {
    pub(crate) fn from_def(
        namespace: &str,
        def: &TypeDefinitionDef,
        aliases: &NamespaceAliases,
    ) -> Self {
        Self {
            fqn: FullQualifiedName::new(namespace, def.name.clone()),
            underlying_type: aliases.qualify(&def.underlying_type),
            max_length: def.max_length,
            precision: def.precision,
            scale: def.scale,
        }
    }

    /// Underlying primitive, if the reference names one.
    #[must_use]
    pub fn primitive(&self) -> Option<EdmPrimitive> {
        EdmPrimitive::from_fqn(&self.underlying_type)
    }
}

impl NamedElement for TypeDefinition {
    fn fqn(&self) -> &FullQualifiedName {
        &self.fqn
    }
}

///
/// TESTS
///
