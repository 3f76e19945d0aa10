use crate::{fqn::FullQualifiedName, model::EdmPrimitive};

///
/// PrimitiveValue
///
/// A primitive literal in its canonical text form. Encoding is left to the
/// payload codec.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PrimitiveValue {
    pub kind: EdmPrimitive,
    pub literal: String,
}

impl PrimitiveValue {
    #[must_use]
    pub fn new(kind: EdmPrimitive, literal: impl Into<String>) -> Self {
        Self {
            kind,
            literal: literal.into(),
        }
    }

    #[must_use]
    pub fn string(value: impl Into<String>) -> Self {
        Self::new(EdmPrimitive::String, value)
    }
}

///
/// PropertyValue
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum PropertyValue {
    Primitive(PrimitiveValue),
    Complex(Vec<Property>),
    Collection(Vec<PropertyValue>),
    Enum {
        type_name: FullQualifiedName,
        member: String,
    },
    Null,
}

impl PropertyValue {
    #[must_use]
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::Primitive(_) => "primitive",
            Self::Complex(_) => "complex",
            Self::Collection(_) => "collection",
            Self::Enum { .. } => "enum",
            Self::Null => "null",
        }
    }

    #[must_use]
    pub const fn is_primitive(&self) -> bool {
        matches!(self, Self::Primitive(_))
    }

    #[must_use]
    pub const fn is_complex(&self) -> bool {
        matches!(self, Self::Complex(_))
    }

    #[must_use]
    pub const fn is_collection(&self) -> bool {
        matches!(self, Self::Collection(_))
    }
}

///
/// Property
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Property {
    pub name: String,
    pub value: PropertyValue,
}

impl Property {
    #[must_use]
    pub fn new(name: impl Into<String>, value: PropertyValue) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }

    #[must_use]
    pub fn primitive(name: impl Into<String>, value: PrimitiveValue) -> Self {
        Self::new(name, PropertyValue::Primitive(value))
    }
}

///
/// LinkKind
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum LinkKind {
    Entity,
    EntitySet,
}

///
/// Link
///
/// Navigation link from one entity to another entity or to a set.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Link {
    pub name: String,
    pub target: String,
    pub kind: LinkKind,
}

impl Link {
    #[must_use]
    pub fn entity(name: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            target: target.into(),
            kind: LinkKind::Entity,
        }
    }

    #[must_use]
    pub fn entity_set(name: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            target: target.into(),
            kind: LinkKind::EntitySet,
        }
    }
}

///
/// Entity
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Entity {
    pub type_name: Option<FullQualifiedName>,

    /// Address the server reported for editing this entity.
    pub edit_link: Option<String>,

    pub properties: Vec<Property>,
    pub navigation_links: Vec<Link>,
}

impl Entity {
    #[must_use]
    pub fn new(type_name: FullQualifiedName) -> Self {
        Self {
            type_name: Some(type_name),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_edit_link(mut self, edit_link: impl Into<String>) -> Self {
        self.edit_link = Some(edit_link.into());
        self
    }

    #[must_use]
    pub fn with_property(mut self, property: Property) -> Self {
        self.properties.push(property);
        self
    }

    #[must_use]
    pub fn with_link(mut self, link: Link) -> Self {
        self.navigation_links.push(link);
        self
    }

    #[must_use]
    pub fn property(&self, name: &str) -> Option<&Property> {
        self.properties.iter().find(|p| p.name == name)
    }
}
