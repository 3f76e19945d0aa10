use crate::{
    config::ClientConfig,
    error::{Error, ErrorClass},
    request::{
        HttpMethod, MutationKind, UpdateKind,
        payload::{Entity, Link, PrimitiveValue, Property, PropertyValue},
    },
};
use thiserror::Error as ThisError;

/// Header carrying the logical verb of a tunneled request.
pub const METHOD_OVERRIDE_HEADER: &str = "X-HTTP-Method";

///
/// RequestError
///

#[remain::sorted]
#[derive(Debug, ThisError)]
pub enum RequestError {
    #[error("missing edit link")]
    MissingEditLink,

    #[error("wrong value kind: expected {expected}, found {found}")]
    WrongValueKind {
        expected: &'static str,
        found: &'static str,
    },
}

impl RequestError {
    #[must_use]
    pub const fn class(&self) -> ErrorClass {
        ErrorClass::InvalidArgument
    }
}

///
/// Payload
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Payload {
    Entity(Entity),
    Link(Link),
    None,
    Property(Property),
    Value(PrimitiveValue),
}

///
/// MutationRequest
///
/// Protocol-level description of one mutation; the transport turns it into
/// an HTTP exchange.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MutationRequest {
    pub uri: String,
    pub kind: MutationKind,

    /// Verb on the wire.
    pub method: HttpMethod,

    /// Logical verb when tunneled through POST.
    pub method_override: Option<HttpMethod>,

    pub payload: Payload,
}

impl MutationRequest {
    #[must_use]
    pub const fn logical_method(&self) -> HttpMethod {
        self.kind.method()
    }

    #[must_use]
    pub const fn is_tunneled(&self) -> bool {
        self.method_override.is_some()
    }

    /// Headers this descriptor adds on top of transport defaults.
    #[must_use]
    pub fn headers(&self) -> Vec<(&'static str, &'static str)> {
        self.method_override
            .map(|method| (METHOD_OVERRIDE_HEADER, method.as_str()))
            .into_iter()
            .collect()
    }
}

///
/// MutationRequestFactory
///
/// Builds mutation descriptors. Holds nothing but its configuration, so
/// one factory may be shared freely.
///

#[derive(Clone, Copy, Debug, Default)]
pub struct MutationRequestFactory {
    config: ClientConfig,
}

impl MutationRequestFactory {
    #[must_use]
    pub const fn new(config: ClientConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub const fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Update kind used by [`Self::update_entity_default`].
    #[must_use]
    pub const fn default_update_kind(&self) -> UpdateKind {
        self.config.default_update_kind
    }

    //
    // entities
    //

    #[must_use]
    pub fn create_entity(&self, uri: impl Into<String>, entity: Entity) -> MutationRequest {
        self.build(uri.into(), MutationKind::Create, Payload::Entity(entity))
    }

    #[must_use]
    pub fn update_entity(
        &self,
        uri: impl Into<String>,
        kind: UpdateKind,
        changes: Entity,
    ) -> MutationRequest {
        self.build(uri.into(), MutationKind::Update(kind), Payload::Entity(changes))
    }

    /// Update an entity with the configured default kind.
    #[must_use]
    pub fn update_entity_default(
        &self,
        uri: impl Into<String>,
        changes: Entity,
    ) -> MutationRequest {
        self.update_entity(uri, self.default_update_kind(), changes)
    }

    /// Update an entity at the address it was served with.
    pub fn update_entity_by_edit_link(
        &self,
        kind: UpdateKind,
        entity: Entity,
    ) -> Result<MutationRequest, Error> {
        let uri = entity
            .edit_link
            .clone()
            .ok_or(RequestError::MissingEditLink)?;

        Ok(self.update_entity(uri, kind, entity))
    }

    /// Replace a raw primitive value (`$value`).
    #[must_use]
    pub fn update_value(
        &self,
        uri: impl Into<String>,
        kind: UpdateKind,
        value: PrimitiveValue,
    ) -> MutationRequest {
        self.build(uri.into(), MutationKind::Update(kind), Payload::Value(value))
    }

    //
    // properties
    //

    /// Primitive properties are always replaced whole.
    pub fn update_property_primitive(
        &self,
        uri: impl Into<String>,
        property: Property,
    ) -> Result<MutationRequest, Error> {
        expect_kind(&property, "primitive", PropertyValue::is_primitive)?;

        Ok(self.build(
            uri.into(),
            MutationKind::Update(UpdateKind::Replace),
            Payload::Property(property),
        ))
    }

    pub fn update_property_complex(
        &self,
        uri: impl Into<String>,
        kind: UpdateKind,
        property: Property,
    ) -> Result<MutationRequest, Error> {
        expect_kind(&property, "complex", PropertyValue::is_complex)?;

        Ok(self.build(
            uri.into(),
            MutationKind::Update(kind),
            Payload::Property(property),
        ))
    }

    /// Collections are always replaced whole.
    pub fn update_property_collection(
        &self,
        uri: impl Into<String>,
        property: Property,
    ) -> Result<MutationRequest, Error> {
        expect_kind(&property, "collection", PropertyValue::is_collection)?;

        Ok(self.build(
            uri.into(),
            MutationKind::Update(UpdateKind::Replace),
            Payload::Property(property),
        ))
    }

    //
    // links
    //

    #[must_use]
    pub fn create_link(&self, uri: impl Into<String>, link: Link) -> MutationRequest {
        self.build(uri.into(), MutationKind::Create, Payload::Link(link))
    }

    #[must_use]
    pub fn update_link(
        &self,
        uri: impl Into<String>,
        kind: UpdateKind,
        link: Link,
    ) -> MutationRequest {
        self.build(uri.into(), MutationKind::Update(kind), Payload::Link(link))
    }

    #[must_use]
    pub fn delete(&self, uri: impl Into<String>) -> MutationRequest {
        self.build(uri.into(), MutationKind::Delete, Payload::None)
    }

    // Creates are POST already and never carry the override header.
    fn build(&self, uri: String, kind: MutationKind, payload: Payload) -> MutationRequest {
        let logical = kind.method();
        let (method, method_override) =
            if self.config.use_verb_tunneling && logical != HttpMethod::Post {
                (HttpMethod::Post, Some(logical))
            } else {
                (logical, None)
            };

        MutationRequest {
            uri,
            kind,
            method,
            method_override,
            payload,
        }
    }
}

fn expect_kind(
    property: &Property,
    expected: &'static str,
    accepts: impl Fn(&PropertyValue) -> bool,
) -> Result<(), RequestError> {
    if accepts(&property.value) {
        Ok(())
    } else {
        Err(RequestError::WrongValueKind {
            expected,
            found: property.value.kind_name(),
        })
    }
}
