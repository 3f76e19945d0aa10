use crate::{
    error::ErrorTree,
    node::ValidateNode,
    validate::naming::{validate_identifier, validate_qualified_name},
};
use serde::{Deserialize, Serialize};

///
/// PropertyDef
///
/// A structural property. `type_name` is a qualified type name such as
/// `Edm.String` or `Demo.Address`; collection-ness is carried separately.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct PropertyDef {
    pub name: String,

    #[serde(rename = "type")]
    pub type_name: String,

    #[serde(default)]
    pub collection: bool,

    #[serde(default = "default_nullable")]
    pub nullable: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<u32>,
}

impl PropertyDef {
    #[must_use]
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
            collection: false,
            nullable: true,
            default_value: None,
            max_length: None,
        }
    }

    #[must_use]
    pub const fn collection(mut self) -> Self {
        self.collection = true;
        self
    }

    #[must_use]
    pub const fn not_null(mut self) -> Self {
        self.nullable = false;
        self
    }

    #[must_use]
    pub fn with_default(mut self, value: impl Into<String>) -> Self {
        self.default_value = Some(value.into());
        self
    }
}

impl ValidateNode for PropertyDef {
    fn validate(&self) -> Result<(), ErrorTree> {
        let mut errs = ErrorTree::new();

        if let Err(e) = validate_identifier(&self.name) {
            errs.add(e);
        }
        if let Err(e) = validate_qualified_name(&self.type_name) {
            errs.add(e);
        }

        errs.result()
    }
}

///
/// NavigationPropertyDef
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct NavigationPropertyDef {
    pub name: String,

    #[serde(rename = "type")]
    pub type_name: String,

    #[serde(default)]
    pub collection: bool,

    #[serde(default = "default_nullable")]
    pub nullable: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub partner: Option<String>,

    #[serde(default)]
    pub contains_target: bool,
}

impl NavigationPropertyDef {
    #[must_use]
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
            collection: false,
            nullable: true,
            partner: None,
            contains_target: false,
        }
    }

    #[must_use]
    pub const fn collection(mut self) -> Self {
        self.collection = true;
        self
    }

    #[must_use]
    pub fn with_partner(mut self, partner: impl Into<String>) -> Self {
        self.partner = Some(partner.into());
        self
    }
}

impl ValidateNode for NavigationPropertyDef {
    fn validate(&self) -> Result<(), ErrorTree> {
        let mut errs = ErrorTree::new();

        if let Err(e) = validate_identifier(&self.name) {
            errs.add(e);
        }
        if let Err(e) = validate_qualified_name(&self.type_name) {
            errs.add(e);
        }
        if let Some(partner) = &self.partner
            && let Err(e) = validate_identifier(partner)
        {
            errs.add(format!("partner: {e}"));
        }

        errs.result()
    }
}

pub(crate) const fn default_nullable() -> bool {
    true
}
