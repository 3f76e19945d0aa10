use crate::{
    error::ErrorTree,
    node::{ElementKind, NamedNode, ValidateNode},
    validate::naming::{validate_identifier, validate_qualified_name},
};
use serde::{Deserialize, Serialize};

///
/// TypeDefinitionDef
/// A named alias over a primitive type, optionally narrowed by facets.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct TypeDefinitionDef {
    pub name: String,
    pub underlying_type: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub precision: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale: Option<u32>,
}

impl TypeDefinitionDef {
    #[must_use]
    pub fn new(name: impl Into<String>, underlying_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            underlying_type: underlying_type.into(),
            max_length: None,
            precision: None,
            scale: None,
        }
    }

    #[must_use]
    pub const fn with_max_length(mut self, max_length: u32) -> Self {
        self.max_length = Some(max_length);
        self
    }
}

impl NamedNode for TypeDefinitionDef {
    const KIND: ElementKind = ElementKind::TypeDefinition;

    fn name(&self) -> &str {
        &self.name
    }
}

impl ValidateNode for TypeDefinitionDef {
    fn validate(&self) -> Result<(), ErrorTree> {
        let mut errs = ErrorTree::new();

        if let Err(e) = validate_identifier(&self.name) {
            errs.add(e);
        }
        if let Err(e) = validate_qualified_name(&self.underlying_type) {
            errs.add(format!("underlying type: {e}"));
        }
        if let (Some(precision), Some(scale)) = (self.precision, self.scale)
            && scale > precision
        {
            errs.add(format!("scale {scale} exceeds precision {precision}"));
        }

        errs.result()
    }
}
