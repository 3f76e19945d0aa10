use crate::{
    error::ErrorTree,
    node::{ElementKind, NamedNode, ValidateNode, property::default_nullable},
    validate::naming::{validate_identifier, validate_qualified_name},
};
use serde::{Deserialize, Serialize};

///
/// TermDef
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct TermDef {
    pub name: String,

    #[serde(rename = "type")]
    pub type_name: String,

    #[serde(default)]
    pub collection: bool,

    #[serde(default = "default_nullable")]
    pub nullable: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_term: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub applies_to: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
}

impl TermDef {
    #[must_use]
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
            collection: false,
            nullable: true,
            base_term: None,
            applies_to: Vec::new(),
            default_value: None,
        }
    }

    #[must_use]
    pub fn applies_to(mut self, target: impl Into<String>) -> Self {
        self.applies_to.push(target.into());
        self
    }
}

impl NamedNode for TermDef {
    const KIND: ElementKind = ElementKind::Term;

    fn name(&self) -> &str {
        &self.name
    }
}

impl ValidateNode for TermDef {
    fn validate(&self) -> Result<(), ErrorTree> {
        let mut errs = ErrorTree::new();

        if let Err(e) = validate_identifier(&self.name) {
            errs.add(e);
        }
        if let Err(e) = validate_qualified_name(&self.type_name) {
            errs.add(e);
        }
        if let Some(base) = &self.base_term
            && let Err(e) = validate_qualified_name(base)
        {
            errs.add(format!("base term: {e}"));
        }

        errs.result()
    }
}
