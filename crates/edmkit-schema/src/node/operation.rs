use crate::{
    error::ErrorTree,
    node::{ElementKind, NamedNode, ValidateNode, property::default_nullable},
    validate::naming::{validate_identifier, validate_qualified_name},
};
use serde::{Deserialize, Serialize};
use std::{collections::BTreeSet, ops::Not};

///
/// ParameterDef
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct ParameterDef {
    pub name: String,

    #[serde(rename = "type")]
    pub type_name: String,

    #[serde(default)]
    pub collection: bool,

    #[serde(default = "default_nullable")]
    pub nullable: bool,
}

impl ParameterDef {
    #[must_use]
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
            collection: false,
            nullable: true,
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
}

///
/// ReturnTypeDef
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct ReturnTypeDef {
    #[serde(rename = "type")]
    pub type_name: String,

    #[serde(default)]
    pub collection: bool,

    #[serde(default = "default_nullable")]
    pub nullable: bool,
}

impl ReturnTypeDef {
    #[must_use]
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            collection: false,
            nullable: true,
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
}

///
/// ActionDef
///
/// When `is_bound` is set the first parameter is the binding parameter.
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct ActionDef {
    pub name: String,

    #[serde(default, skip_serializing_if = "Not::not")]
    pub is_bound: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity_set_path: Option<String>,

    #[serde(default)]
    pub parameters: Vec<ParameterDef>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_type: Option<ReturnTypeDef>,
}

impl ActionDef {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Mark bound and insert the binding parameter in first position.
    #[must_use]
    pub fn bound_to(mut self, binding: ParameterDef) -> Self {
        self.is_bound = true;
        self.parameters.insert(0, binding);
        self
    }

    #[must_use]
    pub fn with_parameter(mut self, parameter: ParameterDef) -> Self {
        self.parameters.push(parameter);
        self
    }

    #[must_use]
    pub fn returns(mut self, return_type: ReturnTypeDef) -> Self {
        self.return_type = Some(return_type);
        self
    }
}

impl NamedNode for ActionDef {
    const KIND: ElementKind = ElementKind::Action;

    fn name(&self) -> &str {
        &self.name
    }
}

impl ValidateNode for ActionDef {
    fn validate(&self) -> Result<(), ErrorTree> {
        validate_signature(
            &self.name,
            self.is_bound,
            &self.parameters,
            self.return_type.as_ref(),
        )
        .result()
    }
}

///
/// FunctionDef
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct FunctionDef {
    pub name: String,

    #[serde(default, skip_serializing_if = "Not::not")]
    pub is_bound: bool,

    #[serde(default, skip_serializing_if = "Not::not")]
    pub is_composable: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity_set_path: Option<String>,

    #[serde(default)]
    pub parameters: Vec<ParameterDef>,

    pub return_type: ReturnTypeDef,
}

impl FunctionDef {
    #[must_use]
    pub fn new(name: impl Into<String>, return_type: ReturnTypeDef) -> Self {
        Self {
            name: name.into(),
            is_bound: false,
            is_composable: false,
            entity_set_path: None,
            parameters: Vec::new(),
            return_type,
        }
    }

    /// Mark bound and insert the binding parameter in first position.
    #[must_use]
    pub fn bound_to(mut self, binding: ParameterDef) -> Self {
        self.is_bound = true;
        self.parameters.insert(0, binding);
        self
    }

    #[must_use]
    pub fn with_parameter(mut self, parameter: ParameterDef) -> Self {
        self.parameters.push(parameter);
        self
    }

    #[must_use]
    pub const fn composable(mut self) -> Self {
        self.is_composable = true;
        self
    }
}

impl NamedNode for FunctionDef {
    const KIND: ElementKind = ElementKind::Function;

    fn name(&self) -> &str {
        &self.name
    }
}

impl ValidateNode for FunctionDef {
    fn validate(&self) -> Result<(), ErrorTree> {
        validate_signature(
            &self.name,
            self.is_bound,
            &self.parameters,
            Some(&self.return_type),
        )
        .result()
    }
}

fn validate_signature(
    name: &str,
    is_bound: bool,
    parameters: &[ParameterDef],
    return_type: Option<&ReturnTypeDef>,
) -> ErrorTree {
    let mut errs = ErrorTree::new();

    if let Err(e) = validate_identifier(name) {
        errs.add(e);
    }
    if is_bound && parameters.is_empty() {
        errs.add("bound operation declares no binding parameter");
    }

    let mut seen = BTreeSet::new();
    for parameter in parameters {
        let mut param_errs = ErrorTree::new();
        if let Err(e) = validate_identifier(&parameter.name) {
            param_errs.add(e);
        }
        if let Err(e) = validate_qualified_name(&parameter.type_name) {
            param_errs.add(e);
        }
        errs.add_child(parameter.name.clone(), param_errs);

        if !seen.insert(parameter.name.as_str()) {
            errs.add(format!("duplicate parameter '{}'", parameter.name));
        }
    }

    if let Some(return_type) = return_type
        && let Err(e) = validate_qualified_name(&return_type.type_name)
    {
        errs.add(format!("return type: {e}"));
    }

    errs
}

///
/// TESTS
///
