use crate::{
    error::ErrorTree,
    node::{ElementKind, NamedNode, ValidateNode},
    validate::naming::{validate_identifier, validate_qualified_name},
};
use serde::{Deserialize, Serialize};
use std::{collections::BTreeSet, ops::Not};

///
/// EnumTypeDef
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct EnumTypeDef {
    pub name: String,

    /// Underlying integer type; `Edm.Int32` when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub underlying_type: Option<String>,

    #[serde(default, skip_serializing_if = "Not::not")]
    pub is_flags: bool,

    #[serde(default)]
    pub members: Vec<EnumMemberDef>,
}

impl EnumTypeDef {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_member(mut self, member: EnumMemberDef) -> Self {
        self.members.push(member);
        self
    }

    #[must_use]
    pub const fn flags(mut self) -> Self {
        self.is_flags = true;
        self
    }
}

impl NamedNode for EnumTypeDef {
    const KIND: ElementKind = ElementKind::EnumType;

    fn name(&self) -> &str {
        &self.name
    }
}

impl ValidateNode for EnumTypeDef {
    fn validate(&self) -> Result<(), ErrorTree> {
        let mut errs = ErrorTree::new();

        if let Err(e) = validate_identifier(&self.name) {
            errs.add(e);
        }
        if let Some(underlying) = &self.underlying_type
            && let Err(e) = validate_qualified_name(underlying)
        {
            errs.add(format!("underlying type: {e}"));
        }

        let mut seen = BTreeSet::new();
        for member in &self.members {
            if let Err(e) = validate_identifier(&member.name) {
                errs.add(format!("member: {e}"));
            }
            if !seen.insert(member.name.as_str()) {
                errs.add(format!("duplicate member '{}'", member.name));
            }
        }

        errs.result()
    }
}

///
/// EnumMemberDef
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct EnumMemberDef {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<i64>,
}

impl EnumMemberDef {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: None,
        }
    }

    #[must_use]
    pub fn valued(name: impl Into<String>, value: i64) -> Self {
        Self {
            name: name.into(),
            value: Some(value),
        }
    }
}
