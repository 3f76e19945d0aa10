use crate::{
    error::ErrorTree,
    node::{ElementKind, NamedNode, ValidateNode},
    validate::naming::{validate_identifier, validate_qualified_name},
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

///
/// AnnotationExpr
///
/// Constant and path expressions an annotation may carry. Dynamic
/// expressions (apply, if, casts) are evaluated by consumers, not here.
///

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AnnotationExpr {
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    EnumMember(String),
    Path(String),
    Collection(Vec<Self>),
    Record(BTreeMap<String, Self>),
}

///
/// AnnotationDef
///

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct AnnotationDef {
    /// Qualified term name; may use the schema alias.
    pub term: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qualifier: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<AnnotationExpr>,
}

impl AnnotationDef {
    #[must_use]
    pub fn new(term: impl Into<String>) -> Self {
        Self {
            term: term.into(),
            qualifier: None,
            value: None,
        }
    }

    #[must_use]
    pub fn with_value(mut self, value: AnnotationExpr) -> Self {
        self.value = Some(value);
        self
    }

    #[must_use]
    pub fn with_qualifier(mut self, qualifier: impl Into<String>) -> Self {
        self.qualifier = Some(qualifier.into());
        self
    }
}

impl ValidateNode for AnnotationDef {
    fn validate(&self) -> Result<(), ErrorTree> {
        let mut errs = ErrorTree::new();

        if let Err(e) = validate_qualified_name(&self.term) {
            errs.add(format!("term: {e}"));
        }
        if let Some(qualifier) = &self.qualifier
            && let Err(e) = validate_identifier(qualifier)
        {
            errs.add(format!("qualifier: {e}"));
        }

        errs.result()
    }
}

///
/// AnnotationGroupDef
///
/// Out-of-line annotations applied to `target`, a path such as
/// `Demo.Person/Name` or `Demo.Container/People`.
///

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct AnnotationGroupDef {
    pub target: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qualifier: Option<String>,

    #[serde(default)]
    pub annotations: Vec<AnnotationDef>,
}

impl AnnotationGroupDef {
    #[must_use]
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            qualifier: None,
            annotations: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_annotation(mut self, annotation: AnnotationDef) -> Self {
        self.annotations.push(annotation);
        self
    }
}

impl NamedNode for AnnotationGroupDef {
    const KIND: ElementKind = ElementKind::AnnotationGroup;

    fn name(&self) -> &str {
        &self.target
    }
}

impl ValidateNode for AnnotationGroupDef {
    fn validate(&self) -> Result<(), ErrorTree> {
        let mut errs = ErrorTree::new();

        if self.target.trim().is_empty() {
            errs.add("annotation target is empty");
        }
        for (i, annotation) in self.annotations.iter().enumerate() {
            if let Err(e) = annotation.validate() {
                errs.add_child(format!("annotation[{i}]"), e);
            }
        }

        errs.result()
    }
}
