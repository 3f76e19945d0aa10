use crate::{
    fqn::{FullQualifiedName, NamespaceAliases},
    model::element::NamedElement,
};
use edmkit_schema::node::{AnnotationDef, AnnotationExpr, AnnotationGroupDef, TermDef};

///
/// Term
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Term {
    pub fqn: FullQualifiedName,
    pub type_name: FullQualifiedName,
    pub collection: bool,
    pub nullable: bool,
    pub base_term: Option<FullQualifiedName>,
    pub applies_to: Vec<String>,
    pub default_value: Option<String>,
}

impl Term {
    pub(crate) fn from_def(namespace: &str, def: &TermDef, aliases: &NamespaceAliases) -> Self {
        Self {
            fqn: FullQualifiedName::new(namespace, def.name.clone()),
            type_name: aliases.qualify(&def.type_name),
            collection: def.collection,
            nullable: def.nullable,
            base_term: def.base_term.as_deref().map(|name| aliases.qualify(name)),
            applies_to: def.applies_to.clone(),
            default_value: def.default_value.clone(),
        }
    }

    /// An empty applies-to list means the term applies anywhere.
    #[must_use]
    pub fn applies_to_kind(&self, kind: &str) -> bool {
        self.applies_to.is_empty() || self.applies_to.iter().any(|k| k == kind)
    }
}

impl NamedElement for Term {
    fn fqn(&self) -> &FullQualifiedName {
        &self.fqn
    }
}

///
/// Annotation
///

#[derive(Clone, Debug, PartialEq)]
pub struct Annotation {
    /// Term reference, alias already rewritten to its namespace.
    pub term: FullQualifiedName,
    pub qualifier: Option<String>,
    pub value: Option<AnnotationExpr>,
}

impl Annotation {
    pub(crate) fn from_def(def: &AnnotationDef, aliases: &NamespaceAliases) -> Self {
        Self {
            term: aliases.qualify(&def.term),
            qualifier: def.qualifier.clone(),
            value: def.value.clone(),
        }
    }
}

///
/// AnnotationGroup
///

#[derive(Clone, Debug, PartialEq)]
pub struct AnnotationGroup {
    pub target: String,
    pub qualifier: Option<String>,
    pub annotations: Vec<Annotation>,
}

impl AnnotationGroup {
    pub(crate) fn from_def(def: &AnnotationGroupDef, aliases: &NamespaceAliases) -> Self {
        Self {
            target: def.target.clone(),
            qualifier: def.qualifier.clone(),
            annotations: def
                .annotations
                .iter()
                .map(|a| Annotation::from_def(a, aliases))
                .collect(),
        }
    }

    /// Last annotation in this group for `term`, which may be written
    /// against an alias.
    #[must_use]
    pub fn annotation(
        &self,
        term: &FullQualifiedName,
        aliases: &NamespaceAliases,
    ) -> Option<&Annotation> {
        let term = aliases.canonical(term);

        self.annotations.iter().rev().find(|a| a.term == term)
    }
}
