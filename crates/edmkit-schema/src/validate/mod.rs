//! Load-time structural validation.
//!
//! Only checks that need no cross-element resolution run here: identifier
//! shape, reserved qualifiers, per-kind name uniqueness, namespace and alias
//! uniqueness. Broken
//! references (unknown base types, unknown terms) are left for the runtime
//! model, which reports them when the dependent element is first used.

pub mod naming;

use crate::{
    err,
    error::ErrorTree,
    node::{ElementKind, NamedNode, SchemaDef, ValidateNode},
};
use std::collections::{BTreeMap, BTreeSet};

/// Validate a set of schemas in a staged, deterministic order.
pub fn validate_schemas(schemas: &[SchemaDef]) -> Result<(), ErrorTree> {
    // Phase 1: validate each schema's nodes (local invariants).
    let mut errors = ErrorTree::new();
    for schema in schemas {
        errors.add_child(schema.namespace.clone(), validate_schema_nodes(schema));
    }

    // Phase 2: enforce model-wide invariants.
    validate_global(schemas, &mut errors);

    errors.result()
}

// Validate every declaration in one schema, routed by element name.
fn validate_schema_nodes(schema: &SchemaDef) -> ErrorTree {
    let mut errs = ErrorTree::new();

    if let Err(e) = naming::validate_namespace(&schema.namespace)
        .and_then(|()| naming::validate_unreserved(&schema.namespace))
    {
        errs.add(e);
    }
    if let Some(alias) = &schema.alias
        && let Err(e) =
            naming::validate_identifier(alias).and_then(|()| naming::validate_unreserved(alias))
    {
        errs.add(format!("alias: {e}"));
    }

    validate_kind(schema.entity_types(), &mut errs);
    validate_kind(schema.complex_types(), &mut errs);
    validate_kind(schema.enum_types(), &mut errs);
    validate_kind(schema.type_definitions(), &mut errs);
    validate_kind(schema.actions(), &mut errs);
    validate_kind(schema.functions(), &mut errs);
    validate_kind(schema.terms(), &mut errs);
    validate_kind(schema.entity_containers(), &mut errs);

    for group in schema.annotation_groups() {
        if let Err(e) = group.validate() {
            errs.add_child(group.target.clone(), e);
        }
    }
    for (i, annotation) in schema.annotations().iter().enumerate() {
        if let Err(e) = annotation.validate() {
            errs.add_child(format!("annotation[{i}]"), e);
        }
    }

    validate_unique_names(schema, &mut errs);

    errs
}

// Run node validation for one element kind and flag duplicate names for
// kinds that do not overload.
fn validate_kind<N: NamedNode + ValidateNode>(nodes: &[N], errs: &mut ErrorTree) {
    let mut seen = BTreeSet::new();

    for node in nodes {
        if let Err(e) = node.validate() {
            errs.add_child(node.name(), e);
        }
        if !N::KIND.allows_overloads() && !seen.insert(node.name()) {
            err!(errs, "duplicate {} '{}'", N::KIND, node.name());
        }
    }
}

// Types, terms and containers share a single name scope per namespace.
fn validate_unique_names(schema: &SchemaDef, errs: &mut ErrorTree) {
    let mut owners = BTreeMap::<&str, ElementKind>::new();
    let named = schema
        .entity_types()
        .iter()
        .map(|n| (n.name(), ElementKind::EntityType))
        .chain(schema.complex_types().iter().map(|n| (n.name(), ElementKind::ComplexType)))
        .chain(schema.enum_types().iter().map(|n| (n.name(), ElementKind::EnumType)))
        .chain(
            schema
                .type_definitions()
                .iter()
                .map(|n| (n.name(), ElementKind::TypeDefinition)),
        )
        .chain(schema.terms().iter().map(|n| (n.name(), ElementKind::Term)))
        .chain(
            schema
                .entity_containers()
                .iter()
                .map(|n| (n.name(), ElementKind::EntityContainer)),
        );

    for (name, kind) in named {
        match owners.get(name) {
            Some(existing) if *existing != kind => {
                err!(errs, "{kind} '{name}' collides with {existing} of the same name");
            }
            Some(_) => {}
            None => {
                owners.insert(name, kind);
            }
        }
    }

    let mut groups = BTreeSet::new();
    for group in schema.annotation_groups() {
        if !groups.insert((group.target.as_str(), group.qualifier.as_deref())) {
            err!(
                errs,
                "duplicate annotation group for target '{}' (qualifier {:?})",
                group.target,
                group.qualifier
            );
        }
    }
}

// Namespaces and aliases must be unique across the whole model.
fn validate_global(schemas: &[SchemaDef], errs: &mut ErrorTree) {
    let mut seen = BTreeSet::new();

    for schema in schemas {
        if !seen.insert(schema.namespace.as_str()) {
            err!(errs, "duplicate namespace '{}'", schema.namespace);
        }
    }
    for schema in schemas {
        if let Some(alias) = &schema.alias
            && !seen.insert(alias.as_str())
        {
            err!(
                errs,
                "alias '{alias}' of namespace '{}' is already in use",
                schema.namespace
            );
        }
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::{
        ComplexTypeDef, EntityTypeDef, FunctionDef, ParameterDef, PropertyDef, ReturnTypeDef,
    };

    fn person() -> EntityTypeDef {
        EntityTypeDef::new("Person")
            .with_key("Id")
            .with_property(PropertyDef::new("Id", "Edm.Int32").not_null())
    }

    #[test]
    fn well_formed_schemas_pass() {
        let schema = SchemaDef::new("Demo")
            .with_alias("D")
            .with_entity_type(person())
            .with_entity_type(EntityTypeDef::new("Employee").with_base("Demo.Missing"));

        // the dangling base reference is not a structural problem
        assert!(validate_schemas(&[schema]).is_ok());
    }

    #[test]
    fn duplicate_type_names_fail() {
        let schema = SchemaDef::new("Demo")
            .with_entity_type(person())
            .with_entity_type(person());

        let err = validate_schemas(&[schema]).expect_err("duplicate should fail");
        assert!(err.to_string().contains("duplicate EntityType 'Person'"));
    }

    #[test]
    fn types_of_different_kinds_share_a_scope() {
        let schema = SchemaDef::new("Demo")
            .with_entity_type(person())
            .with_complex_type(ComplexTypeDef::new("Person"));

        assert!(validate_schemas(&[schema]).is_err());
    }

    #[test]
    fn overloaded_functions_are_allowed() {
        let f = || FunctionDef::new("Count", ReturnTypeDef::new("Edm.Int32"));
        let schema = SchemaDef::new("Demo")
            .with_function(f())
            .with_function(f().with_parameter(ParameterDef::new("filter", "Edm.String")));

        assert!(validate_schemas(&[schema]).is_ok());
    }

    #[test]
    fn namespaces_and_aliases_are_unique() {
        let a = SchemaDef::new("Demo").with_alias("Shared");
        let b = SchemaDef::new("Other").with_alias("Shared");
        let c = SchemaDef::new("Demo");

        let err = validate_schemas(&[a, b, c]).expect_err("collisions should fail");
        assert_eq!(err.len(), 2);
    }

    #[test]
    fn reserved_namespaces_and_aliases_fail() {
        let shadowing_alias = SchemaDef::new("Demo").with_alias("Edm");
        let err = validate_schemas(&[shadowing_alias]).expect_err("alias Edm is reserved");
        assert!(err.to_string().contains("alias: 'Edm' is a reserved qualifier"));

        let shadowing_namespace = SchemaDef::new("odata");
        assert!(validate_schemas(&[shadowing_namespace]).is_err());

        let nested = SchemaDef::new("Edm.Extensions").with_alias("EdmX");
        assert!(validate_schemas(&[nested]).is_ok());
    }

    #[test]
    fn errors_are_routed_by_namespace_and_element() {
        let schema = SchemaDef::new("Demo").with_entity_type(EntityTypeDef::new("9Bad"));

        let err = validate_schemas(&[schema]).expect_err("bad name should fail");
        assert_eq!(err.flatten()[0].0, "Demo.9Bad");
    }
}
