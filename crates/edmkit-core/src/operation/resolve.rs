use crate::{
    edm::Edm,
    error::Error,
    fqn::FullQualifiedName,
    model::{Operation, Parameter},
    operation::{ArgShape, OverloadKind, OverloadQuery, ResolveError},
};
use std::sync::Arc;
use tracing::debug;

///
/// OverloadResolver
///
/// Picks one signature out of an overload set. Pure over the registry; the
/// composable flag is carried on the result and not checked here.
///

#[derive(Clone, Copy, Debug)]
pub struct OverloadResolver<'a> {
    edm: &'a Edm,
}

impl<'a> OverloadResolver<'a> {
    #[must_use]
    pub const fn new(edm: &'a Edm) -> Self {
        Self { edm }
    }

    pub fn resolve(&self, query: &OverloadQuery) -> Result<Arc<Operation>, Error> {
        let candidates = match query.kind {
            OverloadKind::Action => self.edm.actions(&query.name),
            OverloadKind::Function => self.edm.functions(&query.name),
        };

        let mut matched = Vec::new();
        for candidate in candidates {
            if self.accepts(candidate, query)? {
                matched.push(candidate);
            }
        }

        debug!(
            name = %query.name,
            candidates = candidates.len(),
            matched = matched.len(),
            "resolved overload"
        );

        match matched.as_slice() {
            [] => Err(ResolveError::NoMatchingOverload {
                name: query.name.clone(),
            }
            .into()),
            [only] => Ok(Arc::clone(only)),
            many => Err(ResolveError::AmbiguousOverload {
                name: query.name.clone(),
                matched: many.len(),
                duplicate: has_duplicate_signature(many),
            }
            .into()),
        }
    }

    // Binding presence, binding shape, then positional arguments.
    fn accepts(&self, candidate: &Operation, query: &OverloadQuery) -> Result<bool, Error> {
        match (candidate.binding_parameter(), &query.binding) {
            (None, None) => {}
            (Some(param), Some(shape)) => {
                if !self.fits(shape, param)? {
                    return Ok(false);
                }
            }
            _ => return Ok(false),
        }

        let params = candidate.non_binding_parameters();
        if params.len() != query.arguments.len() {
            return Ok(false);
        }
        for (param, arg) in params.iter().zip(&query.arguments) {
            if !self.fits(arg, param)? {
                return Ok(false);
            }
        }

        Ok(true)
    }

    fn fits(&self, arg: &ArgShape, param: &Parameter) -> Result<bool, Error> {
        if arg.collection != param.collection {
            return Ok(false);
        }

        self.edm.is_assignable(&arg.type_name, &param.type_name)
    }
}

fn has_duplicate_signature(ops: &[&Arc<Operation>]) -> bool {
    let keys: Vec<_> = ops.iter().map(|op| op.signature_key()).collect();

    keys.iter()
        .enumerate()
        .any(|(i, key)| keys[i + 1..].contains(key))
}

impl Edm {
    #[must_use]
    pub const fn resolver(&self) -> OverloadResolver<'_> {
        OverloadResolver::new(self)
    }

    /// Resolve a function call site.
    pub fn resolve_function(
        &self,
        name: &FullQualifiedName,
        binding: Option<ArgShape>,
        arguments: &[ArgShape],
    ) -> Result<Arc<Operation>, Error> {
        let query = OverloadQuery {
            binding,
            arguments: arguments.to_vec(),
            ..OverloadQuery::function(name.clone())
        };

        self.resolver().resolve(&query)
    }

    /// Resolve an action call site.
    pub fn resolve_action(
        &self,
        name: &FullQualifiedName,
        binding: Option<ArgShape>,
        arguments: &[ArgShape],
    ) -> Result<Arc<Operation>, Error> {
        let query = OverloadQuery {
            binding,
            arguments: arguments.to_vec(),
            ..OverloadQuery::action(name.clone())
        };

        self.resolver().resolve(&query)
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ErrorClass, ErrorDetail};
    use edmkit_schema::node::{
        ActionDef, EntityTypeDef, FunctionDef, ParameterDef, PropertyDef, ReturnTypeDef,
        SchemaDef,
    };

    fn fqn(s: &str) -> FullQualifiedName {
        FullQualifiedName::split(s)
    }

    fn keyed(name: &str) -> EntityTypeDef {
        EntityTypeDef::new(name)
            .with_key("Id")
            .with_property(PropertyDef::new("Id", "Edm.Int32").not_null())
    }

    fn bound_fn(binding: &str, with_string: bool) -> FunctionDef {
        let def = FunctionDef::new(
            "BFCESTwoKeyNavRTESTwoKeyNav",
            ReturnTypeDef::new("T.ETTwoKeyNav").collection(),
        )
        .bound_to(ParameterDef::new("BindingParam", binding).collection())
        .composable();

        if with_string {
            def.with_parameter(ParameterDef::new("ParameterString", "Edm.String"))
        } else {
            def
        }
    }

    fn model() -> Edm {
        let schema = SchemaDef::new("Test.Model")
            .with_alias("T")
            .with_entity_type(keyed("ETTwoKeyNav"))
            .with_entity_type(keyed("ETKeyNav"))
            .with_entity_type(EntityTypeDef::new("ETBaseTwoKeyNav").with_base("T.ETTwoKeyNav"))
            .with_entity_type(EntityTypeDef::new("ETOrphan").with_base("T.ETMissing"))
            .with_function(bound_fn("T.ETTwoKeyNav", false))
            .with_function(bound_fn("T.ETTwoKeyNav", true))
            .with_function(bound_fn("T.ETKeyNav", false))
            .with_function(bound_fn("T.ETKeyNav", true))
            .with_function(
                FunctionDef::new("UFCRTString", ReturnTypeDef::new("Edm.String"))
                    .with_parameter(ParameterDef::new("a", "Edm.String")),
            )
            .with_function(
                FunctionDef::new("UFCRTString", ReturnTypeDef::new("Edm.String"))
                    .with_parameter(ParameterDef::new("b", "Edm.String").not_null()),
            )
            .with_function(
                FunctionDef::new("BFTwoKeyNav", ReturnTypeDef::new("Edm.Int32"))
                    .bound_to(ParameterDef::new("p", "T.ETTwoKeyNav")),
            )
            .with_function(
                FunctionDef::new("BFTwoKeyNav", ReturnTypeDef::new("Edm.Int32"))
                    .bound_to(ParameterDef::new("p", "T.ETBaseTwoKeyNav")),
            )
            .with_action(ActionDef::new("UARTString").with_parameter(ParameterDef::new(
                "ParameterInt16",
                "Edm.Int16",
            )));

        Edm::new(vec![schema]).expect("test model should load")
    }

    fn name() -> FullQualifiedName {
        fqn("Test.Model.BFCESTwoKeyNavRTESTwoKeyNav")
    }

    #[test]
    fn bound_collection_without_arguments_picks_nullary_overload() {
        let edm = model();

        let op = edm
            .resolve_function(
                &name(),
                Some(ArgShape::collection(fqn("T.ETTwoKeyNav"))),
                &[],
            )
            .expect("exactly one overload");

        assert_eq!(op.parameters.len(), 1);
        assert_eq!(
            op.binding_parameter().map(|p| &p.type_name),
            Some(&fqn("Test.Model.ETTwoKeyNav"))
        );
        assert!(op.is_composable());
    }

    #[test]
    fn bound_collection_with_string_picks_unary_overload() {
        let edm = model();

        let op = edm
            .resolve_function(
                &name(),
                Some(ArgShape::collection(fqn("T.ETTwoKeyNav"))),
                &[ArgShape::single(fqn("Edm.String"))],
            )
            .expect("exactly one overload");

        assert_eq!(op.parameters.len(), 2);
        assert!(op.parameter("ParameterString").is_some());
    }

    #[test]
    fn binding_cardinality_must_match() {
        let edm = model();

        let err = edm
            .resolve_function(&name(), Some(ArgShape::single(fqn("T.ETTwoKeyNav"))), &[])
            .expect_err("single entity is not a collection");

        assert_eq!(err.class, ErrorClass::NoMatchingOverload);
    }

    #[test]
    fn unbound_query_does_not_match_bound_signatures() {
        let edm = model();

        let err = edm
            .resolve_function(&name(), None, &[])
            .expect_err("every overload is bound");

        assert!(err.is_no_matching_overload());
    }

    #[test]
    fn unknown_name_is_no_match() {
        let edm = model();

        let err = edm
            .resolve_function(&fqn("T.Nothing"), None, &[])
            .expect_err("unknown name");

        assert!(err.is_no_matching_overload());
    }

    #[test]
    fn derived_binding_type_matches_base_signature() {
        let edm = model();

        let op = edm
            .resolve_function(
                &name(),
                Some(ArgShape::collection(fqn("T.ETBaseTwoKeyNav"))),
                &[],
            )
            .expect("derived type binds to its base");

        assert_eq!(
            op.binding_parameter().map(|p| &p.type_name),
            Some(&fqn("Test.Model.ETTwoKeyNav"))
        );
    }

    #[test]
    fn derived_binding_with_overload_for_both_levels_is_ambiguous() {
        let edm = model();

        let err = edm
            .resolve_function(
                &fqn("T.BFTwoKeyNav"),
                Some(ArgShape::single(fqn("T.ETBaseTwoKeyNav"))),
                &[],
            )
            .expect_err("both signatures accept the derived type");

        assert!(err.is_ambiguous_overload());
        assert!(matches!(
            err.detail,
            ErrorDetail::Resolve(ResolveError::AmbiguousOverload {
                matched: 2,
                duplicate: false,
                ..
            })
        ));
    }

    #[test]
    fn identical_signatures_are_reported_as_duplicates() {
        let edm = model();

        let err = edm
            .resolve_function(
                &fqn("T.UFCRTString"),
                None,
                &[ArgShape::single(fqn("Edm.String"))],
            )
            .expect_err("declared twice");

        assert!(matches!(
            err.detail,
            ErrorDetail::Resolve(ResolveError::AmbiguousOverload {
                duplicate: true,
                ..
            })
        ));
    }

    #[test]
    fn argument_types_must_be_assignable() {
        let edm = model();

        let err = edm
            .resolve_action(
                &fqn("T.UARTString"),
                None,
                &[ArgShape::single(fqn("Edm.Int32"))],
            )
            .expect_err("no numeric promotion");
        assert!(err.is_no_matching_overload());

        let op = edm
            .resolve_action(
                &fqn("T.UARTString"),
                None,
                &[ArgShape::single(fqn("Edm.Int16"))],
            )
            .expect("exact type");
        assert!(op.is_action());
    }

    #[test]
    fn actions_and_functions_are_separate_sets() {
        let edm = model();

        let err = edm
            .resolve_action(
                &fqn("T.UFCRTString"),
                None,
                &[ArgShape::single(fqn("Edm.String"))],
            )
            .expect_err("UFCRTString is a function");

        assert!(err.is_no_matching_overload());
    }

    #[test]
    fn missing_base_while_matching_is_malformed() {
        let edm = model();

        let err = edm
            .resolve_function(
                &name(),
                Some(ArgShape::collection(fqn("T.ETOrphan"))),
                &[],
            )
            .expect_err("base of ETOrphan is missing");

        assert!(err.is_malformed_schema());
    }

    #[test]
    fn query_builder_matches_direct_call() {
        let edm = model();
        let query = OverloadQuery::function(name())
            .bound_to(ArgShape::collection(fqn("T.ETKeyNav")))
            .with_argument(ArgShape::single(fqn("Edm.String")));

        let via_query = edm.resolver().resolve(&query).expect("resolves");
        let direct = edm
            .resolve_function(
                &name(),
                Some(ArgShape::collection(fqn("T.ETKeyNav"))),
                &[ArgShape::single(fqn("Edm.String"))],
            )
            .expect("resolves");

        assert!(Arc::ptr_eq(&via_query, &direct));
    }
}
