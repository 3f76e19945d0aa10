use edmkit::{
    core::{
        operation::ArgShape,
        request::payload::{Entity, PrimitiveValue, Property},
    },
    prelude::*,
};

const METADATA: &str = r#"[
    {
        "namespace": "Trippin.Model",
        "alias": "Trippin",
        "entity_types": [
            {
                "name": "Person",
                "key": ["UserName"],
                "properties": [
                    { "name": "UserName", "type": "Edm.String", "nullable": false },
                    { "name": "Emails", "type": "Edm.String", "collection": true }
                ],
                "navigation_properties": [
                    { "name": "Friends", "type": "Trippin.Person", "collection": true }
                ]
            },
            { "name": "Employee", "base_type": "Trippin.Person" }
        ],
        "functions": [
            {
                "name": "GetFriendsTrips",
                "is_bound": true,
                "parameters": [
                    { "name": "person", "type": "Trippin.Person" },
                    { "name": "userName", "type": "Edm.String", "nullable": false }
                ],
                "return_type": { "type": "Edm.String", "collection": true }
            }
        ],
        "entity_containers": [
            {
                "name": "Container",
                "entity_sets": [{ "name": "People", "entity_type": "Trippin.Person" }],
                "function_imports": [
                    { "name": "GetNearestAirport", "function": "Trippin.GetNearestAirport" }
                ]
            }
        ],
        "default_container": "Container"
    }
]"#;

fn load() -> Edm {
    let defs: Vec<SchemaDef> = serde_json::from_str(METADATA).expect("metadata json");

    Edm::new(defs).expect("metadata loads")
}

fn fqn(s: &str) -> FullQualifiedName {
    s.parse().expect("qualified name")
}

#[test]
fn decoded_metadata_builds_a_queryable_model() {
    let edm = load();

    let person = edm.entity_type(&fqn("Trippin.Person")).expect("person");
    assert_eq!(person.fqn, fqn("Trippin.Model.Person"));
    assert!(person.navigation_property("Friends").is_some());

    let employee = edm.entity_type(&fqn("Trippin.Model.Employee")).expect("employee");
    assert_eq!(edm.key_of(&employee).expect("inherited key"), vec!["UserName"]);

    let container = edm
        .entity_container()
        .expect("one default")
        .expect("default declared");
    assert_eq!(
        container.entity_set("People").map(|s| &s.entity_type),
        Some(&fqn("Trippin.Model.Person"))
    );
    // imports are looked up lazily; a dangling target does not fail loading
    assert!(container.function_import("GetNearestAirport").is_some());
}

#[test]
fn bound_function_resolves_for_derived_binding() {
    let edm = load();

    let op = edm
        .resolve_function(
            &fqn("Trippin.GetFriendsTrips"),
            Some(ArgShape::single(fqn("Trippin.Employee"))),
            &[ArgShape::single(fqn("Edm.String"))],
        )
        .expect("one overload");

    assert!(op.is_bound);
    assert!(op.return_type.as_ref().is_some_and(|rt| rt.collection));
}

#[test]
fn factory_builds_tunneled_update_from_config() {
    let toml = "use_verb_tunneling = true\ndefault_update_kind = \"merge\"";
    let config = ClientConfig::from_toml_str(toml).expect("valid config");
    let factory = MutationRequestFactory::new(config);

    let entity = Entity::new(fqn("Trippin.Model.Person"))
        .with_edit_link("People('russell')")
        .with_property(Property::primitive("UserName", PrimitiveValue::string("russell")));

    let request = factory
        .update_entity_by_edit_link(factory.default_update_kind(), entity)
        .expect("edit link present");

    assert_eq!(request.uri, "People('russell')");
    assert_eq!(request.method, HttpMethod::Post);
    assert_eq!(request.logical_method(), HttpMethod::Merge);
    assert_eq!(request.headers(), vec![("X-HTTP-Method", "MERGE")]);
}

#[test]
fn malformed_metadata_is_rejected_with_routes() {
    let mut defs: Vec<SchemaDef> = serde_json::from_str(METADATA).expect("metadata json");
    defs[0].entity_types = Some(vec![EntityTypeDef::new("Bad Name")]);

    let err = Edm::new(defs).expect_err("invalid identifier");

    assert_eq!(err.class, ErrorClass::MalformedSchema);
    assert!(err.message.contains("Trippin.Model"));
    assert!(!edmkit::VERSION.is_empty());
}
