use super::{payload::*, *};
use crate::{
    config::ClientConfig,
    error::{ErrorClass, ErrorDetail, ErrorOrigin},
    fqn::FullQualifiedName,
    model::EdmPrimitive,
};
use proptest::prelude::*;

fn plain() -> MutationRequestFactory {
    MutationRequestFactory::default()
}

fn tunneling() -> MutationRequestFactory {
    MutationRequestFactory::new(ClientConfig::default().with_verb_tunneling(true))
}

fn person() -> Entity {
    Entity::new(FullQualifiedName::new("Demo", "Person"))
        .with_property(Property::primitive("Name", PrimitiveValue::string("Ada")))
}

fn primitive_property() -> Property {
    Property::primitive("Age", PrimitiveValue::new(EdmPrimitive::Int32, "36"))
}

fn complex_property() -> Property {
    Property::new(
        "Address",
        PropertyValue::Complex(vec![Property::primitive(
            "City",
            PrimitiveValue::string("London"),
        )]),
    )
}

fn collection_property() -> Property {
    Property::new(
        "Emails",
        PropertyValue::Collection(vec![PropertyValue::Primitive(PrimitiveValue::string(
            "ada@example.com",
        ))]),
    )
}

//
// verbs
//

#[test]
fn update_kinds_choose_wire_verb_without_tunneling() {
    let factory = plain();

    for (kind, method) in [
        (UpdateKind::Replace, HttpMethod::Put),
        (UpdateKind::Patch, HttpMethod::Patch),
        (UpdateKind::Merge, HttpMethod::Merge),
    ] {
        let request = factory.update_entity("People(1)", kind, person());

        assert_eq!(request.method, method);
        assert!(!request.is_tunneled());
        assert!(request.headers().is_empty());
    }
}

#[test]
fn tunneling_sends_post_with_override_header() {
    let request = tunneling().update_entity("People(1)", UpdateKind::Merge, person());

    assert_eq!(request.method, HttpMethod::Post);
    assert_eq!(request.method_override, Some(HttpMethod::Merge));
    assert_eq!(request.logical_method(), HttpMethod::Merge);
    assert_eq!(request.headers(), vec![(METHOD_OVERRIDE_HEADER, "MERGE")]);
}

#[test]
fn creates_are_never_tunneled() {
    let factory = tunneling();

    let entity = factory.create_entity("People", person());
    let link = factory.create_link("People(1)/Friends/$ref", Link::entity("Friends", "People(2)"));

    for request in [entity, link] {
        assert_eq!(request.method, HttpMethod::Post);
        assert!(request.headers().is_empty());
        assert_eq!(request.kind, MutationKind::Create);
    }
}

#[test]
fn delete_is_tunneled_when_enabled() {
    let request = tunneling().delete("People(1)");

    assert_eq!(request.method, HttpMethod::Post);
    assert_eq!(request.headers(), vec![(METHOD_OVERRIDE_HEADER, "DELETE")]);
    assert_eq!(request.payload, Payload::None);

    assert_eq!(plain().delete("People(1)").method, HttpMethod::Delete);
}

#[test]
fn primitive_and_collection_updates_always_replace() {
    let factory = plain();

    let primitive = factory
        .update_property_primitive("People(1)/Age", primitive_property())
        .expect("primitive value");
    let collection = factory
        .update_property_collection("People(1)/Emails", collection_property())
        .expect("collection value");

    assert_eq!(primitive.method, HttpMethod::Put);
    assert_eq!(collection.method, HttpMethod::Put);
    assert_eq!(collection.kind, MutationKind::Update(UpdateKind::Replace));
}

#[test]
fn complex_update_honours_kind() {
    let request = plain()
        .update_property_complex("People(1)/Address", UpdateKind::Patch, complex_property())
        .expect("complex value");

    assert_eq!(request.method, HttpMethod::Patch);
    assert!(matches!(request.payload, Payload::Property(ref p) if p.name == "Address"));
}

#[test]
fn value_and_link_updates_carry_their_payload() {
    let factory = plain();

    let value = factory.update_value(
        "People(1)/Name/$value",
        UpdateKind::Replace,
        PrimitiveValue::string("Grace"),
    );
    assert_eq!(value.method, HttpMethod::Put);
    assert_eq!(value.payload, Payload::Value(PrimitiveValue::string("Grace")));

    let link = factory.update_link(
        "People(1)/Manager/$ref",
        UpdateKind::Replace,
        Link::entity("Manager", "People(3)"),
    );
    assert_eq!(link.method, HttpMethod::Put);
    assert!(matches!(link.payload, Payload::Link(ref l) if l.kind == LinkKind::Entity));
}

#[test]
fn default_update_follows_configured_kind() {
    let entity_update = |kind| {
        let config = ClientConfig::default().with_default_update_kind(kind);
        MutationRequestFactory::new(config).update_entity_default("People(1)", person())
    };

    assert_eq!(plain().update_entity_default("People(1)", person()).method, HttpMethod::Patch);
    assert_eq!(entity_update(UpdateKind::Replace).method, HttpMethod::Put);

    let merged = entity_update(UpdateKind::Merge);
    assert_eq!(merged.kind, MutationKind::Update(UpdateKind::Merge));
    assert_eq!(merged.method, HttpMethod::Merge);
}

//
// preconditions
//

#[test]
fn update_by_edit_link_uses_the_link() {
    let entity = person().with_edit_link("https://host/svc/People(1)");

    let request = plain()
        .update_entity_by_edit_link(UpdateKind::Patch, entity)
        .expect("edit link present");

    assert_eq!(request.uri, "https://host/svc/People(1)");
    assert_eq!(request.method, HttpMethod::Patch);
}

#[test]
fn update_by_edit_link_without_link_is_rejected() {
    let err = plain()
        .update_entity_by_edit_link(UpdateKind::Replace, person())
        .expect_err("no edit link");

    assert_eq!(err.class, ErrorClass::InvalidArgument);
    assert_eq!(err.origin, ErrorOrigin::Request);
    assert_eq!(err.message, "missing edit link");
    assert!(matches!(
        err.detail,
        ErrorDetail::Request(RequestError::MissingEditLink)
    ));
}

#[test]
fn property_updates_check_value_kind() {
    let factory = plain();

    let cases = [
        factory.update_property_primitive("p", complex_property()),
        factory.update_property_primitive("p", collection_property()),
        factory.update_property_complex("p", UpdateKind::Patch, primitive_property()),
        factory.update_property_complex("p", UpdateKind::Patch, collection_property()),
        factory.update_property_collection("p", primitive_property()),
        factory.update_property_collection("p", complex_property()),
    ];

    for result in cases {
        let err = result.expect_err("mismatched value kind");
        assert!(err.is_invalid_argument());
        assert!(err.message.starts_with("wrong value kind"));
    }
}

#[test]
fn null_value_is_not_a_primitive_update() {
    let err = plain()
        .update_property_primitive("p", Property::new("Age", PropertyValue::Null))
        .expect_err("null is not primitive");

    assert_eq!(
        err.message,
        "wrong value kind: expected primitive, found null"
    );
}

//
// tunneling equivalence
//

#[derive(Clone, Debug)]
enum Op {
    CreateEntity,
    UpdateEntity(UpdateKind),
    UpdateValue(UpdateKind),
    UpdatePrimitive,
    UpdateComplex(UpdateKind),
    UpdateCollection,
    CreateLink,
    UpdateLink(UpdateKind),
    Delete,
}

fn arb_update_kind() -> impl Strategy<Value = UpdateKind> {
    prop::sample::select(UpdateKind::ALL.to_vec())
}

fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        Just(Op::CreateEntity),
        arb_update_kind().prop_map(Op::UpdateEntity),
        arb_update_kind().prop_map(Op::UpdateValue),
        Just(Op::UpdatePrimitive),
        arb_update_kind().prop_map(Op::UpdateComplex),
        Just(Op::UpdateCollection),
        Just(Op::CreateLink),
        arb_update_kind().prop_map(Op::UpdateLink),
        Just(Op::Delete),
    ]
}

fn run(factory: &MutationRequestFactory, op: &Op, uri: &str) -> MutationRequest {
    let link = || Link::entity_set("Friends", "People(2)");

    match op {
        Op::CreateEntity => factory.create_entity(uri, person()),
        Op::UpdateEntity(kind) => factory.update_entity(uri, *kind, person()),
        Op::UpdateValue(kind) => factory.update_value(uri, *kind, PrimitiveValue::string("x")),
        Op::UpdatePrimitive => factory
            .update_property_primitive(uri, primitive_property())
            .expect("primitive value"),
        Op::UpdateComplex(kind) => factory
            .update_property_complex(uri, *kind, complex_property())
            .expect("complex value"),
        Op::UpdateCollection => factory
            .update_property_collection(uri, collection_property())
            .expect("collection value"),
        Op::CreateLink => factory.create_link(uri, link()),
        Op::UpdateLink(kind) => factory.update_link(uri, *kind, link()),
        Op::Delete => factory.delete(uri),
    }
}

proptest! {
    #[test]
    fn tunneling_preserves_logical_verb(op in arb_op(), uri in "[A-Za-z]{1,8}\\([0-9]{1,3}\\)") {
        let direct = run(&plain(), &op, &uri);
        let tunneled = run(&tunneling(), &op, &uri);

        prop_assert_eq!(&direct.uri, &tunneled.uri);
        prop_assert_eq!(&direct.payload, &tunneled.payload);
        prop_assert_eq!(direct.kind, tunneled.kind);
        prop_assert_eq!(direct.logical_method(), tunneled.logical_method());
        prop_assert!(direct.method_override.is_none());

        if direct.method == HttpMethod::Post {
            prop_assert_eq!(tunneled.method, HttpMethod::Post);
            prop_assert!(tunneled.method_override.is_none());
        } else {
            prop_assert_eq!(tunneled.method, HttpMethod::Post);
            prop_assert_eq!(tunneled.method_override, Some(direct.method));
            prop_assert_eq!(
                tunneled.headers(),
                vec![(METHOD_OVERRIDE_HEADER, direct.method.as_str())]
            );
        }
    }
}
