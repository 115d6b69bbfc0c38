// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! Whole-model derivation scenarios over a small pet-store graph: `User`
//! holds a paginated `pets` connection to `Dog`, and `Dog`/`Cat` point back
//! at their owner.

use selection_builder::builder::{SelectionBuilder, SelectionParams};
use selection_builder::field::{Field, SelectionSet};
use selection_model::system::{EntityDefinition, FieldDefinition, ModelSystem};
use selection_model::types::EntityId;

fn create_test_system() -> ModelSystem {
    ModelSystem::build(vec![
        EntityDefinition {
            name: "User".to_string(),
            field_name: Some("user".to_string()),
            collection_name: Some("users".to_string()),
            fields: vec![
                FieldDefinition::attribute("address"),
                FieldDefinition::attribute("age"),
                FieldDefinition::attribute_with_selection(
                    "customAddress",
                    &["street", "street2", "city", "state", "postalCode", "country"],
                ),
                FieldDefinition::attribute("name"),
                FieldDefinition::connection("pets", "Dog"),
            ],
        },
        EntityDefinition::new(
            "Dog",
            vec![
                FieldDefinition::attribute("name"),
                FieldDefinition::to_one("owner", "User"),
            ],
        ),
        EntityDefinition::new(
            "Cat",
            vec![
                FieldDefinition::attribute("name"),
                FieldDefinition::to_one("owner", "User"),
            ],
        ),
    ])
    .unwrap()
}

fn entity(system: &ModelSystem, name: &str) -> EntityId {
    system.entity_id(name).expect("entity not defined")
}

fn custom_address_field(name: &str) -> Field {
    Field::new(
        name,
        vec![
            Field::leaf("street"),
            Field::leaf("street2"),
            Field::leaf("city"),
            Field::leaf("state"),
            Field::leaf("postalCode"),
            Field::leaf("country"),
        ],
    )
}

fn user_selection_set() -> SelectionSet {
    vec![
        Field::leaf("address"),
        Field::leaf("age"),
        custom_address_field("customAddress"),
        Field::leaf("name"),
        Field::new(
            "pets",
            vec![Field::new(
                "edges",
                vec![Field::new("node", vec![Field::leaf("name")])],
            )],
        ),
    ]
}

#[test]
fn user_selection_set_prunes_the_owner_back_edge() {
    let system = create_test_system();
    let builder = SelectionBuilder::new(&system);

    assert_eq!(
        builder.selection_set(entity(&system, "User")),
        user_selection_set()
    );
}

#[test]
fn pet_selection_sets_nest_the_full_owner() {
    let system = create_test_system();
    let builder = SelectionBuilder::new(&system);

    // inside `owner`, `pets` survives (to-many), but the dog under
    // `pets.edges.node` no longer selects its owner again
    let expected = vec![
        Field::leaf("name"),
        Field::new("owner", user_selection_set()),
    ];

    assert_eq!(builder.selection_set(entity(&system, "Dog")), expected);
    assert_eq!(builder.selection_set(entity(&system, "Cat")), expected);
}

#[test]
fn exclusions_apply_to_the_requested_entity_only() {
    let system = create_test_system();
    let builder = SelectionBuilder::new(&system);

    let selection_set = builder.selection_set_with(
        entity(&system, "User"),
        None,
        &SelectionParams::excluding(["pets", "address", "customAddress"]),
    );

    assert_eq!(selection_set, vec![Field::leaf("age"), Field::leaf("name")]);
}

#[test]
fn custom_field_takes_precedence_over_derivation() {
    let system = create_test_system();
    let builder = SelectionBuilder::new(&system);
    let user = entity(&system, "User");

    // derived `address` is a bare leaf
    let derived = builder.selection_set(user);
    assert_eq!(derived[0], Field::leaf("address"));

    let custom = custom_address_field("address");
    let selection_set = builder.selection_set_with(
        user,
        None,
        &SelectionParams::default().with_custom_field("address", custom.clone()),
    );

    assert_eq!(selection_set[0], custom);
    assert_eq!(selection_set[1..], derived[1..]);
}

#[test]
fn model_declared_sub_selection_is_attached() {
    let system = create_test_system();
    let builder = SelectionBuilder::new(&system);

    let selection_set = builder.selection_set(entity(&system, "User"));

    assert_eq!(selection_set[2], custom_address_field("customAddress"));
}

#[test]
fn entity_names_resolve_with_and_without_overrides() {
    let system = create_test_system();

    let user = &system[entity(&system, "User")];
    assert_eq!(user.field_name, "user");
    assert_eq!(user.collection_name, "users");

    let dog = &system[entity(&system, "Dog")];
    assert_eq!(dog.field_name, "Dog");
    assert_eq!(dog.collection_name, "Dogs");
}

#[test]
fn attribute_only_selection_at_every_depth() {
    let system = create_test_system();
    let builder = SelectionBuilder::new(&system);

    let params = SelectionParams {
        include_relationships: false,
        ..SelectionParams::default()
    };

    assert_eq!(
        builder.selection_set_with(entity(&system, "Dog"), None, &params),
        vec![Field::leaf("name")]
    );
    assert_eq!(
        builder.selection_set_with(entity(&system, "User"), None, &params),
        vec![
            Field::leaf("address"),
            Field::leaf("age"),
            custom_address_field("customAddress"),
            Field::leaf("name"),
        ]
    );
}

#[test]
fn derivation_is_deterministic() {
    let system = create_test_system();
    let builder = SelectionBuilder::new(&system);
    let user = entity(&system, "User");

    assert_eq!(builder.selection_set(user), builder.selection_set(user));
}

#[test]
fn selection_sets_roundtrip_through_serde() {
    let system = create_test_system();
    let selection_set = SelectionBuilder::new(&system).selection_set(entity(&system, "User"));

    let serialized = serde_json::to_string(&selection_set).unwrap();
    let deserialized: SelectionSet = serde_json::from_str(&serialized).unwrap();

    assert_eq!(deserialized, selection_set);
}
