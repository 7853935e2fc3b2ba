//! Round-trip and failure-path tests for the converter pair.

use crate::{
    to_external, to_internal, validate, ConvertError, LayoutSerializer, ModelBuilder,
};
use formstudio_model::{
    FormComponent, FormContainer, FormModel, LayoutDocument, SequentialIdGenerator,
};
use serde_json::json;

fn layout(value: serde_json::Value) -> LayoutDocument {
    serde_json::from_value(value).expect("fixture must parse")
}

fn build(document: &LayoutDocument) -> FormModel {
    ModelBuilder::new()
        .with_id_generator(SequentialIdGenerator::new("base"))
        .build(Some(document), None)
        .expect("fixture must convert")
}

#[test]
fn test_worked_example() {
    let doc = layout(json!([
        { "id": "c1", "type": "Group", "children": ["c2"] },
        { "id": "c2", "type": "Input" }
    ]));

    let model = build(&doc);

    assert_eq!(model.root_id, "base-1");
    assert_eq!(model.containers.len(), 1);
    assert!(model.containers.contains_key("c1"));
    assert_eq!(model.components.len(), 1);
    assert_eq!(model.components["c2"].component_type, "Input");
    assert_eq!(model.root_order(), ["c1"]);
    assert_eq!(model.order["c1"], ["c2"]);

    assert_eq!(to_external(&model).unwrap(), doc);
}

#[test]
fn test_round_trip_preserves_structure_and_props() {
    let doc = layout(json!([
        {
            "id": "header",
            "type": "Header",
            "size": "L",
            "textResourceBindings": { "title": "form.title" }
        },
        {
            "id": "people",
            "type": "Group",
            "children": ["person", "contact"],
            "maxCount": 4,
            "dataModelBindings": { "group": "persons" }
        },
        {
            "id": "person",
            "type": "Group",
            "children": ["name"]
        },
        { "id": "name", "type": "Input", "required": true },
        { "id": "contact", "type": "Input" },
        { "id": "submit", "type": "Button" }
    ]));

    let model = build(&doc);
    assert_eq!(model.root_order(), ["header", "people", "submit"]);
    assert_eq!(model.order["people"], ["person", "contact"]);
    assert_eq!(model.containers["people"].max_count, Some(4));
    assert_eq!(
        model.components["name"].props["required"],
        json!(true)
    );

    let out = to_external(&model).unwrap();
    assert_eq!(out, doc);
}

#[test]
fn test_repeated_round_trips_are_idempotent() {
    let doc = layout(json!([
        { "id": "g1", "type": "Group", "children": ["a", "g2"] },
        { "id": "a", "type": "Input" },
        { "id": "g2", "type": "Group", "children": ["b"] },
        { "id": "b", "type": "Checkbox" }
    ]));

    let once = to_external(&build(&doc)).unwrap();
    let twice = to_external(&build(&once)).unwrap();

    assert_eq!(once, doc);
    assert_eq!(twice, once);
}

#[test]
fn test_multi_page_children_are_normalized() {
    let doc = layout(json!([
        {
            "id": "c1",
            "type": "Group",
            "children": ["0:c2", "1:c3"],
            "edit": { "multiPage": true }
        },
        { "id": "c2", "type": "Input" },
        { "id": "c3", "type": "Input" }
    ]));

    let model = build(&doc);
    assert_eq!(model.order["c1"], ["c2", "c3"]);
    assert!(model.components.contains_key("c2"));
    assert!(!model.components.contains_key("0:c2"));

    // Page prefixes are consumed at build time; the flattened document
    // carries bare child ids.
    let out = to_external(&model).unwrap();
    let expected = layout(json!([
        {
            "id": "c1",
            "type": "Group",
            "children": ["c2", "c3"],
            "edit": { "multiPage": true }
        },
        { "id": "c2", "type": "Input" },
        { "id": "c3", "type": "Input" }
    ]));
    assert_eq!(out, expected);
}

#[test]
fn test_absent_document_yields_root_only_model() {
    let model = to_internal(None, None).unwrap();

    assert!(model.components.is_empty());
    assert!(model.containers.is_empty());
    assert_eq!(model.order.len(), 1);
    assert!(model.root_order().is_empty());

    assert_eq!(to_external(&model).unwrap(), LayoutDocument::default());
}

#[test]
fn test_empty_document_round_trips() {
    let doc = LayoutDocument::default();
    let model = to_internal(Some(&doc), None).unwrap();
    assert_eq!(to_external(&model).unwrap(), doc);
}

#[test]
fn test_hidden_is_passed_through_untouched() {
    let doc = layout(json!([{ "id": "a", "type": "Input" }]));
    let hidden = json!({ "fields": ["a"] });

    let model = to_internal(Some(&doc), Some(hidden.clone())).unwrap();
    assert_eq!(model.hidden, Some(hidden));

    // hidden never leaks into the external document
    assert_eq!(to_external(&model).unwrap(), doc);
}

#[test]
fn test_root_id_redrawn_on_collision() {
    let doc = layout(json!([{ "id": "base-1", "type": "Input" }]));

    let model = ModelBuilder::new()
        .with_id_generator(SequentialIdGenerator::new("base"))
        .build(Some(&doc), None)
        .unwrap();

    assert_eq!(model.root_id, "base-2");
    assert_eq!(model.root_order(), ["base-1"]);
}

#[test]
fn test_dangling_reference_names_both_ids() {
    let doc = layout(json!([
        { "id": "g1", "type": "Group", "children": ["nope"] }
    ]));

    let err = to_internal(Some(&doc), None).unwrap_err();
    assert_eq!(err, ConvertError::dangling("g1", "nope"));
}

#[test]
fn test_duplicate_id_fails_fast() {
    let doc = layout(json!([
        { "id": "a", "type": "Input" },
        { "id": "a", "type": "Button" }
    ]));

    let err = to_internal(Some(&doc), None).unwrap_err();
    assert_eq!(err, ConvertError::DuplicateId { id: "a".into() });
}

#[test]
fn test_group_without_children_is_malformed() {
    let doc = layout(json!([
        { "id": "g1", "type": "Group" }
    ]));

    let err = to_internal(Some(&doc), None).unwrap_err();
    assert!(matches!(err, ConvertError::MalformedNode { id, .. } if id == "g1"));
}

#[test]
fn test_missing_id_is_malformed() {
    let doc = layout(json!([
        { "id": "", "type": "Input" }
    ]));

    let err = to_internal(Some(&doc), None).unwrap_err();
    assert!(matches!(err, ConvertError::MalformedNode { .. }));
}

#[test]
fn test_nesting_beyond_bound_fails() {
    let doc = layout(json!([
        { "id": "g1", "type": "Group", "children": ["g2"] },
        { "id": "g2", "type": "Group", "children": ["g3"] },
        { "id": "g3", "type": "Group", "children": ["g4"] },
        { "id": "g4", "type": "Group", "children": ["leaf"] },
        { "id": "leaf", "type": "Input" }
    ]));

    let err = ModelBuilder::new()
        .with_max_depth(3)
        .build(Some(&doc), None)
        .unwrap_err();
    assert_eq!(err, ConvertError::MaxDepthExceeded { max_depth: 3 });

    // One level under the bound still converts.
    let model = ModelBuilder::new()
        .with_max_depth(4)
        .build(Some(&doc), None)
        .unwrap();
    assert_eq!(model.containers.len(), 4);
}

#[test]
fn test_group_cycle_is_rejected() {
    let doc = layout(json!([
        { "id": "g1", "type": "Group", "children": ["g2"] },
        { "id": "g2", "type": "Group", "children": ["g1"] }
    ]));

    let err = to_internal(Some(&doc), None).unwrap_err();
    assert!(matches!(err, ConvertError::MalformedNode { .. }));
}

#[test]
fn test_self_referencing_group_is_rejected() {
    // A group referencing itself is in-group by its own reference, so it
    // has no top-level ancestor either.
    let doc = layout(json!([
        { "id": "g1", "type": "Group", "children": ["g1"] }
    ]));

    let err = to_internal(Some(&doc), None).unwrap_err();
    assert!(matches!(err, ConvertError::MalformedNode { id, .. } if id == "g1"));
}

#[test]
fn test_reachable_cycle_hits_depth_bound() {
    let doc = layout(json!([
        { "id": "g0", "type": "Group", "children": ["g1"] },
        { "id": "g1", "type": "Group", "children": ["g2"] },
        { "id": "g2", "type": "Group", "children": ["g1"] }
    ]));

    let err = to_internal(Some(&doc), None).unwrap_err();
    assert!(matches!(err, ConvertError::MaxDepthExceeded { .. }));
}

#[test]
fn test_serializer_skips_group_owned_components_at_top_level() {
    let mut model = FormModel::with_root("root");
    model
        .containers
        .insert("g1".to_string(), FormContainer::new());
    model
        .components
        .insert("a".to_string(), FormComponent::new("Input"));
    model.order.insert(
        "root".to_string(),
        vec!["g1".to_string(), "a".to_string()],
    );
    model
        .order
        .insert("g1".to_string(), vec!["a".to_string()]);

    let out = to_external(&model).unwrap();
    let ids: Vec<&str> = out.nodes.iter().map(|node| node.id()).collect();
    assert_eq!(ids, vec!["g1", "a"]);
}

#[test]
fn test_serializer_reports_unknown_id() {
    let mut model = FormModel::with_root("root");
    model
        .order
        .insert("root".to_string(), vec!["ghost".to_string()]);

    let err = to_external(&model).unwrap_err();
    assert_eq!(err, ConvertError::dangling("root", "ghost"));
}

#[test]
fn test_serializer_honours_its_own_depth_bound() {
    let doc = layout(json!([
        { "id": "g1", "type": "Group", "children": ["g2"] },
        { "id": "g2", "type": "Group", "children": ["a"] },
        { "id": "a", "type": "Input" }
    ]));
    let model = build(&doc);

    let err = LayoutSerializer::new()
        .with_max_depth(1)
        .serialize(&model)
        .unwrap_err();
    assert_eq!(err, ConvertError::MaxDepthExceeded { max_depth: 1 });
}

#[test]
fn test_built_models_satisfy_the_invariants() {
    let doc = layout(json!([
        { "id": "g1", "type": "Group", "children": ["a", "g2"] },
        { "id": "a", "type": "Input" },
        { "id": "g2", "type": "Group", "children": ["b"] },
        { "id": "b", "type": "Input" },
        { "id": "c", "type": "Button" }
    ]));

    let model = build(&doc);
    assert_eq!(validate(&model), Ok(()));
}
