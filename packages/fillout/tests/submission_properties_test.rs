//! Generated-input checks of the id-keyed collection reshaping

use fillout_trigger::{SubmissionCollection, transform_array_to_id_map};
use proptest::prelude::*;
use serde_json::{Map, Value, json};

fn id_strategy() -> impl Strategy<Value = Value> {
    prop_oneof![
        "[a-d]{1,2}".prop_map(Value::from),
        (0u8..6).prop_map(Value::from),
    ]
}

fn item_strategy() -> impl Strategy<Value = Value> {
    (
        id_strategy(),
        any::<i32>(),
        proptest::option::of("[A-Za-z]{1,8}"),
    )
        .prop_map(|(id, value, kind)| {
            let mut item = json!({ "id": id, "value": value });
            if let Some(kind) = kind {
                item["type"] = Value::from(kind);
            }
            item
        })
}

fn collection_strategy() -> impl Strategy<Value = SubmissionCollection> {
    proptest::sample::select(SubmissionCollection::ALL.to_vec())
}

fn key_of(id: &Value) -> String {
    match id {
        Value::String(id) => id.clone(),
        other => other.to_string(),
    }
}

proptest! {
    /// One entry per distinct id, holding the last item with that id minus the id itself
    #[test]
    fn every_id_maps_to_its_last_item(
        collection in collection_strategy(),
        items in proptest::collection::vec(item_strategy(), 0..16),
    ) {
        let mapped = transform_array_to_id_map(collection, Some(&Value::Array(items.clone()))).unwrap();

        let mut expected = Map::new();
        for item in &items {
            let mut fields = item.as_object().unwrap().clone();
            let id = fields.remove("id").unwrap();
            if collection == SubmissionCollection::Questions {
                fields.remove("type");
            }
            expected.insert(key_of(&id), Value::Object(fields));
        }

        prop_assert_eq!(mapped.len(), expected.len());
        for (key, fields) in &expected {
            prop_assert_eq!(mapped.get(key), Some(fields));
            prop_assert!(mapped[key].get("id").is_none());
        }
    }

    /// Only questions lose their `type`
    #[test]
    fn type_survives_outside_questions(
        collection in collection_strategy(),
        kind in "[A-Za-z]{1,8}",
    ) {
        let items = json!([{ "id": "x", "type": kind }]);
        let mapped = transform_array_to_id_map(collection, Some(&items)).unwrap();

        let kept = mapped["x"].get("type").is_some();
        prop_assert_eq!(kept, collection != SubmissionCollection::Questions);
    }
}
