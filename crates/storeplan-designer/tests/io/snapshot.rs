use proptest::prelude::*;
use storeplan_core::FixtureId;
use storeplan_designer::fixture_store::{FixtureSnapshot, FixtureStore};
use storeplan_designer::{Fixture, LayoutFile};

fn fixture_strategy() -> impl Strategy<Value = Fixture> {
    (
        "[a-z0-9]{1,12}",
        -5_000.0..5_000.0f64,
        -5_000.0..5_000.0f64,
        prop::collection::vec((-500.0..500.0f64, -500.0..500.0f64), 3..9),
        0.1..4.0f64,
        0.1..4.0f64,
        0.0..360.0f64,
        "[A-Za-z ]{0,16}",
    )
        .prop_map(|(id, x, y, nodes, scale_x, scale_y, rotation, name)| Fixture {
            id: FixtureId::from(id),
            x,
            y,
            points: nodes.into_iter().flat_map(|(a, b)| [a, b]).collect(),
            fill: "#f5a051".to_string(),
            name,
            scale_x,
            scale_y,
            rotation,
            color: "#f5a051".to_string(),
        })
}

proptest! {
    #[test]
    fn serialize_restore_is_lossless(fixtures in prop::collection::vec(fixture_strategy(), 0..6)) {
        let snapshot: FixtureSnapshot = fixtures.into_iter().map(|f| (f.id.clone(), f)).collect();
        let mut store = FixtureStore::new();
        store.restore(snapshot.clone());
        prop_assert_eq!(store.serialize(), snapshot.clone());

        let mut file = LayoutFile::new("prop");
        file.fixtures = snapshot.clone();
        let parsed = LayoutFile::from_json(&file.to_json().unwrap()).unwrap();
        prop_assert_eq!(parsed.fixtures, snapshot);
    }
}

#[test]
fn test_restore_from_handwritten_json() {
    let text = r##"{
        "version": "1.0",
        "metadata": {
            "store_name": "legacy",
            "created": "2023-05-01T08:00:00Z",
            "modified": "2023-05-02T08:00:00Z"
        },
        "fixtures": {
            "abc": {
                "id": "abc",
                "x": 500,
                "y": 500,
                "points": [-86.66, -66.66, -26.66, 133.33, 113.33, -66.66],
                "fill": "lightgreen",
                "name": "Fixture",
                "scaleX": 1,
                "scaleY": 1,
                "rotation": 0,
                "color": "lightgreen"
            },
            "odd": {
                "id": "odd",
                "x": 0, "y": 0,
                "points": [1, 2, 3],
                "fill": "red", "name": "Broken", "color": "red"
            }
        },
        "item_map": { "abc-edge-0": ["bread"] }
    }"##;
    let file = LayoutFile::from_json(text).unwrap();
    let mut store = FixtureStore::new();
    store.restore(file.fixtures);
    assert_eq!(store.len(), 1);
    let f = store.get(&FixtureId::from("abc")).unwrap();
    assert_eq!(f.node_count(), 3);
    assert_eq!(f.scale_x, 1.0);
    assert_eq!(file.item_map["abc-edge-0"][0], "bread");
}
