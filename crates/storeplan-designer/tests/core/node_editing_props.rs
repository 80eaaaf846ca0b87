use proptest::prelude::*;
use storeplan_core::{EditError, FixtureId};
use storeplan_designer::geometry::{self, Point};
use storeplan_designer::node_editing;
use storeplan_designer::Fixture;

fn fixture(points: Vec<f64>, x: f64, y: f64, rotation: f64) -> Fixture {
    Fixture {
        id: FixtureId::from("p"),
        x,
        y,
        points,
        fill: "lightgreen".to_string(),
        name: "Fixture".to_string(),
        scale_x: 1.0,
        scale_y: 1.0,
        rotation,
        color: "lightgreen".to_string(),
    }
}

fn polygon() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec((-500.0..500.0f64, -500.0..500.0f64), 3..10)
        .prop_map(|nodes| nodes.into_iter().flat_map(|(x, y)| [x, y]).collect())
}

proptest! {
    #[test]
    fn add_node_lands_on_absolute_midpoint(
        points in polygon(),
        x in -1_000.0..1_000.0f64,
        y in -1_000.0..1_000.0f64,
        edge_seed in any::<usize>(),
    ) {
        let f = fixture(points, x, y, 0.0);
        let n = f.node_count();
        let edge = edge_seed % n;
        let out = node_editing::add_node_to_edge(&f, edge).unwrap();

        prop_assert_eq!(out.len() % 2, 0);
        prop_assert_eq!(geometry::node_count(&out), n + 1);

        let a = f.node(edge).unwrap();
        let b = f.node((edge + 1) % n).unwrap();
        let expected = geometry::midpoint(
            Point::new(a.x + x, a.y + y),
            Point::new(b.x + x, b.y + y),
        );
        let inserted = geometry::node_at(&out, edge + 1).unwrap();
        prop_assert!((inserted.x + x - expected.x).abs() < 1e-6);
        prop_assert!((inserted.y + y - expected.y).abs() < 1e-6);
    }

    #[test]
    fn delete_node_keeps_parity_and_minimum(points in polygon(), node_seed in any::<usize>()) {
        let n = geometry::node_count(&points);
        let node = node_seed % n;
        match node_editing::delete_node(&points, node) {
            Ok(out) => {
                prop_assert!(n > 3);
                prop_assert_eq!(out.len(), points.len() - 2);
                prop_assert_eq!(out.len() % 2, 0);
            }
            Err(err) => {
                prop_assert_eq!(n, 3);
                prop_assert_eq!(err, EditError::TooFewNodes { node_count: 3 });
            }
        }
    }

    #[test]
    fn moved_node_is_drawn_at_drop_point(
        points in polygon(),
        x in -1_000.0..1_000.0f64,
        y in -1_000.0..1_000.0f64,
        rotation in 0.0..360.0f64,
        drop_x in -2_000.0..2_000.0f64,
        drop_y in -2_000.0..2_000.0f64,
        node_seed in any::<usize>(),
    ) {
        let f = fixture(points, x, y, rotation);
        let node = node_seed % f.node_count();
        let out = node_editing::move_node(&f, node, drop_x, drop_y).unwrap();
        prop_assert_eq!(out.len(), f.points.len());

        // Drawn with the pivot the fixture had when the drop happened.
        let local = geometry::node_at(&out, node).unwrap();
        let drawn = f.transform().local_to_absolute(local);
        prop_assert!((drawn.x - drop_x).abs() < 1e-6);
        prop_assert!((drawn.y - drop_y).abs() < 1e-6);
    }
}
