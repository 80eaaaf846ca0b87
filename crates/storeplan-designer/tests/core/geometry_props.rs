use proptest::prelude::*;
use storeplan_designer::geometry::{self, FixtureTransform, Point};

fn coord() -> impl Strategy<Value = f64> {
    -1_000.0..1_000.0f64
}

fn polygon() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec((coord(), coord()), 3..12)
        .prop_map(|nodes| nodes.into_iter().flat_map(|(x, y)| [x, y]).collect())
}

fn near(a: Point, b: Point, tol: f64) -> bool {
    (a.x - b.x).abs() < tol && (a.y - b.y).abs() < tol
}

proptest! {
    #[test]
    fn rotation_round_trip(
        px in coord(), py in coord(),
        cx in coord(), cy in coord(),
        angle in 0.0..360.0f64,
    ) {
        let p = Point::new(px, py);
        let c = Point::new(cx, cy);
        let back = geometry::inverse_rotate_point(geometry::rotate_point(p, c, angle), c, angle);
        prop_assert!(near(back, p, 1e-6), "{:?} -> {:?}", p, back);
    }

    #[test]
    fn rotation_preserves_distance_to_centre(
        px in coord(), py in coord(),
        cx in coord(), cy in coord(),
        angle in 0.0..360.0f64,
    ) {
        let p = Point::new(px, py);
        let c = Point::new(cx, cy);
        let r = geometry::rotate_point(p, c, angle);
        prop_assert!((p.distance_to(&c) - r.distance_to(&c)).abs() < 1e-6);
    }

    #[test]
    fn recentred_polygon_has_centroid_at_origin(points in polygon()) {
        let centred = geometry::recenter(&points);
        prop_assert_eq!(centred.len(), points.len());
        prop_assert!(near(geometry::centroid(&centred), Point::default(), 1e-6));
    }

    #[test]
    fn transform_round_trip(
        points in polygon(),
        x in coord(), y in coord(),
        sx in 0.1..10.0f64, sy in 0.1..10.0f64,
        angle in 0.0..360.0f64,
    ) {
        let t = FixtureTransform::for_polygon(&points, Point::new(x, y), sx, sy, angle);
        for p in geometry::nodes(&points) {
            let back = t.absolute_to_local(t.local_to_absolute(p));
            prop_assert!(near(back, p, 1e-6), "{:?} -> {:?}", p, back);
        }
    }
}
