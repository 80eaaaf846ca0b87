use storeplan_core::{EditError, EditorFlavor, FixtureId, LayoutError};
use storeplan_designer::fixture_store::FixtureSnapshot;
use storeplan_designer::geometry::{self, Point};
use storeplan_designer::{
    DragInput, DragPhase, EditMode, Fixture, LayoutSession, SelectionState, SessionOptions,
};

const EPS: f64 = 1e-9;

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < EPS
}

fn editing(session: &mut LayoutSession, id: &FixtureId) {
    session.select_fixture(id).unwrap();
    session.set_mode(EditMode::Edit);
}

fn session_with(fixture: Fixture) -> LayoutSession {
    let mut session = LayoutSession::default();
    let mut snapshot = FixtureSnapshot::new();
    snapshot.insert(fixture.id.clone(), fixture);
    session.restore(snapshot);
    session
}

fn rotated_fixture() -> Fixture {
    Fixture {
        id: FixtureId::from("f"),
        x: 100.0,
        y: 100.0,
        points: vec![10.0, 0.0, -10.0, 10.0, 0.0, -10.0],
        fill: "lightgreen".to_string(),
        name: "Fixture".to_string(),
        scale_x: 1.0,
        scale_y: 1.0,
        rotation: 90.0,
        color: "lightgreen".to_string(),
    }
}

#[test]
fn test_new_fixture_from_each_template() {
    let mut session = LayoutSession::default();
    let id = session.add_fixture();
    let f = session.fixture(&id).unwrap();
    assert_eq!(f.node_count(), 3);
    let c = f.centroid();
    assert!(close(c.x, 0.0) && close(c.y, 0.0));
    assert_eq!(f.color, "lightgreen");
    assert_eq!((f.x, f.y), (500.0, 500.0));
    assert_eq!((f.scale_x, f.scale_y, f.rotation), (1.0, 1.0, 0.0));

    let mut shelves = LayoutSession::new(SessionOptions {
        flavor: EditorFlavor::Rectangle,
        ..SessionOptions::default()
    });
    let id = shelves.add_fixture();
    let f = shelves.fixture(&id).unwrap();
    assert_eq!(f.node_count(), 4);
    assert_eq!(f.color, "#f5a051");
    assert_eq!(f.name, "Shelf");
}

#[test]
fn test_add_node_on_edge_zero() {
    let mut session = LayoutSession::default();
    let id = session.add_fixture();
    let original = session.fixture(&id).unwrap().clone();
    editing(&mut session, &id);
    session.select_edge(0).unwrap();

    session.add_node_to_selected_edge().unwrap();
    let f = session.fixture(&id).unwrap();
    assert_eq!(f.node_count(), 4);

    let a = original.node(0).unwrap();
    let b = original.node(1).unwrap();
    let mid = geometry::midpoint(a, b);
    let inserted = f.node(1).unwrap();
    assert!(close(inserted.x, mid.x) && close(inserted.y, mid.y));
    assert_eq!(f.node(0), original.node(0));
    assert_eq!(f.node(2), original.node(1));
    assert_eq!(f.node(3), original.node(2));
}

#[test]
fn test_delete_node_from_triangle_is_rejected() {
    let mut session = LayoutSession::default();
    let id = session.add_fixture();
    editing(&mut session, &id);
    session.select_node(1).unwrap();

    let err = session.delete_selected_node().unwrap_err();
    assert_eq!(err, LayoutError::Edit(EditError::TooFewNodes { node_count: 3 }));
    assert_eq!(session.fixture(&id).unwrap().node_count(), 3);
}

#[test]
fn test_delete_node_from_rectangle() {
    let mut session = LayoutSession::default();
    let id = session.add_fixture_of(EditorFlavor::Rectangle);
    let before = session.fixture(&id).unwrap().points.clone();
    editing(&mut session, &id);
    session.select_node(1).unwrap();

    session.delete_selected_node().unwrap();
    let f = session.fixture(&id).unwrap();
    assert_eq!(f.node_count(), 3);
    let mut expected = before[..2].to_vec();
    expected.extend_from_slice(&before[4..]);
    assert_eq!(f.points, expected);
    assert_eq!(session.selection().selected_node(), None);
    assert_eq!(session.selection().state(), SelectionState::FixtureSelected(id));
}

#[test]
fn test_rotated_node_display_and_drag() {
    let mut session = session_with(rotated_fixture());
    let id = FixtureId::from("f");

    let drawn = session.fixture(&id).unwrap().absolute_nodes()[0];
    assert!(close(drawn.x, 100.0) && close(drawn.y, 110.0));

    let drag = |x: f64, y: f64| DragInput::Node {
        id: id.clone(),
        index: 0,
        x,
        y,
    };
    session.handle_drag(DragPhase::Start, drag(100.0, 110.0)).unwrap();
    session.handle_drag(DragPhase::End, drag(100.0, 110.0)).unwrap();
    let node = session.fixture(&id).unwrap().node(0).unwrap();
    assert!(close(node.x, 10.0) && close(node.y, 0.0), "{:?}", node);

    let mut session = session_with(rotated_fixture());
    session.handle_drag(DragPhase::Start, drag(110.0, 100.0)).unwrap();
    session.handle_drag(DragPhase::End, drag(110.0, 100.0)).unwrap();
    let node = session.fixture(&id).unwrap().node(0).unwrap();
    assert!(close(node.x, 0.0) && close(node.y, -10.0), "{:?}", node);
}

#[test]
fn test_delete_selected_fixture_with_edge_selected() {
    let mut session = LayoutSession::default();
    let id = session.add_fixture();
    editing(&mut session, &id);
    session.select_edge(2).unwrap();

    session.delete_fixture(None).unwrap();
    assert_eq!(session.selection().state(), SelectionState::Idle);
    assert_eq!(session.selection().selected_edge(), None);
    assert!(session.projection().is_none());
    assert!(session.fixture(&id).is_none());
}

#[test]
fn test_move_node_keeps_other_nodes_in_place() {
    let mut session = session_with(rotated_fixture());
    let id = FixtureId::from("f");
    let before = session.fixture(&id).unwrap().absolute_nodes();

    session.move_node(&id, 0, 100.0, 110.0).unwrap();
    let after = session.fixture(&id).unwrap().absolute_nodes();
    for (a, b) in before.iter().zip(&after) {
        assert!(a.distance_to(b) < 1e-6, "{:?} moved to {:?}", a, b);
    }
    assert!(after[0].distance_to(&Point::new(100.0, 110.0)) < 1e-6);
}
