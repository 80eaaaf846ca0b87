use std::sync::Arc;

use parking_lot::Mutex;
use serde_json::json;
use storeplan_core::{
    AppEvent, Axis, EditorFlavor, EventBus, EventBusConfig, EventCategory, EventFilter,
    FixtureId, LayoutEvent, SelectionEvent,
};
use storeplan_designer::viewport::Viewport;
use storeplan_designer::{
    edge_item_key, EditMode, HitTarget, LayoutSession, MemoryBackend, Point, SessionOptions,
};

fn session_with_bus() -> (LayoutSession, Arc<EventBus>) {
    let bus = Arc::new(EventBus::with_config(EventBusConfig {
        enable_history: true,
        ..EventBusConfig::default()
    }));
    (LayoutSession::default().with_event_bus(bus.clone()), bus)
}

#[test]
fn test_session_publishes_layout_events() {
    let (mut session, bus) = session_with_bus();
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = seen.clone();
    bus.subscribe(EventFilter::Categories(vec![EventCategory::Layout]), move |event| {
        sink.lock().push(event);
    });

    let id = session.add_fixture();
    session.set_name(&id, "Produce").unwrap();
    session.delete_fixture(Some(&id)).unwrap();

    let seen = seen.lock();
    assert_eq!(
        *seen,
        vec![
            AppEvent::Layout(LayoutEvent::FixtureAdded { id: id.clone() }),
            AppEvent::Layout(LayoutEvent::FixtureUpdated { id: id.clone() }),
            AppEvent::Layout(LayoutEvent::FixtureRemoved { id }),
        ]
    );
}

#[test]
fn test_edge_selection_event_carries_item_key() {
    let (mut session, bus) = session_with_bus();
    let id = session.add_fixture();
    session.select_fixture(&id).unwrap();
    session.set_mode(EditMode::Edit);
    session.select_edge(1).unwrap();

    let last = bus.history().pop().unwrap();
    assert_eq!(
        last,
        AppEvent::Selection(SelectionEvent::EdgeSelected {
            index: Some(1),
            item_key: Some(format!("{}-edge-1", id)),
        })
    );
}

#[test]
fn test_rejected_edit_publishes_nothing() {
    let (mut session, bus) = session_with_bus();
    let id = session.add_fixture();
    let before = bus.history().len();
    assert!(session.set_position(&id, Axis::Y, f64::NAN).is_err());
    assert_eq!(bus.history().len(), before);
}

#[test]
fn test_render_views_follow_mode() {
    let mut session = LayoutSession::default();
    let id = session.add_fixture();
    session.select_fixture(&id).unwrap();
    assert!(session.render_views()[0].nodes.is_empty());

    session.set_mode(EditMode::Edit);
    let views = session.render_views();
    assert_eq!(views[0].nodes.len(), 3);
    assert_eq!(views[0].edges.len(), 3);
    assert!(views[0].is_selected);
}

#[test]
fn test_click_through_viewport_selects_node() {
    let mut session = LayoutSession::default();
    let id = session.add_fixture();
    session.select_fixture(&id).unwrap();
    session.set_mode(EditMode::Edit);

    let mut viewport = Viewport::default();
    viewport.set_zoom(2.0);
    viewport.set_pan(-400.0, -300.0);

    let node = session.fixture(&id).unwrap().absolute_nodes()[2];
    let (px, py) = viewport.world_to_screen(node);
    let world = viewport.screen_to_world(px + 1.0, py - 1.0);

    let hit = session.click_at(world).unwrap();
    assert_eq!(hit, Some(HitTarget::Node { id, index: 2 }));
    assert_eq!(session.selection().selected_node(), Some(2));
}

#[test]
fn test_undo_redo_chain() {
    let mut session = LayoutSession::default();
    let id = session.add_fixture();
    session.move_fixture(&id, 10.0, 20.0).unwrap();
    session.set_color(&id, "#abcdef").unwrap();
    assert_eq!(session.undo_name(), Some("Change Color"));

    session.undo().unwrap();
    session.undo().unwrap();
    let f = session.fixture(&id).unwrap();
    assert_eq!(f.position(), Point::new(500.0, 500.0));
    assert_eq!(f.fill, "lightgreen");

    session.redo().unwrap();
    assert_eq!(session.fixture(&id).unwrap().position(), Point::new(10.0, 20.0));
    assert!(session.can_redo());

    session.set_name(&id, "Checkout").unwrap();
    assert!(!session.can_redo());
}

fn stocked_rectangle() -> (LayoutSession, FixtureId) {
    let mut session = LayoutSession::new(SessionOptions {
        flavor: EditorFlavor::Rectangle,
        ..SessionOptions::default()
    });
    let id = session.add_fixture();
    for edge in 0..4 {
        session
            .item_map_mut()
            .insert(edge_item_key(&id, edge), json!([format!("sku-{}", edge)]));
    }
    session.select_fixture(&id).unwrap();
    session.set_mode(EditMode::Edit);
    (session, id)
}

#[test]
fn test_items_follow_edges_through_node_delete_and_save() {
    let (mut session, id) = stocked_rectangle();
    session.select_node(1).unwrap();
    session.delete_selected_node().unwrap();
    session.save(&MemoryBackend::new()).unwrap();

    let items = session.item_map();
    assert_eq!(items.len(), 3);
    assert_eq!(items[&edge_item_key(&id, 0)], json!(["sku-0", "sku-1"]));
    assert_eq!(items[&edge_item_key(&id, 1)], json!(["sku-2"]));
    assert_eq!(items[&edge_item_key(&id, 2)], json!(["sku-3"]));
}

#[test]
fn test_items_follow_edges_through_add_node() {
    let (mut session, id) = stocked_rectangle();
    let fixture = session.fixture(&id).unwrap().clone();
    let old_edge_2 = fixture.edge(2).unwrap();

    session.select_edge(1).unwrap();
    session.add_node_to_selected_edge().unwrap();
    session.save(&MemoryBackend::new()).unwrap();

    let fixture = session.fixture(&id).unwrap();
    assert_eq!(fixture.edge(3).unwrap(), old_edge_2);
    let items = session.item_map();
    assert_eq!(items.len(), 4);
    assert_eq!(items[&edge_item_key(&id, 1)], json!(["sku-1"]));
    assert!(!items.contains_key(&edge_item_key(&id, 2)));
    assert_eq!(items[&edge_item_key(&id, 3)], json!(["sku-2"]));
    assert_eq!(items[&edge_item_key(&id, 4)], json!(["sku-3"]));
}

#[test]
fn test_undo_node_delete_restores_items() {
    let (mut session, id) = stocked_rectangle();
    let before = session.item_map().clone();
    session.select_node(3).unwrap();
    session.delete_selected_node().unwrap();
    assert_eq!(session.item_map()[&edge_item_key(&id, 2)], json!(["sku-2", "sku-3"]));

    session.undo().unwrap();
    assert_eq!(session.item_map(), &before);
    assert_eq!(session.fixture(&id).unwrap().node_count(), 4);
}
