use proptest::prelude::*;
use storeplan_core::FixtureId;
use storeplan_designer::selection_manager::{EditMode, SelectionManager};

#[derive(Debug, Clone)]
enum Op {
    SelectFixture(u8),
    SelectEdge(usize),
    SelectNode(usize),
    DeselectEdge,
    DeselectNode,
    ClearAll,
    SetMode(bool),
    Clamp(usize),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0u8..3).prop_map(Op::SelectFixture),
        (0usize..8).prop_map(Op::SelectEdge),
        (0usize..8).prop_map(Op::SelectNode),
        Just(Op::DeselectEdge),
        Just(Op::DeselectNode),
        Just(Op::ClearAll),
        any::<bool>().prop_map(Op::SetMode),
        (3usize..8).prop_map(Op::Clamp),
    ]
}

const NODES: usize = 6;

proptest! {
    #[test]
    fn edge_and_node_never_both_selected(ops in prop::collection::vec(op(), 1..64)) {
        let mut m = SelectionManager::new();
        for op in ops {
            let before = m.clone();
            let result = match op {
                Op::SelectFixture(n) => {
                    m.select_fixture(FixtureId::from(format!("f{}", n)));
                    Ok(())
                }
                Op::SelectEdge(i) => m.select_edge(i, NODES),
                Op::SelectNode(i) => m.select_node(i, NODES),
                Op::DeselectEdge => {
                    m.deselect_edge();
                    Ok(())
                }
                Op::DeselectNode => {
                    m.deselect_node();
                    Ok(())
                }
                Op::ClearAll => {
                    m.clear_all();
                    Ok(())
                }
                Op::SetMode(edit) => {
                    m.set_mode(if edit { EditMode::Edit } else { EditMode::Object });
                    Ok(())
                }
                Op::Clamp(n) => {
                    m.clamp_to_node_count(n);
                    Ok(())
                }
            };

            prop_assert!(!(m.selected_edge().is_some() && m.selected_node().is_some()));
            if m.selected_fixture().is_none() {
                prop_assert!(m.selected_edge().is_none() && m.selected_node().is_none());
            }
            if m.mode() == EditMode::Object {
                prop_assert!(m.selected_edge().is_none() && m.selected_node().is_none());
            }
            if result.is_err() {
                prop_assert_eq!(m.state(), before.state());
            }
        }
    }
}
