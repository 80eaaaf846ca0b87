//! Keys into the per-edge product grid.
//!
//! The grid itself lives outside the editor; the layout file only carries it
//! through as an opaque JSON object.

use serde_json::Value;
use storeplan_core::FixtureId;

/// Opaque item-map payload stored alongside the fixtures.
pub type ItemMap = serde_json::Map<String, Value>;

/// Item-map key for one fixture edge: `"{fixtureId}-edge-{edgeIndex}"`.
pub fn edge_item_key(id: &FixtureId, edge: usize) -> String {
    format!("{}-edge-{}", id, edge)
}

/// Drops item-map entries that point at edges of `id` at or beyond
/// `edge_count`. Returns the removed keys.
pub fn prune_edges(map: &mut ItemMap, id: &FixtureId, edge_count: usize) -> Vec<String> {
    let prefix = format!("{}-edge-", id);
    let stale: Vec<String> = map
        .keys()
        .filter(|key| {
            key.strip_prefix(&prefix)
                .and_then(|rest| rest.parse::<usize>().ok())
                .is_some_and(|edge| edge >= edge_count)
        })
        .cloned()
        .collect();
    for key in &stale {
        map.remove(key);
    }
    stale
}

/// Item-map entries of `id` alone.
pub fn fixture_entries(map: &ItemMap, id: &FixtureId) -> ItemMap {
    let prefix = format!("{}-edge-", id);
    map.iter()
        .filter(|(key, _)| key.starts_with(&prefix))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}

/// Replaces every entry of `id` with `entries`.
pub fn replace_fixture_entries(map: &mut ItemMap, id: &FixtureId, entries: &ItemMap) {
    remove_fixture(map, id);
    map.extend(entries.iter().map(|(key, value)| (key.clone(), value.clone())));
}

/// Renumbers entries after edge `edge` of `id` was split in two. The
/// entry on the split edge stays with its first half.
pub fn shift_after_edge_split(map: &mut ItemMap, id: &FixtureId, edge: usize) -> bool {
    let entries = take_edges(map, id);
    let changed = entries.iter().any(|(index, _)| *index > edge);
    for (index, value) in entries {
        let index = if index > edge { index + 1 } else { index };
        map.insert(edge_item_key(id, index), value);
    }
    changed
}

/// Renumbers entries after node `node` of a `node_count`-node outline of
/// `id` was deleted. The two edges that met at the node become one; their
/// entries are merged in travel order.
pub fn merge_after_node_delete(
    map: &mut ItemMap,
    id: &FixtureId,
    node: usize,
    node_count: usize,
) -> bool {
    if node_count < 2 || node >= node_count {
        return false;
    }
    let prev = (node + node_count - 1) % node_count;
    let merged = if node == 0 { node_count - 2 } else { node - 1 };

    let mut entries = take_edges(map, id);
    if entries.is_empty() {
        return false;
    }
    entries.sort_by_key(|(index, _)| match *index {
        i if i == prev => 0,
        i if i == node => 1,
        _ => 2,
    });
    for (index, value) in entries {
        let index = if index == prev || index == node {
            merged
        } else if index > node {
            index - 1
        } else {
            index
        };
        insert_merged(map, edge_item_key(id, index), value);
    }
    true
}

fn insert_merged(map: &mut ItemMap, key: String, value: Value) {
    match map.get_mut(&key) {
        Some(Value::Array(existing)) => match value {
            Value::Array(more) => existing.extend(more),
            other => existing.push(other),
        },
        Some(_) => tracing::warn!("Item-map entry {} kept, merged entry dropped", key),
        None => {
            map.insert(key, value);
        }
    }
}

/// Removes the numbered edge entries of `id`, sorted by edge index.
fn take_edges(map: &mut ItemMap, id: &FixtureId) -> Vec<(usize, Value)> {
    let prefix = format!("{}-edge-", id);
    let keys: Vec<(usize, String)> = map
        .keys()
        .filter_map(|key| {
            let index = key.strip_prefix(&prefix)?.parse::<usize>().ok()?;
            Some((index, key.clone()))
        })
        .collect();
    let mut entries: Vec<(usize, Value)> = keys
        .into_iter()
        .filter_map(|(index, key)| map.remove(&key).map(|value| (index, value)))
        .collect();
    entries.sort_by_key(|(index, _)| *index);
    entries
}

/// Drops every item-map entry of a removed fixture.
pub fn remove_fixture(map: &mut ItemMap, id: &FixtureId) -> usize {
    let prefix = format!("{}-edge-", id);
    let before = map.len();
    map.retain(|key, _| !key.starts_with(&prefix));
    before - map.len()
}
