use std::collections::{BTreeMap, HashMap};

use serde::Serialize;

/// Render one aggregate map as a single-line JSON object with sorted keys,
/// terminated by a newline.
pub fn dump_map<V: Serialize>(map: &HashMap<String, V>) -> String {
    let sorted: BTreeMap<&str, &V> = map.iter().map(|(k, v)| (k.as_str(), v)).collect();
    match serde_json::to_string(&sorted) {
        Ok(mut s) => {
            s.push('\n');
            s
        }
        Err(e) => format!("dump failed: {e}\n"),
    }
}
