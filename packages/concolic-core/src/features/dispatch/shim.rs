//! Outbound token substitution and inbound restoration

use std::collections::BTreeMap;

use super::form::FormData;
use crate::features::value_bridge::SymbolicBridge;
use crate::shared::models::Value;

/// Swap every symbolic field for its token; concrete fields pass through.
pub fn build_post_data(
    bridge: &SymbolicBridge,
    fields: &BTreeMap<String, Value>,
) -> BTreeMap<String, Value> {
    fields
        .iter()
        .map(|(key, value)| (key.clone(), bridge.encode(value)))
        .collect()
}

/// Restore symbolic values in parsed form data.
///
/// Only a field holding exactly one token is restored. A token inside a
/// longer list is left as a plain string.
pub fn parse_post_data(bridge: &SymbolicBridge, raw: &FormData<String>) -> FormData<Value> {
    let mut parsed = FormData::new();
    for (key, values) in raw.iter_lists() {
        let restored = match values {
            [single] if bridge.is_token(single) => vec![bridge.decode(single)],
            _ => values.iter().map(|v| Value::Str(v.clone())).collect(),
        };
        parsed.set_list(key, restored);
    }
    parsed
}
