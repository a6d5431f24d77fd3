use serde_json::Value;

/// Deepest nesting level of `value`, where the root sits at `depth`.
///
/// Scalars return the depth they were reached at; containers return the
/// maximum over their members, or their own depth when empty.
pub fn json_depth(value: &Value, depth: usize) -> usize {
    match value {
        Value::Object(map) => map
            .values()
            .map(|member| json_depth(member, depth + 1))
            .fold(depth, usize::max),
        Value::Array(items) => items
            .iter()
            .map(|item| json_depth(item, depth + 1))
            .fold(depth, usize::max),
        _ => depth,
    }
}

/// Total number of nodes, containers and leaves, including the root.
pub fn json_size(value: &Value) -> usize {
    match value {
        Value::Object(map) => 1 + map.values().map(json_size).sum::<usize>(),
        Value::Array(items) => 1 + items.iter().map(json_size).sum::<usize>(),
        _ => 1,
    }
}
