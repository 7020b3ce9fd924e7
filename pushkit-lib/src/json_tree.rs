//! Path-addressed edits on a JSON tree, with Realtime Database semantics.
//!
//! Paths are `/`-separated; empty segments are ignored so `""` and `"/"`
//! both address the root. Writing `null` deletes, and objects left without
//! children are pruned.

use serde_json::{Map, Value};

pub(crate) fn segments(path: &str) -> Vec<&str> {
    path.split('/').filter(|s| !s.is_empty()).collect()
}

pub(crate) fn lookup<'a>(root: &'a Value, path: &[&str]) -> Option<&'a Value> {
    path.iter().try_fold(root, |node, key| node.get(*key))
}

/// Write `value` at `path`. A `null` value removes the node instead.
pub(crate) fn set(root: &mut Value, path: &[&str], value: Value) {
    if value.is_null() {
        remove(root, path);
    } else {
        insert(root, path, value);
    }
}

fn insert(node: &mut Value, path: &[&str], value: Value) {
    let Some((first, rest)) = path.split_first() else {
        *node = value;
        return;
    };

    if !node.is_object() {
        *node = Value::Object(Map::new());
    }
    if let Value::Object(children) = node {
        let child = children
            .entry((*first).to_string())
            .or_insert_with(|| Value::Object(Map::new()));
        insert(child, rest, value);
    }
}

/// Remove the node at `path`. Returns true if `node` is now empty.
pub(crate) fn remove(node: &mut Value, path: &[&str]) -> bool {
    let Some((first, rest)) = path.split_first() else {
        *node = Value::Object(Map::new());
        return true;
    };

    if let Value::Object(children) = node {
        let now_empty = match children.get_mut(*first) {
            Some(_) if rest.is_empty() => true,
            Some(child) => remove(child, rest),
            None => false,
        };
        if now_empty {
            children.remove(*first);
        }
        return children.is_empty();
    }
    false
}

/// True for `null` and for objects without children.
pub(crate) fn is_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Object(children) => children.is_empty(),
        _ => false,
    }
}
