use crate::{ATTRIBUTES_KEY, CHILDREN_KEY};
use arbor_archive::{check_root, ArchiveError, ArchiveResult, MAX_DEPTH};
use arbor_val::{Container, Value};
use serde_json::Value as JsonValue;

fn error(message: impl Into<String>) -> ArchiveError {
    ArchiveError::parse("JSON", message)
}

pub(crate) fn decode_document(json: &str, root_name: &str) -> ArchiveResult<Container> {
    let doc: JsonValue = serde_json::from_str(json).map_err(|e| error(e.to_string()))?;
    let doc = match doc {
        JsonValue::Object(map) => map,
        _ => return Err(error("top level must be an object")),
    };
    if doc.len() != 1 {
        return Err(error(format!(
            "top level must hold exactly one root, found {} keys",
            doc.len()
        )));
    }
    let (name, node) = match doc.iter().next() {
        Some(entry) => entry,
        None => return Err(error("missing root")),
    };
    check_root(root_name, name)?;
    decode_node(name, node, 0)
}

fn decode_node(path: &str, node: &JsonValue, depth: usize) -> ArchiveResult<Container> {
    if depth > MAX_DEPTH {
        return Err(error(format!("{}: nested deeper than {} levels", path, MAX_DEPTH)));
    }
    tracing::trace!(path, depth, "decoding node");
    let node = node
        .as_object()
        .ok_or_else(|| error(format!("{}: node must be an object", path)))?;

    let mut container = Container::new();
    for (key, item) in node {
        match key.as_str() {
            ATTRIBUTES_KEY => {
                let attrs = item
                    .as_object()
                    .ok_or_else(|| error(format!("{}: attributes must be an object", path)))?;
                for (name, value) in attrs {
                    container.set_attribute(name.as_str(), decode_value(path, name, value)?);
                }
            }
            CHILDREN_KEY => {
                let kids = item
                    .as_array()
                    .ok_or_else(|| error(format!("{}: children must be an array", path)))?;
                for entry in kids {
                    let (kid_name, kid) = match entry.as_object() {
                        Some(map) if map.len() == 1 => map.iter().next(),
                        _ => None,
                    }
                    .ok_or_else(|| {
                        error(format!("{}: each child must be a single-key object", path))
                    })?;
                    let kid_path = format!("{}/{}", path, kid_name);
                    container.add_child(kid_name.as_str(), decode_node(&kid_path, kid, depth + 1)?);
                }
            }
            other => return Err(error(format!("{}: unexpected key {:?}", path, other))),
        }
    }
    Ok(container)
}

fn decode_value(path: &str, name: &str, value: &JsonValue) -> ArchiveResult<Value> {
    match value {
        JsonValue::Bool(b) => Ok(Value::Bool(*b)),
        JsonValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(Value::Int(i))
            } else if n.is_f64() {
                n.as_f64()
                    .map(Value::Double)
                    .ok_or_else(|| error(format!("{}: bad number for {:?}", path, name)))
            } else {
                Err(error(format!(
                    "{}: integer {} for {:?} does not fit in 64 signed bits",
                    path, n, name
                )))
            }
        }
        JsonValue::String(s) => Ok(Value::str(s.as_str())),
        other => Err(error(format!(
            "{}: attribute {:?} must be a boolean, number or string, found {}",
            path, name, other
        ))),
    }
}
