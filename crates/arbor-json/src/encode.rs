use crate::{ATTRIBUTES_KEY, CHILDREN_KEY};
use arbor_archive::{ArchiveError, ArchiveResult, MAX_DEPTH};
use arbor_val::{Container, Value};
use serde_json::{Map, Number, Value as JsonValue};

pub(crate) fn encode_document(container: &Container, root_name: &str) -> ArchiveResult<JsonValue> {
    let mut doc = Map::new();
    doc.insert(root_name.to_string(), encode_node(root_name, container, 0)?);
    Ok(JsonValue::Object(doc))
}

fn encode_node(name: &str, container: &Container, depth: usize) -> ArchiveResult<JsonValue> {
    if depth > MAX_DEPTH {
        return Err(ArchiveError::Unrepresentable {
            name: name.to_string(),
            reason: format!("nested deeper than {} levels", MAX_DEPTH),
        });
    }
    let mut node = Map::new();

    if container.attribute_count() > 0 {
        let mut attrs = Map::new();
        for (k, v) in container.attributes() {
            attrs.insert(k.to_string(), encode_value(k, v)?);
        }
        node.insert(ATTRIBUTES_KEY.to_string(), JsonValue::Object(attrs));
    }

    if container.child_count() > 0 {
        let mut kids = Vec::with_capacity(container.child_count());
        for (name, kid) in container.kids() {
            let mut entry = Map::new();
            entry.insert(name.to_string(), encode_node(name, kid, depth + 1)?);
            kids.push(JsonValue::Object(entry));
        }
        node.insert(CHILDREN_KEY.to_string(), JsonValue::Array(kids));
    }

    Ok(JsonValue::Object(node))
}

fn encode_value(name: &str, value: &Value) -> ArchiveResult<JsonValue> {
    match value {
        Value::Bool(b) => Ok(JsonValue::Bool(*b)),
        Value::Int(i) => Ok(JsonValue::Number(Number::from(*i))),
        Value::Double(d) => Number::from_f64(*d)
            .map(JsonValue::Number)
            .ok_or_else(|| ArchiveError::Unrepresentable {
                name: name.to_string(),
                reason: format!("JSON has no literal for {}", d),
            }),
        Value::Text(s) => Ok(JsonValue::String(s.to_string())),
    }
}
