use crate::TYPES_NS;
use arbor_archive::{check_root, ArchiveError, ArchiveResult, MAX_DEPTH};
use arbor_val::{Container, Value, ValueKind};
use roxmltree::{Document, Node};

pub(crate) fn read_document(xml: &str, root_name: &str) -> ArchiveResult<Container> {
    let doc = Document::parse(xml).map_err(|e| ArchiveError::parse("XML", e.to_string()))?;
    let root = doc.root_element();
    match root.tag_name().namespace() {
        Some(ns) => {
            let found = format!("{{{}}}{}", ns, root.tag_name().name());
            return Err(ArchiveError::root_mismatch(root_name, found));
        }
        None => check_root(root_name, root.tag_name().name())?,
    }
    read_element(root, 0)
}

// Only type annotations may carry a namespace.
fn read_element(node: Node, depth: usize) -> ArchiveResult<Container> {
    let name = node.tag_name().name();
    if depth > MAX_DEPTH {
        return Err(ArchiveError::parse(
            "XML",
            format!("<{}>: nested deeper than {} levels", name, MAX_DEPTH),
        ));
    }
    tracing::trace!(name, depth, "reading element");

    // type annotations first, then the attributes they describe
    let mut kinds: Vec<(String, ValueKind)> = Vec::new();
    for attr in node.attributes().filter(|a| a.namespace() == Some(TYPES_NS)) {
        let kind = attr.value().parse::<ValueKind>().map_err(|k| {
            ArchiveError::parse(
                "XML",
                format!("<{}>: unknown type {:?} for attribute {:?}", name, k, attr.name()),
            )
        })?;
        kinds.push((attr.name().to_string(), kind));
    }

    let mut container = Container::new();
    for attr in node.attributes().filter(|a| a.namespace() != Some(TYPES_NS)) {
        if let Some(ns) = attr.namespace() {
            return Err(ArchiveError::parse(
                "XML",
                format!("<{}>: attribute {:?} in foreign namespace {}", name, attr.name(), ns),
            ));
        }
        let kind = match kinds.iter().position(|(n, _)| n == attr.name()) {
            Some(i) => kinds.swap_remove(i).1,
            None => ValueKind::Text,
        };
        let value = Value::parse_as(kind, attr.value()).ok_or_else(|| {
            ArchiveError::parse(
                "XML",
                format!(
                    "<{}>: attribute {:?} is not a valid {}: {:?}",
                    name,
                    attr.name(),
                    kind,
                    attr.value()
                ),
            )
        })?;
        container.set_attribute(attr.name(), value);
    }
    if let Some((orphan, _)) = kinds.first() {
        return Err(ArchiveError::parse(
            "XML",
            format!("<{}>: type annotation for missing attribute {:?}", name, orphan),
        ));
    }

    for kid in node.children() {
        if kid.is_element() {
            if let Some(ns) = kid.tag_name().namespace() {
                return Err(ArchiveError::parse(
                    "XML",
                    format!("<{}>: child {:?} in namespace {}", name, kid.tag_name().name(), ns),
                ));
            }
            container.add_child(kid.tag_name().name(), read_element(kid, depth + 1)?);
        } else if kid.is_text() && kid.text().is_some_and(|t| !t.trim().is_empty()) {
            tracing::warn!(element = name, "ignoring text content");
        }
    }
    Ok(container)
}
