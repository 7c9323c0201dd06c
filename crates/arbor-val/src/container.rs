use crate::convert::FromValue;
use crate::{ArborStr, Value};
use indexmap::IndexMap;
use std::fmt;

/// One node of a persisted object tree.
///
/// A container holds named attribute values (unique names, insertion order
/// kept) and an ordered list of named child containers. Child names may
/// repeat; repeated names model a sequence. The container does not know its
/// own name: the root name is supplied by whoever saves or loads it, and
/// every other name lives in the parent's child list.
#[derive(Debug, Clone, Default)]
pub struct Container {
    attrs: IndexMap<ArborStr, Value>,
    kids: Vec<(ArborStr, Container)>,
}

impl Container {
    pub fn new() -> Self {
        Self {
            attrs: IndexMap::new(),
            kids: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.attrs.is_empty() && self.kids.is_empty()
    }

    pub fn attribute_count(&self) -> usize {
        self.attrs.len()
    }

    pub fn child_count(&self) -> usize {
        self.kids.len()
    }

    /// Inserts or overwrites an attribute. An overwritten attribute keeps
    /// its original position.
    pub fn set_attribute(&mut self, name: impl Into<ArborStr>, value: impl Into<Value>) {
        self.attrs.insert(name.into(), value.into());
    }

    pub fn with_attribute(mut self, name: impl Into<ArborStr>, value: impl Into<Value>) -> Self {
        self.set_attribute(name, value);
        self
    }

    pub fn get_attribute(&self, name: &str) -> Option<&Value> {
        self.attrs.get(name)
    }

    /// Typed read of an attribute; `None` when it is missing or does not
    /// convert exactly to `T`.
    pub fn get_attribute_as<T: FromValue>(&self, name: &str) -> Option<T> {
        self.get_attribute(name).and_then(T::from_value)
    }

    pub fn get_attribute_or<T: FromValue>(&self, name: &str, default: T) -> T {
        self.get_attribute_as(name).unwrap_or(default)
    }

    pub fn has_attribute(&self, name: &str) -> bool {
        self.attrs.contains_key(name)
    }

    pub fn remove_attribute(&mut self, name: &str) -> Option<Value> {
        self.attrs.shift_remove(name)
    }

    pub fn attributes(&self) -> impl Iterator<Item = (&ArborStr, &Value)> {
        self.attrs.iter()
    }

    /// Appends a child. Duplicate names are kept, in insertion order.
    pub fn add_child(&mut self, name: impl Into<ArborStr>, child: Container) {
        self.kids.push((name.into(), child));
    }

    pub fn with_child(mut self, name: impl Into<ArborStr>, child: Container) -> Self {
        self.add_child(name, child);
        self
    }

    /// All children called `name`, in order. Unknown names give an empty
    /// iterator; the iterator can be cloned to walk the children again.
    pub fn children<'a, 'n>(&'a self, name: &'n str) -> Children<'a, 'n> {
        Children {
            kids: self.kids.iter(),
            name,
        }
    }

    pub fn child(&self, name: &str) -> Option<&Container> {
        self.children(name).next()
    }

    pub fn kids(&self) -> impl Iterator<Item = (&ArborStr, &Container)> {
        self.kids.iter().map(|(name, kid)| (name, kid))
    }

    /// Number of containers in this subtree, including `self`.
    pub fn tree_size(&self) -> usize {
        1 + self.kids.iter().map(|(_, k)| k.tree_size()).sum::<usize>()
    }

    /// Indented outline of the subtree, one container per line.
    pub fn outline(&self, name: &str) -> String {
        let mut out = String::new();
        self.write_outline(&mut out, name, 0);
        out
    }

    fn write_outline(&self, out: &mut String, name: &str, depth: usize) {
        out.push_str(&"  ".repeat(depth));
        out.push_str(name);
        for (k, v) in self.attrs.iter() {
            out.push_str(&format!(" {}={}:{}", k, v.kind(), v));
        }
        out.push('\n');
        for (kid_name, kid) in self.kids.iter() {
            kid.write_outline(out, kid_name, depth + 1);
        }
    }
}

/// Iterator returned by [`Container::children`].
#[derive(Clone)]
pub struct Children<'a, 'n> {
    kids: std::slice::Iter<'a, (ArborStr, Container)>,
    name: &'n str,
}

impl<'a> Iterator for Children<'a, '_> {
    type Item = &'a Container;

    fn next(&mut self) -> Option<Self::Item> {
        let name = self.name;
        self.kids
            .by_ref()
            .find(|(kid_name, _)| kid_name.as_str() == name)
            .map(|(_, kid)| kid)
    }
}

/// Attribute order is part of a container's identity.
impl PartialEq for Container {
    fn eq(&self, other: &Self) -> bool {
        self.attrs.iter().eq(other.attrs.iter()) && self.kids == other.kids
    }
}

impl fmt::Display for Container {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{{")?;
        for (key, value) in self.attrs.iter() {
            write!(f, "{}: {}; ", key, value)?;
        }
        for (name, kid) in self.kids.iter() {
            write!(f, "{} {}; ", name, kid)?;
        }
        write!(f, "}}")
    }
}
