//! Resolved schema IR
//!
//! `SchemaNode` is the structural representation of one schema, independent
//! of raw input syntax. Nodes are shared: the global table is an arena keyed
//! by canonical name, and every cross-reference is a clone of the same `Rc`,
//! never a deep copy. That is what makes cyclic schema sets representable:
//! a cycle is just two table entries pointing at each other.

use indexmap::IndexMap;
use std::cell::RefCell;
use std::collections::BTreeSet;
use std::rc::Rc;

use crate::names::sanitize_class_name;

/// Shared handle to a schema node
pub type SchemaNodeRef = Rc<RefCell<SchemaNode>>;

/// Primary JSON type of a schema. The raw `"null"` type never appears here;
/// it normalizes into `SchemaNode::is_nullable`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JsonType {
    String,
    Integer,
    Number,
    Boolean,
    Object,
    Array,
}

impl JsonType {
    pub fn from_keyword(s: &str) -> Option<Self> {
        match s {
            "string" => Some(Self::String),
            "integer" => Some(Self::Integer),
            "number" => Some(Self::Number),
            "boolean" => Some(Self::Boolean),
            "object" => Some(Self::Object),
            "array" => Some(Self::Array),
            _ => None,
        }
    }
}

/// Resolved `additionalProperties`
#[derive(Debug, Clone)]
pub enum AdditionalProperties {
    /// Boolean form: open (`true`) or closed (`false`) object
    Allowed(bool),
    /// Schema form: typed map values
    Schema(SchemaNodeRef),
}

/// The resolved, structural representation of one schema
#[derive(Debug, Clone, Default)]
pub struct SchemaNode {
    /// Canonical name, present for named/top-level/promoted schemas
    pub name: Option<String>,

    /// Synthesized `Parent.property` hint for inline children; gives the
    /// object resolver's promotion a stable key without naming the node
    pub context_name: Option<String>,

    pub ty: Option<JsonType>,
    pub format: Option<String>,
    pub description: Option<String>,

    pub properties: IndexMap<String, SchemaNodeRef>,
    pub required: BTreeSet<String>,
    pub items: Option<SchemaNodeRef>,
    pub enum_values: Option<Vec<serde_json::Value>>,
    pub additional_properties: Option<AdditionalProperties>,

    pub any_of: Option<Vec<SchemaNodeRef>>,
    pub one_of: Option<Vec<SchemaNodeRef>>,
    pub all_of: Option<Vec<SchemaNodeRef>>,

    /// Derived nullability; never taken verbatim from a single keyword
    pub is_nullable: bool,

    /// No raw target was found for a `$ref` to this node
    pub unresolved_reference: bool,

    /// Resolving this node re-entered itself (named cycle or depth guard)
    pub circular: bool,
    /// Diagnostic trail for circular nodes, e.g. `"A -> B -> A"`
    pub circular_path: Option<String>,

    /// Object with exactly one required property named `data`
    pub is_data_wrapper: bool,
}

impl SchemaNode {
    /// Minimal placeholder carrying only a (sanitized) name
    pub fn placeholder(name: Option<&str>) -> Self {
        Self {
            name: name.map(sanitize_class_name),
            ..Self::default()
        }
    }

    /// Placeholder for a named cycle or exceeded depth bound
    pub fn circular_placeholder(name: Option<&str>, path: &str, description: &str) -> Self {
        Self {
            name: name.map(sanitize_class_name),
            ty: Some(JsonType::Object),
            description: Some(description.to_string()),
            circular: true,
            circular_path: Some(path.to_string()),
            unresolved_reference: true,
            ..Self::default()
        }
    }

    /// Placeholder for a `$ref` whose target does not exist
    pub fn unresolved(name: Option<&str>) -> Self {
        Self {
            name: name.map(sanitize_class_name),
            unresolved_reference: true,
            ..Self::default()
        }
    }

    /// True if the node is "just" a primitive or array wrapped in a name:
    /// no properties, no enum, no composition. Such nodes are emitted as
    /// aliases, and references to them may resolve structurally instead.
    pub fn is_alias_like(&self) -> bool {
        self.properties.is_empty()
            && self.enum_values.is_none()
            && self.any_of.is_none()
            && self.one_of.is_none()
            && self.all_of.is_none()
    }

    pub fn into_ref(self) -> SchemaNodeRef {
        Rc::new(RefCell::new(self))
    }
}

/// The global named-schema table: an arena keyed by canonical class name.
///
/// Interior-mutable because type resolution may register promoted schemas
/// while a traversal is in flight; promotion is an explicit `register` call,
/// never a hidden mutation.
#[derive(Debug, Default)]
pub struct SchemaIndex {
    inner: RefCell<IndexMap<String, SchemaNodeRef>>,
}

impl SchemaIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_table(table: IndexMap<String, SchemaNodeRef>) -> Self {
        Self {
            inner: RefCell::new(table),
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.inner.borrow().contains_key(name)
    }

    /// Look up a schema by canonical name, cloning the shared handle
    pub fn get(&self, name: &str) -> Option<SchemaNodeRef> {
        self.inner.borrow().get(name).cloned()
    }

    /// Register a (possibly promoted) schema under a canonical name
    pub fn register(&self, name: &str, node: SchemaNodeRef) {
        self.inner.borrow_mut().insert(name.to_string(), node);
    }

    /// Find a free name for promotion: the base itself, then base2, base3, ...
    pub fn unique_name(&self, base: &str) -> String {
        let table = self.inner.borrow();
        if !table.contains_key(base) {
            return base.to_string();
        }
        let mut counter = 2usize;
        loop {
            let candidate = format!("{}{}", base, counter);
            if !table.contains_key(&candidate) {
                return candidate;
            }
            counter += 1;
        }
    }

    pub fn len(&self) -> usize {
        self.inner.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.borrow().is_empty()
    }

    /// All canonical names, in registration order
    pub fn names(&self) -> Vec<String> {
        self.inner.borrow().keys().cloned().collect()
    }

    /// Snapshot of the table as (name, node) pairs, in registration order
    pub fn entries(&self) -> Vec<(String, SchemaNodeRef)> {
        self.inner
            .borrow()
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unique_name_retries_with_suffix() {
        let index = SchemaIndex::new();
        index.register("ParentChild", SchemaNode::placeholder(Some("ParentChild")).into_ref());
        index.register("ParentChild2", SchemaNode::placeholder(Some("ParentChild2")).into_ref());

        assert_eq!(index.unique_name("ParentChild"), "ParentChild3");
        assert_eq!(index.unique_name("Fresh"), "Fresh");
    }

    #[test]
    fn test_registry_shares_instances() {
        let index = SchemaIndex::new();
        let node = SchemaNode::placeholder(Some("Widget")).into_ref();
        index.register("Widget", node.clone());

        let fetched = index.get("Widget").unwrap();
        assert!(Rc::ptr_eq(&node, &fetched));
    }

    #[test]
    fn test_alias_like() {
        let mut node = SchemaNode::placeholder(Some("Id"));
        node.ty = Some(JsonType::String);
        assert!(node.is_alias_like());

        node.enum_values = Some(vec![serde_json::json!("a")]);
        assert!(!node.is_alias_like());
    }
}
