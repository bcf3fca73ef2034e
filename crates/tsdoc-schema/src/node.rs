//! Schema nodes: the resolved, serializable form of a type expression.
//!
//! A [`SchemaNode`] keeps the structural keys (`type`, `subtype`, `children`,
//! `union`) as typed fields and carries everything contributed by
//! documentation or defaults in its [`Attributes`]. When serialized, the
//! structural keys are written first and the attributes are flattened after
//! them, so neither can shadow the other.

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

/// Resolved fields of an interface or object literal, in declaration order.
pub type Fields = IndexMap<String, SchemaNode>;

/// Resolved schema of a module: exported interface name to its fields.
pub type Schema = IndexMap<String, Fields>;

/// Keys owned by the node structure; annotations may not set them.
const STRUCTURAL_KEYS: &[&str] = &["type", "subtype", "children", "union", "cyclic"];

/// Property attributes merged onto a resolved node.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Attributes {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub readonly: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    /// Free-form annotation keys, in the order they were first set.
    #[serde(flatten)]
    pub extra: IndexMap<String, Value>,
}

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an annotation by key. A later value for the same key replaces the
    /// earlier one.
    ///
    /// `description`, `required`, `readonly` and `default` land in their typed
    /// fields; values of the wrong shape for those keys are discarded, as are
    /// keys reserved for the node structure.
    pub fn set(&mut self, key: &str, value: Value) {
        match (key, value) {
            ("description", Value::String(text)) => self.description = Some(text),
            ("required", Value::Bool(flag)) => self.required = Some(flag),
            ("readonly", Value::Bool(flag)) => self.readonly = Some(flag),
            ("default", value) => self.default = Some(value),
            (key @ ("description" | "required" | "readonly"), value) => {
                debug!(key, %value, "ignoring annotation with mismatched value");
            }
            (key, _) if STRUCTURAL_KEYS.contains(&key) => {
                debug!(key, "ignoring annotation that collides with a structural key");
            }
            (key, value) => {
                self.extra.insert(key.to_string(), value);
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.extra.get(key)
    }

    pub fn is_empty(&self) -> bool {
        self.description.is_none()
            && self.required.is_none()
            && self.readonly.is_none()
            && self.default.is_none()
            && self.extra.is_empty()
    }
}

/// Nested content of an `object` or `array` node.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Children {
    Element(Box<SchemaNode>),
    Fields(Fields),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SchemaNode {
    /// A primitive keyword, `object`, `array`, `union`, or the name of an
    /// unresolved type.
    #[serde(rename = "type")]
    pub ty: String,
    /// Name of the type alias this node was reached through.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtype: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub children: Option<Children>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub union: Option<Vec<SchemaNode>>,
    /// Set on the node that stands in for a type already being expanded.
    #[serde(skip_serializing_if = "is_false")]
    pub cyclic: bool,
    #[serde(flatten)]
    pub attrs: Attributes,
}

fn is_false(flag: &bool) -> bool {
    !*flag
}

impl SchemaNode {
    fn bare(ty: impl Into<String>, attrs: Attributes) -> Self {
        Self {
            ty: ty.into(),
            subtype: None,
            children: None,
            union: None,
            cyclic: false,
            attrs,
        }
    }

    /// A primitive or opaque named type.
    pub fn leaf(ty: impl Into<String>, attrs: Attributes) -> Self {
        Self::bare(ty, attrs)
    }

    pub fn array(element: SchemaNode, attrs: Attributes) -> Self {
        Self {
            children: Some(Children::Element(Box::new(element))),
            ..Self::bare("array", attrs)
        }
    }

    pub fn object(fields: Fields, attrs: Attributes) -> Self {
        Self {
            children: Some(Children::Fields(fields)),
            ..Self::bare("object", attrs)
        }
    }

    /// A union of the resolved members. The union node itself carries no
    /// attributes; they live on each member.
    pub fn union(members: Vec<SchemaNode>) -> Self {
        Self {
            union: Some(members),
            ..Self::bare("union", Attributes::default())
        }
    }

    /// A back-reference to a type that is already being expanded.
    pub fn cyclic(ty: impl Into<String>, attrs: Attributes) -> Self {
        Self {
            cyclic: true,
            ..Self::bare(ty, attrs)
        }
    }

    pub fn with_subtype(mut self, subtype: impl Into<String>) -> Self {
        self.subtype = Some(subtype.into());
        self
    }

    /// Fields of an `object` node.
    pub fn fields(&self) -> Option<&Fields> {
        match &self.children {
            Some(Children::Fields(fields)) => Some(fields),
            _ => None,
        }
    }

    /// Element of an `array` node.
    pub fn element(&self) -> Option<&SchemaNode> {
        match &self.children {
            Some(Children::Element(element)) => Some(element),
            _ => None,
        }
    }
}
