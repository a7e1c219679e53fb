//! The nested tree every source resolves into.
//!
//! A tree is a root [`Branch`] whose children are [`Node`]s. Paths are dotted
//! strings (`"key.alg"`) split on `.` and walked from the root on every lookup.
//!
//! Writes are last-write-wins *structurally*: a leaf written where a branch
//! lives replaces the whole branch, and a path that needs a branch where a leaf
//! lives replaces the leaf with a fresh branch.
//!
//! The `from_*` conversions are the decode boundary for documents. They
//! normalise scalar map keys to strings, drop null map values, reject null
//! sequence elements, and unwrap YAML tags.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Serialize, Serializer};

use crate::scalar::Scalar;

/// Named children of a branch node.
pub type Branch = BTreeMap<String, Node>;

#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Leaf(Scalar),
    Branch(Branch),
    /// Sequences only come from documents; the command line never builds one.
    List(Vec<Node>),
}

impl Default for Node {
    fn default() -> Self {
        Node::Branch(Branch::new())
    }
}

impl Node {
    pub fn kind(&self) -> &'static str {
        match self {
            Node::Leaf(scalar) => scalar.kind(),
            Node::Branch(_) => "branch",
            Node::List(_) => "list",
        }
    }

    pub fn as_branch(&self) -> Option<&Branch> {
        match self {
            Node::Branch(branch) => Some(branch),
            _ => None,
        }
    }

    /// Walk a dotted path. `None` if a segment is missing or the walk reaches a
    /// leaf or list before the path is exhausted.
    pub fn lookup(&self, path: &str) -> Option<&Node> {
        path.split('.').try_fold(self, |node, segment| match node {
            Node::Branch(branch) => branch.get(segment),
            _ => None,
        })
    }

    /// Write `value` at a dotted path, creating or replacing intermediate
    /// branches as needed.
    pub fn insert_path(&mut self, path: &str, value: Node) {
        let segments: Vec<&str> = path.split('.').collect();
        insert_segments(self, &segments, value);
    }
}

fn insert_segments(node: &mut Node, segments: &[&str], value: Node) {
    let Some((first, rest)) = segments.split_first() else {
        *node = value;
        return;
    };
    if !matches!(node, Node::Branch(_)) {
        *node = Node::default();
    }
    if let Node::Branch(branch) = node {
        if rest.is_empty() {
            branch.insert(first.to_string(), value);
        } else {
            let child = branch.entry(first.to_string()).or_default();
            insert_segments(child, rest, value);
        }
    }
}

/// Merge the children of `overlay` into `base`, recursing only where both
/// branches hold a branch under the same key.
pub fn deep_merge(mut base: Branch, overlay: Branch) -> Branch {
    for (key, node) in overlay {
        let merged = match (base.remove(&key), node) {
            (Some(Node::Branch(lower)), Node::Branch(upper)) => {
                Node::Branch(deep_merge(lower, upper))
            }
            (_, upper) => upper,
        };
        base.insert(key, merged);
    }
    base
}

impl Serialize for Node {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Node::Leaf(scalar) => scalar.serialize(serializer),
            Node::Branch(branch) => serializer.collect_map(branch),
            Node::List(items) => serializer.collect_seq(items),
        }
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Leaf(scalar) => write!(f, "{scalar}"),
            Node::Branch(branch) => {
                f.write_str("{")?;
                for (i, (key, child)) in branch.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{key}: {child}")?;
                }
                f.write_str("}")
            }
            Node::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
        }
    }
}

impl From<Scalar> for Node {
    fn from(scalar: Scalar) -> Self {
        Node::Leaf(scalar)
    }
}

// -- Decode boundary ----------------------------------------------------------

pub(crate) fn from_toml(value: toml::Value) -> Node {
    match value {
        toml::Value::String(s) => Node::Leaf(Scalar::Str(s)),
        toml::Value::Integer(i) => Node::Leaf(Scalar::Int(i)),
        toml::Value::Float(x) => Node::Leaf(Scalar::Float(x)),
        toml::Value::Boolean(b) => Node::Leaf(Scalar::Bool(b)),
        toml::Value::Datetime(dt) => Node::Leaf(Scalar::Str(dt.to_string())),
        toml::Value::Array(items) => Node::List(items.into_iter().map(from_toml).collect()),
        toml::Value::Table(table) => Node::Branch(
            table
                .into_iter()
                .map(|(key, value)| (key, from_toml(value)))
                .collect(),
        ),
    }
}

/// A sequence element was null. The tree has no null leaf, and dropping the
/// element would shift every later index, so the document is rejected.
pub(crate) const NULL_IN_SEQUENCE: &str = "null element in sequence";

/// `Ok(None)` for YAML null, which the tree treats as absent.
pub(crate) fn from_yaml(value: serde_yaml::Value) -> Result<Option<Node>, &'static str> {
    use serde_yaml::Value;

    let node = match value {
        Value::Null => return Ok(None),
        Value::Bool(b) => Node::Leaf(Scalar::Bool(b)),
        Value::Number(n) => Node::Leaf(yaml_number(&n)),
        Value::String(s) => Node::Leaf(Scalar::Str(s)),
        Value::Sequence(items) => Node::List(
            items
                .into_iter()
                .map(|item| from_yaml(item)?.ok_or(NULL_IN_SEQUENCE))
                .collect::<Result<_, _>>()?,
        ),
        Value::Mapping(mapping) => {
            let mut branch = Branch::new();
            for (key, value) in mapping {
                let Some(key) = yaml_key(&key) else {
                    tracing::debug!(?key, "dropping non-scalar mapping key");
                    continue;
                };
                if let Some(node) = from_yaml(value)? {
                    branch.insert(key, node);
                }
            }
            Node::Branch(branch)
        }
        Value::Tagged(tagged) => return from_yaml(tagged.value),
    };
    Ok(Some(node))
}

fn yaml_number(n: &serde_yaml::Number) -> Scalar {
    if let Some(i) = n.as_i64() {
        Scalar::Int(i)
    } else {
        // u64 beyond i64::MAX, or a real float.
        Scalar::Float(n.as_f64().unwrap_or(f64::NAN))
    }
}

fn yaml_key(key: &serde_yaml::Value) -> Option<String> {
    use serde_yaml::Value;

    match key {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Tagged(tagged) => yaml_key(&tagged.value),
        Value::Null | Value::Sequence(_) | Value::Mapping(_) => None,
    }
}

/// `Ok(None)` for JSON null, which the tree treats as absent.
pub(crate) fn from_json(value: serde_json::Value) -> Result<Option<Node>, &'static str> {
    use serde_json::Value;

    let node = match value {
        Value::Null => return Ok(None),
        Value::Bool(b) => Node::Leaf(Scalar::Bool(b)),
        Value::Number(n) => Node::Leaf(match n.as_i64() {
            Some(i) => Scalar::Int(i),
            None => Scalar::Float(n.as_f64().unwrap_or(f64::NAN)),
        }),
        Value::String(s) => Node::Leaf(Scalar::Str(s)),
        Value::Array(items) => Node::List(
            items
                .into_iter()
                .map(|item| from_json(item)?.ok_or(NULL_IN_SEQUENCE))
                .collect::<Result<_, _>>()?,
        ),
        Value::Object(object) => {
            let mut branch = Branch::new();
            for (key, value) in object {
                if let Some(node) = from_json(value)? {
                    branch.insert(key, node);
                }
            }
            Node::Branch(branch)
        }
    };
    Ok(Some(node))
}
