//! Typed access to one node of a config tree.
//!
//! For simplicity every extraction is unified onto one Rust type per kind:
//!
//! | Kind | Rust type | Also accepted |
//! |------|-----------|---------------|
//! | String | `&str` | |
//! | Integer | `i64` | a string leaf in integer form (`"2048"`) |
//! | Float | `f64` | a string leaf in float form (`"13.5"`) |
//! | Boolean | `bool` | |
//!
//! Each kind comes in three flavours: `try_*` returns an `Option`, `to_*`
//! falls back to a default, and `must_*` panics. Use `must_*` only where a
//! missing or mistyped value is a bug in your own config schema.
//!
//! [`Value::unmarshal`] projects a whole subtree onto a `Deserialize` type.

use serde::de::DeserializeOwned;

use crate::error::ArgfigError;
use crate::scalar::{self, Scalar};
use crate::tree::Node;

/// A read-only view over a node, or over nothing when the path was not found.
#[derive(Debug, Clone, Copy)]
pub struct Value<'a> {
    node: Option<&'a Node>,
}

impl<'a> Value<'a> {
    pub fn new(node: &'a Node) -> Self {
        Self { node: Some(node) }
    }

    /// The "not found" value returned for missing paths.
    pub fn absent() -> Self {
        Self { node: None }
    }

    pub(crate) fn from_lookup(node: Option<&'a Node>) -> Self {
        Self { node }
    }

    pub fn exists(&self) -> bool {
        self.node.is_some()
    }

    pub fn node(&self) -> Option<&'a Node> {
        self.node
    }

    /// Kind of the underlying node, or `"absent"`.
    pub fn kind(&self) -> &'static str {
        self.node.map_or("absent", Node::kind)
    }

    fn scalar(&self, expected: &'static str) -> Result<&'a Scalar, ArgfigError> {
        match self.node {
            None => Err(ArgfigError::Absent),
            Some(Node::Leaf(scalar)) => Ok(scalar),
            Some(other) => Err(ArgfigError::TypeMismatch {
                expected,
                found: other.kind(),
            }),
        }
    }

    fn string(&self) -> Result<&'a str, ArgfigError> {
        match self.scalar("string")? {
            Scalar::Str(s) => Ok(s),
            other => Err(mismatch("string", other)),
        }
    }

    fn int(&self) -> Result<i64, ArgfigError> {
        match self.scalar("integer")? {
            Scalar::Int(i) => Ok(*i),
            Scalar::Str(s) => scalar::parse_integer(s).ok_or(ArgfigError::TypeMismatch {
                expected: "integer",
                found: "string",
            }),
            other => Err(mismatch("integer", other)),
        }
    }

    fn float(&self) -> Result<f64, ArgfigError> {
        match self.scalar("float")? {
            Scalar::Float(x) => Ok(*x),
            Scalar::Str(s) => scalar::parse_float(s).ok_or(ArgfigError::TypeMismatch {
                expected: "float",
                found: "string",
            }),
            other => Err(mismatch("float", other)),
        }
    }

    fn boolean(&self) -> Result<bool, ArgfigError> {
        match self.scalar("boolean")? {
            Scalar::Bool(b) => Ok(*b),
            other => Err(mismatch("boolean", other)),
        }
    }

    pub fn try_string(&self) -> Option<&'a str> {
        self.string().ok()
    }

    pub fn try_int(&self) -> Option<i64> {
        self.int().ok()
    }

    pub fn try_float(&self) -> Option<f64> {
        self.float().ok()
    }

    pub fn try_bool(&self) -> Option<bool> {
        self.boolean().ok()
    }

    /// Elements of a list node. `None` for anything that is not a list.
    pub fn try_list(&self) -> Option<Vec<Value<'a>>> {
        match self.node {
            Some(Node::List(items)) => Some(items.iter().map(Value::new).collect()),
            _ => None,
        }
    }

    pub fn to_string(&self, default: impl Into<String>) -> String {
        match self.try_string() {
            Some(s) => s.to_string(),
            None => default.into(),
        }
    }

    pub fn to_int(&self, default: i64) -> i64 {
        self.try_int().unwrap_or(default)
    }

    pub fn to_float(&self, default: f64) -> f64 {
        self.try_float().unwrap_or(default)
    }

    pub fn to_bool(&self, default: bool) -> bool {
        self.try_bool().unwrap_or(default)
    }

    /// # Panics
    ///
    /// If the value is absent or not a string.
    pub fn must_string(&self) -> &'a str {
        self.string().unwrap_or_else(|e| panic!("must_string: {e}"))
    }

    /// # Panics
    ///
    /// If the value is absent or not an integer.
    pub fn must_int(&self) -> i64 {
        self.int().unwrap_or_else(|e| panic!("must_int: {e}"))
    }

    /// # Panics
    ///
    /// If the value is absent or not a float.
    pub fn must_float(&self) -> f64 {
        self.float().unwrap_or_else(|e| panic!("must_float: {e}"))
    }

    /// # Panics
    ///
    /// If the value is absent or not a boolean.
    pub fn must_bool(&self) -> bool {
        self.boolean().unwrap_or_else(|e| panic!("must_bool: {e}"))
    }

    /// Deserialize the subtree into `T`.
    ///
    /// The node is serialized into a TOML value and `T` is deserialized from
    /// it, so the accepted shapes are the ones TOML's serde support accepts.
    pub fn unmarshal<T: DeserializeOwned>(&self) -> Result<T, ArgfigError> {
        let value = self.to_toml()?;
        Ok(value.try_into::<T>()?)
    }

    /// Like [`unmarshal`](Self::unmarshal), writing into an existing target.
    /// `target` is left untouched on error.
    pub fn unmarshal_into<T: DeserializeOwned>(&self, target: &mut T) -> Result<(), ArgfigError> {
        *target = self.unmarshal()?;
        Ok(())
    }

    /// Like [`unmarshal`](Self::unmarshal), but fails if the subtree holds keys
    /// that `T` does not consume.
    pub fn unmarshal_strict<T: DeserializeOwned>(&self) -> Result<T, ArgfigError> {
        let value = self.to_toml()?;
        let mut unknown = Vec::new();
        let target: T = serde_ignored::deserialize(value, |path| {
            unknown.push(path.to_string());
        })?;
        if !unknown.is_empty() {
            return Err(ArgfigError::UnknownFields(unknown));
        }
        Ok(target)
    }

    fn to_toml(&self) -> Result<toml::Value, ArgfigError> {
        let node = self.node.ok_or(ArgfigError::Absent)?;
        Ok(toml::Value::try_from(node)?)
    }
}

fn mismatch(expected: &'static str, found: &Scalar) -> ArgfigError {
    ArgfigError::TypeMismatch {
        expected,
        found: found.kind(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::test::{KeyConfig, key_tree};
    use crate::tree::Branch;

    fn leaf(scalar: Scalar) -> Node {
        Node::Leaf(scalar)
    }

    #[test]
    fn exact_kinds() {
        let s = leaf(Scalar::Str("rsa".into()));
        let i = leaf(Scalar::Int(2048));
        let f = leaf(Scalar::Float(13.5));
        let b = leaf(Scalar::Bool(true));
        assert_eq!(Value::new(&s).try_string(), Some("rsa"));
        assert_eq!(Value::new(&i).try_int(), Some(2048));
        assert_eq!(Value::new(&f).try_float(), Some(13.5));
        assert_eq!(Value::new(&b).try_bool(), Some(true));
    }

    #[test]
    fn no_cross_kind_coercion() {
        let i = leaf(Scalar::Int(2048));
        let f = leaf(Scalar::Float(13.5));
        assert_eq!(Value::new(&i).try_string(), None);
        assert_eq!(Value::new(&i).try_float(), None);
        assert_eq!(Value::new(&f).try_int(), None);
        assert_eq!(Value::new(&i).try_bool(), None);
    }

    #[test]
    fn strings_answer_numeric_requests() {
        let i = leaf(Scalar::Str("2048".into()));
        let f = leaf(Scalar::Str("13.5".into()));
        assert_eq!(Value::new(&i).try_int(), Some(2048));
        assert_eq!(Value::new(&f).try_float(), Some(13.5));
        assert_eq!(Value::new(&f).try_int(), None);
        assert_eq!(Value::new(&i).try_float(), None);
    }

    #[test]
    fn non_numeric_string_is_not_a_number() {
        let s = leaf(Scalar::Str("rsa".into()));
        assert_eq!(Value::new(&s).try_int(), None);
        assert_eq!(Value::new(&s).to_float(1.0), 1.0);
    }

    #[test]
    fn string_true_is_not_a_bool() {
        let s = leaf(Scalar::Str("true".into()));
        assert_eq!(Value::new(&s).try_bool(), None);
    }

    #[test]
    fn defaults_apply_on_mismatch() {
        let s = leaf(Scalar::Str("rsa".into()));
        let v = Value::new(&s);
        assert_eq!(v.to_int(7), 7);
        assert!(v.to_bool(true));
        assert_eq!(v.to_string("x"), "rsa");
    }

    #[test]
    fn absent_is_a_clean_miss() {
        let v = Value::absent();
        assert!(!v.exists());
        assert_eq!(v.kind(), "absent");
        assert_eq!(v.try_string(), None);
        assert_eq!(v.try_int(), None);
        assert_eq!(v.try_float(), None);
        assert_eq!(v.try_bool(), None);
        assert_eq!(v.to_string("fallback"), "fallback");
        assert_eq!(v.to_int(-1), -1);
        assert_eq!(v.to_float(2.5), 2.5);
        assert!(!v.to_bool(false));
        assert!(matches!(v.unmarshal::<KeyConfig>(), Err(ArgfigError::Absent)));
    }

    #[test]
    #[should_panic(expected = "must_int: value not found")]
    fn must_on_absent_panics() {
        Value::absent().must_int();
    }

    #[test]
    #[should_panic(expected = "must_string: expected string, found integer")]
    fn must_on_mismatch_panics() {
        let i = leaf(Scalar::Int(1));
        Value::new(&i).must_string();
    }

    #[test]
    #[should_panic(expected = "must_bool: expected boolean, found branch")]
    fn must_on_branch_panics() {
        let tree = key_tree();
        Value::new(&tree).must_bool();
    }

    #[test]
    fn must_returns_value() {
        let f = leaf(Scalar::Float(0.5));
        assert_eq!(Value::new(&f).must_float(), 0.5);
        let b = leaf(Scalar::Bool(false));
        assert!(!Value::new(&b).must_bool());
    }

    #[test]
    fn unmarshal_branch_into_struct() {
        let tree = key_tree();
        let key: KeyConfig = Value::new(&tree).unmarshal().unwrap();
        assert_eq!(
            key,
            KeyConfig {
                alg: "rsa".into(),
                size: 2048
            }
        );
    }

    #[test]
    fn unmarshal_into_overwrites_target() {
        let tree = key_tree();
        let mut key = KeyConfig::default();
        Value::new(&tree).unmarshal_into(&mut key).unwrap();
        assert_eq!(key.alg, "rsa");
        assert_eq!(key.size, 2048);
    }

    #[test]
    fn unmarshal_leaf_into_scalar() {
        let i = leaf(Scalar::Int(2048));
        let size: u16 = Value::new(&i).unmarshal().unwrap();
        assert_eq!(size, 2048);
    }

    #[test]
    fn unmarshal_type_error_is_returned() {
        let tree = Node::Branch(Branch::from([
            ("alg".to_string(), leaf(Scalar::Str("rsa".into()))),
            ("size".to_string(), leaf(Scalar::Str("big".into()))),
        ]));
        let err = Value::new(&tree).unmarshal::<KeyConfig>().unwrap_err();
        assert!(matches!(err, ArgfigError::Deserialize(_)));
        assert!(err.to_string().starts_with("unmarshal fail"));
    }

    #[test]
    fn unmarshal_strict_reports_unknown_keys() {
        let mut tree = key_tree();
        tree.insert_path("comment", leaf(Scalar::Str("old key".into())));
        let lenient: KeyConfig = Value::new(&tree).unmarshal().unwrap();
        assert_eq!(lenient.size, 2048);

        let err = Value::new(&tree).unmarshal_strict::<KeyConfig>().unwrap_err();
        match err {
            ArgfigError::UnknownFields(fields) => assert_eq!(fields, vec!["comment"]),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn unmarshal_strict_accepts_exact_shape() {
        let tree = key_tree();
        let key: KeyConfig = Value::new(&tree).unmarshal_strict().unwrap();
        assert_eq!(key.alg, "rsa");
    }

    #[test]
    fn list_elements() {
        let list = Node::List(vec![
            leaf(Scalar::Str("localhost".into())),
            leaf(Scalar::Str("test-ca".into())),
        ]);
        let items = Value::new(&list).try_list().unwrap();
        let names: Vec<&str> = items.iter().filter_map(Value::try_string).collect();
        assert_eq!(names, vec!["localhost", "test-ca"]);
        assert!(Value::new(&list).try_string().is_none());

        let tree = key_tree();
        assert!(Value::new(&tree).try_list().is_none());
    }
}
