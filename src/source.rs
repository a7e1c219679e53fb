use std::fmt;

use crate::tree::Node;
use crate::value::Value;

/// The contract shared by every configuration source.
///
/// A source owns one tree rooted at a branch. [`get`](Config::get) walks a
/// dotted path from that root on every call; `Display` dumps the whole tree
/// for debugging.
///
/// Lookups borrow the source immutably, while every way of (re)populating a
/// source takes `&mut self`. The borrow checker therefore keeps a re-parse
/// from happening while a [`Value`] read from the source is alive.
pub trait Config: fmt::Display {
    fn root(&self) -> &Node;

    /// Look up a dotted path such as `"key.alg"`.
    ///
    /// Returns [`Value::absent`] when any segment is missing or the walk hits a
    /// leaf before the path ends.
    fn get(&self, path: &str) -> Value<'_> {
        Value::from_lookup(self.root().lookup(path))
    }
}
