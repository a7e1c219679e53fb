//! Configuration from command-line arguments.
//!
//! Accepted forms, all equivalent:
//!
//! ```text
//! -key=value    --key=value    -key value    --key value
//! ```
//!
//! Dotted keys nest (`-key.alg=rsa` sets `alg` under `key`), and values go
//! through [`scalar::infer`](crate::scalar::infer) before they are stored.
//! Arguments are merged left to right, so a repeated key keeps its last value.
//!
//! With a non-empty prefix only `<prefix>.`-keyed arguments are kept, and the
//! prefix is stripped. Everything else is dropped without error, which lets one
//! argv carry flags for several consumers:
//!
//! ```text
//! ./prog -someprefix.key.alg=rsa -verbose 1   # prefix "someprefix" sees key.alg
//! ```

use std::collections::VecDeque;
use std::fmt;

use crate::error::{ArgfigError, ArgumentError};
use crate::scalar;
use crate::source::Config;
use crate::tree::Node;

#[derive(Debug, Clone)]
pub struct CommandlineConfig {
    tree: Node,
    prefix: String,
    args: VecDeque<String>,
    consumed: usize,
}

impl CommandlineConfig {
    /// Create a source over `args`. Pass an empty `prefix` to keep every argument.
    pub fn new<I, S>(args: I, prefix: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tree: Node::default(),
            prefix: prefix.into(),
            args: args.into_iter().map(Into::into).collect(),
            consumed: 0,
        }
    }

    /// Create a source over the process arguments, skipping the program name.
    pub fn from_env(prefix: impl Into<String>) -> Self {
        Self::new(std::env::args().skip(1), prefix)
    }

    /// Consume the whole argument list and merge it into the tree.
    ///
    /// Stops at the first malformed argument. Pairs merged before it are kept.
    pub fn parse(&mut self) -> Result<(), ArgfigError> {
        while self.has_more() {
            let position = self.consumed;
            let pair = self
                .parse_next()
                .map_err(|source| ArgfigError::Commandline { position, source })?;
            if let Some((key, raw)) = pair {
                let value = scalar::infer(&raw);
                tracing::debug!(%key, %value, "merging argument");
                self.tree.insert_path(&key, Node::Leaf(value));
            }
        }
        Ok(())
    }

    fn has_more(&self) -> bool {
        !self.args.is_empty()
    }

    fn pop_next_arg(&mut self) -> Option<String> {
        let arg = self.args.pop_front()?;
        self.consumed += 1;
        Some(arg)
    }

    /// Parse the next key/value pair.
    ///
    /// `Ok(None)` when the argument list is exhausted or the argument was
    /// filtered out by the prefix.
    fn parse_next(&mut self) -> Result<Option<(String, String)>, ArgumentError> {
        let Some(arg) = self.pop_next_arg() else {
            return Ok(None);
        };

        if arg.len() < 2 || !arg.starts_with('-') {
            return Err(ArgumentError::Invalid(arg));
        }
        let rest = arg
            .strip_prefix("--")
            .or_else(|| arg.strip_prefix('-'))
            .unwrap_or(arg.as_str());

        let (key, value) = match rest.split_once('=') {
            Some((key, value)) => (key.to_string(), value.to_string()),
            None => {
                let key = rest.to_string();
                let Some(value) = self.pop_next_arg() else {
                    return Err(ArgumentError::MissingValue(key));
                };
                (key, value)
            }
        };

        if self.prefix.is_empty() {
            return Ok(Some((key, value)));
        }
        match key
            .strip_prefix(self.prefix.as_str())
            .and_then(|k| k.strip_prefix('.'))
        {
            Some(stripped) => Ok(Some((stripped.to_string(), value))),
            None => {
                tracing::trace!(%key, prefix = %self.prefix, "argument filtered out by prefix");
                Ok(None)
            }
        }
    }
}

impl fmt::Display for CommandlineConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CommandlineConfig: {}", self.tree)
    }
}

impl Config for CommandlineConfig {
    fn root(&self) -> &Node {
        &self.tree
    }
}
