//! One typed configuration tree from command-line flags and document files.
//!
//! Applications rarely take all of their settings from one place. Some come
//! from a config file, a few are overridden on the command line, and the code
//! that reads them should not care which. argfig resolves every source into
//! the same nested tree and puts one accessor contract, the [`Config`] trait,
//! in front of it.
//!
//! ```ignore
//! let mut flags = CommandlineConfig::new(["-key.alg=rsa", "-key.size", "2048"], "");
//! flags.parse()?;
//!
//! assert_eq!(flags.get("key.alg").to_string("ecdsa"), "rsa");
//! assert_eq!(flags.get("key.size").to_int(0), 2048);
//!
//! #[derive(serde::Deserialize)]
//! struct Key { alg: String, size: u32 }
//! let key: Key = flags.get("key").unmarshal()?;
//! ```
//!
//! # Sources
//!
//! - [`CommandlineConfig`] parses `-key=value`, `--key=value`, `-key value`
//!   and `--key value`. Dotted keys nest, and an optional prefix
//!   (`-myapp.key.alg=rsa`) lets several consumers share one argv. Later
//!   arguments override earlier ones.
//! - [`DocumentConfig`] decodes TOML, YAML or JSON from a file, reader or
//!   string.
//! - [`LayeredConfig`] deep-merges any number of sources, later layers
//!   winning key by key. The usual stack is the file first, flags last.
//!
//! Sources are filled once and then only read. Repopulating one needs
//! `&mut self`, so it cannot happen while a [`Value`] borrowed from it is in
//! use.
//!
//! # Scalar inference
//!
//! Command-line values are plain strings, so each one is classified before it
//! is stored: digits become integers, `digits.digits` becomes a float, and
//! anything in quotes (`'2048'`, `"13.5"`) stays a string with the quotes
//! removed. See the [`scalar`] module for the exact rules.
//!
//! # Reading values
//!
//! [`Config::get`] takes a dotted path and returns a [`Value`], which is either
//! a view of one node or the absent marker. Each scalar kind has three
//! accessors:
//!
//! | Accessor | On success | On a miss |
//! |----------|------------|-----------|
//! | `try_int()` | `Some(i)` | `None` |
//! | `to_int(default)` | `i` | `default` |
//! | `must_int()` | `i` | panics |
//!
//! A miss is either an absent path or a value of another kind. There is one
//! deliberate coercion: a string leaf in integer or float form answers
//! `try_int`/`try_float`, so quoted flags and stringly typed documents still
//! read as numbers when asked.
//!
//! [`Value::unmarshal`] projects a subtree onto any `serde::Deserialize`
//! type; [`Value::unmarshal_strict`] additionally rejects keys the type does
//! not consume.
//!
//! # Error handling
//!
//! Every fallible operation returns [`ArgfigError`]. Errors name the stage
//! that failed (argument parsing, file open, read, decode, marshal,
//! unmarshal) and carry the offending token or path.

pub mod error;
pub mod scalar;
pub mod tree;

mod commandline;
mod document;
mod layered;
mod source;
mod value;

#[cfg(test)]
mod fixtures;

pub use commandline::CommandlineConfig;
pub use document::{DocumentConfig, Format};
pub use error::{ArgfigError, ArgumentError};
pub use layered::LayeredConfig;
pub use scalar::Scalar;
pub use source::Config;
pub use tree::{Branch, Node};
pub use value::Value;
