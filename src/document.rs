//! Configuration from structured documents (TOML, YAML, JSON).
//!
//! Byte decoding is left entirely to the format crates. This module only
//! labels failures by stage (open, read, decode) and hands the decoded value
//! to the tree's decode boundary, which normalises keys and drops nulls.
//!
//! Bytes that are not UTF-8 are a decode failure, not a read failure. A YAML
//! stream holding several `---` documents yields only the first one. A null
//! element inside a sequence is rejected rather than dropped, so list
//! positions always match the source.

use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::ArgfigError;
use crate::source::Config;
use crate::tree::{self, Node};

/// Document formats a [`DocumentConfig`] can decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Toml,
    Yaml,
    Json,
}

impl Format {
    /// Pick a format from the file extension (`toml`, `yaml`/`yml`, `json`).
    pub fn from_path(path: impl AsRef<Path>) -> Option<Self> {
        let ext = path.as_ref().extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "toml" => Some(Format::Toml),
            "yaml" | "yml" => Some(Format::Yaml),
            "json" => Some(Format::Json),
            _ => None,
        }
    }

    fn decode(self, text: &str) -> Result<Option<Node>, ArgfigError> {
        match self {
            Format::Toml => {
                let table: toml::Table =
                    toml::from_str(text).map_err(|e| ArgfigError::decode(self, e))?;
                Ok(Some(tree::from_toml(toml::Value::Table(table))))
            }
            Format::Yaml => {
                if text.trim().is_empty() {
                    return Ok(None);
                }
                // Only the first document of a multi-document stream is read.
                let Some(document) = serde_yaml::Deserializer::from_str(text).next() else {
                    return Ok(None);
                };
                let value =
                    serde_yaml::Value::deserialize(document).map_err(|e| ArgfigError::decode(self, e))?;
                tree::from_yaml(value).map_err(|e| ArgfigError::decode(self, e))
            }
            Format::Json => {
                let value: serde_json::Value =
                    serde_json::from_str(text).map_err(|e| ArgfigError::decode(self, e))?;
                tree::from_json(value).map_err(|e| ArgfigError::decode(self, e))
            }
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Format::Toml => "toml",
            Format::Yaml => "yaml",
            Format::Json => "json",
        })
    }
}

#[derive(Debug, Clone)]
pub struct DocumentConfig {
    tree: Node,
    format: Format,
}

impl DocumentConfig {
    /// Create an empty source that decodes `format`.
    pub fn new(format: Format) -> Self {
        Self {
            tree: Node::default(),
            format,
        }
    }

    /// Open `path`, detect its format from the extension, and decode it.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ArgfigError> {
        let path = path.as_ref();
        let format =
            Format::from_path(path).ok_or_else(|| ArgfigError::UnknownFormat(path.to_path_buf()))?;
        let mut config = Self::new(format);
        config.unmarshal_from_file(path)?;
        Ok(config)
    }

    pub fn format(&self) -> Format {
        self.format
    }

    pub fn unmarshal_from_file(&mut self, path: impl AsRef<Path>) -> Result<(), ArgfigError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| ArgfigError::OpenFile {
            path: PathBuf::from(path),
            source,
        })?;
        tracing::debug!(path = %path.display(), format = %self.format, "loading config file");
        self.unmarshal_from_reader(file)
    }

    pub fn unmarshal_from_reader(&mut self, mut reader: impl Read) -> Result<(), ArgfigError> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes).map_err(ArgfigError::Read)?;
        let text = String::from_utf8(bytes).map_err(|e| ArgfigError::decode(self.format, e))?;
        self.unmarshal_from_str(&text)
    }

    /// Decode `text` and replace the current tree with the result.
    ///
    /// An empty document (null root) gives an empty tree; any other non-mapping
    /// root is a decode error.
    pub fn unmarshal_from_str(&mut self, text: &str) -> Result<(), ArgfigError> {
        let tree = match self.format.decode(text)? {
            None => Node::default(),
            Some(node @ Node::Branch(_)) => node,
            Some(_) => {
                return Err(ArgfigError::decode(
                    self.format,
                    "document root is not a mapping",
                ));
            }
        };
        let keys = tree.as_branch().map_or(0, |branch| branch.len());
        tracing::debug!(format = %self.format, keys, "decoded document");
        self.tree = tree;
        Ok(())
    }
}

impl fmt::Display for DocumentConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DocumentConfig({}): {}", self.format, self.tree)
    }
}

impl Config for DocumentConfig {
    fn root(&self) -> &Node {
        &self.tree
    }
}
