//! Several sources stacked into one namespace.
//!
//! Each layer is deep-merged over the ones added before it: where both sides
//! hold a branch for the same key the merge recurses, anything else is taken
//! from the newer layer. Layers are therefore sparse; a flag only has to name
//! the one key it overrides.
//!
//! ```ignore
//! let file = DocumentConfig::load("app.yaml")?;
//! let mut flags = CommandlineConfig::from_env("app");
//! flags.parse()?;
//!
//! let config = LayeredConfig::new().layer(&file).layer(&flags);
//! let port = config.get("server.port").to_int(8080);
//! ```

use std::fmt;

use crate::source::Config;
use crate::tree::{self, Node};

#[derive(Debug, Clone, Default)]
pub struct LayeredConfig {
    tree: Node,
    layers: usize,
}

impl LayeredConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge `source` over the current tree (builder style).
    pub fn layer(mut self, source: &impl Config) -> Self {
        self.push(source);
        self
    }

    /// Merge `source` over the current tree.
    pub fn push(&mut self, source: &(impl Config + ?Sized)) {
        let Node::Branch(overlay) = source.root() else {
            tracing::debug!(%source, "skipping layer without a branch root");
            return;
        };
        let base = match std::mem::take(&mut self.tree) {
            Node::Branch(base) => base,
            _ => Default::default(),
        };
        self.tree = Node::Branch(tree::deep_merge(base, overlay.clone()));
        self.layers += 1;
        tracing::debug!(layer = self.layers, keys = overlay.len(), "merged config layer");
    }

    pub fn layer_count(&self) -> usize {
        self.layers
    }
}

impl fmt::Display for LayeredConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LayeredConfig({} layers): {}", self.layers, self.tree)
    }
}

impl Config for LayeredConfig {
    fn root(&self) -> &Node {
        &self.tree
    }
}
