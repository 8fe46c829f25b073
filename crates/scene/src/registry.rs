//! Name index for scene graph nodes.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use crate::error::{SceneError, SceneResult};
use crate::node::NodeKey;

/// Maps unique names to nodes. Only named nodes are queryable.
#[derive(Clone, Debug, Default)]
pub struct NameRegistry {
    names: HashMap<String, NodeKey>,
}

impl NameRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `name` to `key`. Fails if `name` is already bound.
    pub fn register(&mut self, name: &str, key: NodeKey) -> SceneResult<()> {
        match self.names.entry(name.to_owned()) {
            Entry::Occupied(_) => Err(SceneError::DuplicateName(name.to_owned())),
            Entry::Vacant(slot) => {
                slot.insert(key);
                Ok(())
            }
        }
    }

    /// Node bound to `name`, or `None`.
    pub fn lookup(&self, name: &str) -> Option<NodeKey> {
        self.names.get(name).copied()
    }

    /// Number of registered names.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether no names are registered.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
