//! Scene graph node.

use slotmap::new_key_type;

use crate::transform::Transform;

new_key_type! {
    /// Handle to a node in a [`SceneGraph`](crate::SceneGraph).
    pub struct NodeKey;
}

/// A transform node: local transform plus hierarchy links.
///
/// Children are owned through `children`; `parent` is a back-reference used
/// for traversal only.
#[derive(Clone, Debug, Default)]
pub struct Node {
    pub(crate) name: Option<String>,
    pub(crate) parent: Option<NodeKey>,
    pub(crate) children: Vec<NodeKey>,
    /// Local transform relative to the parent.
    pub transform: Transform,
}

impl Node {
    pub(crate) fn new(transform: Transform) -> Self {
        Self {
            transform,
            ..Self::default()
        }
    }

    /// Registered name, if any.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Parent node, `None` for roots.
    pub fn parent(&self) -> Option<NodeKey> {
        self.parent
    }

    /// Children in insertion order.
    pub fn children(&self) -> &[NodeKey] {
        &self.children
    }

    /// First child, the common case for pivots.
    pub fn first_child(&self) -> Option<NodeKey> {
        self.children.first().copied()
    }
}
