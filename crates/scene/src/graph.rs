//! Scene graph: a forest of transform nodes with a name index.
//!
//! Nodes live in an arena and are addressed by [`NodeKey`]. The graph owns
//! the roots, each node owns its children, and world transforms are
//! recomputed from the ancestor chain on every query. The graph is small
//! and queried a handful of times per frame, so nothing is cached.
//!
//! # Example
//!
//! ```
//! use orbit_scene::{SceneGraph, Transform};
//! use glam::Vec3;
//!
//! let mut graph = SceneGraph::new();
//! let pivot = graph.add_named_root("pivot", Transform::new()).unwrap();
//! let child = graph
//!     .add_child(pivot, Transform::new().with_position(Vec3::new(3.0, 0.5, 0.0)))
//!     .unwrap();
//!
//! graph.set_yaw_degrees(pivot, 90.0).unwrap();
//! let p = graph.world_position(child).unwrap();
//! assert!(p.abs_diff_eq(Vec3::new(0.0, 0.5, -3.0), 1e-5));
//! assert_eq!(graph.lookup("pivot"), Some(pivot));
//! ```

use glam::{Mat4, Quat, Vec3};
use slotmap::SlotMap;

use crate::error::{SceneError, SceneResult};
use crate::node::{Node, NodeKey};
use crate::registry::NameRegistry;
use crate::transform::Transform;

/// Forest of transform nodes plus a name registry.
#[derive(Clone, Debug, Default)]
pub struct SceneGraph {
    nodes: SlotMap<NodeKey, Node>,
    roots: Vec<NodeKey>,
    names: NameRegistry,
}

impl SceneGraph {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of nodes in the graph.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the graph has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Add an unnamed root node.
    pub fn add_root(&mut self, transform: Transform) -> NodeKey {
        let key = self.nodes.insert(Node::new(transform));
        self.roots.push(key);
        key
    }

    /// Add a root node registered under `name`.
    pub fn add_named_root(&mut self, name: &str, transform: Transform) -> SceneResult<NodeKey> {
        self.ensure_name_free(name)?;
        let key = self.add_root(transform);
        self.bind_name(name, key)?;
        Ok(key)
    }

    /// Add an unnamed node as the last child of `parent`.
    pub fn add_child(&mut self, parent: NodeKey, transform: Transform) -> SceneResult<NodeKey> {
        self.ensure_exists(parent)?;
        let mut node = Node::new(transform);
        node.parent = Some(parent);
        let key = self.nodes.insert(node);
        self.nodes[parent].children.push(key);
        Ok(key)
    }

    /// Add a child of `parent` registered under `name`.
    pub fn add_named_child(
        &mut self,
        parent: NodeKey,
        name: &str,
        transform: Transform,
    ) -> SceneResult<NodeKey> {
        self.ensure_exists(parent)?;
        self.ensure_name_free(name)?;
        let key = self.add_child(parent, transform)?;
        self.bind_name(name, key)?;
        Ok(key)
    }

    /// Move `child` (with its subtree) under `parent`, appending it to the
    /// parent's children.
    ///
    /// Fails with [`SceneError::Cycle`] when `parent` is `child` or one of
    /// its descendants; the graph is left untouched in that case.
    pub fn attach(&mut self, parent: NodeKey, child: NodeKey) -> SceneResult<()> {
        self.ensure_exists(parent)?;
        self.ensure_exists(child)?;
        if self.is_ancestor_or_self(child, parent) {
            return Err(SceneError::Cycle { child, parent });
        }

        self.unlink(child);
        self.nodes[child].parent = Some(parent);
        self.nodes[parent].children.push(child);
        Ok(())
    }

    /// Detach `node` from its parent and make it a root.
    pub fn detach(&mut self, node: NodeKey) -> SceneResult<()> {
        self.ensure_exists(node)?;
        if self.nodes[node].parent.is_some() {
            self.unlink(node);
            self.roots.push(node);
        }
        Ok(())
    }

    /// Register an existing node under `name`.
    pub fn register(&mut self, name: &str, node: NodeKey) -> SceneResult<()> {
        self.ensure_exists(node)?;
        self.bind_name(name, node)
    }

    /// Node registered under `name`, or `None`.
    pub fn lookup(&self, name: &str) -> Option<NodeKey> {
        self.names.lookup(name)
    }

    /// Node by key.
    pub fn node(&self, key: NodeKey) -> Option<&Node> {
        self.nodes.get(key)
    }

    /// Local transform of `key`.
    pub fn transform(&self, key: NodeKey) -> SceneResult<&Transform> {
        self.get(key).map(|node| &node.transform)
    }

    /// Replace the local transform parameters of `key`.
    pub fn set_local_transform(
        &mut self,
        key: NodeKey,
        translation: Vec3,
        rotation: Quat,
        scale: Vec3,
    ) -> SceneResult<()> {
        self.get_mut(key)?
            .transform
            .set(translation, rotation, scale);
        Ok(())
    }

    /// Set the local rotation of `key` to `degrees` about +Y.
    pub fn set_yaw_degrees(&mut self, key: NodeKey, degrees: f32) -> SceneResult<()> {
        self.get_mut(key)?.transform.set_yaw_degrees(degrees);
        Ok(())
    }

    /// World matrix of `key`: ancestor local transforms composed root-to-leaf.
    pub fn world_matrix(&self, key: NodeKey) -> SceneResult<Mat4> {
        let node = self.get(key)?;
        let mut world = node.transform.local_matrix();
        let mut parent = node.parent;
        while let Some(p) = parent {
            let ancestor = &self.nodes[p];
            world = ancestor.transform.local_matrix() * world;
            parent = ancestor.parent;
        }
        Ok(world)
    }

    /// Translation column of the world matrix of `key`.
    pub fn world_position(&self, key: NodeKey) -> SceneResult<Vec3> {
        Ok(self.world_matrix(key)?.w_axis.truncate())
    }

    /// Root nodes in insertion order.
    pub fn roots(&self) -> impl Iterator<Item = NodeKey> + '_ {
        self.roots.iter().copied()
    }

    /// `root` and all nodes below it, depth-first, children in order.
    pub fn descendants(&self, root: NodeKey) -> Descendants<'_> {
        let stack = if self.nodes.contains_key(root) {
            vec![root]
        } else {
            Vec::new()
        };
        Descendants { graph: self, stack }
    }

    /// Whether `ancestor` is `node` or lies on its parent chain.
    pub fn is_ancestor_or_self(&self, ancestor: NodeKey, node: NodeKey) -> bool {
        let mut current = Some(node);
        while let Some(key) = current {
            if key == ancestor {
                return true;
            }
            current = self.nodes.get(key).and_then(|n| n.parent);
        }
        false
    }

    fn get(&self, key: NodeKey) -> SceneResult<&Node> {
        self.nodes.get(key).ok_or(SceneError::UnknownNode(key))
    }

    fn get_mut(&mut self, key: NodeKey) -> SceneResult<&mut Node> {
        self.nodes.get_mut(key).ok_or(SceneError::UnknownNode(key))
    }

    fn ensure_exists(&self, key: NodeKey) -> SceneResult<()> {
        self.get(key).map(|_| ())
    }

    fn ensure_name_free(&self, name: &str) -> SceneResult<()> {
        match self.names.lookup(name) {
            Some(_) => Err(SceneError::DuplicateName(name.to_owned())),
            None => Ok(()),
        }
    }

    fn bind_name(&mut self, name: &str, key: NodeKey) -> SceneResult<()> {
        self.names.register(name, key)?;
        let node = &mut self.nodes[key];
        if node.name.is_none() {
            node.name = Some(name.to_owned());
        }
        tracing::trace!(name, ?key, "registered scene node");
        Ok(())
    }

    /// Remove `key` from its parent's child list or from the roots.
    fn unlink(&mut self, key: NodeKey) {
        match self.nodes[key].parent.take() {
            Some(parent) => self.nodes[parent].children.retain(|&c| c != key),
            None => self.roots.retain(|&r| r != key),
        }
    }
}

/// Depth-first iterator returned by [`SceneGraph::descendants`].
pub struct Descendants<'a> {
    graph: &'a SceneGraph,
    stack: Vec<NodeKey>,
}

impl Iterator for Descendants<'_> {
    type Item = NodeKey;

    fn next(&mut self) -> Option<NodeKey> {
        let key = self.stack.pop()?;
        if let Some(node) = self.graph.nodes.get(key) {
            self.stack.extend(node.children.iter().rev().copied());
        }
        Some(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-5;

    fn approx_eq_vec3(a: Vec3, b: Vec3) -> bool {
        a.abs_diff_eq(b, EPSILON)
    }

    fn offset(x: f32, y: f32, z: f32) -> Transform {
        Transform::new().with_position(Vec3::new(x, y, z))
    }

    #[test]
    fn test_root_world_equals_local() {
        let mut graph = SceneGraph::new();
        let t = offset(1.0, 2.0, 3.0).with_scale(Vec3::splat(2.0));
        let root = graph.add_root(t);

        assert_eq!(graph.world_matrix(root).unwrap(), t.local_matrix());
        assert!(graph.node(root).unwrap().parent().is_none());
    }

    #[test]
    fn test_world_matrix_nested_hierarchy() {
        let mut graph = SceneGraph::new();
        let grandparent = graph.add_root(offset(100.0, 0.0, 0.0));
        let parent = graph.add_child(grandparent, offset(10.0, 0.0, 0.0)).unwrap();
        let child = graph.add_child(parent, offset(1.0, 0.0, 0.0)).unwrap();

        let world_pos = graph.world_position(child).unwrap();
        assert!(
            approx_eq_vec3(world_pos, Vec3::new(111.0, 0.0, 0.0)),
            "Expected (111, 0, 0), got {:?}",
            world_pos
        );
    }

    #[test]
    fn test_world_matrix_with_parent_scale() {
        let mut graph = SceneGraph::new();
        let parent = graph.add_root(offset(10.0, 0.0, 0.0).with_scale(Vec3::splat(2.0)));
        let child = graph.add_child(parent, offset(5.0, 0.0, 0.0)).unwrap();

        // World position: 10 + (5 * 2) = 20
        let world_pos = graph.world_position(child).unwrap();
        assert!(
            approx_eq_vec3(world_pos, Vec3::new(20.0, 0.0, 0.0)),
            "Expected (20, 0, 0), got {:?}",
            world_pos
        );
    }

    #[test]
    fn test_chain_equals_product_of_locals() {
        let mut graph = SceneGraph::new();
        let locals = [
            offset(1.0, 0.0, 0.0).with_yaw_degrees(30.0),
            offset(0.0, 2.0, 0.0).with_scale(Vec3::new(1.0, 2.0, 0.5)),
            offset(0.0, 0.0, 3.0).with_yaw_degrees(-75.0),
            offset(-1.0, 1.0, 0.5),
        ];

        let mut key = graph.add_root(locals[0]);
        for local in &locals[1..] {
            key = graph.add_child(key, *local).unwrap();
        }

        let expected = locals
            .iter()
            .fold(Mat4::IDENTITY, |acc, t| acc * t.local_matrix());
        assert!(graph.world_matrix(key).unwrap().abs_diff_eq(expected, EPSILON));
    }

    #[test]
    fn test_pivot_rotation_moves_child() {
        let mut graph = SceneGraph::new();
        let pivot = graph.add_root(Transform::new());
        let child = graph.add_child(pivot, offset(3.0, 0.5, 0.0)).unwrap();

        assert!(approx_eq_vec3(
            graph.world_position(child).unwrap(),
            Vec3::new(3.0, 0.5, 0.0)
        ));

        graph.set_yaw_degrees(pivot, 90.0).unwrap();
        let p = graph.world_position(child).unwrap();
        assert!(
            approx_eq_vec3(p, Vec3::new(0.0, 0.5, -3.0)),
            "Expected (0, 0.5, -3), got {:?}",
            p
        );
    }

    #[test]
    fn test_sibling_independence() {
        let mut graph = SceneGraph::new();
        let parent = graph.add_root(offset(1.0, 0.0, 0.0).with_yaw_degrees(45.0));
        let a = graph.add_child(parent, offset(2.0, 0.0, 0.0)).unwrap();
        let b = graph.add_child(parent, offset(0.0, 0.0, 2.0)).unwrap();
        let before = graph.world_matrix(b).unwrap();

        // Re-attaching `a` moves it to the end of the child list.
        graph.attach(parent, a).unwrap();
        assert_eq!(graph.node(parent).unwrap().children(), &[b, a]);
        assert_eq!(graph.world_matrix(b).unwrap(), before);

        graph.set_yaw_degrees(a, 120.0).unwrap();
        assert_eq!(graph.world_matrix(b).unwrap(), before);
    }

    #[test]
    fn test_attach_rejects_cycles() {
        let mut graph = SceneGraph::new();
        let root = graph.add_root(Transform::new());
        let mid = graph.add_child(root, Transform::new()).unwrap();
        let leaf = graph.add_child(mid, Transform::new()).unwrap();

        assert_eq!(
            graph.attach(leaf, root),
            Err(SceneError::Cycle {
                child: root,
                parent: leaf
            })
        );
        assert_eq!(
            graph.attach(mid, mid),
            Err(SceneError::Cycle {
                child: mid,
                parent: mid
            })
        );

        // Nothing moved.
        assert_eq!(graph.roots().collect::<Vec<_>>(), vec![root]);
        assert_eq!(graph.node(mid).unwrap().children(), &[leaf]);
        assert_eq!(graph.node(root).unwrap().parent(), None);
    }

    #[test]
    fn test_attach_reparents_root() {
        let mut graph = SceneGraph::new();
        let a = graph.add_root(offset(1.0, 0.0, 0.0));
        let b = graph.add_root(offset(0.0, 1.0, 0.0));

        graph.attach(a, b).unwrap();
        assert_eq!(graph.roots().collect::<Vec<_>>(), vec![a]);
        assert_eq!(graph.node(b).unwrap().parent(), Some(a));
        assert!(approx_eq_vec3(
            graph.world_position(b).unwrap(),
            Vec3::new(1.0, 1.0, 0.0)
        ));

        graph.detach(b).unwrap();
        assert_eq!(graph.roots().collect::<Vec<_>>(), vec![a, b]);
        assert!(graph.node(a).unwrap().children().is_empty());
    }

    #[test]
    fn test_named_nodes() {
        let mut graph = SceneGraph::new();
        let pivot = graph.add_named_root("pivot", Transform::new()).unwrap();
        let child = graph
            .add_named_child(pivot, "child", offset(1.0, 0.0, 0.0))
            .unwrap();

        assert_eq!(graph.lookup("pivot"), Some(pivot));
        assert_eq!(graph.lookup("child"), Some(child));
        assert_eq!(graph.lookup("missing"), None);
        assert_eq!(graph.node(child).unwrap().name(), Some("child"));
    }

    #[test]
    fn test_duplicate_name_rejected_before_insert() {
        let mut graph = SceneGraph::new();
        let pivot = graph.add_named_root("pivot", Transform::new()).unwrap();

        assert_eq!(
            graph.add_named_root("pivot", Transform::new()),
            Err(SceneError::DuplicateName("pivot".into()))
        );
        assert_eq!(
            graph.add_named_child(pivot, "pivot", Transform::new()),
            Err(SceneError::DuplicateName("pivot".into()))
        );
        assert_eq!(graph.len(), 1);
    }

    #[test]
    fn test_register_existing_node() {
        let mut graph = SceneGraph::new();
        let node = graph.add_root(Transform::new());

        graph.register("x", node).unwrap();
        assert_eq!(graph.lookup("x"), Some(node));
        assert_eq!(graph.lookup("y"), None);
        assert!(matches!(
            graph.register("x", node),
            Err(SceneError::DuplicateName(_))
        ));
    }

    #[test]
    fn test_unknown_node() {
        let mut other = SceneGraph::new();
        let foreign = other.add_root(Transform::new());
        let _ = other.add_root(Transform::new());

        let graph = SceneGraph::new();
        assert_eq!(
            graph.world_matrix(foreign),
            Err(SceneError::UnknownNode(foreign))
        );
        assert_eq!(graph.descendants(foreign).count(), 0);
    }

    #[test]
    fn test_descendants_depth_first() {
        let mut graph = SceneGraph::new();
        let root = graph.add_root(Transform::new());
        let a = graph.add_child(root, Transform::new()).unwrap();
        let a1 = graph.add_child(a, Transform::new()).unwrap();
        let b = graph.add_child(root, Transform::new()).unwrap();

        assert_eq!(
            graph.descendants(root).collect::<Vec<_>>(),
            vec![root, a, a1, b]
        );
    }

    #[test]
    fn test_set_local_transform() {
        let mut graph = SceneGraph::new();
        let node = graph.add_root(Transform::new());
        graph
            .set_local_transform(node, Vec3::Y, Quat::IDENTITY, Vec3::splat(2.0))
            .unwrap();

        let t = graph.transform(node).unwrap();
        assert_eq!(t.position, Vec3::Y);
        assert_eq!(t.scale, Vec3::splat(2.0));
    }
}
