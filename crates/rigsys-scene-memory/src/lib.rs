//! In-memory scene backend.
//!
//! A [`MemoryScene`] implements the full [`SceneBackend`] capability against
//! a plain node table: name-unique nodes with parent links and world-space
//! transforms, plus a record of every pose constraint requested. It exists
//! so rigs can be built and inspected without a 3D host — the integration
//! tests and the CLI both drive it.
//!
//! Transforms are tracked directly in world space; reparenting moves the
//! hierarchy link without recomputing anything. A constraint created without
//! `maintain_offset` snaps the driven node to the driver's pose at creation
//! time; constraints are otherwise inert records.

use rigsys_core::scene::{
    ConstraintHandle, NodeHandle, SceneBackend, SceneError, SceneResult, Vec3,
};
use std::collections::HashMap;

/// What a node is in the scene graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// A plain transform.
    Transform,
    /// A skeleton joint.
    Joint,
}

#[derive(Debug, Clone)]
struct Node {
    name: String,
    kind: NodeKind,
    parent: Option<NodeHandle>,
    position: Vec3,
    rotation: Vec3,
}

/// A recorded pose constraint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PoseConstraint {
    /// The driving node.
    pub driver: NodeHandle,
    /// The driven node.
    pub driven: NodeHandle,
    /// Whether the driven node keeps its offset from the driver.
    pub maintain_offset: bool,
}

/// An in-memory [`SceneBackend`].
#[derive(Debug, Default)]
pub struct MemoryScene {
    nodes: Vec<Node>,
    by_name: HashMap<String, NodeHandle>,
    constraints: Vec<PoseConstraint>,
}

impl MemoryScene {
    /// Creates an empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of nodes in the scene.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// All recorded pose constraints, in creation order.
    pub fn constraints(&self) -> &[PoseConstraint] {
        &self.constraints
    }

    /// Returns a node's name.
    pub fn node_name(&self, node: NodeHandle) -> Option<&str> {
        self.nodes.get(node.0 as usize).map(|n| n.name.as_str())
    }

    /// Returns a node's kind.
    pub fn node_kind(&self, node: NodeHandle) -> Option<NodeKind> {
        self.nodes.get(node.0 as usize).map(|n| n.kind)
    }

    /// Returns a node's parent.
    pub fn parent_of(&self, node: NodeHandle) -> Option<NodeHandle> {
        self.nodes.get(node.0 as usize).and_then(|n| n.parent)
    }

    /// Iterates node names in creation order.
    pub fn node_names(&self) -> impl Iterator<Item = &str> {
        self.nodes.iter().map(|n| n.name.as_str())
    }

    fn node(&self, handle: NodeHandle) -> SceneResult<&Node> {
        self.nodes
            .get(handle.0 as usize)
            .ok_or(SceneError::StaleHandle(handle))
    }

    fn node_mut(&mut self, handle: NodeHandle) -> SceneResult<&mut Node> {
        self.nodes
            .get_mut(handle.0 as usize)
            .ok_or(SceneError::StaleHandle(handle))
    }

    fn create(
        &mut self,
        name: &str,
        kind: NodeKind,
        parent: Option<NodeHandle>,
    ) -> SceneResult<NodeHandle> {
        // Creation is idempotent by name: an existing node is returned as-is
        // (its parent link included), which lets a rebuild reuse the scene.
        if let Some(&existing) = self.by_name.get(name) {
            return Ok(existing);
        }
        if let Some(parent) = parent {
            self.node(parent)?;
        }
        let handle = NodeHandle(self.nodes.len() as u32);
        self.nodes.push(Node {
            name: name.to_string(),
            kind,
            parent,
            position: [0.0, 0.0, 0.0],
            rotation: [0.0, 0.0, 0.0],
        });
        self.by_name.insert(name.to_string(), handle);
        Ok(handle)
    }
}

impl SceneBackend for MemoryScene {
    fn create_transform(
        &mut self,
        name: &str,
        parent: Option<NodeHandle>,
    ) -> SceneResult<NodeHandle> {
        self.create(name, NodeKind::Transform, parent)
    }

    fn create_joint(&mut self, name: &str, parent: Option<NodeHandle>) -> SceneResult<NodeHandle> {
        self.create(name, NodeKind::Joint, parent)
    }

    fn set_world_position(&mut self, node: NodeHandle, position: Vec3) -> SceneResult<()> {
        self.node_mut(node)?.position = position;
        Ok(())
    }

    fn set_world_rotation(&mut self, node: NodeHandle, rotation: Vec3) -> SceneResult<()> {
        self.node_mut(node)?.rotation = rotation;
        Ok(())
    }

    fn world_position(&self, node: NodeHandle) -> SceneResult<Vec3> {
        Ok(self.node(node)?.position)
    }

    fn world_rotation(&self, node: NodeHandle) -> SceneResult<Vec3> {
        Ok(self.node(node)?.rotation)
    }

    fn reparent(&mut self, node: NodeHandle, new_parent: Option<NodeHandle>) -> SceneResult<()> {
        if let Some(parent) = new_parent {
            self.node(parent)?;
        }
        self.node_mut(node)?.parent = new_parent;
        Ok(())
    }

    fn create_pose_constraint(
        &mut self,
        driver: NodeHandle,
        driven: NodeHandle,
        maintain_offset: bool,
    ) -> SceneResult<ConstraintHandle> {
        let (position, rotation) = {
            let driver_node = self.node(driver)?;
            (driver_node.position, driver_node.rotation)
        };
        if !maintain_offset {
            let driven_node = self.node_mut(driven)?;
            driven_node.position = position;
            driven_node.rotation = rotation;
        } else {
            self.node(driven)?;
        }
        let handle = ConstraintHandle(self.constraints.len() as u32);
        self.constraints.push(PoseConstraint {
            driver,
            driven,
            maintain_offset,
        });
        Ok(handle)
    }

    fn node_exists(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    fn node_by_name(&self, name: &str) -> Option<NodeHandle> {
        self.by_name.get(name).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_is_idempotent_by_name() {
        let mut scene = MemoryScene::new();
        let a = scene.create_transform("grp", None).unwrap();
        let b = scene.create_transform("grp", None).unwrap();
        assert_eq!(a, b);
        assert_eq!(scene.node_count(), 1);
    }

    #[test]
    fn test_world_transform_round_trip() {
        let mut scene = MemoryScene::new();
        let node = scene.create_transform("ctrl", None).unwrap();
        scene.set_world_position(node, [1.0, 2.0, 3.0]).unwrap();
        scene.set_world_rotation(node, [0.0, 90.0, 0.0]).unwrap();

        assert_eq!(scene.world_position(node).unwrap(), [1.0, 2.0, 3.0]);
        assert_eq!(scene.world_rotation(node).unwrap(), [0.0, 90.0, 0.0]);
    }

    #[test]
    fn test_parenting_and_reparent() {
        let mut scene = MemoryScene::new();
        let root = scene.create_transform("root", None).unwrap();
        let child = scene.create_transform("child", Some(root)).unwrap();
        assert_eq!(scene.parent_of(child), Some(root));

        let other = scene.create_joint("other", None).unwrap();
        scene.reparent(child, Some(other)).unwrap();
        assert_eq!(scene.parent_of(child), Some(other));
        assert_eq!(scene.node_kind(other), Some(NodeKind::Joint));
    }

    #[test]
    fn test_constraint_without_offset_snaps_driven() {
        let mut scene = MemoryScene::new();
        let driver = scene.create_transform("driver", None).unwrap();
        let driven = scene.create_transform("driven", None).unwrap();
        scene.set_world_position(driver, [5.0, 0.0, 0.0]).unwrap();

        scene.create_pose_constraint(driver, driven, false).unwrap();
        assert_eq!(scene.world_position(driven).unwrap(), [5.0, 0.0, 0.0]);

        let recorded = scene.constraints()[0];
        assert_eq!(recorded.driver, driver);
        assert!(!recorded.maintain_offset);
    }

    #[test]
    fn test_constraint_with_offset_leaves_driven() {
        let mut scene = MemoryScene::new();
        let driver = scene.create_transform("driver", None).unwrap();
        let driven = scene.create_transform("driven", None).unwrap();
        scene.set_world_position(driven, [0.0, 3.0, 0.0]).unwrap();

        scene.create_pose_constraint(driver, driven, true).unwrap();
        assert_eq!(scene.world_position(driven).unwrap(), [0.0, 3.0, 0.0]);
    }

    #[test]
    fn test_stale_handle_is_error() {
        let scene = MemoryScene::new();
        assert!(matches!(
            scene.world_position(NodeHandle(42)),
            Err(SceneError::StaleHandle(_))
        ));
    }

    #[test]
    fn test_lookup_by_name() {
        let mut scene = MemoryScene::new();
        let node = scene.create_transform("L_Arm_grp", None).unwrap();
        assert!(scene.node_exists("L_Arm_grp"));
        assert_eq!(scene.node_by_name("L_Arm_grp"), Some(node));
        assert_eq!(scene.node_by_name("R_Arm_grp"), None);
    }
}
