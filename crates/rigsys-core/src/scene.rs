//! Scene backend capability.
//!
//! The orchestrator never talks to a 3D host directly. Everything it needs
//! from the scene — node creation, parenting, world transforms, pose
//! constraints — goes through the [`SceneBackend`] trait, passed explicitly
//! into [`Rig::build`](crate::rig::Rig::build) instead of living in ambient
//! global state.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A world-space position or Euler rotation (degrees).
pub type Vec3 = [f64; 3];

/// Opaque handle to a scene node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeHandle(pub u32);

/// Opaque handle to a pose constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConstraintHandle(pub u32);

/// Errors surfaced by a scene backend.
#[derive(Debug, Error)]
pub enum SceneError {
    /// A handle did not resolve to a live node.
    #[error("stale node handle: {0:?}")]
    StaleHandle(NodeHandle),

    /// A backend-specific failure.
    #[error("scene backend error: {0}")]
    Backend(String),
}

/// Result alias for scene backend operations.
pub type SceneResult<T> = Result<T, SceneError>;

/// The operations the orchestration engine requires from a 3D scene host.
///
/// All operations are synchronous. Node creation is idempotent by name:
/// creating a node whose name already exists returns the existing node's
/// handle rather than erroring, which is what lets a rig be rebuilt into an
/// existing scene.
///
/// Pose constraints follow position and rotation with the backend's
/// shortest-path rotation interpolation, so large angular offsets between
/// driver and driven stay stable.
pub trait SceneBackend {
    /// Creates (or finds) a transform node with the given name.
    fn create_transform(
        &mut self,
        name: &str,
        parent: Option<NodeHandle>,
    ) -> SceneResult<NodeHandle>;

    /// Creates (or finds) a joint node with the given name.
    fn create_joint(&mut self, name: &str, parent: Option<NodeHandle>) -> SceneResult<NodeHandle>;

    /// Sets a node's world-space position.
    fn set_world_position(&mut self, node: NodeHandle, position: Vec3) -> SceneResult<()>;

    /// Sets a node's world-space rotation (Euler degrees).
    fn set_world_rotation(&mut self, node: NodeHandle, rotation: Vec3) -> SceneResult<()>;

    /// Reads a node's world-space position.
    fn world_position(&self, node: NodeHandle) -> SceneResult<Vec3>;

    /// Reads a node's world-space rotation (Euler degrees).
    fn world_rotation(&self, node: NodeHandle) -> SceneResult<Vec3>;

    /// Moves a node under a new parent (or to the scene root).
    fn reparent(&mut self, node: NodeHandle, new_parent: Option<NodeHandle>) -> SceneResult<()>;

    /// Creates a pose (position + rotation) constraint driving `driven` from
    /// `driver`. When `maintain_offset` is false the driven node snaps to the
    /// driver's pose.
    fn create_pose_constraint(
        &mut self,
        driver: NodeHandle,
        driven: NodeHandle,
        maintain_offset: bool,
    ) -> SceneResult<ConstraintHandle>;

    /// Returns true if a node with the given name exists.
    fn node_exists(&self, name: &str) -> bool;

    /// Looks up a node handle by name.
    fn node_by_name(&self, name: &str) -> Option<NodeHandle>;
}
