//! Guide placeholders.
//!
//! A [`Proxy`] is the posable stand-in for part of a module: a transform the
//! operator can move around before the final rig is generated. Proxies are
//! declared in a module's constructor, placed into the scene during the
//! guide phase, and optionally round-tripped through a saved guide-data
//! document.

use serde::{Deserialize, Serialize};

use crate::scene::{NodeHandle, SceneBackend, SceneResult, Vec3};
use crate::side::Side;

/// A guide placeholder transform owned by a module.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Proxy {
    /// Side of the owning module.
    pub side: Side,
    /// Label of the owning module.
    pub label: String,
    /// Name of this guide, unique within the owning module.
    pub name: String,
    /// Authored (or loaded) world position.
    pub position: Vec3,
    /// Authored (or loaded) world rotation, Euler degrees.
    pub rotation: Vec3,
    /// Name of another guide in the same module to parent the placeholder
    /// under. Guides are declared in dependency order, so a parent is always
    /// placed before its children.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
    /// Marks the guide whose placement becomes the module's plug origin.
    #[serde(default)]
    pub is_attach_point: bool,
    /// Handle of the placed placeholder node, once the guide phase has run.
    #[serde(skip)]
    pub node: Option<NodeHandle>,
}

impl Proxy {
    /// Creates a guide at the origin.
    pub fn new(side: Side, label: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            side,
            label: label.into(),
            name: name.into(),
            position: [0.0, 0.0, 0.0],
            rotation: [0.0, 0.0, 0.0],
            parent: None,
            is_attach_point: false,
            node: None,
        }
    }

    /// Sets the authored position.
    pub fn at(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    /// Sets the authored rotation.
    pub fn rotated(mut self, rotation: Vec3) -> Self {
        self.rotation = rotation;
        self
    }

    /// Parents the placeholder under another guide of the same module.
    pub fn under(mut self, parent: impl Into<String>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    /// Marks this guide as the module's attachment point.
    pub fn attach_point(mut self) -> Self {
        self.is_attach_point = true;
        self
    }

    /// Identity key: `{side}_{label}_{name}`.
    pub fn key(&self) -> String {
        format!("{}_{}_{}", self.side.token(), self.label, self.name)
    }

    /// Name of the placeholder node in the scene.
    pub fn node_name(&self) -> String {
        format!("{}_proxy", self.key())
    }

    /// Returns the side-flipped reflection of this guide, or `None` for a
    /// middle guide.
    ///
    /// The reflection is a fixed affine transform across the YZ plane:
    /// `position' = (-x, y, z)`, `rotation' = (x, -y, -z)`. Guides carry
    /// absolute coordinates, so the transform is applied exactly once per
    /// guide and never compounds.
    pub fn mirrored(&self) -> Option<Proxy> {
        let side = self.side.mirrored()?;
        let [px, py, pz] = self.position;
        let [rx, ry, rz] = self.rotation;
        Some(Proxy {
            side,
            label: self.label.clone(),
            name: self.name.clone(),
            position: [-px, py, pz],
            rotation: [rx, -ry, -rz],
            parent: self.parent.clone(),
            is_attach_point: self.is_attach_point,
            node: None,
        })
    }

    /// Creates the placeholder node and poses it at the authored transform.
    ///
    /// `parent` is the module's guide group; a guide with a declared parent
    /// key is expected to be reparented by the caller once both placeholders
    /// exist.
    pub fn place(
        &mut self,
        scene: &mut dyn SceneBackend,
        parent: Option<NodeHandle>,
    ) -> SceneResult<NodeHandle> {
        let node = scene.create_transform(&self.node_name(), parent)?;
        scene.set_world_position(node, self.position)?;
        scene.set_world_rotation(node, self.rotation)?;
        self.node = Some(node);
        Ok(node)
    }

    /// Reads the live placed transform back from the scene, by node name.
    ///
    /// Returns `None` when the placeholder does not exist, which the caller
    /// reports as a per-guide warning.
    pub fn capture(&self, scene: &dyn SceneBackend) -> Option<SceneResult<(Vec3, Vec3)>> {
        let node = scene.node_by_name(&self.node_name())?;
        Some(
            scene
                .world_position(node)
                .and_then(|pos| scene.world_rotation(node).map(|rot| (pos, rot))),
        )
    }
}
