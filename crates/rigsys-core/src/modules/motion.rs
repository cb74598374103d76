//! Motion modules: the world root and a simple FK transform chain.

use crate::error::RigResult;
use crate::module::{default_label, BuildContext, ModuleCore, ModuleKind, RigModule};
use crate::proxy::Proxy;
use crate::side::{Axis, Side};

/// World root motion module.
///
/// Builds the rig's top-level control (plus an optional offset control) at
/// its single guide, and exposes a "Root" socket that typically anchors the
/// whole attachment chain.
pub struct Root {
    core: ModuleCore,
    /// Adds a nested offset control under the root control.
    pub add_offset: bool,
}

impl Root {
    /// Creates a root module. An empty label defaults to "Root".
    pub fn new(side: Side, label: impl Into<String>) -> Self {
        let label = default_label(label, "Root");
        let mut core = ModuleCore::new(side, &label, ModuleKind::Motion.default_build_order());
        core.add_proxy(Proxy::new(side, &label, "Root").attach_point());
        Self {
            core,
            add_offset: true,
        }
    }
}

impl RigModule for Root {
    fn kind(&self) -> ModuleKind {
        ModuleKind::Motion
    }

    fn core(&self) -> &ModuleCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut ModuleCore {
        &mut self.core
    }

    fn mirrored(&self) -> Option<Box<dyn RigModule>> {
        Some(Box::new(Root {
            core: self.core.mirrored()?,
            add_offset: self.add_offset,
        }))
    }

    fn build(&mut self, ctx: &mut BuildContext<'_>) -> RigResult<()> {
        let core = &mut self.core;
        let full_name = core.full_name();
        let (position, rotation) = core
            .proxy("Root")
            .map(|p| (p.position, p.rotation))
            .unwrap_or_default();

        let grp = ctx
            .scene
            .create_transform(&format!("{}_grp", full_name), Some(ctx.rig_root))?;
        let ctrl = ctx
            .scene
            .create_transform(&format!("{}_CTRL", full_name), Some(grp))?;

        let tip = if self.add_offset {
            let offset_grp = ctx
                .scene
                .create_transform(&format!("{}_Offset_grp", full_name), Some(ctrl))?;
            ctx.scene
                .create_transform(&format!("{}_Offset_CTRL", full_name), Some(offset_grp))?
        } else {
            ctrl
        };

        ctx.scene.set_world_position(grp, position)?;
        ctx.scene.set_world_rotation(grp, rotation)?;

        core.set_socket("Root", tip);

        let local = ctx
            .scene
            .create_transform(&format!("{}_Local", full_name), Some(tip))?;
        ctx.scene.set_world_position(local, position)?;
        let world = ctx
            .scene
            .create_transform(&format!("{}_World", full_name), Some(grp))?;
        core.set_plug("Local", local);
        core.set_plug("World", world);

        Ok(())
    }
}

/// A forward-kinematics transform chain with one control and one joint per
/// guide.
///
/// Each guide becomes a socket named after it, so children can attach
/// anywhere along the chain. The chain's joints are declared as bind-joint
/// contributions, threaded parent-to-child.
pub struct Chain {
    core: ModuleCore,
    /// Axis aimed down the chain.
    pub primary_axis: Axis,
    /// Axis resolving the chain's up direction.
    pub up_axis: Axis,
}

impl Chain {
    /// Creates a chain with one guide per name, each parented under the
    /// previous. An empty label defaults to "Chain".
    pub fn new(side: Side, label: impl Into<String>, guides: &[&str]) -> Self {
        let label = default_label(label, "Chain");
        let mut core = ModuleCore::new(side, &label, ModuleKind::Motion.default_build_order());
        for (i, name) in guides.iter().enumerate() {
            let mut proxy = Proxy::new(side, &label, *name).at([0.0, 2.0 * i as f64, 0.0]);
            if i > 0 {
                proxy = proxy.under(guides[i - 1]);
            } else {
                proxy = proxy.attach_point();
            }
            core.add_proxy(proxy);
        }
        Self {
            core,
            primary_axis: Axis::PosX,
            up_axis: Axis::PosY,
        }
    }
}

impl RigModule for Chain {
    fn kind(&self) -> ModuleKind {
        ModuleKind::Motion
    }

    fn core(&self) -> &ModuleCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut ModuleCore {
        &mut self.core
    }

    fn mirrored(&self) -> Option<Box<dyn RigModule>> {
        Some(Box::new(Chain {
            core: self.core.mirrored()?,
            primary_axis: self.primary_axis.mirrored(),
            up_axis: self.up_axis.mirrored(),
        }))
    }

    fn build(&mut self, ctx: &mut BuildContext<'_>) -> RigResult<()> {
        let core = &mut self.core;
        let full_name = core.full_name();

        let grp = ctx
            .scene
            .create_transform(&format!("{}_grp", full_name), Some(ctx.rig_root))?;

        // Rebuilds re-declare the bind skeleton from scratch.
        core.bind_joints.clear();

        let mut prev_ctrl = None;
        let mut prev_joint_name: Option<String> = None;
        for i in 0..core.proxies.len() {
            let (key, position, rotation) = {
                let proxy = &core.proxies[i];
                (proxy.key(), proxy.position, proxy.rotation)
            };

            let ctrl = ctx
                .scene
                .create_transform(&format!("{}_CTRL", key), Some(prev_ctrl.unwrap_or(grp)))?;
            ctx.scene.set_world_position(ctrl, position)?;
            ctx.scene.set_world_rotation(ctrl, rotation)?;

            let joint_name = format!("{}_jnt", key);
            let joint = ctx.scene.create_joint(&joint_name, Some(ctrl))?;
            ctx.scene.set_world_position(joint, position)?;
            ctx.scene.set_world_rotation(joint, rotation)?;
            core.add_bind_joint(&joint_name, prev_joint_name.take());

            let socket_name = core.proxies[i].name.clone();
            core.set_socket(socket_name, ctrl);

            prev_ctrl = Some(ctrl);
            prev_joint_name = Some(joint_name);
        }

        let start = core
            .proxies
            .first()
            .map(|p| (p.position, p.rotation))
            .unwrap_or_default();
        let local = ctx
            .scene
            .create_transform(&format!("{}_Local", full_name), Some(grp))?;
        ctx.scene.set_world_position(local, start.0)?;
        ctx.scene.set_world_rotation(local, start.1)?;
        let world = ctx
            .scene
            .create_transform(&format!("{}_World", full_name), Some(grp))?;
        core.set_plug("Local", local);
        core.set_plug("World", world);

        Ok(())
    }
}
