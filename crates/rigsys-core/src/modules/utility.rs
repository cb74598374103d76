//! Utility modules operating over the assembled rig.

use crate::error::RigResult;
use crate::module::{default_label, BuildContext, ModuleCore, ModuleKind, RigModule};
use crate::report::{BuildWarning, WarnCode};
use crate::side::Side;

/// Threads every module's bind-joint contributions into the rig-wide bind
/// skeleton.
///
/// Walks the motion and deformer registries, looks up each declared child
/// joint by name, and reparents it under its declared parent joint, or under
/// the `{rig}_bind` group when no parent is declared. Joints missing from
/// the scene are skipped with a warning.
pub struct BindJoints {
    core: ModuleCore,
}

impl BindJoints {
    /// Creates the bind-skeleton utility. An empty label defaults to
    /// "BindJoints".
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            core: ModuleCore::new(
                Side::Middle,
                default_label(label, "BindJoints"),
                ModuleKind::Utility.default_build_order(),
            ),
        }
    }
}

impl RigModule for BindJoints {
    fn kind(&self) -> ModuleKind {
        ModuleKind::Utility
    }

    fn core(&self) -> &ModuleCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut ModuleCore {
        &mut self.core
    }

    fn mirrored(&self) -> Option<Box<dyn RigModule>> {
        None
    }

    fn build(&mut self, ctx: &mut BuildContext<'_>) -> RigResult<()> {
        let bind_root = ctx
            .scene
            .create_transform(&format!("{}_bind", ctx.rig.name), Some(ctx.rig_root))?;

        let contributions: Vec<(String, String, Option<String>)> = ctx
            .rig
            .motion()
            .iter()
            .chain(ctx.rig.deformer().iter())
            .flat_map(|(_, module)| {
                let full_name = module.core().full_name();
                module
                    .core()
                    .bind_joints
                    .iter()
                    .map(move |(child, parent)| (full_name.clone(), child.clone(), parent.clone()))
            })
            .collect();

        for (full_name, child, parent) in contributions {
            let Some(child_node) = ctx.scene.node_by_name(&child) else {
                ctx.report.warn(BuildWarning::for_module(
                    WarnCode::BindJointMissing,
                    format!("bind joint not in scene: {}", child),
                    &full_name,
                ));
                continue;
            };

            let parent_node = match parent.as_deref() {
                None => bind_root,
                Some(parent_name) => match ctx.scene.node_by_name(parent_name) {
                    Some(node) => node,
                    None => {
                        ctx.report.warn(BuildWarning::for_module(
                            WarnCode::BindJointMissing,
                            format!("bind joint parent not in scene: {}", parent_name),
                            &full_name,
                        ));
                        bind_root
                    }
                },
            };

            ctx.scene.reparent(child_node, Some(parent_node))?;
        }

        Ok(())
    }
}
