//! Attachment resolution.
//!
//! Plugs and sockets are late-bound: a module's sockets only exist after its
//! final-build phase has run, so attachment is resolved by a distinguished
//! utility module that runs after every motion module has been built. A
//! failed lookup skips that one attachment with a warning; partial rigs are
//! tolerated by design.

use crate::error::RigResult;
use crate::module::{BuildContext, ModuleCore, ModuleKind, RigModule};
use crate::report::{BuildWarning, WarnCode};
use crate::side::Side;

/// Plug used when a module does not select one explicitly.
pub const DEFAULT_PLUG: &str = "Local";

/// Plug receiving the global-space anchor constraint.
pub const WORLD_PLUG: &str = "World";

/// The utility module that wires child plugs to parent sockets.
///
/// Injected automatically by pre-build when no other utility module claims
/// the attachment-resolver role.
pub struct AttachmentResolver {
    core: ModuleCore,
}

impl AttachmentResolver {
    /// Creates the resolver with the default utility build order.
    pub fn new() -> Self {
        Self {
            core: ModuleCore::new(
                Side::Middle,
                "AttachmentResolver",
                ModuleKind::Utility.default_build_order(),
            ),
        }
    }
}

impl Default for AttachmentResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl RigModule for AttachmentResolver {
    fn kind(&self) -> ModuleKind {
        ModuleKind::Utility
    }

    fn core(&self) -> &ModuleCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut ModuleCore {
        &mut self.core
    }

    fn is_attachment_resolver(&self) -> bool {
        true
    }

    fn mirrored(&self) -> Option<Box<dyn RigModule>> {
        None
    }

    fn build(&mut self, ctx: &mut BuildContext<'_>) -> RigResult<()> {
        // The first-built motion module anchors global space: its last
        // registered socket drives every other module's World plug.
        let global_root = ctx
            .rig
            .built_keys()
            .iter()
            .find(|(kind, _)| *kind == ModuleKind::Motion)
            .and_then(|(_, key)| ctx.rig.motion().get(key))
            .and_then(|root| {
                root.core()
                    .last_socket()
                    .map(|(_, handle)| (root.core().full_name(), handle))
            });

        for (_, module) in ctx.rig.motion().iter() {
            let core = module.core();
            let full_name = core.full_name();

            if !core.is_run {
                ctx.report.warn(BuildWarning::for_module(
                    WarnCode::ModuleNotRun,
                    "module was never built; skipping attachment",
                    &full_name,
                ));
                continue;
            }

            if let Some(parent_key) = core.parent.as_deref() {
                match ctx.rig.motion().get(parent_key) {
                    None => {
                        ctx.report.warn(BuildWarning::for_module(
                            WarnCode::ParentNotFound,
                            format!("parent module not found: {}", parent_key),
                            &full_name,
                        ));
                    }
                    Some(parent) => {
                        let socket_name = core.selected_socket.as_deref().unwrap_or("");
                        match parent.core().socket(socket_name) {
                            None => {
                                ctx.report.warn(BuildWarning::for_module(
                                    WarnCode::SocketNotFound,
                                    format!(
                                        "socket not found on {}: {:?}",
                                        parent.core().full_name(),
                                        socket_name
                                    ),
                                    &full_name,
                                ));
                            }
                            Some(socket) => {
                                let plug_name =
                                    core.selected_plug.as_deref().unwrap_or(DEFAULT_PLUG);
                                match core.plug(plug_name) {
                                    None => {
                                        ctx.report.warn(BuildWarning::for_module(
                                            WarnCode::PlugNotFound,
                                            format!("plug not found: {:?}", plug_name),
                                            &full_name,
                                        ));
                                    }
                                    Some(plug) => {
                                        ctx.scene.create_pose_constraint(socket, plug, true)?;
                                    }
                                }
                            }
                        }
                    }
                }
            }

            // Global-space anchor, independent of the plug/socket chain.
            if let Some((ref root_full, root_socket)) = global_root {
                if *root_full != full_name {
                    match core.plug(WORLD_PLUG) {
                        Some(world_plug) => {
                            ctx.scene
                                .create_pose_constraint(root_socket, world_plug, true)?;
                        }
                        None => {
                            ctx.report.warn(BuildWarning::for_module(
                                WarnCode::PlugNotFound,
                                "no World plug; skipping global anchor",
                                &full_name,
                            ));
                        }
                    }
                }
            }
        }

        Ok(())
    }
}
