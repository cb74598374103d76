//! Module contract and shared module state.
//!
//! A module is a named, build-ordered unit that contributes one piece of the
//! rig: a motion chain, a deformer, a utility step, or an export step.
//! Concrete variants implement [`RigModule`]; the shared bookkeeping (side,
//! label, guides, sockets, plugs, attachment declaration) lives in
//! [`ModuleCore`] so the orchestrator and the mirroring engine can work over
//! any variant uniformly.

use crate::error::{RigError, RigResult};
use crate::mirror::{mirror_name, mirror_opt, mirror_pairs};
use crate::proxy::Proxy;
use crate::report::ReportBuilder;
use crate::rig::Rig;
use crate::scene::{NodeHandle, SceneBackend};
use crate::side::Side;

/// The four module variants, each with its own registry and default build
/// order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModuleKind {
    /// Animation-facing construction (chains, roots, limbs). Order 2000.
    Motion,
    /// Deformation setup (skinning, correctives). Order 2000.
    Deformer,
    /// Post-passes over the assembled rig. Order 3000.
    Utility,
    /// Final export steps. Order 5000.
    Export,
}

impl ModuleKind {
    /// Returns the default build order for this variant.
    pub fn default_build_order(&self) -> i32 {
        match self {
            ModuleKind::Motion => 2000,
            ModuleKind::Deformer => 2000,
            ModuleKind::Utility => 3000,
            ModuleKind::Export => 5000,
        }
    }

    /// Returns the variant name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            ModuleKind::Motion => "motion",
            ModuleKind::Deformer => "deformer",
            ModuleKind::Utility => "utility",
            ModuleKind::Export => "export",
        }
    }
}

impl std::fmt::Display for ModuleKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Resolves a possibly-empty label to the variant's type name.
pub fn default_label(label: impl Into<String>, fallback: &str) -> String {
    let label = label.into();
    if label.is_empty() {
        fallback.to_string()
    } else {
        label
    }
}

/// State shared by every module variant.
///
/// Sockets and plugs are insertion-ordered: "the last socket" of a module is
/// the one registered most recently during its final-build phase.
#[derive(Debug, Clone, Default)]
pub struct ModuleCore {
    /// Side of the module.
    pub side: Side,
    /// Module label; combined with the side token it forms the full name.
    pub label: String,
    /// Position in the global build sequence.
    pub build_order: i32,
    /// Muted modules are skipped entirely during a build.
    pub is_muted: bool,
    /// Request a mirrored sibling during pre-build expansion.
    pub mirror: bool,
    /// Registry key of the parent module, if this module attaches to one.
    pub parent: Option<String>,
    /// Plug to use when attaching to the parent; defaults to "Local".
    pub selected_plug: Option<String>,
    /// Socket on the parent to attach to.
    pub selected_socket: Option<String>,
    /// Guide placeholders, in declaration (dependency) order.
    pub proxies: Vec<Proxy>,
    /// Attachment outputs, populated during the final-build phase.
    sockets: Vec<(String, NodeHandle)>,
    /// Attachment inputs, populated during the final-build phase.
    plugs: Vec<(String, NodeHandle)>,
    /// Bind-skeleton contributions: child joint name to parent joint name
    /// (`None` threads the child under the rig-wide bind root).
    pub bind_joints: Vec<(String, Option<String>)>,
    /// Set once the final-build phase has completed.
    pub is_run: bool,
    /// On a generated clone: registry key of the module it was mirrored from.
    pub mirror_source: Option<String>,
    /// On a mirrored original: registry key of its generated clone.
    pub mirror_of: Option<String>,
}

impl ModuleCore {
    /// Creates module state with the given side, label, and build order.
    pub fn new(side: Side, label: impl Into<String>, build_order: i32) -> Self {
        Self {
            side,
            label: label.into(),
            build_order,
            ..Default::default()
        }
    }

    /// Full name: `{side}_{label}`.
    pub fn full_name(&self) -> String {
        format!("{}_{}", self.side.token(), self.label)
    }

    /// Registers (or replaces) a socket.
    pub fn set_socket(&mut self, name: impl Into<String>, node: NodeHandle) {
        let name = name.into();
        if let Some(entry) = self.sockets.iter_mut().find(|(n, _)| *n == name) {
            entry.1 = node;
        } else {
            self.sockets.push((name, node));
        }
    }

    /// Looks up a socket by name.
    pub fn socket(&self, name: &str) -> Option<NodeHandle> {
        self.sockets
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, h)| *h)
    }

    /// Returns the most recently registered socket.
    pub fn last_socket(&self) -> Option<(&str, NodeHandle)> {
        self.sockets.last().map(|(n, h)| (n.as_str(), *h))
    }

    /// Returns all sockets in registration order.
    pub fn sockets(&self) -> &[(String, NodeHandle)] {
        &self.sockets
    }

    /// Registers (or replaces) a plug.
    pub fn set_plug(&mut self, name: impl Into<String>, node: NodeHandle) {
        let name = name.into();
        if let Some(entry) = self.plugs.iter_mut().find(|(n, _)| *n == name) {
            entry.1 = node;
        } else {
            self.plugs.push((name, node));
        }
    }

    /// Looks up a plug by name.
    pub fn plug(&self, name: &str) -> Option<NodeHandle> {
        self.plugs.iter().find(|(n, _)| n == name).map(|(_, h)| *h)
    }

    /// Returns all plugs in registration order.
    pub fn plugs(&self) -> &[(String, NodeHandle)] {
        &self.plugs
    }

    /// Adds a guide placeholder.
    pub fn add_proxy(&mut self, proxy: Proxy) {
        self.proxies.push(proxy);
    }

    /// Looks up a guide by name.
    pub fn proxy(&self, name: &str) -> Option<&Proxy> {
        self.proxies.iter().find(|p| p.name == name)
    }

    /// Declares a bind-skeleton joint under an optional parent joint.
    pub fn add_bind_joint(&mut self, child: impl Into<String>, parent: Option<String>) {
        self.bind_joints.push((child.into(), parent));
    }

    /// Returns the side-flipped clone of this state, or `None` for a middle
    /// module.
    ///
    /// Every name field is flipped through the `L_`/`R_` convention; guides
    /// are reflected across the mirror plane (middle guides are carried over
    /// unchanged); runtime-populated fields (sockets, plugs, `is_run`) are
    /// reset, since the clone is built independently. The clone's `mirror`
    /// flag is cleared so expansion never recurses.
    pub fn mirrored(&self) -> Option<ModuleCore> {
        let side = self.side.mirrored()?;
        let proxies = self
            .proxies
            .iter()
            .map(|p| p.mirrored().unwrap_or_else(|| p.clone()))
            .collect();
        Some(ModuleCore {
            side,
            label: mirror_name(&self.label),
            build_order: self.build_order,
            is_muted: self.is_muted,
            mirror: false,
            parent: mirror_opt(&self.parent),
            selected_plug: mirror_opt(&self.selected_plug),
            selected_socket: mirror_opt(&self.selected_socket),
            proxies,
            sockets: Vec::new(),
            plugs: Vec::new(),
            bind_joints: mirror_pairs(&self.bind_joints),
            is_run: false,
            mirror_source: None,
            mirror_of: None,
        })
    }
}

/// Everything a module may touch while its phases run: the scene backend,
/// the (read-only) rest of the rig, the rig's scene groups, and the report.
pub struct BuildContext<'a> {
    /// The scene backend for this build.
    pub scene: &'a mut dyn SceneBackend,
    /// The orchestrator, minus the module currently being built.
    pub rig: &'a Rig,
    /// Root group node of the rig.
    pub rig_root: NodeHandle,
    /// Group node collecting guide placeholders.
    pub guides_root: NodeHandle,
    /// Diagnostic sink for the current build.
    pub report: &'a mut ReportBuilder,
}

/// The contract every module variant implements.
pub trait RigModule {
    /// This module's variant.
    fn kind(&self) -> ModuleKind;

    /// Shared module state.
    fn core(&self) -> &ModuleCore;

    /// Shared module state, mutable.
    fn core_mut(&mut self) -> &mut ModuleCore;

    /// Guide-placeholder phase: materialize this module's proxies.
    ///
    /// The default places every declared guide in declaration order,
    /// parenting under the previously placed guide named by `parent`, or
    /// under the rig's guide group.
    fn build_guides(&mut self, ctx: &mut BuildContext<'_>) -> RigResult<()> {
        let core = self.core_mut();
        for i in 0..core.proxies.len() {
            let parent = match core.proxies[i].parent.as_deref() {
                Some(parent_name) => core
                    .proxies
                    .iter()
                    .find(|p| p.name == parent_name)
                    .and_then(|p| p.node)
                    .or(Some(ctx.guides_root)),
                None => Some(ctx.guides_root),
            };
            core.proxies[i].place(ctx.scene, parent)?;
        }
        Ok(())
    }

    /// Final construction phase.
    fn build(&mut self, ctx: &mut BuildContext<'_>) -> RigResult<()>;

    /// Produces the side-flipped sibling of this module, or `None` for a
    /// middle module. Each variant declares exactly which of its own fields
    /// mirror and how.
    fn mirrored(&self) -> Option<Box<dyn RigModule>>;

    /// True for the utility module that performs attachment resolution. Used
    /// by pre-build to decide whether to inject the default resolver.
    fn is_attachment_resolver(&self) -> bool {
        false
    }
}

/// An insertion-ordered module registry.
///
/// Declaration order is semantic: build-order ties are broken by it, and
/// attachment resolution walks modules in it. A module is temporarily taken
/// out of its slot while its phases run; iteration skips the hole.
#[derive(Default)]
pub struct ModuleSet {
    entries: Vec<(String, Option<Box<dyn RigModule>>)>,
}

impl ModuleSet {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a module under a key. Keys are unique per registry.
    pub fn insert(&mut self, key: impl Into<String>, module: Box<dyn RigModule>) -> RigResult<()> {
        let key = key.into();
        if self.contains(&key) {
            return Err(RigError::DuplicateModule(key));
        }
        self.entries.push((key, Some(module)));
        Ok(())
    }

    /// Returns true if a module is registered under the key.
    pub fn contains(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    /// Looks up a module by key.
    pub fn get(&self, key: &str) -> Option<&dyn RigModule> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .and_then(|(_, m)| m.as_deref())
    }

    /// Looks up a module by key, mutable.
    pub fn get_mut(&mut self, key: &str) -> Option<&mut Box<dyn RigModule>> {
        self.entries
            .iter_mut()
            .find(|(k, _)| k == key)
            .and_then(|(_, m)| m.as_mut())
    }

    /// Iterates modules in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &dyn RigModule)> {
        self.entries
            .iter()
            .filter_map(|(k, m)| m.as_deref().map(|m| (k.as_str(), m)))
    }

    /// Iterates registry keys in declaration order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// Number of registered modules.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no modules are registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Takes a module out of its slot, leaving a hole, so it can be built
    /// while the rest of the registry stays borrowable.
    pub(crate) fn take(&mut self, key: &str) -> Option<Box<dyn RigModule>> {
        self.entries
            .iter_mut()
            .find(|(k, _)| k == key)
            .and_then(|(_, m)| m.take())
    }

    /// Puts a taken module back into its slot.
    pub(crate) fn restore(&mut self, key: &str, module: Box<dyn RigModule>) {
        if let Some(entry) = self.entries.iter_mut().find(|(k, _)| k == key) {
            entry.1 = Some(module);
        }
    }
}

impl std::fmt::Debug for ModuleSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.entries.iter().map(|(k, _)| k))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_build_orders() {
        assert_eq!(ModuleKind::Motion.default_build_order(), 2000);
        assert_eq!(ModuleKind::Deformer.default_build_order(), 2000);
        assert_eq!(ModuleKind::Utility.default_build_order(), 3000);
        assert_eq!(ModuleKind::Export.default_build_order(), 5000);
    }

    #[test]
    fn test_full_name() {
        let core = ModuleCore::new(Side::Left, "Arm", 2000);
        assert_eq!(core.full_name(), "L_Arm");
    }

    #[test]
    fn test_default_label() {
        assert_eq!(default_label("", "Root"), "Root");
        assert_eq!(default_label("Pelvis", "Root"), "Pelvis");
    }

    #[test]
    fn test_sockets_keep_insertion_order() {
        let mut core = ModuleCore::new(Side::Middle, "Spine", 2000);
        core.set_socket("Hips", NodeHandle(1));
        core.set_socket("Chest", NodeHandle(2));
        core.set_socket("Hips", NodeHandle(3));

        assert_eq!(core.socket("Hips"), Some(NodeHandle(3)));
        assert_eq!(core.last_socket(), Some(("Chest", NodeHandle(2))));
        assert_eq!(core.sockets().len(), 2);
    }

    #[test]
    fn test_core_mirrored_flips_names_and_resets_state() {
        let mut core = ModuleCore::new(Side::Left, "Arm", 2000);
        core.mirror = true;
        core.parent = Some("M_Spine".to_string());
        core.selected_socket = Some("Chest".to_string());
        core.add_proxy(Proxy::new(Side::Left, "Arm", "Shoulder").at([1.0, 2.0, 3.0]));
        core.add_bind_joint("L_Arm_01_jnt", None);
        core.set_socket("Wrist", NodeHandle(9));
        core.is_run = true;

        let mirrored = core.mirrored().unwrap();
        assert_eq!(mirrored.side, Side::Right);
        assert_eq!(mirrored.full_name(), "R_Arm");
        assert!(!mirrored.mirror);
        assert!(!mirrored.is_run);
        // Middle parent key survives unchanged.
        assert_eq!(mirrored.parent.as_deref(), Some("M_Spine"));
        assert_eq!(mirrored.bind_joints[0].0, "R_Arm_01_jnt");
        assert_eq!(mirrored.proxies[0].position, [-1.0, 2.0, 3.0]);
        assert!(mirrored.sockets().is_empty());
    }

    #[test]
    fn test_core_mirrored_flips_sided_parent() {
        let mut core = ModuleCore::new(Side::Left, "Hand", 2000);
        core.parent = Some("L_Arm".to_string());
        let mirrored = core.mirrored().unwrap();
        assert_eq!(mirrored.parent.as_deref(), Some("R_Arm"));
    }

    #[test]
    fn test_middle_core_does_not_mirror() {
        let core = ModuleCore::new(Side::Middle, "Spine", 2000);
        assert!(core.mirrored().is_none());
    }
}
