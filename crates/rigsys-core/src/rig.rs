//! The build orchestrator.
//!
//! A [`Rig`] owns every module across four per-variant registries, expands
//! the raw module set (mirror clones, implicit attachment resolver), sorts
//! the expanded set by build order, and executes each module's guide and
//! final phases against a scene backend. Orchestration is single-threaded
//! and synchronous; exactly one build is in flight per rig.

use std::path::PathBuf;

use crate::attach::AttachmentResolver;
use crate::error::{RigError, RigResult};
use crate::guide_data::GuideData;
use crate::mirror::mirror_name;
use crate::module::{BuildContext, ModuleKind, ModuleSet, RigModule};
use crate::report::{BuildReport, BuildWarning, ReportBuilder, WarnCode};
use crate::scene::{NodeHandle, SceneBackend};

/// Registry key used when the default attachment resolver is injected.
pub const RESOLVER_KEY: &str = "AttachmentResolver";

/// Options for a single [`Rig::build`] call.
#[derive(Debug, Clone, Default)]
pub struct BuildOptions {
    /// Stop building once a module's build order exceeds this level. Because
    /// the module list is sorted, the first module past the cutoff ends the
    /// build. `None` builds everything.
    pub build_level: Option<i32>,
    /// Run only the guide-placeholder phase of each module.
    pub proxies_only: bool,
    /// Load posed guide transforms from this file before building.
    pub guide_data: Option<PathBuf>,
}

/// The build orchestrator: owns all modules and runs the build.
pub struct Rig {
    /// Rig name; also the name of its root group in the scene.
    pub name: String,
    motion: ModuleSet,
    deformer: ModuleSet,
    utility: ModuleSet,
    export: ModuleSet,
    /// Modules whose phases completed in the current build, in order.
    built: Vec<(ModuleKind, String)>,
    root: Option<NodeHandle>,
}

impl Rig {
    /// Creates an empty rig.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            motion: ModuleSet::new(),
            deformer: ModuleSet::new(),
            utility: ModuleSet::new(),
            export: ModuleSet::new(),
            built: Vec::new(),
            root: None,
        }
    }

    /// Registers a module under a key, in the registry matching its variant.
    pub fn add<M: RigModule + 'static>(&mut self, key: impl Into<String>, module: M) -> RigResult<()> {
        let kind = module.kind();
        self.set_mut(kind).insert(key, Box::new(module))
    }

    /// The motion module registry.
    pub fn motion(&self) -> &ModuleSet {
        &self.motion
    }

    /// The deformer module registry.
    pub fn deformer(&self) -> &ModuleSet {
        &self.deformer
    }

    /// The utility module registry.
    pub fn utility(&self) -> &ModuleSet {
        &self.utility
    }

    /// The export module registry.
    pub fn export(&self) -> &ModuleSet {
        &self.export
    }

    /// Looks up a registered module mutably, searching all four registries.
    pub fn module_mut(&mut self, key: &str) -> Option<&mut Box<dyn RigModule>> {
        for kind in [
            ModuleKind::Motion,
            ModuleKind::Deformer,
            ModuleKind::Utility,
            ModuleKind::Export,
        ] {
            if self.set(kind).contains(key) {
                return self.set_mut(kind).get_mut(key);
            }
        }
        None
    }

    /// Modules completed by the current (or most recent) build, in execution
    /// order.
    pub fn built_keys(&self) -> &[(ModuleKind, String)] {
        &self.built
    }

    /// Handle of the rig's root group, once a build has run.
    pub fn root(&self) -> Option<NodeHandle> {
        self.root
    }

    fn set(&self, kind: ModuleKind) -> &ModuleSet {
        match kind {
            ModuleKind::Motion => &self.motion,
            ModuleKind::Deformer => &self.deformer,
            ModuleKind::Utility => &self.utility,
            ModuleKind::Export => &self.export,
        }
    }

    fn set_mut(&mut self, kind: ModuleKind) -> &mut ModuleSet {
        match kind {
            ModuleKind::Motion => &mut self.motion,
            ModuleKind::Deformer => &mut self.deformer,
            ModuleKind::Utility => &mut self.utility,
            ModuleKind::Export => &mut self.export,
        }
    }

    /// Declares `parent` as the parent module of `child`. Both keys must name
    /// registered motion modules.
    pub fn set_parent(&mut self, child: &str, parent: &str) -> RigResult<()> {
        if !self.motion.contains(parent) {
            return Err(RigError::UnknownModule {
                kind: "motion",
                key: parent.to_string(),
            });
        }
        match self.motion.get_mut(child) {
            None => Err(RigError::UnknownModule {
                kind: "motion",
                key: child.to_string(),
            }),
            Some(module) => {
                module.core_mut().parent = Some(parent.to_string());
                Ok(())
            }
        }
    }

    /// Expands the raw module set and returns the ordered build list.
    ///
    /// Expansion injects the default [`AttachmentResolver`] when no utility
    /// module claims the role, generates mirror clones for motion and
    /// utility modules that request one, and stable-sorts the result by
    /// build order (ties keep declaration order, registries walked motion,
    /// deformer, utility, export).
    ///
    /// Pre-build is pure graph work: no scene calls are made, and re-running
    /// it is idempotent (clones are generated at most once).
    pub fn pre_build(
        &mut self,
        report: &mut ReportBuilder,
    ) -> RigResult<Vec<(ModuleKind, String)>> {
        if !self.utility.iter().any(|(_, m)| m.is_attachment_resolver()) {
            self.utility
                .insert(RESOLVER_KEY, Box::new(AttachmentResolver::new()))?;
        }

        expand_mirrors(&mut self.motion, report)?;
        expand_mirrors(&mut self.utility, report)?;

        let mut order: Vec<(ModuleKind, String, i32)> = Vec::new();
        for kind in [
            ModuleKind::Motion,
            ModuleKind::Deformer,
            ModuleKind::Utility,
            ModuleKind::Export,
        ] {
            for (key, module) in self.set(kind).iter() {
                order.push((kind, key.to_string(), module.core().build_order));
            }
        }
        // Stable sort: declaration order breaks build-order ties.
        order.sort_by_key(|(_, _, build_order)| *build_order);

        Ok(order.into_iter().map(|(kind, key, _)| (kind, key)).collect())
    }

    /// Builds the rig into a scene.
    ///
    /// Configuration mistakes (a missing guide-data file, malformed guide
    /// numbers) fail fast as [`RigError`]; everything recoverable lands on
    /// the returned [`BuildReport`]. Rebuilding into a scene that already
    /// contains the rig's root group reuses it.
    pub fn build(
        &mut self,
        scene: &mut dyn SceneBackend,
        opts: &BuildOptions,
    ) -> RigResult<BuildReport> {
        let mut report = ReportBuilder::new(&self.name);

        let guide_data = match &opts.guide_data {
            Some(path) => Some(GuideData::load(path)?),
            None => None,
        };

        let order = self.pre_build(&mut report)?;

        let rig_root = scene.create_transform(&self.name, None)?;
        let guides_root = scene.create_transform(&format!("{}_guides", self.name), Some(rig_root))?;
        self.root = Some(rig_root);
        self.built.clear();

        for (kind, key) in order {
            {
                let Some(module) = self.set(kind).get(&key) else {
                    continue;
                };
                if module.core().is_muted {
                    continue;
                }
                if let Some(level) = opts.build_level {
                    // The list is sorted, so the first module past the
                    // cutoff means all remaining modules are past it too.
                    if module.core().build_order > level {
                        break;
                    }
                }
            }

            let mut module = match self.set_mut(kind).take(&key) {
                Some(module) => module,
                None => continue,
            };

            if let Some(doc) = &guide_data {
                apply_guide_data(module.as_mut(), doc, &mut report);
            }

            let result = {
                let mut ctx = BuildContext {
                    scene: &mut *scene,
                    rig: self,
                    rig_root,
                    guides_root,
                    report: &mut report,
                };
                module.build_guides(&mut ctx).and_then(|()| {
                    if opts.proxies_only {
                        Ok(())
                    } else {
                        module.build(&mut ctx)
                    }
                })
            };

            let full_name = module.core().full_name();
            if result.is_ok() && !opts.proxies_only {
                module.core_mut().is_run = true;
            }
            self.set_mut(kind).restore(&key, module);
            result?;

            report.module_built(&full_name);
            self.built.push((kind, key));
        }

        Ok(report.finish())
    }

    /// Captures the live placed guide transforms of every motion module and
    /// writes them to a guide-data file.
    ///
    /// Pre-build runs first so mirrored modules' guides are part of the
    /// capture. Guides whose placeholder is missing from the scene are
    /// skipped with a warning.
    pub fn save_guide_data(
        &mut self,
        scene: &dyn SceneBackend,
        path: &std::path::Path,
    ) -> RigResult<BuildReport> {
        let mut report = ReportBuilder::new(&self.name);
        let _ = self.pre_build(&mut report)?;

        let mut doc = GuideData::new();
        for (_, module) in self.motion.iter() {
            let core = module.core();
            let full_name = core.full_name();
            for proxy in &core.proxies {
                match proxy.capture(scene) {
                    None => report.warn(BuildWarning::for_module(
                        WarnCode::PlaceholderMissing,
                        format!("guide placeholder not in scene: {}", proxy.node_name()),
                        &full_name,
                    )),
                    Some(captured) => {
                        let (position, rotation) = captured?;
                        doc.set(&full_name, &proxy.name, position, rotation);
                    }
                }
            }
        }

        doc.save(path)?;
        Ok(report.finish())
    }
}

/// Generates mirror clones for every module in a registry that requests one.
///
/// Clones are registered under the side-flipped key and linked to their
/// source via the `mirror_source`/`mirror_of` back-reference keys. A module
/// that already has a clone is skipped, keeping expansion idempotent.
fn expand_mirrors(set: &mut ModuleSet, report: &mut ReportBuilder) -> RigResult<()> {
    let keys: Vec<String> = set.keys().map(str::to_string).collect();
    for key in keys {
        let Some(module) = set.get(&key) else { continue };
        if !module.core().mirror || module.core().mirror_of.is_some() {
            continue;
        }

        match module.mirrored() {
            None => {
                let full_name = module.core().full_name();
                report.warn(BuildWarning::for_module(
                    WarnCode::MirrorMiddleSkipped,
                    "middle-side module cannot be mirrored",
                    full_name,
                ));
            }
            Some(mut clone) => {
                let clone_key = mirror_name(&key);
                clone.core_mut().mirror = false;
                clone.core_mut().mirror_source = Some(key.clone());
                if let Some(source) = set.get_mut(&key) {
                    source.core_mut().mirror_of = Some(clone_key.clone());
                }
                set.insert(clone_key, clone)?;
            }
        }
    }
    Ok(())
}

/// Overwrites a module's authored guide transforms with saved ones.
fn apply_guide_data(module: &mut dyn RigModule, doc: &GuideData, report: &mut ReportBuilder) {
    let core = module.core_mut();
    if core.proxies.is_empty() {
        return;
    }
    let full_name = core.full_name();
    match doc.module(&full_name) {
        None => report.warn(BuildWarning::for_module(
            WarnCode::GuideEntryMissing,
            "no saved guide data for module; using authored defaults",
            full_name,
        )),
        Some(entries) => {
            for proxy in &mut core.proxies {
                if let Some(saved) = entries.get(&proxy.name) {
                    proxy.position = saved.position;
                    proxy.rotation = saved.rotation;
                }
            }
        }
    }
}
