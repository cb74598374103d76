//! Rig document parsing.
//!
//! A rig document is the declarative JSON form of a rig assembly: the rig
//! name plus one entry per module, each tagged with a `kind` selecting the
//! concrete variant and carrying the shared module fields (side, label,
//! build order, mirror/mute flags, attachment declaration).

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;

use rigsys_core::modules::motion::{Chain, Root};
use rigsys_core::modules::utility::BindJoints;
use rigsys_core::{Axis, Rig, RigModule, RigResult, Side};

/// A declarative rig description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RigDoc {
    /// Rig name; becomes the scene root group name.
    pub name: String,
    /// Modules, in declaration order.
    pub modules: Vec<ModuleDoc>,
}

/// One module entry in a rig document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModuleDoc {
    /// Registry key (e.g. "L_Arm").
    pub key: String,
    /// Side of the module; defaults to middle.
    #[serde(default)]
    pub side: Side,
    /// Label; empty falls back to the variant's type name.
    #[serde(default)]
    pub label: String,
    /// Override for the variant's default build order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub build_order: Option<i32>,
    /// Skip this module during builds.
    #[serde(default)]
    pub muted: bool,
    /// Generate a mirrored sibling during pre-build.
    #[serde(default)]
    pub mirror: bool,
    /// Registry key of the parent module.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
    /// Plug used when attaching to the parent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plug: Option<String>,
    /// Socket on the parent to attach to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub socket: Option<String>,
    /// Variant-specific parameters.
    #[serde(flatten)]
    pub recipe: ModuleRecipe,
}

/// Variant-specific module parameters, tagged by `kind`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ModuleRecipe {
    /// World root control.
    Root {
        /// Add a nested offset control.
        #[serde(default = "default_true")]
        offset: bool,
    },
    /// FK transform chain, one guide per name.
    Chain {
        /// Guide names, parent to tip.
        guides: Vec<String>,
        /// Axis aimed down the chain.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        primary_axis: Option<Axis>,
        /// Up-direction axis.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        up_axis: Option<Axis>,
    },
    /// Bind-skeleton threading utility.
    BindJoints {},
}

fn default_true() -> bool {
    true
}

impl RigDoc {
    /// Parses a document from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Loads a document from a file.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading rig document {}", path.display()))?;
        Self::from_json(&content)
            .with_context(|| format!("parsing rig document {}", path.display()))
    }

    /// Materializes the document into a live [`Rig`].
    pub fn materialize(&self) -> RigResult<Rig> {
        let mut rig = Rig::new(&self.name);
        for entry in &self.modules {
            match &entry.recipe {
                ModuleRecipe::Root { offset } => {
                    let mut module = Root::new(entry.side, &entry.label);
                    module.add_offset = *offset;
                    apply_common(&mut module, entry);
                    rig.add(&entry.key, module)?;
                }
                ModuleRecipe::Chain {
                    guides,
                    primary_axis,
                    up_axis,
                } => {
                    let names: Vec<&str> = guides.iter().map(String::as_str).collect();
                    let mut module = Chain::new(entry.side, &entry.label, &names);
                    if let Some(axis) = primary_axis {
                        module.primary_axis = *axis;
                    }
                    if let Some(axis) = up_axis {
                        module.up_axis = *axis;
                    }
                    apply_common(&mut module, entry);
                    rig.add(&entry.key, module)?;
                }
                ModuleRecipe::BindJoints {} => {
                    let mut module = BindJoints::new(&entry.label);
                    apply_common(&mut module, entry);
                    rig.add(&entry.key, module)?;
                }
            }
        }
        Ok(rig)
    }
}

fn apply_common<M: RigModule>(module: &mut M, entry: &ModuleDoc) {
    let core = module.core_mut();
    if let Some(build_order) = entry.build_order {
        core.build_order = build_order;
    }
    core.is_muted = entry.muted;
    core.mirror = entry.mirror;
    core.parent = entry.parent.clone();
    core.selected_plug = entry.plug.clone();
    core.selected_socket = entry.socket.clone();
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE: &str = r#"{
        "name": "ExampleRig",
        "modules": [
            { "key": "M_Root", "side": "M", "label": "Root", "kind": "root" },
            {
                "key": "M_Spine", "side": "M", "label": "Spine", "kind": "chain",
                "guides": ["Hips", "Chest"],
                "parent": "M_Root", "socket": "Root"
            },
            {
                "key": "L_Arm", "side": "L", "label": "Arm", "kind": "chain",
                "guides": ["Shoulder", "Elbow", "Wrist"],
                "mirror": true, "parent": "M_Spine", "socket": "Chest",
                "primary_axis": "+x"
            },
            { "key": "BindJoints", "kind": "bind_joints" }
        ]
    }"#;

    #[test]
    fn test_parse_example() {
        let doc = RigDoc::from_json(EXAMPLE).unwrap();
        assert_eq!(doc.name, "ExampleRig");
        assert_eq!(doc.modules.len(), 4);
        assert_eq!(doc.modules[2].side, Side::Left);
        assert!(doc.modules[2].mirror);
        assert!(matches!(
            doc.modules[3].recipe,
            ModuleRecipe::BindJoints {}
        ));
    }

    #[test]
    fn test_materialize() {
        let doc = RigDoc::from_json(EXAMPLE).unwrap();
        let rig = doc.materialize().unwrap();
        assert_eq!(rig.motion().len(), 3);
        assert_eq!(rig.utility().len(), 1);

        let arm = rig.motion().get("L_Arm").unwrap();
        assert_eq!(arm.core().parent.as_deref(), Some("M_Spine"));
        assert_eq!(arm.core().selected_socket.as_deref(), Some("Chest"));
        assert!(arm.core().mirror);
    }

    #[test]
    fn test_label_defaults_to_variant_name() {
        let doc = RigDoc::from_json(r#"{"name": "R", "modules": [{"key": "M_Root", "kind": "root"}]}"#)
            .unwrap();
        let rig = doc.materialize().unwrap();
        assert_eq!(rig.motion().get("M_Root").unwrap().core().label, "Root");
    }

    #[test]
    fn test_unknown_kind_rejected() {
        let json = r#"{"name": "R", "modules": [{"key": "X", "kind": "wobble"}]}"#;
        assert!(RigDoc::from_json(json).is_err());
    }

    #[test]
    fn test_round_trip() {
        let doc = RigDoc::from_json(EXAMPLE).unwrap();
        let json = serde_json::to_string_pretty(&doc).unwrap();
        let parsed = RigDoc::from_json(&json).unwrap();
        assert_eq!(parsed, doc);
    }
}
