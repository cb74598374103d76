//! Rig-document integration tests.
//!
//! Tests verify that a declarative JSON document materializes into the
//! same rig a caller would assemble programmatically, end to end through
//! a full build.
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p rigsys-tests --test rig_docs
//! ```

use pretty_assertions::assert_eq;
use rigsys_cli::doc::RigDoc;
use rigsys_core::{BuildOptions, RigModule, SceneBackend};
use rigsys_scene_memory::MemoryScene;

const BIPED_DOC: &str = r#"{
    "name": "Biped",
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
            "mirror": true, "parent": "M_Spine", "socket": "Chest"
        },
        {
            "key": "L_Leg", "side": "L", "label": "Leg", "kind": "chain",
            "guides": ["Hip", "Knee", "Ankle"],
            "mirror": true, "parent": "M_Spine", "socket": "Hips"
        },
        { "key": "BindJoints", "kind": "bind_joints" }
    ]
}"#;

#[test]
fn biped_doc_builds_end_to_end() {
    let doc = RigDoc::from_json(BIPED_DOC).unwrap();
    let mut rig = doc.materialize().unwrap();

    let mut scene = MemoryScene::new();
    let report = rig.build(&mut scene, &BuildOptions::default()).unwrap();

    assert!(report.is_clean());
    assert_eq!(
        report.modules_built,
        vec![
            "M_Root",
            "M_Spine",
            "L_Arm",
            "L_Leg",
            "R_Arm",
            "R_Leg",
            "M_BindJoints",
            "M_AttachmentResolver",
        ]
    );

    // Mirror clones registered for both limbs.
    assert_eq!(rig.motion().len(), 6);
    assert!(scene.node_exists("R_Leg_Knee_CTRL"));

    // The bind pass threaded the chain joints under the bind root.
    assert!(scene.node_exists("Biped_bind"));
    let hips_jnt = scene.node_by_name("M_Spine_Hips_jnt").unwrap();
    let bind_root = scene.node_by_name("Biped_bind").unwrap();
    assert_eq!(scene.parent_of(hips_jnt), Some(bind_root));
    let chest_jnt = scene.node_by_name("M_Spine_Chest_jnt").unwrap();
    assert_eq!(scene.parent_of(chest_jnt), Some(hips_jnt));
}

#[test]
fn doc_muting_carries_through_to_the_build() {
    let mut doc = RigDoc::from_json(BIPED_DOC).unwrap();
    doc.modules[3].muted = true; // L_Leg

    let mut rig = doc.materialize().unwrap();
    let mut scene = MemoryScene::new();
    let report = rig.build(&mut scene, &BuildOptions::default()).unwrap();

    assert!(!report.modules_built.iter().any(|m| m == "L_Leg"));
    // The clone inherits the mute flag.
    assert!(!report.modules_built.iter().any(|m| m == "R_Leg"));
    assert!(scene.node_exists("L_Arm_Wrist_CTRL"));
    assert!(!scene.node_exists("L_Leg_Knee_CTRL"));
}

#[test]
fn doc_build_order_override_reorders_modules() {
    let mut doc = RigDoc::from_json(BIPED_DOC).unwrap();
    doc.modules[1].build_order = Some(1500); // M_Spine before M_Root

    let mut rig = doc.materialize().unwrap();
    let mut scene = MemoryScene::new();
    let report = rig.build(&mut scene, &BuildOptions::default()).unwrap();

    assert_eq!(report.modules_built[0], "M_Spine");
    assert_eq!(report.modules_built[1], "M_Root");
    // The spine built before its parent existed, but attachment resolution
    // is late-bound, so the rig still wires up cleanly.
    assert!(report.is_clean());
}

#[test]
fn materialized_doc_matches_programmatic_assembly() {
    let doc = RigDoc::from_json(BIPED_DOC).unwrap();
    let rig = doc.materialize().unwrap();

    let arm = rig.motion().get("L_Arm").unwrap();
    assert_eq!(arm.core().full_name(), "L_Arm");
    assert_eq!(arm.core().proxies.len(), 3);
    assert_eq!(arm.core().parent.as_deref(), Some("M_Spine"));
    assert_eq!(arm.core().selected_socket.as_deref(), Some("Chest"));
    assert!(arm.core().mirror);

    let bind = rig.utility().get("BindJoints").unwrap();
    assert_eq!(bind.core().build_order, 3000);
}
