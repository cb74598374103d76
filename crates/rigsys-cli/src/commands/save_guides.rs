//! Save-guides command implementation.
//!
//! Places the rig's guides into an in-memory scene, captures their world
//! transforms, and writes them to a guide-data file. A later build can
//! apply the file with `--guides` to restore the captured placement.

use anyhow::Result;
use colored::Colorize;
use rigsys_core::BuildOptions;
use rigsys_scene_memory::MemoryScene;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::doc::RigDoc;

/// Runs the save-guides command.
pub fn run(
    rig_path: &str,
    output: &str,
    guides: Option<&str>,
    json_output: bool,
) -> Result<ExitCode> {
    let doc = RigDoc::load(Path::new(rig_path))?;
    let mut rig = doc.materialize()?;

    // Place guides first so every proxy has a live placeholder to capture.
    let opts = BuildOptions {
        build_level: None,
        proxies_only: true,
        guide_data: guides.map(PathBuf::from),
    };
    let mut scene = MemoryScene::new();
    rig.build(&mut scene, &opts)?;

    let report = rig.save_guide_data(&scene, Path::new(output))?;

    if json_output {
        println!("{}", report.to_json_pretty()?);
    } else {
        println!("{} {}", "Capturing guides:".cyan().bold(), report.rig);
        super::print_warnings(&report.warnings);
        println!(
            "\n{} Guide data written to {} ({}ms)",
            "SUCCESS".green().bold(),
            output,
            report.duration_ms
        );
    }

    if report.is_clean() {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::from(2))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rigsys_core::GuideData;

    const DOC: &str = r#"{
        "name": "GuideRig",
        "modules": [
            { "key": "M_Root", "side": "M", "label": "Root", "kind": "root" },
            {
                "key": "L_Arm", "side": "L", "label": "Arm", "kind": "chain",
                "guides": ["Shoulder", "Wrist"],
                "mirror": true, "parent": "M_Root", "socket": "Root"
            }
        ]
    }"#;

    #[test]
    fn save_guides_writes_all_motion_modules() {
        let tmp = tempfile::tempdir().unwrap();
        let rig_path = tmp.path().join("rig.json");
        std::fs::write(&rig_path, DOC).unwrap();
        let out_path = tmp.path().join("guides.json");

        let code = run(
            rig_path.to_str().unwrap(),
            out_path.to_str().unwrap(),
            None,
            false,
        )
        .unwrap();
        assert_eq!(code, ExitCode::SUCCESS);

        let data = GuideData::load(&out_path).unwrap();
        assert!(data.module("M_Root").is_some());
        assert!(data.module("L_Arm").is_some());
        // Mirror expansion runs before capture, so the clone is included.
        assert!(data.module("R_Arm").is_some());
    }
}
