//! Build command implementation.
//!
//! Loads a rig document, assembles the rig, and builds it into an
//! in-memory scene. The scene is a validation target: the point of the
//! command is the build report (order, warnings, node counts), not a
//! persisted artifact.

use anyhow::Result;
use colored::Colorize;
use rigsys_core::BuildOptions;
use rigsys_scene_memory::MemoryScene;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::doc::RigDoc;

/// Runs the build command.
///
/// Exit code: 0 on a clean build, 2 when the build completed with
/// warnings, 1 on a configuration error.
pub fn run(
    rig_path: &str,
    build_level: Option<i32>,
    proxies_only: bool,
    guides: Option<&str>,
    json_output: bool,
) -> Result<ExitCode> {
    let doc = RigDoc::load(Path::new(rig_path))?;
    let mut rig = doc.materialize()?;

    let opts = BuildOptions {
        build_level,
        proxies_only,
        guide_data: guides.map(PathBuf::from),
    };

    let mut scene = MemoryScene::new();
    let report = rig.build(&mut scene, &opts)?;

    if json_output {
        println!("{}", report.to_json_pretty()?);
    } else {
        println!("{} {}", "Building:".cyan().bold(), report.rig);
        if let Some(level) = build_level {
            println!("{} <= {}", "Build level:".dimmed(), level);
        }
        if proxies_only {
            println!("{}", "Guide placement only (no module build)".dimmed());
        }
        for full_name in &report.modules_built {
            println!("  {} {}", "+".green(), full_name);
        }
        println!(
            "{} {} nodes, {} constraints",
            "Scene:".dimmed(),
            scene.node_count(),
            scene.constraints().len()
        );
        super::print_warnings(&report.warnings);
        println!(
            "\n{} Built {} module(s) ({}ms)",
            "SUCCESS".green().bold(),
            report.modules_built.len(),
            report.duration_ms
        );
    }

    if report.is_clean() {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::from(2))
    }
}
