//! Validate command implementation.
//!
//! Materializes a rig document and runs pre-build only: resolver
//! injection, mirror expansion, and build-order sorting, with no scene
//! calls. Prints the resulting execution order so attachment and
//! ordering mistakes surface before a full build.

use anyhow::Result;
use colored::Colorize;
use rigsys_core::{ModuleKind, ReportBuilder, Rig};
use serde::Serialize;
use std::path::Path;
use std::process::ExitCode;

use crate::doc::RigDoc;

#[derive(Serialize)]
struct ValidateOutput {
    rig: String,
    order: Vec<OrderEntry>,
    warnings: Vec<rigsys_core::BuildWarning>,
}

#[derive(Serialize)]
struct OrderEntry {
    key: String,
    kind: String,
    build_order: i32,
}

/// Runs the validate command.
pub fn run(rig_path: &str, json_output: bool) -> Result<ExitCode> {
    let doc = RigDoc::load(Path::new(rig_path))?;
    let mut rig = doc.materialize()?;

    let mut report = ReportBuilder::new(&doc.name);
    let order = rig.pre_build(&mut report)?;

    let entries: Vec<OrderEntry> = order
        .iter()
        .filter_map(|(kind, key)| {
            let module = set_for(&rig, *kind).get(key)?;
            Some(OrderEntry {
                key: key.clone(),
                kind: kind_name(*kind).to_string(),
                build_order: module.core().build_order,
            })
        })
        .collect();

    let warnings = report.warnings().to_vec();
    let clean = warnings.is_empty();

    if json_output {
        let output = ValidateOutput {
            rig: doc.name.clone(),
            order: entries,
            warnings,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("{} {}", "Validating:".cyan().bold(), doc.name);
        println!("\n{}", "Build order:".bold());
        for (i, entry) in entries.iter().enumerate() {
            println!(
                "  {:>2}. {} {}",
                i + 1,
                entry.key,
                format!("({}, {})", entry.kind, entry.build_order).dimmed()
            );
        }
        super::print_warnings(&warnings);
        if clean {
            println!("\n{} Rig document is valid", "SUCCESS".green().bold());
        } else {
            println!(
                "\n{} Rig document has {} warning(s)",
                "WARNINGS".yellow().bold(),
                warnings.len()
            );
        }
    }

    if clean {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::from(2))
    }
}

fn set_for(rig: &Rig, kind: ModuleKind) -> &rigsys_core::ModuleSet {
    match kind {
        ModuleKind::Motion => rig.motion(),
        ModuleKind::Deformer => rig.deformer(),
        ModuleKind::Utility => rig.utility(),
        ModuleKind::Export => rig.export(),
    }
}

fn kind_name(kind: ModuleKind) -> &'static str {
    match kind {
        ModuleKind::Motion => "motion",
        ModuleKind::Deformer => "deformer",
        ModuleKind::Utility => "utility",
        ModuleKind::Export => "export",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_clean_doc_succeeds() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("rig.json");
        std::fs::write(
            &path,
            r#"{
                "name": "ValidRig",
                "modules": [
                    { "key": "M_Root", "side": "M", "label": "Root", "kind": "root" }
                ]
            }"#,
        )
        .unwrap();

        let code = run(path.to_str().unwrap(), false).unwrap();
        assert_eq!(code, ExitCode::SUCCESS);
    }

    #[test]
    fn validate_middle_mirror_warns() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("rig.json");
        std::fs::write(
            &path,
            r#"{
                "name": "WarnRig",
                "modules": [
                    {
                        "key": "M_Spine", "side": "M", "label": "Spine", "kind": "chain",
                        "guides": ["Hips"], "mirror": true
                    }
                ]
            }"#,
        )
        .unwrap();

        let code = run(path.to_str().unwrap(), false).unwrap();
        assert_eq!(code, ExitCode::from(2));
    }
}
