//! rigsys CLI - command-line interface for modular rig assembly
//!
//! This binary provides commands for validating and building rig
//! documents and for capturing guide placement to guide-data files.

use clap::{Parser, Subcommand};
use std::process::ExitCode;

use rigsys_cli::commands;

/// rigsys - modular rig assembly
#[derive(Parser)]
#[command(name = "rigsys")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a rig document into an in-memory scene and report the result
    Build {
        /// Path to the rig document (JSON)
        #[arg(short, long)]
        rig: String,

        /// Only build modules at or below this build order
        #[arg(long, allow_hyphen_values = true)]
        build_level: Option<i32>,

        /// Place guides only; skip the module build phase
        #[arg(long)]
        proxies_only: bool,

        /// Path to a guide-data file to apply before building
        #[arg(short, long)]
        guides: Option<String>,

        /// Output machine-readable JSON report (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Capture guide placement and write it to a guide-data file
    SaveGuides {
        /// Path to the rig document (JSON)
        #[arg(short, long)]
        rig: String,

        /// Output guide-data file path
        #[arg(short, long)]
        output: String,

        /// Apply an existing guide-data file before capturing
        #[arg(short, long)]
        guides: Option<String>,

        /// Output machine-readable JSON report (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Check a rig document and print its build order without building
    Validate {
        /// Path to the rig document (JSON)
        #[arg(short, long)]
        rig: String,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Build {
            rig,
            build_level,
            proxies_only,
            guides,
            json,
        } => commands::build::run(&rig, build_level, proxies_only, guides.as_deref(), json),
        Commands::SaveGuides {
            rig,
            output,
            guides,
            json,
        } => commands::save_guides::run(&rig, &output, guides.as_deref(), json),
        Commands::Validate { rig, json } => commands::validate::run(&rig, json),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", colored::Colorize::red("error"), e);
            ExitCode::from(1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_build() {
        let cli = Cli::try_parse_from(["rigsys", "build", "--rig", "rig.json"]).unwrap();
        match cli.command {
            Commands::Build {
                rig,
                build_level,
                proxies_only,
                guides,
                json,
            } => {
                assert_eq!(rig, "rig.json");
                assert!(build_level.is_none());
                assert!(!proxies_only);
                assert!(guides.is_none());
                assert!(!json);
            }
            _ => panic!("expected build command"),
        }
    }

    #[test]
    fn test_cli_parses_build_with_level_and_guides() {
        let cli = Cli::try_parse_from([
            "rigsys",
            "build",
            "--rig",
            "rig.json",
            "--build-level",
            "2000",
            "--guides",
            "guides.json",
            "--json",
        ])
        .unwrap();
        match cli.command {
            Commands::Build {
                rig,
                build_level,
                proxies_only,
                guides,
                json,
            } => {
                assert_eq!(rig, "rig.json");
                assert_eq!(build_level, Some(2000));
                assert!(!proxies_only);
                assert_eq!(guides.as_deref(), Some("guides.json"));
                assert!(json);
            }
            _ => panic!("expected build command"),
        }
    }

    #[test]
    fn test_cli_parses_build_proxies_only() {
        let cli =
            Cli::try_parse_from(["rigsys", "build", "--rig", "rig.json", "--proxies-only"])
                .unwrap();
        match cli.command {
            Commands::Build { proxies_only, .. } => assert!(proxies_only),
            _ => panic!("expected build command"),
        }
    }

    #[test]
    fn test_cli_parses_save_guides() {
        let cli = Cli::try_parse_from([
            "rigsys",
            "save-guides",
            "--rig",
            "rig.json",
            "--output",
            "guides.json",
        ])
        .unwrap();
        match cli.command {
            Commands::SaveGuides {
                rig,
                output,
                guides,
                json,
            } => {
                assert_eq!(rig, "rig.json");
                assert_eq!(output, "guides.json");
                assert!(guides.is_none());
                assert!(!json);
            }
            _ => panic!("expected save-guides command"),
        }
    }

    #[test]
    fn test_cli_requires_output_for_save_guides() {
        let err = Cli::try_parse_from(["rigsys", "save-guides", "--rig", "rig.json"])
            .err()
            .unwrap();
        assert!(err.to_string().contains("--output"));
    }

    #[test]
    fn test_cli_parses_validate() {
        let cli = Cli::try_parse_from(["rigsys", "validate", "--rig", "rig.json", "--json"])
            .unwrap();
        match cli.command {
            Commands::Validate { rig, json } => {
                assert_eq!(rig, "rig.json");
                assert!(json);
            }
            _ => panic!("expected validate command"),
        }
    }

    #[test]
    fn test_cli_requires_rig_for_build() {
        let err = Cli::try_parse_from(["rigsys", "build"]).err().unwrap();
        assert!(err.to_string().contains("--rig"));
    }
}
