//! Build reports and diagnostics.
//!
//! The orchestrator is deliberately best-effort: a missing socket or a stale
//! guide entry skips one attachment or one guide, not the whole build. Those
//! recovered conditions are not silently discarded — they accumulate on a
//! [`BuildReport`] that the caller can inspect (or serialize) after the fact.

use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Warning codes for recovered build conditions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WarnCode {
    /// W001: Attempted to mirror a middle-side module or guide.
    MirrorMiddleSkipped,
    /// W002: Attachment skipped because the module was never built.
    ModuleNotRun,
    /// W003: Attachment skipped because the declared parent module is unknown.
    ParentNotFound,
    /// W004: Attachment skipped because the selected socket is not on the parent.
    SocketNotFound,
    /// W005: Attachment skipped because the selected plug is not on the child.
    PlugNotFound,
    /// W006: Saved guide data has no entry for a module; authored defaults used.
    GuideEntryMissing,
    /// W007: Guide placeholder missing from the scene during capture.
    PlaceholderMissing,
    /// W008: A declared bind joint could not be found in the scene.
    BindJointMissing,
}

impl WarnCode {
    /// Returns the warning code string (e.g. "W001").
    pub fn code(&self) -> &'static str {
        match self {
            WarnCode::MirrorMiddleSkipped => "W001",
            WarnCode::ModuleNotRun => "W002",
            WarnCode::ParentNotFound => "W003",
            WarnCode::SocketNotFound => "W004",
            WarnCode::PlugNotFound => "W005",
            WarnCode::GuideEntryMissing => "W006",
            WarnCode::PlaceholderMissing => "W007",
            WarnCode::BindJointMissing => "W008",
        }
    }
}

impl std::fmt::Display for WarnCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A recovered build condition, attributed to the module that raised it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildWarning {
    /// Warning code (e.g. "W004").
    pub code: String,
    /// Human-readable message.
    pub message: String,
    /// Full name of the module the warning concerns, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub module: Option<String>,
}

impl BuildWarning {
    /// Creates a new warning without a module attribution.
    pub fn new(code: WarnCode, message: impl Into<String>) -> Self {
        Self {
            code: code.code().to_string(),
            message: message.into(),
            module: None,
        }
    }

    /// Creates a new warning attributed to a module.
    pub fn for_module(
        code: WarnCode,
        message: impl Into<String>,
        module: impl Into<String>,
    ) -> Self {
        Self {
            code: code.code().to_string(),
            message: message.into(),
            module: Some(module.into()),
        }
    }
}

impl std::fmt::Display for BuildWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(ref module) = self.module {
            write!(f, "{}: {} ({})", self.code, self.message, module)
        } else {
            write!(f, "{}: {}", self.code, self.message)
        }
    }
}

/// The outcome of a [`Rig::build`](crate::rig::Rig::build) or
/// [`Rig::save_guide_data`](crate::rig::Rig::save_guide_data) call.
///
/// `ok` reflects best-effort semantics: it stays true even when warnings were
/// recorded, because a partially-attached rig is still a usable rig. Fatal
/// configuration errors never reach a report; they surface as
/// [`RigError`](crate::error::RigError).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildReport {
    /// Name of the rig this report describes.
    pub rig: String,
    /// Whether the operation completed (always true today; see module docs).
    pub ok: bool,
    /// Full names of the modules whose phases ran, in execution order.
    pub modules_built: Vec<String>,
    /// Recovered conditions, in the order they were raised.
    pub warnings: Vec<BuildWarning>,
    /// Wall-clock duration in milliseconds.
    pub duration_ms: u64,
}

impl BuildReport {
    /// Serializes the report to pretty-printed JSON.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Returns true if no warnings were recorded.
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }
}

/// Accumulates warnings and build progress during a single orchestrator call.
#[derive(Debug)]
pub struct ReportBuilder {
    rig: String,
    modules_built: Vec<String>,
    warnings: Vec<BuildWarning>,
    started: Instant,
}

impl ReportBuilder {
    /// Starts a new report for the named rig.
    pub fn new(rig: impl Into<String>) -> Self {
        Self {
            rig: rig.into(),
            modules_built: Vec::new(),
            warnings: Vec::new(),
            started: Instant::now(),
        }
    }

    /// Records a warning.
    pub fn warn(&mut self, warning: BuildWarning) {
        self.warnings.push(warning);
    }

    /// Records that a module's phases completed.
    pub fn module_built(&mut self, full_name: impl Into<String>) {
        self.modules_built.push(full_name.into());
    }

    /// Returns the warnings recorded so far.
    pub fn warnings(&self) -> &[BuildWarning] {
        &self.warnings
    }

    /// Finalizes the report.
    pub fn finish(self) -> BuildReport {
        BuildReport {
            rig: self.rig,
            ok: true,
            modules_built: self.modules_built,
            warnings: self.warnings,
            duration_ms: self.started.elapsed().as_millis() as u64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_warn_codes() {
        assert_eq!(WarnCode::MirrorMiddleSkipped.code(), "W001");
        assert_eq!(WarnCode::SocketNotFound.code(), "W004");
        assert_eq!(WarnCode::BindJointMissing.code(), "W008");
    }

    #[test]
    fn test_warning_display() {
        let warning = BuildWarning::for_module(WarnCode::SocketNotFound, "no such socket", "L_Arm");
        assert_eq!(warning.to_string(), "W004: no such socket (L_Arm)");

        let bare = BuildWarning::new(WarnCode::GuideEntryMissing, "no entry");
        assert_eq!(bare.to_string(), "W006: no entry");
    }

    #[test]
    fn test_report_builder() {
        let mut builder = ReportBuilder::new("TestRig");
        builder.module_built("M_Root");
        builder.warn(BuildWarning::new(WarnCode::ModuleNotRun, "not built"));

        let report = builder.finish();
        assert!(report.ok);
        assert!(!report.is_clean());
        assert_eq!(report.rig, "TestRig");
        assert_eq!(report.modules_built, vec!["M_Root".to_string()]);
        assert_eq!(report.warnings.len(), 1);
    }

    #[test]
    fn test_report_json() {
        let report = ReportBuilder::new("TestRig").finish();
        let json = report.to_json_pretty().unwrap();
        assert!(json.contains("\"ok\": true"));
        assert!(json.contains("TestRig"));
    }
}
