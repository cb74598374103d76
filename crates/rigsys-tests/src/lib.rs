//! rigsys end-to-end test infrastructure.
//!
//! This crate provides integration tests for the build-critical flows:
//!
//! - Build ordering: monotonic execution, ties, cutoff, muting
//! - Mirroring: pre-build expansion and reflected scene output
//! - Attachments: plug/socket resolution and skip-not-abort semantics
//! - Guide persistence: save/apply round trips
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p rigsys-tests
//! ```
//!
//! The [`ProbeModule`] records when its phases run into a shared event log,
//! so ordering tests can assert on the actual execution sequence rather than
//! on scene contents.

use std::sync::{Arc, Mutex};

use rigsys_core::modules::motion::{Chain, Root};
use rigsys_core::{BuildContext, ModuleCore, ModuleKind, Rig, RigModule, RigResult, Side};

/// Shared, ordered record of probe build events.
pub type EventLog = Arc<Mutex<Vec<String>>>;

/// Creates an empty event log.
pub fn event_log() -> EventLog {
    Arc::new(Mutex::new(Vec::new()))
}

/// A module that does no scene work and only records that it was built.
pub struct ProbeModule {
    kind: ModuleKind,
    core: ModuleCore,
    log: EventLog,
}

impl ProbeModule {
    /// Creates a probe of the given kind and build order that appends its
    /// label to the log when built.
    pub fn new(kind: ModuleKind, label: &str, build_order: i32, log: &EventLog) -> Self {
        Self {
            kind,
            core: ModuleCore::new(Side::Middle, label, build_order),
            log: Arc::clone(log),
        }
    }

    /// Creates a probe on a specific side (for mirror-expansion tests).
    pub fn sided(kind: ModuleKind, side: Side, label: &str, build_order: i32, log: &EventLog) -> Self {
        Self {
            kind,
            core: ModuleCore::new(side, label, build_order),
            log: Arc::clone(log),
        }
    }
}

impl RigModule for ProbeModule {
    fn kind(&self) -> ModuleKind {
        self.kind
    }

    fn core(&self) -> &ModuleCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut ModuleCore {
        &mut self.core
    }

    fn mirrored(&self) -> Option<Box<dyn RigModule>> {
        Some(Box::new(ProbeModule {
            kind: self.kind,
            core: self.core.mirrored()?,
            log: Arc::clone(&self.log),
        }))
    }

    fn build(&mut self, _ctx: &mut BuildContext<'_>) -> RigResult<()> {
        self.log
            .lock()
            .unwrap()
            .push(self.core.full_name());
        Ok(())
    }
}

/// Assembles the reference biped fragment used across the integration tests:
/// a middle root, a spine hanging off it, and a mirrored left arm hanging
/// off the spine's chest.
pub fn example_rig(name: &str) -> Rig {
    let mut rig = Rig::new(name);
    rig.add("M_Root", Root::new(Side::Middle, "Root"))
        .unwrap();

    let mut spine = Chain::new(Side::Middle, "Spine", &["Hips", "Chest"]);
    spine.core_mut().parent = Some("M_Root".to_string());
    spine.core_mut().selected_socket = Some("Root".to_string());
    rig.add("M_Spine", spine).unwrap();

    let mut arm = Chain::new(Side::Left, "Arm", &["Shoulder", "Elbow", "Wrist"]);
    arm.core_mut().mirror = true;
    arm.core_mut().parent = Some("M_Spine".to_string());
    arm.core_mut().selected_socket = Some("Chest".to_string());
    rig.add("L_Arm", arm).unwrap();

    rig
}
