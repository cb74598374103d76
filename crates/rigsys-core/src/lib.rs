//! Rigsys Module Orchestration Engine
//!
//! This crate builds rigged character control hierarchies from a declarative
//! set of reusable modules. A rig assembly registers named modules (motion
//! chains, deformers, utilities, exporters) on a [`Rig`]; the orchestrator
//! expands the set (mirror clones, an implicit attachment resolver), sorts
//! it by build order, executes each module's guide and final phases against
//! a [`SceneBackend`], and wires cross-module plug/socket attachments in a
//! late utility pass.
//!
//! # Overview
//!
//! - **Modules** ([`module`]): the [`RigModule`] contract and shared
//!   [`ModuleCore`] state — side, label, build order, guides, sockets,
//!   plugs, the attachment declaration, and bind-skeleton contributions.
//! - **Mirroring** ([`mirror`], [`Proxy::mirrored`], [`ModuleCore::mirrored`]):
//!   deep, side-flipped, name-flipped clones generated during pre-build.
//! - **Attachment** ([`attach`]): plug-to-socket resolution by name, after
//!   every motion module has been built.
//! - **Guides** ([`proxy`], [`guide_data`]): posable placeholders and their
//!   persisted transforms.
//! - **Diagnostics** ([`report`], [`error`]): recoverable conditions
//!   accumulate on a [`BuildReport`]; configuration mistakes fail fast as
//!   [`RigError`].
//!
//! # Example
//!
//! ```
//! use rigsys_core::modules::motion::{Chain, Root};
//! use rigsys_core::{ReportBuilder, Rig, RigModule, Side};
//!
//! let mut rig = Rig::new("ExampleRig");
//! rig.add("M_Root", Root::new(Side::Middle, "Root")).unwrap();
//!
//! let mut arm = Chain::new(Side::Left, "Arm", &["Shoulder", "Elbow", "Wrist"]);
//! arm.core_mut().mirror = true;
//! rig.add("L_Arm", arm).unwrap();
//! rig.set_parent("L_Arm", "M_Root").unwrap();
//!
//! // Pre-build is pure graph work: it expands mirrors and orders modules
//! // without touching a scene.
//! let mut report = ReportBuilder::new("ExampleRig");
//! let order = rig.pre_build(&mut report).unwrap();
//!
//! assert!(rig.motion().contains("R_Arm"));
//! assert_eq!(order.len(), 4); // M_Root, L_Arm, R_Arm, resolver
//! ```

pub mod attach;
pub mod error;
pub mod guide_data;
pub mod mirror;
pub mod module;
pub mod modules;
pub mod proxy;
pub mod report;
pub mod rig;
pub mod scene;
pub mod side;

// Re-export commonly used types at the crate root.
pub use attach::{AttachmentResolver, DEFAULT_PLUG, WORLD_PLUG};
pub use error::{RigError, RigResult};
pub use guide_data::{GuideData, GuideTransform};
pub use mirror::mirror_name;
pub use module::{BuildContext, ModuleCore, ModuleKind, ModuleSet, RigModule};
pub use proxy::Proxy;
pub use report::{BuildReport, BuildWarning, ReportBuilder, WarnCode};
pub use rig::{BuildOptions, Rig, RESOLVER_KEY};
pub use scene::{ConstraintHandle, NodeHandle, SceneBackend, SceneError, SceneResult, Vec3};
pub use side::{Axis, Side};
