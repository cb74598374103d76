//! Concrete module variants.
//!
//! The orchestrator never depends on any of these; they are the thin,
//! backend-driven building blocks that rig assemblies (and the integration
//! tests) compose. Domain-heavy constructions (IK/FK blends, ribbons, skin
//! weighting) belong to the consuming host, not this crate.

pub mod motion;
pub mod utility;
