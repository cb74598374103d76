//! Fatal orchestrator errors.
//!
//! Only caller mistakes and broken persistence cross the orchestrator
//! boundary as errors. Everything recoverable (missing sockets, skipped
//! mirrors, stale guide entries) is reported as a
//! [`BuildWarning`](crate::report::BuildWarning) instead.

use std::path::PathBuf;
use thiserror::Error;

use crate::scene::SceneError;

/// Fatal errors raised by the orchestrator.
#[derive(Debug, Error)]
pub enum RigError {
    /// A module key was not found in the registry it was expected in.
    #[error("unknown {kind} module key: {key}")]
    UnknownModule {
        /// Registry the lookup was made in (e.g. "motion").
        kind: &'static str,
        /// The missing key.
        key: String,
    },

    /// A module key was registered twice.
    #[error("duplicate module key: {0}")]
    DuplicateModule(String),

    /// A guide-data file could not be read or written.
    #[error("guide data file {path}: {source}")]
    GuideDataIo {
        /// The offending path.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A guide-data document was malformed. A malformed numeric field fails
    /// the whole load rather than falling back per-guide.
    #[error("guide data parse error: {0}")]
    GuideDataParse(#[from] serde_json::Error),

    /// The scene backend refused an operation.
    #[error(transparent)]
    Scene(#[from] SceneError),
}

/// Result alias for orchestrator operations.
pub type RigResult<T> = Result<T, RigError>;
