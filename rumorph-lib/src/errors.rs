// Error types shared across the crate.

use std::path::PathBuf;

/// Result alias using [`MorphError`] as the default error type.
pub type Result<T, E = MorphError> = std::result::Result<T, E>;

/// Errors produced while building tags or loading dictionary data.
///
/// Inflection failure is not an error (it is an expected negative result and
/// is reported as `None`), and neither is an empty method stack.
#[derive(Debug, thiserror::Error)]
pub enum MorphError {
    /// A tag string referenced a grammeme that is not in the registry.
    #[error("unknown grammeme: {0}")]
    UnknownGrammeme(String),

    /// A dictionary directory (or the probability table inside it) is
    /// malformed. The analyzer constructor fails as a whole; there is no
    /// partially constructed state.
    #[error("invalid dictionary at {path}: {reason}")]
    InvalidDictionary { path: PathBuf, reason: String },

    /// More analyzer units were configured than the re-entry guard can track.
    #[error("too many analyzer units: {0} (at most 64 are supported)")]
    TooManyUnits(usize),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl MorphError {
    pub(crate) fn invalid_dictionary<P, S>(path: P, reason: S) -> Self
    where
        P: Into<PathBuf>,
        S: Into<String>,
    {
        Self::InvalidDictionary {
            path: path.into(),
            reason: reason.into(),
        }
    }
}
