//! Error types for profile assembly and writing.

use std::path::PathBuf;

use thiserror::Error;

/// Error type for profile operations.
#[derive(Debug, Error)]
pub enum ProfileError {
    /// Failed to serialize the profile to YAML.
    #[error("Failed to serialize profile: {0}")]
    Serialize(#[from] serde_yaml::Error),

    /// Failed to write the profile file.
    #[error("Failed to write profile '{}': {source}", path.display())]
    FileWrite {
        /// Path to the output file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },
}
