//! Error types for configuration parsing and validation.

use std::path::PathBuf;

use thiserror::Error;

use crate::compose::group::UnknownGroupKind;

/// Error type for configuration operations.
///
/// Covers errors from parsing, validation, and file operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read an input file.
    #[error("Failed to read '{}': {source}", path.display())]
    FileRead {
        /// Path to the file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse the TOML policy file.
    #[error("Failed to parse policy file: {0}")]
    PolicyParse(#[from] toml::de::Error),

    /// Failed to parse the YAML rules document.
    #[error("Failed to parse rules document: {0}")]
    RulesParse(#[from] serde_yaml::Error),

    /// Failed to write a file (for the init command).
    #[error("Failed to write '{}': {source}", path.display())]
    FileWrite {
        /// Path to the file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Invalid URL provided.
    #[error("Invalid URL '{url}' for {field}: {reason}")]
    InvalidUrl {
        /// What the URL was configured for
        field: String,
        /// The invalid URL string
        url: String,
        /// Reason for invalidity
        reason: String,
    },

    /// A keyword is not a valid regex fragment.
    #[error("Invalid keyword '{keyword}' in {context}: {source}")]
    InvalidKeyword {
        /// The invalid keyword
        keyword: String,
        /// Where the keyword was declared
        context: String,
        /// Underlying regex error
        #[source]
        source: regex::Error,
    },

    /// A group kind string is not recognized.
    #[error("Invalid group type for {context}: {source}")]
    InvalidGroupKind {
        /// Where the kind was declared
        context: String,
        /// Underlying parse error
        #[source]
        source: UnknownGroupKind,
    },
}
