//! Generator error types.

use std::path::PathBuf;

/// Errors raised while building or emitting function families.
#[derive(Debug, thiserror::Error)]
pub enum CodegenError {
    /// The base name cannot be used as a Rust identifier root.
    #[error("invalid base name `{name}`: {reason}")]
    InvalidBaseName { name: String, reason: &'static str },

    /// A descriptor registered neither hashing nor authentication.
    #[error("algorithm {display_name} supports neither hashing nor authentication")]
    NoCapabilities { display_name: String },

    /// A capability builder was finished without one of its templates.
    #[error("{capability} capability is missing its `{template}` template")]
    IncompleteCapability {
        capability: &'static str,
        template: &'static str,
    },

    /// An algorithm name was registered twice.
    #[error("algorithm `{name}` is already registered")]
    DuplicateAlgorithm { name: String },

    /// Two families in one batch share a base name.
    #[error("base name `{name}` is already used by another family")]
    DuplicateFamily { name: String },

    /// A member of one family has the same Rust name as a member of an
    /// earlier family in the batch.
    #[error("member `{ident}` of family `{name}` is already defined by family `{owner}`")]
    MemberCollision {
        name: String,
        ident: String,
        owner: String,
    },

    /// Configuration could not be loaded or merged.
    #[error("failed to load generator configuration: {0}")]
    Config(#[from] config::ConfigError),

    /// Writing the emitted source failed.
    #[error("failed to write generated source to {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}
