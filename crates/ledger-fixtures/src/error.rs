//! Error types for the ledger-fixtures crate.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while parsing or querying a fixture registry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// The registry file could not be read.
    #[error("failed to read registry file at '{path}': {message}")]
    IoError {
        /// Path to the registry file.
        path: PathBuf,
        /// Description of the I/O error.
        message: String,
    },

    /// The registry JSON is malformed or missing required fields.
    #[error("invalid registry JSON: {message}")]
    ParseError {
        /// Description of the parse error.
        message: String,
    },

    /// The registry version is not supported.
    #[error("unsupported registry version: expected {expected}, found {actual}")]
    UnsupportedVersion {
        /// Expected version number.
        expected: u32,
        /// Actual version found in the registry.
        actual: u32,
    },

    /// The registry lists no organizations.
    #[error("registry contains no organizations")]
    EmptyOrganizations,

    /// An organization identifier is blank or contains a key separator.
    #[error("invalid organization id at index {index}: '{value}'")]
    InvalidOrganizationId {
        /// Index of the organization in the array.
        index: usize,
        /// The rejected identifier.
        value: String,
    },

    /// Two organizations share an identifier.
    #[error("duplicate organization id '{org_id}'")]
    DuplicateOrganization {
        /// The repeated identifier.
        org_id: String,
    },

    /// The registry lists no roles.
    #[error("registry contains no roles")]
    EmptyRoles,

    /// The registry contains no seed definitions.
    #[error("registry contains no seed definitions")]
    EmptySeeds,

    /// The requested seed name was not found in the registry.
    #[error("seed '{name}' not found in registry")]
    SeedNotFound {
        /// The seed name that was not found.
        name: String,
    },
}

/// Errors raised while generating members.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationError {
    /// No unique, valid username could be produced.
    #[error("failed to generate a unique username after {max_attempts} attempts")]
    UsernameGenerationFailed {
        /// Number of attempts made before giving up.
        max_attempts: usize,
    },

    /// The registry has no roles to assign.
    #[error("registry contains no roles for assignment")]
    NoRoles,
}
