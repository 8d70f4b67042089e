//! Error types for the fixture-forge crate.
//!
//! This module defines semantic error enums for mold resolution, seed
//! allocation, and golden-seed registry parsing, following the project's
//! error handling conventions with `thiserror`.

use thiserror::Error;

/// Errors raised while configuring or resolving a mold.
///
/// Both variants are deterministic: retrying with the same configuration,
/// overrides, and seed fails the same way.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoldError {
    /// Every candidate of an enum mold was excluded.
    #[error("no candidates remain: {excluded} of {candidates} candidates excluded")]
    DomainExhausted {
        /// Number of configured candidates.
        candidates: usize,
        /// Number of candidates removed by the exclusion override.
        excluded: usize,
    },

    /// A mold was built from an internally inconsistent configuration.
    #[error("invalid mold configuration: {message}")]
    InvalidConfiguration {
        /// Description of the inconsistency.
        message: String,
    },
}

/// Errors raised by a forger while allocating seeds or generating values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ForgeError {
    /// The wrapped mold failed to resolve a value.
    #[error("mold error: {source}")]
    Mold {
        /// Underlying mold error.
        #[from]
        #[source]
        source: MoldError,
    },

    /// No unused seed was drawn within the retry ceiling.
    #[error("failed to allocate a fresh seed after {attempts} attempts")]
    SeedAllocationExhausted {
        /// Number of draws made before giving up.
        attempts: usize,
    },
}

/// Errors that can occur when parsing or querying a golden-seed registry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
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

    /// The registry contains no seed definitions.
    #[error("registry contains no seed definitions")]
    EmptySeeds,

    /// Two seed definitions share a name.
    #[error("seed name '{name}' already exists in registry")]
    DuplicateSeedName {
        /// The repeated seed name.
        name: String,
    },

    /// The requested seed name was not found in the registry.
    #[error("seed '{name}' not found in registry")]
    SeedNotFound {
        /// The seed name that was not found.
        name: String,
    },

    /// The registry could not be rendered as JSON.
    #[error("failed to serialize registry: {message}")]
    SerializeError {
        /// Description of the serialization error.
        message: String,
    },
}
