//! Golden-seed registry types and JSON parsing.
//!
//! Golden-seed tests pin fixtures to explicit seeds. This module gives those
//! seeds names and batch sizes so a test can ask for "mossy-owl" instead of
//! repeating a bare integer. Registries are parsed from JSON text; reading
//! the text from disk is left to the caller.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::RegistryError;
use crate::mold::Seed;

/// Current supported registry version.
const SUPPORTED_VERSION: u32 = 1;

/// A versioned collection of named golden seeds.
///
/// # Example
///
/// ```
/// use fixture_forge::GoldenSeeds;
///
/// let json = r#"{
///     "version": 1,
///     "seeds": [{"name": "mossy-owl", "seed": 2026, "count": 12}]
/// }"#;
///
/// let registry = GoldenSeeds::from_json(json).expect("valid registry");
/// let seed_def = registry.find_seed("mossy-owl").expect("seed exists");
///
/// assert_eq!(seed_def.seed(), 2026);
/// assert_eq!(seed_def.count(), 12);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoldenSeeds {
    version: u32,
    seeds: Vec<SeedDefinition>,
}

impl GoldenSeeds {
    /// Parses a golden-seed registry from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError`] if:
    /// - The JSON is malformed or required fields are missing
    /// - The version is unsupported
    /// - The seeds array is empty
    /// - Two seeds share a name
    pub fn from_json(json: &str) -> Result<Self, RegistryError> {
        let raw: RawGoldenSeeds =
            serde_json::from_str(json).map_err(|e| RegistryError::ParseError {
                message: e.to_string(),
            })?;

        Self::from_raw(raw)
    }

    fn from_raw(raw: RawGoldenSeeds) -> Result<Self, RegistryError> {
        if raw.version != SUPPORTED_VERSION {
            return Err(RegistryError::UnsupportedVersion {
                expected: SUPPORTED_VERSION,
                actual: raw.version,
            });
        }

        if raw.seeds.is_empty() {
            return Err(RegistryError::EmptySeeds);
        }

        let mut seeds: Vec<SeedDefinition> = Vec::with_capacity(raw.seeds.len());
        for definition in raw.seeds {
            if seeds.iter().any(|existing| existing.name == definition.name) {
                return Err(RegistryError::DuplicateSeedName {
                    name: definition.name,
                });
            }
            seeds.push(SeedDefinition {
                name: definition.name,
                seed: definition.seed,
                count: definition.count,
            });
        }

        debug!(seeds = seeds.len(), "parsed golden seed registry");
        Ok(Self {
            version: raw.version,
            seeds,
        })
    }

    /// Returns the registry version.
    #[must_use]
    pub const fn version(&self) -> u32 {
        self.version
    }

    /// Returns all seed definitions in registry order.
    #[must_use]
    pub fn seeds(&self) -> &[SeedDefinition] {
        &self.seeds
    }

    /// Finds a seed definition by name.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::SeedNotFound`] if no seed with the given name
    /// exists.
    pub fn find_seed(&self, name: &str) -> Result<&SeedDefinition, RegistryError> {
        self.seeds
            .iter()
            .find(|s| s.name == name)
            .ok_or_else(|| RegistryError::SeedNotFound {
                name: name.to_owned(),
            })
    }

    /// Returns a copy of the registry with `definition` appended.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::DuplicateSeedName`] if the name is taken.
    pub fn append_seed(&self, definition: SeedDefinition) -> Result<Self, RegistryError> {
        if self.find_seed(&definition.name).is_ok() {
            return Err(RegistryError::DuplicateSeedName {
                name: definition.name,
            });
        }

        let mut seeds = self.seeds.clone();
        seeds.push(definition);
        Ok(Self {
            version: self.version,
            seeds,
        })
    }

    /// Renders the registry as pretty-printed JSON accepted by
    /// [`GoldenSeeds::from_json`].
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::SerializeError`] if serialization fails.
    pub fn to_json_pretty(&self) -> Result<String, RegistryError> {
        let raw = RawGoldenSeeds {
            version: self.version,
            seeds: self
                .seeds
                .iter()
                .map(|s| RawSeedDefinition {
                    name: s.name.clone(),
                    seed: s.seed,
                    count: s.count,
                })
                .collect(),
        };

        serde_json::to_string_pretty(&raw).map_err(|e| RegistryError::SerializeError {
            message: e.to_string(),
        })
    }
}

/// A named seed and the number of fixtures to forge from it.
///
/// Forging a definition uses seeds `seed, seed + 1, ..., seed + count - 1`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedDefinition {
    name: String,
    seed: Seed,
    count: usize,
}

impl SeedDefinition {
    /// Creates a definition for `count` fixtures starting at `seed`.
    #[must_use]
    pub fn new(name: impl Into<String>, seed: Seed, count: usize) -> Self {
        Self {
            name: name.into(),
            seed,
            count,
        }
    }

    /// Returns the seed name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the first seed of the batch.
    #[must_use]
    pub const fn seed(&self) -> Seed {
        self.seed
    }

    /// Returns the number of fixtures to forge.
    #[must_use]
    pub const fn count(&self) -> usize {
        self.count
    }
}

/// Raw JSON representation for (de)serialization.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawGoldenSeeds {
    version: u32,
    seeds: Vec<RawSeedDefinition>,
}

/// Raw JSON representation of a seed definition.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSeedDefinition {
    name: String,
    seed: Seed,
    #[serde(default = "default_count")]
    count: usize,
}

const fn default_count() -> usize {
    1
}
