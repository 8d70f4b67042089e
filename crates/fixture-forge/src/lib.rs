//! Deterministic, seed-driven test fixture generation.
//!
//! This crate builds test data from molds: stateless generators that map an
//! integer seed (and optional caller overrides) to a value. The same seed
//! always produces the same value, so a failing test can be reproduced from
//! the seed alone.
//!
//! # Overview
//!
//! The crate supports:
//!
//! - A two-phase [`Mold`] protocol (resolve properties, then construct)
//! - Built-in string, enum, and map molds, plus [`FnMold`] for user records
//! - A [`Forger`] that hands out collision-free seeds for unseeded calls
//! - A [`SharedForger`] for concurrent use from several threads
//! - Named golden seeds loaded from a JSON registry
//!
//! # Example
//!
//! ```
//! use fixture_forge::{EnumMold, EnumOverrides, Forger, Mold};
//!
//! let mold = EnumMold::new(["active", "inactive", "pending"]).expect("non-empty");
//!
//! // Seeded generation is pure.
//! assert_eq!(mold.generate(&EnumOverrides::default(), 4), Ok("inactive"));
//!
//! // Unseeded generation never reuses a seed.
//! let mut forger = Forger::new(mold);
//! let statuses = forger.forge_multi(5, None).expect("seeds available");
//! assert_eq!(statuses.len(), 5);
//! assert_eq!(forger.issued_count(), 5);
//! ```

pub mod charset;
mod error;
mod forger;
mod mold;
mod registry;
mod scramble;

pub use charset::CharacterSet;
pub use error::{ForgeError, MoldError, RegistryError};
pub use forger::{DEFAULT_RETRY_LIMIT, Forger, MAX_SAFE_SEED, SharedForger};
pub use mold::{
    EnumMold, EnumOverrides, EnumProperties, Exclusion, FnMold, MapMold, MapOverrides,
    MapProperties, Mold, Seed, StringMold, StringMoldConfig, StringOverrides, StringProperties,
};
pub use registry::{GoldenSeeds, SeedDefinition};
pub use scramble::scramble;
