//! Spawn configuration: typed structs parsed from YAML and validated once
//! at load time.
//!
//! # Invariants
//! - A `HoardConfig` that exists has passed validation; ticks never
//!   discover a bad key or an unknown entity kind.
//! - Reload replaces the whole snapshot; there is no partial overwrite.

pub mod files;
pub mod model;

pub use files::load_random;
pub use model::{ConfigError, HoardConfig, ResolvedWorldConfig, WorldSpawns};
