use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Duration;

use hoard_common::{EntityKind, WorldId};
use serde::{Deserialize, Serialize};

/// Errors from loading or validating configuration.
///
/// All of these surface at load/reload time; a configuration that made it
/// into the scheduler is already valid.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("spawn_interval must be at least 1 second")]
    ZeroInterval,
    #[error("spawn_limit must be at least 1 for {scope}")]
    ZeroSpawnLimit { scope: String },
    #[error("invalid distance range {min}..{max} for {scope}")]
    InvalidDistanceRange { scope: String, min: i32, max: i32 },
    #[error("world `{world}` has an empty mob list")]
    EmptyMobList { world: String },
    #[error("no configuration files found in {}", .dir.display())]
    NoConfigFiles { dir: PathBuf },
}

/// Validated spawn configuration.
///
/// Global interval, distance bounds, and per-tick limit, plus one entry per
/// spawnable world. Worlds may override the global numbers.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HoardConfig {
    /// Seconds between ticks.
    pub spawn_interval: u64,
    /// Minimum horizontal spawn distance from a participant, in blocks.
    pub min_distance: i32,
    /// Maximum horizontal spawn distance from a participant, in blocks.
    pub max_distance: i32,
    /// Spawn cycles per participant per tick.
    pub spawn_limit: u32,
    /// Per-world entries, keyed by world name.
    #[serde(default)]
    pub worlds: BTreeMap<String, WorldSpawns>,
}

/// Per-world configuration entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WorldSpawns {
    /// Entity kinds spawned in this world, drawn uniformly at random.
    pub mobs: Vec<EntityKind>,
    #[serde(default)]
    pub min_distance: Option<i32>,
    #[serde(default)]
    pub max_distance: Option<i32>,
    #[serde(default)]
    pub spawn_limit: Option<u32>,
}

/// Effective per-world values resolved at tick time: world overrides where
/// present, global values otherwise.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedWorldConfig {
    pub kinds: Vec<EntityKind>,
    pub min_distance: i32,
    pub max_distance: i32,
    pub spawn_limit: u32,
}

impl HoardConfig {
    /// Parse and validate a YAML document.
    pub fn from_yaml(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Check every invariant the spawner relies on at tick time.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.spawn_interval == 0 {
            return Err(ConfigError::ZeroInterval);
        }
        check_limit(self.spawn_limit, "globals")?;
        check_range(self.min_distance, self.max_distance, "globals")?;

        for (name, world) in &self.worlds {
            let scope = format!("world `{name}`");
            if world.mobs.is_empty() {
                return Err(ConfigError::EmptyMobList {
                    world: name.clone(),
                });
            }
            check_limit(world.spawn_limit.unwrap_or(self.spawn_limit), &scope)?;
            check_range(
                world.min_distance.unwrap_or(self.min_distance),
                world.max_distance.unwrap_or(self.max_distance),
                &scope,
            )?;
        }
        Ok(())
    }

    /// Effective configuration for one world, or `None` when the world has
    /// no entry.
    pub fn resolve(&self, world: &WorldId) -> Option<ResolvedWorldConfig> {
        self.worlds.get(world.as_str()).map(|w| ResolvedWorldConfig {
            kinds: w.mobs.clone(),
            min_distance: w.min_distance.unwrap_or(self.min_distance),
            max_distance: w.max_distance.unwrap_or(self.max_distance),
            spawn_limit: w.spawn_limit.unwrap_or(self.spawn_limit),
        })
    }

    /// Tick interval as a duration.
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.spawn_interval)
    }
}

fn check_limit(limit: u32, scope: &str) -> Result<(), ConfigError> {
    if limit == 0 {
        return Err(ConfigError::ZeroSpawnLimit {
            scope: scope.to_string(),
        });
    }
    Ok(())
}

fn check_range(min: i32, max: i32, scope: &str) -> Result<(), ConfigError> {
    if min < 0 || max < min {
        return Err(ConfigError::InvalidDistanceRange {
            scope: scope.to_string(),
            min,
            max,
        });
    }
    Ok(())
}
