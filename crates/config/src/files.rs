use std::path::{Path, PathBuf};

use rand::Rng;

use crate::model::{ConfigError, HoardConfig};

impl HoardConfig {
    /// Load and validate a configuration file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_yaml(&text)?;
        tracing::debug!(path = %path.display(), worlds = config.worlds.len(), "configuration loaded");
        Ok(config)
    }
}

/// Pick one YAML file uniformly at random from `dir` and load it.
///
/// Non-YAML files are ignored. Returns the loaded configuration together
/// with the chosen path.
pub fn load_random(
    dir: impl AsRef<Path>,
    rng: &mut impl Rng,
) -> Result<(HoardConfig, PathBuf), ConfigError> {
    let dir = dir.as_ref();
    let mut candidates: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| {
            matches!(
                path.extension().and_then(|ext| ext.to_str()),
                Some("yml") | Some("yaml")
            )
        })
        .collect();

    if candidates.is_empty() {
        return Err(ConfigError::NoConfigFiles {
            dir: dir.to_path_buf(),
        });
    }

    // Directory order is platform-dependent; sort so the draw itself is the
    // only source of randomness.
    candidates.sort();
    let chosen = candidates.swap_remove(rng.gen_range(0..candidates.len()));
    let config = HoardConfig::from_file(&chosen)?;
    tracing::info!(path = %chosen.display(), "random configuration selected");
    Ok((config, chosen))
}
