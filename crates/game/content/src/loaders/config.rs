//! Engine configuration loader.

use std::path::Path;

use tactics_core::GameConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for [`GameConfig`] from TOML files.
///
/// Every key is optional; missing keys keep their defaults.
pub struct ConfigLoader;

impl ConfigLoader {
    pub fn load(path: &Path) -> LoadResult<GameConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config {}: {}", path.display(), e))
    }

    pub fn parse(content: &str) -> LoadResult<GameConfig> {
        let config: GameConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_files_keep_defaults() {
        let config = ConfigLoader::parse(
            r#"
            seed = 42

            [combat.damage]
            variance_percent = 0

            [combat.experience]
            hit = 15
            "#,
        )
        .unwrap();

        assert_eq!(config.seed, 42);
        assert_eq!(config.combat.damage.variance_percent, 0);
        assert_eq!(config.combat.damage.defense_divisor, 2);
        assert_eq!(config.combat.experience.hit, 15);
        assert_eq!(config.combat.experience.kill_per_level, 25);
        assert_eq!(config.combat.hit, GameConfig::default().combat.hit);
    }

    #[test]
    fn an_empty_file_is_the_default_config() {
        assert_eq!(ConfigLoader::parse("").unwrap(), GameConfig::default());
    }

    #[test]
    fn type_errors_are_reported() {
        let error = ConfigLoader::parse("seed = \"forty-two\"").unwrap_err();
        assert!(error.to_string().contains("config TOML"));
    }
}
