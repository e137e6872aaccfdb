use serde::Deserialize;
use std::fs::read_to_string;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;

use crate::models::rating::Rating;
use crate::random::{RandomSource, SeededRandom, ThreadRandom};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read from '{}': {source}", .path.display())]
    IoError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse toml from '{}': {source}", .path.display())]
    ParseError {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Settings as they appear in the optional TOML file, or as given on the
/// command line. Anything left out falls through to the next layer.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub corpus_path: Option<PathBuf>,
    pub default_rating: Option<Rating>,
    pub seed: Option<u64>,
}

impl Settings {
    pub fn read(path: &Path) -> Result<Settings, ConfigError> {
        let contents = read_to_string(path).map_err(|source| ConfigError::IoError {
            path: path.to_owned(),
            source,
        })?;
        toml::from_str(&contents).map_err(|source| ConfigError::ParseError {
            path: path.to_owned(),
            source,
        })
    }

    /// Fill in whatever `self` leaves unset from `fallback`.
    pub fn or(self, fallback: Settings) -> Settings {
        Settings {
            corpus_path: self.corpus_path.or(fallback.corpus_path),
            default_rating: self.default_rating.or(fallback.default_rating),
            seed: self.seed.or(fallback.seed),
        }
    }
}

/// Fully resolved configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// `None` means the corpus compiled into the binary.
    pub corpus_path: Option<PathBuf>,
    pub default_rating: Rating,
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            corpus_path: None,
            default_rating: Rating::default(),
            seed: None,
        }
    }
}

impl From<Settings> for Config {
    fn from(settings: Settings) -> Self {
        let defaults = Config::default();
        Config {
            corpus_path: settings.corpus_path.or(defaults.corpus_path),
            default_rating: settings.default_rating.unwrap_or(defaults.default_rating),
            seed: settings.seed.or(defaults.seed),
        }
    }
}

impl Config {
    /// Command line settings win over the file, the file over built-in
    /// defaults.
    pub fn load(config_file: Option<&Path>, overrides: Settings) -> Result<Config, ConfigError> {
        let file_settings = match config_file {
            Some(path) => {
                log::debug!("Reading configuration from {}", path.display());
                Settings::read(path)?
            }
            None => Settings::default(),
        };
        Ok(overrides.or(file_settings).into())
    }

    pub fn random_source(&self) -> Arc<dyn RandomSource> {
        match self.seed {
            Some(seed) => {
                log::debug!("Using seeded random source ({seed})");
                Arc::new(SeededRandom::new(seed))
            }
            None => Arc::new(ThreadRandom),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::io::Write;

    fn config_file(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn defaults_without_file_or_overrides() {
        let config = Config::load(None, Settings::default()).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.default_rating, Rating::X);
        assert_eq!(config.corpus_path, None);
    }

    #[test]
    fn file_overrides_defaults() {
        let file = config_file(
            r#"
            corpus_path = "/srv/descriptions.json"
            default_rating = "PG-13"
            seed = 9
            "#,
        );
        let config = Config::load(Some(file.path()), Settings::default()).unwrap();
        assert_eq!(
            config.corpus_path,
            Some(PathBuf::from("/srv/descriptions.json"))
        );
        assert_eq!(config.default_rating, Rating::PG13);
        assert_eq!(config.seed, Some(9));
    }

    #[test]
    fn overrides_win_over_file() {
        let file = config_file("default_rating = \"G\"\nseed = 1\n");
        let overrides = Settings {
            default_rating: Some(Rating::BLAND),
            ..Default::default()
        };
        let config = Config::load(Some(file.path()), overrides).unwrap();
        assert_eq!(config.default_rating, Rating::BLAND);
        assert_eq!(config.seed, Some(1));
        assert_eq!(config.corpus_path, None);
    }

    #[test]
    fn bundled_example_config_parses() {
        let path = Path::new(concat!(env!("CARGO_MANIFEST_DIR"), "/fukn-weather.toml"));
        let settings = Settings::read(path).unwrap();
        assert_eq!(settings.default_rating, Some(Rating::X));
        assert_eq!(settings.corpus_path, None);
        assert_eq!(settings.seed, None);
    }

    #[test]
    fn missing_file_is_an_error() {
        let result = Config::load(Some(Path::new("no/such/config.toml")), Settings::default());
        assert!(matches!(result, Err(ConfigError::IoError { .. })));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let file = config_file("api_key = \"secret\"\n");
        let result = Config::load(Some(file.path()), Settings::default());
        assert!(matches!(result, Err(ConfigError::ParseError { .. })));
    }

    #[test]
    fn seeded_config_gives_reproducible_source() {
        let config = Config {
            seed: Some(3),
            ..Default::default()
        };
        let a = config.random_source();
        let b = config.random_source();
        assert_eq!(a.pick_in_range(0..=1000), b.pick_in_range(0..=1000));
    }
}
