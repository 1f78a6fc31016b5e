use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use review_core::SaveMode;
use review_engine::{EngineConfig, SourceConfig, StaticItemSource};
use serde::{Deserialize, Serialize};

use crate::cli::Cli;
use crate::platform::logging::LogDestination;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
pub enum ModeSetting {
    /// Save every decision to the remote endpoint before moving on.
    Remote,
    /// Keep decisions locally and export them as CSV.
    #[default]
    Export,
}

impl From<ModeSetting> for SaveMode {
    fn from(mode: ModeSetting) -> Self {
        match mode {
            ModeSetting::Remote => SaveMode::Remote,
            ModeSetting::Export => SaveMode::Export,
        }
    }
}

/// Where the session's items come from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SourceSetting {
    /// Numbered images under `images/`.
    Generated { count: usize },
    /// A metadata CSV with a `filename` column, shuffled on load.
    Metadata {
        location: String,
        image_base: String,
        #[serde(default)]
        seed: Option<u64>,
    },
}

impl Default for SourceSetting {
    fn default() -> Self {
        SourceSetting::Generated {
            count: StaticItemSource::default().count,
        }
    }
}

/// Settings read from the optional RON file, then overridden by flags.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub mode: ModeSetting,
    pub endpoint: Option<String>,
    pub source: SourceSetting,
    pub output_dir: PathBuf,
    pub rater: Option<String>,
    pub anonymous: bool,
    pub log: LogDestination,
    pub verbose: bool,
    /// File the settings were read from, if any.
    #[serde(skip)]
    pub loaded_from: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            mode: ModeSetting::default(),
            endpoint: None,
            source: SourceSetting::default(),
            output_dir: PathBuf::from("output"),
            rater: None,
            anonymous: false,
            log: LogDestination::default(),
            verbose: false,
            loaded_from: None,
        }
    }
}

impl AppConfig {
    /// Reads the config file named by `--config` (if any) and applies the
    /// remaining flags on top.
    pub fn load(cli: &Cli) -> anyhow::Result<Self> {
        let base = match &cli.config {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        Ok(base.with_overrides(cli))
    }

    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("could not read config file {}", path.display()))?;
        let config: Self = ron::from_str(&content)
            .with_context(|| format!("could not parse config file {}", path.display()))?;
        Ok(Self {
            loaded_from: Some(path.to_path_buf()),
            ..config
        })
    }

    pub fn with_overrides(mut self, cli: &Cli) -> Self {
        if let Some(mode) = cli.mode {
            self.mode = mode;
        }
        if let Some(endpoint) = &cli.endpoint {
            self.endpoint = Some(endpoint.clone());
        }
        if let Some(rater) = &cli.rater {
            self.rater = Some(rater.clone());
        }
        self.anonymous |= cli.anonymous;
        if let Some(dir) = &cli.output_dir {
            self.output_dir = dir.clone();
        }
        if let Some(log) = cli.log {
            self.log = log;
        }
        self.verbose |= cli.verbose;

        if let Some(location) = &cli.metadata {
            let (image_base, seed) = match &self.source {
                SourceSetting::Metadata {
                    image_base, seed, ..
                } => (image_base.clone(), *seed),
                SourceSetting::Generated { .. } => (String::new(), None),
            };
            self.source = SourceSetting::Metadata {
                location: location.clone(),
                image_base,
                seed,
            };
        }
        match &mut self.source {
            SourceSetting::Metadata {
                image_base, seed, ..
            } => {
                if let Some(base) = &cli.image_base {
                    *image_base = base.clone();
                }
                if cli.seed.is_some() {
                    *seed = cli.seed;
                }
            }
            SourceSetting::Generated { count } => {
                if let Some(n) = cli.count {
                    *count = n;
                }
            }
        }
        self
    }

    pub fn engine_config(&self) -> EngineConfig {
        let mut config = EngineConfig::default_with_output(self.output_dir.clone());
        config.mode = self.mode.into();
        config.endpoint = self.endpoint.clone();
        config.source = match &self.source {
            SourceSetting::Generated { count } => SourceConfig::Static(StaticItemSource {
                count: *count,
                ..StaticItemSource::default()
            }),
            SourceSetting::Metadata {
                location,
                image_base,
                seed,
            } => SourceConfig::Metadata {
                location: location.clone(),
                image_base: image_base.clone(),
                shuffle_seed: *seed,
            },
        };
        config
    }

    pub fn log_level(&self) -> log::LevelFilter {
        if self.verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use clap::Parser;
    use pretty_assertions::assert_eq;

    use super::*;

    fn cli(args: &[&str]) -> Cli {
        let mut full = vec!["image-review"];
        full.extend_from_slice(args);
        Cli::try_parse_from(full).unwrap()
    }

    #[test]
    fn defaults_review_generated_images_in_export_mode() {
        let config = AppConfig::load(&cli(&[])).unwrap();
        assert_eq!(config, AppConfig::default());

        let engine = config.engine_config();
        assert_eq!(engine.mode, SaveMode::Export);
        assert_eq!(engine.source, SourceConfig::Static(StaticItemSource::default()));
    }

    #[test]
    fn file_values_are_read_from_ron() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"(
                mode: Remote,
                endpoint: Some("https://backend.example/api/decision"),
                source: Metadata(location: "data/metadata.csv", image_base: "https://cdn.example/img"),
            )"#
        )
        .unwrap();

        let config = AppConfig::from_file(file.path()).unwrap();
        assert_eq!(config.mode, ModeSetting::Remote);
        assert_eq!(
            config.source,
            SourceSetting::Metadata {
                location: "data/metadata.csv".to_string(),
                image_base: "https://cdn.example/img".to_string(),
                seed: None,
            }
        );
        assert_eq!(config.output_dir, PathBuf::from("output"));
        assert_eq!(config.loaded_from.as_deref(), Some(file.path()));
    }

    #[test]
    fn load_remembers_config_path_for_logging() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "(verbose: true)").unwrap();
        let path = file.path().to_str().unwrap().to_string();

        let config = AppConfig::load(&cli(&["--config", &path])).unwrap();
        assert!(config.verbose);
        assert_eq!(config.loaded_from, Some(PathBuf::from(&path)));

        assert_eq!(AppConfig::load(&cli(&[])).unwrap().loaded_from, None);
    }

    #[test]
    fn flags_override_file_values() {
        let base = AppConfig {
            mode: ModeSetting::Remote,
            endpoint: Some("https://old.example/save".to_string()),
            source: SourceSetting::Metadata {
                location: "old.csv".to_string(),
                image_base: "imgs".to_string(),
                seed: Some(1),
            },
            ..AppConfig::default()
        };

        let config = base.with_overrides(&cli(&[
            "--mode",
            "export",
            "--metadata",
            "new.csv",
            "--seed",
            "7",
            "--rater",
            "alice",
        ]));

        assert_eq!(config.mode, ModeSetting::Export);
        assert_eq!(config.endpoint.as_deref(), Some("https://old.example/save"));
        assert_eq!(config.rater.as_deref(), Some("alice"));
        assert_eq!(
            config.source,
            SourceSetting::Metadata {
                location: "new.csv".to_string(),
                image_base: "imgs".to_string(),
                seed: Some(7),
            }
        );
    }

    #[test]
    fn count_applies_only_to_generated_source() {
        let config = AppConfig::default().with_overrides(&cli(&["--count", "5"]));
        assert_eq!(config.source, SourceSetting::Generated { count: 5 });

        let config = AppConfig::default().with_overrides(&cli(&[
            "--metadata",
            "meta.csv",
            "--count",
            "5",
        ]));
        assert!(matches!(config.source, SourceSetting::Metadata { .. }));
    }

    #[test]
    fn unreadable_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(AppConfig::from_file(&dir.path().join("missing.ron")).is_err());
    }
}
