use std::path::PathBuf;
use std::sync::Arc;

use review_core::SaveMode;

use crate::fetch::{FetchSettings, ReqwestFetcher};
use crate::sink::{DeferredSink, RemoteSink, ResultSink};
use crate::source::{ItemSource, MetadataItemSource, MetadataLocation, StaticItemSource};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceConfig {
    Static(StaticItemSource),
    Metadata {
        location: String,
        image_base: String,
        shuffle_seed: Option<u64>,
    },
}

impl Default for SourceConfig {
    fn default() -> Self {
        SourceConfig::Static(StaticItemSource::default())
    }
}

#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub source: SourceConfig,
    pub mode: SaveMode,
    pub endpoint: Option<String>,
    pub output_dir: PathBuf,
    pub fetch: FetchSettings,
}

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("remote mode needs a save endpoint")]
    MissingEndpoint,
    #[error("invalid save endpoint '{endpoint}': {message}")]
    InvalidEndpoint { endpoint: String, message: String },
    #[error("could not start engine runtime: {0}")]
    Runtime(#[from] std::io::Error),
}

impl EngineConfig {
    pub fn default_with_output(output_dir: PathBuf) -> Self {
        Self {
            source: SourceConfig::default(),
            mode: SaveMode::Export,
            endpoint: None,
            output_dir,
            fetch: FetchSettings::default(),
        }
    }

    pub fn build_source(&self) -> Arc<dyn ItemSource> {
        match &self.source {
            SourceConfig::Static(source) => Arc::new(source.clone()),
            SourceConfig::Metadata {
                location,
                image_base,
                shuffle_seed,
            } => Arc::new(
                MetadataItemSource::new(
                    MetadataLocation::parse(location),
                    image_base.clone(),
                    Arc::new(ReqwestFetcher::new(self.fetch.clone())),
                )
                .with_shuffle_seed(*shuffle_seed),
            ),
        }
    }

    pub fn build_sink(&self) -> Result<Arc<dyn ResultSink>, EngineError> {
        match self.mode {
            SaveMode::Export => Ok(Arc::new(DeferredSink::new(self.output_dir.clone()))),
            SaveMode::Remote => {
                let endpoint = self
                    .endpoint
                    .as_deref()
                    .map(str::trim)
                    .filter(|endpoint| !endpoint.is_empty())
                    .ok_or(EngineError::MissingEndpoint)?;
                reqwest::Url::parse(endpoint).map_err(|err| EngineError::InvalidEndpoint {
                    endpoint: endpoint.to_string(),
                    message: err.to_string(),
                })?;
                Ok(Arc::new(RemoteSink::new(endpoint)))
            }
        }
    }
}
