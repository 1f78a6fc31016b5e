use std::path::PathBuf;
use std::sync::Arc;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use review_core::{LoadError, ReviewItem};
use review_logging::review_info;

use crate::decode::decode_text;
use crate::fetch::Fetcher;
use crate::metadata::parse_metadata;

/// Produces the ordered list of items for one session.
#[async_trait::async_trait]
pub trait ItemSource: Send + Sync {
    async fn load(&self) -> Result<Vec<ReviewItem>, LoadError>;
}

/// Upper bound on generated sessions.
const MAX_GENERATED_ITEMS: usize = 100_000;

/// Generates `count` items from a numbered path template such as
/// `images/variation_{n}.png`. Order is fixed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticItemSource {
    pub count: usize,
    pub first: usize,
    pub width: usize,
    pub template: String,
}

impl Default for StaticItemSource {
    fn default() -> Self {
        Self {
            count: 60,
            first: 1,
            width: 2,
            template: "images/variation_{n}.png".to_string(),
        }
    }
}

impl StaticItemSource {
    pub fn items(&self) -> Vec<ReviewItem> {
        (self.first..=usize::MAX)
            .take(self.count)
            .map(|n| {
                let number = format!("{n:0width$}", width = self.width);
                let path = self.template.replace("{n}", &number);
                let id = path.rsplit('/').next().unwrap_or(&path).to_string();
                ReviewItem::new(id, path)
            })
            .collect()
    }
}

#[async_trait::async_trait]
impl ItemSource for StaticItemSource {
    async fn load(&self) -> Result<Vec<ReviewItem>, LoadError> {
        if self.count > MAX_GENERATED_ITEMS || self.first.checked_add(self.count).is_none() {
            return Err(LoadError::Parse(format!(
                "cannot generate {} items starting at {} (limit {MAX_GENERATED_ITEMS})",
                self.count, self.first
            )));
        }
        Ok(self.items())
    }
}

/// Where the metadata table lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetadataLocation {
    Url(String),
    Path(PathBuf),
}

impl MetadataLocation {
    /// `http://` and `https://` references are fetched; anything else is a file path.
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        let lower = raw.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            MetadataLocation::Url(raw.to_string())
        } else {
            MetadataLocation::Path(PathBuf::from(raw))
        }
    }
}

/// Builds items from a metadata CSV and shuffles them per session.
pub struct MetadataItemSource {
    location: MetadataLocation,
    image_base: String,
    shuffle_seed: Option<u64>,
    fetcher: Arc<dyn Fetcher>,
}

impl MetadataItemSource {
    pub fn new(location: MetadataLocation, image_base: impl Into<String>, fetcher: Arc<dyn Fetcher>) -> Self {
        Self {
            location,
            image_base: image_base.into(),
            shuffle_seed: None,
            fetcher,
        }
    }

    /// Fixes the shuffle so repeated loads produce the same order.
    pub fn with_shuffle_seed(mut self, seed: Option<u64>) -> Self {
        self.shuffle_seed = seed;
        self
    }

    async fn read_text(&self) -> Result<String, LoadError> {
        let (bytes, content_type) = match &self.location {
            MetadataLocation::Url(url) => {
                let fetched = self
                    .fetcher
                    .fetch(url)
                    .await
                    .map_err(|err| LoadError::Fetch(err.to_string()))?;
                (fetched.bytes, fetched.content_type)
            }
            MetadataLocation::Path(path) => {
                let bytes = tokio::fs::read(path)
                    .await
                    .map_err(|err| LoadError::Fetch(format!("{}: {err}", path.display())))?;
                (bytes, None)
            }
        };
        decode_text(&bytes, content_type.as_deref())
            .map(|decoded| decoded.text)
            .map_err(|err| LoadError::Parse(err.to_string()))
    }

    fn display_ref(&self, filename: &str) -> String {
        let base = self.image_base.trim_end_matches('/');
        if base.is_empty() {
            filename.to_string()
        } else {
            format!("{base}/{filename}")
        }
    }
}

#[async_trait::async_trait]
impl ItemSource for MetadataItemSource {
    async fn load(&self) -> Result<Vec<ReviewItem>, LoadError> {
        let text = self.read_text().await?;
        let mut items: Vec<ReviewItem> = parse_metadata(&text)?
            .into_iter()
            .map(|row| {
                let display_ref = self.display_ref(&row.filename);
                ReviewItem::new(row.filename, display_ref).with_metadata(row.values)
            })
            .collect();
        shuffle_items(&mut items, self.shuffle_seed);
        review_info!("Metadata source produced {} items", items.len());
        Ok(items)
    }
}

/// Uniform random permutation (Fisher–Yates). Seeded when `seed` is given.
pub fn shuffle_items<T>(items: &mut [T], seed: Option<u64>) {
    match seed {
        Some(seed) => items.shuffle(&mut StdRng::seed_from_u64(seed)),
        None => items.shuffle(&mut rand::thread_rng()),
    }
}
