use async_trait::async_trait;
use log::{debug, info, warn};
use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::fs;
use tokio::io::AsyncReadExt;

use crate::models::bucket::{BucketKeyError, TemperatureBucket};
use crate::models::rating::Rating;

#[derive(Debug, Error)]
pub enum CorpusError {
    #[error("could not read description corpus: {source}")]
    IoError {
        #[from]
        source: io::Error,
    },
    #[error("invalid description corpus format: {source}")]
    DecodingError {
        #[from]
        source: serde_json::Error,
    },
    #[error("unknown rating '{0}' in description corpus")]
    UnknownRating(String),
    #[error("invalid bucket in description corpus for rating {rating}: {source}")]
    InvalidBucketKey {
        rating: Rating,
        #[source]
        source: BucketKeyError,
    },
}

/// Copy of `assets/descriptions.json` compiled into the binary.
pub const BUNDLED_CORPUS: &[u8] = include_bytes!("../assets/descriptions.json");

/// Where the raw corpus bytes come from.
#[async_trait]
pub trait CorpusSource: Send + Sync {
    async fn read(&self) -> Result<Vec<u8>, CorpusError>;

    /// Human readable origin, used in log messages.
    fn describe(&self) -> String;
}

#[derive(Debug, Clone)]
pub struct InMemorySource {
    data: Vec<u8>,
}

impl InMemorySource {
    pub fn new(data: impl Into<Vec<u8>>) -> InMemorySource {
        InMemorySource { data: data.into() }
    }
}

#[async_trait]
impl CorpusSource for InMemorySource {
    async fn read(&self) -> Result<Vec<u8>, CorpusError> {
        Ok(self.data.clone())
    }

    fn describe(&self) -> String {
        format!("{} bytes in memory", self.data.len())
    }
}

#[derive(Debug, Clone)]
pub struct FileSource {
    file_path: PathBuf,
}

impl FileSource {
    pub fn new(file_path: impl Into<PathBuf>) -> FileSource {
        FileSource {
            file_path: file_path.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }
}

#[async_trait]
impl CorpusSource for FileSource {
    async fn read(&self) -> Result<Vec<u8>, CorpusError> {
        let mut file = fs::File::open(&self.file_path).await?;
        let mut data = Vec::new();
        file.read_to_end(&mut data).await?;
        Ok(data)
    }

    fn describe(&self) -> String {
        self.file_path.display().to_string()
    }
}

/// The static table of rating × temperature bucket → descriptions.
///
/// Built once and never modified afterwards; share it behind an `Arc`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Corpus {
    descriptions: BTreeMap<Rating, BTreeMap<TemperatureBucket, Vec<String>>>,
}

type RawCorpus = BTreeMap<String, BTreeMap<String, Vec<String>>>;

impl Corpus {
    /// Parse a corpus from its JSON form.
    ///
    /// The top level object is keyed by corpus rating key (`"PG-13"` for
    /// PG13), each value keyed by bucket key (`"-5_-1"`, `"70_74"`, ...).
    pub fn from_json(data: &[u8]) -> Result<Corpus, CorpusError> {
        let raw: RawCorpus = serde_json::from_slice(data)?;
        Corpus::from_raw(raw)
    }

    fn from_raw(raw: RawCorpus) -> Result<Corpus, CorpusError> {
        let mut descriptions = BTreeMap::new();
        for (rating_key, buckets) in raw {
            let rating = Rating::from_corpus_key(&rating_key)
                .ok_or(CorpusError::UnknownRating(rating_key))?;
            let buckets = buckets
                .into_iter()
                .map(|(bucket_key, entries)| {
                    bucket_key
                        .parse::<TemperatureBucket>()
                        .map(|bucket| (bucket, entries))
                        .map_err(|source| CorpusError::InvalidBucketKey { rating, source })
                })
                .collect::<Result<BTreeMap<_, _>, _>>()?;
            descriptions.insert(rating, buckets);
        }
        Ok(Corpus { descriptions })
    }

    /// Add descriptions for a rating and bucket, keeping insertion order.
    pub fn with_descriptions<I, S>(
        mut self,
        rating: Rating,
        bucket: TemperatureBucket,
        entries: I,
    ) -> Corpus
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.descriptions
            .entry(rating)
            .or_default()
            .entry(bucket)
            .or_default()
            .extend(entries.into_iter().map(Into::into));
        self
    }

    /// Descriptions for a rating and bucket, empty when the pair is missing.
    pub fn descriptions(&self, rating: Rating, bucket: TemperatureBucket) -> &[String] {
        self.descriptions
            .get(&rating)
            .and_then(|buckets| buckets.get(&bucket))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Buckets with at least one description for `rating`.
    pub fn bucket_count(&self, rating: Rating) -> usize {
        self.descriptions
            .get(&rating)
            .map(|buckets| buckets.values().filter(|entries| !entries.is_empty()).count())
            .unwrap_or(0)
    }

    pub fn description_count_for(&self, rating: Rating) -> usize {
        self.descriptions
            .get(&rating)
            .map(|buckets| buckets.values().map(Vec::len).sum())
            .unwrap_or(0)
    }

    pub fn description_count(&self) -> usize {
        self.descriptions
            .values()
            .flat_map(BTreeMap::values)
            .map(Vec::len)
            .sum()
    }

    /// Every rating and bucket in the clamped domain without descriptions.
    pub fn gaps(&self) -> Vec<(Rating, TemperatureBucket)> {
        Rating::ALL
            .into_iter()
            .flat_map(|rating| TemperatureBucket::all().map(move |bucket| (rating, bucket)))
            .filter(|(rating, bucket)| self.descriptions(*rating, *bucket).is_empty())
            .collect()
    }
}

/// Read and validate a corpus.
///
/// Unreadable or malformed data is an error. Missing coverage is not, since
/// resolution falls back to a plain temperature string; gaps are logged.
pub async fn load_corpus<S>(source: &S) -> Result<Corpus, CorpusError>
where
    S: CorpusSource + ?Sized,
{
    debug!("Loading description corpus from {}", source.describe());
    let data = source.read().await?;
    let corpus = Corpus::from_json(&data)?;

    let gaps = corpus.gaps();
    for (rating, bucket) in &gaps {
        warn!("Description corpus has no entries for rating {rating} in bucket {bucket}");
    }
    info!(
        "Loaded {} descriptions from {} ({} gaps)",
        corpus.description_count(),
        source.describe(),
        gaps.len()
    );
    Ok(corpus)
}

pub async fn load_bundled_corpus() -> Result<Corpus, CorpusError> {
    load_corpus(&InMemorySource::new(BUNDLED_CORPUS)).await
}

pub async fn load_corpus_from_file(file_path: impl Into<PathBuf>) -> Result<Corpus, CorpusError> {
    load_corpus(&FileSource::new(file_path)).await
}
