use log::{debug, trace};
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::corpus::Corpus;
use crate::models::bucket::{MAX_TEMPERATURE, MIN_TEMPERATURE, TemperatureBucket};
use crate::models::rating::Rating;
use crate::models::zip_code::ZipCode;
use crate::random::{RandomSource, ThreadRandom};
use crate::weather::{Observation, RandomWeather, WeatherReport};

/// Turns a temperature and a rating into one of the canned descriptions.
///
/// Cloning is cheap; clones share the corpus and the random source.
#[derive(Clone)]
pub struct DescriptionResolver {
    corpus: Arc<Corpus>,
    random: Arc<dyn RandomSource>,
}

impl DescriptionResolver {
    pub fn new(corpus: Corpus) -> DescriptionResolver {
        DescriptionResolver::with_random(corpus, Arc::new(ThreadRandom))
    }

    pub fn with_random(corpus: Corpus, random: Arc<dyn RandomSource>) -> DescriptionResolver {
        DescriptionResolver {
            corpus: Arc::new(corpus),
            random,
        }
    }

    pub fn corpus(&self) -> &Corpus {
        &self.corpus
    }

    /// Pick a description for `temperature` (°F) at the given rating.
    ///
    /// Never fails. Out of range temperatures are clamped into the corpus
    /// domain, and a missing or empty bucket yields
    /// `"Temperature: {temperature}°F"` using the input as given.
    pub fn resolve(&self, temperature: f64, rating: Rating) -> String {
        let bucket = TemperatureBucket::for_temperature(temperature);
        let descriptions = self.corpus.descriptions(rating, bucket);
        trace!(
            "Resolving {temperature}°F at {rating} to bucket {bucket} ({} candidates)",
            descriptions.len()
        );
        if descriptions.is_empty() {
            debug!("No descriptions for rating {rating} in bucket {bucket}, using fallback");
            return format!("Temperature: {temperature}°F");
        }
        let index = self.random.pick_index(descriptions.len());
        descriptions[index].clone()
    }

    /// Resolve with the default rating, X.
    pub fn resolve_default(&self, temperature: f64) -> String {
        self.resolve(temperature, Rating::default())
    }

    /// Draw a whole-degree temperature in the corpus domain and describe it
    /// once per rating.
    pub fn random_weather(&self) -> RandomWeather {
        let temperature = self
            .random
            .pick_in_range(MIN_TEMPERATURE..=MAX_TEMPERATURE);
        let descriptions_by_rating: BTreeMap<_, _> = Rating::ALL
            .into_iter()
            .map(|rating| {
                (
                    rating.corpus_key().to_string(),
                    self.resolve(temperature as f64, rating),
                )
            })
            .collect();
        RandomWeather {
            temperature_fahrenheit: temperature,
            descriptions_by_rating,
        }
    }

    /// Assemble the report for an already fetched observation.
    pub fn report(
        &self,
        zip_code: Option<ZipCode>,
        observation: Observation,
        rating: Rating,
    ) -> WeatherReport {
        WeatherReport {
            zip_code,
            temperature_fahrenheit: observation.temperature_fahrenheit,
            description: self.resolve(observation.temperature_fahrenheit, rating),
            location: observation.location,
            rating: rating.corpus_key().to_string(),
        }
    }
}
