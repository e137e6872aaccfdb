use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Lowest temperature (°F) the corpus is bucketed for.
pub const MIN_TEMPERATURE: i32 = -50;
/// Highest temperature (°F) the corpus is bucketed for.
pub const MAX_TEMPERATURE: i32 = 140;
pub const BUCKET_WIDTH: i32 = 5;

/// A five degree wide half-open interval `[start, start + 5)`.
///
/// `start` is always a multiple of five. Temperatures outside
/// `MIN_TEMPERATURE..=MAX_TEMPERATURE` are clamped before bucketing, so the
/// buckets in use start at -50 and end with the one starting at 140.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TemperatureBucket {
    start: i32,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid temperature bucket '{0}', expected '{{start}}_{{start+4}}' with start a multiple of 5")]
pub struct BucketKeyError(pub String);

impl TemperatureBucket {
    /// Bucket for a temperature given in degrees Fahrenheit.
    ///
    /// Rounds half away from zero, clamps into the supported domain and
    /// floors towards negative infinity, so -3 lands in `-5_-1`.
    pub fn for_temperature(temperature: f64) -> TemperatureBucket {
        // NaN casts to 0 and infinities saturate, both then get clamped.
        let rounded = temperature.round() as i32;
        let clamped = rounded.clamp(MIN_TEMPERATURE, MAX_TEMPERATURE);
        TemperatureBucket {
            start: clamped.div_euclid(BUCKET_WIDTH) * BUCKET_WIDTH,
        }
    }

    pub fn start(&self) -> i32 {
        self.start
    }

    /// Last integer temperature inside the bucket.
    pub fn end(&self) -> i32 {
        self.start + BUCKET_WIDTH - 1
    }

    pub fn key(&self) -> String {
        self.to_string()
    }

    /// Every bucket covering the clamped domain, coldest first.
    pub fn all() -> impl Iterator<Item = TemperatureBucket> {
        (MIN_TEMPERATURE..=MAX_TEMPERATURE)
            .step_by(BUCKET_WIDTH as usize)
            .map(|start| TemperatureBucket { start })
    }
}

impl fmt::Display for TemperatureBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.start, self.end())
    }
}

impl FromStr for TemperatureBucket {
    type Err = BucketKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let error = || BucketKeyError(s.to_string());
        let (start, end) = s.split_once('_').ok_or_else(error)?;
        let start: i32 = start.parse().map_err(|_| error())?;
        let end: i32 = end.parse().map_err(|_| error())?;
        if start.rem_euclid(BUCKET_WIDTH) != 0 || end != start + BUCKET_WIDTH - 1 {
            return Err(error());
        }
        let bucket = TemperatureBucket { start };
        // Only the canonical spelling, so "05_9" cannot shadow "5_9".
        if bucket.key() != s {
            return Err(error());
        }
        Ok(bucket)
    }
}
