use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Content rating selecting which pool of descriptions to draw from.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum Rating {
    /// General audiences, family friendly.
    G,
    /// Parental guidance suggested.
    PG,
    /// Parents strongly cautioned.
    #[serde(rename = "PG-13", alias = "PG13")]
    PG13,
    /// Restricted, strong language.
    R,
    /// Explicit, very strong language.
    #[default]
    X,
    /// Painfully bland, robotic descriptions.
    BLAND,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown rating '{0}', expected one of G, PG, PG-13, R, X, BLAND")]
pub struct RatingParseError(pub String);

impl Rating {
    pub const ALL: [Rating; 6] = [
        Rating::G,
        Rating::PG,
        Rating::PG13,
        Rating::R,
        Rating::X,
        Rating::BLAND,
    ];

    /// Key used for this rating in the description corpus.
    pub fn corpus_key(self) -> &'static str {
        match self {
            Rating::G => "G",
            Rating::PG => "PG",
            Rating::PG13 => "PG-13",
            Rating::R => "R",
            Rating::X => "X",
            Rating::BLAND => "BLAND",
        }
    }

    /// Exact inverse of [`Rating::corpus_key`].
    pub fn from_corpus_key(key: &str) -> Option<Rating> {
        Rating::ALL
            .into_iter()
            .find(|rating| rating.corpus_key() == key)
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.corpus_key())
    }
}

impl FromStr for Rating {
    type Err = RatingParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "G" => Ok(Rating::G),
            "PG" => Ok(Rating::PG),
            "PG-13" | "PG13" => Ok(Rating::PG13),
            "R" => Ok(Rating::R),
            "X" => Ok(Rating::X),
            "BLAND" => Ok(Rating::BLAND),
            _ => Err(RatingParseError(s.to_string())),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn pg13_uses_dashed_corpus_key() {
        assert_eq!(Rating::PG13.corpus_key(), "PG-13");
        assert_eq!(Rating::PG13.to_string(), "PG-13");
        assert_eq!(serde_json::to_string(&Rating::PG13).unwrap(), "\"PG-13\"");
    }

    #[test]
    fn other_ratings_use_their_name() {
        for (rating, key) in [
            (Rating::G, "G"),
            (Rating::PG, "PG"),
            (Rating::R, "R"),
            (Rating::X, "X"),
            (Rating::BLAND, "BLAND"),
        ] {
            assert_eq!(rating.corpus_key(), key);
        }
    }

    #[test]
    fn parse_accepts_key_and_variant_name() {
        assert_eq!("PG-13".parse::<Rating>(), Ok(Rating::PG13));
        assert_eq!("pg13".parse::<Rating>(), Ok(Rating::PG13));
        assert_eq!(" bland ".parse::<Rating>(), Ok(Rating::BLAND));
        assert_eq!(
            "NC-17".parse::<Rating>(),
            Err(RatingParseError("NC-17".to_string()))
        );
    }

    #[test]
    fn corpus_key_lookup_is_exact() {
        for rating in Rating::ALL {
            assert_eq!(Rating::from_corpus_key(rating.corpus_key()), Some(rating));
        }
        assert_eq!(Rating::from_corpus_key("PG13"), None);
        assert_eq!(Rating::from_corpus_key("pg"), None);
    }

    #[test]
    fn deserialize_accepts_alias() {
        let rating: Rating = serde_json::from_str("\"PG13\"").unwrap();
        assert_eq!(rating, Rating::PG13);
    }

    #[test]
    fn default_is_x() {
        assert_eq!(Rating::default(), Rating::X);
    }
}
