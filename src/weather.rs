use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::models::zip_code::ZipCode;

/// What the core needs from a weather lookup: a temperature and a place name.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Observation {
    pub temperature_fahrenheit: f64,
    pub location: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WeatherReport {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zip_code: Option<ZipCode>,
    pub temperature_fahrenheit: f64,
    pub description: String,
    pub location: String,
    /// Corpus key of the rating the description was drawn for.
    pub rating: String,
}

/// A random temperature with one description per rating.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RandomWeather {
    pub temperature_fahrenheit: i32,
    /// Keyed by corpus rating key, e.g. `"PG-13"`.
    pub descriptions_by_rating: BTreeMap<String, String>,
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn report_serializes_with_camel_case_fields() {
        let report = WeatherReport {
            zip_code: Some("10001".parse().unwrap()),
            temperature_fahrenheit: 72.5,
            description: "Nice.".to_string(),
            location: "New York".to_string(),
            rating: "PG-13".to_string(),
        };
        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "zipCode": "10001",
                "temperatureFahrenheit": 72.5,
                "description": "Nice.",
                "location": "New York",
                "rating": "PG-13",
            })
        );
    }

    #[test]
    fn report_without_zip_code_omits_field() {
        let report = WeatherReport {
            zip_code: None,
            temperature_fahrenheit: -3.0,
            description: "Brr.".to_string(),
            location: String::new(),
            rating: "G".to_string(),
        };
        let value = serde_json::to_value(&report).unwrap();
        assert!(value.get("zipCode").is_none());
        assert_eq!(value["temperatureFahrenheit"], -3.0);
        let parsed: WeatherReport = serde_json::from_value(value).unwrap();
        assert_eq!(parsed, report);
    }
}
