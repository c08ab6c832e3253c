//! Country record domain model.
//!
//! [`CountryRecord`] mirrors the subset of the upstream REST Countries payload
//! that the plugin requests. Records are read-only once decoded; the official
//! name is the identity key used by the favourites store.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Common and official names of a country.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountryName {
    /// Short display name ("France").
    #[serde(default)]
    pub common: String,

    /// Official name ("French Republic"). Used as the identity key.
    pub official: String,
}

/// Flag image references.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flags {
    #[serde(default)]
    pub png: String,
    #[serde(default)]
    pub svg: String,
    #[serde(default)]
    pub alt: Option<String>,
}

/// A currency in use by a country.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Currency {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub symbol: String,
}

/// A single country as delivered by the remote dataset.
///
/// Optional upstream fields default to empty values so that sparse records
/// (territories without a capital, currencies or languages) still decode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountryRecord {
    pub name: CountryName,

    #[serde(default)]
    pub region: String,

    #[serde(default)]
    pub subregion: Option<String>,

    #[serde(default)]
    pub flags: Flags,

    #[serde(default)]
    pub capital: Vec<String>,

    #[serde(default)]
    pub population: u64,

    #[serde(default)]
    pub area: Option<f64>,

    /// Language code to language name.
    #[serde(default)]
    pub languages: Option<BTreeMap<String, String>>,

    /// Currency code to currency details.
    #[serde(default)]
    pub currencies: Option<BTreeMap<String, Currency>>,

    /// ISO 3166-1 alpha-3 code.
    #[serde(default)]
    pub cca3: Option<String>,
}

impl CountryRecord {
    /// Creates a minimal record with the given official name and region.
    ///
    /// Mostly useful for tests and fixtures; real records come from
    /// [`crate::source::decode_response`].
    #[must_use]
    pub fn new(official: impl Into<String>, region: impl Into<String>) -> Self {
        let official = official.into();
        Self {
            name: CountryName {
                common: official.clone(),
                official,
            },
            region: region.into(),
            subregion: None,
            flags: Flags::default(),
            capital: Vec::new(),
            population: 0,
            area: None,
            languages: None,
            currencies: None,
            cca3: None,
        }
    }

    /// The identity key of this record.
    #[must_use]
    pub fn official_name(&self) -> &str {
        &self.name.official
    }

    /// First listed capital, if any.
    #[must_use]
    pub fn primary_capital(&self) -> Option<&str> {
        self.capital.first().map(String::as_str)
    }

    /// Language names joined with `", "`, or `None` when absent.
    #[must_use]
    pub fn language_list(&self) -> Option<String> {
        self.languages
            .as_ref()
            .filter(|langs| !langs.is_empty())
            .map(|langs| langs.values().cloned().collect::<Vec<_>>().join(", "))
    }

    /// Currency symbols joined with `", "`, or `None` when absent.
    #[must_use]
    pub fn currency_symbols(&self) -> Option<String> {
        self.currencies
            .as_ref()
            .filter(|currencies| !currencies.is_empty())
            .map(|currencies| {
                currencies
                    .values()
                    .map(|c| c.symbol.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            })
    }
}

/// Formats a population with thousands separators ("67,391,582").
#[must_use]
pub fn format_population(population: u64) -> String {
    let digits = population.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRANCE: &str = r#"{
        "name": {"common": "France", "official": "French Republic", "nativeName": {}},
        "flags": {"png": "https://flagcdn.com/w320/fr.png", "svg": "https://flagcdn.com/fr.svg", "alt": "The flag of France"},
        "capital": ["Paris"],
        "region": "Europe",
        "subregion": "Western Europe",
        "population": 67391582,
        "area": 551695.0,
        "languages": {"fra": "French"},
        "currencies": {"EUR": {"name": "Euro", "symbol": "€"}},
        "cca3": "FRA"
    }"#;

    #[test]
    fn decodes_upstream_shape() {
        let record: CountryRecord = serde_json::from_str(FRANCE).unwrap();
        assert_eq!(record.official_name(), "French Republic");
        assert_eq!(record.primary_capital(), Some("Paris"));
        assert_eq!(record.language_list().as_deref(), Some("French"));
        assert_eq!(record.currency_symbols().as_deref(), Some("€"));
        assert_eq!(record.cca3.as_deref(), Some("FRA"));
    }

    #[test]
    fn sparse_record_decodes_with_defaults() {
        let record: CountryRecord = serde_json::from_str(
            r#"{"name": {"official": "Bouvet Island"}, "region": "Antarctic", "population": 0}"#,
        )
        .unwrap();
        assert!(record.capital.is_empty());
        assert_eq!(record.primary_capital(), None);
        assert_eq!(record.language_list(), None);
        assert_eq!(record.currency_symbols(), None);
    }

    #[test]
    fn population_gets_thousands_separators() {
        assert_eq!(format_population(0), "0");
        assert_eq!(format_population(999), "999");
        assert_eq!(format_population(1000), "1,000");
        assert_eq!(format_population(67_391_582), "67,391,582");
    }
}
