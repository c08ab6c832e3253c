//! Fetch-state machine for the remote country dataset.

use crate::catalog::duplicate_names;
use crate::domain::{CountryRecord, FetchError};

/// REST Countries endpoint with the field selection the plugin renders.
pub const DEFAULT_ENDPOINT: &str = "https://restcountries.com/v3.1/all?fields=name,flags,capital,region,subregion,population,area,languages,currencies,cca3";

/// Key under which the fetch generation travels in the host request context.
pub const GENERATION_CONTEXT_KEY: &str = "fetch_generation";

/// Handle for one in-flight fetch.
///
/// The generation is echoed back by the host with the response and passed to
/// [`RemoteDataSource::complete`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    pub generation: u64,
}

/// Loading/error/result state of the country dataset.
///
/// Mutated only through [`begin`](Self::begin) and [`complete`](Self::complete),
/// each of which leaves the state consistent: after `complete` the source is
/// never loading, and exactly one of fresh data or a fresh error was applied.
#[derive(Debug, Clone, Default)]
pub struct RemoteDataSource {
    /// Records from the last successful fetch (empty until then).
    data: Vec<CountryRecord>,

    /// Error from the most recent completed fetch, if it failed.
    error: Option<FetchError>,

    /// Whether a fetch is in flight.
    loading: bool,

    /// Generation of the most recently issued ticket; `0` before the first fetch.
    generation: u64,

    /// Unix timestamp of the last successful fetch.
    fetched_at: Option<i64>,
}

impl RemoteDataSource {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a fetch: marks the source loading, clears any previous error and
    /// issues a ticket that supersedes all earlier ones.
    pub fn begin(&mut self) -> FetchTicket {
        self.generation = self.generation.wrapping_add(1);
        self.loading = true;
        self.error = None;

        tracing::debug!(generation = self.generation, "fetch started");
        FetchTicket {
            generation: self.generation,
        }
    }

    /// Applies the outcome of the fetch issued with `generation`.
    ///
    /// Stale completions (from a superseded ticket) are dropped and `false` is
    /// returned. On failure the previous data is kept so that a failed retry
    /// does not blank a list the user was already browsing.
    pub fn complete(
        &mut self,
        generation: u64,
        outcome: Result<Vec<CountryRecord>, FetchError>,
    ) -> bool {
        let _span = tracing::debug_span!("fetch_complete", generation).entered();

        if generation != self.generation || !self.loading {
            tracing::debug!(
                latest = self.generation,
                loading = self.loading,
                "dropping stale fetch completion"
            );
            return false;
        }

        match outcome {
            Ok(records) => {
                let dupes = duplicate_names(&records);
                if !dupes.is_empty() {
                    tracing::warn!(
                        count = dupes.len(),
                        names = ?dupes,
                        "dataset contains duplicate official names; favourites will be shared"
                    );
                }
                tracing::debug!(records = records.len(), "fetch succeeded");
                self.data = records;
                self.error = None;
                self.fetched_at = Some(chrono::Utc::now().timestamp());
            }
            Err(e) => {
                tracing::warn!(error = %e, "fetch failed");
                self.error = Some(e);
            }
        }
        self.loading = false;
        true
    }

    #[must_use]
    pub fn data(&self) -> &[CountryRecord] {
        &self.data
    }

    #[must_use]
    pub const fn error(&self) -> Option<&FetchError> {
        self.error.as_ref()
    }

    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    /// Whether [`begin`](Self::begin) has been called at least once.
    #[must_use]
    pub const fn has_started(&self) -> bool {
        self.generation > 0
    }

    #[must_use]
    pub const fn fetched_at(&self) -> Option<i64> {
        self.fetched_at
    }
}

/// Decodes a host HTTP response into country records.
///
/// # Errors
///
/// - [`FetchError::Network`] when the host reports no HTTP status (`0`)
/// - [`FetchError::Status`] for any non-2xx status
/// - [`FetchError::Decode`] when the body is not a JSON array of countries
pub fn decode_response(status: u16, body: &[u8]) -> Result<Vec<CountryRecord>, FetchError> {
    if status == 0 {
        let reason = String::from_utf8_lossy(body).trim().to_string();
        return Err(FetchError::Network(if reason.is_empty() {
            "no response".to_string()
        } else {
            reason
        }));
    }

    if !(200..300).contains(&status) {
        return Err(FetchError::Status(status));
    }

    serde_json::from_slice::<Vec<CountryRecord>>(body).map_err(|e| FetchError::Decode(e.to_string()))
}

/// Formats how long ago `fetched_at` was, relative to `now` (both Unix seconds).
///
/// "just now", "5m ago", "3h ago", "2d ago".
#[must_use]
pub fn format_age(fetched_at: i64, now: i64) -> String {
    const SECONDS_PER_MINUTE: i64 = 60;
    const SECONDS_PER_HOUR: i64 = 3600;
    const SECONDS_PER_DAY: i64 = 86400;

    let diff = (now - fetched_at).max(0);
    if diff < SECONDS_PER_MINUTE {
        "just now".to_string()
    } else if diff < SECONDS_PER_HOUR {
        format!("{}m ago", diff / SECONDS_PER_MINUTE)
    } else if diff < SECONDS_PER_DAY {
        format!("{}h ago", diff / SECONDS_PER_HOUR)
    } else {
        format!("{}d ago", diff / SECONDS_PER_DAY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_countries() -> Vec<CountryRecord> {
        vec![CountryRecord::new("Japan", "Asia"), CountryRecord::new("French Republic", "Europe")]
    }

    #[test]
    fn begin_sets_loading_and_clears_error() {
        let mut source = RemoteDataSource::new();
        let ticket = source.begin();
        assert!(source.complete(ticket.generation, Err(FetchError::Status(500))));
        assert!(source.error().is_some());

        let retry = source.begin();
        assert!(source.is_loading());
        assert!(source.error().is_none());
        assert_eq!(retry.generation, ticket.generation + 1);
    }

    #[test]
    fn success_sets_data_and_stops_loading() {
        let mut source = RemoteDataSource::new();
        let ticket = source.begin();
        assert!(source.complete(ticket.generation, Ok(two_countries())));
        assert!(!source.is_loading());
        assert!(source.error().is_none());
        assert_eq!(source.data().len(), 2);
        assert!(source.fetched_at().is_some());
    }

    #[test]
    fn failure_stops_loading_and_keeps_previous_data() {
        let mut source = RemoteDataSource::new();
        let first = source.begin();
        source.complete(first.generation, Ok(two_countries()));

        let retry = source.begin();
        assert!(source.complete(retry.generation, Err(FetchError::Network("offline".into()))));
        assert!(!source.is_loading());
        assert_eq!(source.error(), Some(&FetchError::Network("offline".into())));
        assert_eq!(source.data().len(), 2);
    }

    #[test]
    fn stale_completion_is_ignored() {
        let mut source = RemoteDataSource::new();
        let old = source.begin();
        let new = source.begin();

        assert!(!source.complete(old.generation, Err(FetchError::Status(504))));
        assert!(source.is_loading());
        assert!(source.error().is_none());

        assert!(source.complete(new.generation, Ok(two_countries())));
        assert!(!source.complete(new.generation, Ok(Vec::new())));
        assert_eq!(source.data().len(), 2);
    }

    #[test]
    fn has_started_tracks_first_begin() {
        let mut source = RemoteDataSource::new();
        assert!(!source.has_started());
        assert!(!source.is_loading());
        source.begin();
        assert!(source.has_started());
    }

    #[test]
    fn decode_maps_status_and_body_failures() {
        assert_eq!(decode_response(404, b"[]"), Err(FetchError::Status(404)));
        assert!(matches!(decode_response(0, b""), Err(FetchError::Network(_))));
        assert!(matches!(decode_response(200, b"{not json"), Err(FetchError::Decode(_))));
        assert!(matches!(decode_response(200, b"{\"a\": 1}"), Err(FetchError::Decode(_))));
    }

    #[test]
    fn decode_accepts_country_array() {
        let body = br#"[{"name": {"common": "Japan", "official": "Japan"}, "region": "Asia", "population": 125836021, "capital": ["Tokyo"]}]"#;
        let records = decode_response(200, body).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].primary_capital(), Some("Tokyo"));
    }

    #[test]
    fn age_formatting() {
        assert_eq!(format_age(1_000, 1_030), "just now");
        assert_eq!(format_age(1_000, 1_000 + 300), "5m ago");
        assert_eq!(format_age(0, 3 * 3600), "3h ago");
        assert_eq!(format_age(0, 2 * 86400), "2d ago");
        assert_eq!(format_age(100, 0), "just now");
    }
}
