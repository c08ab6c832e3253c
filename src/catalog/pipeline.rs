//! Filter and sort pipeline over the country list.
//!
//! [`project`] is pure: it borrows the raw records and returns a freshly
//! ordered view. It is re-run whenever the dataset, the applied search term or
//! the region filter changes.

use super::collate::compare_names;
use crate::domain::CountryRecord;

/// Returns whether `name` contains `needle`, ignoring case.
///
/// `needle` must already be lowercase; an empty needle matches every name.
fn matches_search(name: &str, needle: &str) -> bool {
    needle.is_empty() || name.to_lowercase().contains(needle)
}

/// Returns whether `region` passes the region filter.
///
/// An empty filter means "all regions"; otherwise the match is exact and
/// case-sensitive.
#[must_use]
pub fn matches_region(region: &str, filter: &str) -> bool {
    filter.is_empty() || region == filter
}

/// Filters, then sorts, the raw records.
///
/// 1. keep records whose official name contains `search_term` (case-insensitive)
/// 2. keep records whose region equals `region_filter` (when non-empty)
/// 3. sort ascending by official name with [`compare_names`]
///
/// The sort is stable, so records sharing an official name keep their input
/// order and repeated calls yield identical sequences.
///
/// # Examples
///
/// ```
/// use zatlas::catalog::project;
/// use zatlas::domain::CountryRecord;
///
/// let records = vec![CountryRecord::new("Zed", "Europe"), CountryRecord::new("Alpha", "Asia")];
/// let names: Vec<&str> = project(&records, "", "").iter().map(|c| c.official_name()).collect();
/// assert_eq!(names, vec!["Alpha", "Zed"]);
/// ```
#[must_use]
pub fn project<'a>(
    records: &'a [CountryRecord],
    search_term: &str,
    region_filter: &str,
) -> Vec<&'a CountryRecord> {
    let _span = tracing::debug_span!(
        "project",
        total = records.len(),
        term_len = search_term.len(),
        region = %region_filter
    )
    .entered();

    let needle = search_term.to_lowercase();

    let mut ordered: Vec<&CountryRecord> = records
        .iter()
        .filter(|record| matches_search(record.official_name(), &needle))
        .filter(|record| matches_region(&record.region, region_filter))
        .collect();

    ordered.sort_by(|a, b| compare_names(a.official_name(), b.official_name()));

    tracing::debug!(matched = ordered.len(), "pipeline projected");
    ordered
}

/// Locates the first case-insensitive occurrence of `term` in `text`.
///
/// Returns `(start, end)` as character indices (exclusive end), suitable for
/// match highlighting. Compares character by character so that the indices
/// stay aligned with `text` even when lowercasing changes string length.
#[must_use]
pub fn match_range(text: &str, term: &str) -> Option<(usize, usize)> {
    if term.is_empty() {
        return None;
    }

    let haystack: Vec<char> = text.chars().collect();
    let needle: Vec<char> = term.chars().collect();
    if needle.len() > haystack.len() {
        return None;
    }

    (0..=haystack.len() - needle.len())
        .find(|&start| {
            haystack[start..start + needle.len()]
                .iter()
                .zip(&needle)
                .all(|(h, n)| h.to_lowercase().eq(n.to_lowercase()))
        })
        .map(|start| (start, start + needle.len()))
}
