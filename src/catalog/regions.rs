//! Region index derived from the current dataset.

use crate::domain::CountryRecord;
use std::collections::{BTreeSet, HashSet};

/// Collects the distinct regions present in `records`.
///
/// The returned set is ordered, which doubles as the order the UI cycles
/// through region filters. Records without a region are skipped.
#[must_use]
pub fn distinct_regions(records: &[CountryRecord]) -> BTreeSet<String> {
    records
        .iter()
        .filter(|record| !record.region.is_empty())
        .map(|record| record.region.clone())
        .collect()
}

/// Official names that appear on more than one record.
///
/// The favourites store is keyed by official name, so any name returned here
/// shares a single favourite/note entry across its records.
#[must_use]
pub fn duplicate_names(records: &[CountryRecord]) -> BTreeSet<String> {
    let mut seen = HashSet::with_capacity(records.len());
    records
        .iter()
        .map(CountryRecord::official_name)
        .filter(|name| !seen.insert(*name))
        .map(ToString::to_string)
        .collect()
}
