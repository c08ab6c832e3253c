//! List transformation pipeline over the country dataset.
//!
//! Everything in this module is pure and synchronous: given the raw records,
//! the applied search term and the region filter, it produces the ordered list
//! and the page the UI shows.
//!
//! ```text
//! records ──► name filter ──► region filter ──► locale sort ──► paginate(page, 20)
//!    └──► distinct_regions (filter options)
//! ```
//!
//! # Modules
//!
//! - `pipeline`: filter + sort ([`project`])
//! - `pagination`: fixed-size pages and the clamped page cursor
//! - `regions`: region index and identity-collision detection
//! - [`collate`]: locale-aware name comparison

pub mod collate;
pub mod pagination;
pub mod pipeline;
pub mod regions;

pub use collate::compare_names;
pub use pagination::{page_count, paginate, Pagination, PAGE_SIZE};
pub use pipeline::{match_range, matches_region, project};
pub use regions::{distinct_regions, duplicate_names};
