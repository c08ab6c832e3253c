//! Remote country dataset source.
//!
//! The host performs the actual HTTP request (Zellij's `web_request`); this
//! module owns everything around it:
//!
//! - [`RemoteDataSource`]: the `{data, error, loading}` state machine
//! - [`decode_response`]: turns a status code and body into records or a
//!   [`FetchError`](crate::domain::FetchError)
//! - [`DEFAULT_ENDPOINT`]: the dataset URL with its baked-in field selection
//!
//! # Lifecycle
//!
//! ```text
//! begin() ──► FetchTicket { generation } ──► host request (context carries generation)
//!                                                   │
//! complete(generation, outcome) ◄───────────────────┘
//! ```
//!
//! Only the completion for the most recent ticket is applied, so a slow
//! response to an earlier request can never overwrite a newer one.

pub mod remote;

pub use remote::{
    decode_response, format_age, FetchTicket, RemoteDataSource, DEFAULT_ENDPOINT,
    GENERATION_CONTEXT_KEY,
};
