//! OMDb API client module.
//!
//! Handles HTTP requests to the OMDb endpoint and retrieves
//! movie metadata by title.

mod api;
mod client;
mod error;
mod types;

#[allow(clippy::module_name_repetitions)]
pub use api::{LocalOmdbApi, OmdbApi};
#[allow(clippy::module_name_repetitions)]
pub use client::{DEFAULT_BASE_URL, OmdbClient, OmdbClientBuilder};
pub use error::{FALLBACK_ERROR_MESSAGE, LookupError, NETWORK_ERROR_MESSAGE};
pub use types::{MediaKind, MovieRecord, NOT_AVAILABLE, PlotLength, TitleQuery};
