//! `OmdbApi` trait definition.
#![allow(clippy::future_not_send)]

use super::error::LookupError;
use super::types::{MovieRecord, TitleQuery};

/// OMDb API trait.
///
/// Abstracts API operations for mock substitution in tests.
/// Uses `trait_variant::make` to generate a `Send`-bound async trait.
#[allow(clippy::module_name_repetitions)]
#[trait_variant::make(OmdbApi: Send)]
pub trait LocalOmdbApi {
    /// Looks up a single title. Performs exactly one request.
    ///
    /// # Errors
    ///
    /// Returns a [`LookupError`] if the request fails, the service answers
    /// with a non-success status, reports no match, or sends a malformed body.
    async fn lookup_title(&self, query: &TitleQuery) -> Result<MovieRecord, LookupError>;
}
