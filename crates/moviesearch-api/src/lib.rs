//! API client library for moviesearch.
//!
//! Provides a client for the OMDb (Open Movie Database) API.

/// OMDb API client.
pub mod omdb;
