//! Render selection: what the form shows for a given state.

use moviesearch_api::omdb::MovieRecord;

use super::state::{InputMode, SearchPhase, SearchState};

/// Image source used when the service has no poster.
pub const POSTER_PLACEHOLDER: &str = "placeholder://no-poster";

/// Plot text used when the service has no plot.
pub const PLOT_PLACEHOLDER: &str = "No plot available.";

/// Button label while idle.
pub const SEARCH_LABEL: &str = "Search";

/// Button label while a lookup is in flight.
pub const SEARCHING_LABEL: &str = "Searching...";

/// Poster to display for a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Poster<'a> {
    /// Remote image URL.
    Url(&'a str),
    /// Placeholder graphic.
    Placeholder,
}

impl Poster<'_> {
    /// Image source for this poster.
    #[must_use]
    pub const fn src(&self) -> &str {
        match self {
            Self::Url(url) => *url,
            Self::Placeholder => POSTER_PLACEHOLDER,
        }
    }
}

/// Result panel contents.
#[derive(Debug, Clone, PartialEq, Eq)]
#[allow(clippy::module_name_repetitions)]
pub struct MovieView<'a> {
    /// Title.
    pub title: &'a str,
    /// Year.
    pub year: &'a str,
    /// Rating.
    pub rating: &'a str,
    /// Poster image.
    pub poster: Poster<'a>,
    /// Plot, or the placeholder sentence.
    pub plot: &'a str,
    /// Genre.
    pub genre: &'a str,
    /// Director.
    pub director: &'a str,
    /// Actors.
    pub actors: &'a str,
    /// Runtime.
    pub runtime: &'a str,
    /// Release date.
    pub released: &'a str,
}

impl<'a> MovieView<'a> {
    /// Builds the result panel for a record, applying poster and plot fallbacks.
    #[must_use]
    pub fn from_record(record: &'a MovieRecord) -> Self {
        Self {
            title: &record.title,
            year: &record.year,
            rating: &record.imdb_rating,
            poster: record.poster_url().map_or(Poster::Placeholder, Poster::Url),
            plot: record.plot_text().unwrap_or(PLOT_PLACEHOLDER),
            genre: &record.genre,
            director: &record.director,
            actors: &record.actors,
            runtime: &record.runtime,
            released: &record.released,
        }
    }
}

/// Everything the form renders, derived from `SearchState` alone.
#[derive(Debug, Clone, PartialEq, Eq)]
#[allow(clippy::module_name_repetitions)]
pub struct SearchView<'a> {
    /// Input box contents.
    pub query: &'a str,
    /// Whether the input box has focus.
    pub editing: bool,
    /// Trigger button label.
    pub button_label: &'static str,
    /// Whether the trigger button accepts presses.
    pub button_enabled: bool,
    /// Error text, when the last search failed.
    pub error: Option<&'a str>,
    /// Result panel, when the last search succeeded.
    pub movie: Option<MovieView<'a>>,
}

impl<'a> SearchView<'a> {
    /// Selects what to render for `state`.
    #[must_use]
    pub fn from_state(state: &'a SearchState) -> Self {
        let loading = state.is_loading();
        let (error, movie) = match state.phase() {
            SearchPhase::Failure(message) => (Some(message.as_str()), None),
            SearchPhase::Success(record) => (None, Some(MovieView::from_record(record))),
            SearchPhase::Idle | SearchPhase::Loading => (None, None),
        };
        Self {
            query: &state.query,
            editing: state.input_mode == InputMode::Editing,
            button_label: if loading { SEARCHING_LABEL } else { SEARCH_LABEL },
            button_enabled: !loading,
            error,
            movie,
        }
    }
}
