//! Search form state management.
//!
//! The form is a small state machine: `Idle -> Loading -> Success | Failure`.
//! A result and an error message can never coexist because both live inside
//! the single [`SearchPhase`] value.

use moviesearch_api::omdb::{
    LocalOmdbApi, LookupError, MediaKind, MovieRecord, PlotLength, TitleQuery,
};

/// Message shown when a search is triggered with a blank query.
pub const EMPTY_QUERY_MESSAGE: &str = "Please enter a movie title to search.";

/// Phase of the search state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
#[allow(clippy::large_enum_variant)]
pub enum SearchPhase {
    /// Nothing searched yet.
    Idle,
    /// A lookup is in flight.
    Loading,
    /// The last lookup succeeded.
    Success(MovieRecord),
    /// The last search failed (validation or lookup).
    Failure(String),
}

/// Input mode for the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Keystrokes edit the query text.
    Editing,
    /// Keystrokes are commands (quit, open links).
    Normal,
}

/// State for the search form TUI.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct SearchState {
    /// Current query text, kept verbatim.
    pub query: String,
    /// Current input mode.
    pub input_mode: InputMode,
    /// Plot length requested on dispatch.
    plot: PlotLength,
    /// Year filter applied on dispatch.
    year: Option<u32>,
    /// Result type filter applied on dispatch.
    kind: Option<MediaKind>,
    /// State machine phase.
    phase: SearchPhase,
}

impl Default for SearchState {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchState {
    /// Creates an empty, idle form.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            query: String::new(),
            input_mode: InputMode::Editing,
            plot: PlotLength::Short,
            year: None,
            kind: None,
            phase: SearchPhase::Idle,
        }
    }

    /// Sets the plot length used for every lookup.
    #[must_use]
    pub const fn with_plot(mut self, plot: PlotLength) -> Self {
        self.plot = plot;
        self
    }

    /// Restricts every lookup to a release year.
    #[must_use]
    pub const fn with_year(mut self, year: Option<u32>) -> Self {
        self.year = year;
        self
    }

    /// Restricts every lookup to a result type.
    #[must_use]
    pub const fn with_kind(mut self, kind: Option<MediaKind>) -> Self {
        self.kind = kind;
        self
    }

    /// Returns the current phase.
    #[must_use]
    pub const fn phase(&self) -> &SearchPhase {
        &self.phase
    }

    /// Whether a lookup is in flight.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self.phase, SearchPhase::Loading)
    }

    /// The last successful result, if any.
    #[must_use]
    pub const fn result(&self) -> Option<&MovieRecord> {
        match &self.phase {
            SearchPhase::Success(record) => Some(record),
            _ => None,
        }
    }

    /// The current error message, if any.
    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        match &self.phase {
            SearchPhase::Failure(message) => Some(message),
            _ => None,
        }
    }

    /// Replaces the query text.
    pub fn set_query(&mut self, text: impl Into<String>) {
        self.query = text.into();
    }

    /// Appends a character to the query.
    pub fn query_push(&mut self, c: char) {
        self.query.push(c);
    }

    /// Removes the last character from the query.
    pub fn query_pop(&mut self) {
        self.query.pop();
    }

    /// Starts a search.
    ///
    /// Returns the lookup to perform, or `None` when no request must be sent:
    /// the query is blank (the phase becomes a validation failure) or a
    /// lookup is already in flight (the trigger is ignored).
    pub fn dispatch(&mut self) -> Option<TitleQuery> {
        if self.is_loading() {
            tracing::debug!("search already in flight, ignoring trigger");
            return None;
        }
        if self.query.trim().is_empty() {
            self.phase = SearchPhase::Failure(String::from(EMPTY_QUERY_MESSAGE));
            return None;
        }
        self.phase = SearchPhase::Loading;
        let mut query = TitleQuery::new(self.query.clone()).plot(self.plot);
        if let Some(year) = self.year {
            query = query.year(year);
        }
        if let Some(kind) = self.kind {
            query = query.kind(kind);
        }
        Some(query)
    }

    /// Resolves the in-flight lookup.
    ///
    /// Returns `false` and leaves the state untouched when no lookup is in
    /// flight.
    pub fn complete(&mut self, outcome: Result<MovieRecord, LookupError>) -> bool {
        if !self.is_loading() {
            tracing::debug!("lookup completed while not loading, ignoring");
            return false;
        }
        self.phase = match outcome {
            Ok(record) => {
                tracing::debug!(title = %record.title, "lookup succeeded");
                SearchPhase::Success(record)
            }
            Err(err) => {
                tracing::debug!(error = %err, "lookup failed");
                SearchPhase::Failure(err.user_message())
            }
        };
        true
    }
}

/// Runs one full search against `api`: dispatch, a single lookup, completion.
///
/// Never fails; every error ends up in the state's error message.
pub async fn run_search<A: LocalOmdbApi>(api: &A, state: &mut SearchState) {
    let Some(query) = state.dispatch() else {
        return;
    };
    let outcome = api.lookup_title(&query).await;
    state.complete(outcome);
}
