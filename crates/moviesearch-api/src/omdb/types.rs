//! OMDb API response types and lookup parameters.

use serde::{Deserialize, Serialize};

/// Literal the service uses for a missing value (poster, plot).
pub const NOT_AVAILABLE: &str = "N/A";

// --- Title lookup ---

/// A successful title lookup (`?t=` endpoint).
///
/// Every field is an opaque display string as returned by the service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieRecord {
    /// Title.
    #[serde(rename = "Title", default)]
    pub title: String,
    /// Release year (e.g. "2010", or "2008–2013" for series).
    #[serde(rename = "Year", default)]
    pub year: String,
    /// Plot summary (absent for some titles).
    #[serde(rename = "Plot", default, skip_serializing_if = "Option::is_none")]
    pub plot: Option<String>,
    /// Poster URL, or "N/A".
    #[serde(rename = "Poster", default)]
    pub poster: String,
    /// IMDb rating (e.g. "8.8").
    #[serde(rename = "imdbRating", default)]
    pub imdb_rating: String,
    /// Comma-separated genres.
    #[serde(rename = "Genre", default)]
    pub genre: String,
    /// Director(s).
    #[serde(rename = "Director", default)]
    pub director: String,
    /// Comma-separated lead actors.
    #[serde(rename = "Actors", default)]
    pub actors: String,
    /// Runtime (e.g. "148 min").
    #[serde(rename = "Runtime", default)]
    pub runtime: String,
    /// Release date (e.g. "16 Jul 2010").
    #[serde(rename = "Released", default)]
    pub released: String,
    /// IMDb ID (e.g. "tt1375666").
    #[serde(rename = "imdbID", default, skip_serializing_if = "Option::is_none")]
    pub imdb_id: Option<String>,
}

impl MovieRecord {
    /// Returns the poster URL, or `None` when the service has no poster.
    #[must_use]
    pub fn poster_url(&self) -> Option<&str> {
        let poster = self.poster.trim();
        if poster.is_empty() || poster == NOT_AVAILABLE {
            None
        } else {
            Some(poster)
        }
    }

    /// Returns the plot text, or `None` when it is absent, blank or "N/A".
    #[must_use]
    pub fn plot_text(&self) -> Option<&str> {
        self.plot
            .as_deref()
            .map(str::trim)
            .filter(|plot| !plot.is_empty() && *plot != NOT_AVAILABLE)
    }

    /// Returns the IMDb page URL when the record carries an IMDb ID.
    #[must_use]
    pub fn imdb_url(&self) -> Option<String> {
        self.imdb_id
            .as_deref()
            .filter(|id| !id.is_empty())
            .map(|id| format!("https://www.imdb.com/title/{id}/"))
    }
}

/// Response status envelope shared by every OMDb reply.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct OmdbStatus {
    /// "True" or "False".
    #[serde(rename = "Response", default)]
    pub response: Option<String>,
    /// Human-readable error (only when `Response` is "False").
    #[serde(rename = "Error", default)]
    pub error: Option<String>,
}

impl OmdbStatus {
    /// Reads the `Response` flag: `Some(true)` for "True", `Some(false)` for
    /// "False", `None` when it is missing or anything else.
    pub(crate) fn succeeded(&self) -> Option<bool> {
        match self.response.as_deref()? {
            r if r.eq_ignore_ascii_case("true") => Some(true),
            r if r.eq_ignore_ascii_case("false") => Some(false),
            _ => None,
        }
    }
}

// --- Lookup Parameters ---

/// Plot length requested from the service.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PlotLength {
    /// Short plot (service default).
    #[default]
    Short,
    /// Full plot.
    Full,
}

/// Result type filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    /// Movies.
    Movie,
    /// TV series.
    Series,
    /// Single episodes.
    Episode,
}

impl MediaKind {
    /// Wire value for the `type` parameter.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Movie => "movie",
            Self::Series => "series",
            Self::Episode => "episode",
        }
    }
}

/// Parameters for a title lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TitleQuery {
    /// Title to look up (sent verbatim as `t`).
    pub title: String,
    /// Filter by release year.
    pub year: Option<u32>,
    /// Filter by result type.
    pub kind: Option<MediaKind>,
    /// Plot length.
    pub plot: PlotLength,
}

impl TitleQuery {
    /// Creates lookup params for the given title.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            year: None,
            kind: None,
            plot: PlotLength::Short,
        }
    }

    /// Sets the year filter.
    #[must_use]
    pub const fn year(mut self, year: u32) -> Self {
        self.year = Some(year);
        self
    }

    /// Sets the result type filter.
    #[must_use]
    pub const fn kind(mut self, kind: MediaKind) -> Self {
        self.kind = Some(kind);
        self
    }

    /// Sets the plot length.
    #[must_use]
    pub const fn plot(mut self, plot: PlotLength) -> Self {
        self.plot = plot;
        self
    }

    /// Builds the query pairs (without the API key).
    pub(crate) fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut query: Vec<(&'static str, String)> = vec![("t", self.title.clone())];
        if let Some(year) = self.year {
            query.push(("y", year.to_string()));
        }
        if let Some(kind) = self.kind {
            query.push(("type", String::from(kind.as_str())));
        }
        if self.plot == PlotLength::Full {
            query.push(("plot", String::from("full")));
        }
        query
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn test_parse_movie_fixture() {
        // Arrange
        let json = include_str!("../../../../fixtures/omdb/inception.json");

        // Act
        let record: MovieRecord = serde_json::from_str(json).unwrap();

        // Assert
        assert_eq!(record.title, "Inception");
        assert_eq!(record.year, "2010");
        assert_eq!(record.imdb_rating, "8.8");
        assert_eq!(record.director, "Christopher Nolan");
        assert_eq!(record.runtime, "148 min");
        assert_eq!(record.imdb_id.as_deref(), Some("tt1375666"));
    }

    #[test]
    fn test_missing_fields_default_to_empty() {
        // Arrange
        let json = r#"{"Title":"Obscure","Response":"True"}"#;

        // Act
        let record: MovieRecord = serde_json::from_str(json).unwrap();

        // Assert
        assert_eq!(record.title, "Obscure");
        assert!(record.genre.is_empty());
        assert!(record.plot.is_none());
        assert!(record.poster_url().is_none());
    }

    #[test]
    fn test_poster_url_not_available() {
        // Arrange
        let record = MovieRecord {
            poster: String::from("N/A"),
            ..MovieRecord::default()
        };

        // Act & Assert
        assert!(record.poster_url().is_none());
    }

    #[test]
    fn test_plot_text_blank_is_none() {
        // Arrange
        let record = MovieRecord {
            plot: Some(String::from("   ")),
            ..MovieRecord::default()
        };

        // Act & Assert
        assert!(record.plot_text().is_none());
    }

    #[test]
    fn test_imdb_url() {
        // Arrange
        let record = MovieRecord {
            imdb_id: Some(String::from("tt0133093")),
            ..MovieRecord::default()
        };

        // Act & Assert
        assert_eq!(
            record.imdb_url().as_deref(),
            Some("https://www.imdb.com/title/tt0133093/")
        );
    }

    #[test]
    fn test_status_failure_detection() {
        // Arrange
        let json = r#"{"Response":"False","Error":"Movie not found!"}"#;

        // Act
        let status: OmdbStatus = serde_json::from_str(json).unwrap();

        // Assert
        assert_eq!(status.succeeded(), Some(false));
        assert_eq!(status.error.as_deref(), Some("Movie not found!"));
    }

    #[test]
    fn test_status_flag_variants() {
        // Arrange
        let parse = |json: &str| serde_json::from_str::<OmdbStatus>(json).unwrap().succeeded();

        // Act & Assert
        assert_eq!(parse(r#"{"Response":"True"}"#), Some(true));
        assert_eq!(parse(r#"{"Response":"false"}"#), Some(false));
        assert_eq!(parse(r#"{"Response":"maybe"}"#), None);
        assert_eq!(parse("{}"), None);
    }

    #[test]
    fn test_query_pairs_minimal() {
        // Arrange
        let query = TitleQuery::new("Inception");

        // Act
        let pairs = query.to_query_pairs();

        // Assert
        assert_eq!(pairs, vec![("t", String::from("Inception"))]);
    }

    #[test]
    fn test_query_pairs_with_filters() {
        // Arrange
        let query = TitleQuery::new("Dune")
            .year(1984)
            .kind(MediaKind::Movie)
            .plot(PlotLength::Full);

        // Act
        let pairs = query.to_query_pairs();

        // Assert
        assert_eq!(
            pairs,
            vec![
                ("t", String::from("Dune")),
                ("y", String::from("1984")),
                ("type", String::from("movie")),
                ("plot", String::from("full")),
            ]
        );
    }
}
