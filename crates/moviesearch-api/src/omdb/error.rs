//! Lookup error taxonomy.

/// Message shown for transport failures and non-success HTTP statuses.
pub const NETWORK_ERROR_MESSAGE: &str = "Network response error";

/// Message shown when nothing more specific is available.
pub const FALLBACK_ERROR_MESSAGE: &str = "An error occurred. Please try again later.";

/// Failure of a single title lookup.
#[derive(Debug)]
pub enum LookupError {
    /// The request could not be sent or the body could not be read.
    Transport(reqwest::Error),
    /// The service answered with a non-success HTTP status.
    Status(u16),
    /// The service answered `"Response":"False"` with its own message.
    NotFound(String),
    /// The body was not a valid OMDb reply.
    Decode(serde_json::Error),
}

impl LookupError {
    /// Returns the message to show the user for this failure.
    ///
    /// Uses the service-provided message when there is one, otherwise a
    /// generic message for the failure class.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Transport(_) | Self::Status(_) => String::from(NETWORK_ERROR_MESSAGE),
            Self::NotFound(message) if !message.trim().is_empty() => message.clone(),
            Self::NotFound(_) | Self::Decode(_) => String::from(FALLBACK_ERROR_MESSAGE),
        }
    }
}

impl std::fmt::Display for LookupError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Transport(err) => write!(f, "OMDb request failed: {err}"),
            Self::Status(status) => write!(f, "OMDb API error (HTTP {status})"),
            Self::NotFound(message) => write!(f, "OMDb lookup failed: {message}"),
            Self::Decode(err) => write!(f, "failed to decode OMDb response: {err}"),
        }
    }
}

impl std::error::Error for LookupError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Transport(err) => Some(err),
            Self::Decode(err) => Some(err),
            Self::Status(_) | Self::NotFound(_) => None,
        }
    }
}

impl From<reqwest::Error> for LookupError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(err)
    }
}

impl From<serde_json::Error> for LookupError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn test_status_uses_network_message() {
        // Arrange
        let err = LookupError::Status(503);

        // Act & Assert
        assert_eq!(err.user_message(), "Network response error");
    }

    #[test]
    fn test_not_found_uses_service_message() {
        // Arrange
        let err = LookupError::NotFound(String::from("Movie not found!"));

        // Act & Assert
        assert_eq!(err.user_message(), "Movie not found!");
    }

    #[test]
    fn test_not_found_blank_message_falls_back() {
        // Arrange
        let err = LookupError::NotFound(String::new());

        // Act & Assert
        assert_eq!(
            err.user_message(),
            "An error occurred. Please try again later."
        );
    }

    #[test]
    fn test_decode_uses_fallback_message() {
        // Arrange
        let err: LookupError = serde_json::from_str::<serde_json::Value>("{not json")
            .unwrap_err()
            .into();

        // Act & Assert
        assert_eq!(err.user_message(), FALLBACK_ERROR_MESSAGE);
        assert!(err.to_string().contains("failed to decode"));
    }
}
