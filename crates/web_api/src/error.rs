#[derive(thiserror::Error, serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Request failed: {0}")]
    Http(String),

    #[error("Server responded with status {0}")]
    Status(u16),

    #[error("Serde Error: {0}")]
    Serde(String),

    #[error("No trading pairs listed for this token")]
    NoPairs,

    #[error("Aggregator API key is not configured")]
    MissingApiKey,

    #[error("No swap route found for this amount")]
    RouteNotFound,

    #[error("{0}")]
    Generic(String),
}

impl Error {
    pub fn generic(message: impl ToString) -> Self {
        Error::Generic(message.to_string())
    }
}

impl From<reqwest::Error> for Error {
    fn from(error: reqwest::Error) -> Self {
        match error.status() {
            Some(status) => Error::Status(status.as_u16()),
            None if error.is_decode() => Error::Serde(error.to_string()),
            None => Error::Http(error.to_string()),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Error::Serde(error.to_string())
    }
}

impl From<&str> for Error {
    fn from(value: &str) -> Self {
        Self::Generic(value.to_string())
    }
}

impl From<String> for Error {
    fn from(value: String) -> Self {
        Self::Generic(value)
    }
}

impl From<Error> for mini_sdk::Error {
    fn from(error: Error) -> Self {
        match error {
            Error::NoPairs => mini_sdk::Error::PriceUnavailable,
            Error::RouteNotFound => mini_sdk::Error::QuoteRouteNotFound,
            Error::MissingApiKey => mini_sdk::Error::invalid_input(Error::MissingApiKey),
            Error::Serde(message) => mini_sdk::Error::Serde(message),
            error => mini_sdk::Error::network(error),
        }
    }
}
