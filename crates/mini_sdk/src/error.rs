// The Serialize and Deserialize traits are derived so that Errors can be stored inside
// Resources and Actions, which require cloneable, comparable values.
#[derive(thiserror::Error, serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Price is unavailable right now")]
    PriceUnavailable,

    #[error("Transaction cancelled in wallet")]
    UserRejected,

    #[error("Transaction failed: {0}")]
    NetworkOrRevert(String),

    #[error("No swap route found for this amount")]
    QuoteRouteNotFound,

    #[error("Serde Error: {0}")]
    Serde(String),

    #[error("{0}")]
    Generic(String),
}

impl Error {
    pub fn generic(message: impl ToString) -> Self {
        Error::Generic(message.to_string())
    }
    pub fn invalid_input(message: impl ToString) -> Self {
        Error::InvalidInput(message.to_string())
    }
    pub fn network(message: impl ToString) -> Self {
        Error::NetworkOrRevert(message.to_string())
    }
    pub fn serde(message: impl ToString) -> Self {
        Error::Serde(message.to_string())
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

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Error::Serde(error.to_string())
    }
}

impl From<alloy_sol_types::Error> for Error {
    fn from(error: alloy_sol_types::Error) -> Self {
        Error::Serde(error.to_string())
    }
}
