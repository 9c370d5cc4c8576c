use serde::{Deserialize, Serialize};
use web_sys::{js_sys, wasm_bindgen};

/// Provider error code for a request the user declined.
pub const USER_REJECTED_REQUEST: i64 = 4001;
/// Provider error code for `wallet_switchEthereumChain` on a chain the wallet doesn't know.
pub const UNRECOGNIZED_CHAIN: i64 = 4902;

#[derive(thiserror::Error, Serialize, Deserialize, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("No browser wallet found. Install MetaMask or another EIP-1193 wallet.")]
    WalletUnavailable,

    #[error("{message}")]
    Rpc { code: i64, message: String },

    #[error("{0}")]
    Js(String),

    #[error("Serialization Error: {0}")]
    Serialization(String),

    #[error("{0}")]
    Generic(String),
}

impl Error {
    pub fn generic(value: impl std::fmt::Display) -> Self {
        Self::Generic(value.to_string())
    }
    pub fn rpc(code: i64, message: impl ToString) -> Self {
        Self::Rpc {
            code,
            message: message.to_string(),
        }
    }

    pub fn code(&self) -> Option<i64> {
        match self {
            Error::Rpc { code, .. } => Some(*code),
            _ => None,
        }
    }

    pub fn is_user_rejected(&self) -> bool {
        self.code() == Some(USER_REJECTED_REQUEST)
    }
}

// Provider errors are plain objects carrying `code` and `message`, not `Error` instances.
impl From<wasm_bindgen::JsValue> for Error {
    fn from(error: wasm_bindgen::JsValue) -> Self {
        let field = |name: &str| js_sys::Reflect::get(&error, &name.into()).ok();

        let message = field("message")
            .and_then(|message| message.as_string())
            .or_else(|| error.as_string())
            .unwrap_or("unknown JS error".to_string());

        match field("code").and_then(|code| code.as_f64()) {
            Some(code) => Error::rpc(code as i64, message),
            None => Error::Js(message),
        }
    }
}

impl From<serde_wasm_bindgen::Error> for Error {
    fn from(error: serde_wasm_bindgen::Error) -> Self {
        let message = error.to_string();
        Error::Serialization(message)
    }
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Error::Serialization(error.to_string())
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
        if error.is_user_rejected() {
            return mini_sdk::Error::UserRejected;
        }
        match error {
            Error::WalletUnavailable => mini_sdk::Error::invalid_input(Error::WalletUnavailable),
            Error::Serialization(message) => mini_sdk::Error::Serde(message),
            error => mini_sdk::Error::network(error),
        }
    }
}
