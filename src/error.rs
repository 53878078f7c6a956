//! Error type for card setup and the browser shell.
//!
//! A rejected password is not an error: it is gate state (see `gate.rs`).

use thiserror::Error;
use wasm_bindgen::JsValue;

#[derive(Error, Debug)]
pub enum CardError {
    #[error("no window")]
    NoWindow,

    #[error("no document")]
    NoDocument,

    #[error("document has no body")]
    NoBody,

    /// An element the shell created at mount time has disappeared.
    #[error("missing element: #{0}")]
    MissingElement(String),

    #[error("canvas has no 2d context")]
    NoCanvasContext,

    /// A web-sys call threw.
    #[error("js error: {0}")]
    Js(String),

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[cfg(feature = "serde_json")]
    #[error("config parse error: {0}")]
    ConfigParse(#[from] serde_json::Error),

    #[error("card already running")]
    AlreadyRunning,
}

impl From<JsValue> for CardError {
    fn from(value: JsValue) -> Self {
        CardError::Js(value.as_string().unwrap_or_else(|| format!("{value:?}")))
    }
}

impl From<CardError> for JsValue {
    fn from(err: CardError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

pub type Result<T, E = CardError> = std::result::Result<T, E>;
