use thiserror::Error;
use vitals_protocol::ResponseError;
use wasm_bindgen::JsValue;

/// Why an update produced no visible change
#[derive(Debug, Error)]
pub enum UpdateError {
    #[error("request failed: {0}")]
    Transport(String),
    #[error("update service answered HTTP {0}")]
    HttpStatus(u16),
    #[error("could not encode request: {0}")]
    Encode(String),
    #[error("could not decode response: {0}")]
    Decode(String),
    #[error(transparent)]
    Response(#[from] ResponseError),
}

impl From<JsValue> for UpdateError {
    fn from(err: JsValue) -> Self {
        Self::Transport(err.as_string().unwrap_or_else(|| format!("{err:?}")))
    }
}
