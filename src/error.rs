//! Error type shared by the DOM and global-scope plumbing.
//!
//! None of these errors reach the host application: the bridge logs them
//! and carries on, leaving recovery to the vendor widget's own auto-init.

use wasm_bindgen::JsValue;

/// Anything that can go wrong while touching the browser environment.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PaylineError {
    /// `window` is not available (non-browser host, worker, SSR).
    #[error("no global `window` object")]
    NoWindow,
    /// `window.document` is not available.
    #[error("window has no document")]
    NoDocument,
    /// The document has no `<head>` to append assets into.
    #[error("document has no <head> element")]
    NoHead,
    /// A JS call threw or returned an unexpected value.
    #[error("javascript error: {0}")]
    Js(String),
    /// A vendor payload did not match the documented shape.
    #[error("could not decode vendor payload: {0}")]
    Decode(String),
}

impl From<JsValue> for PaylineError {
    fn from(value: JsValue) -> Self {
        PaylineError::Js(value.as_string().unwrap_or_else(|| format!("{:?}", value)))
    }
}

impl From<serde_wasm_bindgen::Error> for PaylineError {
    fn from(err: serde_wasm_bindgen::Error) -> Self {
        PaylineError::Decode(err.to_string())
    }
}

pub type Result<T, E = PaylineError> = std::result::Result<T, E>;
