//! Low-level wasm-bindgen bindings to the Payline widget global.
//!
//! Once `widget-min.js` has run, the page has a `window.Payline` object whose
//! `Api` member drives the widget. Both may be missing when we look, so the
//! accessors here return `Option` instead of assuming the script is loaded.

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::js_sys::Reflect;

/// Name of the global object the vendor script defines.
pub const PAYLINE_GLOBAL: &str = "Payline";

#[wasm_bindgen]
extern "C" {
    /// Raw `window.Payline` handle.
    #[derive(Debug, Clone)]
    pub type JsPayline;

    /// Raw `window.Payline.Api` handle.
    #[derive(Debug, Clone)]
    pub type JsPaylineApi;

    /// `Payline.Api`
    #[wasm_bindgen(method, getter, js_name = Api)]
    pub fn api(this: &JsPayline) -> Option<JsPaylineApi>;

    /// `Payline.Api.init(token, template)`
    #[wasm_bindgen(method, catch, js_name = init)]
    pub fn init(this: &JsPaylineApi, token: &str, template: &str) -> Result<(), JsValue>;

    /// `Payline.Api.hide()`
    #[wasm_bindgen(method, catch, js_name = hide)]
    pub fn hide(this: &JsPaylineApi) -> Result<(), JsValue>;
}

/// `window.Payline`, if the vendor script has defined it.
pub fn payline() -> Option<JsPayline> {
    let window = web_sys::window()?;
    let value = Reflect::get(&window, &JsValue::from_str(PAYLINE_GLOBAL)).ok()?;
    if value.is_undefined() || value.is_null() {
        None
    } else {
        Some(value.unchecked_into())
    }
}

/// `window.Payline?.Api`
pub fn payline_api() -> Option<JsPaylineApi> {
    payline()?.api()
}
