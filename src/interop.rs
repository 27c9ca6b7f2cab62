//! interop.rs
//!
//! Custom Yew hook to load the Payline widget at runtime (no inline JS).
//!
//! # Overview
//! `use_payline_assets(environment)` makes sure
//! `<script src=".../scripts/widget-min.js">` and
//! `<link rel="stylesheet" href=".../styles/widget-min.css">` are in
//! `<head>` exactly once, returns `false` until the script's `load` event
//! fires, then `true` from then on.
//!
//! # Usage
//! ```rust,ignore
//! use yew::prelude::*;
//! use yew_payline::{use_payline_assets, WidgetEnvironment};
//!
//! #[function_component(App)]
//! fn app() -> Html {
//!     let ready = use_payline_assets(WidgetEnvironment::Sandbox);
//!     html! { <p>{ if ready { "Payline loaded" } else { "Loading Payline..." } }</p> }
//! }
//! ```

use yew::functional::hook;
use yew::prelude::*;
use wasm_bindgen::{prelude::Closure, JsCast};
use web_sys::EventTarget;

use crate::assets::{inject_assets, WidgetEnvironment};
use crate::bindings::payline;
use crate::error::Result;

/// A `load` listener that detaches itself when dropped.
pub struct ScriptLoadListener {
    target: EventTarget,
    closure: Closure<dyn Fn()>,
}

impl ScriptLoadListener {
    pub fn attach(target: &EventTarget, on_load: impl Fn() + 'static) -> Result<Self> {
        let closure = Closure::wrap(Box::new(on_load) as Box<dyn Fn()>);
        target.add_event_listener_with_callback("load", closure.as_ref().unchecked_ref())?;
        Ok(Self {
            target: target.clone(),
            closure,
        })
    }
}

impl Drop for ScriptLoadListener {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback("load", self.closure.as_ref().unchecked_ref());
    }
}

/// Custom hook: inject the widget assets once and track script readiness.
///
/// # Returns
/// - `true` if `window.Payline` already existed on first render, or once
///   the script has loaded.
/// - `false` otherwise. A script that fails to load keeps it `false`.
#[hook]
pub fn use_payline_assets(environment: WidgetEnvironment) -> bool {
    let loaded = use_state(|| payline().is_some());

    {
        let setter = loaded.setter();
        use_effect_with(environment, move |environment| {
            let listener = inject_assets(*environment).and_then(|script| {
                ScriptLoadListener::attach(&script, move || setter.set(true))
            });
            let listener = match listener {
                Ok(listener) => Some(listener),
                Err(err) => {
                    log::warn!("could not inject Payline assets: {}", err);
                    None
                }
            };
            // The elements stay in the document; only the listener goes.
            move || drop(listener)
        });
    }

    *loaded
}
