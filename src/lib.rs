//! Yew bridge to the Payline payment widget.
//!
//! - [`PaylineProvider`] injects the widget script and stylesheet once per URL.
//! - [`PaylineWidget`] renders the anchor the script mounts into, forwards the
//!   widget's global callbacks to Yew handler props, drives
//!   `Payline.Api.init`/`hide` from the session token and offers RIBPay as an
//!   extra payment method.

mod adapter;
mod assets;
mod bindings;
mod components;
mod error;
mod events;
mod interop;
mod lifecycle;
mod payment_method;
mod registry;

pub use adapter::*;
pub use assets::*;
pub use bindings::*;
pub use components::*;
pub use error::PaylineError;
pub use events::*;
pub use interop::*;
pub use lifecycle::*;
pub use payment_method::*;
pub use registry::*;
