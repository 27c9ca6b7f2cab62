//! Init/hide lifecycle of the vendor widget, keyed on the session token.
//!
//! ```text
//!   Uninitialized --set_token("abc")--> Active("abc")   init("abc", template)
//!   Active("abc") --set_token("")-----> Uninitialized    hide()
//!   Active("abc") --clear()-----------> Uninitialized    hide()
//!   Active("abc") --set_token("xyz")--> Active("xyz")    hide(), init("xyz", template)
//! ```
//!
//! The vendor API cannot swap tokens in place, so a token change is always a
//! full teardown followed by a fresh init.

use crate::bindings::payline_api;
use crate::error::PaylineError;

/// Layout template used when the host does not pick one.
pub const DEFAULT_TEMPLATE: &str = "column";

/// The two vendor calls the lifecycle drives.
pub trait VendorApi {
    fn init(&self, token: &str, template: &str);
    fn hide(&self);
}

/// Calls `window.Payline?.Api` directly.
///
/// A missing global is not an error: the anchor's `data-auto-init`
/// attribute makes the widget initialize itself once its script runs.
#[derive(Debug, Clone, Copy, Default)]
pub struct WindowVendorApi;

impl VendorApi for WindowVendorApi {
    fn init(&self, token: &str, template: &str) {
        match payline_api() {
            Some(api) => {
                if let Err(err) = api.init(token, template) {
                    log::warn!("Payline.Api.init failed: {}", PaylineError::from(err));
                }
            }
            None => log::debug!("Payline not loaded yet; leaving init to widget auto-init"),
        }
    }

    fn hide(&self) {
        match payline_api() {
            Some(api) => {
                if let Err(err) = api.hide() {
                    log::warn!("Payline.Api.hide failed: {}", PaylineError::from(err));
                }
            }
            None => log::debug!("Payline not loaded; nothing to hide"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LifecycleState {
    #[default]
    Uninitialized,
    Active(String),
}

pub struct WidgetLifecycle<A> {
    api: A,
    state: LifecycleState,
}

impl<A: VendorApi> WidgetLifecycle<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            state: LifecycleState::Uninitialized,
        }
    }

    pub fn state(&self) -> &LifecycleState {
        &self.state
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// Move to the state implied by `token`. An empty token means inactive.
    pub fn set_token(&mut self, token: &str, template: &str) {
        if let LifecycleState::Active(current) = &self.state {
            if current == token {
                return;
            }
        }
        self.clear();
        if !token.is_empty() {
            self.api.init(token, template);
            self.state = LifecycleState::Active(token.to_string());
        }
    }

    /// Hide the widget if it was initialized.
    pub fn clear(&mut self) {
        if let LifecycleState::Active(_) = std::mem::take(&mut self.state) {
            self.api.hide();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[derive(Debug, Clone, PartialEq, Eq)]
    enum Call {
        Init(String, String),
        Hide,
    }

    #[derive(Default)]
    struct Recorder(RefCell<Vec<Call>>);

    impl VendorApi for Recorder {
        fn init(&self, token: &str, template: &str) {
            self.0.borrow_mut().push(Call::Init(token.into(), template.into()));
        }

        fn hide(&self) {
            self.0.borrow_mut().push(Call::Hide);
        }
    }

    fn calls(lifecycle: &WidgetLifecycle<Recorder>) -> Vec<Call> {
        lifecycle.api().0.borrow().clone()
    }

    fn init(token: &str) -> Call {
        Call::Init(token.into(), DEFAULT_TEMPLATE.into())
    }

    #[test]
    fn empty_to_token_inits_once() {
        let mut lifecycle = WidgetLifecycle::new(Recorder::default());
        lifecycle.set_token("", DEFAULT_TEMPLATE);
        assert!(calls(&lifecycle).is_empty());

        lifecycle.set_token("abc", DEFAULT_TEMPLATE);
        lifecycle.set_token("abc", DEFAULT_TEMPLATE);
        assert_eq!(calls(&lifecycle), vec![init("abc")]);
        assert_eq!(lifecycle.state(), &LifecycleState::Active("abc".into()));
    }

    #[test]
    fn token_to_empty_hides_once() {
        let mut lifecycle = WidgetLifecycle::new(Recorder::default());
        lifecycle.set_token("abc", DEFAULT_TEMPLATE);
        lifecycle.set_token("", DEFAULT_TEMPLATE);
        lifecycle.set_token("", DEFAULT_TEMPLATE);
        assert_eq!(calls(&lifecycle), vec![init("abc"), Call::Hide]);
        assert_eq!(lifecycle.state(), &LifecycleState::Uninitialized);
    }

    #[test]
    fn token_change_hides_before_init() {
        let mut lifecycle = WidgetLifecycle::new(Recorder::default());
        lifecycle.set_token("abc", DEFAULT_TEMPLATE);
        lifecycle.set_token("xyz", "tab");
        assert_eq!(
            calls(&lifecycle),
            vec![init("abc"), Call::Hide, Call::Init("xyz".into(), "tab".into())]
        );
    }

    #[test]
    fn clear_is_paired_with_init() {
        let mut lifecycle = WidgetLifecycle::new(Recorder::default());
        lifecycle.clear();
        assert!(calls(&lifecycle).is_empty());

        lifecycle.set_token("abc", DEFAULT_TEMPLATE);
        lifecycle.clear();
        lifecycle.clear();
        assert_eq!(calls(&lifecycle), vec![init("abc"), Call::Hide]);
    }

    #[test]
    fn cycles_indefinitely() {
        let mut lifecycle = WidgetLifecycle::new(Recorder::default());
        for _ in 0..3 {
            lifecycle.set_token("abc", DEFAULT_TEMPLATE);
            lifecycle.clear();
        }
        let calls = calls(&lifecycle);
        assert_eq!(calls.len(), 6);
        assert!(calls.chunks(2).all(|pair| pair == [init("abc"), Call::Hide]));
    }
}
