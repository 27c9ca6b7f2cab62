//! The window as a name → function registry.
//!
//! The vendor widget can only reach into the page through window-scoped
//! functions. [`GlobalRegistry`] wraps that shared namespace behind explicit
//! `define`/`delete` operations so the adapter and factory logic can run
//! against [`InMemoryRegistry`] in tests and [`WindowRegistry`] in the
//! browser.
//!
//! Ownership rule: one mounted widget owns its slots. A second widget
//! mounted at the same time would overwrite them (unsupported).

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use gloo_utils::format::JsValueSerdeExt;
use serde::de::DeserializeOwned;
use wasm_bindgen::{prelude::Closure, JsValue};
use web_sys::js_sys::{Array, Reflect};

use crate::error::{PaylineError, Result};
use crate::events::{EventKind, WidgetEvent};
use crate::payment_method::PaymentMethodDescriptor;

/// Long-lived function answering one kind of vendor callback.
pub type EventAdapter = Rc<dyn Fn(WidgetEvent) -> Option<bool>>;

/// Lazily invoked producer of extra payment methods.
pub type PaymentMethodFactory = Rc<dyn Fn() -> Vec<PaymentMethodDescriptor>>;

#[derive(Clone)]
pub enum GlobalFunction {
    Event { kind: EventKind, adapter: EventAdapter },
    PaymentMethods(PaymentMethodFactory),
}

pub trait GlobalRegistry {
    /// Bind `function` under `name`, replacing whatever was there.
    fn define(&self, name: &str, function: GlobalFunction) -> Result<()>;

    /// Remove `name`. Removing an unknown name is a no-op.
    fn delete(&self, name: &str);

    fn is_defined(&self, name: &str) -> bool;
}

//------------------------------------------------------------------------------
// In-memory registry
//------------------------------------------------------------------------------

/// Registry backed by a plain map. Clones share the same slots.
#[derive(Clone, Default)]
pub struct InMemoryRegistry {
    slots: Rc<RefCell<HashMap<String, GlobalFunction>>>,
}

impl InMemoryRegistry {
    /// Sorted names of all defined slots.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.slots.borrow().keys().cloned().collect();
        names.sort();
        names
    }

    /// Call the event adapter under `name` the way the widget would.
    /// Returns `None` when nothing (or a factory) is bound there.
    pub fn invoke_event(&self, name: &str, event: WidgetEvent) -> Option<Option<bool>> {
        let adapter = match self.slots.borrow().get(name) {
            Some(GlobalFunction::Event { adapter, .. }) => adapter.clone(),
            _ => return None,
        };
        Some(adapter(event))
    }

    pub fn invoke_factory(&self, name: &str) -> Option<Vec<PaymentMethodDescriptor>> {
        let factory = match self.slots.borrow().get(name) {
            Some(GlobalFunction::PaymentMethods(factory)) => factory.clone(),
            _ => return None,
        };
        Some(factory())
    }
}

impl GlobalRegistry for InMemoryRegistry {
    fn define(&self, name: &str, function: GlobalFunction) -> Result<()> {
        self.slots.borrow_mut().insert(name.to_string(), function);
        Ok(())
    }

    fn delete(&self, name: &str) {
        self.slots.borrow_mut().remove(name);
    }

    fn is_defined(&self, name: &str) -> bool {
        self.slots.borrow().contains_key(name)
    }
}

//------------------------------------------------------------------------------
// Window registry
//------------------------------------------------------------------------------

enum JsSlot {
    Event(Closure<dyn Fn(JsValue) -> JsValue>),
    Factory(Closure<dyn Fn() -> JsValue>),
}

impl JsSlot {
    fn as_js(&self) -> &JsValue {
        match self {
            JsSlot::Event(closure) => closure.as_ref(),
            JsSlot::Factory(closure) => closure.as_ref(),
        }
    }
}

/// Registry writing straight onto `window`. Owns the JS closures it
/// installs until they are deleted or the registry is dropped.
#[derive(Default)]
pub struct WindowRegistry {
    slots: RefCell<HashMap<String, JsSlot>>,
}

impl GlobalRegistry for WindowRegistry {
    fn define(&self, name: &str, function: GlobalFunction) -> Result<()> {
        let window = web_sys::window().ok_or(PaylineError::NoWindow)?;
        let slot = match function {
            GlobalFunction::Event { kind, adapter } => {
                let closure = Closure::wrap(Box::new(move |arg: JsValue| {
                    encode_outcome(adapter(decode_event(kind, arg)))
                }) as Box<dyn Fn(JsValue) -> JsValue>);
                JsSlot::Event(closure)
            }
            GlobalFunction::PaymentMethods(factory) => {
                let closure = Closure::wrap(Box::new(move || {
                    JsValue::from_serde(&factory()).unwrap_or_else(|err| {
                        log::warn!("could not encode payment methods: {}", err);
                        Array::new().into()
                    })
                }) as Box<dyn Fn() -> JsValue>);
                JsSlot::Factory(closure)
            }
        };

        Reflect::set(&window, &JsValue::from_str(name), slot.as_js())?;
        // Replacing the map entry drops the previous closure only after the
        // window no longer points at it.
        self.slots.borrow_mut().insert(name.to_string(), slot);
        Ok(())
    }

    fn delete(&self, name: &str) {
        if let Some(window) = web_sys::window() {
            if let Err(err) = Reflect::delete_property(&window, &JsValue::from_str(name)) {
                log::warn!("could not delete window.{}: {}", name, PaylineError::from(err));
            }
        }
        self.slots.borrow_mut().remove(name);
    }

    fn is_defined(&self, name: &str) -> bool {
        web_sys::window()
            .and_then(|window| Reflect::get(&window, &JsValue::from_str(name)).ok())
            .map(|value| !value.is_undefined())
            .unwrap_or(false)
    }
}

/// Turn the widget's first positional argument into a typed event.
///
/// Never fails: a missing or malformed payload decodes to the payload's
/// default, so a registered handler still runs.
pub fn decode_event(kind: EventKind, arg: JsValue) -> WidgetEvent {
    match kind {
        EventKind::WillInit => WidgetEvent::WillInit,
        EventKind::WillShow => WidgetEvent::WillShow,
        EventKind::FinalStateHasBeenReached => {
            WidgetEvent::FinalStateHasBeenReached(decode_payload(kind, arg))
        }
        EventKind::DidShowState => WidgetEvent::DidShowState(decode_payload(kind, arg)),
        EventKind::WillDisplayMessage => {
            WidgetEvent::WillDisplayMessage(decode_payload(kind, arg))
        }
        EventKind::WillRemoveMessage => WidgetEvent::WillRemoveMessage(decode_payload(kind, arg)),
        EventKind::BeforePayment => WidgetEvent::BeforePayment,
    }
}

fn decode_payload<T>(kind: EventKind, arg: JsValue) -> T
where
    T: DeserializeOwned + Default,
{
    if arg.is_undefined() || arg.is_null() {
        return T::default();
    }
    serde_wasm_bindgen::from_value(arg).unwrap_or_else(|err| {
        log::warn!("{}: {}", kind.global_name(), PaylineError::from(err));
        T::default()
    })
}

/// `None` becomes `undefined`, which the widget reads as "allow default".
pub fn encode_outcome(outcome: Option<bool>) -> JsValue {
    match outcome {
        Some(allow) => JsValue::from_bool(allow),
        None => JsValue::UNDEFINED,
    }
}
