//! Global callback adapters.
//!
//! Seven adapters are registered once per widget mount, one per
//! [`EventKind`]. They never capture handlers directly: each one reads the
//! current handler set out of a shared [`HandlerCell`] at call time, and the
//! component rewrites that cell on every render. Handler props can therefore
//! be fresh closures on each render without touching the window.

use std::cell::RefCell;
use std::rc::Rc;

use crate::error::Result;
use crate::events::{EventHandlers, EventKind, WidgetEvent};
use crate::payment_method::RIBPAY_FACTORY;
use crate::registry::{GlobalFunction, GlobalRegistry};

/// Shared, always-current handler set.
#[derive(Clone, Default)]
pub struct HandlerCell(Rc<RefCell<EventHandlers>>);

impl HandlerCell {
    pub fn new(handlers: EventHandlers) -> Self {
        Self(Rc::new(RefCell::new(handlers)))
    }

    pub fn replace(&self, handlers: EventHandlers) {
        *self.0.borrow_mut() = handlers;
    }

    /// Dispatch to the latest handlers. The borrow is released before the
    /// handler runs, so a handler may trigger a re-render that writes the
    /// cell again.
    pub fn dispatch(&self, event: WidgetEvent) -> Option<bool> {
        let handlers = self.0.borrow().clone();
        handlers.dispatch(event)
    }
}

/// Define `Payline_<event>` for every event kind.
pub fn register_adapters<R>(registry: &R, cell: &HandlerCell) -> Result<()>
where
    R: GlobalRegistry + ?Sized,
{
    for kind in EventKind::ALL {
        let name = kind.global_name();
        if registry.is_defined(name) {
            log::warn!(
                "{} is already defined; is another PaylineWidget mounted? Overwriting it.",
                name
            );
        }
        let cell = cell.clone();
        let adapter = Rc::new(move |event: WidgetEvent| cell.dispatch(event));
        registry.define(name, GlobalFunction::Event { kind, adapter })?;
    }
    Ok(())
}

/// Remove every adapter and the payment-method factory.
pub fn unregister_adapters<R>(registry: &R)
where
    R: GlobalRegistry + ?Sized,
{
    for kind in EventKind::ALL {
        registry.delete(kind.global_name());
    }
    registry.delete(RIBPAY_FACTORY);
}
