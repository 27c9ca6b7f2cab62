//! Vendor widget events, their payloads and the handler set that receives them.
//!
//! The widget reports its progress by calling window-scoped functions whose
//! names follow a fixed convention (`Payline_onWillInit`, ...). Each function
//! maps to one [`EventKind`]; the first positional argument, when present,
//! decodes into the payload carried by the matching [`WidgetEvent`] variant.
//!
//! Handlers that may veto the widget's default behavior return
//! `Option<bool>`: `None` (JS `undefined`) and `Some(true)` allow it,
//! `Some(false)` suppresses it.

use serde::Deserialize;
use yew::Callback;

/// The closed set of events the vendor widget emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    WillInit,
    WillShow,
    FinalStateHasBeenReached,
    DidShowState,
    WillDisplayMessage,
    WillRemoveMessage,
    BeforePayment,
}

impl EventKind {
    /// Every kind, in the order the widget documents them.
    pub const ALL: [EventKind; 7] = [
        EventKind::WillInit,
        EventKind::WillShow,
        EventKind::FinalStateHasBeenReached,
        EventKind::DidShowState,
        EventKind::WillDisplayMessage,
        EventKind::WillRemoveMessage,
        EventKind::BeforePayment,
    ];

    /// Handler property name, e.g. `onWillInit`.
    pub fn prop_name(self) -> &'static str {
        match self {
            EventKind::WillInit => "onWillInit",
            EventKind::WillShow => "onWillShow",
            EventKind::FinalStateHasBeenReached => "onFinalStateHasBeenReached",
            EventKind::DidShowState => "onDidShowState",
            EventKind::WillDisplayMessage => "onWillDisplayMessage",
            EventKind::WillRemoveMessage => "onWillRemoveMessage",
            EventKind::BeforePayment => "onBeforePayment",
        }
    }

    /// Name of the window-scoped function the widget looks up for this kind.
    pub fn global_name(self) -> &'static str {
        match self {
            EventKind::WillInit => "Payline_onWillInit",
            EventKind::WillShow => "Payline_onWillShow",
            EventKind::FinalStateHasBeenReached => "Payline_onFinalStateHasBeenReached",
            EventKind::DidShowState => "Payline_onDidShowState",
            EventKind::WillDisplayMessage => "Payline_onWillDisplayMessage",
            EventKind::WillRemoveMessage => "Payline_onWillRemoveMessage",
            EventKind::BeforePayment => "Payline_onBeforePayment",
        }
    }

    /// Anchor data-attribute that maps this kind to its global function.
    pub fn data_attribute(self) -> &'static str {
        match self {
            EventKind::WillInit => "data-event-willinit",
            EventKind::WillShow => "data-event-willshow",
            EventKind::FinalStateHasBeenReached => "data-event-finalstatehasbeenreached",
            EventKind::DidShowState => "data-event-didshowstate",
            EventKind::WillDisplayMessage => "data-event-willdisplaymessage",
            EventKind::WillRemoveMessage => "data-event-willremovemessage",
            EventKind::BeforePayment => "data-event-beforepayment",
        }
    }
}

/// Widget screen states reported through `onDidShowState` and
/// `onFinalStateHasBeenReached`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WidgetState {
    ActiveWaiting,
    BrowserNotSupported,
    ManageWebWallet,
    PaymentCanceledWithRetry,
    PaymentCanceled,
    PaymentFailureWithRetry,
    PaymentFailure,
    PaymentMethodNeedsMoreInfos,
    PaymentMethodsListShortcut,
    PaymentMethodsList,
    PaymentOnholdPartner,
    PaymentRedirectNoResponse,
    PaymentSuccessForceTicketDisplay,
    PaymentSuccess,
    PaymentTransitionalShortcut,
    TokenExpired,
    /// A state this crate does not know about yet, or none was sent.
    #[default]
    #[serde(other)]
    Unknown,
}

// Payloads decode leniently: missing fields take their defaults so a
// registered handler is always called, whatever the widget sent.

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct StateChange {
    pub state: WidgetState,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageType {
    Success,
    Info,
    Error,
    Warn,
    #[default]
    #[serde(other)]
    Unknown,
}

/// A message the widget is about to display.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct WidgetMessage {
    pub id: String,
    #[serde(rename = "type")]
    pub message_type: MessageType,
    pub key: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct MessageRemoval {
    pub id: String,
}

/// One decoded invocation of a vendor callback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WidgetEvent {
    WillInit,
    WillShow,
    FinalStateHasBeenReached(StateChange),
    DidShowState(StateChange),
    WillDisplayMessage(WidgetMessage),
    WillRemoveMessage(MessageRemoval),
    BeforePayment,
}

impl WidgetEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            WidgetEvent::WillInit => EventKind::WillInit,
            WidgetEvent::WillShow => EventKind::WillShow,
            WidgetEvent::FinalStateHasBeenReached(_) => EventKind::FinalStateHasBeenReached,
            WidgetEvent::DidShowState(_) => EventKind::DidShowState,
            WidgetEvent::WillDisplayMessage(_) => EventKind::WillDisplayMessage,
            WidgetEvent::WillRemoveMessage(_) => EventKind::WillRemoveMessage,
            WidgetEvent::BeforePayment => EventKind::BeforePayment,
        }
    }
}

/// The host-supplied handlers, one optional callback per [`EventKind`].
///
/// A fresh set is built on every render of the widget component; the
/// adapters registered on the window always dispatch through the latest one
/// (see [`crate::adapter::HandlerCell`]).
#[derive(Clone, Default, PartialEq)]
pub struct EventHandlers {
    pub on_will_init: Option<Callback<()>>,
    pub on_will_show: Option<Callback<()>>,
    pub on_final_state_has_been_reached: Option<Callback<StateChange, Option<bool>>>,
    pub on_did_show_state: Option<Callback<StateChange>>,
    pub on_will_display_message: Option<Callback<WidgetMessage, Option<bool>>>,
    pub on_will_remove_message: Option<Callback<MessageRemoval, Option<bool>>>,
    pub on_before_payment: Option<Callback<(), Option<bool>>>,
}

/// Returned to the widget when no handler is registered: allow the default.
pub const DEFAULT_OUTCOME: Option<bool> = Some(true);

impl EventHandlers {
    pub fn is_handled(&self, kind: EventKind) -> bool {
        match kind {
            EventKind::WillInit => self.on_will_init.is_some(),
            EventKind::WillShow => self.on_will_show.is_some(),
            EventKind::FinalStateHasBeenReached => self.on_final_state_has_been_reached.is_some(),
            EventKind::DidShowState => self.on_did_show_state.is_some(),
            EventKind::WillDisplayMessage => self.on_will_display_message.is_some(),
            EventKind::WillRemoveMessage => self.on_will_remove_message.is_some(),
            EventKind::BeforePayment => self.on_before_payment.is_some(),
        }
    }

    /// Forward `event` to its handler and return the handler's verdict.
    ///
    /// Void handlers yield `None`. A missing handler yields
    /// [`DEFAULT_OUTCOME`]. A panicking handler is not caught.
    pub fn dispatch(&self, event: WidgetEvent) -> Option<bool> {
        match event {
            WidgetEvent::WillInit => emit_void(&self.on_will_init, ()),
            WidgetEvent::WillShow => emit_void(&self.on_will_show, ()),
            WidgetEvent::FinalStateHasBeenReached(data) => {
                emit_verdict(&self.on_final_state_has_been_reached, data)
            }
            WidgetEvent::DidShowState(data) => emit_void(&self.on_did_show_state, data),
            WidgetEvent::WillDisplayMessage(data) => {
                emit_verdict(&self.on_will_display_message, data)
            }
            WidgetEvent::WillRemoveMessage(data) => {
                emit_verdict(&self.on_will_remove_message, data)
            }
            WidgetEvent::BeforePayment => emit_verdict(&self.on_before_payment, ()),
        }
    }
}

fn emit_void<T>(handler: &Option<Callback<T>>, data: T) -> Option<bool> {
    match handler {
        Some(cb) => {
            cb.emit(data);
            None
        }
        None => DEFAULT_OUTCOME,
    }
}

fn emit_verdict<T>(handler: &Option<Callback<T, Option<bool>>>, data: T) -> Option<bool> {
    match handler {
        Some(cb) => cb.emit(data),
        None => DEFAULT_OUTCOME,
    }
}
