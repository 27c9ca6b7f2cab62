//! The Payline widget anchor and its bridge to the vendor script.
//!
//! The vendor script discovers `<div id="PaylineWidget">` through its
//! data-attributes and mounts into it. This component additionally:
//! 1. registers the `Payline_<event>` adapters on mount and removes them on
//!    unmount, dispatching to whichever handler props are current;
//! 2. calls `Payline.Api.init` / `Payline.Api.hide` as the token comes and goes;
//! 3. installs the `RIBPayInit` factory whenever an order id is present.

use yew::prelude::*;

use crate::adapter::{register_adapters, unregister_adapters, HandlerCell};
use crate::components::use_payline_status;
use crate::events::{EventHandlers, EventKind, MessageRemoval, StateChange, WidgetMessage};
use crate::lifecycle::{WidgetLifecycle, WindowVendorApi, DEFAULT_TEMPLATE};
use crate::payment_method::{install_factory, InstantPayment, PaymentMethodContext, RIBPAY_FACTORY};
use crate::registry::WindowRegistry;

/// `id` the vendor script looks for.
pub const WIDGET_ANCHOR_ID: &str = "PaylineWidget";

fn default_template() -> String {
    DEFAULT_TEMPLATE.to_string()
}

/// Properties for [`PaylineWidget`].
///
/// Only `token` is required. An empty token keeps the widget hidden.
///
/// Of the anchor's own HTML attributes only `class`, `style`, `title` and
/// `hidden` are forwarded; `id` and the `data-*` attributes belong to the
/// vendor protocol and cannot be overridden.
#[derive(Properties, PartialEq, Clone)]
pub struct PaylineWidgetProps {
    /// Payment session token from your backend.
    pub token: String,
    #[prop_or_else(default_template)]
    pub template: String,
    #[prop_or_default]
    pub embedded_redirection_allowed: bool,
    #[prop_or_default]
    pub partner_return_url: Option<String>,

    /// Offer RIBPay for this order.
    #[prop_or_default]
    pub order_id: Option<String>,
    #[prop_or_default]
    pub redirect_url: Option<String>,
    #[prop_or_default]
    pub instant_payment: InstantPayment,
    #[prop_or_default]
    pub bic: Option<String>,

    #[prop_or_default]
    pub on_will_init: Option<Callback<()>>,
    #[prop_or_default]
    pub on_will_show: Option<Callback<()>>,
    /// Return `Some(false)` to keep the widget from showing its final screen.
    #[prop_or_default]
    pub on_final_state_has_been_reached: Option<Callback<StateChange, Option<bool>>>,
    #[prop_or_default]
    pub on_did_show_state: Option<Callback<StateChange>>,
    #[prop_or_default]
    pub on_will_display_message: Option<Callback<WidgetMessage, Option<bool>>>,
    #[prop_or_default]
    pub on_will_remove_message: Option<Callback<MessageRemoval, Option<bool>>>,
    /// Return `Some(false)` to block the payment.
    #[prop_or_default]
    pub on_before_payment: Option<Callback<(), Option<bool>>>,

    #[prop_or_default]
    pub class: Classes,
    #[prop_or_default]
    pub style: Option<AttrValue>,
    #[prop_or_default]
    pub title: Option<AttrValue>,
    #[prop_or_default]
    pub hidden: bool,
}

impl PaylineWidgetProps {
    pub fn handlers(&self) -> EventHandlers {
        EventHandlers {
            on_will_init: self.on_will_init.clone(),
            on_will_show: self.on_will_show.clone(),
            on_final_state_has_been_reached: self.on_final_state_has_been_reached.clone(),
            on_did_show_state: self.on_did_show_state.clone(),
            on_will_display_message: self.on_will_display_message.clone(),
            on_will_remove_message: self.on_will_remove_message.clone(),
            on_before_payment: self.on_before_payment.clone(),
        }
    }

    /// RIBPay context, present only for a non-empty order id.
    pub fn payment_method_context(&self) -> Option<PaymentMethodContext> {
        let order_id = self.order_id.as_deref().filter(|id| !id.is_empty())?;
        Some(PaymentMethodContext {
            order_id: order_id.to_string(),
            redirect_url: self.redirect_url.clone(),
            instant_payment: self.instant_payment,
            bic: self.bic.clone(),
        })
    }
}

/// Yew function component rendering the Payline widget anchor.
///
/// Mount at most one at a time: the callback names live in the shared
/// window namespace.
///
/// # Example
///
/// ```rust,ignore
/// use yew::prelude::*;
/// use yew_payline::{PaylineProvider, PaylineWidget, StateChange, WidgetState};
///
/// #[function_component(Checkout)]
/// fn checkout() -> Html {
///     let on_final = Callback::from(|change: StateChange| {
///         log::info!("final state: {:?}", change.state);
///         // Keep showing our own receipt instead of the widget's.
///         Some(change.state != WidgetState::PaymentSuccess)
///     });
///     html! {
///         <PaylineProvider>
///             <PaylineWidget
///                 token={"1kGc3xyz".to_string()}
///                 order_id={"O1".to_string()}
///                 on_final_state_has_been_reached={on_final}
///             />
///         </PaylineProvider>
///     }
/// }
/// ```
#[function_component(PaylineWidget)]
pub fn payline_widget(props: &PaylineWidgetProps) -> Html {
    let handlers = use_memo((), |_| HandlerCell::default());
    let registry = use_memo((), |_| WindowRegistry::default());
    let lifecycle = use_mut_ref(|| WidgetLifecycle::new(WindowVendorApi));
    let assets = use_payline_status();

    // Every render, no effect: adapters read this on each call.
    handlers.replace(props.handlers());

    {
        let handlers = handlers.clone();
        let registry = registry.clone();
        use_effect_with((), move |_| {
            if assets.is_none() {
                log::debug!("PaylineWidget mounted without a PaylineProvider; host loads the assets");
            }
            if let Err(err) = register_adapters(&*registry, &handlers) {
                log::warn!("could not register Payline callbacks: {}", err);
            }
            move || unregister_adapters(&*registry)
        });
    }

    {
        let template = props.template.clone();
        use_effect_with(props.token.clone(), move |token| {
            lifecycle.borrow_mut().set_token(token, &template);
            move || lifecycle.borrow_mut().clear()
        });
    }

    {
        let context = props.payment_method_context();
        use_effect_with(props.order_id.clone(), move |_| {
            if let Some(context) = context {
                if let Err(err) = install_factory(&*registry, &context) {
                    log::warn!("could not install {}: {}", RIBPAY_FACTORY, err);
                }
            }
            || ()
        });
    }

    html! {
        <div
            class={props.class.clone()}
            style={props.style.clone()}
            title={props.title.clone()}
            hidden={props.hidden}
            data-auto-init={(!props.token.is_empty()).to_string()}
            data-token={props.token.clone()}
            data-template={props.template.clone()}
            data-embeddedredirectionallowed={props.embedded_redirection_allowed.to_string()}
            data-partnerreturnurl={props.partner_return_url.clone().map(AttrValue::from)}
            data-event-willinit={EventKind::WillInit.global_name()}
            data-event-willshow={EventKind::WillShow.global_name()}
            data-event-finalstatehasbeenreached={EventKind::FinalStateHasBeenReached.global_name()}
            data-event-didshowstate={EventKind::DidShowState.global_name()}
            data-event-willdisplaymessage={EventKind::WillDisplayMessage.global_name()}
            data-event-willremovemessage={EventKind::WillRemoveMessage.global_name()}
            data-event-beforepayment={EventKind::BeforePayment.global_name()}
            id={WIDGET_ANCHOR_ID}
            data-custompm={RIBPAY_FACTORY}
        />
    }
}
