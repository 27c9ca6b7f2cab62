//! RIBPay, the dynamic payment method offered through the widget's
//! custom-payment-method extension.
//!
//! The widget looks up a window function named [`RIBPAY_FACTORY`] (the
//! anchor's `data-custompm` attribute points at it) and calls it lazily,
//! possibly several times, to obtain markup for extra payment methods.

use std::rc::Rc;

use serde::Serialize;

use crate::error::Result;
use crate::registry::{GlobalFunction, GlobalRegistry, PaymentMethodFactory};

/// Window function name the widget calls for custom payment methods.
pub const RIBPAY_FACTORY: &str = "RIBPayInit";

pub const RIBPAY_METHOD_ID: &str = "RIBPay";

const RIBPAY_STYLESHEET: &str =
    "https://unpkg.com/@ribpay/widget@~0.2.30/build/static/css/widget-min.css";
const RIBPAY_SCRIPT: &str = "https://unpkg.com/@ribpay/widget@~0.2.30/build/static/js/widget-min.js";

/// Whether the bank transfer should be instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InstantPayment {
    Expected,
    UserChoice,
    #[default]
    No,
}

impl InstantPayment {
    pub fn as_str(self) -> &'static str {
        match self {
            InstantPayment::Expected => "EXPECTED",
            InstantPayment::UserChoice => "USER_CHOICE",
            InstantPayment::No => "NO",
        }
    }
}

/// Order data handed to the RIBPay sub-widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentMethodContext {
    pub order_id: String,
    pub redirect_url: Option<String>,
    pub instant_payment: InstantPayment,
    pub bic: Option<String>,
}

/// One entry of the list returned to the widget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentMethodDescriptor {
    pub index: u32,
    pub payment_method_id: String,
    pub html: String,
}

impl PaymentMethodContext {
    pub fn new(order_id: impl Into<String>) -> Self {
        Self {
            order_id: order_id.into(),
            redirect_url: None,
            instant_payment: InstantPayment::default(),
            bic: None,
        }
    }

    /// `data-*` attributes for the RIBPay anchor. Absent and empty values
    /// are left out rather than rendered as `data-x=undefined`.
    pub fn data_attributes(&self) -> String {
        let pairs = [
            ("order_id", Some(self.order_id.as_str())),
            ("redirect_url", self.redirect_url.as_deref()),
            ("instant_payment", Some(self.instant_payment.as_str())),
            ("bic", self.bic.as_deref()),
        ];
        pairs
            .iter()
            .filter_map(|(name, value)| match value {
                Some(v) if !v.is_empty() => Some(format!("data-{}={}", name, v)),
                _ => None,
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn html(&self) -> String {
        format!(
            concat!(
                "<link href=\"{css}\" rel=\"stylesheet\" />\n",
                "<script src=\"{js}\"></script>\n",
                "<div id=\"RIBPayWidget\" {attrs}></div>\n",
            ),
            css = RIBPAY_STYLESHEET,
            js = RIBPAY_SCRIPT,
            attrs = self.data_attributes(),
        )
    }

    pub fn descriptors(&self) -> Vec<PaymentMethodDescriptor> {
        vec![PaymentMethodDescriptor {
            index: 0,
            payment_method_id: RIBPAY_METHOD_ID.to_string(),
            html: self.html(),
        }]
    }

    /// A factory closure over a snapshot of this context.
    pub fn factory(&self) -> PaymentMethodFactory {
        let context = self.clone();
        Rc::new(move || context.descriptors())
    }
}

/// Register (or overwrite) the RIBPay factory. Stale factories from an
/// earlier order are simply replaced.
pub fn install_factory<R>(registry: &R, context: &PaymentMethodContext) -> Result<()>
where
    R: GlobalRegistry + ?Sized,
{
    log::debug!("installing {} for order {}", RIBPAY_FACTORY, context.order_id);
    registry.define(RIBPAY_FACTORY, GlobalFunction::PaymentMethods(context.factory()))
}
