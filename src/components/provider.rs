//! Asset provider: loads the Payline script and stylesheet, renders the
//! widget CSS overrides, then its children unchanged.

use yew::prelude::*;

use crate::assets::{WidgetEnvironment, OVERRIDE_CSS};
use crate::interop::use_payline_assets;

/// Load status shared with descendants through a Yew context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaylineAssets {
    pub environment: WidgetEnvironment,
    pub loaded: bool,
}

/// Properties for [`PaylineProvider`].
#[derive(Properties, PartialEq, Clone)]
pub struct PaylineProviderProps {
    /// Load from the production CDN instead of the homologation one.
    #[prop_or_default]
    pub production: bool,
    #[prop_or_default]
    pub children: Children,
}

/// Wrap the part of your app that renders a [`crate::PaylineWidget`].
///
/// ```rust,ignore
/// html! {
///     <PaylineProvider production={false}>
///         <PaylineWidget token={token} />
///     </PaylineProvider>
/// }
/// ```
#[function_component(PaylineProvider)]
pub fn payline_provider(props: &PaylineProviderProps) -> Html {
    let environment = WidgetEnvironment::from_production(props.production);
    let loaded = use_payline_assets(environment);
    let status = PaylineAssets { environment, loaded };

    html! {
        <ContextProvider<PaylineAssets> context={status}>
            <style>{ OVERRIDE_CSS }</style>
            { for props.children.iter() }
        </ContextProvider<PaylineAssets>>
    }
}

/// Load status of the nearest [`PaylineProvider`], if any.
#[hook]
pub fn use_payline_status() -> Option<PaylineAssets> {
    use_context::<PaylineAssets>()
}
