//! Vendor asset URLs and idempotent injection into `<head>`.
//!
//! An asset is identified by its URL. Injection first looks for an element
//! already referencing that URL (left behind by an earlier mount, or added by
//! another provider) and only creates one when none exists. Injected elements
//! are never removed: re-running the vendor script would re-initialize the
//! widget.

use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlLinkElement, HtmlScriptElement};

use crate::error::{PaylineError, Result};

const PRODUCTION_BASE_URL: &str = "https://payment.cdn.payline.com/cdn";
const SANDBOX_BASE_URL: &str = "https://homologation-payment.cdn.payline.com/cdn";

/// Cosmetic overrides rendered by the provider: show only the first payment
/// method layout and drop the background of custom card logos.
pub const OVERRIDE_CSS: &str = r#"
    #PaylineWidget #pl-mgr-paymentMethodList-layout .pl-paymentMethodLayout-view:not(:first-child) {
      display: none;
    }

    #PaylineWidget span.pl-card-logo.pl-custom {
      background-image: initial;
    }
"#;

/// Which Payline CDN to load the widget from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum WidgetEnvironment {
    Production,
    /// Payline's "homologation" environment.
    #[default]
    Sandbox,
}

impl WidgetEnvironment {
    pub fn from_production(production: bool) -> Self {
        if production {
            WidgetEnvironment::Production
        } else {
            WidgetEnvironment::Sandbox
        }
    }

    pub fn base_url(self) -> &'static str {
        match self {
            WidgetEnvironment::Production => PRODUCTION_BASE_URL,
            WidgetEnvironment::Sandbox => SANDBOX_BASE_URL,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetKind {
    Script,
    Stylesheet,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetDescriptor {
    pub url: String,
    pub kind: AssetKind,
}

impl AssetDescriptor {
    pub fn script_for(environment: WidgetEnvironment) -> Self {
        Self {
            url: format!("{}/scripts/widget-min.js", environment.base_url()),
            kind: AssetKind::Script,
        }
    }

    pub fn stylesheet_for(environment: WidgetEnvironment) -> Self {
        Self {
            url: format!("{}/styles/widget-min.css", environment.base_url()),
            kind: AssetKind::Stylesheet,
        }
    }

    /// CSS selector matching an element that already loads this asset.
    pub fn selector(&self) -> String {
        match self.kind {
            AssetKind::Script => format!("script[src=\"{}\"]", self.url),
            AssetKind::Stylesheet => format!("link[href=\"{}\"]", self.url),
        }
    }
}

/// Return the element loading `asset`, creating and appending it to
/// `<head>` only if the document has none yet.
pub fn ensure_asset(document: &Document, asset: &AssetDescriptor) -> Result<Element> {
    if let Some(existing) = document.query_selector(&asset.selector())? {
        return Ok(existing);
    }

    let head = document.head().ok_or(PaylineError::NoHead)?;
    let element: Element = match asset.kind {
        AssetKind::Script => {
            let script: HtmlScriptElement = document
                .create_element("script")?
                .dyn_into()
                .map_err(|_| PaylineError::Js("created element is not a <script>".into()))?;
            script.set_src(&asset.url);
            script.into()
        }
        AssetKind::Stylesheet => {
            let link: HtmlLinkElement = document
                .create_element("link")?
                .dyn_into()
                .map_err(|_| PaylineError::Js("created element is not a <link>".into()))?;
            link.set_href(&asset.url);
            link.set_rel("stylesheet");
            link.into()
        }
    };
    head.append_child(&element)?;
    log::debug!("injected {}", asset.url);
    Ok(element)
}

/// Ensure both widget assets for `environment`; returns the script element.
pub fn inject_assets(environment: WidgetEnvironment) -> Result<Element> {
    let document = web_sys::window()
        .ok_or(PaylineError::NoWindow)?
        .document()
        .ok_or(PaylineError::NoDocument)?;
    let script = ensure_asset(&document, &AssetDescriptor::script_for(environment))?;
    ensure_asset(&document, &AssetDescriptor::stylesheet_for(environment))?;
    Ok(script)
}
