//! DOM tests; run with `wasm-pack test --headless --firefox`.

#![cfg(target_arch = "wasm32")]

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsValue;
use wasm_bindgen_futures::JsFuture;
use wasm_bindgen_test::*;
use web_sys::js_sys::{Function, Object, Promise, Reflect};
use yew::prelude::*;
use yew_payline::*;

wasm_bindgen_test_configure!(run_in_browser);

fn document() -> web_sys::Document {
    web_sys::window().unwrap().document().unwrap()
}

fn count(selector: &str) -> u32 {
    document().query_selector_all(selector).unwrap().length()
}

#[wasm_bindgen_test]
fn repeated_injection_keeps_one_element_per_url() {
    for _ in 0..3 {
        inject_assets(WidgetEnvironment::Sandbox).unwrap();
    }
    let script = AssetDescriptor::script_for(WidgetEnvironment::Sandbox);
    let stylesheet = AssetDescriptor::stylesheet_for(WidgetEnvironment::Sandbox);
    assert_eq!(count(&script.selector()), 1);
    assert_eq!(count(&stylesheet.selector()), 1);
}

#[wasm_bindgen_test]
fn existing_element_is_reused() {
    let asset = AssetDescriptor::stylesheet_for(WidgetEnvironment::Production);
    let first = ensure_asset(&document(), &asset).unwrap();
    let second = ensure_asset(&document(), &asset).unwrap();
    assert!(first.is_same_node(Some(&second)));
}

#[wasm_bindgen_test]
fn window_adapters_dispatch_and_disappear_on_unregister() {
    let window = web_sys::window().unwrap();
    let registry = WindowRegistry::default();
    let cell = HandlerCell::default();
    register_adapters(&registry, &cell).unwrap();

    let adapter: Function = Reflect::get(&window, &JsValue::from_str("Payline_onBeforePayment"))
        .unwrap()
        .into();
    assert_eq!(adapter.call0(&JsValue::NULL).unwrap(), JsValue::TRUE);

    cell.replace(EventHandlers {
        on_before_payment: Some(Callback::from(|_| Some(false))),
        ..Default::default()
    });
    assert_eq!(adapter.call0(&JsValue::NULL).unwrap(), JsValue::FALSE);

    unregister_adapters(&registry);
    for kind in EventKind::ALL {
        assert!(!registry.is_defined(kind.global_name()));
    }
}

#[wasm_bindgen_test]
fn factory_returns_plain_descriptor_objects() {
    let window = web_sys::window().unwrap();
    let registry = WindowRegistry::default();
    install_factory(&registry, &PaymentMethodContext::new("O1")).unwrap();

    let factory: Function = Reflect::get(&window, &JsValue::from_str(RIBPAY_FACTORY))
        .unwrap()
        .into();
    let list = factory.call0(&JsValue::NULL).unwrap();
    let first = Reflect::get_u32(&list, 0).unwrap();
    let id = Reflect::get(&first, &JsValue::from_str("paymentMethodId")).unwrap();
    assert_eq!(id.as_string().as_deref(), Some("RIBPay"));

    registry.delete(RIBPAY_FACTORY);
    assert!(!registry.is_defined(RIBPAY_FACTORY));
}

fn state_payload(state: &str) -> JsValue {
    let payload = Object::new();
    Reflect::set(&payload, &JsValue::from_str("state"), &JsValue::from_str(state)).unwrap();
    payload.into()
}

fn window_function(name: &str) -> Function {
    let window = web_sys::window().unwrap();
    Reflect::get(&window, &JsValue::from_str(name)).unwrap().into()
}

#[wasm_bindgen_test]
fn state_payload_reaches_the_handler() {
    let registry = WindowRegistry::default();
    let seen = Rc::new(RefCell::new(Vec::new()));
    let cell = HandlerCell::new(EventHandlers {
        on_did_show_state: Some(Callback::from({
            let seen = seen.clone();
            move |change: StateChange| seen.borrow_mut().push(change.state)
        })),
        on_final_state_has_been_reached: Some(Callback::from(|change: StateChange| {
            Some(change.state != WidgetState::PaymentSuccess)
        })),
        ..Default::default()
    });
    register_adapters(&registry, &cell).unwrap();

    let did_show = window_function("Payline_onDidShowState");
    let outcome = did_show
        .call1(&JsValue::NULL, &state_payload("PAYMENT_METHODS_LIST"))
        .unwrap();
    assert!(outcome.is_undefined());
    // No argument at all still reaches the handler.
    did_show.call0(&JsValue::NULL).unwrap();
    assert_eq!(
        *seen.borrow(),
        vec![WidgetState::PaymentMethodsList, WidgetState::Unknown]
    );

    let final_state = window_function("Payline_onFinalStateHasBeenReached");
    let outcome = final_state
        .call1(&JsValue::NULL, &state_payload("PAYMENT_SUCCESS"))
        .unwrap();
    assert_eq!(outcome, JsValue::FALSE);

    unregister_adapters(&registry);
}

#[wasm_bindgen_test]
fn message_payload_reaches_the_handler() {
    let registry = WindowRegistry::default();
    let seen = Rc::new(RefCell::new(Vec::new()));
    let cell = HandlerCell::new(EventHandlers {
        on_will_display_message: Some(Callback::from({
            let seen = seen.clone();
            move |message: WidgetMessage| {
                let allow = message.message_type != MessageType::Error;
                seen.borrow_mut().push(message);
                Some(allow)
            }
        })),
        on_will_remove_message: Some(Callback::from(|removal: MessageRemoval| {
            Some(removal.id != "keep")
        })),
        ..Default::default()
    });
    register_adapters(&registry, &cell).unwrap();

    let payload = Object::new();
    for (field, value) in [("id", "m1"), ("type", "error"), ("key", "card.refused"), ("message", "Refused")] {
        Reflect::set(&payload, &JsValue::from_str(field), &JsValue::from_str(value)).unwrap();
    }
    let display = window_function("Payline_onWillDisplayMessage");
    assert_eq!(display.call1(&JsValue::NULL, &payload).unwrap(), JsValue::FALSE);

    // An unfamiliar type and missing fields still reach the handler.
    let partial = Object::new();
    Reflect::set(&partial, &JsValue::from_str("id"), &JsValue::from_str("m2")).unwrap();
    Reflect::set(&partial, &JsValue::from_str("type"), &JsValue::from_str("debug")).unwrap();
    assert_eq!(display.call1(&JsValue::NULL, &partial).unwrap(), JsValue::TRUE);

    let seen = seen.borrow();
    assert_eq!(seen.len(), 2);
    assert_eq!(seen[0].key, "card.refused");
    assert_eq!(seen[0].message_type, MessageType::Error);
    assert_eq!(seen[1].id, "m2");
    assert_eq!(seen[1].message_type, MessageType::Unknown);
    assert!(seen[1].message.is_empty());

    let removal = Object::new();
    Reflect::set(&removal, &JsValue::from_str("id"), &JsValue::from_str("keep")).unwrap();
    let remove = window_function("Payline_onWillRemoveMessage");
    assert_eq!(remove.call1(&JsValue::NULL, &removal).unwrap(), JsValue::FALSE);

    unregister_adapters(&registry);
}

#[derive(Properties, PartialEq)]
struct StatusProps {
    seen: Rc<RefCell<Option<PaylineAssets>>>,
}

#[function_component(StatusReader)]
fn status_reader(props: &StatusProps) -> Html {
    *props.seen.borrow_mut() = use_payline_status();
    Html::default()
}

#[function_component(ProvidedStatus)]
fn provided_status(props: &StatusProps) -> Html {
    html! {
        <PaylineProvider production={true}>
            <StatusReader seen={props.seen.clone()} />
        </PaylineProvider>
    }
}

async fn next_tick() {
    let promise = Promise::new(&mut |resolve, _| {
        web_sys::window()
            .unwrap()
            .set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, 10)
            .unwrap();
    });
    JsFuture::from(promise).await.unwrap();
}

#[wasm_bindgen_test]
async fn provider_exposes_its_status_to_descendants() {
    let seen = Rc::new(RefCell::new(None));
    let root = document().create_element("div").unwrap();
    yew::Renderer::<ProvidedStatus>::with_root_and_props(root, StatusProps { seen: seen.clone() })
        .render();
    next_tick().await;

    let status = (*seen.borrow()).expect("status published by the provider");
    assert_eq!(status.environment, WidgetEnvironment::Production);
    let script = AssetDescriptor::script_for(WidgetEnvironment::Production);
    assert_eq!(count(&script.selector()), 1);
}

#[function_component(HiddenWidget)]
fn hidden_widget() -> Html {
    html! {
        <PaylineWidget token={String::new()} title={"Checkout"} hidden={true} />
    }
}

#[wasm_bindgen_test]
async fn widget_forwards_title_and_hidden() {
    let root = document().create_element("div").unwrap();
    yew::Renderer::<HiddenWidget>::with_root(root.clone()).render();
    next_tick().await;

    let anchor = root.query_selector("#PaylineWidget").unwrap().expect("anchor rendered");
    assert_eq!(anchor.get_attribute("title").as_deref(), Some("Checkout"));
    assert!(anchor.has_attribute("hidden"));
    assert_eq!(anchor.get_attribute("data-auto-init").as_deref(), Some("false"));
    assert_eq!(anchor.get_attribute("data-custompm").as_deref(), Some("RIBPayInit"));
}
