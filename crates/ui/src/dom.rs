//! Page wiring: element lookup, readiness, and the delegated slider listener

use std::cell::RefCell;
use std::rc::Rc;

use tracing::{debug, info};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Document, Element, Event, HtmlInputElement};

use crate::binding::{BindingRegistry, TextTarget};
use crate::config::UiConfig;
use crate::handler::{SliderHandler, SummaryTargets};
use crate::network::FetchTransport;

type PageHandler = SliderHandler<Element, FetchTransport>;

impl TextTarget for Element {
    fn set_text(&self, text: &str) {
        self.set_text_content(Some(text));
    }
}

/// Run `f` once the document has been parsed
pub fn when_ready(doc: &Document, f: impl FnOnce(Document) + 'static) -> Result<(), JsValue> {
    if doc.ready_state() != "loading" {
        f(doc.clone());
        return Ok(());
    }

    let ready_doc = doc.clone();
    let callback = Closure::once(Box::new(move || {
        f(ready_doc);
    }) as Box<dyn FnOnce()>);
    doc.add_event_listener_with_callback("DOMContentLoaded", callback.as_ref().unchecked_ref())?;
    callback.forget();
    Ok(())
}

/// Bind every current and future slider in `doc`.
///
/// Sliders present now get their bindings resolved up front; sliders added
/// later are resolved on their first input event. One `input` listener on
/// the document serves all of them.
pub fn bind_sliders(doc: &Document, config: &UiConfig) -> Result<(), JsValue> {
    let lookup_doc = doc.clone();
    let lookup = move |id: &str| lookup_doc.get_element_by_id(id);

    let summary = SummaryTargets::resolve_if(config.summary_targets, &lookup);
    let handler: Rc<PageHandler> = Rc::new(SliderHandler::new(
        FetchTransport::new(config.endpoint.clone()),
        config.value_encoding,
        summary,
    ));

    let registry = Rc::new(RefCell::new(BindingRegistry::new()));
    let sliders = doc.get_elements_by_class_name(&config.slider_class);
    for i in 0..sliders.length() {
        if let Some(slider) = sliders.item(i) {
            let id = slider.id();
            if !id.is_empty() {
                registry.borrow_mut().get_or_resolve(&id, &lookup);
            }
        }
    }
    info!(
        sliders = registry.borrow().len(),
        endpoint = %config.endpoint,
        "vital sliders bound"
    );

    let slider_class = config.slider_class.clone();
    let on_input = Closure::wrap(Box::new(move |e: Event| {
        let input = e.target().and_then(|t| t.dyn_into::<HtmlInputElement>().ok());
        let has_class = input
            .as_ref()
            .is_some_and(|i| i.class_list().contains(&slider_class));
        let id = input.as_ref().map(|i| i.id()).unwrap_or_default();
        let (Some(input), Some(id)) = (&input, slider_id(input.is_some(), has_class, &id)) else {
            return;
        };

        let binding = registry.borrow_mut().get_or_resolve(id, &lookup);
        let pending = handler.on_input(binding, &input.value());
        spawn_local(async move {
            // Outcome is logged by the handler; failures stay silent on the page
            let _ = pending.await;
        });
    }) as Box<dyn FnMut(_)>);
    doc.add_event_listener_with_callback("input", on_input.as_ref().unchecked_ref())?;
    on_input.forget();

    Ok(())
}

/// Id of an `input` event target worth handling: an `<input>` carrying the
/// slider class with a non-empty id
pub fn slider_id(is_input: bool, has_slider_class: bool, id: &str) -> Option<&str> {
    if !is_input || !has_slider_class {
        return None;
    }
    if id.is_empty() {
        debug!("ignoring input from slider without id");
        return None;
    }
    Some(id)
}
