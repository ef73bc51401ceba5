//! Vital sliders in the browser
//!
//! Mirrors each slider's value into `<id>_value`, posts it to the update
//! service, and shows the returned change in `<id>_change`.

pub mod binding;
pub mod config;
pub mod dom;
pub mod error;
pub mod handler;
pub mod logging;
pub mod network;

use tracing::error;
use wasm_bindgen::prelude::*;
use web_sys::window;

use crate::config::UiConfig;

#[wasm_bindgen(start)]
pub fn main_js() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();

    let win = window().ok_or("No window found")?;
    let config = UiConfig::from_window(&win);
    logging::init(config.log_level);

    let doc = win.document().ok_or("No document")?;
    dom::when_ready(&doc, move |doc| {
        if let Err(e) = dom::bind_sliders(&doc, &config) {
            error!("failed to bind sliders: {e:?}");
        }
    })
}
