use async_trait::async_trait;
use vitals_protocol::{UpdateResponse, VitalUpdate, JSON_CONTENT_TYPE};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{window, Headers, Request, RequestInit, Response};

use crate::error::UpdateError;
use crate::handler::UpdateTransport;

/// `fetch`-based transport posting JSON to the update endpoint
pub struct FetchTransport {
    endpoint: String,
}

impl FetchTransport {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
        }
    }

    fn build_request(&self, body: &str) -> Result<Request, JsValue> {
        let headers = Headers::new()?;
        headers.set("Content-Type", JSON_CONTENT_TYPE)?;

        let init = RequestInit::new();
        init.set_method("POST");
        init.set_headers(&headers);
        init.set_body(&JsValue::from_str(body));

        Request::new_with_str_and_init(&self.endpoint, &init)
    }
}

#[async_trait(?Send)]
impl UpdateTransport for FetchTransport {
    async fn send(&self, update: &VitalUpdate) -> Result<UpdateResponse, UpdateError> {
        let win = window().ok_or_else(|| UpdateError::Transport("No window".into()))?;
        let body = update
            .to_json()
            .map_err(|e| UpdateError::Encode(e.to_string()))?;
        let req = self.build_request(&body)?;

        let resp_val = JsFuture::from(win.fetch_with_request(&req)).await?;
        let resp: Response = resp_val.dyn_into()?;
        if !resp.ok() {
            return Err(UpdateError::HttpStatus(resp.status()));
        }

        let text = JsFuture::from(resp.text()?)
            .await?
            .as_string()
            .ok_or_else(|| UpdateError::Decode("response body is not text".into()))?;
        UpdateResponse::from_json(&text).map_err(|e| UpdateError::Decode(e.to_string()))
    }
}
