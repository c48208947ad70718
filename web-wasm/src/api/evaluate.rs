//! 評估API呼び出し（fetch）
//!
//! `POST {endpoint}` にフォーム値をJSONで送り、`EvaluationResult` を受け取る。
//! HTTPステータスに関わらず本文をJSONとして読む（失敗時もサーバーは `success: false` を返す）。

use store_assess_common::{Error, EvaluationResult, Evaluator, FormPayload, Result};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, RequestMode, Response};

use crate::export::js_bindings::js_error_message;

/// fetch による Evaluator
pub struct FetchEvaluator {
    endpoint: String,
}

impl FetchEvaluator {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
        }
    }

    async fn post(&self, body: &str) -> std::result::Result<JsValue, JsValue> {
        let opts = RequestInit::new();
        opts.set_method("POST");
        opts.set_mode(RequestMode::SameOrigin);
        opts.set_body(&JsValue::from_str(body));

        let request = Request::new_with_str_and_init(&self.endpoint, &opts)?;
        request.headers().set("Content-Type", "application/json")?;

        let window = web_sys::window().ok_or_else(|| JsValue::from_str("window not available"))?;
        let resp_value = JsFuture::from(window.fetch_with_request(&request)).await?;
        let resp: Response = resp_value.dyn_into()?;

        if !resp.ok() {
            console_log!("Evaluate API status: {}", resp.status());
        }

        JsFuture::from(resp.json()?).await
    }
}

impl Evaluator for FetchEvaluator {
    async fn evaluate(&self, payload: &FormPayload) -> Result<EvaluationResult> {
        let body = serde_json::to_string(payload)?;

        let json = self
            .post(&body)
            .await
            .map_err(|e| Error::Http(js_error_message(&e)))?;

        serde_wasm_bindgen::from_value(json)
            .map_err(|e| Error::Parse(format!("Response parse error: {}", e)))
    }
}
