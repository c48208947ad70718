//! Chart.js バックエンド

use crate::export::js_bindings::{create_chart_js, destroy_chart_js, js_error_message};
use store_assess_common::{ChartBackend, ChartSpec, Error, Result};
use wasm_bindgen::JsValue;

/// ドキュメント上のcanvasへChart.jsで描画する
#[derive(Default)]
pub struct ChartJs;

impl ChartBackend for ChartJs {
    type Handle = JsValue;

    fn create(&mut self, spec: &ChartSpec) -> Result<Option<JsValue>> {
        let Some(canvas) = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(spec.slot.canvas_id()))
        else {
            return Ok(None);
        };

        let config = spec.to_config_json()?;
        create_chart_js(&canvas, &config)
            .map(Some)
            .map_err(|e| Error::Chart(js_error_message(&e)))
    }

    fn destroy(&mut self, handle: JsValue) {
        destroy_chart_js(&handle);
    }
}
