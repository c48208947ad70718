//! JavaScript Bridge バインディング
//!
//! Rust WASM から JavaScript ライブラリを呼び出すためのバインディング定義。
//! チャート描画（Chart.js）とPDF/PNG変換（html2pdf / html2canvas）をJavaScript側に委譲する。

use store_assess_common::{ExportKind, PdfOptions, PngOptions, ReportConfig};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlElement};

// ============================================
// JavaScript関数のextern宣言
// ============================================

#[wasm_bindgen(module = "/js/chart-bridge.js")]
extern "C" {
    /// キャンバスにチャートを生成
    ///
    /// # Arguments
    /// * `canvas` - 描画先のcanvas要素
    /// * `config_json` - Chart.js設定のJSON文字列
    ///
    /// # Returns
    /// Chartインスタンス
    #[wasm_bindgen(js_name = "createChart", catch)]
    pub fn create_chart_js(canvas: &Element, config_json: &str) -> Result<JsValue, JsValue>;

    /// Chartインスタンスを破棄
    #[wasm_bindgen(js_name = "destroyChart")]
    pub fn destroy_chart_js(chart: &JsValue);
}

#[wasm_bindgen(module = "/js/pdf-bridge.js")]
extern "C" {
    /// 要素をPDFに変換して保存
    ///
    /// # Arguments
    /// * `element` - 変換対象（オフスクリーン容器）
    /// * `options_json` - html2pdfオプションのJSON文字列
    #[wasm_bindgen(js_name = "exportPdf", catch)]
    pub async fn export_pdf_js(element: &HtmlElement, options_json: &str) -> Result<JsValue, JsValue>;

    /// 要素をPNGに変換して保存
    #[wasm_bindgen(js_name = "exportPng", catch)]
    pub async fn export_png_js(element: &HtmlElement, options_json: &str) -> Result<JsValue, JsValue>;
}

// ============================================
// ヘルパー関数
// ============================================

/// 出力形式に応じたオプションJSON
pub fn options_json(kind: ExportKind, config: &ReportConfig) -> Result<String, String> {
    let json = match kind {
        ExportKind::Pdf => serde_json::to_string(&PdfOptions::new(config)),
        ExportKind::Png => serde_json::to_string(&PngOptions::new(config)),
    };
    json.map_err(|e| format!("JSON serialization failed: {}", e))
}

/// JsValueのエラーを表示用文字列に変換
pub fn js_error_message(error: &JsValue) -> String {
    error
        .as_string()
        .or_else(|| {
            error
                .dyn_ref::<js_sys::Error>()
                .map(|e| String::from(e.message()))
        })
        .unwrap_or_else(|| format!("{:?}", error))
}


#[cfg(all(target_arch = "wasm32", test))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn wasm_js_error_message_from_error() {
        let error: JsValue = js_sys::Error::new("html2pdf is not loaded").into();
        assert_eq!(js_error_message(&error), "html2pdf is not loaded");
    }

    #[wasm_bindgen_test]
    fn wasm_js_error_message_from_string() {
        assert_eq!(js_error_message(&JsValue::from_str("boom")), "boom");
    }
}
