//! PDF/PNG出力（WASM版）
//!
//! オフスクリーンの複製を作り、チャートの再描画を待ってからJavaScript Bridgeへ渡す。

pub mod js_bindings;
pub mod snapshot;

use gloo::timers::future::TimeoutFuture;
use store_assess_common::{Error, ExportKind, ReportConfig, Result};

use self::js_bindings::{export_pdf_js, export_png_js, js_error_message, options_json};
use self::snapshot::Snapshot;

/// 出力失敗時に表示するメッセージ
pub fn failure_message(kind: ExportKind) -> &'static str {
    match kind {
        ExportKind::Pdf => "PDF 生成失敗，請稍後再試",
        ExportKind::Png => "圖片生成失敗，請稍後再試",
    }
}

/// 出力中のオーバーレイ表示
pub fn overlay_message(kind: ExportKind) -> &'static str {
    match kind {
        ExportKind::Pdf => "正在生成高畫質 PDF",
        ExportKind::Png => "正在生成圖片",
    }
}

/// レポートを出力する
///
/// 成功・失敗どちらでも複製はDOMから取り除かれる。
///
/// # Arguments
/// * `kind` - 出力形式
/// * `config` - ファイル名・キャプチャ幅・待ち時間
pub async fn export_report(kind: ExportKind, config: &ReportConfig) -> Result<()> {
    let window = web_sys::window().ok_or_else(|| export_error(kind, "window not available"))?;
    let document = window
        .document()
        .ok_or_else(|| export_error(kind, "document not available"))?;
    let options = options_json(kind, config).map_err(|e| export_error(kind, &e))?;

    let snapshot = Snapshot::build(&window, &document, config).map_err(|e| {
        export_error(kind, &format!("snapshot failed: {}", js_error_message(&e)))
    })?;

    TimeoutFuture::new(config.export_settle_ms).await;

    let result = match kind {
        ExportKind::Pdf => export_pdf_js(snapshot.element(), &options).await,
        ExportKind::Png => export_png_js(snapshot.element(), &options).await,
    };
    drop(snapshot);

    result
        .map(|_| ())
        .map_err(|e| export_error(kind, &js_error_message(&e)))
}

/// 出力形式つきのエラー
pub fn export_error(kind: ExportKind, detail: &str) -> Error {
    Error::Export(format!("{} export failed: {}", kind_name(kind), detail))
}

fn kind_name(kind: ExportKind) -> &'static str {
    match kind {
        ExportKind::Pdf => "PDF",
        ExportKind::Png => "PNG",
    }
}
