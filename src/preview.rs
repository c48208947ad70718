//! preview コマンド
//!
//! 保存済みの評估結果を、ブラウザと同じ表示モデルでテキスト表示する。

use crate::error::{AssessError, Result};
use serde_json::Value;
use std::path::Path;
use store_assess_common::report::{slots, METRIC_LABELS, SECTION_TITLES};
use store_assess_common::{Binding, MapBinding, ReportConfig, ReportView};

/// ファイルから表示モデルを作る
pub fn load(path: &Path, config: &ReportConfig) -> Result<ReportView> {
    if !path.exists() {
        return Err(AssessError::FileNotFound(path.display().to_string()));
    }

    let content = std::fs::read_to_string(path)?;
    let value: Value = serde_json::from_str(&content)?;

    Ok(ReportView::from_input(&unwrap_response(value), config)?)
}

/// APIレスポンス全体（`success` を持つ）なら `raw_data` を取り出す
pub fn unwrap_response(value: Value) -> Value {
    match value {
        Value::Object(mut map) if map.contains_key("success") => map
            .remove("raw_data")
            .unwrap_or_else(|| Value::Object(Default::default())),
        other => other,
    }
}

fn text_of(view: &ReportView, id: &str) -> String {
    match view.binding(id) {
        Some(Binding::Text(text)) => text.clone(),
        Some(Binding::Paragraphs(lines)) => lines.join("\n"),
        None => String::new(),
    }
}

fn paragraphs_of(view: &ReportView, id: &str) -> Vec<String> {
    match view.binding(id) {
        Some(Binding::Paragraphs(lines)) => lines.clone(),
        Some(Binding::Text(text)) => vec![text.clone()],
        None => Vec::new(),
    }
}

/// 表示モデルを端末向けテキストにする
pub fn render_text(view: &ReportView, date: &str) -> String {
    let mut lines = vec![
        format!("== 店面選址評估報告 ({}) ==", date),
        format!("綜合評分: {}", text_of(view, slots::SCORE)),
        format!("目標客群（輸入）: {}", text_of(view, slots::USER_TARGET)),
        format!("營業時段: {}", text_of(view, slots::USER_HOURS)),
    ];

    lines.push(match &view.map {
        MapBinding::Image(url) => format!("地圖: {}", url),
        MapBinding::Placeholder(text) => format!("地圖: {}", text),
    });

    lines.push(String::new());
    lines.push("-- AI 評估總結 --".into());
    lines.extend(paragraphs_of(view, slots::SUMMARY));

    lines.push(String::new());
    lines.push("-- 關鍵指標 --".into());
    for (id, label) in METRIC_LABELS {
        lines.push(format!("{}: {}", label, text_of(view, id)));
    }
    lines.push(format!("五力評語: {}", text_of(view, slots::RADAR_COMMENT)));

    lines.push(String::new());
    lines.push("-- 圖表 --".into());
    for spec in &view.charts {
        let values: Vec<String> = spec.values().iter().map(|v| format!("{}", v)).collect();
        lines.push(format!(
            "{} ({:?}): {}",
            spec.slot.canvas_id(),
            spec.kind,
            values.join(", ")
        ));
    }

    for (id, title) in SECTION_TITLES {
        lines.push(String::new());
        lines.push(format!("-- {} --", title));
        lines.extend(paragraphs_of(view, id));
    }

    if !view.sources.is_empty() {
        lines.push(String::new());
        lines.push("-- 資料來源彙整 --".into());
        lines.extend(view.sources.iter().map(|source| format!("- {}", source)));
    }

    lines.join("\n")
}
