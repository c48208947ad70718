//! レポート表示モデル
//!
//! 評估結果（JSON）をテンプレートのスロットへの束縛に変換する。
//! DOMには触れない。ブラウザ側はこの結果をID単位で反映するだけ。
//!
//! ## 処理フロー
//! 1. 文字列ならJSONとしてパース（失敗時はエラー表示のみ）
//! 2. `{result: ...}` を1段だけ剥がす
//! 3. 本文9項目から出典マーカーを抽出
//! 4. スロットごとの表示値を決定（欠損はプレースホルダ）
//! 5. チャート設定を組み立てる

use crate::charts::{build_charts, ChartSpec};
use crate::citation::SourceCollector;
use crate::config::ReportConfig;
use crate::error::{Error, Result};
use crate::format::{self, CURRENCY_PREFIX};
use crate::types::AssessmentData;
use serde::Serialize;
use serde_json::Value;

/// パース失敗時に表示する文言
pub const PARSE_ERROR_MESSAGE: &str = "數據解析錯誤，請稍後再試。";

/// 本文の既定表示
pub const NO_DATA: &str = "尚無資料";

/// テンプレートのスロットID
pub mod slots {
    pub const SCORE: &str = "val-score";
    pub const MAP_IMAGE: &str = "val-map-img";
    pub const MAP_PLACEHOLDER: &str = "map-placeholder";
    pub const USER_TARGET: &str = "val-user-target";
    pub const USER_HOURS: &str = "val-user-hours";
    pub const SUMMARY: &str = "val-summary";
    pub const REVENUE: &str = "val-revenue";
    pub const TURNOVER: &str = "val-turnover";
    pub const ROI: &str = "val-roi";
    pub const TRAFFIC: &str = "val-traffic";
    pub const AUDIENCE: &str = "val-audience";
    pub const LOCATION_TYPE: &str = "val-location-type";
    pub const RADAR_COMMENT: &str = "val-radar-comment";
    pub const POPULATION: &str = "val-pop-body";
    pub const RENT: &str = "val-rent-body";
    pub const COMPETITION: &str = "val-comp-body";
    pub const FUNCTION: &str = "val-func-body";
    pub const SPACE: &str = "val-space-body";
    pub const FINANCIAL: &str = "val-fin-body";
    pub const MARKETING: &str = "val-mkt-body";
    pub const CONCLUSION: &str = "val-conclusion";
    pub const SOURCES: &str = "val-sources";
    pub const SOURCES_SECTION: &str = "source-section";
}

/// 指標スロットの表示名
pub const METRIC_LABELS: &[(&str, &str)] = &[
    (slots::REVENUE, "預估月營收"),
    (slots::TURNOVER, "預估翻桌率"),
    (slots::ROI, "預估回本期 (月)"),
    (slots::TRAFFIC, "預估日人流"),
    (slots::AUDIENCE, "目標客群"),
    (slots::LOCATION_TYPE, "商圈屬性"),
];

/// 本文セクションの見出し
pub const SECTION_TITLES: &[(&str, &str)] = &[
    (slots::POPULATION, "微觀人口與消費力分析"),
    (slots::RENT, "區域租金行情與門檻"),
    (slots::COMPETITION, "市場競爭態勢分析"),
    (slots::FUNCTION, "生活機能與交通節點"),
    (slots::SPACE, "空間規劃與坪效優化"),
    (slots::FINANCIAL, "財務模型與獲利預估"),
    (slots::MARKETING, "SWOT 策略分析"),
    (slots::CONCLUSION, "專家總結與行動清單"),
];

/// スロットに入る内容
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Binding {
    /// textContent をそのまま置き換える
    Text(String),
    /// 1行1段落
    Paragraphs(Vec<String>),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SlotBinding {
    pub id: &'static str,
    #[serde(flatten)]
    pub content: Binding,
}

/// 地図欄
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum MapBinding {
    Image(String),
    Placeholder(String),
}

/// 1回分のレンダリング結果
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportView {
    pub bindings: Vec<SlotBinding>,
    pub map: MapBinding,
    /// 出典（初出順・重複なし）。空ならフッターごと非表示
    pub sources: Vec<String>,
    pub charts: Vec<ChartSpec>,
}

/// 描画入力を AssessmentData に正規化する
///
/// - 文字列はJSONとしてパースする（失敗は `Error::Parse`）
/// - `result` がオブジェクトなら1段剥がす
/// - オブジェクト以外は空データとして扱う
pub fn parse_input(input: &Value) -> Result<AssessmentData> {
    let parsed;
    let mut value = match input {
        Value::String(text) => {
            parsed = serde_json::from_str::<Value>(text)
                .map_err(|e| Error::Parse(format!("レポートJSONパースエラー: {}", e)))?;
            &parsed
        }
        other => other,
    };

    if let Some(inner @ Value::Object(_)) = value.get("result") {
        value = inner;
    }

    match value {
        Value::Object(_) => Ok(serde_json::from_value(value.clone())?),
        _ => Ok(AssessmentData::default()),
    }
}

fn text(id: &'static str, value: impl Into<String>) -> SlotBinding {
    SlotBinding {
        id,
        content: Binding::Text(value.into()),
    }
}

fn block(id: &'static str, value: Option<&str>, fallback: &str) -> SlotBinding {
    SlotBinding {
        id,
        content: Binding::Paragraphs(format::paragraphs(value.unwrap_or(fallback))),
    }
}

/// 静的地図画像のURL
pub fn static_map_url(lat: f64, lng: f64, key: &str, config: &ReportConfig) -> String {
    format!(
        "https://maps.googleapis.com/maps/api/staticmap?center={lat},{lng}&zoom={zoom}&size={size}&markers=color:red%7C{lat},{lng}&key={key}",
        lat = lat,
        lng = lng,
        zoom = config.map_zoom,
        size = config.map_size,
        key = key,
    )
}

impl ReportView {
    /// 入力（文字列化JSONも可）から表示モデルを作る
    pub fn from_input(input: &Value, config: &ReportConfig) -> Result<Self> {
        let data = parse_input(input)?;
        Ok(Self::build(data, config))
    }

    /// 作業コピーの AssessmentData から表示モデルを作る
    pub fn build(mut data: AssessmentData, config: &ReportConfig) -> Self {
        let mut collector = SourceCollector::new();
        for field in data.narrative_fields_mut() {
            if let Some(body) = field.as_mut() {
                *body = collector.strip(body);
            }
        }

        let summary = data
            .summary_text
            .as_deref()
            .filter(|s| !s.is_empty())
            .or(data.summary.as_deref());

        let bindings = vec![
            text(slots::SCORE, format::score_text(data.score)),
            text(slots::USER_TARGET, data.user_target.as_deref().unwrap_or("一般大眾")),
            text(slots::USER_HOURS, data.user_hours.as_deref().unwrap_or("標準時段")),
            block(slots::SUMMARY, summary, "資料產出中..."),
            text(slots::REVENUE, format::monthly_revenue(data.daily_revenue)),
            text(slots::TURNOVER, format::metric(data.turnover_rate, "")),
            text(slots::ROI, format::metric(data.return_period_months, "")),
            text(slots::TRAFFIC, format::metric(data.est_daily_traffic, "")),
            text(slots::AUDIENCE, data.target_audience.as_deref().unwrap_or("一般大眾")),
            text(slots::LOCATION_TYPE, data.location_type.as_deref().unwrap_or("混合型")),
            text(
                slots::RADAR_COMMENT,
                data.radar_comment
                    .as_deref()
                    .unwrap_or("該商圈在人流與交通方面具有顯著優勢，但在競爭程度上需要留意。"),
            ),
            block(slots::POPULATION, data.population_body.as_deref(), NO_DATA),
            block(slots::RENT, data.rent_body.as_deref(), NO_DATA),
            block(slots::COMPETITION, data.competition_body.as_deref(), NO_DATA),
            block(slots::FUNCTION, data.function_body.as_deref(), NO_DATA),
            block(slots::SPACE, data.space_body.as_deref(), NO_DATA),
            block(slots::FINANCIAL, data.financial_body.as_deref(), NO_DATA),
            block(slots::MARKETING, data.marketing_body.as_deref(), NO_DATA),
            block(slots::CONCLUSION, data.conclusion_text.as_deref(), NO_DATA),
        ];

        let map = match (data.lat, data.lng, data.google_maps_key.as_deref()) {
            (Some(lat), Some(lng), Some(key)) if lat != 0.0 && lng != 0.0 => {
                MapBinding::Image(static_map_url(lat, lng, key, config))
            }
            _ => MapBinding::Placeholder("無地圖資料".into()),
        };

        let charts = build_charts(&data, config);

        Self {
            bindings,
            map,
            sources: collector.into_sources(),
            charts,
        }
    }

    /// スロットIDで束縛を探す
    pub fn binding(&self, id: &str) -> Option<&Binding> {
        self.bindings.iter().find(|b| b.id == id).map(|b| &b.content)
    }

    /// 月営収の表示（CLIのプレビュー用）
    pub fn revenue_text(&self) -> Option<&str> {
        match self.binding(slots::REVENUE) {
            Some(Binding::Text(text)) if text.starts_with(CURRENCY_PREFIX) => Some(text.as_str()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn config() -> ReportConfig {
        ReportConfig::default()
    }

    fn paragraphs_of<'a>(view: &'a ReportView, id: &str) -> &'a [String] {
        match view.binding(id) {
            Some(Binding::Paragraphs(p)) => p,
            other => panic!("段落ではありません: {:?}", other),
        }
    }

    fn text_of<'a>(view: &'a ReportView, id: &str) -> &'a str {
        match view.binding(id) {
            Some(Binding::Text(t)) => t,
            other => panic!("テキストではありません: {:?}", other),
        }
    }

    #[test]
    fn test_parse_input_string() {
        let input = Value::String(r#"{"score": 6.5}"#.into());
        let data = parse_input(&input).expect("パース失敗");
        assert_eq!(data.score, Some(6.5));
    }

    #[test]
    fn test_parse_input_malformed_string() {
        let input = Value::String("{score: oops".into());
        let result = parse_input(&input);
        assert!(matches!(result, Err(Error::Parse(_))));
    }

    #[test]
    fn test_parse_input_unwraps_result_once() {
        let input = json!({"result": {"score": 4, "result": {"score": 9}}});
        let data = parse_input(&input).expect("パース失敗");
        assert_eq!(data.score, Some(4.0));
    }

    #[test]
    fn test_parse_input_non_object_is_empty() {
        assert_eq!(parse_input(&json!([1, 2, 3])).unwrap(), AssessmentData::default());
        assert_eq!(parse_input(&Value::Null).unwrap(), AssessmentData::default());
    }

    #[test]
    fn test_empty_payload_uses_placeholders() {
        let view = ReportView::from_input(&json!({}), &config()).expect("描画失敗");

        assert_eq!(text_of(&view, slots::SCORE), "0.0");
        assert_eq!(text_of(&view, slots::REVENUE), "-");
        assert_eq!(text_of(&view, slots::TURNOVER), "-");
        assert_eq!(text_of(&view, slots::USER_TARGET), "一般大眾");
        assert_eq!(text_of(&view, slots::USER_HOURS), "標準時段");
        assert_eq!(paragraphs_of(&view, slots::SUMMARY), ["資料產出中..."]);
        assert_eq!(paragraphs_of(&view, slots::CONCLUSION), ["尚無資料"]);
        assert_eq!(view.map, MapBinding::Placeholder("無地圖資料".into()));
        assert!(view.sources.is_empty());
        assert_eq!(view.charts.len(), 5);
    }

    #[test]
    fn test_revenue_grouped() {
        let view = ReportView::from_input(&json!({"daily_revenue": 15000}), &config()).unwrap();
        assert_eq!(text_of(&view, slots::REVENUE), "NT$ 450,000");
        assert_eq!(view.revenue_text(), Some("NT$ 450,000"));
    }

    #[test]
    fn test_multiline_text_split_into_paragraphs() {
        let view = ReportView::from_input(
            &json!({"financial_body": "第一點\n第二點\n第三點"}),
            &config(),
        )
        .unwrap();
        assert_eq!(paragraphs_of(&view, slots::FINANCIAL), ["第一點", "第二點", "第三點"]);
    }

    #[test]
    fn test_summary_fallback_chain() {
        let view = ReportView::from_input(&json!({"summary": "舊欄位"}), &config()).unwrap();
        assert_eq!(paragraphs_of(&view, slots::SUMMARY), ["舊欄位"]);

        let view = ReportView::from_input(
            &json!({"summary": "舊欄位", "summary_text": "新欄位"}),
            &config(),
        )
        .unwrap();
        assert_eq!(paragraphs_of(&view, slots::SUMMARY), ["新欄位"]);
    }

    #[test]
    fn test_citations_stripped_and_deduplicated() {
        let input = json!({
            "population_body": "人口密集[資料來源：內政部]",
            "rent_body": "租金中等[資料來源:實價登錄]",
            "conclusion_text": "建議進駐[資料來源：內政部]",
            "summary_text": "整體良好"
        });
        let view = ReportView::from_input(&input, &config()).unwrap();

        assert_eq!(paragraphs_of(&view, slots::POPULATION), ["人口密集"]);
        assert_eq!(paragraphs_of(&view, slots::RENT), ["租金中等"]);
        assert_eq!(paragraphs_of(&view, slots::CONCLUSION), ["建議進駐"]);
        assert_eq!(view.sources, vec!["內政部", "實價登錄"]);
    }

    #[test]
    fn test_summary_citation_collected() {
        let input = json!({"summary_text": "總結[資料來源：經濟部商業司]"});
        let view = ReportView::from_input(&input, &config()).unwrap();
        assert_eq!(paragraphs_of(&view, slots::SUMMARY), ["總結"]);
        assert_eq!(view.sources, vec!["經濟部商業司"]);
    }

    #[test]
    fn test_legacy_summary_citation_collected() {
        let input = json!({"summary": "總結[資料來源：經濟部]"});
        let view = ReportView::from_input(&input, &config()).unwrap();
        assert_eq!(paragraphs_of(&view, slots::SUMMARY), ["總結"]);
        assert_eq!(view.sources, vec!["經濟部"]);
    }

    #[test]
    fn test_input_value_not_mutated() {
        let input = json!({"rent_body": "租金[資料來源：591]"});
        let before = input.clone();
        ReportView::from_input(&input, &config()).unwrap();
        assert_eq!(input, before);
    }

    #[test]
    fn test_map_image_url() {
        let input = json!({"lat": 25.033, "lng": 121.5654, "google_maps_key": "KEY"});
        let view = ReportView::from_input(&input, &config()).unwrap();

        assert_eq!(
            view.map,
            MapBinding::Image(
                "https://maps.googleapis.com/maps/api/staticmap?center=25.033,121.5654&zoom=15&size=800x400&markers=color:red%7C25.033,121.5654&key=KEY".into()
            )
        );
    }

    #[test]
    fn test_map_requires_key() {
        let input = json!({"lat": 25.033, "lng": 121.5654});
        let view = ReportView::from_input(&input, &config()).unwrap();
        assert!(matches!(view.map, MapBinding::Placeholder(_)));
    }

    #[test]
    fn test_render_is_deterministic() {
        let input = json!({
            "score": 7.8,
            "daily_revenue": 15000,
            "marketing_body": "SWOT[資料來源：自行整理]\n第二行",
            "age_data_csv": "1,2,3,4,5,6,7"
        });
        let first = ReportView::from_input(&input, &config()).unwrap();
        let second = ReportView::from_input(&input, &config()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_preview_serialization() {
        let view = ReportView::from_input(&json!({"score": 5}), &config()).unwrap();
        let json = serde_json::to_value(&view).unwrap();

        assert_eq!(json["bindings"][0]["id"], "val-score");
        assert_eq!(json["bindings"][0]["kind"], "text");
        assert_eq!(json["bindings"][0]["value"], "5.0");
        assert_eq!(json["map"]["kind"], "placeholder");
    }
}
