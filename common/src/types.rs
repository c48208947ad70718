//! 評估データの型定義
//!
//! CLIとWeb(WASM)で共有される型:
//! - FormPayload: フォーム入力（送信ボディ）
//! - EvaluationResult: `/api/evaluate` のレスポンス
//! - AssessmentData: レポート本体（`raw_data`）

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// フォーム入力のフラットなキー/値マップ
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormPayload(BTreeMap<String, String>);

impl FormPayload {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// 評估APIのレスポンス
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EvaluationResult {
    #[serde(default)]
    pub success: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    /// レポート本体。文字列化JSONや `{result: ...}` の入れ子もあり得るため生のまま保持
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_data: Option<serde_json::Value>,
}

/// レポート本体
///
/// 全フィールド省略可。型違いの値は「欠損」として扱い、デシリアライズは失敗しない。
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct AssessmentData {
    #[serde(deserialize_with = "lenient::number")]
    pub score: Option<f64>,
    #[serde(deserialize_with = "lenient::number")]
    pub daily_revenue: Option<f64>,
    #[serde(deserialize_with = "lenient::number")]
    pub turnover_rate: Option<f64>,
    #[serde(deserialize_with = "lenient::number")]
    pub rent: Option<f64>,
    #[serde(deserialize_with = "lenient::number")]
    pub return_period_months: Option<f64>,
    #[serde(deserialize_with = "lenient::number")]
    pub est_daily_traffic: Option<f64>,
    #[serde(deserialize_with = "lenient::number")]
    pub lat: Option<f64>,
    #[serde(deserialize_with = "lenient::number")]
    pub lng: Option<f64>,

    #[serde(deserialize_with = "lenient::text")]
    pub google_maps_key: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub target_audience: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub location_type: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub radar_comment: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub user_target: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub user_hours: Option<String>,

    #[serde(deserialize_with = "lenient::text")]
    pub summary_text: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub summary: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub population_body: Option<String>,   // 人口
    #[serde(deserialize_with = "lenient::text")]
    pub rent_body: Option<String>,         // 租金
    #[serde(deserialize_with = "lenient::text")]
    pub competition_body: Option<String>,  // 競爭
    #[serde(deserialize_with = "lenient::text")]
    pub function_body: Option<String>,     // 生活機能
    #[serde(deserialize_with = "lenient::text")]
    pub space_body: Option<String>,        // 空間規劃
    #[serde(deserialize_with = "lenient::text")]
    pub financial_body: Option<String>,    // 財務
    #[serde(deserialize_with = "lenient::text")]
    pub marketing_body: Option<String>,    // 行銷
    #[serde(deserialize_with = "lenient::text")]
    pub conclusion_text: Option<String>,   // 結論

    #[serde(deserialize_with = "lenient::text")]
    pub cost_data_csv: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub age_data_csv: Option<String>,
}

impl AssessmentData {
    /// 出典抽出の対象となる本文フィールド（出現順の基準）
    pub fn narrative_fields_mut(&mut self) -> [&mut Option<String>; 10] {
        [
            &mut self.population_body,
            &mut self.rent_body,
            &mut self.competition_body,
            &mut self.function_body,
            &mut self.space_body,
            &mut self.financial_body,
            &mut self.marketing_body,
            &mut self.conclusion_text,
            &mut self.summary_text,
            &mut self.summary,
        ]
    }
}

/// 寛容なフィールド変換
mod lenient {
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    /// 数値、またはカンマ区切りの数値文字列
    pub fn number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        let parsed = match value {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.replace(',', "").trim().parse::<f64>().ok(),
            _ => None,
        };
        Ok(parsed.filter(|v| v.is_finite()))
    }

    /// 空でない文字列。数値は文字列化する
    pub fn text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(match value {
            Value::String(s) if !s.is_empty() => Some(s),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        })
    }
}
