//! チャート定義とインスタンス管理
//!
//! - ChartSpec: Chart.js にそのまま渡せる設定（JSON）
//! - build_charts: AssessmentData から5種のチャート設定を組み立てる
//! - ChartRegistry: スロットごとに生存インスタンスを1つに保つ（破棄してから再生成）

use crate::config::ReportConfig;
use crate::error::{Error, Result};
use crate::series::parse_csv_series;
use crate::types::AssessmentData;
use serde::Serialize;
use serde_json::{json, Map, Value};
use std::collections::BTreeMap;

/// チャートを描くキャンバスのスロット
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum ChartSlot {
    Score,
    Radar,
    Finance,
    Cost,
    Age,
}

impl ChartSlot {
    pub const ALL: [ChartSlot; 5] = [
        ChartSlot::Score,
        ChartSlot::Radar,
        ChartSlot::Finance,
        ChartSlot::Cost,
        ChartSlot::Age,
    ];

    /// テンプレート上のcanvas要素ID
    pub fn canvas_id(&self) -> &'static str {
        match self {
            ChartSlot::Score => "scoreChart",
            ChartSlot::Radar => "radarChart",
            ChartSlot::Finance => "financeChart",
            ChartSlot::Cost => "costChart",
            ChartSlot::Age => "ageChart",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Doughnut,
    Radar,
    Bar,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dataset {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub data: Vec<f64>,
    /// 色・枠線などの見た目（Chart.jsのdatasetキーをそのまま展開）
    #[serde(flatten)]
    pub style: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
}

/// 1枚のチャート設定
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    #[serde(skip)]
    pub slot: ChartSlot,
    #[serde(rename = "type")]
    pub kind: ChartKind,
    pub data: ChartData,
    pub options: Value,
}

impl ChartSpec {
    /// 先頭データセットの値
    pub fn values(&self) -> &[f64] {
        self.data.datasets.first().map(|d| d.data.as_slice()).unwrap_or(&[])
    }

    /// Chart.js設定のJSON文字列
    pub fn to_config_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

// ============================================
// データセット計算
// ============================================

/// スコアゲージ `[score, 10 - score]`
pub fn score_gauge(score: f64) -> [f64; 2] {
    [score, 10.0 - score]
}

/// 商圏五力レーダー: floor(score) にオフセットを加え [0, 10] に収める
pub fn radar_profile(score: f64, offsets: &[i32; 5]) -> [f64; 5] {
    let base = score.floor();
    offsets.map(|offset| (base + f64::from(offset)).clamp(0.0, 10.0))
}

/// 収支バー `[日営収 × 30, 租金]`
pub fn finance_bars(daily_revenue: f64, rent: f64) -> [f64; 2] {
    [daily_revenue * 30.0, rent]
}

/// 収支バーに使う租金（未入力・下限未満は既定値）
pub fn finance_rent(rent: Option<f64>, config: &ReportConfig) -> f64 {
    match rent {
        Some(rent) if rent >= config.rent_floor => rent,
        _ => config.rent_default,
    }
}

fn labels(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn style(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}

fn common_options() -> Value {
    json!({
        "responsive": true,
        "maintainAspectRatio": false,
        "plugins": {
            "legend": { "position": "bottom", "labels": { "color": "#666", "font": { "size": 12 } } },
            "datalabels": { "display": false }
        }
    })
}

/// 全チャートの設定を組み立てる
pub fn build_charts(data: &AssessmentData, config: &ReportConfig) -> Vec<ChartSpec> {
    let score = data.score.unwrap_or(0.0);

    let gauge = ChartSpec {
        slot: ChartSlot::Score,
        kind: ChartKind::Doughnut,
        data: ChartData {
            labels: labels(&["Score", "Remaining"]),
            datasets: vec![Dataset {
                label: None,
                data: score_gauge(score).to_vec(),
                style: style(json!({
                    "backgroundColor": ["#ff7e33", "#eee"],
                    "borderWidth": 0,
                    "cutout": "90%"
                })),
            }],
        },
        options: json!({
            "responsive": true,
            "maintainAspectRatio": false,
            "rotation": -90,
            "circumference": 360,
            "plugins": { "legend": { "display": false }, "tooltip": { "enabled": false } }
        }),
    };

    let mut radar_options = common_options();
    radar_options["scales"] = json!({
        "r": {
            "angleLines": { "color": "#eee" },
            "grid": { "color": "#eee" },
            "pointLabels": { "font": { "size": 12 }, "color": "#333" },
            "suggestedMin": 0,
            "suggestedMax": 10
        }
    });
    let radar = ChartSpec {
        slot: ChartSlot::Radar,
        kind: ChartKind::Radar,
        data: ChartData {
            labels: labels(&["人流潛力", "交通便利", "競品狀況", "生活機能", "未來發展"]),
            datasets: vec![Dataset {
                label: Some("商圈五力分析".into()),
                data: radar_profile(score, &config.radar_offsets).to_vec(),
                style: style(json!({
                    "backgroundColor": "rgba(255, 126, 51, 0.2)",
                    "borderColor": "#ff7e33",
                    "pointBackgroundColor": "#ff7e33",
                    "pointBorderColor": "#fff"
                })),
            }],
        },
        options: radar_options,
    };

    let finance = ChartSpec {
        slot: ChartSlot::Finance,
        kind: ChartKind::Bar,
        data: ChartData {
            labels: labels(&["預估月營收", "月租金成本"]),
            datasets: vec![Dataset {
                label: Some("金額 (TWD)".into()),
                data: finance_bars(
                    data.daily_revenue.unwrap_or(0.0),
                    finance_rent(data.rent, config),
                )
                .to_vec(),
                style: style(json!({
                    "backgroundColor": ["#2ecc71", "#e74c3c"],
                    "borderRadius": 6
                })),
            }],
        },
        options: common_options(),
    };

    let mut cost_options = common_options();
    cost_options["plugins"]["datalabels"] = json!({
        "display": true,
        "color": "#fff",
        "font": { "weight": "bold", "size": 14 },
        "suffix": "%"
    });
    let cost = ChartSpec {
        slot: ChartSlot::Cost,
        kind: ChartKind::Doughnut,
        data: ChartData {
            labels: labels(&["食材成本", "人事成本", "租金及其他", "淨利"]),
            datasets: vec![Dataset {
                label: None,
                data: parse_csv_series(data.cost_data_csv.as_deref(), &config.cost_default),
                style: style(json!({
                    "backgroundColor": ["#3498db", "#f1c40f", "#e67e22", "#2ecc71"],
                    "borderWidth": 0
                })),
            }],
        },
        options: cost_options,
    };

    let mut age_options = common_options();
    age_options["scales"] = json!({
        "y": { "display": false },
        "x": { "grid": { "display": false }, "ticks": { "color": "#666" } }
    });
    let age = ChartSpec {
        slot: ChartSlot::Age,
        kind: ChartKind::Bar,
        data: ChartData {
            labels: labels(&["0-15", "16-25", "26-35", "36-45", "46-55", "56-65", "65+"]),
            datasets: vec![Dataset {
                label: Some("佔比 (%)".into()),
                data: parse_csv_series(data.age_data_csv.as_deref(), &config.age_default),
                style: style(json!({
                    "backgroundColor": "#ff7e33",
                    "borderRadius": 4
                })),
            }],
        },
        options: age_options,
    };

    vec![gauge, radar, finance, cost, age]
}

// ============================================
// インスタンス管理
// ============================================

/// チャート描画の実装（ブラウザではChart.js）
pub trait ChartBackend {
    type Handle;

    /// スロットのキャンバスにチャートを生成する。キャンバスが無ければ `Ok(None)`
    fn create(&mut self, spec: &ChartSpec) -> Result<Option<Self::Handle>>;

    fn destroy(&mut self, handle: Self::Handle);
}

/// 描画に失敗したチャート
#[derive(Debug)]
pub struct ChartFailure {
    pub slot: ChartSlot,
    pub error: Error,
}

/// スロット → 生存チャートの表
pub struct ChartRegistry<B: ChartBackend> {
    backend: B,
    live: BTreeMap<ChartSlot, B::Handle>,
}

impl<B: ChartBackend> ChartRegistry<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            live: BTreeMap::new(),
        }
    }

    /// 各スロットの旧インスタンスを破棄してから新しく描く
    ///
    /// 1枚の失敗は他のチャートに影響しない。失敗したスロットは空のまま残る。
    pub fn draw(&mut self, specs: &[ChartSpec]) -> Vec<ChartFailure> {
        let mut failures = Vec::new();

        for spec in specs {
            if let Some(old) = self.live.remove(&spec.slot) {
                self.backend.destroy(old);
            }

            match self.backend.create(spec) {
                Ok(Some(handle)) => {
                    self.live.insert(spec.slot, handle);
                }
                Ok(None) => {}
                Err(error) => failures.push(ChartFailure {
                    slot: spec.slot,
                    error,
                }),
            }
        }

        failures
    }

    /// 全インスタンスを破棄
    pub fn clear(&mut self) {
        for (_, handle) in std::mem::take(&mut self.live) {
            self.backend.destroy(handle);
        }
    }

    pub fn is_live(&self, slot: ChartSlot) -> bool {
        self.live.contains_key(&slot)
    }

    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }
}
