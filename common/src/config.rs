//! レポート・フォーム設定
//!
//! 画面側とCLIで共有する固定値。レーダーのオフセットや既定系列は
//! 業務式ではなく表示用の目安値なので、ここで差し替えられるようにしておく。

/// レポート生成の設定
#[derive(Debug, Clone, PartialEq)]
pub struct ReportConfig {
    /// 評估APIのパス
    pub endpoint: String,
    /// 進捗ステップを進める間隔（ミリ秒）
    pub step_interval_ms: u32,
    /// エクスポート前にチャートの再描画を待つ時間（ミリ秒）
    pub export_settle_ms: u32,
    /// レーダーチャート5軸のオフセット（floor(score)基準）
    pub radar_offsets: [i32; 5],
    /// 租金が無い・小さすぎる場合の収支バー用の租金
    pub rent_default: f64,
    /// これ未満の租金は未入力とみなす
    pub rent_floor: f64,
    /// 成本結構の既定値
    pub cost_default: Vec<f64>,
    /// 年齡分佈の既定値
    pub age_default: Vec<f64>,
    pub pdf_filename: String,
    pub png_filename: String,
    /// スナップショットのキャプチャ幅（px）
    pub capture_width_px: u32,
    pub map_zoom: u8,
    pub map_size: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            endpoint: "/api/evaluate".into(),
            step_interval_ms: 1500,
            export_settle_ms: 3000,
            radar_offsets: [1, 2, -1, 0, 1],
            rent_default: 3000.0,
            rent_floor: 100.0,
            cost_default: vec![25.0, 25.0, 35.0, 15.0],
            age_default: vec![5.0, 15.0, 30.0, 25.0, 15.0, 5.0, 5.0],
            pdf_filename: "Star_Bridge_Assessment.pdf".into(),
            png_filename: "Star_Bridge_Assessment.png".into(),
            capture_width_px: 1120,
            map_zoom: 15,
            map_size: "800x400".into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_constants() {
        let config = ReportConfig::default();
        assert_eq!(config.endpoint, "/api/evaluate");
        assert_eq!(config.step_interval_ms, 1500);
        assert_eq!(config.radar_offsets, [1, 2, -1, 0, 1]);
        assert_eq!(config.rent_default, 3000.0);
        assert_eq!(config.cost_default.len(), 4);
        assert_eq!(config.age_default.len(), 7);
    }
}
