//! レポートテンプレート
//!
//! 値はレンダラーがID単位で束縛する。ここでは空のスロットとcanvasを置くだけ。
//! スロットの中身はLeptosの管理外（子を持たせない）。

use leptos::prelude::*;
use store_assess_common::report::{slots, METRIC_LABELS, SECTION_TITLES};
use store_assess_common::ChartSlot;

use crate::export::snapshot::REPORT_ID;
use crate::render::binder::{BODY_ID, ERROR_BOX_ID};

#[component]
pub fn ReportTemplate() -> impl IntoView {
    let chart = |slot: ChartSlot, title: &'static str| {
        view! {
            <div class="card chart-card">
                <h4>{title}</h4>
                <div class="chart-box">
                    <canvas id=slot.canvas_id()></canvas>
                </div>
            </div>
        }
    };

    view! {
        <div id=REPORT_ID class="dashboard-container">
            <div id=ERROR_BOX_ID class="error-box" style="display: none"></div>

            <div id=BODY_ID>
                <div class="dashboard-header">
                    <div class="score-card">
                        <div class="score-ring">
                            <canvas id=ChartSlot::Score.canvas_id()></canvas>
                            <span id=slots::SCORE class="number"></span>
                        </div>
                        <span class="label">"綜合評分"</span>
                    </div>
                    <div class="map-card">
                        <img id=slots::MAP_IMAGE alt="店址地圖" style="display: none" />
                        <div id=slots::MAP_PLACEHOLDER class="map-placeholder"></div>
                    </div>
                </div>

                <div class="card summary-card">
                    <h3>"AI 評估總結"</h3>
                    <div class="context-row">
                        <span>"目標客群："</span><span id=slots::USER_TARGET></span>
                        <span>"營業時段："</span><span id=slots::USER_HOURS></span>
                    </div>
                    <div id=slots::SUMMARY class="analysis-text"></div>
                </div>

                <div class="metrics-grid">
                    {METRIC_LABELS
                        .iter()
                        .map(|(id, label)| view! {
                            <div class="metric-box">
                                <div class="metric-label">{*label}</div>
                                <div id=*id class="metric-value"></div>
                            </div>
                        })
                        .collect_view()}
                </div>

                <div class="charts-grid">
                    <div class="card chart-card">
                        <h4>"商圈五力分析"</h4>
                        <div class="chart-box">
                            <canvas id=ChartSlot::Radar.canvas_id()></canvas>
                        </div>
                        <p id=slots::RADAR_COMMENT class="chart-comment"></p>
                    </div>
                    {chart(ChartSlot::Finance, "收支預估模型")}
                    {chart(ChartSlot::Cost, "成本結構佔比")}
                    {chart(ChartSlot::Age, "客群年齡分佈")}
                </div>

                <div class="analysis-grid">
                    {SECTION_TITLES
                        .iter()
                        .map(|(id, title)| view! {
                            <div class="analysis-card analysis-item full-width">
                                <h4>{*title}</h4>
                                <div id=*id class="analysis-text"></div>
                            </div>
                        })
                        .collect_view()}
                </div>

                <div id=slots::SOURCES_SECTION class="dashboard-footer source-section full-width" style="display: none">
                    <h4>"資料來源彙整"</h4>
                    <ul id=slots::SOURCES class="source-list"></ul>
                </div>

                <div class="report-disclaimer">
                    <p>"本報告由 AI 大數據系統自動生成，僅供商業決策參考，不保證獲利。"</p>
                </div>
            </div>
        </div>
    }
}
