//! ローディングオーバーレイ
//!
//! 解析中は進捗ステップ、出力中は出力メッセージだけを表示する。

use leptos::prelude::*;
use store_assess_common::form::STEP_LABELS;
use store_assess_common::{ExportKind, StepProgress};

use crate::app::Phase;
use crate::export::overlay_message;

/// 解析中の表示
pub const ANALYZING_MESSAGE: &str = "正在分析商圈大數據...";

#[component]
pub fn LoadingOverlay(
    phase: ReadSignal<Phase>,
    progress: ReadSignal<StepProgress>,
    exporting: ReadSignal<Option<ExportKind>>,
) -> impl IntoView {
    let visible = move || phase.get() == Phase::Loading || exporting.get().is_some();

    view! {
        <div id="loadingOverlay" class="loading-overlay" class:hidden=move || !visible()>
            <div class="spinner"></div>
            <p class="loading-text">
                {move || match exporting.get() {
                    Some(kind) => overlay_message(kind),
                    None => ANALYZING_MESSAGE,
                }}
            </p>
            <Show when=move || exporting.get().is_some()>
                <p class="loading-hint">"(請稍候 3 秒以確保圖表完整)"</p>
            </Show>
            <div class="loading-steps" class:hidden=move || exporting.get().is_some()>
                {move || {
                    progress.with(|p| {
                        p.states()
                            .iter()
                            .zip(STEP_LABELS.iter())
                            .map(|(state, label)| {
                                let class = match state.as_class() {
                                    "" => "step".to_string(),
                                    extra => format!("step {}", extra),
                                };
                                view! { <div class=class>{*label}</div> }
                            })
                            .collect_view()
                    })
                }}
            </div>
        </div>
    }
}
