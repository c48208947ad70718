//! evaluate コマンド
//!
//! ブラウザと同じ送信フロー（`store_assess_common::submit`）を端末上で動かす。
//! 検証は `FormSchema`、進捗ステップは tokio のタスクで表示する。

use crate::error::{AssessError, Result};
use std::path::Path;
use std::time::Duration;
use store_assess_common::form::STEP_LABELS;
use store_assess_common::{
    collect_form_data, submit, Evaluator, FormPayload, FormSchema, ReportConfig, ReportView,
    StepProgress, StepTicker, SubmitOutcome, SubmitView,
};
use tokio::task::JoinHandle;

/// 端末上の「画面」
struct ConsoleView {
    missing: Vec<&'static str>,
    verbose: bool,
}

impl SubmitView for ConsoleView {
    fn check_validity(&self) -> bool {
        self.missing.is_empty()
    }

    fn show_loading(&self) {
        println!("[1/2] 評估中...");
    }

    fn restore_form(&self) {}

    fn show_result(&self) {
        println!("✔ 評估完了\n");
    }

    fn alert(&self, message: &str) {
        if self.verbose {
            eprintln!("✖ {}", message);
        }
    }
}

/// 一定間隔で進捗ステップを表示するタスク
pub struct ProgressTicker(JoinHandle<()>);

impl ProgressTicker {
    pub fn start(period: Duration) -> Self {
        Self(tokio::spawn(async move {
            let mut progress = StepProgress::new(STEP_LABELS.len());
            let mut interval = tokio::time::interval(period);
            // 初回は即時に返るので読み捨てる
            interval.tick().await;

            loop {
                interval.tick().await;
                let index = progress.advanced();
                progress.advance();
                if progress.advanced() == index {
                    break;
                }
                println!("  - {}", STEP_LABELS[index]);
            }
        }))
    }
}

impl StepTicker for ProgressTicker {
    fn cancel(self) {
        self.0.abort();
    }
}

/// フォーム値を送信し、成功時は `raw_data` を保存して表示モデルを返す
///
/// # Arguments
/// * `evaluator` - 評估APIの呼び出し
/// * `fields` - フォーム項目（key, value）
/// * `output` - 保存先JSON
/// * `step_interval` - 進捗ステップの表示間隔
/// * `verbose` - エラー通知を標準エラーにも出す
pub async fn run<E: Evaluator>(
    evaluator: &E,
    fields: Vec<(String, String)>,
    output: &Path,
    step_interval: Duration,
    verbose: bool,
) -> Result<ReportView> {
    let mut raw = FormPayload::new();
    for (key, value) in &fields {
        raw.insert(key.as_str(), value.as_str());
    }

    let view = ConsoleView {
        missing: FormSchema::default().missing_fields(&raw),
        verbose,
    };
    let payload = collect_form_data(fields);

    if verbose {
        println!("送信内容: {}", serde_json::to_string(&payload)?);
    }

    let outcome = submit(&view, evaluator, &payload, || ProgressTicker::start(step_interval)).await;

    match outcome {
        SubmitOutcome::Invalid => Err(AssessError::MissingFields(view.missing.join(", "))),
        SubmitOutcome::Failed(message) => Err(AssessError::ApiCall(message)),
        SubmitOutcome::Rejected(message) => Err(AssessError::Rejected(message)),
        SubmitOutcome::Completed(data) => {
            println!("[2/2] 結果を保存中...");
            std::fs::write(output, serde_json::to_string_pretty(&data)?)?;
            println!("✔ 結果を保存: {}", output.display());

            Ok(ReportView::from_input(&data, &ReportConfig::default())?)
        }
    }
}
