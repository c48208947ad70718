//! メインアプリケーションコンポーネント
//!
//! 画面は3相（入力・解析中・結果）。各セクションは常にマウントしておき、
//! `hidden` クラスで切り替える（レンダラーが結果欄のスロットへ直接束縛するため）。

use gloo::timers::callback::Interval;
use leptos::ev::SubmitEvent;
use leptos::html;
use leptos::prelude::*;
use store_assess_common::form::STEP_LABELS;
use store_assess_common::{
    collect_form_data, submit, ExportKind, FormPayload, ReportConfig, StepProgress, StepTicker,
    SubmitOutcome, SubmitView,
};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{FormData, HtmlFormElement};

use crate::api::evaluate::FetchEvaluator;
use crate::components::{
    assessment_form::AssessmentForm,
    export_buttons::ExportButtons,
    header::Header,
    loading_overlay::LoadingOverlay,
    report_template::ReportTemplate,
};
use crate::export::{export_report, failure_message};
use crate::render::ReportRenderer;

/// 画面の相
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Editing,
    Loading,
    Result,
}

/// 送信フローから操作される画面
struct PageView {
    form: HtmlFormElement,
    set_phase: WriteSignal<Phase>,
}

impl SubmitView for PageView {
    fn check_validity(&self) -> bool {
        if self.form.check_validity() {
            return true;
        }
        self.form.report_validity();
        false
    }

    fn show_loading(&self) {
        self.set_phase.set(Phase::Loading);
    }

    fn restore_form(&self) {
        self.set_phase.set(Phase::Editing);
    }

    fn show_result(&self) {
        self.set_phase.set(Phase::Result);
    }

    fn alert(&self, message: &str) {
        gloo::dialogs::alert(message);
    }
}

/// 進捗ステップのタイマー
struct IntervalTicker(Interval);

impl IntervalTicker {
    fn start(millis: u32, tick: impl FnMut() + 'static) -> Self {
        Self(Interval::new(millis, tick))
    }
}

impl StepTicker for IntervalTicker {
    fn cancel(self) {
        let _ = self.0.cancel();
    }
}

/// フォームの全フィールドを読む
fn read_form(form: &HtmlFormElement) -> Result<FormPayload, JsValue> {
    let data = FormData::new_with_form(form)?;
    let mut fields = Vec::new();

    for entry in data.entries() {
        let pair: js_sys::Array = entry?.dyn_into()?;
        if let (Some(key), Some(value)) = (pair.get(0).as_string(), pair.get(1).as_string()) {
            fields.push((key, value));
        }
    }

    Ok(collect_form_data(fields))
}

/// メインアプリケーションコンポーネント
#[component]
pub fn App() -> impl IntoView {
    let config = ReportConfig::default();
    let step_interval = config.step_interval_ms;
    let endpoint = StoredValue::new(config.endpoint.clone());

    let (phase, set_phase) = signal(Phase::Editing);
    let industry = RwSignal::new(String::new());
    let progress = RwSignal::new(StepProgress::new(STEP_LABELS.len()));
    let exporting = RwSignal::new(None::<ExportKind>);
    let form_ref = NodeRef::<html::Form>::new();
    let renderer = StoredValue::new_local(ReportRenderer::new(config));

    // 送信ハンドラ
    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();

        let Some(form) = form_ref.get() else {
            return;
        };
        let payload = match read_form(&form) {
            Ok(payload) => payload,
            Err(e) => {
                console_error!("Form read failed: {:?}", e);
                return;
            }
        };

        progress.update(StepProgress::reset);
        let evaluator = FetchEvaluator::new(endpoint.get_value());

        spawn_local(async move {
            let view = PageView { form, set_phase };
            let outcome = submit(&view, &evaluator, &payload, || {
                IntervalTicker::start(step_interval, move || progress.update(StepProgress::advance))
            })
            .await;

            match outcome {
                SubmitOutcome::Completed(data) => renderer.with_value(|r| r.render(&data)),
                SubmitOutcome::Failed(message) | SubmitOutcome::Rejected(message) => {
                    console_error!("Evaluate failed: {}", message);
                }
                SubmitOutcome::Invalid => {}
            }
        });
    };

    // 出力ハンドラ（出力中は受け付けない）
    let on_export = move |kind: ExportKind| {
        if exporting.get_untracked().is_some() {
            return;
        }
        exporting.set(Some(kind));

        spawn_local(async move {
            let config = renderer.with_value(|r| r.config().clone());
            let result = export_report(kind, &config).await;
            exporting.set(None);

            if let Err(e) = result {
                console_error!("{}", e);
                gloo::dialogs::alert(failure_message(kind));
            }
        });
    };

    // リセットハンドラ
    let on_reset = move |_: ()| {
        if let Some(form) = form_ref.get() {
            form.reset();
        }
        industry.set(String::new());
        progress.update(StepProgress::reset);
        renderer.with_value(ReportRenderer::clear);
        set_phase.set(Phase::Editing);
    };

    view! {
        <div class="container">
            <Header />

            <AssessmentForm
                form_ref=form_ref
                phase=phase
                industry=industry
                on_submit=on_submit
            />

            <LoadingOverlay
                phase=phase
                progress=progress.read_only()
                exporting=exporting.read_only()
            />

            <section
                id="resultSection"
                class="result-section"
                class:hidden=move || phase.get() != Phase::Result
            >
                <ExportButtons
                    exporting=exporting.read_only()
                    on_export=on_export
                    on_reset=on_reset
                />
                <ReportTemplate />
            </section>
        </div>
    }
}
