//! 評估フォームコンポーネント
//!
//! 業種「其他」を選んだときだけ自由入力欄を表示・必須化する。

use leptos::ev::SubmitEvent;
use leptos::html;
use leptos::prelude::*;
use store_assess_common::form::{INDUSTRY_FIELD, INDUSTRY_OPTIONS, INDUSTRY_OTHER_FIELD};
use store_assess_common::other_industry_field_state;

use crate::app::Phase;

#[component]
pub fn AssessmentForm<F>(
    form_ref: NodeRef<html::Form>,
    phase: ReadSignal<Phase>,
    industry: RwSignal<String>,
    on_submit: F,
) -> impl IntoView
where
    F: Fn(SubmitEvent) + 'static,
{
    let other_state = move || other_industry_field_state(&industry.get());

    view! {
        <form
            id="assessmentForm"
            class="assessment-form"
            node_ref=form_ref
            class:hidden=move || phase.get() != Phase::Editing
            on:submit=on_submit
        >
            <div class="form-grid">
                <div class="form-group">
                    <label for="email">"電子郵件"</label>
                    <input type="email" id="email" name="email" required placeholder="name@example.com" />
                </div>

                <div class="form-group full-width">
                    <label for="address">"店面地址"</label>
                    <input type="text" id="address" name="address" required placeholder="例：台北市大安區忠孝東路四段1號" />
                </div>

                <div class="form-group">
                    <label for=INDUSTRY_FIELD>"產業類別"</label>
                    <select
                        id=INDUSTRY_FIELD
                        name=INDUSTRY_FIELD
                        required
                        prop:value=move || industry.get()
                        on:change=move |ev| industry.set(event_target_value(&ev))
                    >
                        <option value="" disabled>"請選擇產業"</option>
                        {INDUSTRY_OPTIONS
                            .iter()
                            .map(|option| view! { <option value=*option>{*option}</option> })
                            .collect_view()}
                    </select>
                    <input
                        type="text"
                        id=INDUSTRY_OTHER_FIELD
                        name=INDUSTRY_OTHER_FIELD
                        placeholder="請輸入產業類別"
                        class:hidden=move || !other_state().visible
                        prop:required=move || other_state().required
                    />
                </div>

                <div class="form-group">
                    <label for="areaSize">"店面坪數"</label>
                    <input type="number" id="areaSize" name="areaSize" min="1" placeholder="30" />
                </div>

                <div class="form-group">
                    <label for="avgConsumption">"平均客單價 (NT$)"</label>
                    <input type="number" id="avgConsumption" name="avgConsumption" min="0" placeholder="150" />
                </div>

                <div class="form-group">
                    <label for="targetCustomers">"目標客群"</label>
                    <input type="text" id="targetCustomers" name="targetCustomers" placeholder="上班族、學生" />
                </div>

                <div class="form-group">
                    <label for="businessHours">"營業時段"</label>
                    <input type="text" id="businessHours" name="businessHours" placeholder="10:00 - 21:00" />
                </div>
            </div>

            <div class="form-actions">
                <button type="submit" id="btnGenerateReport" class="btn btn-primary">
                    "生成評估報告"
                </button>
            </div>
        </form>
    }
}
