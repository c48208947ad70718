//! エクスポートボタンコンポーネント

use leptos::prelude::*;
use store_assess_common::ExportKind;

#[component]
pub fn ExportButtons<FE, FR>(
    exporting: ReadSignal<Option<ExportKind>>,
    on_export: FE,
    on_reset: FR,
) -> impl IntoView
where
    FE: Fn(ExportKind) + 'static + Clone,
    FR: Fn(()) + 'static + Clone,
{
    let button = move |kind: ExportKind| {
        let on_export = on_export.clone();
        view! {
            <button
                class="btn btn-primary js-download-pdf"
                disabled=move || exporting.get().is_some()
                on:click=move |_| on_export(kind)
            >
                {move || if exporting.get() == Some(kind) { "處理中..." } else { kind.label() }}
            </button>
        }
    };

    view! {
        <div class="export-buttons">
            {button(ExportKind::Pdf)}
            {button(ExportKind::Png)}
            <button
                id="btnReset"
                class="btn btn-secondary"
                disabled=move || exporting.get().is_some()
                on:click={
                    let on_reset = on_reset.clone();
                    move |_| on_reset(())
                }
            >
                "重新評估"
            </button>
        </div>
    }
}
