//! ヘッダーコンポーネント
//!
//! PDF出力時は `.app-header` ごと複製されて先頭に付く。

use leptos::prelude::*;

#[component]
pub fn Header() -> impl IntoView {
    view! {
        <header class="app-header">
            <img class="brand-logo" src="/static/brand_assets/pdf_logo.png" alt="StarBridge Media" />
            <div class="header-title">
                <h1>"店面選址評估報告"</h1>
                <p class="header-subtitle">"AI 商圈大數據分析"</p>
            </div>
        </header>
    }
}
