//! レポート描画
//!
//! 表示モデルの束縛は即時、チャートは次のアニメーションフレームで描く。
//! チャートの生存インスタンスはこのレンダラーが持つ表で管理する。

pub mod binder;
pub mod charts;

use std::cell::RefCell;
use std::rc::Rc;

use gloo::render::{request_animation_frame, AnimationFrame};
use serde_json::Value;
use store_assess_common::{ChartRegistry, ReportConfig, ReportView};

use self::charts::ChartJs;

pub struct ReportRenderer {
    config: ReportConfig,
    charts: Rc<RefCell<ChartRegistry<ChartJs>>>,
    /// 予約中のチャート描画（差し替え・Dropで取り消し）
    frame: RefCell<Option<AnimationFrame>>,
}

impl ReportRenderer {
    pub fn new(config: ReportConfig) -> Self {
        Self {
            config,
            charts: Rc::new(RefCell::new(ChartRegistry::new(ChartJs))),
            frame: RefCell::new(None),
        }
    }

    /// 評估結果を描画する
    ///
    /// # Arguments
    /// * `input` - `raw_data`（オブジェクト、`{result: ...}`、または文字列化JSON）
    pub fn render(&self, input: &Value) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };

        let view = match ReportView::from_input(input, &self.config) {
            Ok(view) => view,
            Err(e) => {
                console_error!("JSON Parse Error: {}", e);
                self.clear();
                if let Err(e) = binder::show_parse_error(&document) {
                    console_error!("Error box failed: {:?}", e);
                }
                return;
            }
        };

        if let Err(e) = binder::apply(&document, &view) {
            console_error!("Binding failed: {:?}", e);
        }

        let charts = Rc::clone(&self.charts);
        let specs = view.charts;
        let frame = request_animation_frame(move |_| {
            for failure in charts.borrow_mut().draw(&specs) {
                console_error!("{} error: {}", failure.slot.canvas_id(), failure.error);
            }
        });
        self.frame.replace(Some(frame));
    }

    /// 予約中の描画を取り消し、全チャートを破棄
    pub fn clear(&self) {
        self.frame.replace(None);
        self.charts.borrow_mut().clear();
    }

    pub fn config(&self) -> &ReportConfig {
        &self.config
    }
}
