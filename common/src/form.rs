//! 評估フォームの規則と送信フロー
//!
//! - 業種「其他」選択時のみ自由入力欄を表示・必須化し、値を差し替える
//! - 送信: 検証 → ローディング表示 → API呼び出し → 結果/エラー表示
//! - 進捗ステップのタイマーは応答・失敗のどちらでも必ず1回だけ止める

use crate::error::Result;
use crate::types::{EvaluationResult, FormPayload};
use std::future::Future;

pub const INDUSTRY_FIELD: &str = "industryType";
pub const INDUSTRY_OTHER_FIELD: &str = "industryTypeOther";

/// 「その他」業種の番兵値
pub const OTHER_INDUSTRY: &str = "其他";

/// 業種の選択肢
pub const INDUSTRY_OPTIONS: &[&str] = &["餐廳", "咖啡廳", "飲料店", "零售業", "服務業", OTHER_INDUSTRY];

/// 進捗ステップの表示名
pub const STEP_LABELS: &[&str] = &["定位店址座標", "分析商圈人口", "評估租金與競品", "生成專業報告"];

/// 自由入力欄の状態
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OtherFieldState {
    pub visible: bool,
    pub required: bool,
}

/// 業種選択に応じた自由入力欄の状態
pub fn other_industry_field_state(selected: &str) -> OtherFieldState {
    let is_other = selected == OTHER_INDUSTRY;
    OtherFieldState {
        visible: is_other,
        required: is_other,
    }
}

/// フォームの全フィールドからペイロードを作る
///
/// 業種が「其他」で自由入力が空白だけでなければ、業種を入力値そのままで置き換える。
pub fn collect_form_data<I, K, V>(fields: I) -> FormPayload
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    let mut payload = FormPayload::new();
    for (key, value) in fields {
        payload.insert(key, value);
    }

    if payload.get(INDUSTRY_FIELD) == Some(OTHER_INDUSTRY) {
        if let Some(other) = payload
            .get(INDUSTRY_OTHER_FIELD)
            .filter(|v| !v.trim().is_empty())
            .map(str::to_string)
        {
            payload.insert(INDUSTRY_FIELD, other);
        }
    }

    payload
}

/// 必須項目の定義
///
/// ブラウザでは `required` 属性で同じ規則を表現し、CLIではこちらで検証する。
#[derive(Debug, Clone)]
pub struct FormSchema {
    pub required: Vec<&'static str>,
}

impl Default for FormSchema {
    fn default() -> Self {
        Self {
            required: vec!["email", "address", INDUSTRY_FIELD],
        }
    }
}

impl FormSchema {
    /// 業種の選択値を考慮した必須項目
    pub fn required_fields(&self, selected_industry: &str) -> Vec<&'static str> {
        let mut fields = self.required.clone();
        if other_industry_field_state(selected_industry).required {
            fields.push(INDUSTRY_OTHER_FIELD);
        }
        fields
    }

    /// 未入力の必須項目を返す
    ///
    /// `raw` は差し替え前のフォーム値（業種は選択値のまま）。
    pub fn missing_fields(&self, raw: &FormPayload) -> Vec<&'static str> {
        let industry = raw.get(INDUSTRY_FIELD).unwrap_or_default();
        self.required_fields(industry)
            .into_iter()
            .filter(|field| raw.get(field).map(str::trim).unwrap_or_default().is_empty())
            .collect()
    }
}

// ============================================
// 進捗ステップ
// ============================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepState {
    Pending,
    Active,
    Done,
}

impl StepState {
    pub fn as_class(&self) -> &'static str {
        match self {
            StepState::Pending => "",
            StepState::Active => "active",
            StepState::Done => "active done",
        }
    }
}

/// 見かけ上の進捗（実際の通信完了とは無関係）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepProgress {
    states: Vec<StepState>,
    next: usize,
}

impl StepProgress {
    pub fn new(count: usize) -> Self {
        Self {
            states: vec![StepState::Pending; count],
            next: 0,
        }
    }

    /// 次のステップを開始し、直前のステップを完了にする。最後まで来たら何もしない
    pub fn advance(&mut self) {
        if self.next >= self.states.len() {
            return;
        }
        if self.next > 0 {
            self.states[self.next - 1] = StepState::Done;
        }
        self.states[self.next] = StepState::Active;
        self.next += 1;
    }

    pub fn reset(&mut self) {
        self.states.fill(StepState::Pending);
        self.next = 0;
    }

    pub fn states(&self) -> &[StepState] {
        &self.states
    }

    /// 進めた回数
    pub fn advanced(&self) -> usize {
        self.next
    }
}

// ============================================
// 送信フロー
// ============================================

/// 評估APIの呼び出し
pub trait Evaluator {
    fn evaluate(&self, payload: &FormPayload) -> impl Future<Output = Result<EvaluationResult>>;
}

/// 送信中に操作する画面
pub trait SubmitView {
    /// ブラウザ標準の検証。失敗時は検証UIを表示して `false`
    fn check_validity(&self) -> bool;
    /// フォームを隠してローディングを表示
    fn show_loading(&self);
    /// フォームを表示してローディングを隠す
    fn restore_form(&self);
    /// ローディングを隠して結果欄を表示
    fn show_result(&self);
    fn alert(&self, message: &str);
}

/// 進捗タイマーのハンドル
pub trait StepTicker {
    fn cancel(self);
}

/// タイマーを1回だけ止めるガード（Future破棄時もDropで止まる）
struct TickerGuard<T: StepTicker>(Option<T>);

impl<T: StepTicker> TickerGuard<T> {
    fn cancel(&mut self) {
        if let Some(ticker) = self.0.take() {
            ticker.cancel();
        }
    }
}

impl<T: StepTicker> Drop for TickerGuard<T> {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// 送信結果
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// 検証失敗（通信なし）
    Invalid,
    /// 通信・パース失敗
    Failed(String),
    /// APIが `success: false` を返した
    Rejected(String),
    /// 成功。レポート描画に渡すデータ（`raw_data` が無ければ空オブジェクト）
    Completed(serde_json::Value),
}

/// フォーム送信
///
/// 検証に通らなければ通信しない。応答を待つ間だけ `start_ticker` のタイマーを動かし、
/// どの経路でも結果を画面に出す前に止める。
pub async fn submit<V, E, T, F>(
    view: &V,
    evaluator: &E,
    payload: &FormPayload,
    start_ticker: F,
) -> SubmitOutcome
where
    V: SubmitView,
    E: Evaluator,
    T: StepTicker,
    F: FnOnce() -> T,
{
    if !view.check_validity() {
        return SubmitOutcome::Invalid;
    }

    view.show_loading();
    let mut ticker = TickerGuard(Some(start_ticker()));

    let response = evaluator.evaluate(payload).await;
    ticker.cancel();

    match response {
        Err(e) => {
            let message = e.to_string();
            view.alert(&format!("系統發生錯誤: {}", message));
            view.restore_form();
            SubmitOutcome::Failed(message)
        }
        Ok(result) if !result.success => {
            let message = result.message.unwrap_or_default();
            view.alert(&format!("報告生成失敗: {}", message));
            view.restore_form();
            SubmitOutcome::Rejected(message)
        }
        Ok(result) => {
            view.show_result();
            SubmitOutcome::Completed(
                result
                    .raw_data
                    .unwrap_or_else(|| serde_json::Value::Object(Default::default())),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use futures::executor::block_on;
    use serde_json::json;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    // =============================================
    // 業種ルール
    // =============================================

    #[test]
    fn test_other_field_shown_only_for_sentinel() {
        assert_eq!(
            other_industry_field_state("其他"),
            OtherFieldState { visible: true, required: true }
        );
        for option in ["餐廳", "咖啡廳", "零售業", ""] {
            assert_eq!(
                other_industry_field_state(option),
                OtherFieldState { visible: false, required: false }
            );
        }
    }

    #[test]
    fn test_collect_substitutes_other_industry() {
        let payload = collect_form_data([
            ("address", "台北市大安區"),
            ("industryType", "其他"),
            ("industryTypeOther", "寵物美容"),
        ]);
        assert_eq!(payload.get("industryType"), Some("寵物美容"));
        assert_eq!(payload.get("address"), Some("台北市大安區"));
    }

    #[test]
    fn test_collect_never_substitutes_for_regular_industry() {
        for industry in ["餐廳", "咖啡廳", "飲料店", "零售業", "服務業"] {
            let payload = collect_form_data([
                ("industryType", industry),
                ("industryTypeOther", "寵物美容"),
            ]);
            assert_eq!(payload.get("industryType"), Some(industry));
        }
    }

    #[test]
    fn test_collect_substitutes_override_as_entered() {
        let payload = collect_form_data([("industryType", "其他"), ("industryTypeOther", " 寵物美容 ")]);
        assert_eq!(payload.get("industryType"), Some(" 寵物美容 "));
    }

    #[test]
    fn test_collect_keeps_sentinel_when_override_blank() {
        let payload = collect_form_data([("industryType", "其他"), ("industryTypeOther", "  ")]);
        assert_eq!(payload.get("industryType"), Some("其他"));
    }

    #[test]
    fn test_required_fields_follow_industry() {
        let schema = FormSchema::default();
        assert!(!schema.required_fields("餐廳").contains(&INDUSTRY_OTHER_FIELD));
        assert!(schema.required_fields("其他").contains(&INDUSTRY_OTHER_FIELD));
    }

    #[test]
    fn test_missing_fields() {
        let schema = FormSchema::default();

        let mut raw = FormPayload::new();
        raw.insert("email", "owner@example.com");
        raw.insert("address", "台北市");
        raw.insert("industryType", "餐廳");
        assert!(schema.missing_fields(&raw).is_empty());

        raw.insert("industryType", "其他");
        assert_eq!(schema.missing_fields(&raw), vec![INDUSTRY_OTHER_FIELD]);

        raw.insert("industryTypeOther", "書店");
        raw.insert("address", " ");
        assert_eq!(schema.missing_fields(&raw), vec!["address"]);
    }

    // =============================================
    // 進捗ステップ
    // =============================================

    #[test]
    fn test_step_progress_advance() {
        let mut steps = StepProgress::new(3);
        assert_eq!(steps.states(), [StepState::Pending; 3]);

        steps.advance();
        assert_eq!(steps.states(), [StepState::Active, StepState::Pending, StepState::Pending]);

        steps.advance();
        steps.advance();
        assert_eq!(steps.states(), [StepState::Done, StepState::Done, StepState::Active]);

        // 最後のステップはアクティブのまま
        steps.advance();
        assert_eq!(steps.advanced(), 3);
        assert_eq!(steps.states()[2], StepState::Active);
    }

    #[test]
    fn test_step_progress_reset() {
        let mut steps = StepProgress::new(4);
        steps.advance();
        steps.advance();
        steps.reset();
        assert_eq!(steps.states(), [StepState::Pending; 4]);
        assert_eq!(steps.advanced(), 0);
    }

    // =============================================
    // 送信フロー
    // =============================================

    #[derive(Default)]
    struct FakeView {
        valid: bool,
        form_visible: Cell<bool>,
        loading_visible: Cell<bool>,
        result_visible: Cell<bool>,
        alerts: RefCell<Vec<String>>,
    }

    impl FakeView {
        fn valid() -> Self {
            Self {
                valid: true,
                form_visible: Cell::new(true),
                ..Default::default()
            }
        }
    }

    impl SubmitView for FakeView {
        fn check_validity(&self) -> bool {
            self.valid
        }
        fn show_loading(&self) {
            self.form_visible.set(false);
            self.loading_visible.set(true);
        }
        fn restore_form(&self) {
            self.form_visible.set(true);
            self.loading_visible.set(false);
        }
        fn show_result(&self) {
            self.loading_visible.set(false);
            self.result_visible.set(true);
        }
        fn alert(&self, message: &str) {
            self.alerts.borrow_mut().push(message.to_string());
        }
    }

    struct FakeEvaluator {
        response: RefCell<Option<Result<EvaluationResult>>>,
        calls: Cell<usize>,
    }

    impl FakeEvaluator {
        fn new(response: Result<EvaluationResult>) -> Self {
            Self {
                response: RefCell::new(Some(response)),
                calls: Cell::new(0),
            }
        }
    }

    impl Evaluator for FakeEvaluator {
        fn evaluate(&self, _payload: &FormPayload) -> impl Future<Output = Result<EvaluationResult>> {
            self.calls.set(self.calls.get() + 1);
            let response = self.response.borrow_mut().take().expect("2回呼ばれた");
            async move { response }
        }
    }

    /// キャンセル回数を数えるタイマー
    struct CountingTicker {
        cancels: Rc<Cell<usize>>,
    }

    impl StepTicker for CountingTicker {
        fn cancel(self) {
            self.cancels.set(self.cancels.get() + 1);
        }
    }

    fn run(view: &FakeView, evaluator: &FakeEvaluator, cancels: &Rc<Cell<usize>>) -> SubmitOutcome {
        let payload = collect_form_data([("address", "台北市")]);
        let cancels = cancels.clone();
        block_on(submit(view, evaluator, &payload, move || CountingTicker { cancels }))
    }

    #[test]
    fn test_submit_invalid_skips_network() {
        let view = FakeView::default();
        let evaluator = FakeEvaluator::new(Ok(EvaluationResult::default()));
        let cancels = Rc::new(Cell::new(0));

        assert_eq!(run(&view, &evaluator, &cancels), SubmitOutcome::Invalid);
        assert_eq!(evaluator.calls.get(), 0);
        assert_eq!(cancels.get(), 0);
        assert!(!view.loading_visible.get());
    }

    #[test]
    fn test_submit_network_failure_restores_form_and_stops_timer() {
        let view = FakeView::valid();
        let evaluator = FakeEvaluator::new(Err(Error::Http("connection refused".into())));
        let cancels = Rc::new(Cell::new(0));

        let outcome = run(&view, &evaluator, &cancels);

        assert!(matches!(outcome, SubmitOutcome::Failed(_)));
        assert!(view.form_visible.get());
        assert!(!view.loading_visible.get());
        assert!(!view.result_visible.get());
        assert_eq!(cancels.get(), 1);
        assert!(view.alerts.borrow()[0].starts_with("系統發生錯誤"));
    }

    #[test]
    fn test_submit_rejected_surfaces_message() {
        let view = FakeView::valid();
        let evaluator = FakeEvaluator::new(Ok(EvaluationResult {
            success: false,
            message: Some("地址無法定位".into()),
            raw_data: None,
        }));
        let cancels = Rc::new(Cell::new(0));

        let outcome = run(&view, &evaluator, &cancels);

        assert_eq!(outcome, SubmitOutcome::Rejected("地址無法定位".into()));
        assert_eq!(view.alerts.borrow().as_slice(), ["報告生成失敗: 地址無法定位"]);
        assert!(view.form_visible.get());
        assert!(!view.loading_visible.get());
        assert_eq!(cancels.get(), 1);
    }

    #[test]
    fn test_submit_success_forwards_raw_data() {
        let view = FakeView::valid();
        let evaluator = FakeEvaluator::new(Ok(EvaluationResult {
            success: true,
            message: None,
            raw_data: Some(json!({"score": 7.8})),
        }));
        let cancels = Rc::new(Cell::new(0));

        let outcome = run(&view, &evaluator, &cancels);

        assert_eq!(outcome, SubmitOutcome::Completed(json!({"score": 7.8})));
        assert!(!view.form_visible.get());
        assert!(!view.loading_visible.get());
        assert!(view.result_visible.get());
        assert!(view.alerts.borrow().is_empty());
        assert_eq!(cancels.get(), 1);
    }

    #[test]
    fn test_submit_success_without_raw_data_renders_empty() {
        let view = FakeView::valid();
        let evaluator = FakeEvaluator::new(Ok(EvaluationResult {
            success: true,
            ..Default::default()
        }));
        let cancels = Rc::new(Cell::new(0));

        assert_eq!(run(&view, &evaluator, &cancels), SubmitOutcome::Completed(json!({})));
    }

    #[test]
    fn test_ticker_guard_cancels_on_drop() {
        let cancels = Rc::new(Cell::new(0));
        {
            let _guard = TickerGuard(Some(CountingTicker { cancels: cancels.clone() }));
        }
        assert_eq!(cancels.get(), 1);

        let mut guard = TickerGuard(Some(CountingTicker { cancels: cancels.clone() }));
        guard.cancel();
        drop(guard);
        assert_eq!(cancels.get(), 2);
    }
}
