//! 表示モデルをテンプレートのスロットへ束縛する
//!
//! 値はすべて textContent で入れる（HTMLとして解釈させない）。
//! テンプレートに無いスロットは飛ばす。

use store_assess_common::report::{slots, PARSE_ERROR_MESSAGE};
use store_assess_common::{Binding, MapBinding, ReportView};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement};

/// パースエラー表示欄
pub const ERROR_BOX_ID: &str = "report-error";

/// レポート本体（エラー時は隠す）
pub const BODY_ID: &str = "report-body";

/// 表示モデルを全スロットへ反映
///
/// 同じモデルで何度呼んでも同じDOMになる。
pub fn apply(document: &Document, view: &ReportView) -> Result<(), JsValue> {
    show_report_body(document)?;

    for slot in &view.bindings {
        let Some(element) = document.get_element_by_id(slot.id) else {
            continue;
        };
        match &slot.content {
            Binding::Text(text) => element.set_text_content(Some(text.as_str())),
            Binding::Paragraphs(lines) => fill_paragraphs(document, &element, lines)?,
        }
    }

    apply_map(document, &view.map)?;
    apply_sources(document, &view.sources)?;
    Ok(())
}

/// パースエラー時: エラー欄だけを表示する
pub fn show_parse_error(document: &Document) -> Result<(), JsValue> {
    if let Some(error_box) = document.get_element_by_id(ERROR_BOX_ID) {
        error_box.set_text_content(Some(PARSE_ERROR_MESSAGE));
        set_visible(&error_box, true)?;
    }
    if let Some(body) = document.get_element_by_id(BODY_ID) {
        set_visible(&body, false)?;
    }
    Ok(())
}

fn show_report_body(document: &Document) -> Result<(), JsValue> {
    if let Some(error_box) = document.get_element_by_id(ERROR_BOX_ID) {
        error_box.set_text_content(None);
        set_visible(&error_box, false)?;
    }
    if let Some(body) = document.get_element_by_id(BODY_ID) {
        set_visible(&body, true)?;
    }
    Ok(())
}

/// 子要素を入れ替え、1行を1つの <p> にする
fn fill_paragraphs(document: &Document, element: &Element, lines: &[String]) -> Result<(), JsValue> {
    element.set_text_content(None);
    for line in lines {
        let paragraph = document.create_element("p")?;
        paragraph.set_text_content(Some(line.as_str()));
        element.append_child(&paragraph)?;
    }
    Ok(())
}

fn set_visible(element: &Element, visible: bool) -> Result<(), JsValue> {
    if let Some(element) = element.dyn_ref::<HtmlElement>() {
        element
            .style()
            .set_property("display", if visible { "block" } else { "none" })?;
    }
    Ok(())
}

fn apply_map(document: &Document, map: &MapBinding) -> Result<(), JsValue> {
    let image = document.get_element_by_id(slots::MAP_IMAGE);
    let placeholder = document.get_element_by_id(slots::MAP_PLACEHOLDER);

    match (map, image) {
        (MapBinding::Image(url), Some(image)) => {
            image.set_attribute("src", url)?;
            set_visible(&image, true)?;
            if let Some(placeholder) = placeholder {
                set_visible(&placeholder, false)?;
            }
        }
        (MapBinding::Image(_), None) => {}
        (MapBinding::Placeholder(text), image) => {
            if let Some(image) = image {
                image.remove_attribute("src")?;
                set_visible(&image, false)?;
            }
            if let Some(placeholder) = placeholder {
                placeholder.set_text_content(Some(text.as_str()));
                set_visible(&placeholder, true)?;
            }
        }
    }
    Ok(())
}

/// 出典リスト。1件も無ければ欄ごと隠す
fn apply_sources(document: &Document, sources: &[String]) -> Result<(), JsValue> {
    if let Some(list) = document.get_element_by_id(slots::SOURCES) {
        list.set_text_content(None);
        for source in sources {
            let item = document.create_element("li")?;
            item.set_text_content(Some(source.as_str()));
            list.append_child(&item)?;
        }
    }
    if let Some(section) = document.get_element_by_id(slots::SOURCES_SECTION) {
        set_visible(&section, !sources.is_empty())?;
    }
    Ok(())
}

#[cfg(all(target_arch = "wasm32", test))]
mod wasm_tests {
    use super::*;
    use serde_json::json;
    use store_assess_common::ReportConfig;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    const TEMPLATE: &str = r#"
        <div id="report-error"></div>
        <div id="report-body">
            <span id="val-score"></span>
            <img id="val-map-img">
            <div id="map-placeholder"></div>
            <div id="val-summary"></div>
            <span id="val-revenue"></span>
            <div id="val-pop-body"></div>
            <div id="val-rent-body"></div>
            <div id="source-section"><ul id="val-sources"></ul></div>
        </div>
    "#;

    fn mount(document: &Document) -> Element {
        let root = document.create_element("div").unwrap();
        root.set_inner_html(TEMPLATE);
        document.body().unwrap().append_child(&root).unwrap();
        root
    }

    fn text_of(document: &Document, id: &str) -> String {
        document.get_element_by_id(id).unwrap().text_content().unwrap_or_default()
    }

    fn display_of(document: &Document, id: &str) -> String {
        let element: HtmlElement = document.get_element_by_id(id).unwrap().dyn_into().unwrap();
        element.style().get_property_value("display").unwrap()
    }

    #[wasm_bindgen_test]
    fn wasm_apply_is_idempotent() {
        let document = web_sys::window().unwrap().document().unwrap();
        let root = mount(&document);

        let input = json!({
            "score": 7.8,
            "daily_revenue": 15000,
            "population_body": "第一行[資料來源：內政部]\n第二行",
            "rent_body": "租金偏高 資料來源：內政部]",
        });
        let view = ReportView::from_input(&input, &ReportConfig::default()).unwrap();

        apply(&document, &view).unwrap();
        let first = root.inner_html();
        apply(&document, &view).unwrap();

        assert_eq!(root.inner_html(), first, "2回目の束縛でDOMが変わった");
        assert_eq!(text_of(&document, "val-score"), "7.8");
        assert_eq!(text_of(&document, "val-revenue"), "NT$ 450,000");
        assert_eq!(document.get_element_by_id("val-pop-body").unwrap().child_element_count(), 2);
        assert_eq!(document.get_element_by_id("val-sources").unwrap().child_element_count(), 1);
        assert_eq!(display_of(&document, "source-section"), "block");
        assert_eq!(display_of(&document, "val-map-img"), "none");
        assert_eq!(text_of(&document, "map-placeholder"), "無地圖資料");

        root.remove();
    }

    #[wasm_bindgen_test]
    fn wasm_text_is_not_parsed_as_html() {
        let document = web_sys::window().unwrap().document().unwrap();
        let root = mount(&document);

        let input = json!({ "summary_text": "<b>粗體</b>" });
        let view = ReportView::from_input(&input, &ReportConfig::default()).unwrap();
        apply(&document, &view).unwrap();

        let summary = document.get_element_by_id("val-summary").unwrap();
        assert!(summary.query_selector("b").unwrap().is_none());
        assert_eq!(summary.text_content().unwrap(), "<b>粗體</b>");
        assert_eq!(display_of(&document, "source-section"), "none");

        root.remove();
    }

    #[wasm_bindgen_test]
    fn wasm_parse_error_hides_body() {
        let document = web_sys::window().unwrap().document().unwrap();
        let root = mount(&document);

        show_parse_error(&document).unwrap();
        assert_eq!(text_of(&document, ERROR_BOX_ID), PARSE_ERROR_MESSAGE);
        assert_eq!(display_of(&document, BODY_ID), "none");

        let view = ReportView::from_input(&json!({}), &ReportConfig::default()).unwrap();
        apply(&document, &view).unwrap();
        assert_eq!(display_of(&document, ERROR_BOX_ID), "none");
        assert_eq!(display_of(&document, BODY_ID), "block");

        root.remove();
    }
}
