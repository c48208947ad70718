//! レポートのオフスクリーンスナップショット
//!
//! 表示中のレポートは変更せず、複製に対して:
//! 1. キャンバスを画像に置き換える（cloneNodeはcanvasの画素を複製しない）
//! 2. ヘッダーの複製を先頭に付ける
//! 3. 全幅ブロックフロー・改ページ禁止のスタイルを当てる
//!
//! 容器は `Snapshot` のDropで必ずDOMから取り除かれる。

use store_assess_common::export::{layout_overrides, wrapper_style, SNAPSHOT_IMAGE_STYLE};
use store_assess_common::ReportConfig;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlCanvasElement, HtmlElement, Window};

/// 複製元のレポート要素ID
pub const REPORT_ID: &str = "reportPreview";

/// 複製するヘッダー
pub const HEADER_SELECTOR: &str = ".app-header";

const EXPORT_CLASS: &str = "pdf-export-mode";

/// DOMに一時的に追加された容器
pub struct Snapshot {
    wrapper: HtmlElement,
}

impl Snapshot {
    pub fn build(window: &Window, document: &Document, config: &ReportConfig) -> Result<Self, JsValue> {
        let original = document
            .get_element_by_id(REPORT_ID)
            .ok_or_else(|| JsValue::from_str("report element not found"))?;
        let clone: HtmlElement = original.clone_node_with_deep(true)?.dyn_into()?;

        replace_canvases(document, &original, &clone)?;

        let wrapper: HtmlElement = document.create_element("div")?.dyn_into()?;
        for (name, value) in wrapper_style(config) {
            wrapper.style().set_property(name, &value)?;
        }

        if let Some(header) = document.query_selector(HEADER_SELECTOR)? {
            let header = clone_header(&header)?;
            wrapper.append_child(&header)?;
        }
        wrapper.append_child(&clone)?;

        let body = document
            .body()
            .ok_or_else(|| JsValue::from_str("document body not found"))?;
        body.append_child(&wrapper)?;

        // ここから先で失敗しても Drop で容器は除去される
        let snapshot = Self { wrapper };

        normalize_layout(window, &snapshot.wrapper)?;

        let style = clone.style();
        style.set_property("width", "100%")?;
        style.set_property("padding", "20px")?;
        style.set_property("margin", "0")?;
        clone.class_list().add_1(EXPORT_CLASS)?;

        Ok(snapshot)
    }

    pub fn element(&self) -> &HtmlElement {
        &self.wrapper
    }
}

impl Drop for Snapshot {
    fn drop(&mut self) {
        self.wrapper.remove();
    }
}

fn clone_header(header: &Element) -> Result<HtmlElement, JsValue> {
    let clone: HtmlElement = header.clone_node_with_deep(true)?.dyn_into()?;
    clone.class_list().add_1(EXPORT_CLASS)?;

    let style = clone.style();
    style.set_property("width", "100%")?;
    style.set_property("max-width", "none")?;
    style.set_property("margin", "0 0 20px 0")?;
    style.set_property("padding", "10px 20px")?;
    style.set_property("box-shadow", "none")?;

    if let Some(logo) = clone.query_selector("img")? {
        if let Some(logo) = logo.dyn_ref::<HtmlElement>() {
            logo.style().set_property("height", "50px")?;
            logo.style().set_property("width", "auto")?;
        }
    }

    Ok(clone)
}

/// 複製側のcanvasを、元canvasの画像に順番通り置き換える
fn replace_canvases(document: &Document, original: &Element, clone: &Element) -> Result<(), JsValue> {
    let live = original.query_selector_all("canvas")?;
    let copies = clone.query_selector_all("canvas")?;

    for index in 0..live.length().min(copies.length()) {
        let (Some(source), Some(target)) = (live.item(index), copies.item(index)) else {
            continue;
        };
        if let Err(e) = replace_canvas(document, &source, &target) {
            console_error!("Chart snapshot failed: {:?}", e);
        }
    }
    Ok(())
}

fn replace_canvas(document: &Document, source: &web_sys::Node, target: &web_sys::Node) -> Result<(), JsValue> {
    let canvas: &HtmlCanvasElement = source
        .dyn_ref()
        .ok_or_else(|| JsValue::from_str("not a canvas"))?;
    let data_url = canvas.to_data_url_with_type("image/png")?;

    let image: HtmlElement = document.create_element("img")?.dyn_into()?;
    image.set_attribute("src", &data_url)?;
    for (name, value) in SNAPSHOT_IMAGE_STYLE {
        image.style().set_property(name, value)?;
    }

    if let Some(parent) = target.parent_node() {
        parent.replace_child(&image, target)?;
    }
    Ok(())
}

/// 容器内の全要素にレイアウト上書きを当てる
fn normalize_layout(window: &Window, wrapper: &HtmlElement) -> Result<(), JsValue> {
    let nodes = wrapper.query_selector_all("*")?;

    for index in 0..nodes.length() {
        let Some(element) = nodes.item(index).and_then(|n| n.dyn_into::<HtmlElement>().ok()) else {
            continue;
        };
        let Some(computed) = window.get_computed_style(&element)? else {
            continue;
        };
        let display = computed.get_property_value("display")?;
        let flex_basis = computed.get_property_value("flex-basis")?;

        for (name, value) in layout_overrides(&element.tag_name(), &display, &flex_basis) {
            element.style().set_property(name, value)?;
        }
    }
    Ok(())
}

#[cfg(all(target_arch = "wasm32", test))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn setup(document: &Document) -> (Element, Element) {
        let header = document.create_element("header").unwrap();
        header.set_class_name("app-header");
        header.set_inner_html("<img src=\"logo.png\"><h1>店面選址評估報告</h1>");
        document.body().unwrap().append_child(&header).unwrap();

        let report = document.create_element("div").unwrap();
        report.set_id(REPORT_ID);
        report.set_inner_html("<p>段落</p><div class=\"chart\"><canvas width=\"10\" height=\"10\"></canvas></div>");
        document.body().unwrap().append_child(&report).unwrap();
        (header, report)
    }

    #[wasm_bindgen_test]
    fn wasm_snapshot_replaces_canvas_and_cleans_up() {
        let window = web_sys::window().unwrap();
        let document = window.document().unwrap();
        let (header, report) = setup(&document);
        let children_before = document.body().unwrap().child_element_count();

        {
            let snapshot = Snapshot::build(&window, &document, &ReportConfig::default()).unwrap();
            let element = snapshot.element();

            let first = element.first_element_child().unwrap();
            assert!(first.class_list().contains("app-header"));
            assert!(first.class_list().contains(EXPORT_CLASS));
            assert_eq!(element.child_element_count(), 2);

            assert!(element.query_selector("canvas").unwrap().is_none());
            let image = element.query_selector(".chart img").unwrap().unwrap();
            assert!(image.get_attribute("src").unwrap().starts_with("data:image/png"));

            let paragraph: HtmlElement = element.query_selector("p").unwrap().unwrap().dyn_into().unwrap();
            assert_eq!(paragraph.style().get_property_value("break-inside").unwrap(), "avoid");

            // 表示中のレポートは変更しない
            assert!(report.query_selector("canvas").unwrap().is_some());
            assert_eq!(document.body().unwrap().child_element_count(), children_before + 1);
        }

        assert_eq!(document.body().unwrap().child_element_count(), children_before);
        report.remove();
        header.remove();
    }
}
