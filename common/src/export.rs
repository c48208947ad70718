//! Export settings shared by the browser snapshot pipeline.
//!
//! html2pdf / html2canvas options and the style overrides applied to the
//! off-screen clone before conversion.

use crate::config::ReportConfig;
use serde::Serialize;

/// 出力形式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportKind {
    Pdf,
    Png,
}

impl ExportKind {
    pub fn filename<'a>(&self, config: &'a ReportConfig) -> &'a str {
        match self {
            ExportKind::Pdf => &config.pdf_filename,
            ExportKind::Png => &config.png_filename,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ExportKind::Pdf => "下載 PDF 報告",
            ExportKind::Png => "下載圖片",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ImageOptions {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub quality: f32,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CaptureOptions {
    pub scale: u32,
    #[serde(rename = "useCORS")]
    pub use_cors: bool,
    pub scroll_x: i32,
    pub scroll_y: i32,
    pub width: u32,
    pub window_width: u32,
    pub background_color: &'static str,
}

impl CaptureOptions {
    pub fn for_width(width: u32) -> Self {
        Self {
            scale: 2,
            use_cors: true,
            scroll_x: 0,
            scroll_y: 0,
            width,
            window_width: width,
            background_color: "#ffffff",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct JsPdfOptions {
    pub unit: &'static str,
    pub format: &'static str,
    pub orientation: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct PageBreakOptions {
    pub mode: Vec<&'static str>,
    pub avoid: Vec<&'static str>,
}

/// html2pdf に渡すオプション
#[derive(Debug, Clone, Serialize)]
pub struct PdfOptions {
    pub margin: [f32; 4],
    pub filename: String,
    pub image: ImageOptions,
    pub html2canvas: CaptureOptions,
    #[serde(rename = "jsPDF")]
    pub js_pdf: JsPdfOptions,
    pub pagebreak: PageBreakOptions,
}

impl PdfOptions {
    pub fn new(config: &ReportConfig) -> Self {
        Self {
            margin: [0.0; 4],
            filename: ExportKind::Pdf.filename(config).to_string(),
            image: ImageOptions {
                kind: "jpeg",
                quality: 0.98,
            },
            html2canvas: CaptureOptions::for_width(config.capture_width_px),
            js_pdf: JsPdfOptions {
                unit: "mm",
                format: "a4",
                orientation: "portrait",
            },
            pagebreak: PageBreakOptions {
                mode: vec!["css", "legacy"],
                avoid: vec![
                    "p", "h3", "h4", "li", "tr", ".analysis-item", ".card", ".metric-box", "img",
                ],
            },
        }
    }
}

/// html2canvas に渡すオプション（PNG出力）
#[derive(Debug, Clone, Serialize)]
pub struct PngOptions {
    pub filename: String,
    pub html2canvas: CaptureOptions,
}

impl PngOptions {
    pub fn new(config: &ReportConfig) -> Self {
        Self {
            filename: ExportKind::Png.filename(config).to_string(),
            html2canvas: CaptureOptions::for_width(config.capture_width_px),
        }
    }
}

/// 改ページで分割させない要素（tagName）
pub const ATOMIC_TAGS: &[&str] = &["P", "H3", "H4", "H5", "LI", "TR"];

/// オフスクリーン容器のスタイル
pub fn wrapper_style(config: &ReportConfig) -> Vec<(&'static str, String)> {
    vec![
        ("position", "fixed".into()),
        ("top", "0".into()),
        ("left", "0".into()),
        ("width", format!("{}px", config.capture_width_px)),
        ("z-index", "-9999".into()),
        ("background-color", "#ffffff".into()),
    ]
}

/// キャンバスを置き換える画像のスタイル
pub const SNAPSHOT_IMAGE_STYLE: &[(&str, &str)] = &[
    ("width", "100%"),
    ("height", "auto"),
    ("display", "block"),
    ("max-width", "none"),
];

/// 1要素に適用するレイアウト上書き
///
/// - block/flex/grid は全幅のブロックフローに揃える
/// - flex-basis を持つ要素は伸縮を許す
/// - 段落・見出し・行は改ページで分割しない
pub fn layout_overrides(tag_name: &str, display: &str, flex_basis: &str) -> Vec<(&'static str, &'static str)> {
    let mut styles = Vec::new();

    if matches!(display, "block" | "flex" | "grid") {
        styles.extend([
            ("max-width", "none"),
            ("min-width", "100%"),
            ("width", "100%"),
            ("box-sizing", "border-box"),
            ("margin-left", "0"),
            ("margin-right", "0"),
        ]);
    }

    if !flex_basis.is_empty() && flex_basis != "auto" {
        styles.push(("flex", "1 1 auto"));
    }

    if ATOMIC_TAGS.contains(&tag_name.to_ascii_uppercase().as_str()) {
        styles.extend([
            ("page-break-inside", "avoid"),
            ("break-inside", "avoid"),
            ("display", "block"),
        ]);
    }

    styles
}
