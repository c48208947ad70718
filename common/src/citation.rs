//! 出典マーカーの抽出
//!
//! 本文中の `[資料來源：...]` / `[資料來源:...]` を取り除き、
//! 出典を初出順・重複なしで集める。

use lazy_static::lazy_static;
use regex::{Captures, Regex};
use std::collections::HashSet;

lazy_static! {
    static ref CITATION_RE: Regex = Regex::new(r"\[?資料來源[：:]\s*(.*?)\]").unwrap();
}

/// 出典の収集器（1回のレンダリングで共有する）
#[derive(Debug, Clone, Default)]
pub struct SourceCollector {
    sources: Vec<String>,
    seen: HashSet<String>,
}

impl SourceCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// マーカーを除去した本文を返し、出典を記録する
    ///
    /// # Examples
    /// ```
    /// use store_assess_common::SourceCollector;
    ///
    /// let mut collector = SourceCollector::new();
    /// let text = collector.strip("人口穩定成長[資料來源：內政部]。");
    /// assert_eq!(text, "人口穩定成長。");
    /// assert_eq!(collector.sources(), ["內政部"]);
    /// ```
    pub fn strip(&mut self, text: &str) -> String {
        CITATION_RE
            .replace_all(text, |caps: &Captures| {
                if let Some(source) = caps.get(1) {
                    self.add(source.as_str().trim());
                }
                ""
            })
            .into_owned()
    }

    fn add(&mut self, source: &str) {
        if source.is_empty() || self.seen.contains(source) {
            return;
        }
        self.seen.insert(source.to_string());
        self.sources.push(source.to_string());
    }

    pub fn sources(&self) -> &[String] {
        &self.sources
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    pub fn into_sources(self) -> Vec<String> {
        self.sources
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_fullwidth_colon() {
        let mut collector = SourceCollector::new();
        let text = collector.strip("租金偏高[資料來源：591租屋網]，需留意。");
        assert_eq!(text, "租金偏高，需留意。");
        assert_eq!(collector.sources(), ["591租屋網"]);
    }

    #[test]
    fn test_strip_halfwidth_colon_and_spaces() {
        let mut collector = SourceCollector::new();
        let text = collector.strip("競品 12 家[資料來源:  Google Maps ]");
        assert_eq!(text, "競品 12 家");
        assert_eq!(collector.sources(), ["Google Maps"]);
    }

    #[test]
    fn test_dedup_across_fields_first_appearance_order() {
        let mut collector = SourceCollector::new();
        collector.strip("A[資料來源：內政部]B[資料來源：實價登錄]");
        collector.strip("C[資料來源：實價登錄]D[資料來源：內政部]E[資料來源：捷運公司]");

        assert_eq!(collector.sources(), ["內政部", "實價登錄", "捷運公司"]);
    }

    #[test]
    fn test_text_without_marker_unchanged() {
        let mut collector = SourceCollector::new();
        let text = collector.strip("沒有出處的段落\n第二行");
        assert_eq!(text, "沒有出處的段落\n第二行");
        assert!(collector.is_empty());
    }

    #[test]
    fn test_empty_source_not_collected() {
        let mut collector = SourceCollector::new();
        let text = collector.strip("段落[資料來源：]");
        assert_eq!(text, "段落");
        assert!(collector.is_empty());
    }

    #[test]
    fn test_marker_does_not_span_lines() {
        let mut collector = SourceCollector::new();
        let text = collector.strip("[資料來源：內政部\n第二行]");
        assert_eq!(text, "[資料來源：內政部\n第二行]");
        assert!(collector.is_empty());
    }
}
