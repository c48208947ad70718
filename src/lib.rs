//! 店面選址評估 CLI ライブラリ
//!
//! 評估APIの呼び出しと、保存済み結果のレポートプレビュー。
//! 正規化・表示モデルは `store-assess-common` と共有する。

pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod evaluate;
pub mod preview;
