//! エラー型定義

use thiserror::Error;

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("HTTP error: {0}")]
    Http(String),

    #[error("Chart error: {0}")]
    Chart(String),

    #[error("Export error: {0}")]
    Export(String),
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;
