use thiserror::Error;

#[derive(Error, Debug)]
pub enum AssessError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("必須項目が未入力です: {0}")]
    MissingFields(String),

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("系統發生錯誤: {0}")]
    ApiCall(String),

    #[error("報告生成失敗: {0}")]
    Rejected(String),

    #[error("レポートエラー: {0}")]
    Report(#[from] store_assess_common::Error),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, AssessError>;
