//! 評估APIクライアント（reqwest）

use crate::error::{AssessError, Result};
use std::time::Duration;
use store_assess_common::{Error, EvaluationResult, Evaluator, FormPayload};

/// HTTP経由の Evaluator
pub struct HttpEvaluator {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpEvaluator {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AssessError::Config(format!("HTTPクライアント作成失敗: {}", e)))?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl Evaluator for HttpEvaluator {
    /// HTTPステータスに関わらず本文を `EvaluationResult` として読む
    async fn evaluate(&self, payload: &FormPayload) -> store_assess_common::Result<EvaluationResult> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(payload)
            .send()
            .await
            .map_err(|e| Error::Http(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| Error::Http(e.to_string()))?;

        serde_json::from_str(&body)
            .map_err(|e| Error::Parse(format!("HTTP {} のレスポンスを解析できません: {}", status, e)))
    }
}
