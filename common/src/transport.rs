//! 分類エンドポイントとの境界
//!
//! 実際のHTTP送信はバイナリ側が実装する。

use crate::error::TransportError;
use crate::form::SubmissionRequest;
use async_trait::async_trait;

/// 送信先から返ったレスポンス
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

impl TransportResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[async_trait]
pub trait ClassificationTransport: Send + Sync {
    /// テキストと添付を1リクエストで送る
    async fn send(&self, request: &SubmissionRequest) -> Result<TransportResponse, TransportError>;
}
