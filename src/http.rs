//! 分類エンドポイントへのHTTP送信
//!
//! テキストは `texto`、添付は1件ずつ `arquivo` パートとして multipart で送る。

use crate::error::{AppError, Result};
use async_trait::async_trait;
use autoemail_common::{ClassificationTransport, SubmissionRequest, TransportError, TransportResponse};
use reqwest::multipart::{Form, Part};
use tracing::debug;

pub struct HttpTransport {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpTransport {
    pub fn new(endpoint: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| AppError::HttpClient(e.to_string()))?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

fn build_form(request: &SubmissionRequest) -> Form {
    let mut form = Form::new();
    if let Some(text) = &request.text {
        form = form.text("texto", text.clone());
    }
    for file in &request.files {
        let part = Part::bytes(file.bytes.clone()).file_name(file.name.clone());
        form = form.part("arquivo", part);
    }
    form
}

#[async_trait]
impl ClassificationTransport for HttpTransport {
    async fn send(
        &self,
        request: &SubmissionRequest,
    ) -> std::result::Result<TransportResponse, TransportError> {
        debug!(endpoint = %self.endpoint, files = request.files.len(), "POST");

        let response = self
            .client
            .post(&self.endpoint)
            .multipart(build_form(request))
            .send()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;

        debug!(status, bytes = body.len(), "レスポンス受信");
        Ok(TransportResponse::new(status, body))
    }
}
