//! HTTP 传输：`POST <endpoint>/execute`
//!
//! 请求体 `{command, currentDirectory}`；成功返回 `{output, newDirectory?}`，
//! 失败返回非 2xx 与 `{error}`。

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::kernel::services::ports::{ExecError, ExecOutput, ExecRequest, RemoteExecutionBridge};

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ExecResponse {
    #[serde(default)]
    output: Option<String>,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    new_directory: Option<String>,
}

pub struct HttpExecutionBridge {
    client: Client,
    url: String,
}

impl HttpExecutionBridge {
    pub fn new(endpoint: &str) -> Result<Self, ExecError> {
        let client = Client::builder()
            .user_agent("wsterm")
            .build()
            .map_err(|e| ExecError::Transport(format!("failed to create HTTP client: {e}")))?;
        Ok(Self::with_client(client, endpoint))
    }

    pub fn with_client(client: Client, endpoint: &str) -> Self {
        Self {
            client,
            url: format!("{}/execute", endpoint.trim_end_matches('/')),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl RemoteExecutionBridge for HttpExecutionBridge {
    fn name(&self) -> &'static str {
        "http"
    }

    async fn execute(&self, request: ExecRequest) -> Result<ExecOutput, ExecError> {
        let response = self
            .client
            .post(&self.url)
            .json(&request)
            .send()
            .await
            .map_err(|e| ExecError::Transport(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| ExecError::Transport(e.to_string()))?;
        let parsed = serde_json::from_str::<ExecResponse>(&text);

        if !status.is_success() {
            let message = parsed
                .ok()
                .and_then(|body| body.error)
                .unwrap_or_else(|| format!("request failed with status {status}"));
            return Err(ExecError::Remote(message));
        }

        let body =
            parsed.map_err(|e| ExecError::Transport(format!("invalid response body: {e}")))?;
        if let Some(error) = body.error {
            return Err(ExecError::Remote(error));
        }

        Ok(ExecOutput {
            stdout: body.output.unwrap_or_default(),
            new_directory: body.new_directory,
        })
    }
}

#[cfg(test)]
#[path = "../../../../tests/unit/kernel/services/adapters/http_bridge.rs"]
mod tests;
