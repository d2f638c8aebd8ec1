//! 远程执行桥的契约
//!
//! 一次调用对应一条命令：不重试、不退避。失败的命令可能已经部分生效，
//! 重复执行并不安全。

use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecRequest {
    pub command: String,
    pub current_directory: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecOutput {
    pub stdout: String,
    /// 后端报告的新工作目录（例如执行了 `cd`）
    pub new_directory: Option<String>,
}

impl ExecOutput {
    pub fn stdout(stdout: impl Into<String>) -> Self {
        Self {
            stdout: stdout.into(),
            new_directory: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExecError {
    /// 后端执行了命令但报告失败（非 2xx 或非零退出码）
    #[error("{0}")]
    Remote(String),
    /// 网络、进程启动或响应解析失败
    #[error("{0}")]
    Transport(String),
    #[error("command timed out after {}ms", .0.as_millis())]
    Timeout(Duration),
}

#[async_trait]
pub trait RemoteExecutionBridge: Send + Sync {
    fn name(&self) -> &'static str;

    async fn execute(&self, request: ExecRequest) -> Result<ExecOutput, ExecError>;
}
