use std::path::PathBuf;

use serde::{Deserialize, Serialize};

pub const DEFAULT_ENDPOINT: &str = "http://localhost:5000";
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;
pub const DEFAULT_WELCOME: &str = "Welcome to the terminal!";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub bridge: BridgeSettings,
    #[serde(default)]
    pub terminal: TerminalSettings,
    #[serde(default)]
    pub workspace: WorkspaceSettings,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BridgeMode {
    /// 在本地工作区树上模拟命令
    #[default]
    Local,
    /// 通过 HTTP 把命令交给远程后端
    Http,
    /// 在本机 shell 中执行
    Shell,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BridgeSettings {
    #[serde(default)]
    pub mode: BridgeMode,
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shell_root: Option<PathBuf>,
}

impl Default for BridgeSettings {
    fn default() -> Self {
        Self {
            mode: BridgeMode::Local,
            endpoint: default_endpoint(),
            timeout_ms: default_timeout_ms(),
            shell_root: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TerminalSettings {
    #[serde(default = "default_welcome")]
    pub welcome: Option<String>,
}

impl Default for TerminalSettings {
    fn default() -> Self {
        Self {
            welcome: default_welcome(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorkspaceSettings {
    /// 启动时创建的根文件夹
    #[serde(default)]
    pub seed_folders: Vec<String>,
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_timeout_ms() -> u64 {
    DEFAULT_TIMEOUT_MS
}

fn default_welcome() -> Option<String> {
    Some(DEFAULT_WELCOME.to_string())
}

#[cfg(test)]
#[path = "../../../../tests/unit/kernel/services/ports/settings.rs"]
mod tests;
