//! 本机 shell 传输
//!
//! 每条命令都在 `root/<currentDirectory>` 下由 `sh -c` 执行，进程之间不共享状态。

use std::path::{Path, PathBuf};
use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;

use crate::kernel::services::ports::{ExecError, ExecOutput, ExecRequest, RemoteExecutionBridge};

pub struct ShellExecutionBridge {
    root: PathBuf,
}

impl ShellExecutionBridge {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn working_dir(&self, current_directory: &str) -> PathBuf {
        let relative = current_directory.trim_start_matches('/');
        if relative.is_empty() {
            self.root.clone()
        } else {
            self.root.join(relative)
        }
    }
}

fn shell_command(line: &str) -> Command {
    #[cfg(windows)]
    {
        let mut cmd = Command::new("cmd");
        cmd.arg("/C").arg(line);
        cmd
    }

    #[cfg(not(windows))]
    {
        let mut cmd = Command::new("sh");
        cmd.arg("-c").arg(line);
        cmd
    }
}

#[async_trait]
impl RemoteExecutionBridge for ShellExecutionBridge {
    fn name(&self) -> &'static str {
        "shell"
    }

    async fn execute(&self, request: ExecRequest) -> Result<ExecOutput, ExecError> {
        let cwd = self.working_dir(&request.current_directory);
        let output = shell_command(&request.command)
            .current_dir(&cwd)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| ExecError::Transport(format!("{}: {e}", cwd.display())))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim_end().to_string();
            let message = if stderr.is_empty() {
                format!("exited with {}", output.status)
            } else {
                stderr
            };
            return Err(ExecError::Remote(message));
        }

        Ok(ExecOutput::stdout(
            String::from_utf8_lossy(&output.stdout).into_owned(),
        ))
    }
}
