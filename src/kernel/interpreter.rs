//! 命令解释器
//!
//! 本地模式在 `WorkspaceStore` 上模拟命令；远程模式把整行交给
//! `RemoteExecutionBridge`，本地树不做修改，只请求前端刷新。

use std::sync::Arc;
use std::time::Duration;

use compact_str::CompactString;

use super::effect::Effect;
use super::scaffold;
use super::store::WorkspaceStore;
use super::terminal::WorkingPath;
use super::TreeAction;
use crate::core::ShellCommand;
use crate::kernel::services::ports::{ExecError, ExecRequest, RemoteExecutionBridge};
use crate::models::{ParentRef, WorkspaceError};

pub const NOT_IN_FOLDER: &str = "Not inside a folder: run cd <folder_name> first";
pub const DEFAULT_REMOTE_TIMEOUT: Duration = Duration::from_secs(30);

/// 一次求值的输出：按顺序追加到记录的行，以及交给会话/前端的副作用
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Evaluation {
    pub lines: Vec<String>,
    pub effects: Vec<Effect>,
}

impl Evaluation {
    fn line(line: impl Into<String>) -> Self {
        Self {
            lines: vec![line.into()],
            effects: Vec::new(),
        }
    }

    fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }
}

#[derive(Clone)]
enum ExecutionMode {
    Local,
    Remote {
        bridge: Arc<dyn RemoteExecutionBridge>,
        timeout: Duration,
    },
}

impl std::fmt::Debug for ExecutionMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExecutionMode::Local => f.write_str("Local"),
            ExecutionMode::Remote { bridge, timeout } => f
                .debug_struct("Remote")
                .field("bridge", &bridge.name())
                .field("timeout", timeout)
                .finish(),
        }
    }
}

/// 解释器本身无状态；工作路径由调用方传入，变化通过 `Effect::ChangeDirectory` 返回
#[derive(Debug, Clone)]
pub struct CommandInterpreter {
    store: WorkspaceStore,
    mode: ExecutionMode,
}

impl CommandInterpreter {
    pub fn local(store: WorkspaceStore) -> Self {
        Self {
            store,
            mode: ExecutionMode::Local,
        }
    }

    pub fn remote(
        store: WorkspaceStore,
        bridge: Arc<dyn RemoteExecutionBridge>,
        timeout: Duration,
    ) -> Self {
        Self {
            store,
            mode: ExecutionMode::Remote { bridge, timeout },
        }
    }

    pub fn store(&self) -> &WorkspaceStore {
        &self.store
    }

    pub async fn evaluate(&self, line: &str, cwd: &WorkingPath) -> Evaluation {
        match &self.mode {
            ExecutionMode::Local => self.evaluate_local(line, cwd),
            ExecutionMode::Remote { bridge, timeout } => {
                evaluate_remote(bridge.as_ref(), *timeout, line, cwd).await
            }
        }
    }

    pub fn evaluate_local(&self, line: &str, cwd: &WorkingPath) -> Evaluation {
        let command = ShellCommand::parse(line);
        match command {
            ShellCommand::Empty => Evaluation::default(),
            ShellCommand::ChangeDir { name: Some(name) } => self.change_dir(&name, cwd),
            ShellCommand::MakeDir { name: Some(name) } => self.apply(
                TreeAction::CreateRootFolder { name: name.clone() },
                format!("Created directory: {name}"),
            ),
            ShellCommand::NpmInstall {
                package: Some(package),
            } => match current_folder(cwd) {
                Some(parent) => self.apply(
                    TreeAction::CreateFile {
                        parent,
                        name: package.clone(),
                        content: String::new(),
                    },
                    format!("Installed package {package}"),
                ),
                None => Evaluation::line(NOT_IN_FOLDER),
            },
            ShellCommand::CreateReactApp { app: Some(app) } => {
                let Some(parent) = current_folder(cwd) else {
                    return Evaluation::line(NOT_IN_FOLDER);
                };
                match scaffold::react_app(&app) {
                    Ok(templates) => self.apply(
                        TreeAction::InsertTemplates { parent, templates },
                        format!("Created React app: {app}"),
                    ),
                    Err(err) => {
                        tracing::warn!(app = %app, error = %err, "failed to render package.json");
                        Evaluation::line(format!("Error: {err}"))
                    }
                }
            }
            ShellCommand::Java { file: Some(file) } => self.run_java(&file),
            ShellCommand::Unknown(line) => {
                Evaluation::line(format!("Command not recognized: {line}"))
            }
            missing => match missing.usage() {
                Some(usage) => Evaluation::line(usage),
                None => Evaluation::default(),
            },
        }
    }

    /// 文件夹名在全树查找，而不是相对当前路径；路径只是简单拼接
    fn change_dir(&self, name: &str, cwd: &WorkingPath) -> Evaluation {
        let exists = self.store.read(|tree| tree.find_folder(name).is_some());
        if !exists {
            return Evaluation::line(format!("Folder not found: {name}"));
        }
        Evaluation::line(format!("Changed directory to {name}"))
            .with_effect(Effect::ChangeDirectory(cwd.join(name)))
    }

    fn run_java(&self, file: &str) -> Evaluation {
        let found =
            file.ends_with(".java") && self.store.read(|tree| tree.find_file_by_name(file).is_some());
        if !found {
            return Evaluation::line(format!("File not found: {file}"));
        }
        Evaluation {
            lines: vec![
                format!("Running {file}..."),
                format!("Output of {file}: Hello World!"),
            ],
            effects: Vec::new(),
        }
    }

    fn apply(&self, action: TreeAction, success: String) -> Evaluation {
        match self.store.dispatch(action) {
            Ok(_) => Evaluation::line(success).with_effect(Effect::RefreshTree),
            Err(err) => Evaluation::line(describe(&err)),
        }
    }
}

/// `npm install` 和 `create-react-app` 作用于当前路径最后一段所命名的根文件夹
fn current_folder(cwd: &WorkingPath) -> Option<ParentRef> {
    cwd.last()
        .map(|segment| ParentRef::Root(CompactString::from(segment)))
}

fn describe(err: &WorkspaceError) -> String {
    match err {
        WorkspaceError::ParentNotFound(name) | WorkspaceError::FolderNotFound(name) => {
            format!("Folder not found: {name}")
        }
        WorkspaceError::FileNotFound(name) => format!("File not found: {name}"),
        WorkspaceError::NameExists(name) => format!("Already exists: {name}"),
        WorkspaceError::InvalidName(name) => format!("Invalid name: {name}"),
        WorkspaceError::DuplicateFileId { .. } => format!("Error: {err}"),
    }
}

async fn evaluate_remote(
    bridge: &dyn RemoteExecutionBridge,
    timeout: Duration,
    line: &str,
    cwd: &WorkingPath,
) -> Evaluation {
    let command = line.trim();
    if command.is_empty() {
        return Evaluation::default();
    }

    let request = ExecRequest {
        command: command.to_string(),
        current_directory: cwd.to_string(),
    };
    tracing::info!(
        bridge = bridge.name(),
        command = %request.command,
        cwd = %request.current_directory,
        "remote execute"
    );

    let result = match tokio::time::timeout(timeout, bridge.execute(request)).await {
        Ok(result) => result,
        Err(_) => Err(ExecError::Timeout(timeout)),
    };

    match result {
        Ok(output) => {
            let mut evaluation = Evaluation {
                lines: output.stdout.lines().map(str::to_string).collect(),
                effects: Vec::new(),
            };
            if let Some(dir) = output.new_directory.as_deref() {
                evaluation
                    .effects
                    .push(Effect::ChangeDirectory(WorkingPath::parse(dir)));
            }
            evaluation.with_effect(Effect::RefreshTree)
        }
        Err(err) => {
            tracing::warn!(bridge = bridge.name(), command, error = %err, "remote execute failed");
            Evaluation::line(format!("Error: {err}"))
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/interpreter.rs"]
mod tests;
