//! Service ports: traits + data contracts.

pub mod exec;
pub mod settings;

pub use exec::{ExecError, ExecOutput, ExecRequest, RemoteExecutionBridge};
pub use settings::{BridgeMode, BridgeSettings, Settings, TerminalSettings, WorkspaceSettings};
