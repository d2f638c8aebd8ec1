//! 核心抽象
//!
//! - ShellCommand: 命令行解析结果
//! - Keystroke: 终端输入事件

pub mod command;
pub mod event;

pub use command::ShellCommand;
pub use event::Keystroke;
