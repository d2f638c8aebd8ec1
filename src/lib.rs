//! wsterm - 终端命令驱动的工作区模拟
//!
//! 模块结构：
//! - core: 命令解析与按键事件
//! - models: 工作区树（文件夹、文件、id 生成）
//! - kernel: 共享 store、解释器、终端会话、资源管理器状态，以及服务层（ports + adapters）
//! - line_mode: 标准输入逐行运行的前端
//! - tui: crossterm + ratatui 前端（feature `tui`）

pub mod core;
pub mod kernel;
pub mod line_mode;
pub mod models;
#[cfg(feature = "tui")]
pub mod tui;
