//! Service adapters: OS/runtime specific implementations (IO/async).

pub mod http_bridge;
pub mod paths;
pub mod runtime;
pub mod settings;
pub mod shell_bridge;

pub use http_bridge::HttpExecutionBridge;
pub use paths::{ensure_log_dir, get_cache_dir, get_log_dir};
pub use runtime::{AppMessage, AsyncRuntime};
pub use settings::{ensure_settings_file, get_settings_path, load_settings, load_settings_from};
pub use shell_bridge::ShellExecutionBridge;
