//! Async runtime adapter: runs evaluations off the UI thread and sends results back.

mod message;
mod runtime;

pub use message::AppMessage;
pub use runtime::AsyncRuntime;
