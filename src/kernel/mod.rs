//! Headless core: workspace store, command interpreter and terminal sessions.

pub mod action;
pub mod effect;
pub mod explorer;
pub mod interpreter;
pub mod scaffold;
pub mod services;
pub mod store;
pub mod terminal;

pub use action::TreeAction;
pub use effect::Effect;
pub use explorer::ExplorerState;
pub use interpreter::{CommandInterpreter, Evaluation};
pub use store::{DispatchResult, WorkspaceSnapshot, WorkspaceStore};
pub use terminal::{InputState, SessionId, Submission, TerminalSession, Transcript, WorkingPath};
