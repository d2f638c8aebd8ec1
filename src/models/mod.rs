//! 数据模型层

pub mod file_id;
pub mod workspace_tree;

pub use file_id::{FileId, FileIdGenerator};
pub use workspace_tree::{
    validate_name, File, Folder, FolderTemplate, NodeKind, ParentRef, TreeRow, WorkspaceError,
    WorkspaceTree,
};
