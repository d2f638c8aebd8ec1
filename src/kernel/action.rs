use compact_str::CompactString;

use crate::models::{FileId, FolderTemplate, ParentRef};

/// 对工作区树的一次结构性修改；`WorkspaceStore::dispatch` 逐个原子地应用
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeAction {
    CreateRootFolder {
        name: CompactString,
    },
    CreateFolder {
        parent: ParentRef,
        name: CompactString,
    },
    CreateFile {
        parent: ParentRef,
        name: CompactString,
        content: String,
    },
    InsertTemplates {
        parent: ParentRef,
        templates: Vec<FolderTemplate>,
    },
    UpdateFileContent {
        id: FileId,
        content: String,
    },
    RemoveFolder {
        name: CompactString,
    },
    RemoveFile {
        id: FileId,
    },
}

impl TreeAction {
    pub fn label(&self) -> &'static str {
        match self {
            TreeAction::CreateRootFolder { .. } => "create_root_folder",
            TreeAction::CreateFolder { .. } => "create_folder",
            TreeAction::CreateFile { .. } => "create_file",
            TreeAction::InsertTemplates { .. } => "insert_templates",
            TreeAction::UpdateFileContent { .. } => "update_file_content",
            TreeAction::RemoveFolder { .. } => "remove_folder",
            TreeAction::RemoveFile { .. } => "remove_file",
        }
    }
}
