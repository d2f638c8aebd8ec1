use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use compact_str::CompactString;

use super::TreeAction;
use crate::models::{FileId, Folder, ParentRef, WorkspaceError, WorkspaceTree};

pub struct DispatchResult {
    /// 新建文件时返回其 id
    pub file: Option<FileId>,
}

#[derive(Debug, Clone)]
pub struct WorkspaceSnapshot {
    pub version: u64,
    pub roots: Vec<Folder>,
}

#[derive(Debug, Default)]
struct StoreInner {
    tree: WorkspaceTree,
    version: u64,
}

/// 多个会话共享的工作区句柄：写操作串行，读者总是看到完整的修改前或修改后状态
#[derive(Debug, Clone, Default)]
pub struct WorkspaceStore {
    inner: Arc<RwLock<StoreInner>>,
}

impl WorkspaceStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 接管一棵现成的树；先检查每个文件夹内的文件 id 不重复
    pub fn with_tree(tree: WorkspaceTree) -> Result<Self, WorkspaceError> {
        tree.validate()?;
        Ok(Self {
            inner: Arc::new(RwLock::new(StoreInner { tree, version: 0 })),
        })
    }

    fn read_guard(&self) -> RwLockReadGuard<'_, StoreInner> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_guard(&self) -> RwLockWriteGuard<'_, StoreInner> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn version(&self) -> u64 {
        self.read_guard().version
    }

    pub fn snapshot(&self) -> WorkspaceSnapshot {
        let inner = self.read_guard();
        WorkspaceSnapshot {
            version: inner.version,
            roots: inner.tree.list_roots().to_vec(),
        }
    }

    pub fn read<R>(&self, f: impl FnOnce(&WorkspaceTree) -> R) -> R {
        f(&self.read_guard().tree)
    }

    /// 与 `read` 相同，同时返回同一把读锁下的版本号
    pub fn read_versioned<R>(&self, f: impl FnOnce(&WorkspaceTree) -> R) -> (u64, R) {
        let inner = self.read_guard();
        (inner.version, f(&inner.tree))
    }

    pub fn dispatch(&self, action: TreeAction) -> Result<DispatchResult, WorkspaceError> {
        let label = action.label();
        let mut inner = self.write_guard();
        let tree = &mut inner.tree;

        let result = match action {
            TreeAction::CreateRootFolder { name } => tree.create_root_folder(&name).map(|_| None),
            TreeAction::CreateFolder { parent, name } => {
                tree.create_folder(&parent, &name).map(|_| None)
            }
            TreeAction::CreateFile {
                parent,
                name,
                content,
            } => tree.create_file(&parent, &name, content).map(Some),
            TreeAction::InsertTemplates { parent, templates } => {
                tree.insert_templates(&parent, &templates).map(|_| None)
            }
            TreeAction::UpdateFileContent { id, content } => {
                tree.update_file_content(id, content).map(|_| None)
            }
            TreeAction::RemoveFolder { name } => tree.remove_folder(&name).map(|_| None),
            TreeAction::RemoveFile { id } => tree.remove_file(id).map(|_| None),
        };

        match result {
            Ok(file) => {
                inner.version = inner.version.wrapping_add(1);
                tracing::debug!(action = label, version = inner.version, "workspace updated");
                Ok(DispatchResult { file })
            }
            Err(err) => {
                tracing::debug!(action = label, error = %err, "workspace action rejected");
                Err(err)
            }
        }
    }

    /// UI 侧的新建文件夹请求：父文件夹按名在全树查找
    pub fn create_folder(&self, parent_name: &str, folder_name: &str) -> Result<(), WorkspaceError> {
        self.dispatch(TreeAction::CreateFolder {
            parent: ParentRef::Named(parent_name.into()),
            name: folder_name.into(),
        })
        .map(|_| ())
    }

    pub fn create_file(&self, parent_name: &str, file_name: &str) -> Result<FileId, WorkspaceError> {
        let result = self.dispatch(TreeAction::CreateFile {
            parent: ParentRef::Named(parent_name.into()),
            name: file_name.into(),
            content: String::new(),
        })?;
        result
            .file
            .ok_or_else(|| WorkspaceError::FileNotFound(CompactString::from(file_name)))
    }

    /// `file_id` 是渲染层拿到的字符串形式（`file-<n>`）
    pub fn update_file_content(&self, file_id: &str, content: String) -> Result<(), WorkspaceError> {
        let id: FileId = file_id
            .parse()
            .map_err(|_| WorkspaceError::FileNotFound(file_id.into()))?;
        self.dispatch(TreeAction::UpdateFileContent { id, content })
            .map(|_| ())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/store.rs"]
mod tests;
