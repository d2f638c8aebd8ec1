//! 工作区树数据模型
//!
//! 文件夹独占其子节点，没有父指针；所有结构性修改都经过 `WorkspaceTree`。
//! 按名查找是先序深度优先、返回第一个匹配，名字只在兄弟之间唯一。

use compact_str::CompactString;
use rustc_hash::FxHashSet;
use thiserror::Error;

use super::file_id::{FileId, FileIdGenerator};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WorkspaceError {
    #[error("parent folder not found: {0}")]
    ParentNotFound(CompactString),
    #[error("folder not found: {0}")]
    FolderNotFound(CompactString),
    #[error("file not found: {0}")]
    FileNotFound(CompactString),
    #[error("name already exists in parent: {0}")]
    NameExists(CompactString),
    #[error("invalid name: {0:?}")]
    InvalidName(CompactString),
    #[error("duplicate file id {id} in folder {folder}")]
    DuplicateFileId { folder: CompactString, id: FileId },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct File {
    id: FileId,
    name: CompactString,
    content: String,
}

impl File {
    pub fn new(id: FileId, name: impl Into<CompactString>, content: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            content: content.into(),
        }
    }

    pub fn id(&self) -> FileId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn content(&self) -> &str {
        &self.content
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Folder {
    name: CompactString,
    files: Vec<File>,
    folders: Vec<Folder>,
}

impl Folder {
    pub fn new(name: impl Into<CompactString>) -> Self {
        Self {
            name: name.into(),
            files: Vec::new(),
            folders: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn files(&self) -> &[File] {
        &self.files
    }

    pub fn folders(&self) -> &[Folder] {
        &self.folders
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty() && self.folders.is_empty()
    }

    /// 文件和子文件夹共用一个命名空间
    pub fn has_child_named(&self, name: &str) -> bool {
        self.files.iter().any(|f| f.name == name) || self.folders.iter().any(|f| f.name == name)
    }

    fn visit_ids(&self, out: &mut Vec<FileId>) {
        out.extend(self.files.iter().map(|f| f.id));
        for child in &self.folders {
            child.visit_ids(out);
        }
    }
}

/// 父文件夹的定位方式
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParentRef {
    /// 全树先序查找，取第一个匹配
    Named(CompactString),
    /// 只在根层查找
    Root(CompactString),
}

impl ParentRef {
    pub fn name(&self) -> &str {
        match self {
            ParentRef::Named(name) | ParentRef::Root(name) => name,
        }
    }
}

/// 一次性插入的子树模板（文件 id 在插入时分配）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FolderTemplate {
    pub name: CompactString,
    pub files: Vec<(CompactString, String)>,
}

impl FolderTemplate {
    pub fn empty(name: impl Into<CompactString>) -> Self {
        Self {
            name: name.into(),
            files: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    File,
    Dir,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeRow {
    pub depth: u16,
    pub name: CompactString,
    pub kind: NodeKind,
    /// 文件夹的路径键（`a/b/c`），文件为其所在文件夹的路径
    pub path: CompactString,
    pub file: Option<FileId>,
    pub is_expanded: bool,
}

#[derive(Debug, Clone, Default)]
pub struct WorkspaceTree {
    roots: Vec<Folder>,
    ids: FileIdGenerator,
}

impl WorkspaceTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// 由手工组装的根列表建树；生成器会跳过已有 id
    pub fn from_roots(roots: Vec<Folder>) -> Self {
        let mut ids = FileIdGenerator::new();
        let mut seen = Vec::new();
        for root in &roots {
            root.visit_ids(&mut seen);
        }
        for id in seen {
            ids.observe(id);
        }
        Self { roots, ids }
    }

    pub fn list_roots(&self) -> &[Folder] {
        &self.roots
    }

    pub fn find_folder(&self, name: &str) -> Option<&Folder> {
        find_in(&self.roots, name)
    }

    pub fn find_root(&self, name: &str) -> Option<&Folder> {
        self.roots.iter().find(|f| f.name == name)
    }

    pub fn find_file(&self, id: FileId) -> Option<&File> {
        find_file_in(&self.roots, id)
    }

    pub fn find_file_by_name(&self, name: &str) -> Option<&File> {
        find_file_named(&self.roots, name)
    }

    pub fn create_root_folder(&mut self, name: &str) -> Result<(), WorkspaceError> {
        validate_name(name)?;
        if self.roots.iter().any(|f| f.name == name) {
            return Err(WorkspaceError::NameExists(name.into()));
        }
        self.roots.push(Folder::new(name));
        Ok(())
    }

    pub fn create_folder(&mut self, parent: &ParentRef, name: &str) -> Result<(), WorkspaceError> {
        validate_name(name)?;
        let folder = resolve_in(&mut self.roots, parent)?;
        if folder.has_child_named(name) {
            return Err(WorkspaceError::NameExists(name.into()));
        }
        folder.folders.push(Folder::new(name));
        Ok(())
    }

    pub fn create_file(
        &mut self,
        parent: &ParentRef,
        name: &str,
        content: String,
    ) -> Result<FileId, WorkspaceError> {
        validate_name(name)?;
        let folder = resolve_in(&mut self.roots, parent)?;
        if folder.has_child_named(name) {
            return Err(WorkspaceError::NameExists(name.into()));
        }
        let id = self.ids.next_id();
        folder.files.push(File::new(id, name, content));
        Ok(id)
    }

    /// 所有名字检查在修改之前完成；任一冲突则整棵子树都不插入
    pub fn insert_templates(
        &mut self,
        parent: &ParentRef,
        templates: &[FolderTemplate],
    ) -> Result<(), WorkspaceError> {
        let mut batch: FxHashSet<&str> = FxHashSet::default();
        for template in templates {
            validate_name(&template.name)?;
            if !batch.insert(template.name.as_str()) {
                return Err(WorkspaceError::NameExists(template.name.clone()));
            }
            let mut file_names: FxHashSet<&str> = FxHashSet::default();
            for (file_name, _) in &template.files {
                validate_name(file_name)?;
                if !file_names.insert(file_name.as_str()) {
                    return Err(WorkspaceError::NameExists(file_name.clone()));
                }
            }
        }

        let folder = resolve_in(&mut self.roots, parent)?;
        if let Some(clash) = templates.iter().find(|t| folder.has_child_named(&t.name)) {
            return Err(WorkspaceError::NameExists(clash.name.clone()));
        }

        for template in templates {
            let mut built = Folder::new(template.name.clone());
            for (file_name, content) in &template.files {
                built
                    .files
                    .push(File::new(self.ids.next_id(), file_name.clone(), content.clone()));
            }
            folder.folders.push(built);
        }
        Ok(())
    }

    pub fn update_file_content(
        &mut self,
        id: FileId,
        content: String,
    ) -> Result<(), WorkspaceError> {
        let file = find_file_in_mut(&mut self.roots, id)
            .ok_or_else(|| WorkspaceError::FileNotFound(id.to_string().into()))?;
        file.content = content;
        Ok(())
    }

    /// 删除先序第一个同名文件夹及其整棵子树
    pub fn remove_folder(&mut self, name: &str) -> Result<Folder, WorkspaceError> {
        let path = index_path(&self.roots, name)
            .ok_or_else(|| WorkspaceError::FolderNotFound(name.into()))?;
        let (last, parents) = match path.split_last() {
            Some(split) => split,
            None => return Err(WorkspaceError::FolderNotFound(name.into())),
        };
        let mut siblings = &mut self.roots;
        for &idx in parents {
            siblings = &mut siblings[idx].folders;
        }
        Ok(siblings.remove(*last))
    }

    pub fn remove_file(&mut self, id: FileId) -> Result<File, WorkspaceError> {
        remove_file_in(&mut self.roots, id)
            .ok_or_else(|| WorkspaceError::FileNotFound(id.to_string().into()))
    }

    /// 检查每个文件夹内的文件 id 是否唯一
    pub fn validate(&self) -> Result<(), WorkspaceError> {
        let mut stack: Vec<&Folder> = self.roots.iter().collect();
        while let Some(folder) = stack.pop() {
            let mut seen: FxHashSet<FileId> = FxHashSet::default();
            for file in &folder.files {
                if !seen.insert(file.id) {
                    return Err(WorkspaceError::DuplicateFileId {
                        folder: folder.name.clone(),
                        id: file.id,
                    });
                }
            }
            stack.extend(folder.folders.iter());
        }
        Ok(())
    }

    /// 展开的文件夹按路径键记录；同层子文件夹排在文件之前
    pub fn flatten_for_view(&self, expanded: &FxHashSet<CompactString>) -> Vec<TreeRow> {
        let mut result = Vec::new();
        for root in &self.roots {
            flatten_subtree(root, 0, root.name.clone(), expanded, &mut result);
        }
        result
    }
}

fn flatten_subtree(
    folder: &Folder,
    depth: u16,
    path: CompactString,
    expanded: &FxHashSet<CompactString>,
    out: &mut Vec<TreeRow>,
) {
    let is_expanded = expanded.contains(&path);
    out.push(TreeRow {
        depth,
        name: folder.name.clone(),
        kind: NodeKind::Dir,
        path: path.clone(),
        file: None,
        is_expanded,
    });
    if !is_expanded {
        return;
    }
    for child in &folder.folders {
        flatten_subtree(child, depth + 1, join_path(&path, &child.name), expanded, out);
    }
    for file in &folder.files {
        out.push(TreeRow {
            depth: depth + 1,
            name: file.name.clone(),
            kind: NodeKind::File,
            path: path.clone(),
            file: Some(file.id),
            is_expanded: false,
        });
    }
}

fn resolve_in<'a>(
    roots: &'a mut [Folder],
    parent: &ParentRef,
) -> Result<&'a mut Folder, WorkspaceError> {
    let found = match parent {
        ParentRef::Named(name) => find_in_mut(roots, name),
        ParentRef::Root(name) => roots.iter_mut().find(|f| f.name == *name),
    };
    found.ok_or_else(|| WorkspaceError::ParentNotFound(parent.name().into()))
}

fn join_path(parent: &str, name: &str) -> CompactString {
    let mut path = CompactString::new(parent);
    path.push('/');
    path.push_str(name);
    path
}

pub fn validate_name(name: &str) -> Result<(), WorkspaceError> {
    if name.is_empty() || name.contains('/') || name.chars().any(char::is_whitespace) {
        return Err(WorkspaceError::InvalidName(name.into()));
    }
    Ok(())
}

fn find_in<'a>(folders: &'a [Folder], name: &str) -> Option<&'a Folder> {
    for folder in folders {
        if folder.name == name {
            return Some(folder);
        }
        if let Some(found) = find_in(&folder.folders, name) {
            return Some(found);
        }
    }
    None
}

fn find_in_mut<'a>(folders: &'a mut [Folder], name: &str) -> Option<&'a mut Folder> {
    for folder in folders.iter_mut() {
        if folder.name == name {
            return Some(folder);
        }
        if let Some(found) = find_in_mut(&mut folder.folders, name) {
            return Some(found);
        }
    }
    None
}

fn index_path(folders: &[Folder], name: &str) -> Option<Vec<usize>> {
    for (idx, folder) in folders.iter().enumerate() {
        if folder.name == name {
            return Some(vec![idx]);
        }
        if let Some(mut rest) = index_path(&folder.folders, name) {
            rest.insert(0, idx);
            return Some(rest);
        }
    }
    None
}

fn find_file_in(folders: &[Folder], id: FileId) -> Option<&File> {
    for folder in folders {
        if let Some(file) = folder.files.iter().find(|f| f.id == id) {
            return Some(file);
        }
        if let Some(file) = find_file_in(&folder.folders, id) {
            return Some(file);
        }
    }
    None
}

fn find_file_in_mut(folders: &mut [Folder], id: FileId) -> Option<&mut File> {
    for folder in folders.iter_mut() {
        if let Some(file) = folder.files.iter_mut().find(|f| f.id == id) {
            return Some(file);
        }
        if let Some(file) = find_file_in_mut(&mut folder.folders, id) {
            return Some(file);
        }
    }
    None
}

fn find_file_named<'a>(folders: &'a [Folder], name: &str) -> Option<&'a File> {
    for folder in folders {
        if let Some(file) = folder.files.iter().find(|f| f.name == name) {
            return Some(file);
        }
        if let Some(file) = find_file_named(&folder.folders, name) {
            return Some(file);
        }
    }
    None
}

fn remove_file_in(folders: &mut [Folder], id: FileId) -> Option<File> {
    for folder in folders.iter_mut() {
        if let Some(pos) = folder.files.iter().position(|f| f.id == id) {
            return Some(folder.files.remove(pos));
        }
        if let Some(file) = remove_file_in(&mut folder.folders, id) {
            return Some(file);
        }
    }
    None
}

#[cfg(test)]
#[path = "../../tests/unit/models/workspace_tree.rs"]
mod tests;
