//! 资源管理器视图状态：展开集合、扁平化的行、选中项与滚动

use compact_str::CompactString;
use rustc_hash::FxHashSet;

use super::store::WorkspaceStore;
use crate::models::{NodeKind, TreeRow};

#[derive(Debug, Clone)]
pub struct ExplorerState {
    expanded: FxHashSet<CompactString>,
    rows: Vec<TreeRow>,
    selected: Option<usize>,
    pub view_height: usize,
    pub scroll_offset: usize,
    /// 上次构建行时的 store 版本
    version: Option<u64>,
}

impl Default for ExplorerState {
    fn default() -> Self {
        Self::new()
    }
}

impl ExplorerState {
    pub fn new() -> Self {
        Self {
            expanded: FxHashSet::default(),
            rows: Vec::new(),
            selected: None,
            view_height: 10,
            scroll_offset: 0,
            version: None,
        }
    }

    pub fn rows(&self) -> &[TreeRow] {
        &self.rows
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn selected_row(&self) -> Option<&TreeRow> {
        self.selected.and_then(|index| self.rows.get(index))
    }

    pub fn is_expanded(&self, path: &str) -> bool {
        self.expanded.contains(path)
    }

    /// store 版本未变时不重建
    pub fn refresh(&mut self, store: &WorkspaceStore) -> bool {
        let version = store.version();
        if self.version == Some(version) {
            return false;
        }
        self.rebuild(store);
        true
    }

    pub fn rebuild(&mut self, store: &WorkspaceStore) {
        let (version, rows) = store.read_versioned(|tree| tree.flatten_for_view(&self.expanded));
        self.rows = rows;
        self.version = Some(version);

        self.selected = match self.selected {
            _ if self.rows.is_empty() => None,
            Some(index) => Some(index.min(self.rows.len() - 1)),
            None => None,
        };
        match self.selected {
            Some(index) => self.keep_row_visible(index),
            None => self.clamp_scroll(),
        }
    }

    pub fn set_expanded(&mut self, path: &str, expanded: bool, store: &WorkspaceStore) -> bool {
        let changed = if expanded {
            self.expanded.insert(CompactString::from(path))
        } else {
            self.expanded.remove(path)
        };
        if changed {
            self.rebuild(store);
        }
        changed
    }

    /// 选中项为文件夹时切换展开状态
    pub fn toggle_selected(&mut self, store: &WorkspaceStore) -> bool {
        let Some(row) = self.selected_row() else {
            return false;
        };
        if row.kind != NodeKind::Dir {
            return false;
        }
        let path = row.path.clone();
        let expand = !row.is_expanded;
        self.set_expanded(&path, expand, store)
    }

    pub fn set_view_height(&mut self, height: usize) -> bool {
        let height = height.max(1);
        if self.view_height == height {
            return false;
        }
        self.view_height = height;
        match self.selected {
            Some(index) => self.keep_row_visible(index),
            None => self.clamp_scroll(),
        }
        true
    }

    pub fn move_selection(&mut self, delta: isize) -> bool {
        if self.rows.is_empty() || delta == 0 {
            return false;
        }

        let Some(current_index) = self.selected else {
            let new_index = if delta < 0 { self.rows.len() - 1 } else { 0 };
            self.selected = Some(new_index);
            self.keep_row_visible(new_index);
            return true;
        };

        let new_index = if delta < 0 {
            current_index.saturating_sub(delta.unsigned_abs())
        } else {
            (current_index + delta as usize).min(self.rows.len() - 1)
        };
        if new_index == current_index {
            return false;
        }

        self.selected = Some(new_index);
        self.keep_row_visible(new_index);
        true
    }

    pub fn visible_rows(&self) -> &[TreeRow] {
        let start = self.scroll_offset.min(self.rows.len());
        let end = (start + self.view_height.max(1)).min(self.rows.len());
        &self.rows[start..end]
    }

    fn keep_row_visible(&mut self, index: usize) {
        let height = self.view_height.max(1);
        if index < self.scroll_offset {
            self.scroll_offset = index;
        } else if index >= self.scroll_offset + height {
            self.scroll_offset = index + 1 - height;
        }
        self.clamp_scroll();
    }

    fn clamp_scroll(&mut self) {
        let max_scroll = self.rows.len().saturating_sub(self.view_height.max(1));
        self.scroll_offset = self.scroll_offset.min(max_scroll);
    }
}
