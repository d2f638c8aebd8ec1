//! 文件标识：单调递增的 id 生成器

use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FileId(u64);

impl FileId {
    pub fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for FileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "file-{}", self.0)
    }
}

impl FromStr for FileId {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.strip_prefix("file-")
            .and_then(|n| n.parse::<u64>().ok())
            .map(FileId)
            .ok_or(())
    }
}

/// 每棵树持有一个生成器，同一毫秒内创建的文件也不会撞 id。
#[derive(Debug, Clone)]
pub struct FileIdGenerator {
    next: u64,
}

impl FileIdGenerator {
    pub fn new() -> Self {
        Self { next: 1 }
    }

    pub fn next_id(&mut self) -> FileId {
        let id = FileId(self.next);
        self.next = self.next.saturating_add(1);
        id
    }

    /// 确保后续生成的 id 大于 `seen`（手工组装的树插入后调用）
    pub fn observe(&mut self, seen: FileId) {
        if seen.0 >= self.next {
            self.next = seen.0.saturating_add(1);
        }
    }
}

impl Default for FileIdGenerator {
    fn default() -> Self {
        Self::new()
    }
}
