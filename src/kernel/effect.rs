use super::terminal::WorkingPath;

/// 解释器产生的副作用请求，由会话或前端处理
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    ChangeDirectory(WorkingPath),
    /// 请求前端重新读取权威的工作区树（远程模式下命令成功后发出）
    RefreshTree,
}
