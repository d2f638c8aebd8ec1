use crate::kernel::interpreter::Evaluation;
use crate::kernel::terminal::SessionId;

pub enum AppMessage {
    /// 一次提交的求值结果，按 `ticket` 交回所属会话
    Evaluated {
        session: SessionId,
        ticket: u64,
        evaluation: Evaluation,
    },
}
