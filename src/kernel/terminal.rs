//! 终端会话：输入缓冲、提交与输出记录
//!
//! 一个会话同一时刻最多只有一条命令在执行。提交时缓冲区先被清空，
//! 在远程命令返回之前输入的字符属于新的一行。

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use compact_str::CompactString;

use super::effect::Effect;
use super::interpreter::{CommandInterpreter, Evaluation};
use crate::core::Keystroke;

pub const BUSY_MESSAGE: &str = "Busy: previous command is still running";
pub const ECHO_PREFIX: &str = "$ ";

/// 当前工作路径：文件夹名序列，空表示尚未进入任何文件夹
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct WorkingPath {
    segments: Vec<CompactString>,
}

impl WorkingPath {
    pub fn root() -> Self {
        Self::default()
    }

    /// `a/b/c` 形式；空段（含首尾 `/`）被忽略
    pub fn parse(raw: &str) -> Self {
        Self {
            segments: raw
                .split('/')
                .filter(|s| !s.is_empty())
                .map(CompactString::from)
                .collect(),
        }
    }

    pub fn join(&self, name: &str) -> Self {
        let mut segments = self.segments.clone();
        segments.push(name.into());
        Self { segments }
    }

    pub fn last(&self) -> Option<&str> {
        self.segments.last().map(|s| s.as_str())
    }

    pub fn segments(&self) -> &[CompactString] {
        &self.segments
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

impl fmt::Display for WorkingPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                f.write_str("/")?;
            }
            f.write_str(segment)?;
        }
        Ok(())
    }
}

/// 只追加的输出记录
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transcript {
    lines: Vec<String>,
}

impl Transcript {
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// 从 `offset` 起追加的行；前端据此增量输出
    pub fn since(&self, offset: usize) -> &[String] {
        &self.lines[offset.min(self.lines.len())..]
    }

    fn push(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputState {
    Idle,
    Editing,
    Submitting,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionId(u64);

impl SessionId {
    pub fn fresh() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }

    pub fn raw(self) -> u64 {
        self.0
    }
}

/// 一次提交；`ticket` 用来把迟到的结果和当前会话对上号
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub ticket: u64,
    pub line: String,
    pub cwd: WorkingPath,
}

#[derive(Debug)]
pub struct TerminalSession {
    id: SessionId,
    transcript: Transcript,
    buffer: String,
    cwd: WorkingPath,
    next_ticket: u64,
    in_flight: Option<u64>,
}

impl Default for TerminalSession {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalSession {
    pub fn new() -> Self {
        Self {
            id: SessionId::fresh(),
            transcript: Transcript::default(),
            buffer: String::new(),
            cwd: WorkingPath::root(),
            next_ticket: 1,
            in_flight: None,
        }
    }

    pub fn with_welcome(welcome: Option<&str>) -> Self {
        let mut session = Self::new();
        if let Some(text) = welcome.filter(|t| !t.is_empty()) {
            session.transcript.push(text);
        }
        session
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    pub fn cwd(&self) -> &WorkingPath {
        &self.cwd
    }

    pub fn state(&self) -> InputState {
        if !self.buffer.is_empty() {
            InputState::Editing
        } else if self.in_flight.is_some() {
            InputState::Submitting
        } else {
            InputState::Idle
        }
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn prompt(&self) -> String {
        if self.cwd.is_empty() {
            ECHO_PREFIX.to_string()
        } else {
            format!("{} {}", self.cwd, ECHO_PREFIX)
        }
    }

    pub fn handle_key(&mut self, key: Keystroke) -> Option<Submission> {
        match key {
            Keystroke::Char(c) => {
                if !c.is_control() {
                    self.buffer.push(c);
                }
                None
            }
            Keystroke::Paste(text) => self.paste(&text),
            Keystroke::Backspace => {
                self.buffer.pop();
                None
            }
            Keystroke::Interrupt => {
                self.buffer.clear();
                None
            }
            Keystroke::Enter => self.submit(),
        }
    }

    /// 粘贴文本中的每个换行都按回车处理；最后一段留在缓冲区。
    /// 第一条提交之后的行会遇到忙碌状态，只回显并提示 Busy
    fn paste(&mut self, text: &str) -> Option<Submission> {
        let normalized = text.replace("\r\n", "\n").replace('\r', "\n");
        let mut segments = normalized.split('\n');
        let mut current = segments.next().unwrap_or_default();
        let mut submission = None;
        for next in segments {
            self.buffer.push_str(current);
            let submitted = self.submit();
            submission = submission.or(submitted);
            current = next;
        }
        self.buffer.push_str(current);
        submission
    }

    fn submit(&mut self) -> Option<Submission> {
        let raw = std::mem::take(&mut self.buffer);
        let line = raw.trim();
        self.transcript.push(format!("{ECHO_PREFIX}{line}"));

        if line.is_empty() {
            return None;
        }
        if self.in_flight.is_some() {
            self.transcript.push(BUSY_MESSAGE);
            return None;
        }

        let ticket = self.next_ticket;
        self.next_ticket += 1;
        self.in_flight = Some(ticket);
        Some(Submission {
            ticket,
            line: line.to_string(),
            cwd: self.cwd.clone(),
        })
    }

    /// 写入一次求值的结果；会话自己处理 `ChangeDirectory`，其余副作用交还调用方
    pub fn complete(&mut self, ticket: u64, evaluation: Evaluation) -> Vec<Effect> {
        if self.in_flight != Some(ticket) {
            tracing::debug!(
                session = self.id.raw(),
                ticket,
                "dropping result for stale submission"
            );
            return Vec::new();
        }
        self.in_flight = None;

        for line in evaluation.lines {
            self.transcript.push(line);
        }

        let mut rest = Vec::new();
        for effect in evaluation.effects {
            match effect {
                Effect::ChangeDirectory(path) => self.cwd = path,
                other => rest.push(other),
            }
        }
        rest
    }

    /// 输入一整行并等待结果
    pub async fn run_line(&mut self, interpreter: &CommandInterpreter, line: &str) -> Vec<Effect> {
        self.buffer.clear();
        let pasted = self.handle_key(Keystroke::Paste(line.to_string()));
        let Some(submission) = pasted.or_else(|| self.handle_key(Keystroke::Enter)) else {
            return Vec::new();
        };
        let evaluation = interpreter
            .evaluate(&submission.line, &submission.cwd)
            .await;
        self.complete(submission.ticket, evaluation)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/terminal.rs"]
mod tests;
