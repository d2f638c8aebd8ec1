//! TUI 运行期间的终端屏幕，以及退出信号
//!
//! 进入时切到 raw 模式、备用屏幕并开启 bracketed paste（多行粘贴按行提交）。
//! `ScreenGuard` 被丢弃时恢复终端，正常退出、出错和 panic 展开都经过这里。

use std::io;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// 屏幕模式切换；测试里换成记录调用的实现
pub trait Screen {
    fn enter(&mut self) -> io::Result<()>;
    fn leave(&mut self) -> io::Result<()>;
}

#[derive(Debug, Default)]
pub struct CrosstermScreen;

impl Screen for CrosstermScreen {
    fn enter(&mut self) -> io::Result<()> {
        use crossterm::cursor::SetCursorStyle;
        use crossterm::event::EnableBracketedPaste;
        use crossterm::terminal::{enable_raw_mode, EnterAlternateScreen};

        enable_raw_mode()?;
        crossterm::execute!(
            io::stdout(),
            EnterAlternateScreen,
            EnableBracketedPaste,
            SetCursorStyle::SteadyBar
        )
    }

    fn leave(&mut self) -> io::Result<()> {
        use crossterm::cursor::SetCursorStyle;
        use crossterm::event::DisableBracketedPaste;
        use crossterm::terminal::{disable_raw_mode, LeaveAlternateScreen};

        let raw = disable_raw_mode();
        let screen = crossterm::execute!(
            io::stdout(),
            DisableBracketedPaste,
            LeaveAlternateScreen,
            SetCursorStyle::DefaultUserShape
        );
        raw.and(screen)
    }
}

pub struct ScreenGuard<S: Screen = CrosstermScreen> {
    screen: S,
    active: bool,
}

impl ScreenGuard {
    pub fn enter() -> io::Result<Self> {
        Self::with_screen(CrosstermScreen)
    }
}

impl<S: Screen> ScreenGuard<S> {
    /// 进入失败时把已经切换的部分尽量撤回
    pub fn with_screen(mut screen: S) -> io::Result<Self> {
        if let Err(err) = screen.enter() {
            if let Err(undo) = screen.leave() {
                tracing::debug!(error = %undo, "undo after failed screen setup");
            }
            return Err(err);
        }
        Ok(Self {
            screen,
            active: true,
        })
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// 恢复终端；之后再调用（包括 drop）不会重复恢复
    pub fn leave(&mut self) -> io::Result<()> {
        if !std::mem::replace(&mut self.active, false) {
            return Ok(());
        }
        self.screen.leave()
    }
}

impl<S: Screen> Drop for ScreenGuard<S> {
    fn drop(&mut self) {
        if let Err(err) = self.leave() {
            tracing::warn!(error = %err, "failed to restore terminal");
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminationSignal {
    SigInt,
    SigTerm,
}

impl TerminationSignal {
    /// shell 约定：128 + 信号值
    pub fn exit_code(self) -> u8 {
        match self {
            TerminationSignal::SigInt => 130,
            TerminationSignal::SigTerm => 143,
        }
    }

    fn tag(self) -> usize {
        match self {
            TerminationSignal::SigInt => 1,
            TerminationSignal::SigTerm => 2,
        }
    }

    fn from_tag(tag: usize) -> Option<Self> {
        match tag {
            1 => Some(TerminationSignal::SigInt),
            2 => Some(TerminationSignal::SigTerm),
            _ => None,
        }
    }
}

/// 记录最近一次收到的退出信号，主循环每一帧检查
#[derive(Debug, Clone, Default)]
pub struct QuitSignal {
    raised: Arc<AtomicUsize>,
}

impl QuitSignal {
    #[cfg(unix)]
    pub fn install() -> io::Result<Self> {
        use signal_hook::consts::signal::{SIGINT, SIGTERM};

        let quit = Self::default();
        for (sig, signal) in [
            (SIGINT, TerminationSignal::SigInt),
            (SIGTERM, TerminationSignal::SigTerm),
        ] {
            signal_hook::flag::register_usize(sig, Arc::clone(&quit.raised), signal.tag())?;
        }
        Ok(quit)
    }

    #[cfg(not(unix))]
    pub fn install() -> io::Result<Self> {
        Ok(Self::default())
    }

    pub fn raised(&self) -> Option<TerminationSignal> {
        TerminationSignal::from_tag(self.raised.load(Ordering::SeqCst))
    }

    #[cfg(test)]
    pub(crate) fn raise(&self, signal: TerminationSignal) {
        self.raised.store(signal.tag(), Ordering::SeqCst);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/tui/screen.rs"]
mod tests;
