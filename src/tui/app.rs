//! TUI 主循环：按键进入会话，求值在 tokio 上进行，结果经通道回到 UI 线程

use std::io;
use std::sync::mpsc::Receiver;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::backend::Backend;
use ratatui::Terminal;

use super::screen::{QuitSignal, TerminationSignal};
use super::view;
use crate::core::Keystroke;
use crate::kernel::services::adapters::{AppMessage, AsyncRuntime};
use crate::kernel::{CommandInterpreter, Effect, ExplorerState, TerminalSession};

const POLL_INTERVAL: Duration = Duration::from_millis(50);

pub struct TerminalApp {
    interpreter: CommandInterpreter,
    session: TerminalSession,
    explorer: ExplorerState,
    runtime: AsyncRuntime,
    rx: Receiver<AppMessage>,
    mode_label: String,
    should_quit: bool,
}

impl TerminalApp {
    pub fn new(
        interpreter: CommandInterpreter,
        session: TerminalSession,
        runtime: AsyncRuntime,
        rx: Receiver<AppMessage>,
        mode_label: impl Into<String>,
    ) -> Self {
        let mut explorer = ExplorerState::new();
        explorer.refresh(interpreter.store());
        Self {
            interpreter,
            session,
            explorer,
            runtime,
            rx,
            mode_label: mode_label.into(),
            should_quit: false,
        }
    }

    pub fn session(&self) -> &TerminalSession {
        &self.session
    }

    pub fn explorer(&self) -> &ExplorerState {
        &self.explorer
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(key) => self.handle_key(key),
            Event::Paste(text) => self.feed(Keystroke::Paste(text)),
            _ => {}
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind == KeyEventKind::Release {
            return;
        }
        match key.code {
            KeyCode::Esc => self.should_quit = true,
            KeyCode::Up => {
                self.explorer.move_selection(-1);
            }
            KeyCode::Down => {
                self.explorer.move_selection(1);
            }
            KeyCode::Tab => {
                self.explorer.toggle_selected(self.interpreter.store());
            }
            _ => {
                if let Some(keystroke) = Keystroke::from_key_event(key) {
                    self.feed(keystroke);
                }
            }
        }
    }

    fn feed(&mut self, keystroke: Keystroke) {
        if let Some(submission) = self.session.handle_key(keystroke) {
            tracing::debug!(ticket = submission.ticket, line = %submission.line, "submit");
            self.runtime
                .evaluate(&self.interpreter, self.session.id(), submission);
        }
    }

    /// 处理所有已到达的求值结果；返回是否有结果被写入
    pub fn drain_messages(&mut self) -> bool {
        let mut changed = false;
        while let Ok(message) = self.rx.try_recv() {
            match message {
                AppMessage::Evaluated {
                    session,
                    ticket,
                    evaluation,
                } => {
                    if session != self.session.id() {
                        continue;
                    }
                    for effect in self.session.complete(ticket, evaluation) {
                        if effect == Effect::RefreshTree {
                            self.explorer.rebuild(self.interpreter.store());
                        }
                    }
                    changed = true;
                }
            }
        }
        changed
    }

    /// 运行到按 Esc 或收到退出信号；返回导致退出的信号
    pub fn run<B: Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
        quit: &QuitSignal,
    ) -> io::Result<Option<TerminationSignal>> {
        while !self.should_quit {
            self.drain_messages();
            self.explorer.refresh(self.interpreter.store());

            let session = &self.session;
            let explorer = &mut self.explorer;
            let mode_label = self.mode_label.as_str();
            terminal.draw(|frame| view::render(frame, session, explorer, mode_label))?;

            if let Some(signal) = quit.raised() {
                tracing::info!(?signal, "quitting on signal");
                return Ok(Some(signal));
            }

            if event::poll(POLL_INTERVAL)? {
                self.handle_event(event::read()?);
            }
        }
        Ok(None)
    }
}
