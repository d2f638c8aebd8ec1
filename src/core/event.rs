/// 终端会话消费的按键事件（与具体前端无关）
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Keystroke {
    Char(char),
    Paste(String),
    Backspace,
    Enter,
    /// Ctrl-C：清空缓冲区，不提交
    Interrupt,
}

#[cfg(feature = "tui")]
impl Keystroke {
    pub fn from_key_event(event: crossterm::event::KeyEvent) -> Option<Self> {
        use crossterm::event::{KeyCode, KeyEventKind, KeyModifiers};

        if event.kind == KeyEventKind::Release {
            return None;
        }

        match event.code {
            KeyCode::Char('c') if event.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(Keystroke::Interrupt)
            }
            KeyCode::Char(_) if event.modifiers.contains(KeyModifiers::CONTROL) => None,
            KeyCode::Char(ch) => Some(Keystroke::Char(ch)),
            KeyCode::Backspace => Some(Keystroke::Backspace),
            KeyCode::Enter => Some(Keystroke::Enter),
            _ => None,
        }
    }
}
