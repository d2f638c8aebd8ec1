//! 渲染：左侧资源管理器，右侧终端记录与提示行，底部状态栏

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;
use unicode_width::UnicodeWidthStr;

use crate::kernel::terminal::TerminalSession;
use crate::kernel::ExplorerState;
use crate::models::NodeKind;

const STATUS_HEIGHT: u16 = 1;
const EXPLORER_WIDTH_PERCENT: u16 = 30;

pub fn render(
    frame: &mut Frame,
    session: &TerminalSession,
    explorer: &mut ExplorerState,
    mode_label: &str,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(STATUS_HEIGHT)])
        .split(frame.area());

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(EXPLORER_WIDTH_PERCENT),
            Constraint::Percentage(100 - EXPLORER_WIDTH_PERCENT),
        ])
        .split(chunks[0]);

    render_explorer(frame, body[0], explorer);
    render_terminal(frame, body[1], session);
    render_status(frame, chunks[1], session, mode_label);
}

fn render_explorer(frame: &mut Frame, area: Rect, explorer: &mut ExplorerState) {
    let block = Block::default().borders(Borders::ALL).title("Explorer");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    explorer.set_view_height(inner.height as usize);
    let selected = explorer.selected();
    let offset = explorer.scroll_offset;

    let lines: Vec<Line> = explorer
        .visible_rows()
        .iter()
        .enumerate()
        .map(|(i, row)| {
            let marker = match (row.kind, row.is_expanded) {
                (NodeKind::Dir, true) => "▾ ",
                (NodeKind::Dir, false) => "▸ ",
                (NodeKind::File, _) => "  ",
            };
            let text = format!("{}{}{}", "  ".repeat(row.depth as usize), marker, row.name);
            let mut style = match row.kind {
                NodeKind::Dir => Style::default().fg(Color::Cyan),
                NodeKind::File => Style::default(),
            };
            if selected == Some(offset + i) {
                style = style.add_modifier(Modifier::REVERSED);
            }
            Line::from(Span::styled(text, style))
        })
        .collect();

    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_terminal(frame: &mut Frame, area: Rect, session: &TerminalSession) {
    let block = Block::default().borders(Borders::ALL).title("Terminal");
    let inner = block.inner(area);
    frame.render_widget(block, area);
    if inner.height == 0 || inner.width == 0 {
        return;
    }

    let transcript = session.transcript().lines();
    let input = format!("{}{}", session.prompt(), session.buffer());

    // 只显示最后一屏，提示行始终在最底部
    let height = inner.height as usize;
    let keep = height.saturating_sub(1).min(transcript.len());
    let mut lines: Vec<Line> = transcript[transcript.len() - keep..]
        .iter()
        .map(|line| Line::raw(line.as_str()))
        .collect();
    let prompt_row = lines.len() as u16;
    lines.push(Line::from(Span::styled(
        input.clone(),
        Style::default().add_modifier(Modifier::BOLD),
    )));

    frame.render_widget(Paragraph::new(lines), inner);

    let width = (input.width() as u16).min(inner.width.saturating_sub(1));
    frame.set_cursor_position((inner.x + width, inner.y + prompt_row));
}

fn render_status(frame: &mut Frame, area: Rect, session: &TerminalSession, mode_label: &str) {
    let cwd = if session.cwd().is_empty() {
        "/".to_string()
    } else {
        session.cwd().to_string()
    };
    let busy = if session.is_busy() { " | running" } else { "" };
    let text = format!(
        "{mode_label} | {cwd}{busy} | Esc quit  Up/Down select  Tab expand"
    );
    let status = Paragraph::new(Span::styled(text, Style::default().fg(Color::DarkGray)));
    frame.render_widget(status, area);
}

#[cfg(test)]
#[path = "../../tests/unit/tui/view.rs"]
mod tests;
