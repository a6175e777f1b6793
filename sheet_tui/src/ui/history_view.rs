//! History tab view

use crate::app::App;
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
    Frame,
};
use sheet_core::HistoryEvent;

pub fn draw(f: &mut Frame, app: &App, area: Rect) {
    let entries = app.record.history.entries();
    let items: Vec<ListItem> = entries
        .iter()
        .skip(app.history_scroll)
        .map(|entry| {
            let color = match entry.event {
                HistoryEvent::Roll { .. } => Color::White,
                HistoryEvent::CorruptionThresholdCrossed { .. } => Color::Magenta,
            };
            ListItem::new(Line::from(vec![
                Span::styled(
                    entry.timestamp.format("%Y-%m-%d %H:%M:%S ").to_string(),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::styled(entry.summary(), Style::default().fg(color)),
            ]))
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!(" History ({}) ", entries.len())),
    );
    f.render_widget(list, area);
}
