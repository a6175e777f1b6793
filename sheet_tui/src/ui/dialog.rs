//! Roll dialog overlay

use crate::app::{App, RollDialog};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

pub fn draw(f: &mut Frame, app: &App, dialog: &RollDialog) {
    let area = centered(f.area(), 48, 10 + dialog.pending.modifiers.len() as u16);
    f.render_widget(Clear, area);

    let pending = &dialog.pending;
    let mut lines = vec![
        Line::from(vec![
            Span::styled("Skill rating: ", Style::default().fg(Color::Gray)),
            Span::styled(pending.rating.to_string(), Style::default().fg(Color::White)),
            Span::styled("    Pool: ", Style::default().fg(Color::Gray)),
            Span::styled(
                pending.pool_available.to_string(),
                Style::default().fg(Color::Green),
            ),
        ]),
        Line::from(""),
    ];

    let mut modes = vec![Span::styled("Mode: ", Style::default().fg(Color::Gray))];
    for mode in pending.modes() {
        let style = if *mode == dialog.mode {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Yellow)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };
        modes.push(Span::styled(format!(" {} ", app.localize(mode.label_key())), style));
        modes.push(Span::raw(" "));
    }
    lines.push(Line::from(modes));
    lines.push(Line::from(""));

    lines.push(option_line("(no modifier)", dialog.modifier_index.is_none()));
    for (i, modifier) in pending.modifiers.iter().enumerate() {
        lines.push(option_line(&modifier.display(), dialog.modifier_index == Some(i)));
    }

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow))
            .title(format!(" Roll {} ", pending.skill.label)),
    );
    f.render_widget(paragraph, area);
}

fn option_line(label: &str, selected: bool) -> Line<'static> {
    let (prefix, style) = if selected {
        ("► ", Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
    } else {
        ("  ", Style::default().fg(Color::White))
    };
    Line::from(Span::styled(format!("{}{}", prefix, label), style))
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(height.min(area.height)),
            Constraint::Min(0),
        ])
        .split(area);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(width.min(area.width)),
            Constraint::Min(0),
        ])
        .split(vertical[1])[1]
}
