//! UI rendering

mod chat_view;
mod dialog;
mod help_view;
mod history_view;
mod sheet_view;

use crate::app::{App, Tab};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Tabs},
    Frame,
};

pub fn draw(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Tab bar
            Constraint::Min(0),    // Content
            Constraint::Length(1), // Status
            Constraint::Length(3), // Keybindings footer
        ])
        .split(f.area());

    draw_tabs(f, app, chunks[0]);

    match app.current_tab {
        Tab::Sheet => sheet_view::draw(f, app, chunks[1]),
        Tab::Chat => chat_view::draw(f, app, chunks[1]),
        Tab::History => history_view::draw(f, app, chunks[1]),
        Tab::Help => help_view::draw(f, app, chunks[1]),
    }

    draw_status(f, app, chunks[2]);
    draw_keybindings(f, app, chunks[3]);

    if let Some(dialog) = &app.dialog {
        dialog::draw(f, app, dialog);
    }
}

fn draw_status(f: &mut Frame, app: &App, area: Rect) {
    let mut spans = vec![Span::styled(
        format!(" {}", app.status),
        Style::default().fg(Color::White),
    )];
    if let Some(reminder) = app.reminders.reminders().last() {
        spans.push(Span::styled("  │  ", Style::default().fg(Color::DarkGray)));
        spans.push(Span::styled(
            format!("⏰ {} (in {}d)", reminder.title, reminder.offset_days),
            Style::default().fg(Color::Magenta),
        ));
    }
    if app.dirty {
        spans.push(Span::styled("  [modified]", Style::default().fg(Color::Yellow)));
    }
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn draw_keybindings(f: &mut Frame, app: &App, area: Rect) {
    let common_keys = vec![("Tab", "Next tab"), ("s", "Save"), ("q", "Quit")];

    let tab_keys: Vec<(&str, &str)> = if app.dialog.is_some() {
        vec![
            ("←/→", "Mode"),
            ("↑/↓", "Modifier"),
            ("Enter", "Roll"),
            ("Esc", "Cancel"),
        ]
    } else {
        match app.current_tab {
            Tab::Sheet => vec![
                ("↑/↓", "Select skill"),
                ("Enter", "Roll"),
                ("+/-", "Humanity"),
                ("]/[", "Corruption"),
                ("r", "Rest"),
            ],
            Tab::History => vec![("↑/↓", "Scroll")],
            Tab::Chat | Tab::Help => vec![],
        }
    };

    let mut spans: Vec<Span> = Vec::new();

    for (i, (key, desc)) in tab_keys.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled("  │  ", Style::default().fg(Color::DarkGray)));
        }
        spans.push(Span::styled(
            format!("[{}]", key),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::styled(
            format!(" {}", desc),
            Style::default().fg(Color::White),
        ));
    }

    if !tab_keys.is_empty() {
        spans.push(Span::styled("  │  ", Style::default().fg(Color::DarkGray)));
    }

    for (i, (key, desc)) in common_keys.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled("  │  ", Style::default().fg(Color::DarkGray)));
        }
        spans.push(Span::styled(
            format!("[{}]", key),
            Style::default().fg(Color::Cyan),
        ));
        spans.push(Span::styled(
            format!(" {}", desc),
            Style::default().fg(Color::Gray),
        ));
    }

    let paragraph = Paragraph::new(Line::from(spans))
        .block(Block::default().borders(Borders::ALL).title(" Keys "))
        .alignment(Alignment::Center);

    f.render_widget(paragraph, area);
}

fn draw_tabs(f: &mut Frame, app: &App, area: Rect) {
    let titles: Vec<Line> = Tab::all()
        .iter()
        .map(|t| {
            let style = if *t == app.current_tab {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Gray)
            };
            Line::from(Span::styled(t.name(), style))
        })
        .collect();

    let title = format!(" {} ", app.record.speaker());
    let tabs = Tabs::new(titles)
        .block(Block::default().borders(Borders::ALL).title(title))
        .highlight_style(Style::default().fg(Color::Yellow))
        .divider("|");

    f.render_widget(tabs, area);
}

/// Filled/empty bar of `width` cells
pub fn gauge_bar(current: i32, max: i32, width: u16, filled_color: Color) -> Span<'static> {
    let width = width as usize;
    let filled = if max > 0 {
        (current.clamp(0, max) as usize * width) / max as usize
    } else {
        0
    };
    let bar = format!("{}{}", "█".repeat(filled), "░".repeat(width - filled));
    Span::styled(bar, Style::default().fg(filled_color))
}

pub fn value_line(name: &str, value: String, color: Color) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{:14}", name), Style::default().fg(Color::Gray)),
        Span::styled(value, Style::default().fg(color)),
    ])
}

pub fn section_title(title: &str) -> Line<'static> {
    Line::from(Span::styled(
        format!("═══ {} ═══", title),
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
    ))
}
