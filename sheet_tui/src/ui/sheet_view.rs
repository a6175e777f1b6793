//! Sheet tab view

use super::{gauge_bar, section_title, value_line};
use crate::app::App;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};
use sheet_core::{HuntFrequency, SkillCategory};

pub fn draw(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(area);

    draw_attributes(f, app, chunks[0]);
    draw_skills(f, app, chunks[1]);
}

fn draw_attributes(f: &mut Frame, app: &App, area: Rect) {
    let attributes = &app.record.attributes;
    let pool = &app.record.pool;
    let state = &app.record.corruption_state;
    let bar_width = area.width.saturating_sub(22).min(24);
    let total = app.config().constants.attribute_total;

    let hunt_color = match state.hunt_frequency {
        HuntFrequency::None => Color::Green,
        HuntFrequency::Weekly | HuntFrequency::TwiceWeekly => Color::Yellow,
        HuntFrequency::Daily | HuntFrequency::Constant => Color::Red,
    };

    let mut lines = vec![
        section_title("Attributes"),
        Line::from(vec![
            Span::styled(format!("{:14}", "Humanity"), Style::default().fg(Color::Gray)),
            Span::styled(
                format!("{:>3} ", attributes.humanity),
                Style::default().fg(Color::White),
            ),
            gauge_bar(attributes.humanity, total, bar_width, Color::LightBlue),
        ]),
        Line::from(vec![
            Span::styled(format!("{:14}", "Bestiality"), Style::default().fg(Color::Gray)),
            Span::styled(
                format!("{:>3} ", attributes.bestiality),
                Style::default().fg(Color::White),
            ),
            gauge_bar(attributes.bestiality, total, bar_width, Color::Red),
        ]),
        Line::from(""),
        section_title("Dice pool"),
        Line::from(vec![
            Span::styled(format!("{:14}", "Available"), Style::default().fg(Color::Gray)),
            Span::styled(
                format!("{:>3}/{:<3} ", pool.available(), pool.max),
                Style::default().fg(Color::White),
            ),
            gauge_bar(pool.available(), pool.max, bar_width, Color::Green),
        ]),
        Line::from(""),
        section_title("Corruption"),
        value_line("Corruption", attributes.corruption.to_string(), Color::White),
        value_line("Penalty tier", state.penalty_tier.to_string(), Color::White),
        value_line(
            "Hunt",
            app.localize(state.hunt_frequency.label_key()),
            hunt_color,
        ),
    ];
    if let Some(entry) = app.record.history.last_threshold_crossing() {
        lines.push(value_line(
            "Since",
            entry.timestamp.format("%Y-%m-%d %H:%M").to_string(),
            Color::DarkGray,
        ));
    }

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!(" {} ", app.record.speaker())),
    );
    f.render_widget(paragraph, area);
}

fn draw_skills(f: &mut Frame, app: &App, area: Rect) {
    let mut items: Vec<ListItem> = Vec::new();
    let mut index = 0;

    for category in SkillCategory::all() {
        items.push(ListItem::new(Line::from(Span::styled(
            app.localize(category.label_key()),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ))));

        for skill in app.config().skills.in_category(*category) {
            let selected = index == app.selected_skill;
            let style = if selected {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            let prefix = if selected { "► " } else { "  " };
            items.push(ListItem::new(Line::from(vec![
                Span::styled(format!("{}{:18}", prefix, skill.label), style),
                Span::styled(
                    app.record.skills.rating(&skill.key).to_string(),
                    Style::default().fg(Color::Green),
                ),
            ])));
            index += 1;
        }
    }

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Skills (↑/↓ to select, Enter to roll) "),
    );
    f.render_widget(list, area);
}
