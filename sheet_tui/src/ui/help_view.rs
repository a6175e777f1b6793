//! Help tab view

use super::section_title;
use crate::app::App;
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn draw(f: &mut Frame, app: &App, area: Rect) {
    let constants = &app.config().constants;
    let lines = vec![
        section_title("Navigation"),
        key_line("1-4", "Jump to tab (Sheet/Chat/History/Help)"),
        key_line("Tab / Shift+Tab", "Next/previous tab"),
        key_line("↑/k  ↓/j", "Select skill / scroll"),
        key_line("q / Ctrl+C", "Quit"),
        Line::from(""),
        section_title("Sheet"),
        key_line("Enter", "Roll the selected skill"),
        key_line("+ / -", "Raise/lower humanity"),
        key_line("] / [", "Raise/lower corruption"),
        key_line("r", "Rest (refill the dice pool)"),
        key_line("s", "Save to the character file"),
        Line::from(""),
        section_title("Roll dialog"),
        key_line("← / →", "Switch sacred/umbral die"),
        key_line("↑ / ↓", "Pick a situational modifier"),
        key_line("Enter / Esc", "Roll / cancel"),
        Line::from(""),
        section_title("Rules"),
        Line::from(Span::styled("Roll:", Style::default().fg(Color::Yellow))),
        Line::from("  Total = d12 + skill + spent die + modifier"),
        Line::from("  Sacred: spent die is d6 halved (rounded up)"),
        Line::from("  Umbral: full d6, and humanity shifts 1 toward bestiality"),
        Line::from(""),
        Line::from(Span::styled("Balance:", Style::default().fg(Color::Yellow))),
        Line::from(format!(
            "  Humanity + Bestiality = {}, dice pool max = Bestiality + {}",
            constants.attribute_total, constants.pool_bonus
        )),
        Line::from("  Every roll spends one pool point"),
        Line::from(""),
        Line::from(Span::styled("Corruption:", Style::default().fg(Color::Yellow))),
        Line::from("  Every 3 points raise the penalty tier (max 4)"),
        Line::from("  Tiers set how often the character must hunt"),
    ];

    let paragraph = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(" Help & Rules "));

    f.render_widget(paragraph, area);
}

fn key_line(key: &str, desc: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("  {:20}", key), Style::default().fg(Color::Yellow)),
        Span::styled(desc.to_string(), Style::default().fg(Color::White)),
    ])
}
