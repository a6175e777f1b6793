//! Chat tab view

use crate::app::App;
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
    Frame,
};

pub fn draw(f: &mut Frame, app: &App, area: Rect) {
    let messages = app.chat.messages();
    let items: Vec<ListItem> = messages
        .iter()
        .rev()
        .map(|m| {
            ListItem::new(Line::from(vec![
                Span::styled(format!("{}: ", m.speaker), Style::default().fg(Color::Cyan)),
                Span::styled(plain_text(&m.html), Style::default().fg(Color::White)),
            ]))
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!(" Chat ({}) ", messages.len())),
    );
    f.render_widget(list, area);
}

/// Flatten a roll report to one line: block tags become separators
fn plain_text(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let mut in_tag = false;
    let mut tag = String::new();
    for c in html.chars() {
        match c {
            '<' => {
                in_tag = true;
                tag.clear();
            }
            '>' => {
                in_tag = false;
                if (tag.starts_with("/h3") || tag.starts_with("/p")) && !out.is_empty() {
                    out.push_str(" · ");
                }
            }
            _ if in_tag => tag.push(c),
            _ => out.push(c),
        }
    }
    out.trim_end_matches(" · ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text() {
        let html = "<div class=\"sheet-roll\"><h3>Brawl &amp; Grapple</h3><p>d12: <strong>7</strong></p><p>Total: 13</p></div>";
        assert_eq!(plain_text(html), "Brawl & Grapple · d12: 7 · Total: 13");
    }
}
