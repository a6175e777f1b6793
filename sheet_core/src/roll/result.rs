//! RollResult - outcome of a resolved roll

use crate::character::CharacterAttributes;
use crate::host::Localizer;
use crate::types::RollMode;
use serde::{Deserialize, Serialize};

/// Full breakdown of a resolved roll
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollResult {
    pub character_id: String,
    pub skill_key: String,
    pub skill_label: String,

    // === Dice ===
    pub mode: RollMode,
    /// Raw spent d6
    pub d6: u32,
    /// What the d6 added after the mode was applied
    pub spent_die: i32,
    pub d12: u32,

    // === Bonuses ===
    pub rating: i32,
    pub modifier: i32,
    pub modifier_label: Option<String>,

    pub total: i32,

    // === State after ===
    pub pool_remaining: i32,
    pub attributes_after: CharacterAttributes,
}

impl RollResult {
    /// Chat report. The modifier line is omitted when it is zero.
    pub fn report_html(&self, localizer: &dyn Localizer) -> String {
        let mut html = String::new();
        html.push_str("<div class=\"sheet-roll\">");
        html.push_str(&format!("<h3>{}</h3>", escape_html(&self.skill_label)));
        html.push_str(&format!(
            "<p>{}: <strong>{}</strong></p>",
            escape_html(&localizer.localize("sheet.roll.d12")),
            self.d12
        ));
        html.push_str(&format!(
            "<p>{}: {}</p>",
            escape_html(&localizer.localize("sheet.roll.rating")),
            self.rating
        ));
        html.push_str(&format!(
            "<p>{}: {} (d6 = {})</p>",
            escape_html(&localizer.localize(self.mode.label_key())),
            self.spent_die,
            self.d6
        ));
        if self.modifier != 0 {
            let label = match &self.modifier_label {
                Some(l) => format!(" ({})", escape_html(l)),
                None => String::new(),
            };
            html.push_str(&format!(
                "<p>{}: {:+}{}</p>",
                escape_html(&localizer.localize("sheet.roll.modifier")),
                self.modifier,
                label
            ));
        }
        html.push_str(&format!(
            "<p class=\"total\">{}: <strong>{}</strong></p>",
            escape_html(&localizer.localize("sheet.roll.total")),
            self.total
        ));
        html.push_str("</div>");
        html
    }

    /// Plain one-line breakdown for logs and the terminal
    pub fn summary(&self) -> String {
        let mut s = format!(
            "{}: d12 {} + skill {} + {:?} {}",
            self.skill_label, self.d12, self.rating, self.mode, self.spent_die
        );
        if self.modifier != 0 {
            s.push_str(&format!(" {:+}", self.modifier));
        }
        s.push_str(&format!(" = {}", self.total));
        s
    }
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
