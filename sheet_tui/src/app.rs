//! Application state

use sheet_core::{
    config::ConfigError,
    host::{ChatLog, Localizer, ReminderLog, RngDice, StringTable},
    roll::{DialogSelection, PendingRoll},
    service::{ServiceError, SheetService},
    store::{CharacterStore, JsonFileStore, MemoryStore, StoreError},
    CharacterRecord, DeriveReport, DiceRoller, RollMode, SheetConfig, SkillCategory,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    #[error("store error: {0}")]
    Store(#[from] StoreError),
    #[error(transparent)]
    Service(#[from] ServiceError),
    #[error("not a character file: {0}")]
    BadPath(PathBuf),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Sheet,
    Chat,
    History,
    Help,
}

impl Tab {
    pub fn all() -> &'static [Tab] {
        &[Tab::Sheet, Tab::Chat, Tab::History, Tab::Help]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Tab::Sheet => "Sheet",
            Tab::Chat => "Chat",
            Tab::History => "History",
            Tab::Help => "Help",
        }
    }
}

/// Open roll dialog: the pending request plus the current selection
pub struct RollDialog {
    pub pending: PendingRoll,
    pub mode: RollMode,
    pub modifier_index: Option<usize>,
}

impl RollDialog {
    fn new(pending: PendingRoll) -> Self {
        RollDialog {
            pending,
            mode: RollMode::Sacred,
            modifier_index: None,
        }
    }

    /// Step through "no modifier" then each listed modifier
    fn step_modifier(&mut self, forward: bool) {
        let count = self.pending.modifiers.len();
        if count == 0 {
            return;
        }
        self.modifier_index = match (self.modifier_index, forward) {
            (None, true) => Some(0),
            (None, false) => Some(count - 1),
            (Some(i), true) if i + 1 < count => Some(i + 1),
            (Some(i), false) if i > 0 => Some(i - 1),
            (Some(_), _) => None,
        };
    }

    fn selection(&self) -> DialogSelection {
        DialogSelection {
            mode: self.mode,
            modifier_index: self.modifier_index,
        }
    }
}

pub struct App {
    pub current_tab: Tab,
    /// Working copy; every edit and roll goes through the service
    pub service: SheetService<MemoryStore>,
    pub strings: Arc<StringTable>,
    pub chat: Arc<ChatLog>,
    pub reminders: Arc<ReminderLog>,
    /// Character file written by `save`
    pub file: Option<JsonFileStore>,
    /// Last settled record, for rendering
    pub record: CharacterRecord,
    /// Skill keys in display order (grouped by category)
    pub skill_order: Vec<String>,
    pub selected_skill: usize,
    pub dialog: Option<RollDialog>,
    pub status: String,
    pub history_scroll: usize,
    pub dirty: bool,
}

impl App {
    /// Fresh character, or the one stored at `path` when given. `config_dir`
    /// overrides the bundled config and strings.
    pub fn new(path: Option<&Path>, config_dir: Option<&Path>) -> Result<Self, AppError> {
        let (config, strings) = load_config(config_dir)?;
        let (file, record) = match path {
            Some(path) => {
                let (file, record) = open_record(path, &config)?;
                (Some(file), record)
            }
            None => (None, CharacterRecord::new("pc", "New character", &config)),
        };
        Self::with_parts(config, strings, record, file, RngDice::from_entropy())
    }

    pub fn with_parts(
        config: SheetConfig,
        strings: StringTable,
        record: CharacterRecord,
        file: Option<JsonFileStore>,
        dice: impl DiceRoller + 'static,
    ) -> Result<Self, AppError> {
        let skill_order = SkillCategory::all()
            .iter()
            .flat_map(|c| config.skills.in_category(*c))
            .map(|s| s.key.clone())
            .collect();

        let strings = Arc::new(strings);
        let chat = Arc::new(ChatLog::new());
        let reminders = Arc::new(ReminderLog::new());
        let service = SheetService::new(config, MemoryStore::new(), dice, chat.clone())
            .with_calendar(reminders.clone())
            .with_localizer(strings.clone());

        let id = record.id.clone();
        let report = service.create(record)?;
        let record = service.get(&id)?;

        let mut app = App {
            current_tab: Tab::Sheet,
            service,
            strings,
            chat,
            reminders,
            file,
            record,
            skill_order,
            selected_skill: 0,
            dialog: None,
            status: String::new(),
            history_scroll: 0,
            dirty: report.changed(),
        };
        app.announce(&report);
        Ok(app)
    }

    pub fn config(&self) -> &SheetConfig {
        self.service.config()
    }

    pub fn next_tab(&mut self) {
        let tabs = Tab::all();
        let i = tabs.iter().position(|t| *t == self.current_tab).unwrap_or(0);
        self.current_tab = tabs[(i + 1) % tabs.len()];
    }

    pub fn prev_tab(&mut self) {
        let tabs = Tab::all();
        let i = tabs.iter().position(|t| *t == self.current_tab).unwrap_or(0);
        self.current_tab = tabs[(i + tabs.len() - 1) % tabs.len()];
    }

    pub fn set_tab(&mut self, index: usize) {
        if let Some(tab) = Tab::all().get(index) {
            self.current_tab = *tab;
        }
    }

    pub fn selected_skill_key(&self) -> Option<&str> {
        self.skill_order.get(self.selected_skill).map(String::as_str)
    }

    pub fn on_up(&mut self) {
        if let Some(dialog) = &mut self.dialog {
            dialog.step_modifier(false);
            return;
        }
        match self.current_tab {
            Tab::Sheet => self.selected_skill = self.selected_skill.saturating_sub(1),
            Tab::History => self.history_scroll = self.history_scroll.saturating_sub(1),
            _ => {}
        }
    }

    pub fn on_down(&mut self) {
        if let Some(dialog) = &mut self.dialog {
            dialog.step_modifier(true);
            return;
        }
        match self.current_tab {
            Tab::Sheet => {
                if self.selected_skill + 1 < self.skill_order.len() {
                    self.selected_skill += 1;
                }
            }
            Tab::History => {
                if self.history_scroll + 1 < self.record.history.len() {
                    self.history_scroll += 1;
                }
            }
            _ => {}
        }
    }

    pub fn on_left(&mut self) {
        if let Some(dialog) = &mut self.dialog {
            dialog.mode = dialog.mode.toggled();
        }
    }

    pub fn on_right(&mut self) {
        self.on_left();
    }

    pub fn on_enter(&mut self) {
        if self.dialog.is_some() {
            self.confirm_roll();
        } else if self.current_tab == Tab::Sheet {
            self.open_roll_dialog();
        }
    }

    pub fn on_escape(&mut self) {
        if let Some(dialog) = self.dialog.take() {
            dialog.pending.cancel();
            self.status = "Roll cancelled".to_string();
        }
    }

    /// First phase: validate and open the dialog, or report the rejection
    pub fn open_roll_dialog(&mut self) {
        let Some(key) = self.selected_skill_key().map(str::to_string) else {
            return;
        };
        match self.service.initiate_roll(&self.record.id, &key) {
            Ok(pending) => self.dialog = Some(RollDialog::new(pending)),
            Err(e) => self.status = e.to_string(),
        }
    }

    /// Second phase: resolve the dialog selection against the stored record
    pub fn confirm_roll(&mut self) {
        let Some(dialog) = self.dialog.take() else {
            return;
        };
        let selection = dialog.selection();
        let outcome = self.service.resolve_roll(dialog.pending, selection);

        self.status = match outcome {
            Ok(result) => {
                self.dirty = true;
                result.summary()
            }
            Err(ServiceError::Roll(e)) if e.is_rejection() => e.to_string(),
            Err(ServiceError::Roll(e)) => {
                self.dirty = true;
                format!("Roll failed after spending a point: {}", e)
            }
            Err(e) => e.to_string(),
        };
        self.refresh();
    }

    pub fn adjust_humanity(&mut self, delta: i32) {
        self.apply(move |r| r.attributes.humanity = r.attributes.humanity.saturating_add(delta));
    }

    pub fn adjust_corruption(&mut self, delta: i32) {
        self.apply(move |r| {
            r.attributes.corruption = r.attributes.corruption.saturating_add(delta).max(0)
        });
    }

    /// Refill the pool to max
    pub fn rest(&mut self) {
        if self.apply(|r| r.pool.refill()) {
            self.status = format!(
                "Rested: pool {}/{}",
                self.record.pool.available(),
                self.record.pool.max
            );
        }
    }

    pub fn save(&mut self) {
        let Some(file) = &self.file else {
            self.status = "No file to save to (start with a path)".to_string();
            return;
        };
        match file.save(&self.record) {
            Ok(()) => {
                self.dirty = false;
                self.status = format!(
                    "Saved {} to {}",
                    self.record.id,
                    file.base_dir().display()
                );
            }
            Err(e) => {
                tracing::error!("save failed: {}", e);
                self.status = format!("Save failed: {}", e);
            }
        }
    }

    pub fn localize(&self, key: &str) -> String {
        self.strings.localize(key)
    }

    /// Edit through the service; returns false if the edit was not applied
    fn apply(&mut self, edit: impl FnOnce(&mut CharacterRecord)) -> bool {
        match self.service.update(&self.record.id, edit) {
            Ok((record, report)) => {
                self.record = record;
                self.dirty = true;
                self.announce(&report);
                true
            }
            Err(e) => {
                self.status = e.to_string();
                false
            }
        }
    }

    fn refresh(&mut self) {
        match self.service.get(&self.record.id) {
            Ok(record) => self.record = record,
            Err(e) => self.status = e.to_string(),
        }
    }

    fn announce(&mut self, report: &DeriveReport) {
        if let Some(frequency) = report.threshold_crossed {
            self.status = format!(
                "{}: {}",
                self.localize("sheet.reminder.title"),
                self.localize(frequency.label_key())
            );
        }
    }
}

/// Bundled config, or the files in `dir` with its strings laid over the
/// bundled ones
fn load_config(dir: Option<&Path>) -> Result<(SheetConfig, StringTable), AppError> {
    let mut strings = StringTable::bundled();
    let Some(dir) = dir else {
        return Ok((SheetConfig::default(), strings));
    };
    let config = SheetConfig::load_dir(dir)?;
    let strings_path = dir.join("strings.toml");
    if strings_path.exists() {
        strings.merge(StringTable::load(&strings_path)?);
    }
    Ok((config, strings))
}

/// Store rooted at the file's directory, keyed by its stem
fn open_record(path: &Path, config: &SheetConfig) -> Result<(JsonFileStore, CharacterRecord), AppError> {
    let id = path
        .file_stem()
        .and_then(|s| s.to_str())
        .ok_or_else(|| AppError::BadPath(path.to_path_buf()))?;
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };
    let store = JsonFileStore::new(dir)?;
    let record = if store.exists(id) {
        store.load(id)?
    } else {
        tracing::info!("{} not found, starting a new character", id);
        CharacterRecord::new(id, id, config)
    };
    Ok((store, record))
}
