//! In-memory calendar

use super::{Calendar, HostError};
use std::sync::Mutex;

/// A reminder accepted by `ReminderLog`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reminder {
    pub offset_days: u32,
    pub title: String,
    pub description: String,
}

/// Records reminders instead of talking to a real calendar
#[derive(Debug, Default)]
pub struct ReminderLog {
    reminders: Mutex<Vec<Reminder>>,
}

impl ReminderLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reminders(&self) -> Vec<Reminder> {
        self.reminders
            .lock()
            .map(|r| r.clone())
            .unwrap_or_default()
    }
}

impl Calendar for ReminderLog {
    fn schedule_reminder(
        &self,
        offset_days: u32,
        title: &str,
        description: &str,
    ) -> Result<(), HostError> {
        let mut reminders = self
            .reminders
            .lock()
            .map_err(|_| HostError::Unavailable("reminder log"))?;
        reminders.push(Reminder {
            offset_days,
            title: title.to_string(),
            description: description.to_string(),
        });
        Ok(())
    }
}
