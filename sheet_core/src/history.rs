//! HistoryLog - append-only audit trail owned by the character record

use crate::types::{HuntFrequency, RollMode};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Payload of a history entry, tagged by `kind`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum HistoryEvent {
    CorruptionThresholdCrossed {
        hunt_frequency: HuntFrequency,
        corruption: i32,
    },
    Roll {
        skill: String,
        total: i32,
        humanity: i32,
        bestiality: i32,
        corruption: i32,
        mode: RollMode,
        d6: u32,
        d12: u32,
        modifier: i32,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub timestamp: DateTime<Utc>,
    #[serde(flatten)]
    pub event: HistoryEvent,
}

impl HistoryEntry {
    pub fn now(event: HistoryEvent) -> Self {
        HistoryEntry {
            timestamp: Utc::now(),
            event,
        }
    }

    /// One-line description for audit views
    pub fn summary(&self) -> String {
        match &self.event {
            HistoryEvent::CorruptionThresholdCrossed {
                hunt_frequency,
                corruption,
            } => format!("corruption {} -> hunt {}", corruption, hunt_frequency),
            HistoryEvent::Roll {
                skill, total, mode, ..
            } => format!("{} ({:?}) = {}", skill, mode, total),
        }
    }
}

/// Append-only ordered event log
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HistoryLog {
    entries: Vec<HistoryEntry>,
}

impl HistoryLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, entry: HistoryEntry) {
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn rolls(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries
            .iter()
            .filter(|e| matches!(e.event, HistoryEvent::Roll { .. }))
    }

    /// Most recent threshold crossing, if any
    pub fn last_threshold_crossing(&self) -> Option<&HistoryEntry> {
        self.entries
            .iter()
            .rev()
            .find(|e| matches!(e.event, HistoryEvent::CorruptionThresholdCrossed { .. }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn crossing(frequency: HuntFrequency, corruption: i32) -> HistoryEntry {
        HistoryEntry::now(HistoryEvent::CorruptionThresholdCrossed {
            hunt_frequency: frequency,
            corruption,
        })
    }

    #[test]
    fn test_entry_serializes_with_kind_tag() {
        let entry = crossing(HuntFrequency::Weekly, 3);
        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(value["kind"], "corruption-threshold-crossed");
        assert_eq!(value["hunt_frequency"], "weekly");
        assert_eq!(value["corruption"], 3);
        assert!(value["timestamp"].is_string());

        let back: HistoryEntry = serde_json::from_value(value).unwrap();
        assert_eq!(back, entry);
    }

    #[test]
    fn test_last_threshold_crossing() {
        let mut log = HistoryLog::new();
        assert!(log.last_threshold_crossing().is_none());

        log.append(crossing(HuntFrequency::Weekly, 3));
        log.append(HistoryEntry::now(HistoryEvent::Roll {
            skill: "brawl".to_string(),
            total: 9,
            humanity: 6,
            bestiality: 6,
            corruption: 3,
            mode: RollMode::Sacred,
            d6: 2,
            d12: 5,
            modifier: 0,
        }));
        log.append(crossing(HuntFrequency::Daily, 9));

        assert_eq!(log.len(), 3);
        assert_eq!(log.rolls().count(), 1);
        let last = log.last_threshold_crossing().unwrap();
        assert!(matches!(
            last.event,
            HistoryEvent::CorruptionThresholdCrossed {
                hunt_frequency: HuntFrequency::Daily,
                ..
            }
        ));
    }

    #[test]
    fn test_summary() {
        assert_eq!(
            crossing(HuntFrequency::TwiceWeekly, 6).summary(),
            "corruption 6 -> hunt twice-weekly"
        );
    }
}
