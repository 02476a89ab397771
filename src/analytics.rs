use std::{collections::BTreeMap, sync::Arc};

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    clock::{Clock, current_date_key, date_key},
    store::{self, SharedStore, StoreKey},
};

const WEEK_LEN: u64 = 7;

// ============================================================================
// Data Models
// ============================================================================

#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DayRecord {
    #[serde(default)]
    pub focus_seconds: u64,
    #[serde(default)]
    pub completed_sessions: u32,
}

impl DayRecord {
    /// Whole focus minutes, always derived from the second counter.
    pub fn minutes(&self) -> u64 {
        self.focus_seconds / 60
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(from = "Value")]
pub struct AnalyticsStore {
    pub days: BTreeMap<String, DayRecord>,
}

// Day entries are read one by one; an unreadable day is dropped on its own
// and the rest of the history is kept.
impl From<Value> for AnalyticsStore {
    fn from(value: Value) -> Self {
        let Some(entries) = value.get("days").and_then(Value::as_object) else {
            return Self::default();
        };

        let days = entries
            .iter()
            .filter_map(|(key, raw)| match DayRecord::deserialize(raw) {
                Ok(record) => Some((key.clone(), record)),
                Err(e) => {
                    tracing::warn!(day = %key, error = %e, "dropping unreadable day record");
                    None
                }
            })
            .collect();
        Self { days }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayEntry {
    pub date: NaiveDate,
    pub record: DayRecord,
}

impl DayEntry {
    pub fn key(&self) -> String {
        date_key(self.date)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WeekSummary {
    pub week_minutes: u64,
    pub week_sessions: u32,
    pub today_minutes: u64,
}

impl WeekSummary {
    /// Expects the oldest-first window from [`Aggregator::last_7_days`].
    pub fn from_days(days: &[DayEntry]) -> Self {
        Self {
            week_minutes: days.iter().map(|d| d.record.minutes()).sum(),
            week_sessions: days.iter().map(|d| d.record.completed_sessions).sum(),
            today_minutes: days.last().map(|d| d.record.minutes()).unwrap_or(0),
        }
    }
}

// ============================================================================
// Aggregator
// ============================================================================

pub struct Aggregator {
    data: AnalyticsStore,
    clock: Arc<dyn Clock>,
    storage: SharedStore,
}

impl Aggregator {
    pub fn load(storage: SharedStore, clock: Arc<dyn Clock>) -> Self {
        let data = store::load_or_default(storage.as_ref(), StoreKey::Analytics);
        Self {
            data,
            clock,
            storage,
        }
    }

    pub fn data(&self) -> &AnalyticsStore {
        &self.data
    }

    /// Credits `seconds` of focus time to whatever day it is right now.
    pub fn add_focus_seconds(&mut self, seconds: u64) {
        if seconds == 0 {
            return;
        }
        let record = self.today_entry();
        record.focus_seconds += seconds;
        self.persist();
    }

    /// Returns today's completed-session count after the increment.
    pub fn record_session_completed(&mut self) -> u32 {
        let record = self.today_entry();
        record.completed_sessions += 1;
        let count = record.completed_sessions;
        self.persist();
        tracing::info!(sessions_today = count, "focus session completed");
        count
    }

    pub fn today(&self) -> DayRecord {
        let key = current_date_key(self.clock.as_ref());
        self.data.days.get(&key).copied().unwrap_or_default()
    }

    pub fn last_7_days(&self) -> Vec<DayEntry> {
        let today = self.clock.today();
        (0..WEEK_LEN)
            .rev()
            .filter_map(|back| today.checked_sub_days(Days::new(back)))
            .map(|date| DayEntry {
                date,
                record: self.data.days.get(&date_key(date)).copied().unwrap_or_default(),
            })
            .collect()
    }

    pub fn week_summary(&self) -> WeekSummary {
        WeekSummary::from_days(&self.last_7_days())
    }

    pub fn clear_all(&mut self) {
        self.data.days.clear();
        if let Err(e) = self.storage.remove(StoreKey::Analytics) {
            tracing::warn!(error = %e, "could not remove analytics record");
        }
        tracing::info!("analytics cleared");
    }

    fn today_entry(&mut self) -> &mut DayRecord {
        let key = current_date_key(self.clock.as_ref());
        self.data.days.entry(key).or_default()
    }

    fn persist(&self) {
        if let Err(e) = store::save(self.storage.as_ref(), StoreKey::Analytics, &self.data) {
            tracing::warn!(error = %e, "could not persist analytics");
        }
    }
}
