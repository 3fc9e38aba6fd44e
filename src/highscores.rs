//! Best score and recent-round history
//!
//! Persisted through a [`Storage`] backend after every round, keeps the last
//! 10 rounds.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use crate::consts::MAX_RECENT_SCORES;
use crate::persistence::{self, Storage};

/// One finished round
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreRecord {
    pub score: u64,
    /// RFC 3339 timestamp (UTC)
    pub date: String,
}

/// The persisted layout
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreData {
    #[serde(default)]
    pub high_score: u64,
    /// Oldest first
    #[serde(default)]
    pub recent: VecDeque<ScoreRecord>,
}

impl ScoreData {
    /// Repair data read from disk: keep only the newest entries and make
    /// sure the best score covers them.
    fn normalized(mut self) -> Self {
        while self.recent.len() > MAX_RECENT_SCORES {
            self.recent.pop_front();
        }
        let best_recent = self.recent.iter().map(|r| r.score).max().unwrap_or(0);
        self.high_score = self.high_score.max(best_recent);
        self
    }
}

/// Result of recording a round
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordOutcome {
    /// Score beat the previous best (ties do not count)
    pub new_best: bool,
    /// Record reached the backing storage
    pub persisted: bool,
}

/// High score store with its backing storage
pub struct ScoreStore {
    data: ScoreData,
    storage: Box<dyn Storage>,
}

impl std::fmt::Debug for ScoreStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScoreStore")
            .field("data", &self.data)
            .field("storage", &self.storage.describe())
            .finish()
    }
}

impl ScoreStore {
    /// Load from storage. Missing or corrupt data gives an empty store.
    pub fn load(storage: impl Storage + 'static) -> Self {
        let storage: Box<dyn Storage> = Box::new(storage);
        let data = match persistence::load_json::<ScoreData>(storage.as_ref()) {
            Ok(Some(data)) => {
                let data = data.normalized();
                log::info!(
                    "Loaded scores from {} (best {}, {} recent)",
                    storage.describe(),
                    data.high_score,
                    data.recent.len()
                );
                data
            }
            Ok(None) => {
                log::info!("No scores found at {}, starting fresh", storage.describe());
                ScoreData::default()
            }
            Err(e) => {
                log::warn!("Ignoring unreadable scores at {}: {}", storage.describe(), e);
                ScoreData::default()
            }
        };
        Self { data, storage }
    }

    pub fn high_score(&self) -> u64 {
        self.data.high_score
    }

    /// Recent rounds, oldest first
    pub fn recent(&self) -> impl ExactSizeIterator<Item = &ScoreRecord> + '_ {
        self.data.recent.iter()
    }

    /// Most recent round, if any
    pub fn latest(&self) -> Option<&ScoreRecord> {
        self.data.recent.back()
    }

    pub fn data(&self) -> &ScoreData {
        &self.data
    }

    /// Record a finished round stamped with the current time
    pub fn record(&mut self, score: u64) -> RecordOutcome {
        self.record_at(score, now_rfc3339())
    }

    /// Record a finished round with an explicit date string
    pub fn record_at(&mut self, score: u64, date: String) -> RecordOutcome {
        if self.data.recent.len() >= MAX_RECENT_SCORES {
            self.data.recent.pop_front();
        }
        self.data.recent.push_back(ScoreRecord { score, date });

        let new_best = score > self.data.high_score;
        self.data.high_score = self.data.high_score.max(score);

        let persisted = match persistence::save_json(self.storage.as_mut(), &self.data) {
            Ok(()) => {
                log::info!("Scores saved (score {}, best {})", score, self.data.high_score);
                true
            }
            Err(e) => {
                log::warn!("Failed to save scores to {}: {}", self.storage.describe(), e);
                false
            }
        };

        RecordOutcome {
            new_best,
            persisted,
        }
    }
}

fn now_rfc3339() -> String {
    OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .unwrap_or_else(|_| String::from("unknown"))
}

/// Format a stored date relative to `now` for the scores screen
pub fn format_date(date: &str, now: OffsetDateTime) -> String {
    let Ok(then) = OffsetDateTime::parse(date, &Rfc3339) else {
        return "N/A".to_string();
    };

    let diff = now - then;
    let days = diff.whole_days();
    let hours = diff.whole_hours();
    let mins = diff.whole_minutes();

    if days >= 1 {
        if days == 1 {
            "Yesterday".to_string()
        } else if days < 7 {
            format!("{} days ago", days)
        } else {
            format!(
                "{}/{}/{:02}",
                u8::from(then.month()),
                then.day(),
                then.year() % 100
            )
        }
    } else if hours >= 1 {
        if hours == 1 {
            "1 hour ago".to_string()
        } else {
            format!("{} hours ago", hours)
        }
    } else if mins >= 1 {
        if mins == 1 {
            "1 min ago".to_string()
        } else {
            format!("{} mins ago", mins)
        }
    } else {
        "Just now".to_string()
    }
}
