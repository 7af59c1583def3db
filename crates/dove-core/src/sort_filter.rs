use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use dove_types::models::{BroadcastRecord, BroadcastStatus};

/// The stat card currently selected in the radio manager. Exactly one is
/// active at a time; it picks both the filter and the sort order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActiveStat {
    #[default]
    Date,
    LiveRecordings,
    Listens,
    Published,
    Draft,
}

impl ActiveStat {
    pub const ALL: [ActiveStat; 5] = [
        ActiveStat::Date,
        ActiveStat::LiveRecordings,
        ActiveStat::Listens,
        ActiveStat::Published,
        ActiveStat::Draft,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Date => "date",
            Self::LiveRecordings => "live_recordings",
            Self::Listens => "listens",
            Self::Published => "published",
            Self::Draft => "draft",
        }
    }

    fn keeps(self, record: &BroadcastRecord) -> bool {
        match self {
            Self::Published => record.status == Some(BroadcastStatus::Published),
            Self::Draft => record.status == Some(BroadcastStatus::Draft),
            Self::LiveRecordings => record.broadcast_start_time.is_some(),
            Self::Date | Self::Listens => true,
        }
    }
}

impl fmt::Display for ActiveStat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown stat '{0}', expected one of: date, live_recordings, listens, published, draft")]
pub struct ParseStatError(pub String);

impl FromStr for ActiveStat {
    type Err = ParseStatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ActiveStat::ALL
            .into_iter()
            .find(|stat| stat.as_str() == s)
            .ok_or_else(|| ParseStatError(s.to_string()))
    }
}

/// Timestamp used for "most recent first" ordering:
/// `publishedAt`, then the podcast `date`, then `broadcastStartTime`,
/// then `createdAt`, then the epoch.
pub fn effective_timestamp(record: &BroadcastRecord) -> DateTime<Utc> {
    record
        .published_at
        .or(record.date)
        .or(record.broadcast_start_time)
        .or(record.created_at)
        .unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
}

/// Filter then sort `records` for the given stat. Sorting is stable, so
/// records with equal keys keep their input order.
pub fn apply(records: &[BroadcastRecord], stat: ActiveStat) -> Vec<BroadcastRecord> {
    let mut view: Vec<BroadcastRecord> = records
        .iter()
        .filter(|r| stat.keeps(r))
        .cloned()
        .collect();

    match stat {
        ActiveStat::Date | ActiveStat::Published | ActiveStat::Draft => {
            view.sort_by_key(|r| std::cmp::Reverse(effective_timestamp(r)));
        }
        ActiveStat::LiveRecordings => {
            view.sort_by_key(|r| std::cmp::Reverse(r.broadcast_start_time));
        }
        ActiveStat::Listens => {
            view.sort_by_key(|r| std::cmp::Reverse(r.engagement()));
        }
    }

    view
}
