use serde::Serialize;

use dove_types::models::{BroadcastRecord, SourceType};

/// Color key used by the view layer to style a badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BadgeColor {
    Live,
    Recorded,
    Uploaded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Badge {
    pub badge_label: &'static str,
    pub badge_color_key: BadgeColor,
}

impl Badge {
    pub const LIVE: Badge = Badge {
        badge_label: "LIVE",
        badge_color_key: BadgeColor::Live,
    };
    pub const RECORDED: Badge = Badge {
        badge_label: "LIVE RECORDED",
        badge_color_key: BadgeColor::Recorded,
    };
    pub const UPLOADED: Badge = Badge {
        badge_label: "UPLOADED",
        badge_color_key: BadgeColor::Uploaded,
    };
}

/// Derive the display badge for a record. First matching rule wins:
/// on air, then podcast archived from a live session, then plain upload.
pub fn classify(record: &BroadcastRecord) -> Badge {
    if record.is_live {
        Badge::LIVE
    } else if record.source_type == SourceType::Podcast && record.broadcast_start_time.is_some() {
        Badge::RECORDED
    } else {
        Badge::UPLOADED
    }
}
