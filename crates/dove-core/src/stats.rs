use serde::Serialize;

use dove_types::models::{BroadcastRecord, BroadcastStatus};

/// Figures shown on the radio manager's stat cards.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BroadcastStats {
    pub total: usize,
    pub live_recordings: usize,
    pub total_listens: u64,
    pub published: usize,
    pub draft: usize,
    pub live_now: usize,
}

impl BroadcastStats {
    pub fn compute(records: &[BroadcastRecord]) -> Self {
        records.iter().fold(Self::default(), |mut stats, r| {
            stats.total += 1;
            stats.total_listens = stats.total_listens.saturating_add(r.engagement());
            if r.broadcast_start_time.is_some() {
                stats.live_recordings += 1;
            }
            if r.is_live {
                stats.live_now += 1;
            }
            match r.status {
                Some(BroadcastStatus::Published) => stats.published += 1,
                Some(BroadcastStatus::Draft) => stats.draft += 1,
                Some(BroadcastStatus::Scheduled) | None => {}
            }
            stats
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{at, live, podcast};
    use crate::merge;

    #[test]
    fn counts_cards() {
        let mut archived = podcast("p3", BroadcastStatus::Published, Some(30));
        archived.broadcast_start_time = Some(at(4));

        let records = merge(
            vec![
                podcast("p1", BroadcastStatus::Published, Some(850)),
                podcast("p2", BroadcastStatus::Draft, None),
                archived,
            ],
            vec![live("l1", true, Some(120))],
        );

        let stats = BroadcastStats::compute(&records);
        assert_eq!(
            stats,
            BroadcastStats {
                total: 4,
                live_recordings: 1,
                total_listens: 1000,
                published: 3,
                draft: 1,
                live_now: 1,
            }
        );
    }

    #[test]
    fn unstatused_live_is_neither_published_nor_draft() {
        let mut on_air = live("l1", true, Some(120));
        on_air.status = None;
        let records = merge(
            vec![
                podcast("p1", BroadcastStatus::Published, Some(850)),
                podcast("p2", BroadcastStatus::Draft, Some(0)),
            ],
            vec![on_air],
        );

        let stats = BroadcastStats::compute(&records);
        assert_eq!(stats.published, 1);
        assert_eq!(stats.draft, 1);
        assert_eq!(stats.live_now, 1);
    }

    #[test]
    fn huge_counts_saturate() {
        let records = merge(
            vec![
                podcast("p1", BroadcastStatus::Published, Some(u64::MAX)),
                podcast("p2", BroadcastStatus::Published, Some(5)),
            ],
            vec![],
        );
        assert_eq!(BroadcastStats::compute(&records).total_listens, u64::MAX);
    }

    #[test]
    fn empty_is_zero() {
        assert_eq!(BroadcastStats::compute(&[]), BroadcastStats::default());
    }
}
