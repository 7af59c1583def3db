use dove_types::models::{BroadcastRecord, LiveRecord, PodcastRecord};

/// Combine both source collections into one tagged list: podcasts first,
/// then live broadcasts, each in input order.
pub fn merge(podcasts: Vec<PodcastRecord>, live_broadcasts: Vec<LiveRecord>) -> Vec<BroadcastRecord> {
    let mut merged = Vec::with_capacity(podcasts.len() + live_broadcasts.len());
    merged.extend(podcasts.into_iter().map(BroadcastRecord::from));
    merged.extend(live_broadcasts.into_iter().map(BroadcastRecord::from));
    merged
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::fixtures::{live, podcast};
    use dove_types::models::{BroadcastStatus, SourceType};

    #[test]
    fn empty_inputs() {
        assert!(merge(vec![], vec![]).is_empty());
    }

    #[test]
    fn podcasts_then_live_in_input_order() {
        let merged = merge(
            vec![
                podcast("p2", BroadcastStatus::Draft, None),
                podcast("p1", BroadcastStatus::Published, None),
            ],
            vec![live("l1", true, None)],
        );

        assert_eq!(merged.len(), 3);
        let ids: Vec<_> = merged.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, ["p2", "p1", "l1"]);
        assert_eq!(merged[0].source_type, SourceType::Podcast);
        assert_eq!(merged[2].source_type, SourceType::Live);
    }

    #[test]
    fn colliding_ids_stay_distinguishable() {
        let merged = merge(
            vec![podcast("42", BroadcastStatus::Published, None)],
            vec![live("42", false, None)],
        );

        let keys: HashSet<_> = merged.iter().map(|r| r.key()).collect();
        assert_eq!(keys.len(), 2);
    }
}
