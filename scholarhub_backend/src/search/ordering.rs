//! Sort criteria with sticky records pinned to the front.

use chrono::{DateTime, Utc};
use std::cmp::Reverse;
use std::fmt;
use std::str::FromStr;

use crate::error::ScholarhubError;
use crate::store::models::Thread;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortCriterion {
    #[default]
    Newest,
    Popular,
    Trending,
}

impl SortCriterion {
    pub const ALL: [SortCriterion; 3] = [
        SortCriterion::Newest,
        SortCriterion::Popular,
        SortCriterion::Trending,
    ];

    pub fn label(self) -> &'static str {
        match self {
            SortCriterion::Newest => "Newest",
            SortCriterion::Popular => "Popular",
            SortCriterion::Trending => "Trending",
        }
    }
}

impl fmt::Display for SortCriterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for SortCriterion {
    type Err = ScholarhubError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_lowercase().as_str() {
            "new" | "newest" => Ok(SortCriterion::Newest),
            "popular" => Ok(SortCriterion::Popular),
            "trending" => Ok(SortCriterion::Trending),
            other => Err(ScholarhubError::unknown_option("sort", other)),
        }
    }
}

/// What the sort policy needs to know about a record.
pub trait Rankable {
    fn posted_at(&self) -> DateTime<Utc>;
    fn views(&self) -> u32;
    fn replies(&self) -> u32;
    fn is_pinned(&self) -> bool;

    fn trending_score(&self) -> u64 {
        2 * u64::from(self.replies()) + u64::from(self.views())
    }
}

impl Rankable for Thread {
    fn posted_at(&self) -> DateTime<Utc> {
        self.posted_at
    }

    fn views(&self) -> u32 {
        self.views
    }

    fn replies(&self) -> u32 {
        self.replies
    }

    fn is_pinned(&self) -> bool {
        self.is_sticky
    }
}

impl<T: Rankable + ?Sized> Rankable for &T {
    fn posted_at(&self) -> DateTime<Utc> {
        (**self).posted_at()
    }

    fn views(&self) -> u32 {
        (**self).views()
    }

    fn replies(&self) -> u32 {
        (**self).replies()
    }

    fn is_pinned(&self) -> bool {
        (**self).is_pinned()
    }
}

/// Orders `records` by `criterion`, then moves pinned records to the front.
///
/// Both steps are stable, so ties keep their input order and pinned records
/// keep the criterion's order among themselves.
pub fn order<T: Rankable>(records: &mut [T], criterion: SortCriterion) {
    match criterion {
        SortCriterion::Newest => records.sort_by_key(|r| Reverse(r.posted_at())),
        SortCriterion::Popular => records.sort_by_key(|r| Reverse(r.views())),
        SortCriterion::Trending => records.sort_by_key(|r| Reverse(r.trending_score())),
    }
    records.sort_by_key(|r| !r.is_pinned());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::RecordStore;
    use chrono::Duration;
    use pretty_assertions::assert_eq;

    fn thread(id: &str, age_days: i64, replies: u32, views: u32, sticky: bool) -> Thread {
        let mut thread = RecordStore::seeded(Utc::now()).threads[1].clone();
        thread.id = id.into();
        thread.posted_at = Utc::now() - Duration::days(age_days);
        thread.replies = replies;
        thread.views = views;
        thread.is_sticky = sticky;
        thread
    }

    fn ids(threads: &[&Thread]) -> Vec<String> {
        threads.iter().map(|t| t.id.clone()).collect()
    }

    fn ordered(mut threads: Vec<Thread>, criterion: SortCriterion) -> Vec<Thread> {
        order(&mut threads, criterion);
        threads
    }

    #[test]
    fn sticky_thread_leads_popular_even_with_fewest_views() {
        let threads = vec![
            thread("a", 1, 1, 500, false),
            thread("b", 2, 1, 300, false),
            thread("pinned", 3, 1, 5, true),
            thread("c", 4, 1, 900, false),
            thread("d", 5, 1, 100, false),
            thread("e", 6, 1, 700, false),
        ];
        let sorted = ordered(threads, SortCriterion::Popular);
        let refs: Vec<&Thread> = sorted.iter().collect();
        assert_eq!(ids(&refs), vec!["pinned", "c", "e", "a", "b", "d"]);
    }

    #[test]
    fn newest_uses_timestamps() {
        let threads = vec![
            thread("old", 9, 0, 0, false),
            thread("fresh", 0, 0, 0, false),
            thread("mid", 3, 0, 0, false),
        ];
        let sorted = ordered(threads, SortCriterion::Newest);
        let refs: Vec<&Thread> = sorted.iter().collect();
        assert_eq!(ids(&refs), vec!["fresh", "mid", "old"]);
    }

    #[test]
    fn trending_weights_replies_twice() {
        let threads = vec![
            thread("views", 0, 0, 100, false),
            thread("talky", 0, 60, 0, false),
        ];
        let sorted = ordered(threads, SortCriterion::Trending);
        assert_eq!(sorted[0].id, "talky");
    }

    #[test]
    fn ties_keep_input_order() {
        let threads = vec![
            thread("first", 0, 0, 10, false),
            thread("second", 0, 0, 10, false),
            thread("third", 0, 0, 10, false),
        ];
        let sorted = ordered(threads, SortCriterion::Popular);
        let refs: Vec<&Thread> = sorted.iter().collect();
        assert_eq!(ids(&refs), vec!["first", "second", "third"]);
    }

    #[test]
    fn ordering_is_idempotent_and_keeps_pins_first() {
        let store = RecordStore::seeded(Utc::now());
        for criterion in SortCriterion::ALL {
            let once = ordered(store.threads.clone(), criterion);
            let twice = ordered(once.clone(), criterion);
            assert_eq!(once, twice);

            let first_unpinned = once.iter().position(|t| !t.is_sticky).unwrap_or(once.len());
            assert!(once[first_unpinned..].iter().all(|t| !t.is_sticky));
        }
    }

    #[test]
    fn pinned_records_follow_the_criterion_among_themselves() {
        let threads = vec![
            thread("low", 0, 0, 1, true),
            thread("plain", 0, 0, 50, false),
            thread("high", 0, 0, 9, true),
        ];
        let sorted = ordered(threads, SortCriterion::Popular);
        let refs: Vec<&Thread> = sorted.iter().collect();
        assert_eq!(ids(&refs), vec!["high", "low", "plain"]);
    }

    #[test]
    fn criteria_parse_from_cli_words() {
        assert_eq!("new".parse::<SortCriterion>(), Ok(SortCriterion::Newest));
        assert_eq!("Popular".parse::<SortCriterion>(), Ok(SortCriterion::Popular));
        assert!("oldest".parse::<SortCriterion>().is_err());
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        /// Threads whose ids are their input positions.
        fn threads_from(specs: &[(i64, u32, u32, bool)]) -> Vec<Thread> {
            let template = RecordStore::seeded(Utc::now()).threads[1].clone();
            specs
                .iter()
                .enumerate()
                .map(|(index, &(age_hours, replies, views, sticky))| {
                    let mut thread = template.clone();
                    thread.id = index.to_string();
                    thread.posted_at = template.posted_at - Duration::hours(age_hours);
                    thread.replies = replies;
                    thread.views = views;
                    thread.is_sticky = sticky;
                    thread
                })
                .collect()
        }

        fn criterion() -> impl Strategy<Value = SortCriterion> {
            prop_oneof![
                Just(SortCriterion::Newest),
                Just(SortCriterion::Popular),
                Just(SortCriterion::Trending),
            ]
        }

        fn key(thread: &Thread, criterion: SortCriterion) -> i64 {
            match criterion {
                SortCriterion::Newest => thread.posted_at.timestamp(),
                SortCriterion::Popular => i64::from(thread.views),
                SortCriterion::Trending => thread.trending_score() as i64,
            }
        }

        fn position(thread: &Thread) -> usize {
            thread.id.parse().expect("numeric id")
        }

        proptest! {
            #[test]
            fn order_is_a_stable_pinned_first_permutation(
                specs in prop::collection::vec((0i64..500, 0u32..50, 0u32..1000, any::<bool>()), 0..12),
                criterion in criterion(),
            ) {
                let threads = threads_from(&specs);
                let sorted = ordered(threads.clone(), criterion);

                let mut before: Vec<usize> = threads.iter().map(position).collect();
                let mut after: Vec<usize> = sorted.iter().map(position).collect();
                before.sort_unstable();
                after.sort_unstable();
                prop_assert_eq!(before, after);

                let pinned = sorted.iter().take_while(|t| t.is_sticky).count();
                prop_assert!(sorted[pinned..].iter().all(|t| !t.is_sticky));

                for group in [&sorted[..pinned], &sorted[pinned..]] {
                    for pair in group.windows(2) {
                        let (a, b) = (key(&pair[0], criterion), key(&pair[1], criterion));
                        prop_assert!(a >= b);
                        if a == b {
                            prop_assert!(position(&pair[0]) < position(&pair[1]));
                        }
                    }
                }

                prop_assert_eq!(ordered(sorted.clone(), criterion), sorted);
            }
        }
    }
}
