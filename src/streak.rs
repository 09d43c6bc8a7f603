// src/streak.rs

use crate::models::{day_of, JournalEntry, DAY_MILLIS};
use chrono::{Local, NaiveDate};

/// Consecutive journaled days ending today, by the local clock.
pub fn current_streak(entries: &[JournalEntry]) -> u32 {
    calculate_streak(entries, Local::now().date_naive())
}

/// Counts consecutive days with at least one entry, walking back from `today`.
///
/// Today must itself be journaled; a missing day of any length ends the chain.
/// Days after `today` are ignored.
pub fn calculate_streak(entries: &[JournalEntry], today: NaiveDate) -> u32 {
    let mut days: Vec<NaiveDate> = entries.iter().map(|e| day_of(e.date)).collect();
    days.sort_unstable_by(|a, b| b.cmp(a));
    days.dedup();

    let mut streak = 0;
    let mut cursor = today;
    for day in days {
        if day == cursor {
            streak += 1;
            cursor = match cursor.pred_opt() {
                Some(prev) => prev,
                None => break,
            };
        } else if day < cursor {
            break;
        }
    }
    streak
}

/// Stored date of the oldest entry in the most recent run of entries.
///
/// Unlike `calculate_streak` this tolerates a single missing day between
/// entries and does not anchor the run to today.
pub fn current_streak_start_date(entries: &[JournalEntry]) -> Option<i64> {
    let mut dates: Vec<i64> = entries.iter().map(|e| e.date).collect();
    dates.sort_unstable_by(|a, b| b.cmp(a));
    dates.dedup();

    let (&newest, older) = dates.split_first()?;
    let mut start = newest;
    for &date in older {
        if start - date > DAY_MILLIS * 2 {
            break;
        }
        start = date;
    }
    Some(start)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{day_start_millis, Tags};
    use chrono::Days;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 8, 10).unwrap()
    }

    fn entry_on(day: NaiveDate) -> JournalEntry {
        JournalEntry::new("entry", 0, Tags::default(), day_start_millis(day))
    }

    fn days_ago(n: u64) -> NaiveDate {
        today().checked_sub_days(Days::new(n)).unwrap()
    }

    #[test]
    fn empty_history_has_no_streak() {
        assert_eq!(calculate_streak(&[], today()), 0);
        assert_eq!(current_streak_start_date(&[]), None);
    }

    #[test]
    fn three_consecutive_days() {
        let entries = vec![entry_on(today()), entry_on(days_ago(1)), entry_on(days_ago(2))];
        assert_eq!(calculate_streak(&entries, today()), 3);
    }

    #[test]
    fn gap_breaks_the_chain() {
        let entries = vec![entry_on(today()), entry_on(days_ago(2))];
        assert_eq!(calculate_streak(&entries, today()), 1);
    }

    #[test]
    fn today_not_journaled_yet() {
        let entries = vec![entry_on(days_ago(1)), entry_on(days_ago(2))];
        assert_eq!(calculate_streak(&entries, today()), 0);
    }

    #[test]
    fn multiple_entries_per_day_count_once() {
        let entries = vec![
            entry_on(today()),
            entry_on(today()),
            entry_on(days_ago(1)),
            entry_on(days_ago(1)),
        ];
        assert_eq!(calculate_streak(&entries, today()), 2);
    }

    #[test]
    fn future_entries_are_skipped() {
        let tomorrow = today().succ_opt().unwrap();
        let entries = vec![entry_on(tomorrow), entry_on(today()), entry_on(days_ago(1))];
        assert_eq!(calculate_streak(&entries, today()), 2);
    }

    #[test]
    fn input_order_does_not_matter() {
        let entries = vec![entry_on(days_ago(2)), entry_on(today()), entry_on(days_ago(1))];
        assert_eq!(calculate_streak(&entries, today()), 3);
    }

    #[test]
    fn start_date_tolerates_one_missing_day() {
        let entries = vec![entry_on(today()), entry_on(days_ago(2)), entry_on(days_ago(3))];
        assert_eq!(
            current_streak_start_date(&entries),
            Some(day_start_millis(days_ago(3)))
        );
    }

    #[test]
    fn start_date_stops_at_two_missing_days() {
        let entries = vec![entry_on(today()), entry_on(days_ago(1)), entry_on(days_ago(4))];
        assert_eq!(
            current_streak_start_date(&entries),
            Some(day_start_millis(days_ago(1)))
        );
    }

    #[test]
    fn start_date_is_not_anchored_to_today() {
        let entries = vec![entry_on(days_ago(5)), entry_on(days_ago(6))];
        assert_eq!(
            current_streak_start_date(&entries),
            Some(day_start_millis(days_ago(6)))
        );
    }
}
