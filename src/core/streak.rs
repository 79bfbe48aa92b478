//! Activity streaks over the daily activity map

use chrono::{Days, NaiveDate};
use indexmap::IndexMap;

use crate::utils::{date_key, parse_date_key};

/// Longest run of consecutive active days within `year`.
///
/// Returns the run length and its dates. Of several runs of the same length
/// the earliest one is kept.
pub(crate) fn max_streak(daily: &IndexMap<String, u64>, year: i32) -> (usize, Vec<String>) {
    let prefix = format!("{year}-");
    let mut dates: Vec<&str> = daily
        .keys()
        .filter(|key| key.starts_with(&prefix))
        .map(String::as_str)
        .collect();
    if dates.is_empty() {
        return (0, Vec::new());
    }
    dates.sort_unstable();

    let (mut best_start, mut best_end) = (0, 0);
    let mut run_start = 0;
    for i in 1..dates.len() {
        if !is_next_day(dates[i - 1], dates[i]) {
            run_start = i;
        }
        if i - run_start > best_end - best_start {
            best_start = run_start;
            best_end = i;
        }
    }

    let days = dates[best_start..=best_end]
        .iter()
        .map(|d| (*d).to_string())
        .collect();
    (best_end - best_start + 1, days)
}

/// Consecutive active days ending today, or ending yesterday when today has
/// no activity yet.
pub(crate) fn current_streak(daily: &IndexMap<String, u64>, today: NaiveDate) -> usize {
    let active = |date: NaiveDate| daily.get(&date_key(date)).is_some_and(|count| *count > 0);

    let anchor = if active(today) {
        today
    } else {
        match today.checked_sub_days(Days::new(1)) {
            Some(yesterday) if active(yesterday) => yesterday,
            _ => return 0,
        }
    };

    let mut streak = 0;
    let mut cursor = Some(anchor);
    while let Some(date) = cursor
        && active(date)
    {
        streak += 1;
        cursor = date.checked_sub_days(Days::new(1));
    }
    streak
}

fn is_next_day(previous: &str, current: &str) -> bool {
    match (parse_date_key(previous), parse_date_key(current)) {
        (Some(prev), Some(cur)) => (cur - prev).num_days() == 1,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn daily(keys: &[&str]) -> IndexMap<String, u64> {
        keys.iter().map(|k| (k.to_string(), 1)).collect()
    }

    fn date(s: &str) -> NaiveDate {
        parse_date_key(s).unwrap()
    }

    #[test]
    fn empty_year_has_no_streak() {
        let map = daily(&["2024-05-01", "2024-05-02"]);
        assert_eq!(max_streak(&map, 2025), (0, Vec::new()));
    }

    #[test]
    fn single_day_is_streak_of_one() {
        let map = daily(&["2025-07-04"]);
        assert_eq!(max_streak(&map, 2025), (1, vec!["2025-07-04".to_string()]));
    }

    #[test]
    fn longest_run_is_found_regardless_of_insertion_order() {
        let map = daily(&[
            "2025-01-10",
            "2025-01-02",
            "2025-01-11",
            "2025-01-01",
            "2025-01-12",
            "2025-01-03",
            "2025-01-04",
        ]);
        let (len, days) = max_streak(&map, 2025);
        assert_eq!(len, 4);
        assert_eq!(
            days,
            vec!["2025-01-01", "2025-01-02", "2025-01-03", "2025-01-04"]
        );
    }

    #[test]
    fn ties_keep_the_earliest_run() {
        let map = daily(&[
            "2025-03-10",
            "2025-03-11",
            "2025-03-01",
            "2025-03-02",
            "2025-03-20",
        ]);
        let (len, days) = max_streak(&map, 2025);
        assert_eq!(len, 2);
        assert_eq!(days, vec!["2025-03-01", "2025-03-02"]);
    }

    #[test]
    fn runs_cross_month_boundaries() {
        let map = daily(&["2025-02-27", "2025-02-28", "2025-03-01", "2025-03-03"]);
        assert_eq!(max_streak(&map, 2025).0, 3);
    }

    #[test]
    fn max_streak_ignores_other_years() {
        let map = daily(&["2024-12-30", "2024-12-31", "2025-01-01"]);
        let (len, days) = max_streak(&map, 2025);
        assert_eq!(len, 1);
        assert_eq!(days, vec!["2025-01-01"]);
    }

    #[test]
    fn current_streak_anchored_today() {
        let map = daily(&["2025-01-01", "2025-01-02", "2025-01-03", "2025-01-04"]);
        assert_eq!(current_streak(&map, date("2025-01-04")), 4);
    }

    #[test]
    fn current_streak_anchored_yesterday() {
        let map = daily(&["2025-01-01", "2025-01-02", "2025-01-03", "2025-01-04"]);
        assert_eq!(current_streak(&map, date("2025-01-05")), 4);
    }

    #[test]
    fn current_streak_broken_by_gap() {
        let map = daily(&["2025-01-01", "2025-01-02", "2025-01-03", "2025-01-04"]);
        assert_eq!(current_streak(&map, date("2025-01-06")), 0);

        let gapped = daily(&["2025-01-01", "2025-01-03", "2025-01-04"]);
        assert_eq!(current_streak(&gapped, date("2025-01-04")), 2);
    }

    #[test]
    fn current_streak_bridges_new_year() {
        let map = daily(&["2024-12-30", "2024-12-31", "2025-01-01"]);
        assert_eq!(current_streak(&map, date("2025-01-01")), 3);
    }

    #[test]
    fn zero_count_is_not_activity() {
        let mut map = daily(&["2025-01-01"]);
        map.insert("2025-01-02".to_string(), 0);
        assert_eq!(current_streak(&map, date("2025-01-02")), 1);
    }
}
