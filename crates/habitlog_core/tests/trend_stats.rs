use chrono::NaiveDate;
use habitlog_core::{HabitState, MemoryKvStore, Tracker, TREND_WINDOW_DAYS};

#[test]
fn trend_covers_thirty_ascending_days_ending_at_window_end() {
    let mut tracker = fresh_tracker();
    let id = tracker.add_habit("Read", "blue", false).unwrap();

    let end = day(2024, 1, 30);
    let series = tracker.trend_window(&id, end).unwrap();

    assert_eq!(series.len(), TREND_WINDOW_DAYS as usize);
    assert_eq!(series.first().unwrap().date, day(2024, 1, 1));
    assert_eq!(series.last().unwrap().date, end);
    assert!(series.windows(2).all(|pair| pair[0].date < pair[1].date));
}

#[test]
fn trend_reports_completed_then_skipped_for_marked_days() {
    let mut tracker = fresh_tracker();
    let id = tracker.add_habit("Read", "blue", false).unwrap();

    tracker
        .set_habit_state("2024-01-01", &id, HabitState::Completed)
        .unwrap();
    tracker
        .set_habit_state("2024-01-02", &id, HabitState::Skipped)
        .unwrap();

    let series = tracker.trend_window(&id, day(2024, 1, 30)).unwrap();
    assert_eq!(series[0].state, HabitState::Completed);
    assert_eq!(series[1].state, HabitState::Skipped);
    assert!(series[2..]
        .iter()
        .all(|point| point.state == HabitState::Missed));
}

#[test]
fn completion_rate_counts_completed_days_only() {
    let mut tracker = fresh_tracker();
    let id = tracker.add_habit("Read", "blue", false).unwrap();

    tracker
        .set_habit_state("2024-01-01", &id, HabitState::Completed)
        .unwrap();
    tracker
        .set_habit_state("2024-01-02", &id, HabitState::Skipped)
        .unwrap();

    // round(100 * 1 / 30) = 3; the skipped day must not count.
    let rate = tracker.completion_rate_window(&id, day(2024, 1, 30)).unwrap();
    assert_eq!(rate, 3);
}

#[test]
fn completion_rate_is_bounded_between_zero_and_one_hundred() {
    let mut tracker = fresh_tracker();
    let id = tracker.add_habit("Read", "blue", false).unwrap();

    let end = day(2024, 3, 30);
    assert_eq!(tracker.completion_rate_window(&id, end).unwrap(), 0);

    for offset in 0..TREND_WINDOW_DAYS {
        let date = end - chrono::Duration::days(offset);
        tracker
            .set_habit_state(
                &habitlog_core::datekey::to_key(date),
                &id,
                HabitState::Completed,
            )
            .unwrap();
    }
    assert_eq!(tracker.completion_rate_window(&id, end).unwrap(), 100);
}

#[test]
fn trend_for_an_unknown_habit_is_all_missed() {
    let mut tracker = fresh_tracker();
    tracker.add_habit("Read", "blue", false).unwrap();

    let series = tracker.trend_window("ghost", day(2024, 1, 30)).unwrap();
    assert!(series
        .iter()
        .all(|point| point.state == HabitState::Missed));
}

#[test]
fn trend_resolution_backfills_the_window_records() {
    let mut tracker = fresh_tracker();
    let id = tracker.add_habit("Read", "blue", false).unwrap();

    tracker.trend_window(&id, day(2024, 1, 30)).unwrap();

    let record = &tracker.state().records["2024-01-15"];
    assert_eq!(record.habit_states.get(&id), Some(&HabitState::Missed));
}

#[test]
fn todays_bar_is_flagged_in_the_live_window() {
    let mut tracker = fresh_tracker();
    let id = tracker.add_habit("Read", "blue", false).unwrap();

    let series = tracker.trend(&id).unwrap();
    assert!(series.last().unwrap().is_today);
    assert!(series[..TREND_WINDOW_DAYS as usize - 1]
        .iter()
        .all(|point| !point.is_today));
}

#[test]
fn past_windows_contain_no_today_flag() {
    let mut tracker = fresh_tracker();
    let id = tracker.add_habit("Read", "blue", false).unwrap();

    let series = tracker.trend_window(&id, day(2020, 6, 30)).unwrap();
    assert!(series.iter().all(|point| !point.is_today));
}

fn fresh_tracker() -> Tracker<MemoryKvStore> {
    Tracker::init(MemoryKvStore::new()).unwrap()
}

fn day(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid test date")
}
