#![forbid(unsafe_code)]
use chrono::{NaiveDate, Weekday};
use nobet::leave::{apply_approved_leave, classify, expand_weekly_pattern};
use nobet::{toggle_leave_date, LeaveError, LeaveMarker, LeaveSet, RawLeaveMarker};

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn mixed_markers() -> Vec<RawLeaveMarker> {
    vec![
        "2025-03-08".into(),
        2i64.into(),
        "5".into(),
        "2025-03-10T10:00:00".into(),
        "garbage".into(),
        9i64.into(),
        "2025-13-40".into(),
    ]
}

#[test]
fn normalize_splits_exact_dates_and_weekdays() {
    let set = LeaveSet::normalize(&mixed_markers());
    assert_eq!(set.exact_dates().iter().copied().collect::<Vec<_>>(), vec![d(2025, 3, 8)]);
    assert_eq!(set.weekly_weekdays(), vec![Weekday::Mon, Weekday::Tue, Weekday::Fri]);
}

#[test]
fn exact_date_marker_does_not_recur_weekly() {
    let set = LeaveSet::normalize(&mixed_markers());
    assert!(set.is_on_leave(d(2025, 3, 8)));
    assert!(!set.is_on_leave(d(2025, 3, 15)));
    assert!(set.is_on_leave(d(2025, 3, 11))); // mardi
    assert!(!set.is_on_leave(d(2025, 3, 12))); // mercredi
}

#[test]
fn classify_shapes() {
    assert_eq!(classify(&"2025-03-04".into()), Some(LeaveMarker::ExactDate(d(2025, 3, 4))));
    assert_eq!(classify(&RawLeaveMarker::Number(0)), Some(LeaveMarker::Weekday(Weekday::Sun)));
    assert_eq!(classify(&" 6 ".into()), Some(LeaveMarker::Weekday(Weekday::Sat)));
    assert_eq!(classify(&"04.03.2025".into()), Some(LeaveMarker::Weekday(Weekday::Tue)));
    assert_eq!(classify(&RawLeaveMarker::Number(7)), None);
    assert_eq!(classify(&RawLeaveMarker::Number(-1)), None);
    assert_eq!(classify(&"".into()), None);
    assert_eq!(classify(&RawLeaveMarker::Other(serde_json::json!(2.5))), None);
    // chiffres pleine chasse : ni date exacte, ni texte exploitable
    assert_eq!(classify(&"２０２５-０３-０４".into()), None);
}

#[test]
fn toggle_twice_restores_markers() {
    let today = d(2025, 3, 3);
    let original: Vec<RawLeaveMarker> = vec![2i64.into(), "2025-04-01".into()];

    let added = toggle_leave_date(&original, d(2025, 3, 4), today).unwrap();
    assert_eq!(added.len(), 3);
    assert!(added.contains(&RawLeaveMarker::Text("2025-03-04".into())));

    let restored = toggle_leave_date(&added, d(2025, 3, 4), today).unwrap();
    assert_eq!(restored, original);
}

#[test]
fn toggle_rejects_weekend_and_past() {
    let today = d(2025, 3, 3);
    assert_eq!(
        toggle_leave_date(&[], d(2025, 3, 8), today),
        Err(LeaveError::Weekend(d(2025, 3, 8)))
    );
    assert_eq!(
        toggle_leave_date(&[], d(2025, 2, 28), today),
        Err(LeaveError::PastDate(d(2025, 2, 28)))
    );
    assert!(toggle_leave_date(&[], today, today).is_ok());
}

#[test]
fn approved_leave_is_idempotent() {
    let mut markers = Vec::new();
    assert!(apply_approved_leave(&mut markers, d(2025, 3, 8)));
    assert!(!apply_approved_leave(&mut markers, d(2025, 3, 8)));
    assert_eq!(markers, vec![RawLeaveMarker::Text("2025-03-08".into())]);
}

#[test]
fn expand_weekly_pattern_lists_dates_in_order() {
    let dates = expand_weekly_pattern(&[Weekday::Thu, Weekday::Mon], d(2025, 3, 5), 2);
    assert_eq!(dates, vec![d(2025, 3, 6), d(2025, 3, 10), d(2025, 3, 13), d(2025, 3, 17)]);
    assert!(expand_weekly_pattern(&[Weekday::Mon], d(2025, 3, 5), 0).is_empty());
}
