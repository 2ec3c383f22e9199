#![forbid(unsafe_code)]
use chrono::NaiveDate;
use nobet::io::{export_grid_csv, import_staff_csv};
use nobet::{
    JsonStorage, LeaveSet, RawLeaveMarker, Roster, ScheduleGrid, StaffId, StaffMember, Storage,
};
use std::fs;
use tempfile::tempdir;

#[test]
fn json_storage_roundtrip() {
    let dir = tempdir().unwrap();
    let storage = JsonStorage::open(dir.path().join("roster.json"));
    let roster = Roster {
        staff: vec![
            StaffMember::emergency(1).with_name("Ayse").with_leave(["2025-03-04"]),
            StaffMember::new(2).with_leave([5i64]),
        ],
    };
    storage.save(&roster).unwrap();
    assert_eq!(storage.load().unwrap(), roster);
}

#[test]
fn missing_store_loads_empty() {
    let dir = tempdir().unwrap();
    let storage = JsonStorage::open(dir.path().join("absent.json"));
    assert!(storage.load().unwrap().staff.is_empty());
}

#[test]
fn corrupt_store_is_an_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("roster.json");
    fs::write(&path, "{ not json").unwrap();
    assert!(JsonStorage::open(&path).load().is_err());
}

#[test]
fn unreadable_markers_do_not_block_roster_load() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("roster.json");
    fs::write(
        &path,
        r#"{"staff":[
            {"id":1,"is_emergency_staff":true,"leave_markers":["2025-03-04", 3.5, null, true, {"day":2}]},
            {"id":2,"is_emergency_staff":true}
        ]}"#,
    )
    .unwrap();

    let storage = JsonStorage::open(&path);
    let roster = storage.load().unwrap();
    assert_eq!(roster.staff.len(), 2);

    let leave = LeaveSet::normalize(&roster.staff[0].leave_markers);
    assert!(leave.is_on_leave(NaiveDate::from_ymd_opt(2025, 3, 4).unwrap()));
    assert!(!leave.is_on_leave(NaiveDate::from_ymd_opt(2025, 3, 5).unwrap()));
    assert!(leave.weekly_weekdays().is_empty());

    // les valeurs inconnues sont réécrites telles quelles
    storage.save(&roster).unwrap();
    let reloaded = storage.load().unwrap();
    assert_eq!(reloaded, roster);
    assert_eq!(
        reloaded.staff[0].leave_markers[1],
        RawLeaveMarker::Other(serde_json::json!(3.5))
    );
    assert_eq!(reloaded.staff[0].leave_markers[2], RawLeaveMarker::Other(serde_json::Value::Null));
}

#[test]
fn import_staff_from_csv() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("staff.csv");
    fs::write(
        &path,
        "id,full_name,username,is_emergency,leave_markers\n\
         1,Ayse Yilmaz,ayse,true,2025-03-04;3\n\
         2,,burak,no,\n\
         3,Cem Demir,,evet,junk\n",
    )
    .unwrap();

    let staff = import_staff_csv(&path).unwrap();
    assert_eq!(staff.len(), 3);
    assert_eq!(staff[0].id, StaffId::new(1));
    assert!(staff[0].is_emergency_staff);
    assert_eq!(
        staff[0].leave_markers,
        vec![RawLeaveMarker::Text("2025-03-04".into()), RawLeaveMarker::Number(3)]
    );
    assert_eq!(staff[1].display_name(), "burak");
    assert!(!staff[1].is_emergency_staff);
    assert!(staff[2].is_emergency_staff);
    // marqueur illisible conservé tel quel, ignoré par le moteur
    assert_eq!(staff[2].leave_markers, vec![RawLeaveMarker::Text("junk".into())]);
}

#[test]
fn import_rejects_bad_rows() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("staff.csv");
    fs::write(&path, "id,full_name\nabc,Ayse\n").unwrap();
    assert!(import_staff_csv(&path).is_err());

    fs::write(&path, "id,full_name,username\n4,,\n").unwrap();
    assert!(import_staff_csv(&path).is_err());
}

#[test]
fn grid_export_writes_csv_file() {
    let dir = tempdir().unwrap();
    let roster = Roster { staff: vec![StaffMember::emergency(1).with_name("Ayse")] };
    let from = NaiveDate::from_ymd_opt(2025, 3, 5).unwrap();
    let grid = ScheduleGrid::build(&roster.emergency(), from, 1).unwrap();

    let csv_path = dir.path().join("grid.csv");
    export_grid_csv(&csv_path, &grid).unwrap();
    let csv = fs::read_to_string(&csv_path).unwrap();
    assert!(csv.starts_with("shift,2025-03-05"));
    assert!(csv.contains("08:00-16:00,Ayse"));
}
