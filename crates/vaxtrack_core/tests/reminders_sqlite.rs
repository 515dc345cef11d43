use chrono::NaiveDate;
use uuid::Uuid;
use vaxtrack_core::db::open_db_in_memory;
use vaxtrack_core::{ReminderRequest, ReminderScheduler, SqliteReminderScheduler};

fn request(day: u32, body: &str) -> ReminderRequest {
    ReminderRequest {
        id: Uuid::new_v4(),
        title: "Vaccine reminder".to_string(),
        body: body.to_string(),
        fire_on: NaiveDate::from_ymd_opt(2026, 3, day).unwrap(),
    }
}

#[test]
fn add_replaces_pending_request_with_same_id() {
    let conn = open_db_in_memory().unwrap();
    let scheduler = SqliteReminderScheduler::new(&conn);

    let first = request(10, "TBE needs renewal");
    scheduler.add(&first).unwrap();

    let moved = ReminderRequest {
        fire_on: NaiveDate::from_ymd_opt(2026, 4, 1).unwrap(),
        ..first.clone()
    };
    scheduler.add(&moved).unwrap();

    assert_eq!(scheduler.pending().unwrap(), vec![moved]);
}

#[test]
fn remove_pending_ignores_unknown_ids() {
    let conn = open_db_in_memory().unwrap();
    let scheduler = SqliteReminderScheduler::new(&conn);

    let kept = request(5, "a");
    let removed = request(6, "b");
    scheduler.add(&kept).unwrap();
    scheduler.add(&removed).unwrap();

    scheduler
        .remove_pending(&[removed.id, Uuid::new_v4()])
        .unwrap();
    assert_eq!(scheduler.pending().unwrap(), vec![kept]);
}

#[test]
fn due_on_returns_requests_up_to_day_in_fire_order() {
    let conn = open_db_in_memory().unwrap();
    let scheduler = SqliteReminderScheduler::new(&conn);

    let late = request(20, "late");
    let early = request(2, "early");
    let same_day = request(10, "same day");
    for item in [&late, &early, &same_day] {
        scheduler.add(item).unwrap();
    }

    let due = scheduler
        .due_on(NaiveDate::from_ymd_opt(2026, 3, 10).unwrap())
        .unwrap();
    assert_eq!(due, vec![early, same_day]);
}
