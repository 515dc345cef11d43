use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use std::cell::RefCell;
use uuid::Uuid;
use vaxtrack_core::db::open_db_in_memory;
use vaxtrack_core::{
    DraftValidationError, MemoryKeyValueStore, ReminderError, ReminderRequest, ReminderScheduler,
    RenewalInterval, SqliteKeyValueStore, SqliteReminderScheduler, VaccineDraft, VaccineFilter,
    VaccineId, VaccineService, VaccineServiceError,
};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Call {
    Add(ReminderRequest),
    Remove(Vec<VaccineId>),
}

#[derive(Default)]
struct RecordingScheduler {
    calls: RefCell<Vec<Call>>,
    deny: bool,
}

impl RecordingScheduler {
    fn denying() -> Self {
        Self {
            deny: true,
            ..Self::default()
        }
    }

    fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    fn clear(&self) {
        self.calls.borrow_mut().clear();
    }
}

impl ReminderScheduler for RecordingScheduler {
    fn add(&self, request: &ReminderRequest) -> Result<(), ReminderError> {
        self.calls.borrow_mut().push(Call::Add(request.clone()));
        if self.deny {
            return Err(ReminderError::PermissionDenied);
        }
        Ok(())
    }

    fn remove_pending(&self, ids: &[VaccineId]) -> Result<(), ReminderError> {
        self.calls.borrow_mut().push(Call::Remove(ids.to_vec()));
        Ok(())
    }
}

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 10, 1, 10, 0, 0).unwrap()
}

fn draft(name: &str, days_ago: i64) -> VaccineDraft {
    VaccineDraft::new(name, now() - Duration::days(days_ago))
}

#[test]
fn add_persists_and_schedules_reminder() {
    let store = MemoryKeyValueStore::new();
    let scheduler = RecordingScheduler::default();
    let service = VaccineService::new(&store, &scheduler);

    let vaccine = service
        .add(draft("TBE", 10).with_renewal(RenewalInterval::new(3, 0)), now())
        .unwrap();

    assert_eq!(service.all(), vec![vaccine.clone()]);
    let calls = scheduler.calls();
    assert_eq!(calls.len(), 1);
    match &calls[0] {
        Call::Add(request) => {
            assert_eq!(request.id, vaccine.id());
            assert_eq!(request.fire_on, NaiveDate::from_ymd_opt(2028, 9, 21).unwrap());
        }
        other => panic!("unexpected call: {other:?}"),
    }
}

#[test]
fn add_without_renewal_cancels_instead_of_scheduling() {
    let store = MemoryKeyValueStore::new();
    let scheduler = RecordingScheduler::default();
    let service = VaccineService::new(&store, &scheduler);

    let vaccine = service.add(draft("MMR", 1000), now()).unwrap();
    assert_eq!(scheduler.calls(), vec![Call::Remove(vec![vaccine.id()])]);
}

#[test]
fn validation_failure_blocks_save() {
    let store = MemoryKeyValueStore::new();
    let scheduler = RecordingScheduler::default();
    let service = VaccineService::new(&store, &scheduler);

    let err = service.add(draft("  ", 1), now()).unwrap_err();
    assert_eq!(
        err,
        VaccineServiceError::Validation(DraftValidationError::EmptyName)
    );

    let err = service
        .add(draft("TBE", 1).with_renewal(RenewalInterval::default()), now())
        .unwrap_err();
    assert_eq!(
        err,
        VaccineServiceError::Validation(DraftValidationError::EmptyRenewalInterval)
    );

    let future = VaccineDraft::new("TBE", now() + Duration::days(2));
    assert!(matches!(
        service.add(future, now()),
        Err(VaccineServiceError::Validation(DraftValidationError::FutureDate { .. }))
    ));

    assert!(service.all().is_empty());
    assert!(scheduler.calls().is_empty());
}

#[test]
fn update_replaces_in_place_and_keeps_id() {
    let store = MemoryKeyValueStore::new();
    let scheduler = RecordingScheduler::default();
    let service = VaccineService::new(&store, &scheduler);

    let first = service.add(draft("Covid", 30), now()).unwrap();
    let second = service.add(draft("TBE", 20), now()).unwrap();

    let mut edit = VaccineDraft::from_vaccine(&first);
    edit.name = "Covid booster".to_string();
    let edit = edit.with_renewal(RenewalInterval::new(1, 0));
    let updated = service.update(edit, now()).unwrap();

    assert_eq!(updated.id(), first.id());
    let all = service.all();
    assert_eq!(all.len(), 2);
    assert_eq!(all[0], updated);
    assert_eq!(all[1], second);
    assert!(updated.has_renewal());
}

#[test]
fn update_of_unknown_id_is_not_found() {
    let store = MemoryKeyValueStore::new();
    let scheduler = RecordingScheduler::default();
    let service = VaccineService::new(&store, &scheduler);

    let missing = Uuid::new_v4();
    let edit = VaccineDraft {
        existing_id: Some(missing),
        ..draft("TBE", 1)
    };
    assert_eq!(
        service.update(edit, now()).unwrap_err(),
        VaccineServiceError::NotFound(missing)
    );
}

#[test]
fn delete_removes_only_target_and_cancels_once() {
    let store = MemoryKeyValueStore::new();
    let scheduler = RecordingScheduler::default();
    let service = VaccineService::new(&store, &scheduler);

    let keep = service
        .add(draft("TBE", 5).with_renewal(RenewalInterval::new(0, 6)), now())
        .unwrap();
    let target = service
        .add(draft("Influensa", 5).with_renewal(RenewalInterval::new(1, 0)), now())
        .unwrap();
    scheduler.clear();

    let removed = service.delete(target.id()).unwrap();
    assert_eq!(removed, target);
    assert_eq!(service.all(), vec![keep]);
    assert_eq!(scheduler.calls(), vec![Call::Remove(vec![target.id()])]);

    assert_eq!(
        service.delete(target.id()).unwrap_err(),
        VaccineServiceError::NotFound(target.id())
    );
}

#[test]
fn delete_visible_addresses_rows_by_position() {
    let store = MemoryKeyValueStore::new();
    let scheduler = RecordingScheduler::default();
    let service = VaccineService::new(&store, &scheduler);

    let older = service.add(draft("older", 100), now()).unwrap();
    let newer = service.add(draft("newer", 1), now()).unwrap();

    let removed = service.delete_visible(VaccineFilter::All, now(), &[0, 0, 7]);
    assert_eq!(removed, vec![newer]);
    assert_eq!(service.all(), vec![older]);
}

#[test]
fn reminder_failures_do_not_block_saving() {
    let store = MemoryKeyValueStore::new();
    let scheduler = RecordingScheduler::denying();
    let service = VaccineService::new(&store, &scheduler);

    let vaccine = service
        .add(draft("TBE", 1).with_renewal(RenewalInterval::new(3, 0)), now())
        .unwrap();
    assert_eq!(service.get(vaccine.id()), Some(vaccine));
}

#[test]
fn sqlite_backed_service_keeps_reminders_in_sync() {
    let conn = open_db_in_memory().unwrap();
    let scheduler = SqliteReminderScheduler::new(&conn);
    let service = VaccineService::new(SqliteKeyValueStore::new(&conn), &scheduler);

    let tbe = service
        .add(draft("TBE", 1).with_renewal(RenewalInterval::new(0, 1)), now())
        .unwrap();
    let mmr = service.add(draft("MMR", 1), now()).unwrap();

    let pending = scheduler.pending().unwrap();
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].id, tbe.id());

    let edit = VaccineDraft::from_vaccine(&tbe).without_renewal();
    service.update(edit, now()).unwrap();
    assert!(scheduler.pending().unwrap().is_empty());

    service.delete(mmr.id()).unwrap();
    assert_eq!(service.all().len(), 1);
}
