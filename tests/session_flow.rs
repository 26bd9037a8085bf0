use chrono::{TimeZone, Utc};
use lifeCalendar::error::StoreError;
use lifeCalendar::models::life_stats::DEFAULT_LIFESPAN;
use lifeCalendar::models::week_grid::CellState;
use lifeCalendar::service::calendar_session::CalendarSession;
use lifeCalendar::store::{BIRTH_DATE_KEY, LIFESPAN_KEY, MemoryStore, PreferenceStore};

/// A store whose every operation fails, like storage that is switched off.
struct BrokenStore;

impl PreferenceStore for BrokenStore {
    fn get(&self, _key: &str) -> Result<Option<String>, StoreError> {
        Err(StoreError::Unavailable)
    }

    fn set(&mut self, _key: &str, _value: &str) -> Result<(), StoreError> {
        Err(StoreError::Unavailable)
    }

    fn remove(&mut self, _key: &str) -> Result<(), StoreError> {
        Err(StoreError::Unavailable)
    }
}

#[test]
fn empty_store_starts_unset_with_default_lifespan() {
    let session = CalendarSession::load(MemoryStore::new());
    let now = Utc.with_ymd_and_hms(2026, 10, 18, 0, 0, 0).unwrap();
    assert_eq!(session.lifespan(), DEFAULT_LIFESPAN);
    assert_eq!(session.raw_birth_date(), "");
    assert_eq!(session.stats(now), None);
    assert!(session.grid(now).is_none());
    assert!(session.reflection_request(now).is_none());
}

#[test]
fn refresh_writes_both_keys_through() {
    let mut session = CalendarSession::load(MemoryStore::new());
    session.set_birth_date("1990-05-17");
    session.set_lifespan(90);
    let now = Utc.with_ymd_and_hms(2026, 10, 18, 0, 0, 0).unwrap();
    assert!(session.refresh(now).is_some());

    let store = session.store();
    assert_eq!(store.get(BIRTH_DATE_KEY).unwrap().as_deref(), Some("1990-05-17"));
    assert_eq!(store.get(LIFESPAN_KEY).unwrap().as_deref(), Some("90"));
}

#[test]
fn future_birth_date_is_not_persisted() {
    let mut session = CalendarSession::load(MemoryStore::new());
    session.set_birth_date("2030-01-01");
    let now = Utc.with_ymd_and_hms(2026, 10, 18, 0, 0, 0).unwrap();
    assert_eq!(session.refresh(now), None);
    assert!(session.store().is_empty());
}

#[test]
fn stored_values_are_loaded() {
    let mut store = MemoryStore::new();
    store.set(BIRTH_DATE_KEY, "2000-01-01").unwrap();
    store.set(LIFESPAN_KEY, "70").unwrap();
    let session = CalendarSession::load(store);
    let now = Utc.with_ymd_and_hms(2026, 10, 18, 0, 0, 0).unwrap();
    assert_eq!(session.lifespan(), 70);
    let stats = session.stats(now).unwrap();
    assert_eq!(stats.total_weeks, 70.0 * 52.0);
}

#[test]
fn reset_removes_both_keys() {
    let mut session = CalendarSession::load(MemoryStore::new());
    session.set_birth_date("1990-05-17");
    session.set_lifespan(65);
    let now = Utc.with_ymd_and_hms(2026, 10, 18, 0, 0, 0).unwrap();
    session.refresh(now);
    assert_eq!(session.store().len(), 2);

    session.reset();
    assert!(session.store().is_empty());
    assert_eq!(session.lifespan(), DEFAULT_LIFESPAN);
    assert_eq!(session.stats(now), None);
}

#[test]
fn broken_store_never_blocks_stats_or_grid() {
    let mut session = CalendarSession::load(BrokenStore);
    assert_eq!(session.lifespan(), DEFAULT_LIFESPAN);

    session.set_birth_date("1990-05-17");
    let now = Utc.with_ymd_and_hms(2026, 10, 18, 0, 0, 0).unwrap();
    assert!(session.refresh(now).is_some());
    let grid = session.grid(now).expect("grid despite broken store");
    assert_eq!(grid.cells().count(), 80 * 52);
    session.reset();
}

#[test]
fn grid_uses_session_lifespan() {
    let mut session = CalendarSession::load(MemoryStore::new());
    session.set_birth_date("2025-10-20");
    session.set_lifespan(3);
    let now = Utc.with_ymd_and_hms(2026, 10, 19, 0, 0, 0).unwrap();
    let grid = session.grid(now).unwrap();
    assert_eq!(grid.total_years(), 3);
    let current = grid.current_cell().expect("whole weeks give a current cell");
    assert_eq!((current.year, current.week_index), (1, 0));
    assert_eq!(current.state, CellState::Current);
}

#[test]
fn no_reflection_once_no_weeks_remain() {
    let mut session = CalendarSession::load(MemoryStore::new());
    session.set_birth_date("1950-01-01");
    session.set_lifespan(40);
    let now = Utc.with_ymd_and_hms(2026, 10, 18, 0, 0, 0).unwrap();
    assert!(session.stats(now).is_some());
    assert!(session.reflection_request(now).is_none());

    session.set_lifespan(100);
    let request = session.reflection_request(now).unwrap();
    assert_eq!(request.age, 76);
    assert_eq!(request.expected_lifespan, 100);
}
