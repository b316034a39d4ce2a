use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc, Mutex,
};

use chrono::NaiveDate;

use crate::{
    backend::SlotBackend,
    error::BookingError,
    types::{DaySummary, Slot},
};

pub struct MockSlotBackendInner {
    pub book_error: Mutex<Option<BookingError>>,
    pub calls_to_slots_on: AtomicU64,
    pub calls_to_book_slot: AtomicU64,
    pub calls_to_slots_held_by: AtomicU64,
    pub calls_to_days: AtomicU64,
    pub slots: Mutex<Vec<Slot>>,
    pub days: Mutex<Vec<DaySummary>>,
}

/// Records calls and serves canned slots without enforcing booking rules.
#[derive(Clone)]
pub struct MockSlotBackend(pub Arc<MockSlotBackendInner>);

impl MockSlotBackendInner {
    fn new() -> Self {
        Self {
            book_error: Mutex::default(),
            calls_to_slots_on: AtomicU64::default(),
            calls_to_book_slot: AtomicU64::default(),
            calls_to_slots_held_by: AtomicU64::default(),
            calls_to_days: AtomicU64::default(),
            slots: Mutex::default(),
            days: Mutex::default(),
        }
    }
}

impl MockSlotBackend {
    pub fn new() -> Self {
        Self(Arc::new(MockSlotBackendInner::new()))
    }

    pub fn with_slots(slots: Vec<Slot>) -> Self {
        let backend = Self::new();
        *backend.0.slots.lock().unwrap() = slots;
        backend
    }

    pub fn fail_bookings_with(&self, err: BookingError) {
        *self.0.book_error.lock().unwrap() = Some(err);
    }
}

impl SlotBackend for MockSlotBackend {
    fn slots_on(&self, date: NaiveDate) -> Vec<Slot> {
        self.0.calls_to_slots_on.fetch_add(1, Ordering::SeqCst);
        self.0
            .slots
            .lock()
            .unwrap()
            .iter()
            .filter(|slot| slot.date == date)
            .cloned()
            .collect()
    }

    fn book_slot(&self, id: &str, caller: &str) -> Result<Slot, BookingError> {
        self.0.calls_to_book_slot.fetch_add(1, Ordering::SeqCst);
        if let Some(err) = self.0.book_error.lock().unwrap().clone() {
            return Err(err);
        }
        let mut slots = self.0.slots.lock().unwrap();
        let slot = slots
            .iter_mut()
            .find(|slot| slot.id == id)
            .ok_or_else(|| BookingError::SlotNotFound(id.into()))?;
        slot.holder = Some(caller.into());
        Ok(slot.clone())
    }

    fn slots_held_by(&self, caller: &str) -> Vec<Slot> {
        self.0.calls_to_slots_held_by.fetch_add(1, Ordering::SeqCst);
        self.0
            .slots
            .lock()
            .unwrap()
            .iter()
            .filter(|slot| slot.is_held_by(caller))
            .cloned()
            .collect()
    }

    fn days(&self) -> Vec<DaySummary> {
        self.0.calls_to_days.fetch_add(1, Ordering::SeqCst);
        self.0.days.lock().unwrap().clone()
    }
}
