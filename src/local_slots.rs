use crate::{
    backend::SlotBackend,
    error::BookingError,
    types::{DaySummary, Slot},
};
use chrono::{Days, NaiveDate, NaiveTime};
use std::{
    collections::{BTreeMap, HashMap},
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Default)]
pub struct LocalSlots {
    slots: Arc<Mutex<HashMap<String, Slot>>>,
}

/// Builds `days * times.len()` free slots starting at `start`, day by day and
/// in the given time order.
pub fn generate_slots(
    start: NaiveDate,
    days: u32,
    times: &[NaiveTime],
    provider_name: &str,
) -> Vec<Slot> {
    (0..days)
        .filter_map(|offset| start.checked_add_days(Days::new(offset.into())))
        .flat_map(|date| {
            times
                .iter()
                .map(move |&time| Slot::new(date, time, provider_name))
        })
        .collect()
}

impl LocalSlots {
    pub fn new(slots: impl IntoIterator<Item = Slot>) -> Self {
        let slots = slots
            .into_iter()
            .map(|slot| (slot.id.clone(), slot))
            .collect();
        Self {
            slots: Arc::new(Mutex::new(slots)),
        }
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, Slot>> {
        // Every mutation is a single assignment, so a poisoned map is still consistent.
        self.slots.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn sorted(&self, filter: impl Fn(&Slot) -> bool) -> Vec<Slot> {
        let mut slots: Vec<Slot> = self
            .lock()
            .values()
            .filter(|slot| filter(slot))
            .cloned()
            .collect();
        slots.sort_unstable_by(|a, b| (a.date, a.time).cmp(&(b.date, b.time)));
        slots
    }
}

impl SlotBackend for LocalSlots {
    fn slots_on(&self, date: NaiveDate) -> Vec<Slot> {
        self.sorted(|slot| slot.date == date)
    }

    fn book_slot(&self, id: &str, caller: &str) -> Result<Slot, BookingError> {
        let mut slots = self.lock();
        let Some(slot) = slots.get_mut(id) else {
            warn!(slot = id, "Booking of unknown slot rejected");
            return Err(BookingError::SlotNotFound(id.into()));
        };

        match slot.holder.as_deref() {
            None => {
                slot.holder = Some(caller.into());
                info!(slot = id, caller, "Slot booked");
            }
            Some(holder) if holder == caller => {
                debug!(slot = id, caller, "Slot already held by caller");
            }
            Some(_) => {
                warn!(slot = id, caller, "Slot is held by someone else");
                return Err(BookingError::SlotTaken(id.into()));
            }
        }
        Ok(slot.clone())
    }

    fn slots_held_by(&self, caller: &str) -> Vec<Slot> {
        self.sorted(|slot| slot.is_held_by(caller))
    }

    fn days(&self) -> Vec<DaySummary> {
        let mut days: BTreeMap<NaiveDate, DaySummary> = BTreeMap::new();
        for slot in self.lock().values() {
            let day = days.entry(slot.date).or_insert(DaySummary {
                date: slot.date,
                total: 0,
                free: 0,
            });
            day.total += 1;
            if slot.is_free() {
                day.free += 1;
            }
        }
        days.into_values().collect()
    }
}
