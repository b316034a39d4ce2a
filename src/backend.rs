use crate::{
    error::BookingError,
    types::{DaySummary, Slot},
};
use chrono::NaiveDate;

pub trait SlotBackend: Clone + Send + Sync + 'static {
    /// Slots on `date`, ordered by time. Unknown dates yield an empty list.
    fn slots_on(&self, date: NaiveDate) -> Vec<Slot>;

    /// First writer wins. Re-booking by the current holder succeeds unchanged.
    fn book_slot(&self, id: &str, caller: &str) -> Result<Slot, BookingError>;

    fn slots_held_by(&self, caller: &str) -> Vec<Slot>;

    fn days(&self) -> Vec<DaySummary>;
}
