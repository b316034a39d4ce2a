use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

pub const TIME_FORMAT: &str = "%H:%M";
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A bookable date/time unit for one provider.
///
/// `holder` is the caller identifier occupying the slot. It only ever goes
/// from `None` to `Some`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slot {
    pub id: String,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub provider_name: String,
    pub holder: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlotStatus {
    Free,
    Booked,
    Mine,
}

/// Wire form of a slot as seen by one caller. The holder is never exposed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotView {
    pub id: String,
    pub date: NaiveDate,
    #[serde(with = "hh_mm")]
    pub time: NaiveTime,
    #[serde(rename = "masterName")]
    pub provider_name: String,
    pub status: SlotStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DaySummary {
    pub date: NaiveDate,
    pub total: usize,
    pub free: usize,
}

impl Slot {
    pub fn new(date: NaiveDate, time: NaiveTime, provider_name: impl Into<String>) -> Self {
        Self {
            id: slot_id(date, time),
            date,
            time,
            provider_name: provider_name.into(),
            holder: None,
        }
    }

    pub fn is_free(&self) -> bool {
        self.holder.is_none()
    }

    pub fn is_held_by(&self, caller: &str) -> bool {
        self.holder.as_deref() == Some(caller)
    }

    pub fn status_for(&self, caller: Option<&str>) -> SlotStatus {
        match (self.holder.as_deref(), caller) {
            (None, _) => SlotStatus::Free,
            (Some(holder), Some(caller)) if holder == caller => SlotStatus::Mine,
            (Some(_), _) => SlotStatus::Booked,
        }
    }

    pub fn view_for(&self, caller: Option<&str>) -> SlotView {
        SlotView {
            id: self.id.clone(),
            date: self.date,
            time: self.time,
            provider_name: self.provider_name.clone(),
            status: self.status_for(caller),
        }
    }
}

pub fn slot_id(date: NaiveDate, time: NaiveTime) -> String {
    format!("{}-{}", date.format(DATE_FORMAT), time.format(TIME_FORMAT))
}

pub fn parse_time(value: &str) -> Result<NaiveTime, String> {
    NaiveTime::parse_from_str(value.trim(), TIME_FORMAT)
        .map_err(|err| format!("'{value}' is not a valid HH:MM time: {err}"))
}

mod hh_mm {
    use super::{parse_time, TIME_FORMAT};
    use chrono::NaiveTime;
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&time.format(TIME_FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let value = String::deserialize(deserializer)?;
        parse_time(&value).map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use serde_json::json;
    use test_case::test_case;

    fn example_slot(holder: Option<&str>) -> Slot {
        let date = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
        let time = NaiveTime::from_hms_opt(14, 0, 0).unwrap();
        let mut slot = Slot::new(date, time, "Марина");
        slot.holder = holder.map(String::from);
        slot
    }

    #[test_case(None, None, SlotStatus::Free)]
    #[test_case(None, Some("42"), SlotStatus::Free)]
    #[test_case(Some("42"), Some("42"), SlotStatus::Mine)]
    #[test_case(Some("42"), Some("7"), SlotStatus::Booked)]
    #[test_case(Some("42"), None, SlotStatus::Booked)]
    fn test_status_for_caller(holder: Option<&str>, caller: Option<&str>, expected: SlotStatus) {
        assert_eq!(example_slot(holder).status_for(caller), expected);
    }

    #[test]
    fn test_slot_id_combines_date_and_time() {
        let slot = example_slot(None);
        assert_eq!(slot.id, "2025-03-10-14:00");
        assert!(slot.is_free());
    }

    #[test]
    fn test_view_hides_holder() {
        let view = example_slot(Some("42")).view_for(Some("7"));
        let value = serde_json::to_value(&view).unwrap();
        assert_eq!(
            value,
            json!({
                "id": "2025-03-10-14:00",
                "date": "2025-03-10",
                "time": "14:00",
                "masterName": "Марина",
                "status": "booked",
            })
        );

        let parsed: SlotView = serde_json::from_value(value).unwrap();
        assert_eq!(parsed, view);
    }

    #[test_case("09:30", true)]
    #[test_case(" 18:00 ", true)]
    #[test_case("25:00", false)]
    #[test_case("noon", false)]
    fn test_parse_time(value: &str, valid: bool) {
        assert_eq!(parse_time(value).is_ok(), valid);
    }
}
