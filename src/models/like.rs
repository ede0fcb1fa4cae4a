//! Like feed models

use chrono::{DateTime, NaiveDate};

/// A single like action on an item
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LikeEvent {
    pub timestamp_seconds: i64,
}

impl LikeEvent {
    /// Build an event, rejecting timestamps that have no UTC calendar day
    pub fn from_timestamp(timestamp_seconds: i64) -> Option<Self> {
        DateTime::from_timestamp(timestamp_seconds, 0)?;
        Some(Self { timestamp_seconds })
    }

    /// UTC calendar day the like happened on
    pub fn day(&self) -> NaiveDate {
        DateTime::from_timestamp(self.timestamp_seconds, 0)
            .map(|dt| dt.date_naive())
            .unwrap_or(NaiveDate::MIN)
    }
}

/// One page of the like feed
#[derive(Debug, Clone, Default)]
pub struct RawPage {
    pub records: Vec<LikeEvent>,
    /// Authoritative: no later page exists once this is set
    pub is_complete: bool,
}

/// A content item on GameBanana, addressed by section and id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemRef {
    pub section: String,
    pub id: String,
}

impl ItemRef {
    pub fn new(section: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            section: section.into(),
            id: id.into(),
        }
    }

    /// Label used when the profile lookup has no display name
    pub fn fallback_label(&self) -> String {
        format!("{} #{}", self.section, self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_day_truncates_to_utc_date() {
        // 2024-03-10T23:59:59Z
        let event = LikeEvent::from_timestamp(1_710_115_199).expect("valid timestamp");
        assert_eq!(event.day(), NaiveDate::from_ymd_opt(2024, 3, 10).unwrap());

        let next = LikeEvent::from_timestamp(1_710_115_200).expect("valid timestamp");
        assert_eq!(next.day(), NaiveDate::from_ymd_opt(2024, 3, 11).unwrap());
    }

    #[test]
    fn test_out_of_range_timestamp_is_rejected() {
        assert!(LikeEvent::from_timestamp(i64::MAX).is_none());
    }

    #[test]
    fn test_fallback_label() {
        let item = ItemRef::new("Tool", "19049");
        assert_eq!(item.fallback_label(), "Tool #19049");
    }
}
