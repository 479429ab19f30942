use serde::{Deserialize, Serialize};
use time::Date;
use ulid::Ulid;

/// Whole hours within one calendar day — the only clock granularity.
pub type Hour = u8;

/// Window bounds live in `0..=HOURS_PER_DAY`; no window crosses midnight.
pub const HOURS_PER_DAY: Hour = 24;

time::serde::format_description!(iso_day, Date, "[year]-[month]-[day]");

/// Parse an ISO `YYYY-MM-DD` calendar date. No timezone is involved.
pub fn parse_day(s: &str) -> Option<Date> {
    let format = time::macros::format_description!("[year]-[month]-[day]");
    Date::parse(s, format).ok()
}

/// Half-open hour window `[start, end)` on a single calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HourSpan {
    pub start: Hour,
    pub end: Hour,
}

impl HourSpan {
    pub fn new(start: Hour, end: Hour) -> Self {
        debug_assert!(start < end, "HourSpan start must be before end");
        Self { start, end }
    }

    pub fn hours(&self) -> Hour {
        self.end - self.start
    }

    pub fn overlaps(&self, other: &HourSpan) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// What an admitted interval represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SlotKind {
    /// A reservation held by the requesting user.
    Booking { user_id: Ulid },
    /// An owner withhold — occupies the window without a consuming user.
    /// The owner of record is the turf's registered owner.
    Block,
}

impl SlotKind {
    pub fn is_booking(&self) -> bool {
        matches!(self, SlotKind::Booking { .. })
    }
}

/// A committed interval on one turf and date. Immutable once admitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interval {
    pub id: Ulid,
    pub span: HourSpan,
    pub kind: SlotKind,
}

/// The committed-interval set for one (turf, date). Intervals are only ever
/// inserted — there is no cancellation path.
#[derive(Debug, Clone)]
pub struct DayState {
    pub turf_id: Ulid,
    pub date: Date,
    /// Committed intervals, sorted by `span.start`.
    pub intervals: Vec<Interval>,
}

impl DayState {
    pub fn new(turf_id: Ulid, date: Date) -> Self {
        Self {
            turf_id,
            date,
            intervals: Vec::new(),
        }
    }

    /// Insert an interval maintaining sort order by `span.start`.
    pub fn insert_interval(&mut self, interval: Interval) {
        let pos = self
            .intervals
            .binary_search_by_key(&interval.span.start, |i| i.span.start)
            .unwrap_or_else(|e| e);
        self.intervals.insert(pos, interval);
    }

    /// Return only intervals whose span overlaps the query window.
    /// Uses binary search to skip intervals starting at or after `query.end`.
    pub fn overlapping(&self, query: &HourSpan) -> impl Iterator<Item = &Interval> {
        // Everything at index >= right_bound starts at or after query.end → can't overlap.
        let right_bound = self.intervals.partition_point(|i| i.span.start < query.end);
        self.intervals[..right_bound]
            .iter()
            .filter(move |i| i.span.end > query.start)
    }
}

/// A bookable venue and its registered owner — the resource directory entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turf {
    pub id: Ulid,
    pub name: String,
    pub location: String,
    pub image_url: String,
    pub owner_id: Ulid,
}

/// Caller role as resolved by the API layer's credential check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    User,
    Owner,
}

/// Authenticated caller identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Principal {
    pub id: Ulid,
    pub role: Role,
}

impl Principal {
    pub fn user(id: Ulid) -> Self {
        Self { id, role: Role::User }
    }

    pub fn owner(id: Ulid) -> Self {
        Self { id, role: Role::Owner }
    }
}

/// The event types — flat, no nesting. This is the WAL record format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Event {
    TurfRegistered {
        id: Ulid,
        name: String,
        location: String,
        image_url: String,
        owner_id: Ulid,
    },
    BookingAdmitted {
        id: Ulid,
        turf_id: Ulid,
        date: Date,
        span: HourSpan,
        user_id: Ulid,
    },
    BlockAdmitted {
        id: Ulid,
        turf_id: Ulid,
        date: Date,
        span: HourSpan,
    },
}

// ── Query result types ───────────────────────────────────────────

/// A user's committed booking before the directory join.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookingRecord {
    pub id: Ulid,
    pub turf_id: Ulid,
    pub date: Date,
    pub span: HourSpan,
}

/// Occupied-view vocabulary the API layer serializes for availability
/// screens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OccupiedKind {
    Booking,
    Blocked,
}

/// One entry of the public occupied view for a turf and date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OccupiedSlot {
    pub start_hour: Hour,
    pub end_hour: Hour,
    #[serde(rename = "type")]
    pub kind: OccupiedKind,
}

/// A user's booking joined with turf display metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserBooking {
    pub id: Ulid,
    pub turf_id: Ulid,
    pub turf_name: String,
    pub location: String,
    #[serde(with = "iso_day")]
    pub date: Date,
    pub start_hour: Hour,
    pub end_hour: Hour,
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    fn booking(start: Hour, end: Hour) -> Interval {
        Interval {
            id: Ulid::new(),
            span: HourSpan::new(start, end),
            kind: SlotKind::Booking { user_id: Ulid::new() },
        }
    }

    fn block(start: Hour, end: Hour) -> Interval {
        Interval {
            id: Ulid::new(),
            span: HourSpan::new(start, end),
            kind: SlotKind::Block,
        }
    }

    #[test]
    fn span_basics() {
        let s = HourSpan::new(14, 16);
        assert_eq!(s.hours(), 2);
    }

    #[test]
    fn span_overlap() {
        let a = HourSpan::new(14, 16);
        let b = HourSpan::new(15, 17);
        let c = HourSpan::new(16, 18);
        assert!(a.overlaps(&b));
        assert!(!a.overlaps(&c)); // adjacent, not overlapping
    }

    #[test]
    fn span_contained_overlaps() {
        let outer = HourSpan::new(8, 20);
        let inner = HourSpan::new(12, 13);
        assert!(outer.overlaps(&inner));
        assert!(inner.overlaps(&outer));
    }

    #[test]
    fn interval_ordering() {
        let mut day = DayState::new(Ulid::new(), date!(2024 - 06 - 01));
        day.insert_interval(booking(18, 20));
        day.insert_interval(block(6, 8));
        day.insert_interval(booking(12, 14));
        assert_eq!(day.intervals[0].span.start, 6);
        assert_eq!(day.intervals[1].span.start, 12);
        assert_eq!(day.intervals[2].span.start, 18);
    }

    #[test]
    fn overlapping_scans_both_kinds() {
        let mut day = DayState::new(Ulid::new(), date!(2024 - 06 - 01));
        day.insert_interval(booking(10, 12));
        day.insert_interval(block(14, 16));

        let query = HourSpan::new(11, 15);
        let hits: Vec<_> = day.overlapping(&query).collect();
        assert_eq!(hits.len(), 2);
    }

    #[test]
    fn overlapping_adjacent_not_included() {
        // Interval ending exactly at query.start is NOT overlapping (half-open)
        let mut day = DayState::new(Ulid::new(), date!(2024 - 06 - 01));
        day.insert_interval(booking(14, 16));
        let hits: Vec<_> = day.overlapping(&HourSpan::new(16, 18)).collect();
        assert!(hits.is_empty());
        let hits: Vec<_> = day.overlapping(&HourSpan::new(12, 14)).collect();
        assert!(hits.is_empty());
    }

    #[test]
    fn overlapping_skips_later_starts() {
        let mut day = DayState::new(Ulid::new(), date!(2024 - 06 - 01));
        day.insert_interval(booking(6, 8));
        day.insert_interval(booking(10, 12));
        day.insert_interval(booking(20, 22));

        let hits: Vec<_> = day.overlapping(&HourSpan::new(9, 13)).collect();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].span, HourSpan::new(10, 12));
    }

    #[test]
    fn overlapping_empty_day() {
        let day = DayState::new(Ulid::new(), date!(2024 - 06 - 01));
        assert!(day.overlapping(&HourSpan::new(0, 24)).next().is_none());
    }

    #[test]
    fn parse_day_accepts_iso_dates() {
        assert_eq!(parse_day("2024-06-01"), Some(date!(2024 - 06 - 01)));
        assert_eq!(parse_day("2024-02-29"), Some(date!(2024 - 02 - 29))); // leap day
    }

    #[test]
    fn parse_day_rejects_malformed_input() {
        assert_eq!(parse_day("2024-13-01"), None);
        assert_eq!(parse_day("2023-02-29"), None);
        assert_eq!(parse_day("06/01/2024"), None);
        assert_eq!(parse_day("tomorrow"), None);
        assert_eq!(parse_day(""), None);
    }

    #[test]
    fn event_serialization_roundtrip() {
        let event = Event::BookingAdmitted {
            id: Ulid::new(),
            turf_id: Ulid::new(),
            date: date!(2024 - 06 - 01),
            span: HourSpan::new(16, 18),
            user_id: Ulid::new(),
        };
        let bytes = bincode::serialize(&event).unwrap();
        let decoded: Event = bincode::deserialize(&bytes).unwrap();
        assert_eq!(event, decoded);
    }

    #[test]
    fn occupied_slot_wire_shape() {
        let slot = OccupiedSlot {
            start_hour: 16,
            end_hour: 18,
            kind: OccupiedKind::Booking,
        };
        let json = serde_json::to_value(slot).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"startHour": 16, "endHour": 18, "type": "booking"})
        );

        let slot = OccupiedSlot {
            start_hour: 18,
            end_hour: 20,
            kind: OccupiedKind::Blocked,
        };
        assert_eq!(
            serde_json::to_value(slot).unwrap()["type"],
            serde_json::json!("blocked")
        );
    }

    #[test]
    fn user_booking_serializes_iso_date() {
        let b = UserBooking {
            id: Ulid::new(),
            turf_id: Ulid::new(),
            turf_name: "Greenfield Arena".into(),
            location: "Pune".into(),
            date: date!(2024 - 06 - 01),
            start_hour: 16,
            end_hour: 18,
        };
        let json = serde_json::to_value(&b).unwrap();
        assert_eq!(json["date"], serde_json::json!("2024-06-01"));
        assert_eq!(json["turfName"], serde_json::json!("Greenfield Arena"));
    }
}
