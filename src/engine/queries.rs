use time::Date;
use ulid::Ulid;

use crate::model::*;

use super::conflict::validate_window;
use super::{Engine, EngineError};

impl Engine {
    /// Public occupied view for one turf and date. No identity required.
    ///
    /// Turfs with no admitted intervals (including unknown ids) yield an
    /// empty list — availability screens render them as fully free.
    pub async fn occupied(&self, turf_id: Ulid, date: Date) -> Vec<OccupiedSlot> {
        let Some(day) = self.get_day(turf_id, date) else {
            return Vec::new();
        };
        let guard = day.read().await;
        guard
            .intervals
            .iter()
            .map(|i| OccupiedSlot {
                start_hour: i.span.start,
                end_hour: i.span.end,
                kind: match i.kind {
                    SlotKind::Booking { .. } => OccupiedKind::Booking,
                    SlotKind::Block => OccupiedKind::Blocked,
                },
            })
            .collect()
    }

    /// Every committed interval — booking or block — overlapping the
    /// half-open window `[start_hour, end_hour)` on the turf/date.
    pub async fn find_conflicts(
        &self,
        turf_id: Ulid,
        date: Date,
        start_hour: Hour,
        end_hour: Hour,
    ) -> Result<Vec<Interval>, EngineError> {
        let span = validate_window(start_hour, end_hour)?;
        let Some(day) = self.get_day(turf_id, date) else {
            return Ok(Vec::new());
        };
        let guard = day.read().await;
        Ok(guard.overlapping(&span).copied().collect())
    }

    /// A user's bookings joined with turf display metadata from the
    /// directory.
    pub fn bookings_for_user(&self, user_id: Ulid) -> Vec<UserBooking> {
        let Some(records) = self.user_bookings.get(&user_id) else {
            return Vec::new();
        };
        records
            .iter()
            .filter_map(|r| {
                let turf = self.turfs.get(&r.turf_id)?;
                Some(UserBooking {
                    id: r.id,
                    turf_id: r.turf_id,
                    turf_name: turf.name.clone(),
                    location: turf.location.clone(),
                    date: r.date,
                    start_hour: r.span.start,
                    end_hour: r.span.end,
                })
            })
            .collect()
    }

    /// All registered turfs.
    pub fn list_turfs(&self) -> Vec<Turf> {
        self.turfs.iter().map(|e| e.value().clone()).collect()
    }

    /// Turfs registered by one owner.
    pub fn turfs_owned_by(&self, owner_id: Ulid) -> Vec<Turf> {
        self.turfs
            .iter()
            .filter(|e| e.value().owner_id == owner_id)
            .map(|e| e.value().clone())
            .collect()
    }
}
