use time::Date;
use tracing::{debug, info};
use ulid::Ulid;

use crate::limits::*;
use crate::model::*;
use crate::observability;

use super::conflict::{check_no_conflict, validate_window};
use super::{Engine, EngineError};

impl Engine {
    /// Register a bookable turf in the directory. Owner-only.
    pub async fn register_turf(
        &self,
        id: Ulid,
        name: String,
        location: String,
        image_url: String,
        owner: &Principal,
    ) -> Result<Turf, EngineError> {
        if owner.role != Role::Owner {
            return Err(EngineError::Forbidden(owner.id));
        }
        if name.is_empty() || name.len() > MAX_NAME_LEN {
            return Err(EngineError::InvalidRequest("turf name empty or too long"));
        }
        if location.len() > MAX_LOCATION_LEN {
            return Err(EngineError::InvalidRequest("location too long"));
        }
        if image_url.len() > MAX_IMAGE_URL_LEN {
            return Err(EngineError::InvalidRequest("image URL too long"));
        }
        if self.turf_count() >= MAX_TURFS {
            return Err(EngineError::InvalidRequest("too many turfs"));
        }
        if self.contains_turf(&id) {
            return Err(EngineError::AlreadyExists(id));
        }

        let turf = Turf {
            id,
            name,
            location,
            image_url,
            owner_id: owner.id,
        };
        let event = Event::TurfRegistered {
            id,
            name: turf.name.clone(),
            location: turf.location.clone(),
            image_url: turf.image_url.clone(),
            owner_id: owner.id,
        };
        self.wal_append(&event).await?;
        self.turfs.insert(id, turf.clone());

        metrics::gauge!(observability::TURFS_ACTIVE).set(self.turf_count() as f64);
        info!("turf {id} registered by owner {}", owner.id);
        Ok(turf)
    }

    /// Admit a user booking for `[start_hour, end_hour)` on `date`, or
    /// reject it.
    ///
    /// The conflict scan and the insert run under the (turf, date) write
    /// lock, so two racing requests for overlapping windows can never both
    /// commit — the loser observes the winner's interval and gets
    /// `SlotOccupied`.
    pub async fn book(
        &self,
        turf_id: Ulid,
        date: Date,
        start_hour: Hour,
        end_hour: Hour,
        actor: &Principal,
    ) -> Result<Interval, EngineError> {
        let span = validate_window(start_hour, end_hour)?;
        if !self.contains_turf(&turf_id) {
            return Err(EngineError::NotFound(turf_id));
        }

        let day = self.day_state(turf_id, date);
        let mut guard = day.write().await;
        if let Err(e) = check_no_conflict(&guard, &span) {
            metrics::counter!(
                observability::ADMISSIONS_REJECTED_TOTAL,
                "op" => "book", "reason" => "conflict"
            )
            .increment(1);
            debug!("booking rejected on turf {turf_id} {date}: {e}");
            return Err(e);
        }

        let id = Ulid::new();
        let event = Event::BookingAdmitted {
            id,
            turf_id,
            date,
            span,
            user_id: actor.id,
        };
        self.persist_and_apply(&mut guard, &event).await?;

        metrics::counter!(observability::ADMISSIONS_TOTAL, "op" => "book").increment(1);
        info!("booking {id} admitted on turf {turf_id} {date} [{start_hour},{end_hour})");
        Ok(Interval {
            id,
            span,
            kind: SlotKind::Booking { user_id: actor.id },
        })
    }

    /// Withhold `[start_hour, end_hour)` on `date` for offline use.
    ///
    /// Owner-only: the actor must be the turf's registered owner, checked
    /// before any conflict work. Existing bookings and blocks are honored
    /// identically — an owner cannot block a slot a user already holds.
    pub async fn block(
        &self,
        turf_id: Ulid,
        date: Date,
        start_hour: Hour,
        end_hour: Hour,
        actor: &Principal,
    ) -> Result<Interval, EngineError> {
        let span = validate_window(start_hour, end_hour)?;
        let turf = self.turf(&turf_id).ok_or(EngineError::NotFound(turf_id))?;
        if actor.role != Role::Owner || turf.owner_id != actor.id {
            metrics::counter!(
                observability::ADMISSIONS_REJECTED_TOTAL,
                "op" => "block", "reason" => "forbidden"
            )
            .increment(1);
            return Err(EngineError::Forbidden(actor.id));
        }

        let day = self.day_state(turf_id, date);
        let mut guard = day.write().await;
        if let Err(e) = check_no_conflict(&guard, &span) {
            metrics::counter!(
                observability::ADMISSIONS_REJECTED_TOTAL,
                "op" => "block", "reason" => "conflict"
            )
            .increment(1);
            debug!("block rejected on turf {turf_id} {date}: {e}");
            return Err(e);
        }

        let id = Ulid::new();
        let event = Event::BlockAdmitted {
            id,
            turf_id,
            date,
            span,
        };
        self.persist_and_apply(&mut guard, &event).await?;

        metrics::counter!(observability::ADMISSIONS_TOTAL, "op" => "block").increment(1);
        info!("block {id} admitted on turf {turf_id} {date} [{start_hour},{end_hour})");
        Ok(Interval {
            id,
            span,
            kind: SlotKind::Block,
        })
    }
}
