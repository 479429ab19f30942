mod admission;
mod conflict;
mod error;
mod queries;

pub use error::EngineError;

use std::io;
use std::path::Path;
use std::sync::Arc;

use dashmap::DashMap;
use time::Date;
use tokio::sync::{Mutex, RwLock};
use ulid::Ulid;

use crate::model::*;
use crate::observability;
use crate::wal::Wal;

pub type SharedDayState = Arc<RwLock<DayState>>;

/// Key of a committed-interval set: one turf on one calendar day.
pub type DayKey = (Ulid, Date);

/// The admission engine: turf directory, committed intervals keyed per
/// (turf, date), and the admission log.
///
/// Each day's check-and-insert runs under that day's write lock, so
/// admissions for the same (turf, date) are serialized while independent
/// days proceed in parallel.
pub struct Engine {
    /// Registered turfs — the resource directory.
    turfs: DashMap<Ulid, Turf>,
    /// Committed intervals per (turf, date).
    days: DashMap<DayKey, SharedDayState>,
    /// user id → that user's admitted bookings, in admission order.
    user_bookings: DashMap<Ulid, Vec<BookingRecord>>,
    wal: Mutex<Wal>,
}

/// Apply an interval event to a day the caller has locked.
fn apply_to_day(day: &mut DayState, event: &Event, user_index: &DashMap<Ulid, Vec<BookingRecord>>) {
    match event {
        Event::BookingAdmitted {
            id,
            turf_id,
            date,
            span,
            user_id,
        } => {
            day.insert_interval(Interval {
                id: *id,
                span: *span,
                kind: SlotKind::Booking { user_id: *user_id },
            });
            user_index.entry(*user_id).or_default().push(BookingRecord {
                id: *id,
                turf_id: *turf_id,
                date: *date,
                span: *span,
            });
        }
        Event::BlockAdmitted { id, span, .. } => {
            day.insert_interval(Interval {
                id: *id,
                span: *span,
                kind: SlotKind::Block,
            });
        }
        // Directory events are handled at the map level, not per day
        Event::TurfRegistered { .. } => {}
    }
}

/// Extract the (turf, date) key from an interval event.
fn event_day_key(event: &Event) -> Option<DayKey> {
    match event {
        Event::BookingAdmitted { turf_id, date, .. }
        | Event::BlockAdmitted { turf_id, date, .. } => Some((*turf_id, *date)),
        Event::TurfRegistered { .. } => None,
    }
}

impl Engine {
    /// Open the engine at `wal_path`, replaying previously admitted state.
    pub fn open(wal_path: impl AsRef<Path>) -> io::Result<Self> {
        let wal_path = wal_path.as_ref();
        let events = Wal::replay(wal_path)?;
        let wal = Wal::open(wal_path)?;

        let engine = Self {
            turfs: DashMap::new(),
            days: DashMap::new(),
            user_bookings: DashMap::new(),
            wal: Mutex::new(wal),
        };

        // Replay events — we're the sole owner of the day Arcs here, so
        // try_write always succeeds instantly (no contention).
        for event in &events {
            match event {
                Event::TurfRegistered {
                    id,
                    name,
                    location,
                    image_url,
                    owner_id,
                } => {
                    engine.turfs.insert(
                        *id,
                        Turf {
                            id: *id,
                            name: name.clone(),
                            location: location.clone(),
                            image_url: image_url.clone(),
                            owner_id: *owner_id,
                        },
                    );
                }
                other => {
                    if let Some(key) = event_day_key(other) {
                        let day = engine.day_state(key.0, key.1);
                        let mut guard = day.try_write().expect("replay: uncontended write");
                        apply_to_day(&mut guard, other, &engine.user_bookings);
                    }
                }
            }
        }

        Ok(engine)
    }

    /// Write an event to the admission log, fsynced before it is applied.
    async fn wal_append(&self, event: &Event) -> Result<(), EngineError> {
        let mut wal = self.wal.lock().await;
        let start = std::time::Instant::now();
        let result = wal.append(event);
        metrics::histogram!(observability::WAL_APPEND_DURATION_SECONDS)
            .record(start.elapsed().as_secs_f64());
        result.map_err(|e| EngineError::WalFailure(e.to_string()))
    }

    /// WAL-append + apply in one call while the caller holds the day lock.
    pub(super) async fn persist_and_apply(
        &self,
        day: &mut DayState,
        event: &Event,
    ) -> Result<(), EngineError> {
        self.wal_append(event).await?;
        apply_to_day(day, event, &self.user_bookings);
        Ok(())
    }

    // ── Directory accessors ──────────────────────────────────

    pub fn turf_count(&self) -> usize {
        self.turfs.len()
    }

    pub fn contains_turf(&self, id: &Ulid) -> bool {
        self.turfs.contains_key(id)
    }

    pub(super) fn turf(&self, id: &Ulid) -> Option<Turf> {
        self.turfs.get(id).map(|e| e.value().clone())
    }

    // ── Day-state accessors ──────────────────────────────────

    /// Get or lazily create the committed-interval set for (turf, date).
    pub(super) fn day_state(&self, turf_id: Ulid, date: Date) -> SharedDayState {
        self.days
            .entry((turf_id, date))
            .or_insert_with(|| Arc::new(RwLock::new(DayState::new(turf_id, date))))
            .value()
            .clone()
    }

    /// The day's state if any interval was ever admitted for it.
    pub(super) fn get_day(&self, turf_id: Ulid, date: Date) -> Option<SharedDayState> {
        self.days.get(&(turf_id, date)).map(|e| e.value().clone())
    }
}
