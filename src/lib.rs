//! Hourly slot admission for bookable venues ("turfs").
//!
//! Facility owners publish turfs; users reserve hourly windows on a
//! calendar day; owners withhold windows for offline use. The engine
//! decides atomically whether a requested `[start, end)` window may be
//! granted — considering user bookings and owner blocks alike — and
//! records every admission in an append-only log, so no two admitted
//! windows for the same turf and date ever overlap.
//!
//! The crate is transport-agnostic: an API layer maps its own wire format
//! onto [`Engine::book`], [`Engine::block`], [`Engine::occupied`] and
//! [`Engine::bookings_for_user`], supplying the authenticated
//! [`model::Principal`] it resolved from the caller's credential.

pub mod config;
pub mod engine;
pub mod limits;
pub mod model;
pub mod observability;
pub mod wal;

pub use config::Config;
pub use engine::{Engine, EngineError};
