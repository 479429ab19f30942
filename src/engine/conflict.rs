use crate::model::*;

use super::EngineError;

/// Check the requested window shape: whole hours, start strictly before
/// end, both within one calendar day.
pub(crate) fn validate_window(start: Hour, end: Hour) -> Result<HourSpan, EngineError> {
    if end > HOURS_PER_DAY {
        return Err(EngineError::InvalidRequest("end_hour past end of day"));
    }
    if start >= end {
        return Err(EngineError::InvalidRequest("start_hour must be before end_hour"));
    }
    Ok(HourSpan::new(start, end))
}

/// Scan bookings and blocks alike for a committed interval overlapping
/// `span`. The caller must hold the day lock for the verdict to remain
/// valid through the commit.
pub(crate) fn check_no_conflict(day: &DayState, span: &HourSpan) -> Result<(), EngineError> {
    match day.overlapping(span).next() {
        Some(hit) => Err(EngineError::SlotOccupied(hit.id)),
        None => Ok(()),
    }
}
