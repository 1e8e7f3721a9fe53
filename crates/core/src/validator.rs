//! # Time Window Validation
//!
//! Checks a batch of proposed windows before anything is written. Two rules
//! apply, independently of each other:
//!
//! 1. every candidate must start strictly before it ends
//! 2. no candidate may overlap a stored window of the room, nor an earlier
//!    well-ordered candidate of the same batch
//!
//! Each rule reports at most one message per batch, however many candidates
//! break it. An inverted candidate is never tested for overlap.

use uuid::Uuid;

use crate::{
    errors::{AttendanceError, AttendanceResult},
    messages,
    models::time_window::{TimeRange, TimeWindow},
};

/// Returns the messages describing why `candidates` cannot be stored.
///
/// `existing` should hold the room's stored windows; the one whose id equals
/// `exclude` (the window being edited) is ignored. An empty result means the
/// whole batch is acceptable.
pub fn check_windows(
    candidates: &[TimeRange],
    existing: &[TimeWindow],
    exclude: Option<Uuid>,
) -> Vec<String> {
    let mut ordering_error = false;
    let mut overlap_error = false;
    let mut accepted: Vec<&TimeRange> = Vec::with_capacity(candidates.len());

    for candidate in candidates {
        if !candidate.is_ordered() {
            ordering_error = true;
            continue;
        }

        let hits_stored = existing
            .iter()
            .filter(|window| Some(window.id) != exclude)
            .any(|window| candidate.overlaps(&window.range()));
        let hits_batch = accepted.iter().any(|earlier| candidate.overlaps(earlier));

        if hits_stored || hits_batch {
            overlap_error = true;
        }
        accepted.push(candidate);
    }

    let mut errors = Vec::new();
    if ordering_error {
        errors.push(messages::START_BEFORE_END.to_string());
    }
    if overlap_error {
        errors.push(messages::OVERLAPPING_TIME.to_string());
    }
    errors
}

/// Like [`check_windows`], but surfaces the first message as a validation error.
pub fn ensure_valid(
    candidates: &[TimeRange],
    existing: &[TimeWindow],
    exclude: Option<Uuid>,
) -> AttendanceResult<()> {
    match check_windows(candidates, existing, exclude).into_iter().next() {
        Some(message) => Err(AttendanceError::Validation(message)),
        None => Ok(()),
    }
}
