// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Booking construction rules.
//!
//! Construction is pure: the caller resolves the tour and the acting
//! identity, supplies the creation instant, and receives a draft ready for
//! persistence. The total is computed here, once, from the tour's price at
//! the creation instant; it is never recomputed afterwards.

use rust_decimal::Decimal;
use time::OffsetDateTime;
use wayfarer_domain::{
    BookingOwner, BookingStatus, Tour, validate_booking_date, validate_people_count,
};

use crate::error::CoreError;

/// A validated booking awaiting persistence.
///
/// Identical to a `Booking` except that no identifier has been assigned
/// yet; the repository assigns one on insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingDraft {
    /// The booked tour.
    pub tour_id: i64,
    /// The owning party.
    pub owner: BookingOwner,
    /// Party size.
    pub people: i32,
    /// Total price snapshot.
    pub total: Decimal,
    /// The tour date.
    pub date: OffsetDateTime,
    /// Optional free-form notes.
    pub notes: Option<String>,
    /// Initial status; always confirmed.
    pub status: BookingStatus,
    /// The creation instant.
    pub created_at: OffsetDateTime,
}

/// Builds a booking draft from a resolved tour and identity.
///
/// Validates the party size and that the tour date is strictly in the
/// future relative to `now`, then snapshots `total = tour.price * people`.
///
/// # Arguments
///
/// * `tour` - The resolved tour being booked
/// * `owner` - The acting identity, already resolved to account or guest
/// * `people` - The requested party size
/// * `date` - The requested tour date
/// * `notes` - Optional free-form notes
/// * `now` - The creation instant
///
/// # Errors
///
/// Returns a `CoreError::DomainViolation` if the party size is below one
/// or the date is not in the future.
pub fn build_booking(
    tour: &Tour,
    owner: BookingOwner,
    people: i32,
    date: OffsetDateTime,
    notes: Option<String>,
    now: OffsetDateTime,
) -> Result<BookingDraft, CoreError> {
    validate_people_count(people)?;
    validate_booking_date(date, now)?;

    let total: Decimal = tour.price * Decimal::from(people);

    Ok(BookingDraft {
        tour_id: tour.id,
        owner,
        people,
        total,
        date,
        notes,
        status: BookingStatus::Confirmed,
        created_at: now,
    })
}
