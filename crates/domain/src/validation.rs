// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use time::OffsetDateTime;

/// Validates the party size for a booking.
///
/// # Arguments
///
/// * `people` - The requested party size
///
/// # Errors
///
/// Returns `DomainError::InvalidPeopleCount` if the count is below one.
pub const fn validate_people_count(people: i32) -> Result<(), DomainError> {
    if people < 1 {
        return Err(DomainError::InvalidPeopleCount { count: people });
    }
    Ok(())
}

/// Validates that a booking date is strictly in the future.
///
/// The comparison is against the creation instant supplied by the caller,
/// so the rule is deterministic under test.
///
/// # Arguments
///
/// * `date` - The requested tour date
/// * `now` - The creation instant
///
/// # Errors
///
/// Returns `DomainError::BookingDateNotInFuture` if `date <= now`.
pub fn validate_booking_date(
    date: OffsetDateTime,
    now: OffsetDateTime,
) -> Result<(), DomainError> {
    if date <= now {
        return Err(DomainError::BookingDateNotInFuture { date });
    }
    Ok(())
}
