// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::str::FromStr;

use crate::{BookingStatus, DomainError};

#[test]
fn test_status_round_trips_through_strings() {
    assert_eq!(
        BookingStatus::from_str("CONFIRMED").unwrap(),
        BookingStatus::Confirmed
    );
    assert_eq!(
        BookingStatus::from_str("CANCELLED").unwrap(),
        BookingStatus::Cancelled
    );
    assert_eq!(BookingStatus::Confirmed.as_str(), "CONFIRMED");
    assert_eq!(BookingStatus::Cancelled.as_str(), "CANCELLED");
}

#[test]
fn test_status_rejects_unknown_strings() {
    let result = BookingStatus::from_str("PENDING");
    assert!(matches!(
        result,
        Err(DomainError::InvalidBookingStatus { .. })
    ));
}

#[test]
fn test_confirmed_to_cancelled_is_allowed() {
    assert!(
        BookingStatus::Confirmed
            .validate_transition(BookingStatus::Cancelled)
            .is_ok()
    );
}

#[test]
fn test_cancelled_is_terminal() {
    assert!(BookingStatus::Cancelled.is_terminal());

    // No transition out of cancelled, including re-cancellation
    let result = BookingStatus::Cancelled.validate_transition(BookingStatus::Confirmed);
    assert!(matches!(
        result,
        Err(DomainError::InvalidStatusTransition { .. })
    ));

    let result = BookingStatus::Cancelled.validate_transition(BookingStatus::Cancelled);
    assert!(result.is_err());
}

#[test]
fn test_confirmed_to_confirmed_is_rejected() {
    let result = BookingStatus::Confirmed.validate_transition(BookingStatus::Confirmed);
    assert!(matches!(
        result,
        Err(DomainError::InvalidStatusTransition { .. })
    ));
}
