// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use rust_decimal::Decimal;
use time::OffsetDateTime;

/// Errors produced by domain validation rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// An email address does not have a plausible shape.
    InvalidEmail(String),
    /// Guest contact information is missing or incomplete.
    InvalidGuestContact(String),
    /// The party size is below the minimum of one person.
    InvalidPeopleCount {
        /// The rejected party size.
        count: i32,
    },
    /// The booking date is not strictly in the future.
    BookingDateNotInFuture {
        /// The rejected booking date.
        date: OffsetDateTime,
    },
    /// A tour price must be strictly positive.
    InvalidPrice {
        /// The rejected price.
        price: Decimal,
    },
    /// A booking status transition is not permitted.
    InvalidStatusTransition {
        /// The current status.
        from: String,
        /// The requested status.
        to: String,
        /// Why the transition is not allowed.
        reason: String,
    },
    /// A status string does not name a known booking status.
    InvalidBookingStatus {
        /// The rejected status string.
        status: String,
    },
    /// A role string does not name a known role.
    InvalidRole(String),
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidEmail(msg) => write!(f, "Invalid email address: {msg}"),
            Self::InvalidGuestContact(msg) => write!(f, "Invalid guest contact: {msg}"),
            Self::InvalidPeopleCount { count } => {
                write!(f, "Number of people must be at least 1, got {count}")
            }
            Self::BookingDateNotInFuture { date } => {
                write!(f, "Booking date must be in the future, got {date}")
            }
            Self::InvalidPrice { price } => {
                write!(f, "Tour price must be greater than 0, got {price}")
            }
            Self::InvalidStatusTransition { from, to, reason } => {
                write!(f, "Cannot transition booking from {from} to {to}: {reason}")
            }
            Self::InvalidBookingStatus { status } => {
                write!(f, "Unknown booking status: {status}")
            }
            Self::InvalidRole(role) => write!(f, "Unknown role: {role}"),
        }
    }
}

impl std::error::Error for DomainError {}
