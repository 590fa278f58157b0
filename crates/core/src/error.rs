// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use wayfarer_domain::DomainError;

/// Errors that can occur while applying booking lifecycle rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A domain rule was violated.
    DomainViolation(DomainError),
    /// The requester is not permitted to act on the booking.
    NotPermitted,
    /// A guest booking can only be cancelled with the booking email.
    GuestEmailRequired,
    /// The supplied guest email does not match the booking record.
    GuestEmailMismatch,
    /// The cancellation-notice requirement was not met.
    CancellationNoticeBreached {
        /// Whole hours remaining until the tour date at decision time.
        hours_remaining: i64,
    },
}

impl std::fmt::Display for CoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DomainViolation(err) => write!(f, "Domain violation: {err}"),
            Self::NotPermitted => write!(f, "Requester is not permitted to act on this booking"),
            Self::GuestEmailRequired => {
                write!(f, "Email is required to cancel a guest booking")
            }
            Self::GuestEmailMismatch => {
                write!(f, "Email does not match the booking record")
            }
            Self::CancellationNoticeBreached { hours_remaining } => {
                write!(
                    f,
                    "Bookings can only be cancelled at least 24 hours before the tour date ({hours_remaining}h remaining)"
                )
            }
        }
    }
}

impl std::error::Error for CoreError {}

impl From<DomainError> for CoreError {
    fn from(err: DomainError) -> Self {
        Self::DomainViolation(err)
    }
}
