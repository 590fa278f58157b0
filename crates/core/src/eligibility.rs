// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Cancellation eligibility rules.
//!
//! Eligibility is decided in a fixed priority order: admin, then booking
//! owner, then guest-by-email. The admin path is the only one exempt from
//! the cancellation-notice requirement.

use time::OffsetDateTime;
use wayfarer_domain::{
    Booking, BookingOwner, BookingStatus, Principal, Role, hours_until,
    meets_cancellation_notice,
};

use crate::error::CoreError;

/// Why a cancellation request is eligible to proceed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CancellationReason {
    /// An admin may cancel any booking, regardless of lead time.
    Admin,
    /// The authenticated owner of an account-owned booking.
    Owner,
    /// A guest who proved ownership by presenting the booking email.
    Guest,
}

impl CancellationReason {
    /// Returns the string representation used in API responses.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Owner => "owner",
            Self::Guest => "guest",
        }
    }
}

impl std::fmt::Display for CancellationReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Decides whether the requester may cancel the booking, and why.
///
/// The priority order is:
///
/// 1. a principal with the Admin role is always eligible;
/// 2. a principal whose id matches the owning account is eligible;
/// 3. for a guest-owned booking, a supplied email that exactly matches
///    the booking email (case-sensitive) is eligible;
/// 4. a supplied email that does not match is rejected;
/// 5. a guest-owned booking with no supplied email is rejected, with a
///    distinct error so the caller can ask for the email;
/// 6. everything else is rejected.
///
/// The principal, if any, has already been resolved in optional mode, so
/// an invalid credential arrives here as `None` and falls through to the
/// guest checks.
///
/// # Errors
///
/// Returns `GuestEmailMismatch`, `GuestEmailRequired`, or `NotPermitted`
/// per the order above.
pub fn evaluate_cancellation(
    owner: &BookingOwner,
    principal: Option<&Principal>,
    guest_email: Option<&str>,
) -> Result<CancellationReason, CoreError> {
    if let Some(principal) = principal {
        if principal.role == Role::Admin {
            return Ok(CancellationReason::Admin);
        }
        if owner.account_id() == Some(principal.id) {
            return Ok(CancellationReason::Owner);
        }
    }

    if let Some(contact) = owner.guest() {
        return match guest_email {
            Some(email) if email == contact.email.value() => Ok(CancellationReason::Guest),
            Some(_) => Err(CoreError::GuestEmailMismatch),
            None => Err(CoreError::GuestEmailRequired),
        };
    }

    Err(CoreError::NotPermitted)
}

/// Runs the full cancellation decision for a loaded booking.
///
/// Combines eligibility, the cancellation-notice requirement, and the
/// status transition rule. Admin-eligible requests skip the notice
/// requirement; nobody skips the transition rule, so a cancelled booking
/// stays cancelled.
///
/// # Arguments
///
/// * `booking` - The booking to cancel
/// * `principal` - The requester's principal, if one resolved
/// * `guest_email` - The guest email supplied with the request, if any
/// * `now` - The decision instant
///
/// # Errors
///
/// Returns the eligibility error, `CancellationNoticeBreached`, or a
/// `DomainViolation` for an illegal status transition.
pub fn authorize_cancellation(
    booking: &Booking,
    principal: Option<&Principal>,
    guest_email: Option<&str>,
    now: OffsetDateTime,
) -> Result<CancellationReason, CoreError> {
    let reason: CancellationReason =
        evaluate_cancellation(&booking.owner, principal, guest_email)?;

    if reason != CancellationReason::Admin && !meets_cancellation_notice(booking.date, now) {
        return Err(CoreError::CancellationNoticeBreached {
            hours_remaining: hours_until(booking.date, now),
        });
    }

    booking
        .status
        .validate_transition(BookingStatus::Cancelled)?;

    Ok(reason)
}
