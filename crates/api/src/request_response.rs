// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use wayfarer_domain::{Booking, BookingStatus, Role};
use wayfarer_persistence::AccountData;

/// API request to create a booking.
///
/// The guest fields are required when no usable credential accompanies
/// the request and ignored otherwise.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateBookingRequest {
    /// The tour to book.
    pub tour_id: i64,
    /// Party size.
    pub people: i32,
    /// The tour date. Must be strictly in the future.
    #[serde(with = "time::serde::iso8601")]
    pub date: OffsetDateTime,
    /// Optional free-form notes.
    #[serde(default)]
    pub notes: Option<String>,
    /// Guest name, for guest bookings.
    #[serde(default)]
    pub guest_name: Option<String>,
    /// Guest email, for guest bookings.
    #[serde(default)]
    pub guest_email: Option<String>,
    /// Guest phone, optional even for guest bookings.
    #[serde(default)]
    pub guest_phone: Option<String>,
}

/// A booking as presented to API callers.
///
/// Owner details are flattened into a booking-type discriminator plus
/// customer contact fields drawn from whichever owner variant is
/// populated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingInfo {
    /// The booking identifier.
    pub id: i64,
    /// The booked tour.
    pub tour_id: i64,
    /// `"authenticated"` for account-owned bookings, `"guest"` otherwise.
    pub booking_type: String,
    /// The owning account id, for account-owned bookings.
    pub account_id: Option<i64>,
    /// The customer's name, when known.
    pub customer_name: Option<String>,
    /// The customer's email, when known.
    pub customer_email: Option<String>,
    /// Party size.
    pub people: i32,
    /// Total price, snapshotted at creation.
    pub total: Decimal,
    /// The tour date.
    #[serde(with = "time::serde::iso8601")]
    pub date: OffsetDateTime,
    /// Optional free-form notes.
    pub notes: Option<String>,
    /// Lifecycle status.
    pub status: BookingStatus,
    /// When the booking was created.
    #[serde(with = "time::serde::iso8601")]
    pub created_at: OffsetDateTime,
}

impl BookingInfo {
    /// Builds the API view of a booking.
    ///
    /// For account-owned bookings the customer fields come from the
    /// account record when the caller supplies one; guest-owned bookings
    /// carry their own contact details.
    #[must_use]
    pub fn from_booking(booking: &Booking, account: Option<&AccountData>) -> Self {
        let (customer_name, customer_email) = match (booking.owner.guest(), account) {
            (Some(contact), _) => (
                Some(contact.name.clone()),
                Some(contact.email.value().to_string()),
            ),
            (None, Some(account)) => (Some(account.name.clone()), Some(account.email.clone())),
            (None, None) => (None, None),
        };

        Self {
            id: booking.id,
            tour_id: booking.tour_id,
            booking_type: booking.owner.kind().to_string(),
            account_id: booking.owner.account_id(),
            customer_name,
            customer_email,
            people: booking.people,
            total: booking.total,
            date: booking.date,
            notes: booking.notes.clone(),
            status: booking.status,
            created_at: booking.created_at,
        }
    }
}

/// API response for a successful booking creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateBookingResponse {
    /// A success message, shaped by whether the booking was created for
    /// an account or a guest.
    pub message: String,
    /// The created booking.
    pub booking: BookingInfo,
}

/// API request to cancel a booking.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CancelBookingRequest {
    /// The booking email, required when cancelling a guest booking
    /// without a credential.
    #[serde(default)]
    pub guest_email: Option<String>,
}

/// API response for a successful cancellation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CancelBookingResponse {
    /// A success message.
    pub message: String,
    /// Why the requester was eligible: `"admin"`, `"owner"`, or `"guest"`.
    pub reason: String,
}

/// API response for booking listings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListBookingsResponse {
    /// The bookings, newest first.
    pub bookings: Vec<BookingInfo>,
}

/// API request to look up guest bookings by email.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuestLookupRequest {
    /// The guest email to look up.
    pub email: String,
}

/// API response for a guest booking lookup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuestLookupResponse {
    /// A summary message.
    pub message: String,
    /// Matching guest bookings, newest first.
    pub bookings: Vec<BookingInfo>,
}

/// API request to link guest bookings to the caller's account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkGuestBookingsRequest {
    /// The guest email whose bookings should be re-owned.
    pub guest_email: String,
}

/// API response for a successful link operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkGuestBookingsResponse {
    /// A success message.
    pub message: String,
    /// How many bookings were migrated.
    pub linked_bookings: usize,
}

/// An account as presented to API callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountInfo {
    /// The account identifier.
    pub id: i64,
    /// The account holder's name.
    pub name: String,
    /// The account email address.
    pub email: String,
    /// The account role.
    pub role: Role,
    /// Whether the account is active.
    pub active: bool,
    /// When the account was created.
    #[serde(with = "time::serde::iso8601")]
    pub created_at: OffsetDateTime,
}

impl From<&AccountData> for AccountInfo {
    fn from(account: &AccountData) -> Self {
        Self {
            id: account.id,
            name: account.name.clone(),
            email: account.email.clone(),
            role: account.role,
            active: account.active,
            created_at: account.created_at,
        }
    }
}

/// API response for listing accounts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListAccountsResponse {
    /// The accounts, newest first.
    pub accounts: Vec<AccountInfo>,
}

/// API response for reading one account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetAccountResponse {
    /// The account.
    pub account: AccountInfo,
    /// The account's bookings, newest first.
    pub bookings: Vec<BookingInfo>,
}

/// API request to change an account's role.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateAccountRoleRequest {
    /// The new role, `"USER"` or `"ADMIN"`.
    pub role: String,
}

/// API response for a successful role change.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateAccountRoleResponse {
    /// A success message.
    pub message: String,
    /// The updated account.
    pub account: AccountInfo,
}

/// API request to change an account's active status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateAccountStatusRequest {
    /// The new active flag.
    pub active: bool,
}

/// API response for a successful status change.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateAccountStatusResponse {
    /// A success message.
    pub message: String,
    /// The updated account.
    pub account: AccountInfo,
}
