// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::booking_status::BookingStatus;
use crate::email::Email;
use crate::error::DomainError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::OffsetDateTime;

/// Account roles for authorization.
///
/// Roles determine what operations an authenticated principal may perform.
/// Guests have no role: they are not principals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    /// Regular account: may manage its own bookings and read its own profile.
    User,
    /// Admin account: may read and cancel any booking, list accounts,
    /// and change other accounts' role and active status.
    Admin,
}

impl Role {
    /// Returns the string representation of the role.
    ///
    /// This is used for persistence and API serialization.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::User => "USER",
            Self::Admin => "ADMIN",
        }
    }
}

impl FromStr for Role {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "USER" => Ok(Self::User),
            "ADMIN" => Ok(Self::Admin),
            _ => Err(DomainError::InvalidRole(s.to_string())),
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A resolved, authenticated identity attached to a request.
///
/// Principals are sourced fresh from the account store on every request
/// using the verified credential claim; they are never cached across
/// requests. An inactive principal is treated identically to "no
/// credential" by the resolver, so downstream code may assume
/// `active == true`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    /// The account identifier.
    pub id: i64,
    /// The role assigned to this account.
    pub role: Role,
    /// Whether the account is active. Resolvers only produce active
    /// principals; the flag is carried for admin listings.
    pub active: bool,
}

impl Principal {
    /// Creates a new principal.
    #[must_use]
    pub const fn new(id: i64, role: Role, active: bool) -> Self {
        Self { id, role, active }
    }
}

/// Contact details identifying an anonymous guest booker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuestContact {
    /// The guest's name.
    pub name: String,
    /// The guest's email address. This is the guest's only proof of
    /// ownership for cancellation and reconciliation.
    pub email: Email,
    /// Optional phone number.
    pub phone: Option<String>,
}

impl GuestContact {
    /// Creates guest contact details.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidGuestContact` if the name is empty.
    pub fn new(name: &str, email: Email, phone: Option<String>) -> Result<Self, DomainError> {
        if name.trim().is_empty() {
            return Err(DomainError::InvalidGuestContact(String::from(
                "guest name must not be empty",
            )));
        }
        Ok(Self {
            name: name.to_string(),
            email,
            phone,
        })
    }
}

/// The owning party of a booking.
///
/// Exactly one variant holds at any point in a booking's life. A booking
/// is never simultaneously linked to an account and carrying guest
/// contact fields; reconciliation rewrites Guest to Account and clears
/// the contact fields as one logical update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookingOwner {
    /// The booking belongs to a registered account.
    Account {
        /// The owning account identifier.
        account_id: i64,
    },
    /// The booking belongs to an anonymous guest, identified by contact
    /// details only.
    Guest(GuestContact),
}

impl BookingOwner {
    /// Returns the owning account id, if the owner is an account.
    #[must_use]
    pub const fn account_id(&self) -> Option<i64> {
        match self {
            Self::Account { account_id } => Some(*account_id),
            Self::Guest(_) => None,
        }
    }

    /// Returns the guest contact, if the owner is a guest.
    #[must_use]
    pub const fn guest(&self) -> Option<&GuestContact> {
        match self {
            Self::Account { .. } => None,
            Self::Guest(contact) => Some(contact),
        }
    }

    /// Returns true if the owner is an anonymous guest.
    #[must_use]
    pub const fn is_guest(&self) -> bool {
        matches!(self, Self::Guest(_))
    }

    /// Returns the booking-type discriminator used in API responses.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Account { .. } => "authenticated",
            Self::Guest(_) => "guest",
        }
    }
}

/// A tour, read-only from the booking engine's perspective.
///
/// Tour content is owned by the tour-management subsystem; the booking
/// engine only needs the identifier and the current price for the
/// creation-time snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tour {
    /// The tour identifier.
    pub id: i64,
    /// The tour title, carried for response shaping.
    pub title: String,
    /// The current per-person price.
    pub price: Decimal,
}

impl Tour {
    /// Creates a tour reference.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidPrice` if the price is not strictly
    /// positive.
    pub fn new(id: i64, title: String, price: Decimal) -> Result<Self, DomainError> {
        if price <= Decimal::ZERO {
            return Err(DomainError::InvalidPrice { price });
        }
        Ok(Self { id, title, price })
    }
}

/// A booking record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Booking {
    /// The booking identifier.
    pub id: i64,
    /// The booked tour.
    pub tour_id: i64,
    /// The owning party.
    pub owner: BookingOwner,
    /// Party size, at least one.
    pub people: i32,
    /// Total price, snapshotted at creation as `tour.price * people`.
    /// Later price changes on the tour never alter it.
    pub total: Decimal,
    /// The tour date.
    pub date: OffsetDateTime,
    /// Optional free-form notes.
    pub notes: Option<String>,
    /// Lifecycle status.
    pub status: BookingStatus,
    /// When the booking was created.
    pub created_at: OffsetDateTime,
}
