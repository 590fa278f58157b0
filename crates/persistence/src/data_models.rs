// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Row models and conversions between stored rows and domain values.
//!
//! Dates are stored as ISO-8601 UTC text and money as decimal text. Rows
//! that fail to convert back into domain values surface as
//! `CorruptRecord` rather than panicking.

use diesel::prelude::*;
use rust_decimal::Decimal;
use serde::Serialize;
use std::str::FromStr;
use time::OffsetDateTime;
use time::format_description::well_known::Iso8601;
use wayfarer_core::BookingDraft;
use wayfarer_domain::{
    Booking, BookingOwner, BookingStatus, Email, GuestContact, Principal, Role, Tour,
};

use crate::diesel_schema::{accounts, bookings, tours};
use crate::error::PersistenceError;

/// Formats a timestamp for storage.
pub(crate) fn format_timestamp(ts: OffsetDateTime) -> Result<String, PersistenceError> {
    ts.format(&Iso8601::DEFAULT)
        .map_err(|e| PersistenceError::TimestampError(format!("Failed to format timestamp: {e}")))
}

/// Parses a stored timestamp.
pub(crate) fn parse_timestamp(value: &str) -> Result<OffsetDateTime, PersistenceError> {
    OffsetDateTime::parse(value, &Iso8601::DEFAULT).map_err(|e| {
        PersistenceError::TimestampError(format!("Failed to parse timestamp '{value}': {e}"))
    })
}

/// Raw account row.
#[derive(Debug, Clone, Queryable)]
pub struct AccountRow {
    pub account_id: i64,
    pub name: String,
    pub email: String,
    pub role: String,
    pub is_active: i32,
    pub created_at: String,
}

/// A stored account, converted to domain terms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccountData {
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

impl AccountData {
    /// Converts this account into a principal.
    #[must_use]
    pub const fn to_principal(&self) -> Principal {
        Principal::new(self.id, self.role, self.active)
    }
}

impl TryFrom<AccountRow> for AccountData {
    type Error = PersistenceError;

    fn try_from(row: AccountRow) -> Result<Self, Self::Error> {
        let role: Role = row.role.parse().map_err(|_| PersistenceError::CorruptRecord {
            table: String::from("accounts"),
            id: row.account_id,
            reason: format!("unknown role '{}'", row.role),
        })?;
        let created_at: OffsetDateTime = parse_timestamp(&row.created_at)?;

        Ok(Self {
            id: row.account_id,
            name: row.name,
            email: row.email,
            role,
            active: row.is_active != 0,
            created_at,
        })
    }
}

/// Insertable account row.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = accounts)]
pub struct NewAccountRow {
    pub name: String,
    pub email: String,
    pub role: String,
    pub is_active: i32,
    pub created_at: String,
}

/// Raw tour row.
#[derive(Debug, Clone, Queryable)]
pub struct TourRow {
    pub tour_id: i64,
    pub title: String,
    pub price: String,
    pub created_at: String,
}

impl TryFrom<TourRow> for Tour {
    type Error = PersistenceError;

    fn try_from(row: TourRow) -> Result<Self, Self::Error> {
        let price: Decimal =
            Decimal::from_str(&row.price).map_err(|e| PersistenceError::CorruptRecord {
                table: String::from("tours"),
                id: row.tour_id,
                reason: format!("unparseable price '{}': {e}", row.price),
            })?;

        Self::new(row.tour_id, row.title, price).map_err(|e| PersistenceError::CorruptRecord {
            table: String::from("tours"),
            id: row.tour_id,
            reason: e.to_string(),
        })
    }
}

/// Insertable tour row.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = tours)]
pub struct NewTourRow {
    pub title: String,
    pub price: String,
    pub created_at: String,
}

/// Raw booking row.
#[derive(Debug, Clone, Queryable)]
pub struct BookingRow {
    pub booking_id: i64,
    pub tour_id: i64,
    pub account_id: Option<i64>,
    pub guest_name: Option<String>,
    pub guest_email: Option<String>,
    pub guest_phone: Option<String>,
    pub people: i32,
    pub total: String,
    pub tour_date: String,
    pub notes: Option<String>,
    pub status: String,
    pub created_at: String,
}

impl BookingRow {
    /// Reconstructs the owner union from the stored columns.
    ///
    /// The schema CHECK constraint guarantees exactly one variant is
    /// populated; anything else is a corrupt record.
    fn owner(&self) -> Result<BookingOwner, PersistenceError> {
        let corrupt = |reason: String| PersistenceError::CorruptRecord {
            table: String::from("bookings"),
            id: self.booking_id,
            reason,
        };

        match (&self.account_id, &self.guest_name, &self.guest_email) {
            (Some(account_id), None, None) => Ok(BookingOwner::Account {
                account_id: *account_id,
            }),
            (None, Some(name), Some(email)) => {
                let email: Email = Email::parse(email)
                    .map_err(|e| corrupt(format!("stored guest email rejected: {e}")))?;
                let contact: GuestContact =
                    GuestContact::new(name, email, self.guest_phone.clone())
                        .map_err(|e| corrupt(format!("stored guest contact rejected: {e}")))?;
                Ok(BookingOwner::Guest(contact))
            }
            _ => Err(corrupt(String::from(
                "owner columns do not form exactly one owner variant",
            ))),
        }
    }
}

impl TryFrom<BookingRow> for Booking {
    type Error = PersistenceError;

    fn try_from(row: BookingRow) -> Result<Self, Self::Error> {
        let owner: BookingOwner = row.owner()?;

        let corrupt = |reason: String| PersistenceError::CorruptRecord {
            table: String::from("bookings"),
            id: row.booking_id,
            reason,
        };

        let total: Decimal = Decimal::from_str(&row.total)
            .map_err(|e| corrupt(format!("unparseable total '{}': {e}", row.total)))?;
        let status: BookingStatus = row
            .status
            .parse()
            .map_err(|_| corrupt(format!("unknown status '{}'", row.status)))?;
        let date: OffsetDateTime = parse_timestamp(&row.tour_date)?;
        let created_at: OffsetDateTime = parse_timestamp(&row.created_at)?;

        Ok(Self {
            id: row.booking_id,
            tour_id: row.tour_id,
            owner,
            people: row.people,
            total,
            date,
            notes: row.notes,
            status,
            created_at,
        })
    }
}

/// Insertable booking row.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = bookings)]
pub struct NewBookingRow {
    pub tour_id: i64,
    pub account_id: Option<i64>,
    pub guest_name: Option<String>,
    pub guest_email: Option<String>,
    pub guest_phone: Option<String>,
    pub people: i32,
    pub total: String,
    pub tour_date: String,
    pub notes: Option<String>,
    pub status: String,
    pub created_at: String,
}

impl NewBookingRow {
    /// Builds an insertable row from a validated booking draft.
    ///
    /// # Errors
    ///
    /// Returns an error if timestamp formatting fails.
    pub fn from_draft(draft: &BookingDraft) -> Result<Self, PersistenceError> {
        let (account_id, guest_name, guest_email, guest_phone) = match &draft.owner {
            BookingOwner::Account { account_id } => (Some(*account_id), None, None, None),
            BookingOwner::Guest(contact) => (
                None,
                Some(contact.name.clone()),
                Some(contact.email.value().to_string()),
                contact.phone.clone(),
            ),
        };

        Ok(Self {
            tour_id: draft.tour_id,
            account_id,
            guest_name,
            guest_email,
            guest_phone,
            people: draft.people,
            total: draft.total.to_string(),
            tour_date: format_timestamp(draft.date)?,
            notes: draft.notes.clone(),
            status: draft.status.as_str().to_string(),
            created_at: format_timestamp(draft.created_at)?,
        })
    }
}
