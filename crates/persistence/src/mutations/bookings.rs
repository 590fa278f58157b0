// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Booking mutation operations.

use diesel::prelude::*;
use diesel::SqliteConnection;

use crate::data_models::NewBookingRow;
use crate::diesel_schema::bookings;
use crate::error::PersistenceError;
use crate::sqlite;

/// Insert a booking and return its assigned id.
pub fn insert_booking(
    conn: &mut SqliteConnection,
    record: &NewBookingRow,
) -> Result<i64, PersistenceError> {
    diesel::insert_into(bookings::table)
        .values(record)
        .execute(conn)?;
    sqlite::get_last_insert_rowid(conn)
}

/// Update a booking's status. Returns the number of affected rows.
pub fn update_booking_status(
    conn: &mut SqliteConnection,
    booking_id: i64,
    status: &str,
) -> Result<usize, PersistenceError> {
    diesel::update(bookings::table.filter(bookings::booking_id.eq(booking_id)))
        .set(bookings::status.eq(status))
        .execute(conn)
        .map_err(Into::into)
}

/// Re-own all guest bookings matching an email to an account.
///
/// This is one UPDATE statement: the account link is set and the guest
/// contact columns are cleared together, so the owner union never holds
/// both variants. Only rows still in guest state match the filter, which
/// is what makes the operation idempotent on retry. Returns the number
/// of migrated bookings.
pub fn bulk_reown_by_guest_email(
    conn: &mut SqliteConnection,
    email: &str,
    target_account_id: i64,
) -> Result<usize, PersistenceError> {
    diesel::update(
        bookings::table
            .filter(bookings::guest_email.eq(email))
            .filter(bookings::account_id.is_null()),
    )
    .set((
        bookings::account_id.eq(Some(target_account_id)),
        bookings::guest_name.eq(None::<String>),
        bookings::guest_email.eq(None::<String>),
        bookings::guest_phone.eq(None::<String>),
    ))
    .execute(conn)
    .map_err(Into::into)
}
