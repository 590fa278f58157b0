// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Booking query operations.

use diesel::prelude::*;
use diesel::SqliteConnection;

use crate::data_models::BookingRow;
use crate::diesel_schema::bookings;
use crate::error::PersistenceError;

/// Query a booking by id.
pub fn find_booking_by_id(
    conn: &mut SqliteConnection,
    booking_id: i64,
) -> Result<Option<BookingRow>, PersistenceError> {
    bookings::table
        .filter(bookings::booking_id.eq(booking_id))
        .first::<BookingRow>(conn)
        .optional()
        .map_err(|e| PersistenceError::QueryFailed(format!("find_booking_by_id: {e}")))
}

/// Query all bookings, newest first.
pub fn list_bookings(conn: &mut SqliteConnection) -> Result<Vec<BookingRow>, PersistenceError> {
    bookings::table
        .order((bookings::created_at.desc(), bookings::booking_id.desc()))
        .load::<BookingRow>(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("list_bookings: {e}")))
}

/// Query all bookings owned by an account, newest first.
pub fn list_bookings_by_account(
    conn: &mut SqliteConnection,
    account_id: i64,
) -> Result<Vec<BookingRow>, PersistenceError> {
    bookings::table
        .filter(bookings::account_id.eq(account_id))
        .order((bookings::created_at.desc(), bookings::booking_id.desc()))
        .load::<BookingRow>(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("list_bookings_by_account: {e}")))
}

/// Query all bookings for a tour, newest first.
pub fn list_bookings_by_tour(
    conn: &mut SqliteConnection,
    tour_id: i64,
) -> Result<Vec<BookingRow>, PersistenceError> {
    bookings::table
        .filter(bookings::tour_id.eq(tour_id))
        .order((bookings::created_at.desc(), bookings::booking_id.desc()))
        .load::<BookingRow>(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("list_bookings_by_tour: {e}")))
}

/// Query guest-owned bookings with an exact email match, newest first.
///
/// Bookings already linked to an account are excluded regardless of any
/// guest email they once carried; the schema clears guest columns on
/// link, so the `account_id IS NULL` filter is the authoritative guard.
pub fn find_bookings_by_guest_email(
    conn: &mut SqliteConnection,
    email: &str,
) -> Result<Vec<BookingRow>, PersistenceError> {
    bookings::table
        .filter(bookings::guest_email.eq(email))
        .filter(bookings::account_id.is_null())
        .order((bookings::created_at.desc(), bookings::booking_id.desc()))
        .load::<BookingRow>(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("find_bookings_by_guest_email: {e}")))
}
