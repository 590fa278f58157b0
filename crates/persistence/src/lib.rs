// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for the Wayfarer booking backend.
//!
//! This crate provides `SQLite` persistence for accounts, tours, and
//! bookings, built on Diesel with embedded migrations.
//!
//! `SQLite` is the only backend. File-backed databases serve the server
//! binary; uniquely-named shared in-memory databases serve unit and
//! integration tests, which keeps tests fast, deterministic, and free of
//! external infrastructure.
//!
//! The adapter is the single injected repository: every component that
//! needs storage receives `&mut SqlitePersistence`, so tests can
//! substitute an in-memory instance without touching component code.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

use diesel::SqliteConnection;
use rust_decimal::Decimal;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use time::OffsetDateTime;
use tracing::{debug, info};
use wayfarer_core::BookingDraft;
use wayfarer_domain::{Booking, BookingStatus, Principal, Role, Tour};

mod data_models;
mod diesel_schema;
mod error;
mod mutations;
mod queries;
mod sqlite;

#[cfg(test)]
mod tests;

pub use data_models::AccountData;
pub use error::PersistenceError;

use data_models::{NewAccountRow, NewBookingRow, NewTourRow, format_timestamp};

/// Atomic counter for generating unique in-memory database names.
///
/// This ensures deterministic test isolation by eliminating time-based
/// collisions. Each call to `new_in_memory()` receives a unique
/// sequential ID.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Persistence adapter for accounts, tours, and bookings.
pub struct SqlitePersistence {
    conn: SqliteConnection,
}

impl SqlitePersistence {
    /// Creates a new persistence adapter with an in-memory `SQLite` database.
    ///
    /// Each call receives a unique database instance via atomic counter,
    /// ensuring deterministic test isolation without time-based collisions.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let db_id: u64 = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let db_name: String = format!("memdb_test_{db_id}");
        let shared_memory_url: String = format!("file:{db_name}?mode=memory&cache=shared");

        let mut conn: SqliteConnection = sqlite::initialize_database(&shared_memory_url)?;
        sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    /// Creates a new persistence adapter with a file-based `SQLite` database.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to the `SQLite` database file
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str: &str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError("Invalid database path".to_string())
        })?;

        let mut conn: SqliteConnection = sqlite::initialize_database(path_str)?;
        sqlite::enable_wal_mode(&mut conn)?;
        sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    // ========================================================================
    // Accounts
    // ========================================================================

    /// Inserts an account and returns its assigned id.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails (including a duplicate email).
    pub fn insert_account(
        &mut self,
        name: &str,
        email: &str,
        role: Role,
        active: bool,
    ) -> Result<i64, PersistenceError> {
        let record: NewAccountRow = NewAccountRow {
            name: name.to_string(),
            email: email.to_string(),
            role: role.as_str().to_string(),
            is_active: i32::from(active),
            created_at: format_timestamp(OffsetDateTime::now_utc())?,
        };
        let account_id: i64 = mutations::accounts::insert_account(&mut self.conn, &record)?;
        info!(account_id, role = role.as_str(), "Inserted account");
        Ok(account_id)
    }

    /// Looks up an active account by id and returns it as a principal.
    ///
    /// Inactive and unknown accounts both resolve to `None`; the
    /// authentication layer treats them identically.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or the stored row is corrupt.
    pub fn find_active_principal(
        &mut self,
        account_id: i64,
    ) -> Result<Option<Principal>, PersistenceError> {
        queries::accounts::find_active_account_by_id(&mut self.conn, account_id)?
            .map(|row| AccountData::try_from(row).map(|data| data.to_principal()))
            .transpose()
    }

    /// Looks up an account by id, regardless of active status.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or the stored row is corrupt.
    pub fn find_account(
        &mut self,
        account_id: i64,
    ) -> Result<Option<AccountData>, PersistenceError> {
        queries::accounts::find_account_by_id(&mut self.conn, account_id)?
            .map(AccountData::try_from)
            .transpose()
    }

    /// Lists all accounts, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a stored row is corrupt.
    pub fn list_accounts(&mut self) -> Result<Vec<AccountData>, PersistenceError> {
        queries::accounts::list_accounts(&mut self.conn)?
            .into_iter()
            .map(AccountData::try_from)
            .collect()
    }

    /// Updates an account's role. Returns the number of affected rows.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    pub fn update_account_role(
        &mut self,
        account_id: i64,
        role: Role,
    ) -> Result<usize, PersistenceError> {
        let affected: usize =
            mutations::accounts::update_account_role(&mut self.conn, account_id, role.as_str())?;
        debug!(account_id, role = role.as_str(), affected, "Updated account role");
        Ok(affected)
    }

    /// Updates an account's active flag. Returns the number of affected rows.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    pub fn update_account_active(
        &mut self,
        account_id: i64,
        active: bool,
    ) -> Result<usize, PersistenceError> {
        let affected: usize =
            mutations::accounts::update_account_active(&mut self.conn, account_id, active)?;
        debug!(account_id, active, affected, "Updated account active flag");
        Ok(affected)
    }

    // ========================================================================
    // Tours
    // ========================================================================

    /// Inserts a tour and returns its assigned id.
    ///
    /// This exists for seeding and tests; tour content management is a
    /// different subsystem.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn insert_tour(&mut self, title: &str, price: Decimal) -> Result<i64, PersistenceError> {
        let record: NewTourRow = NewTourRow {
            title: title.to_string(),
            price: price.to_string(),
            created_at: format_timestamp(OffsetDateTime::now_utc())?,
        };
        let tour_id: i64 = mutations::tours::insert_tour(&mut self.conn, &record)?;
        info!(tour_id, "Inserted tour");
        Ok(tour_id)
    }

    /// Looks up a tour by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or the stored row is corrupt.
    pub fn find_tour(&mut self, tour_id: i64) -> Result<Option<Tour>, PersistenceError> {
        queries::tours::find_tour_by_id(&mut self.conn, tour_id)?
            .map(Tour::try_from)
            .transpose()
    }

    // ========================================================================
    // Bookings
    // ========================================================================

    /// Persists a booking draft and returns the stored booking.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn create_booking(&mut self, draft: &BookingDraft) -> Result<Booking, PersistenceError> {
        let record: NewBookingRow = NewBookingRow::from_draft(draft)?;
        let booking_id: i64 = mutations::bookings::insert_booking(&mut self.conn, &record)?;
        info!(
            booking_id,
            tour_id = draft.tour_id,
            owner = draft.owner.kind(),
            "Created booking"
        );

        Ok(Booking {
            id: booking_id,
            tour_id: draft.tour_id,
            owner: draft.owner.clone(),
            people: draft.people,
            total: draft.total,
            date: draft.date,
            notes: draft.notes.clone(),
            status: draft.status,
            created_at: draft.created_at,
        })
    }

    /// Looks up a booking by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or the stored row is corrupt.
    pub fn find_booking(&mut self, booking_id: i64) -> Result<Option<Booking>, PersistenceError> {
        queries::bookings::find_booking_by_id(&mut self.conn, booking_id)?
            .map(Booking::try_from)
            .transpose()
    }

    /// Updates a booking's status. Returns the number of affected rows.
    ///
    /// The caller is responsible for having validated the transition; this
    /// method only writes the new status.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    pub fn update_booking_status(
        &mut self,
        booking_id: i64,
        status: BookingStatus,
    ) -> Result<usize, PersistenceError> {
        let affected: usize = mutations::bookings::update_booking_status(
            &mut self.conn,
            booking_id,
            status.as_str(),
        )?;
        info!(booking_id, status = status.as_str(), affected, "Updated booking status");
        Ok(affected)
    }

    /// Lists all bookings, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a stored row is corrupt.
    pub fn list_bookings(&mut self) -> Result<Vec<Booking>, PersistenceError> {
        queries::bookings::list_bookings(&mut self.conn)?
            .into_iter()
            .map(Booking::try_from)
            .collect()
    }

    /// Lists all bookings owned by an account, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a stored row is corrupt.
    pub fn list_bookings_by_account(
        &mut self,
        account_id: i64,
    ) -> Result<Vec<Booking>, PersistenceError> {
        queries::bookings::list_bookings_by_account(&mut self.conn, account_id)?
            .into_iter()
            .map(Booking::try_from)
            .collect()
    }

    /// Lists all bookings for a tour, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a stored row is corrupt.
    pub fn list_bookings_by_tour(
        &mut self,
        tour_id: i64,
    ) -> Result<Vec<Booking>, PersistenceError> {
        queries::bookings::list_bookings_by_tour(&mut self.conn, tour_id)?
            .into_iter()
            .map(Booking::try_from)
            .collect()
    }

    /// Lists guest-owned bookings with an exact email match, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a stored row is corrupt.
    pub fn find_bookings_by_guest_email(
        &mut self,
        email: &str,
    ) -> Result<Vec<Booking>, PersistenceError> {
        queries::bookings::find_bookings_by_guest_email(&mut self.conn, email)?
            .into_iter()
            .map(Booking::try_from)
            .collect()
    }

    /// Re-owns all guest bookings matching an email to an account.
    ///
    /// One UPDATE statement sets the account link and clears the guest
    /// contact columns together; only rows still in guest state match, so
    /// retrying after a partial failure touches nothing twice. Returns
    /// the number of migrated bookings.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    pub fn bulk_reown_by_guest_email(
        &mut self,
        email: &str,
        target_account_id: i64,
    ) -> Result<usize, PersistenceError> {
        let migrated: usize = mutations::bookings::bulk_reown_by_guest_email(
            &mut self.conn,
            email,
            target_account_id,
        )?;
        info!(target_account_id, migrated, "Re-owned guest bookings to account");
        Ok(migrated)
    }
}
