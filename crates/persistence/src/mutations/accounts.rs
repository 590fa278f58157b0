// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Account mutation operations.

use diesel::prelude::*;
use diesel::SqliteConnection;

use crate::data_models::NewAccountRow;
use crate::diesel_schema::accounts;
use crate::error::PersistenceError;
use crate::sqlite;

/// Insert an account and return its assigned id.
pub fn insert_account(
    conn: &mut SqliteConnection,
    record: &NewAccountRow,
) -> Result<i64, PersistenceError> {
    diesel::insert_into(accounts::table)
        .values(record)
        .execute(conn)?;
    sqlite::get_last_insert_rowid(conn)
}

/// Update an account's role. Returns the number of affected rows.
pub fn update_account_role(
    conn: &mut SqliteConnection,
    account_id: i64,
    role: &str,
) -> Result<usize, PersistenceError> {
    diesel::update(accounts::table.filter(accounts::account_id.eq(account_id)))
        .set(accounts::role.eq(role))
        .execute(conn)
        .map_err(Into::into)
}

/// Update an account's active flag. Returns the number of affected rows.
pub fn update_account_active(
    conn: &mut SqliteConnection,
    account_id: i64,
    is_active: bool,
) -> Result<usize, PersistenceError> {
    diesel::update(accounts::table.filter(accounts::account_id.eq(account_id)))
        .set(accounts::is_active.eq(i32::from(is_active)))
        .execute(conn)
        .map_err(Into::into)
}
