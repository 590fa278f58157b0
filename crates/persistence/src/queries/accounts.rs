// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Account query operations.

use diesel::prelude::*;
use diesel::SqliteConnection;

use crate::data_models::AccountRow;
use crate::diesel_schema::accounts;
use crate::error::PersistenceError;

/// Query an account by id, regardless of active status.
pub fn find_account_by_id(
    conn: &mut SqliteConnection,
    account_id: i64,
) -> Result<Option<AccountRow>, PersistenceError> {
    accounts::table
        .filter(accounts::account_id.eq(account_id))
        .first::<AccountRow>(conn)
        .optional()
        .map_err(|e| PersistenceError::QueryFailed(format!("find_account_by_id: {e}")))
}

/// Query an active account by id.
///
/// Inactive accounts are filtered out here so that principal resolution
/// treats them identically to an unknown id.
pub fn find_active_account_by_id(
    conn: &mut SqliteConnection,
    account_id: i64,
) -> Result<Option<AccountRow>, PersistenceError> {
    accounts::table
        .filter(accounts::account_id.eq(account_id))
        .filter(accounts::is_active.eq(1))
        .first::<AccountRow>(conn)
        .optional()
        .map_err(|e| PersistenceError::QueryFailed(format!("find_active_account_by_id: {e}")))
}

/// Query all accounts, newest first.
pub fn list_accounts(conn: &mut SqliteConnection) -> Result<Vec<AccountRow>, PersistenceError> {
    accounts::table
        .order((accounts::created_at.desc(), accounts::account_id.desc()))
        .load::<AccountRow>(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("list_accounts: {e}")))
}
