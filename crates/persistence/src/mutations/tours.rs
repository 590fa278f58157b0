// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tour mutation operations.
//!
//! Only insertion is provided; it exists for seeding and tests. Tour
//! content management is a different subsystem.

use diesel::prelude::*;
use diesel::SqliteConnection;

use crate::data_models::NewTourRow;
use crate::diesel_schema::tours;
use crate::error::PersistenceError;
use crate::sqlite;

/// Insert a tour and return its assigned id.
pub fn insert_tour(
    conn: &mut SqliteConnection,
    record: &NewTourRow,
) -> Result<i64, PersistenceError> {
    diesel::insert_into(tours::table)
        .values(record)
        .execute(conn)?;
    sqlite::get_last_insert_rowid(conn)
}
