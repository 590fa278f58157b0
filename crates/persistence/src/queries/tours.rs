// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tour query operations.
//!
//! Tours are read-only from the booking engine's perspective; content
//! management lives in a different subsystem.

use diesel::prelude::*;
use diesel::SqliteConnection;

use crate::data_models::TourRow;
use crate::diesel_schema::tours;
use crate::error::PersistenceError;

/// Query a tour by id.
pub fn find_tour_by_id(
    conn: &mut SqliteConnection,
    tour_id: i64,
) -> Result<Option<TourRow>, PersistenceError> {
    tours::table
        .filter(tours::tour_id.eq(tour_id))
        .first::<TourRow>(conn)
        .optional()
        .map_err(|e| PersistenceError::QueryFailed(format!("find_tour_by_id: {e}")))
}
