// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]


use rust_decimal::Decimal;
use time::{Duration, OffsetDateTime};
use wayfarer_core::{BookingDraft, build_booking};
use wayfarer_domain::{BookingOwner, Email, GuestContact, Tour};

use crate::SqlitePersistence;

pub fn setup_persistence() -> SqlitePersistence {
    SqlitePersistence::new_in_memory().expect("Failed to create in-memory persistence")
}

/// A creation instant truncated to whole seconds so stored timestamps
/// round-trip exactly.
pub fn test_now() -> OffsetDateTime {
    OffsetDateTime::now_utc().replace_nanosecond(0).unwrap()
}

pub fn create_test_guest_owner(email: &str) -> BookingOwner {
    BookingOwner::Guest(
        GuestContact::new("Greta Vist", Email::parse(email).unwrap(), None).unwrap(),
    )
}

/// Seeds a tour and returns it with its assigned id.
pub fn seed_tour(persistence: &mut SqlitePersistence) -> Tour {
    let tour_id: i64 = persistence
        .insert_tour("Fjord Hike", Decimal::from(250))
        .expect("Failed to insert tour");
    persistence
        .find_tour(tour_id)
        .expect("Failed to query tour")
        .expect("Tour not found after insert")
}

/// Builds a valid draft for the given tour and owner, dated two weeks out.
pub fn create_test_draft(tour: &Tour, owner: BookingOwner, now: OffsetDateTime) -> BookingDraft {
    build_booking(tour, owner, 2, now + Duration::days(14), None, now)
        .expect("Failed to build booking draft")
}
