// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use rust_decimal::Decimal;
use time::{Duration, OffsetDateTime};
use wayfarer_domain::Role;
use wayfarer_persistence::SqlitePersistence;

use crate::{CreateBookingRequest, CredentialVerifier};

pub const TEST_SECRET: &[u8] = b"wayfarer-test-secret";

pub fn setup_test_persistence() -> SqlitePersistence {
    SqlitePersistence::new_in_memory().expect("Failed to create in-memory persistence")
}

pub fn create_test_verifier() -> CredentialVerifier {
    CredentialVerifier::new(TEST_SECRET)
}

/// A decision instant truncated to whole seconds so stored timestamps
/// round-trip exactly.
pub fn test_now() -> OffsetDateTime {
    OffsetDateTime::now_utc().replace_nanosecond(0).unwrap()
}

pub fn seed_tour(persistence: &mut SqlitePersistence) -> i64 {
    persistence
        .insert_tour("Fjord Hike", Decimal::from(250))
        .expect("Failed to seed tour")
}

pub fn seed_admin(persistence: &mut SqlitePersistence) -> i64 {
    persistence
        .insert_account("Astrid Admin", "admin@example.com", Role::Admin, true)
        .expect("Failed to seed admin account")
}

pub fn seed_user(persistence: &mut SqlitePersistence, name: &str, email: &str) -> i64 {
    persistence
        .insert_account(name, email, Role::User, true)
        .expect("Failed to seed user account")
}

/// A booking request with guest contact fields, dated `lead` from `now`.
pub fn guest_booking_request(
    tour_id: i64,
    email: &str,
    now: OffsetDateTime,
    lead: Duration,
) -> CreateBookingRequest {
    CreateBookingRequest {
        tour_id,
        people: 2,
        date: now + lead,
        notes: None,
        guest_name: Some(String::from("Greta Vist")),
        guest_email: Some(email.to_string()),
        guest_phone: None,
    }
}

/// A booking request with no guest fields, dated `lead` from `now`.
pub fn account_booking_request(
    tour_id: i64,
    now: OffsetDateTime,
    lead: Duration,
) -> CreateBookingRequest {
    CreateBookingRequest {
        tour_id,
        people: 2,
        date: now + lead,
        notes: None,
        guest_name: None,
        guest_email: None,
        guest_phone: None,
    }
}
