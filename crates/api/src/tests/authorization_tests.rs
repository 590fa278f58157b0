// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Authorization tests for booking reads.
//!
//! Tests that admin-only and owner-or-admin endpoints reject callers
//! without the required role or ownership.

use time::{Duration, OffsetDateTime};
use wayfarer_domain::{Principal, Role};
use wayfarer_persistence::SqlitePersistence;

use crate::{
    ApiError, BookingInfo, CredentialVerifier, create_booking, get_booking, list_bookings,
    list_bookings_for_account, list_bookings_for_tour, list_my_bookings,
};

use super::helpers::{
    account_booking_request, create_test_verifier, guest_booking_request, seed_admin, seed_tour,
    seed_user, setup_test_persistence, test_now,
};

struct Fixture {
    persistence: SqlitePersistence,
    tour_id: i64,
    admin: Principal,
    owner: Principal,
    other: Principal,
    account_booking_id: i64,
    guest_booking_id: i64,
}

/// One tour, three accounts, one account-owned and one guest-owned booking.
fn setup_fixture() -> Fixture {
    let mut persistence: SqlitePersistence = setup_test_persistence();
    let verifier: CredentialVerifier = create_test_verifier();
    let tour_id: i64 = seed_tour(&mut persistence);
    let now: OffsetDateTime = test_now();

    let admin_id: i64 = seed_admin(&mut persistence);
    let owner_id: i64 = seed_user(&mut persistence, "Astrid Berg", "astrid@example.com");
    let other_id: i64 = seed_user(&mut persistence, "Bodil Holm", "bodil@example.com");

    let owner_credential: String = verifier.issue(owner_id).unwrap();
    let account_booking_id: i64 = create_booking(
        &mut persistence,
        &verifier,
        Some(&owner_credential),
        &account_booking_request(tour_id, now, Duration::days(7)),
        now,
    )
    .unwrap()
    .booking
    .id;

    let guest_booking_id: i64 = create_booking(
        &mut persistence,
        &verifier,
        None,
        &guest_booking_request(tour_id, "g@x.com", now, Duration::days(7)),
        now,
    )
    .unwrap()
    .booking
    .id;

    Fixture {
        persistence,
        tour_id,
        admin: Principal::new(admin_id, Role::Admin, true),
        owner: Principal::new(owner_id, Role::User, true),
        other: Principal::new(other_id, Role::User, true),
        account_booking_id,
        guest_booking_id,
    }
}

#[test]
fn test_list_bookings_rejects_non_admin() {
    let mut fixture: Fixture = setup_fixture();

    let result = list_bookings(&mut fixture.persistence, &fixture.owner);
    assert!(matches!(result, Err(ApiError::Forbidden { .. })));
}

#[test]
fn test_list_bookings_annotates_owner_kinds_for_admin() {
    let mut fixture: Fixture = setup_fixture();

    let response = list_bookings(&mut fixture.persistence, &fixture.admin).unwrap();
    assert_eq!(response.bookings.len(), 2);

    let account_row: &BookingInfo = response
        .bookings
        .iter()
        .find(|b| b.id == fixture.account_booking_id)
        .unwrap();
    assert_eq!(account_row.booking_type, "authenticated");
    assert_eq!(
        account_row.customer_email.as_deref(),
        Some("astrid@example.com")
    );

    let guest_row: &BookingInfo = response
        .bookings
        .iter()
        .find(|b| b.id == fixture.guest_booking_id)
        .unwrap();
    assert_eq!(guest_row.booking_type, "guest");
    assert_eq!(guest_row.customer_email.as_deref(), Some("g@x.com"));
}

#[test]
fn test_get_booking_allows_owner_and_admin() {
    let mut fixture: Fixture = setup_fixture();

    let as_owner = get_booking(
        &mut fixture.persistence,
        &fixture.owner,
        fixture.account_booking_id,
    )
    .unwrap();
    assert_eq!(as_owner.id, fixture.account_booking_id);

    let as_admin = get_booking(
        &mut fixture.persistence,
        &fixture.admin,
        fixture.account_booking_id,
    )
    .unwrap();
    assert_eq!(as_admin.id, fixture.account_booking_id);
}

#[test]
fn test_get_booking_rejects_other_user() {
    let mut fixture: Fixture = setup_fixture();

    let result = get_booking(
        &mut fixture.persistence,
        &fixture.other,
        fixture.account_booking_id,
    );
    assert!(matches!(result, Err(ApiError::Forbidden { .. })));
}

#[test]
fn test_guest_owned_booking_is_admin_only() {
    let mut fixture: Fixture = setup_fixture();

    let result = get_booking(
        &mut fixture.persistence,
        &fixture.owner,
        fixture.guest_booking_id,
    );
    assert!(matches!(result, Err(ApiError::Forbidden { .. })));

    let as_admin = get_booking(
        &mut fixture.persistence,
        &fixture.admin,
        fixture.guest_booking_id,
    )
    .unwrap();
    assert_eq!(as_admin.booking_type, "guest");
}

#[test]
fn test_get_unknown_booking_is_not_found() {
    let mut fixture: Fixture = setup_fixture();

    let result = get_booking(&mut fixture.persistence, &fixture.admin, 9999);
    assert!(matches!(result, Err(ApiError::ResourceNotFound { .. })));
}

#[test]
fn test_list_bookings_for_account_allows_owner_and_admin() {
    let mut fixture: Fixture = setup_fixture();
    let owner_id: i64 = fixture.owner.id;

    let as_owner =
        list_bookings_for_account(&mut fixture.persistence, &fixture.owner, owner_id).unwrap();
    assert_eq!(as_owner.bookings.len(), 1);

    let as_admin =
        list_bookings_for_account(&mut fixture.persistence, &fixture.admin, owner_id).unwrap();
    assert_eq!(as_admin.bookings.len(), 1);
}

#[test]
fn test_list_bookings_for_account_rejects_other_user() {
    let mut fixture: Fixture = setup_fixture();
    let owner_id: i64 = fixture.owner.id;

    let result =
        list_bookings_for_account(&mut fixture.persistence, &fixture.other, owner_id);
    assert!(matches!(result, Err(ApiError::Forbidden { .. })));
}

#[test]
fn test_list_my_bookings_returns_only_own_bookings() {
    let mut fixture: Fixture = setup_fixture();

    let mine = list_my_bookings(&mut fixture.persistence, &fixture.owner).unwrap();
    assert_eq!(mine.bookings.len(), 1);
    assert_eq!(mine.bookings[0].id, fixture.account_booking_id);

    let none = list_my_bookings(&mut fixture.persistence, &fixture.other).unwrap();
    assert!(none.bookings.is_empty());
}

#[test]
fn test_list_bookings_for_tour_is_admin_only() {
    let mut fixture: Fixture = setup_fixture();
    let tour_id: i64 = fixture.tour_id;

    let result = list_bookings_for_tour(&mut fixture.persistence, &fixture.owner, tour_id);
    assert!(matches!(result, Err(ApiError::Forbidden { .. })));

    let as_admin =
        list_bookings_for_tour(&mut fixture.persistence, &fixture.admin, tour_id).unwrap();
    assert_eq!(as_admin.bookings.len(), 2);
}
