// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Booking identity resolution tests.

use wayfarer_domain::BookingOwner;
use wayfarer_persistence::SqlitePersistence;

use crate::{ApiError, BookingIdentityResolver, CredentialVerifier, GuestFields};

use super::helpers::{create_test_verifier, seed_user, setup_test_persistence};

fn complete_guest_fields() -> GuestFields {
    GuestFields {
        name: Some(String::from("Greta Vist")),
        email: Some(String::from("g@x.com")),
        phone: Some(String::from("+4712345678")),
    }
}

#[test]
fn test_valid_credential_resolves_to_account() {
    let mut persistence: SqlitePersistence = setup_test_persistence();
    let verifier: CredentialVerifier = create_test_verifier();
    let account_id: i64 = seed_user(&mut persistence, "Astrid Berg", "astrid@example.com");
    let credential: String = verifier.issue(account_id).unwrap();

    let owner: BookingOwner = BookingIdentityResolver::resolve(
        &mut persistence,
        &verifier,
        Some(&credential),
        &GuestFields::default(),
    )
    .unwrap();

    assert_eq!(owner.account_id(), Some(account_id));
}

#[test]
fn test_guest_fields_are_ignored_when_credential_resolves() {
    let mut persistence: SqlitePersistence = setup_test_persistence();
    let verifier: CredentialVerifier = create_test_verifier();
    let account_id: i64 = seed_user(&mut persistence, "Astrid Berg", "astrid@example.com");
    let credential: String = verifier.issue(account_id).unwrap();

    let owner: BookingOwner = BookingIdentityResolver::resolve(
        &mut persistence,
        &verifier,
        Some(&credential),
        &complete_guest_fields(),
    )
    .unwrap();

    assert_eq!(owner.account_id(), Some(account_id));
    assert!(owner.guest().is_none());
}

#[test]
fn test_anonymous_caller_with_complete_contact_resolves_to_guest() {
    let mut persistence: SqlitePersistence = setup_test_persistence();
    let verifier: CredentialVerifier = create_test_verifier();

    let owner: BookingOwner = BookingIdentityResolver::resolve(
        &mut persistence,
        &verifier,
        None,
        &complete_guest_fields(),
    )
    .unwrap();

    let contact = owner.guest().expect("Owner should be a guest");
    assert_eq!(contact.name, "Greta Vist");
    assert_eq!(contact.email.value(), "g@x.com");
    assert_eq!(contact.phone.as_deref(), Some("+4712345678"));
}

#[test]
fn test_invalid_credential_degrades_to_guest() {
    let mut persistence: SqlitePersistence = setup_test_persistence();
    let verifier: CredentialVerifier = create_test_verifier();

    let owner: BookingOwner = BookingIdentityResolver::resolve(
        &mut persistence,
        &verifier,
        Some("stale-token"),
        &complete_guest_fields(),
    )
    .unwrap();

    assert!(owner.is_guest());
}

#[test]
fn test_anonymous_caller_without_email_is_rejected() {
    let mut persistence: SqlitePersistence = setup_test_persistence();
    let verifier: CredentialVerifier = create_test_verifier();

    let fields: GuestFields = GuestFields {
        name: Some(String::from("Greta Vist")),
        email: None,
        phone: None,
    };

    let result =
        BookingIdentityResolver::resolve(&mut persistence, &verifier, None, &fields);
    assert!(matches!(
        result,
        Err(ApiError::InvalidInput { ref field, .. }) if field == "guest_contact"
    ));
}

#[test]
fn test_anonymous_caller_without_name_is_rejected() {
    let mut persistence: SqlitePersistence = setup_test_persistence();
    let verifier: CredentialVerifier = create_test_verifier();

    let fields: GuestFields = GuestFields {
        name: None,
        email: Some(String::from("g@x.com")),
        phone: None,
    };

    let result =
        BookingIdentityResolver::resolve(&mut persistence, &verifier, None, &fields);
    assert!(matches!(result, Err(ApiError::InvalidInput { .. })));
}

#[test]
fn test_anonymous_caller_with_malformed_email_is_rejected() {
    let mut persistence: SqlitePersistence = setup_test_persistence();
    let verifier: CredentialVerifier = create_test_verifier();

    let fields: GuestFields = GuestFields {
        name: Some(String::from("Greta Vist")),
        email: Some(String::from("not-an-email")),
        phone: None,
    };

    let result =
        BookingIdentityResolver::resolve(&mut persistence, &verifier, None, &fields);
    assert!(matches!(
        result,
        Err(ApiError::InvalidInput { ref field, .. }) if field == "email"
    ));
}
