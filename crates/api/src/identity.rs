// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Booking identity resolution.
//!
//! Booking creation accepts two kinds of acting party: an authenticated
//! account, or an anonymous guest identified by contact fields. This is
//! the single place where that branch happens; everything downstream
//! consumes the resolved `BookingOwner` and never sees raw credentials.

use wayfarer_domain::{BookingOwner, Email, GuestContact};
use wayfarer_persistence::SqlitePersistence;

use crate::auth::{CredentialVerifier, PrincipalResolver};
use crate::error::{ApiError, translate_domain_error};

/// Guest contact fields as supplied by a booking request.
///
/// All fields are optional at this level; which are required depends on
/// whether a principal resolves.
#[derive(Debug, Clone, Default)]
pub struct GuestFields {
    /// The guest's name.
    pub name: Option<String>,
    /// The guest's email address.
    pub email: Option<String>,
    /// Optional phone number.
    pub phone: Option<String>,
}

/// Resolves the acting party of a booking request.
pub struct BookingIdentityResolver;

impl BookingIdentityResolver {
    /// Resolves the acting identity from an optional credential and
    /// optional guest fields.
    ///
    /// If the credential resolves to a principal (optional mode, so an
    /// invalid or stale token degrades to anonymous), the identity is the
    /// principal's account and any supplied guest fields are ignored.
    /// Otherwise the identity is a guest, which requires a name and a
    /// well-formed email.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::InvalidInput` when guest contact details are
    /// required but missing or malformed.
    pub fn resolve(
        persistence: &mut SqlitePersistence,
        verifier: &CredentialVerifier,
        credential: Option<&str>,
        guest: &GuestFields,
    ) -> Result<BookingOwner, ApiError> {
        if let Some(principal) =
            PrincipalResolver::resolve_optional(persistence, verifier, credential)?
        {
            return Ok(BookingOwner::Account {
                account_id: principal.id,
            });
        }

        let (Some(name), Some(email)) = (&guest.name, &guest.email) else {
            return Err(ApiError::InvalidInput {
                field: String::from("guest_contact"),
                message: String::from("For guest bookings, name and email are required"),
            });
        };

        let email: Email = Email::parse(email).map_err(translate_domain_error)?;
        let contact: GuestContact =
            GuestContact::new(name, email, guest.phone.clone()).map_err(translate_domain_error)?;

        Ok(BookingOwner::Guest(contact))
    }
}
