// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Credential verification, principal resolution, and authorization.
//!
//! A credential is an opaque HMAC-signed bearer token carrying the
//! account id and an expiry. The signing secret is process-wide
//! configuration loaded once at startup; rotating it invalidates every
//! outstanding credential.
//!
//! Resolution comes in two modes. Booking creation and cancellation are
//! valid for guests, so an absent or invalid credential there degrades
//! silently to anonymous treatment (*optional* mode). Endpoints that only
//! make sense for a known account refuse the request instead (*required*
//! mode).

use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use time::{Duration, OffsetDateTime};
use tracing::debug;
use wayfarer_domain::{Principal, Role};
use wayfarer_persistence::SqlitePersistence;

use crate::error::{ApiError, AuthError};

/// How long an issued credential stays valid.
pub const CREDENTIAL_VALIDITY: Duration = Duration::days(30);

/// Claims carried inside a credential.
#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    /// The account id the credential was issued to.
    sub: i64,
    /// Issued-at, seconds since the epoch.
    iat: i64,
    /// Expiry, seconds since the epoch.
    exp: i64,
}

/// Verifies and issues bearer credentials.
///
/// Stateless: verification touches no storage and has no side effects.
pub struct CredentialVerifier {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl CredentialVerifier {
    /// Creates a verifier from the process-wide secret.
    #[must_use]
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation: Validation::new(Algorithm::HS256),
        }
    }

    /// Issues a credential for an account with the default validity.
    ///
    /// Login and registration flows live outside this system; issuance
    /// here serves tests and operator tooling.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredential` if encoding fails.
    pub fn issue(&self, account_id: i64) -> Result<String, AuthError> {
        self.issue_with_validity(account_id, CREDENTIAL_VALIDITY)
    }

    /// Issues a credential with an explicit validity window.
    ///
    /// A non-positive validity produces an already-expired credential,
    /// which is how expiry handling is exercised under test.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredential` if encoding fails.
    pub fn issue_with_validity(
        &self,
        account_id: i64,
        validity: Duration,
    ) -> Result<String, AuthError> {
        let now: OffsetDateTime = OffsetDateTime::now_utc();
        let claims: Claims = Claims {
            sub: account_id,
            iat: now.unix_timestamp(),
            exp: (now + validity).unix_timestamp(),
        };
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|_| AuthError::InvalidCredential)
    }

    /// Verifies a credential and returns the account id claim.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredential` whether the credential is
    /// malformed, carries a bad signature, or is expired. The failure
    /// kinds are deliberately indistinguishable to the caller.
    pub fn verify(&self, credential: &str) -> Result<i64, AuthError> {
        decode::<Claims>(credential, &self.decoding_key, &self.validation)
            .map(|data| data.claims.sub)
            .map_err(|_| AuthError::InvalidCredential)
    }
}

/// Resolves a credential to a principal against the account store.
///
/// Principals are sourced fresh from the store on every call and never
/// cached: a deactivated account stops resolving immediately.
pub struct PrincipalResolver;

impl PrincipalResolver {
    /// Resolves a credential in optional mode.
    ///
    /// Absence of a credential is not an error. An invalid or expired
    /// credential, an unknown claim, and an inactive account all resolve
    /// to `None`, so the caller proceeds with anonymous/guest treatment
    /// rather than rejecting the request.
    ///
    /// # Errors
    ///
    /// Returns an error only if the account store fails.
    pub fn resolve_optional(
        persistence: &mut SqlitePersistence,
        verifier: &CredentialVerifier,
        credential: Option<&str>,
    ) -> Result<Option<Principal>, ApiError> {
        let Some(credential) = credential else {
            return Ok(None);
        };

        let Ok(claim_id) = verifier.verify(credential) else {
            debug!("Credential failed verification, treating caller as anonymous");
            return Ok(None);
        };

        Ok(persistence.find_active_principal(claim_id)?)
    }

    /// Resolves a credential in required mode.
    ///
    /// Every failure surfaces as `AuthenticationRequired`: a missing
    /// credential, a failed verification, an unknown claim, or an
    /// inactive account.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::AuthenticationRequired` on any resolution
    /// failure, or an internal error if the account store fails.
    pub fn resolve_required(
        persistence: &mut SqlitePersistence,
        verifier: &CredentialVerifier,
        credential: Option<&str>,
    ) -> Result<Principal, ApiError> {
        let Some(credential) = credential else {
            return Err(ApiError::AuthenticationRequired {
                reason: String::from("Access token required"),
            });
        };

        let claim_id: i64 =
            verifier
                .verify(credential)
                .map_err(|_| ApiError::AuthenticationRequired {
                    reason: String::from("Invalid or expired token"),
                })?;

        persistence
            .find_active_principal(claim_id)?
            .ok_or_else(|| ApiError::AuthenticationRequired {
                reason: String::from("Invalid or inactive user"),
            })
    }
}

/// Authorization predicates over a principal and a resource's ownership.
///
/// Pure functions, no I/O.
pub struct AuthorizationPolicy;

impl AuthorizationPolicy {
    /// Returns true if the principal holds the Admin role.
    #[must_use]
    pub fn is_admin(principal: &Principal) -> bool {
        principal.role == Role::Admin
    }

    /// Returns true if the principal is an admin or owns the resource.
    #[must_use]
    pub fn is_owner_or_admin(principal: &Principal, resource_owner_id: i64) -> bool {
        Self::is_admin(principal) || principal.id == resource_owner_id
    }

    /// Requires the Admin role.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Forbidden` if the principal is not an admin.
    pub fn require_admin(principal: &Principal) -> Result<(), ApiError> {
        if Self::is_admin(principal) {
            Ok(())
        } else {
            Err(ApiError::Forbidden {
                reason: String::from("Admin access required"),
            })
        }
    }

    /// Requires the Admin role or ownership of the resource.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Forbidden` if the principal neither owns the
    /// resource nor holds the Admin role.
    pub fn require_owner_or_admin(
        principal: &Principal,
        resource_owner_id: i64,
    ) -> Result<(), ApiError> {
        if Self::is_owner_or_admin(principal, resource_owner_id) {
            Ok(())
        } else {
            Err(ApiError::Forbidden {
                reason: String::from(
                    "Access denied. You can only access your own resources.",
                ),
            })
        }
    }
}
