// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use thiserror::Error;
use wayfarer_core::CoreError;
use wayfarer_domain::DomainError;
use wayfarer_persistence::PersistenceError;

/// Authentication errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuthError {
    /// A credential failed verification.
    ///
    /// This is deliberately a single kind: a malformed token, a bad
    /// signature, and an expired token are indistinguishable to the
    /// caller.
    #[error("Invalid or expired credential")]
    InvalidCredential,

    /// A mandatory-identity operation was attempted without a usable
    /// credential.
    #[error("Authentication required: {reason}")]
    AuthenticationRequired {
        /// Why authentication was refused.
        reason: String,
    },
}

/// API-level errors.
///
/// These are distinct from domain/core errors and represent the API
/// contract. The server maps each variant to an HTTP status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The operation requires a known, active principal.
    AuthenticationRequired {
        /// Why authentication was refused.
        reason: String,
    },
    /// The requester is not permitted to perform the operation.
    Forbidden {
        /// Why the request was denied.
        reason: String,
    },
    /// Invalid input was provided.
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// A requested resource was not found.
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// The cancellation-notice policy was breached.
    PolicyViolation {
        /// A human-readable description of the violation.
        message: String,
    },
    /// An internal error occurred. The message is logged by the server
    /// and never shown verbatim to the caller.
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthenticationRequired { reason } => {
                write!(f, "Authentication required: {reason}")
            }
            Self::Forbidden { reason } => write!(f, "Forbidden: {reason}"),
            Self::InvalidInput { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::ResourceNotFound {
                resource_type,
                message,
            } => {
                write!(f, "{resource_type} not found: {message}")
            }
            Self::PolicyViolation { message } => write!(f, "Policy violation: {message}"),
            Self::Internal { message } => write!(f, "Internal error: {message}"),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidCredential => Self::AuthenticationRequired {
                reason: String::from("Invalid or expired credential"),
            },
            AuthError::AuthenticationRequired { reason } => {
                Self::AuthenticationRequired { reason }
            }
        }
    }
}

impl From<PersistenceError> for ApiError {
    fn from(err: PersistenceError) -> Self {
        Self::Internal {
            message: format!("Persistence failure: {err}"),
        }
    }
}

/// Translates a domain error into an API error.
///
/// This translation is explicit and ensures domain errors are not leaked
/// directly.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    match err {
        DomainError::InvalidEmail(msg) => ApiError::InvalidInput {
            field: String::from("email"),
            message: msg,
        },
        DomainError::InvalidGuestContact(msg) => ApiError::InvalidInput {
            field: String::from("guest_contact"),
            message: msg,
        },
        DomainError::InvalidPeopleCount { count } => ApiError::InvalidInput {
            field: String::from("people"),
            message: format!("Number of people must be at least 1, got {count}"),
        },
        DomainError::BookingDateNotInFuture { .. } => ApiError::InvalidInput {
            field: String::from("date"),
            message: String::from("Booking date must be in the future"),
        },
        DomainError::InvalidPrice { price } => ApiError::InvalidInput {
            field: String::from("price"),
            message: format!("Price must be greater than 0, got {price}"),
        },
        DomainError::InvalidStatusTransition { from, to, reason } => ApiError::InvalidInput {
            field: String::from("status"),
            message: format!("Cannot transition booking from {from} to {to}: {reason}"),
        },
        DomainError::InvalidBookingStatus { status } => ApiError::Internal {
            message: format!("Stored booking status is unknown: {status}"),
        },
        DomainError::InvalidRole(role) => ApiError::InvalidInput {
            field: String::from("role"),
            message: format!("Invalid role: {role}. Must be USER or ADMIN"),
        },
    }
}

/// Translates a core error into an API error.
///
/// This translation is explicit and ensures core errors are not leaked
/// directly.
#[must_use]
pub fn translate_core_error(err: CoreError) -> ApiError {
    match err {
        CoreError::DomainViolation(domain_err) => translate_domain_error(domain_err),
        CoreError::NotPermitted => ApiError::Forbidden {
            reason: String::from("Access denied"),
        },
        CoreError::GuestEmailRequired => ApiError::InvalidInput {
            field: String::from("guest_email"),
            message: String::from("Email is required to cancel guest bookings"),
        },
        CoreError::GuestEmailMismatch => ApiError::Forbidden {
            reason: String::from("Email does not match the booking record"),
        },
        CoreError::CancellationNoticeBreached { .. } => ApiError::PolicyViolation {
            message: String::from(
                "Bookings can only be cancelled at least 24 hours before the tour date",
            ),
        },
    }
}
