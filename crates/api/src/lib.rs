// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API boundary layer for the Wayfarer booking backend.
//!
//! This crate owns credential verification, principal resolution,
//! authorization predicates, booking-identity resolution, and the handler
//! functions the server exposes. Handlers take the injected persistence
//! adapter plus an already-resolved auth context and return typed results;
//! HTTP concerns stay in the server crate.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]

mod auth;
mod error;
mod handlers;
mod identity;
mod request_response;

#[cfg(test)]
mod tests;

pub use auth::{
    AuthorizationPolicy, CREDENTIAL_VALIDITY, CredentialVerifier, PrincipalResolver,
};
pub use error::{ApiError, AuthError, translate_core_error, translate_domain_error};
pub use handlers::{
    cancel_booking, create_booking, get_account, get_booking, guest_lookup,
    link_guest_bookings, list_accounts, list_bookings, list_bookings_for_account,
    list_bookings_for_tour, list_my_bookings, update_account_role, update_account_status,
};
pub use identity::{BookingIdentityResolver, GuestFields};
pub use request_response::{
    AccountInfo, BookingInfo, CancelBookingRequest, CancelBookingResponse,
    CreateBookingRequest, CreateBookingResponse, GetAccountResponse, GuestLookupRequest,
    GuestLookupResponse, LinkGuestBookingsRequest, LinkGuestBookingsResponse,
    ListAccountsResponse, ListBookingsResponse, UpdateAccountRoleRequest,
    UpdateAccountRoleResponse, UpdateAccountStatusRequest, UpdateAccountStatusResponse,
};
