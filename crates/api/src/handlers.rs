// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API handler functions for booking and account operations.
//!
//! Handlers come in two authentication shapes. Operations that are valid
//! for guests (creation, cancellation, guest lookup) take the raw
//! optional credential and resolve it in optional mode themselves.
//! Operations that require a known account take an already-resolved
//! `Principal`; the server boundary performs that resolution in required
//! mode before calling in.

use std::str::FromStr;
use time::OffsetDateTime;
use tracing::info;
use wayfarer_core::{
    BookingDraft, CancellationReason, authorize_cancellation, build_booking,
};
use wayfarer_domain::{Booking, BookingOwner, BookingStatus, Email, Principal, Role, Tour};
use wayfarer_persistence::{AccountData, SqlitePersistence};

use crate::auth::{AuthorizationPolicy, CredentialVerifier, PrincipalResolver};
use crate::error::{ApiError, translate_core_error, translate_domain_error};
use crate::identity::{BookingIdentityResolver, GuestFields};
use crate::request_response::{
    AccountInfo, BookingInfo, CancelBookingRequest, CancelBookingResponse,
    CreateBookingRequest, CreateBookingResponse, GetAccountResponse, GuestLookupRequest,
    GuestLookupResponse, LinkGuestBookingsRequest, LinkGuestBookingsResponse,
    ListAccountsResponse, ListBookingsResponse, UpdateAccountRoleRequest,
    UpdateAccountRoleResponse, UpdateAccountStatusRequest, UpdateAccountStatusResponse,
};

/// Builds the API view of a booking, resolving the owning account's
/// contact details when the booking is account-owned.
fn booking_info(
    persistence: &mut SqlitePersistence,
    booking: &Booking,
) -> Result<BookingInfo, ApiError> {
    let account: Option<AccountData> = match booking.owner.account_id() {
        Some(account_id) => persistence.find_account(account_id)?,
        None => None,
    };
    Ok(BookingInfo::from_booking(booking, account.as_ref()))
}

/// Builds API views for a list of bookings.
fn booking_infos(
    persistence: &mut SqlitePersistence,
    bookings: &[Booking],
) -> Result<Vec<BookingInfo>, ApiError> {
    bookings
        .iter()
        .map(|booking| booking_info(persistence, booking))
        .collect()
}

fn booking_not_found(booking_id: i64) -> ApiError {
    ApiError::ResourceNotFound {
        resource_type: String::from("Booking"),
        message: format!("Booking {booking_id} does not exist"),
    }
}

fn account_not_found(account_id: i64) -> ApiError {
    ApiError::ResourceNotFound {
        resource_type: String::from("Account"),
        message: format!("Account {account_id} does not exist"),
    }
}

/// Creates a booking for an authenticated account or an anonymous guest.
///
/// This is a public operation: the credential is resolved in optional
/// mode, so a stale or invalid token degrades to guest treatment instead
/// of rejecting the request. The acting identity decides which contact
/// fields are required and which success message the caller receives.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `verifier` - The credential verifier
/// * `credential` - The bearer credential, if one accompanied the request
/// * `request` - The booking request
/// * `now` - The creation instant
///
/// # Errors
///
/// Returns an error if:
/// - Guest contact details are required but missing or malformed
/// - The tour does not exist
/// - The party size is below one or the date is not in the future
pub fn create_booking(
    persistence: &mut SqlitePersistence,
    verifier: &CredentialVerifier,
    credential: Option<&str>,
    request: &CreateBookingRequest,
    now: OffsetDateTime,
) -> Result<CreateBookingResponse, ApiError> {
    let guest_fields: GuestFields = GuestFields {
        name: request.guest_name.clone(),
        email: request.guest_email.clone(),
        phone: request.guest_phone.clone(),
    };
    let owner: BookingOwner =
        BookingIdentityResolver::resolve(persistence, verifier, credential, &guest_fields)?;

    let tour: Tour = persistence
        .find_tour(request.tour_id)?
        .ok_or_else(|| ApiError::ResourceNotFound {
            resource_type: String::from("Tour"),
            message: format!("Tour {} does not exist", request.tour_id),
        })?;

    let draft: BookingDraft = build_booking(
        &tour,
        owner,
        request.people,
        request.date,
        request.notes.clone(),
        now,
    )
    .map_err(translate_core_error)?;

    let booking: Booking = persistence.create_booking(&draft)?;
    info!(
        booking_id = booking.id,
        booking_type = booking.owner.kind(),
        "Booking created"
    );

    let message: String = if booking.owner.is_guest() {
        String::from("Guest booking created successfully. You will receive a confirmation email.")
    } else {
        String::from("Booking created successfully for your account")
    };

    let booking: BookingInfo = booking_info(persistence, &booking)?;
    Ok(CreateBookingResponse { message, booking })
}

/// Cancels a booking on behalf of an admin, the owning account, or a
/// guest proving ownership by email.
///
/// This is a public operation with optional credential resolution, since
/// guest bookings are cancellable without an account. Eligibility and the
/// cancellation-notice policy are decided by the lifecycle rules; on
/// success the booking transitions to cancelled and is retained.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `verifier` - The credential verifier
/// * `credential` - The bearer credential, if one accompanied the request
/// * `booking_id` - The booking to cancel
/// * `request` - The cancellation request
/// * `now` - The decision instant
///
/// # Errors
///
/// Returns an error if:
/// - The booking does not exist
/// - The requester is not eligible to cancel it
/// - The cancellation-notice requirement is breached (non-admin only)
/// - The booking is already cancelled
pub fn cancel_booking(
    persistence: &mut SqlitePersistence,
    verifier: &CredentialVerifier,
    credential: Option<&str>,
    booking_id: i64,
    request: &CancelBookingRequest,
    now: OffsetDateTime,
) -> Result<CancelBookingResponse, ApiError> {
    let booking: Booking = persistence
        .find_booking(booking_id)?
        .ok_or_else(|| booking_not_found(booking_id))?;

    let principal: Option<Principal> =
        PrincipalResolver::resolve_optional(persistence, verifier, credential)?;

    let reason: CancellationReason = authorize_cancellation(
        &booking,
        principal.as_ref(),
        request.guest_email.as_deref(),
        now,
    )
    .map_err(translate_core_error)?;

    persistence.update_booking_status(booking_id, BookingStatus::Cancelled)?;
    info!(booking_id, reason = reason.as_str(), "Booking cancelled");

    Ok(CancelBookingResponse {
        message: String::from("Booking cancelled successfully"),
        reason: reason.as_str().to_string(),
    })
}

/// Reads one booking.
///
/// Account-owned bookings are readable by their owner or an admin;
/// guest-owned bookings only by an admin (guests use the email lookup).
///
/// # Errors
///
/// Returns an error if the booking does not exist or the principal is
/// not permitted to read it.
pub fn get_booking(
    persistence: &mut SqlitePersistence,
    principal: &Principal,
    booking_id: i64,
) -> Result<BookingInfo, ApiError> {
    let booking: Booking = persistence
        .find_booking(booking_id)?
        .ok_or_else(|| booking_not_found(booking_id))?;

    match booking.owner.account_id() {
        Some(owner_id) => AuthorizationPolicy::require_owner_or_admin(principal, owner_id)?,
        None => AuthorizationPolicy::require_admin(principal)?,
    }

    booking_info(persistence, &booking)
}

/// Lists all bookings. Admin only.
///
/// Each booking is annotated with its booking-type discriminator and the
/// customer contact drawn from whichever owner variant is populated.
///
/// # Errors
///
/// Returns an error if the principal is not an admin.
pub fn list_bookings(
    persistence: &mut SqlitePersistence,
    principal: &Principal,
) -> Result<ListBookingsResponse, ApiError> {
    AuthorizationPolicy::require_admin(principal)?;

    let bookings: Vec<Booking> = persistence.list_bookings()?;
    let bookings: Vec<BookingInfo> = booking_infos(persistence, &bookings)?;
    Ok(ListBookingsResponse { bookings })
}

/// Lists the bookings owned by an account. Owner or admin only.
///
/// # Errors
///
/// Returns an error if the principal neither owns the account nor holds
/// the Admin role.
pub fn list_bookings_for_account(
    persistence: &mut SqlitePersistence,
    principal: &Principal,
    account_id: i64,
) -> Result<ListBookingsResponse, ApiError> {
    AuthorizationPolicy::require_owner_or_admin(principal, account_id)?;

    let bookings: Vec<Booking> = persistence.list_bookings_by_account(account_id)?;
    let bookings: Vec<BookingInfo> = booking_infos(persistence, &bookings)?;
    Ok(ListBookingsResponse { bookings })
}

/// Lists the caller's own bookings.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_my_bookings(
    persistence: &mut SqlitePersistence,
    principal: &Principal,
) -> Result<ListBookingsResponse, ApiError> {
    let bookings: Vec<Booking> = persistence.list_bookings_by_account(principal.id)?;
    let bookings: Vec<BookingInfo> = booking_infos(persistence, &bookings)?;
    Ok(ListBookingsResponse { bookings })
}

/// Lists all bookings for a tour. Admin only.
///
/// # Errors
///
/// Returns an error if the principal is not an admin.
pub fn list_bookings_for_tour(
    persistence: &mut SqlitePersistence,
    principal: &Principal,
    tour_id: i64,
) -> Result<ListBookingsResponse, ApiError> {
    AuthorizationPolicy::require_admin(principal)?;

    let bookings: Vec<Booking> = persistence.list_bookings_by_tour(tour_id)?;
    let bookings: Vec<BookingInfo> = booking_infos(persistence, &bookings)?;
    Ok(ListBookingsResponse { bookings })
}

/// Looks up guest bookings by email.
///
/// Public: presenting the email is the proof of ownership here, a weaker
/// authorization model than credential auth, accepted because the lookup
/// reveals only bookings made under that same email. Returns bookings of
/// any status, newest first.
///
/// # Errors
///
/// Returns an error if the email is malformed.
pub fn guest_lookup(
    persistence: &mut SqlitePersistence,
    request: &GuestLookupRequest,
) -> Result<GuestLookupResponse, ApiError> {
    let email: Email = Email::parse(&request.email).map_err(translate_domain_error)?;

    let bookings: Vec<Booking> = persistence.find_bookings_by_guest_email(email.value())?;
    let message: String = format!(
        "Found {} booking(s) for {}",
        bookings.len(),
        email.value()
    );

    let bookings: Vec<BookingInfo> = booking_infos(persistence, &bookings)?;
    Ok(GuestLookupResponse { message, bookings })
}

/// Links guest bookings to the caller's account.
///
/// Every guest booking matching the email is re-owned to the principal's
/// account, clearing the guest contact fields in the same update. The
/// operation is idempotent on retry: bookings already migrated no longer
/// match.
///
/// # Errors
///
/// Returns an error if the email is malformed or no guest bookings match
/// it.
pub fn link_guest_bookings(
    persistence: &mut SqlitePersistence,
    principal: &Principal,
    request: &LinkGuestBookingsRequest,
) -> Result<LinkGuestBookingsResponse, ApiError> {
    let email: Email = Email::parse(&request.guest_email).map_err(translate_domain_error)?;

    let matches: Vec<Booking> = persistence.find_bookings_by_guest_email(email.value())?;
    if matches.is_empty() {
        return Err(ApiError::ResourceNotFound {
            resource_type: String::from("Guest bookings"),
            message: String::from("No guest bookings found for this email address"),
        });
    }

    let linked: usize = persistence.bulk_reown_by_guest_email(email.value(), principal.id)?;
    info!(
        account_id = principal.id,
        linked, "Linked guest bookings to account"
    );

    Ok(LinkGuestBookingsResponse {
        message: format!("Successfully linked {linked} booking(s) to your account"),
        linked_bookings: linked,
    })
}

/// Lists all accounts. Admin only.
///
/// # Errors
///
/// Returns an error if the principal is not an admin.
pub fn list_accounts(
    persistence: &mut SqlitePersistence,
    principal: &Principal,
) -> Result<ListAccountsResponse, ApiError> {
    AuthorizationPolicy::require_admin(principal)?;

    let accounts: Vec<AccountInfo> = persistence
        .list_accounts()?
        .iter()
        .map(AccountInfo::from)
        .collect();
    Ok(ListAccountsResponse { accounts })
}

/// Reads one account with its bookings. Owner or admin only.
///
/// # Errors
///
/// Returns an error if the principal is not permitted or the account
/// does not exist.
pub fn get_account(
    persistence: &mut SqlitePersistence,
    principal: &Principal,
    account_id: i64,
) -> Result<GetAccountResponse, ApiError> {
    AuthorizationPolicy::require_owner_or_admin(principal, account_id)?;

    let account: AccountData = persistence
        .find_account(account_id)?
        .ok_or_else(|| account_not_found(account_id))?;

    let bookings: Vec<Booking> = persistence.list_bookings_by_account(account_id)?;
    let bookings: Vec<BookingInfo> = booking_infos(persistence, &bookings)?;

    Ok(GetAccountResponse {
        account: AccountInfo::from(&account),
        bookings,
    })
}

/// Changes an account's role. Admin only, with a self-demotion guard.
///
/// # Errors
///
/// Returns an error if:
/// - The principal is not an admin
/// - The role string is not `USER` or `ADMIN`
/// - The admin attempts to demote their own account
/// - The account does not exist
pub fn update_account_role(
    persistence: &mut SqlitePersistence,
    principal: &Principal,
    account_id: i64,
    request: &UpdateAccountRoleRequest,
) -> Result<UpdateAccountRoleResponse, ApiError> {
    AuthorizationPolicy::require_admin(principal)?;

    let role: Role = Role::from_str(&request.role).map_err(translate_domain_error)?;

    if account_id == principal.id && role == Role::User {
        return Err(ApiError::InvalidInput {
            field: String::from("role"),
            message: String::from("You cannot demote yourself"),
        });
    }

    let affected: usize = persistence.update_account_role(account_id, role)?;
    if affected == 0 {
        return Err(account_not_found(account_id));
    }

    let account: AccountData = persistence
        .find_account(account_id)?
        .ok_or_else(|| account_not_found(account_id))?;
    info!(account_id, role = role.as_str(), "Account role updated");

    Ok(UpdateAccountRoleResponse {
        message: String::from("User role updated successfully"),
        account: AccountInfo::from(&account),
    })
}

/// Changes an account's active status. Admin only, with a
/// self-deactivation guard.
///
/// Deactivation takes effect on the account's next request: principals
/// are resolved fresh every time, so no cached identity survives it.
///
/// # Errors
///
/// Returns an error if:
/// - The principal is not an admin
/// - The admin attempts to deactivate their own account
/// - The account does not exist
pub fn update_account_status(
    persistence: &mut SqlitePersistence,
    principal: &Principal,
    account_id: i64,
    request: &UpdateAccountStatusRequest,
) -> Result<UpdateAccountStatusResponse, ApiError> {
    AuthorizationPolicy::require_admin(principal)?;

    if account_id == principal.id && !request.active {
        return Err(ApiError::InvalidInput {
            field: String::from("active"),
            message: String::from("You cannot deactivate yourself"),
        });
    }

    let affected: usize = persistence.update_account_active(account_id, request.active)?;
    if affected == 0 {
        return Err(account_not_found(account_id));
    }

    let account: AccountData = persistence
        .find_account(account_id)?
        .ok_or_else(|| account_not_found(account_id))?;
    info!(account_id, active = request.active, "Account status updated");

    let state: &str = if request.active {
        "activated"
    } else {
        "deactivated"
    };
    Ok(UpdateAccountStatusResponse {
        message: format!("User {state} successfully"),
        account: AccountInfo::from(&account),
    })
}
