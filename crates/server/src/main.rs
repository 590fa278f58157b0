// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

use axum::{
    Json, Router,
    extract::{Path, State as AxumState},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
};
use clap::Parser;
use std::sync::Arc;
use time::OffsetDateTime;
use tokio::sync::Mutex;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use wayfarer_api::{
    ApiError, CancelBookingRequest, CancelBookingResponse, CreateBookingRequest,
    CreateBookingResponse, CredentialVerifier, GetAccountResponse, GuestLookupRequest,
    GuestLookupResponse, LinkGuestBookingsRequest, LinkGuestBookingsResponse,
    ListAccountsResponse, ListBookingsResponse, PrincipalResolver, UpdateAccountRoleRequest,
    UpdateAccountRoleResponse, UpdateAccountStatusRequest, UpdateAccountStatusResponse,
};
use wayfarer_domain::Principal;
use wayfarer_persistence::SqlitePersistence;

mod bearer;

use bearer::BearerCredential;

/// Wayfarer Server - HTTP server for the Wayfarer booking backend
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long)]
    database: Option<String>,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 4000)]
    port: u16,

    /// Credential signing secret. Falls back to the
    /// `WAYFARER_CREDENTIAL_SECRET` environment variable.
    #[arg(long)]
    credential_secret: Option<String>,
}

/// Application state shared across handlers.
///
/// The persistence layer is the single point of serialization: it sits
/// behind a mutex and every request takes its turn. The credential
/// verifier is immutable and shared freely.
#[derive(Clone)]
struct AppState {
    /// The persistence layer for accounts, tours, and bookings.
    persistence: Arc<Mutex<SqlitePersistence>>,
    /// The credential verifier, configured once at startup.
    verifier: Arc<CredentialVerifier>,
}

/// An API error carried to the HTTP boundary.
struct HttpError(ApiError);

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        Self(err)
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let (status, message): (StatusCode, String) = match self.0 {
            ApiError::AuthenticationRequired { reason } => (StatusCode::UNAUTHORIZED, reason),
            ApiError::Forbidden { reason } => (StatusCode::FORBIDDEN, reason),
            ApiError::InvalidInput { message, .. } => (StatusCode::BAD_REQUEST, message),
            ApiError::ResourceNotFound { message, .. } => (StatusCode::NOT_FOUND, message),
            ApiError::PolicyViolation { message } => (StatusCode::BAD_REQUEST, message),
            ApiError::Internal { message } => {
                // Internal detail is logged here and never shown to the caller
                error!(detail = %message, "Internal server error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    String::from("Internal server error"),
                )
            }
        };

        (status, Json(serde_json::json!({ "error": message }))).into_response()
    }
}

/// Resolves the caller to a principal, refusing anonymous callers.
async fn require_principal(
    state: &AppState,
    credential: Option<&str>,
) -> Result<Principal, HttpError> {
    let mut persistence = state.persistence.lock().await;
    Ok(PrincipalResolver::resolve_required(
        &mut persistence,
        &state.verifier,
        credential,
    )?)
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

/// POST /api/bookings - public, guest or authenticated.
async fn create_booking_handler(
    AxumState(state): AxumState<AppState>,
    BearerCredential(credential): BearerCredential,
    Json(request): Json<CreateBookingRequest>,
) -> Result<(StatusCode, Json<CreateBookingResponse>), HttpError> {
    let mut persistence = state.persistence.lock().await;
    let response: CreateBookingResponse = wayfarer_api::create_booking(
        &mut persistence,
        &state.verifier,
        credential.as_deref(),
        &request,
        OffsetDateTime::now_utc(),
    )?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// DELETE /api/bookings/{id} - public, eligibility decided by the engine.
///
/// The body is optional: an authenticated owner or admin sends none, a
/// guest sends the booking email.
async fn cancel_booking_handler(
    AxumState(state): AxumState<AppState>,
    BearerCredential(credential): BearerCredential,
    Path(booking_id): Path<i64>,
    body: axum::body::Bytes,
) -> Result<Json<CancelBookingResponse>, HttpError> {
    let request: CancelBookingRequest = if body.is_empty() {
        CancelBookingRequest::default()
    } else {
        serde_json::from_slice(&body).map_err(|e| {
            HttpError(ApiError::InvalidInput {
                field: String::from("body"),
                message: format!("Malformed request body: {e}"),
            })
        })?
    };
    let mut persistence = state.persistence.lock().await;
    let response: CancelBookingResponse = wayfarer_api::cancel_booking(
        &mut persistence,
        &state.verifier,
        credential.as_deref(),
        booking_id,
        &request,
        OffsetDateTime::now_utc(),
    )?;
    Ok(Json(response))
}

/// GET /api/bookings - admin only.
async fn list_bookings_handler(
    AxumState(state): AxumState<AppState>,
    BearerCredential(credential): BearerCredential,
) -> Result<Json<ListBookingsResponse>, HttpError> {
    let principal: Principal = require_principal(&state, credential.as_deref()).await?;
    let mut persistence = state.persistence.lock().await;
    Ok(Json(wayfarer_api::list_bookings(
        &mut persistence,
        &principal,
    )?))
}

/// GET /api/bookings/my-bookings - the caller's own bookings.
async fn my_bookings_handler(
    AxumState(state): AxumState<AppState>,
    BearerCredential(credential): BearerCredential,
) -> Result<Json<ListBookingsResponse>, HttpError> {
    let principal: Principal = require_principal(&state, credential.as_deref()).await?;
    let mut persistence = state.persistence.lock().await;
    Ok(Json(wayfarer_api::list_my_bookings(
        &mut persistence,
        &principal,
    )?))
}

/// GET /api/bookings/user/{account_id} - owner or admin.
async fn account_bookings_handler(
    AxumState(state): AxumState<AppState>,
    BearerCredential(credential): BearerCredential,
    Path(account_id): Path<i64>,
) -> Result<Json<ListBookingsResponse>, HttpError> {
    let principal: Principal = require_principal(&state, credential.as_deref()).await?;
    let mut persistence = state.persistence.lock().await;
    Ok(Json(wayfarer_api::list_bookings_for_account(
        &mut persistence,
        &principal,
        account_id,
    )?))
}

/// GET /api/bookings/tour/{tour_id} - admin only.
async fn tour_bookings_handler(
    AxumState(state): AxumState<AppState>,
    BearerCredential(credential): BearerCredential,
    Path(tour_id): Path<i64>,
) -> Result<Json<ListBookingsResponse>, HttpError> {
    let principal: Principal = require_principal(&state, credential.as_deref()).await?;
    let mut persistence = state.persistence.lock().await;
    Ok(Json(wayfarer_api::list_bookings_for_tour(
        &mut persistence,
        &principal,
        tour_id,
    )?))
}

/// GET /api/bookings/{id} - owner or admin.
async fn get_booking_handler(
    AxumState(state): AxumState<AppState>,
    BearerCredential(credential): BearerCredential,
    Path(booking_id): Path<i64>,
) -> Result<Json<wayfarer_api::BookingInfo>, HttpError> {
    let principal: Principal = require_principal(&state, credential.as_deref()).await?;
    let mut persistence = state.persistence.lock().await;
    Ok(Json(wayfarer_api::get_booking(
        &mut persistence,
        &principal,
        booking_id,
    )?))
}

/// POST /api/bookings/guest-lookup - public.
async fn guest_lookup_handler(
    AxumState(state): AxumState<AppState>,
    Json(request): Json<GuestLookupRequest>,
) -> Result<Json<GuestLookupResponse>, HttpError> {
    let mut persistence = state.persistence.lock().await;
    Ok(Json(wayfarer_api::guest_lookup(&mut persistence, &request)?))
}

/// POST /api/bookings/link-guest-bookings - authenticated.
async fn link_guest_bookings_handler(
    AxumState(state): AxumState<AppState>,
    BearerCredential(credential): BearerCredential,
    Json(request): Json<LinkGuestBookingsRequest>,
) -> Result<Json<LinkGuestBookingsResponse>, HttpError> {
    let principal: Principal = require_principal(&state, credential.as_deref()).await?;
    let mut persistence = state.persistence.lock().await;
    Ok(Json(wayfarer_api::link_guest_bookings(
        &mut persistence,
        &principal,
        &request,
    )?))
}

/// GET /api/accounts - admin only.
async fn list_accounts_handler(
    AxumState(state): AxumState<AppState>,
    BearerCredential(credential): BearerCredential,
) -> Result<Json<ListAccountsResponse>, HttpError> {
    let principal: Principal = require_principal(&state, credential.as_deref()).await?;
    let mut persistence = state.persistence.lock().await;
    Ok(Json(wayfarer_api::list_accounts(
        &mut persistence,
        &principal,
    )?))
}

/// GET /api/accounts/{id} - owner or admin.
async fn get_account_handler(
    AxumState(state): AxumState<AppState>,
    BearerCredential(credential): BearerCredential,
    Path(account_id): Path<i64>,
) -> Result<Json<GetAccountResponse>, HttpError> {
    let principal: Principal = require_principal(&state, credential.as_deref()).await?;
    let mut persistence = state.persistence.lock().await;
    Ok(Json(wayfarer_api::get_account(
        &mut persistence,
        &principal,
        account_id,
    )?))
}

/// PUT /api/accounts/{id}/role - admin only.
async fn update_account_role_handler(
    AxumState(state): AxumState<AppState>,
    BearerCredential(credential): BearerCredential,
    Path(account_id): Path<i64>,
    Json(request): Json<UpdateAccountRoleRequest>,
) -> Result<Json<UpdateAccountRoleResponse>, HttpError> {
    let principal: Principal = require_principal(&state, credential.as_deref()).await?;
    let mut persistence = state.persistence.lock().await;
    Ok(Json(wayfarer_api::update_account_role(
        &mut persistence,
        &principal,
        account_id,
        &request,
    )?))
}

/// PUT /api/accounts/{id}/status - admin only.
async fn update_account_status_handler(
    AxumState(state): AxumState<AppState>,
    BearerCredential(credential): BearerCredential,
    Path(account_id): Path<i64>,
    Json(request): Json<UpdateAccountStatusRequest>,
) -> Result<Json<UpdateAccountStatusResponse>, HttpError> {
    let principal: Principal = require_principal(&state, credential.as_deref()).await?;
    let mut persistence = state.persistence.lock().await;
    Ok(Json(wayfarer_api::update_account_status(
        &mut persistence,
        &principal,
        account_id,
        &request,
    )?))
}

/// Builds the application router.
fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route(
            "/api/bookings",
            post(create_booking_handler).get(list_bookings_handler),
        )
        .route("/api/bookings/my-bookings", get(my_bookings_handler))
        .route("/api/bookings/guest-lookup", post(guest_lookup_handler))
        .route(
            "/api/bookings/link-guest-bookings",
            post(link_guest_bookings_handler),
        )
        .route("/api/bookings/user/{account_id}", get(account_bookings_handler))
        .route("/api/bookings/tour/{tour_id}", get(tour_bookings_handler))
        .route(
            "/api/bookings/{id}",
            get(get_booking_handler).delete(cancel_booking_handler),
        )
        .route("/api/accounts", get(list_accounts_handler))
        .route("/api/accounts/{id}", get(get_account_handler))
        .route("/api/accounts/{id}/role", put(update_account_role_handler))
        .route(
            "/api/accounts/{id}/status",
            put(update_account_status_handler),
        )
        .with_state(state)
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args: Args = Args::parse();

    // The credential secret is process-wide and loaded exactly once;
    // rotating it invalidates every outstanding credential.
    let secret: Option<String> = args
        .credential_secret
        .or_else(|| std::env::var("WAYFARER_CREDENTIAL_SECRET").ok());
    let Some(secret) = secret else {
        error!(
            "No credential secret configured; set --credential-secret or WAYFARER_CREDENTIAL_SECRET"
        );
        std::process::exit(1);
    };

    let persistence: SqlitePersistence = match &args.database {
        Some(path) => SqlitePersistence::new_with_file(path),
        None => SqlitePersistence::new_in_memory(),
    }
    .unwrap_or_else(|e| {
        error!("Failed to initialize persistence: {e}");
        std::process::exit(1);
    });

    let state: AppState = AppState {
        persistence: Arc::new(Mutex::new(persistence)),
        verifier: Arc::new(CredentialVerifier::new(secret.as_bytes())),
    };

    let app: Router = build_router(state);
    let addr: String = format!("0.0.0.0:{}", args.port);

    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!("Failed to bind {addr}: {e}");
            std::process::exit(1);
        }
    };

    info!("Wayfarer server listening on {addr}");

    if let Err(e) = axum::serve(listener, app).await {
        error!("Server error: {e}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request, StatusCode as HttpStatusCode},
    };
    use rust_decimal::Decimal;
    use time::Duration;
    use tower::ServiceExt;
    use wayfarer_domain::Role;

    const TEST_SECRET: &[u8] = b"server-test-secret";

    /// Helper to create test app state with in-memory persistence.
    fn create_test_app_state() -> AppState {
        let persistence: SqlitePersistence =
            SqlitePersistence::new_in_memory().expect("Failed to create in-memory persistence");
        AppState {
            persistence: Arc::new(Mutex::new(persistence)),
            verifier: Arc::new(CredentialVerifier::new(TEST_SECRET)),
        }
    }

    async fn seed_tour(state: &AppState) -> i64 {
        state
            .persistence
            .lock()
            .await
            .insert_tour("Fjord Hike", Decimal::from(250))
            .expect("Failed to seed tour")
    }

    async fn seed_account(state: &AppState, role: Role, email: &str) -> i64 {
        state
            .persistence
            .lock()
            .await
            .insert_account("Test Account", email, role, true)
            .expect("Failed to seed account")
    }

    fn credential_for(state: &AppState, account_id: i64) -> String {
        state
            .verifier
            .issue(account_id)
            .expect("Failed to issue credential")
    }

    fn guest_create_body(tour_id: i64) -> String {
        let request: CreateBookingRequest = CreateBookingRequest {
            tour_id,
            people: 2,
            date: OffsetDateTime::now_utc() + Duration::days(14),
            notes: None,
            guest_name: Some(String::from("Greta Vist")),
            guest_email: Some(String::from("g@x.com")),
            guest_phone: None,
        };
        serde_json::to_string(&request).expect("Failed to serialize request")
    }

    #[tokio::test]
    async fn test_health_endpoint_responds() {
        let app: Router = build_router(create_test_app_state());

        let response = app
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), HttpStatusCode::OK);
    }

    #[tokio::test]
    async fn test_guest_booking_is_created() {
        let state: AppState = create_test_app_state();
        let tour_id: i64 = seed_tour(&state).await;
        let app: Router = build_router(state);

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/bookings")
                    .header("content-type", "application/json")
                    .body(Body::from(guest_create_body(tour_id)))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), HttpStatusCode::CREATED);

        let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let api_response: CreateBookingResponse = serde_json::from_slice(&body_bytes).unwrap();

        assert_eq!(api_response.booking.booking_type, "guest");
        assert_eq!(api_response.booking.total, Decimal::from(500));
    }

    #[tokio::test]
    async fn test_booking_without_contact_or_credential_is_bad_request() {
        let state: AppState = create_test_app_state();
        let tour_id: i64 = seed_tour(&state).await;
        let app: Router = build_router(state);

        let body: String = serde_json::to_string(&CreateBookingRequest {
            tour_id,
            people: 2,
            date: OffsetDateTime::now_utc() + Duration::days(14),
            notes: None,
            guest_name: None,
            guest_email: None,
            guest_phone: None,
        })
        .unwrap();

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/bookings")
                    .header("content-type", "application/json")
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), HttpStatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_list_bookings_requires_admin() {
        let state: AppState = create_test_app_state();
        let user_id: i64 = seed_account(&state, Role::User, "user@example.com").await;
        let user_credential: String = credential_for(&state, user_id);
        let admin_id: i64 = seed_account(&state, Role::Admin, "admin@example.com").await;
        let admin_credential: String = credential_for(&state, admin_id);
        let app: Router = build_router(state);

        // No credential
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri("/api/bookings")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), HttpStatusCode::UNAUTHORIZED);

        // User credential
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri("/api/bookings")
                    .header("Authorization", format!("Bearer {user_credential}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), HttpStatusCode::FORBIDDEN);

        // Admin credential
        let response = app
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri("/api/bookings")
                    .header("Authorization", format!("Bearer {admin_credential}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), HttpStatusCode::OK);
    }

    #[tokio::test]
    async fn test_guest_cancellation_round_trip() {
        let state: AppState = create_test_app_state();
        let tour_id: i64 = seed_tour(&state).await;
        let app: Router = build_router(state);

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/bookings")
                    .header("content-type", "application/json")
                    .body(Body::from(guest_create_body(tour_id)))
                    .unwrap(),
            )
            .await
            .unwrap();
        let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let created: CreateBookingResponse = serde_json::from_slice(&body_bytes).unwrap();

        let response = app
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri(format!("/api/bookings/{}", created.booking.id))
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"guest_email":"g@x.com"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), HttpStatusCode::OK);

        let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let cancelled: CancelBookingResponse = serde_json::from_slice(&body_bytes).unwrap();
        assert_eq!(cancelled.reason, "guest");
    }

    #[tokio::test]
    async fn test_guest_lookup_finds_bookings() {
        let state: AppState = create_test_app_state();
        let tour_id: i64 = seed_tour(&state).await;
        let app: Router = build_router(state);

        app.clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/bookings")
                    .header("content-type", "application/json")
                    .body(Body::from(guest_create_body(tour_id)))
                    .unwrap(),
            )
            .await
            .unwrap();

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/bookings/guest-lookup")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"email":"g@x.com"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), HttpStatusCode::OK);

        let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let lookup: GuestLookupResponse = serde_json::from_slice(&body_bytes).unwrap();
        assert_eq!(lookup.bookings.len(), 1);
    }

    #[tokio::test]
    async fn test_link_guest_bookings_requires_authentication() {
        let app: Router = build_router(create_test_app_state());

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/bookings/link-guest-bookings")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"guest_email":"g@x.com"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), HttpStatusCode::UNAUTHORIZED);
    }
}
