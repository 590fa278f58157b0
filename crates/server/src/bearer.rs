// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Bearer credential extraction for the server.
//!
//! The extractor never rejects: several endpoints are valid for anonymous
//! callers, so a missing or malformed Authorization header simply yields
//! no credential. Endpoints that require a known account pass the
//! extracted value through required-mode principal resolution, which is
//! where refusal happens.

use axum::{extract::FromRequestParts, http::request::Parts};
use std::convert::Infallible;
use tracing::warn;

use crate::AppState;

/// Extractor for an optional bearer credential.
///
/// Yields the token from `Authorization: Bearer <token>` when present
/// and well-formed, `None` otherwise. Whether `None` means "guest" or
/// "refused" is decided by the resolution mode of the endpoint.
pub struct BearerCredential(pub Option<String>);

impl FromRequestParts<AppState> for BearerCredential {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Some(header) = parts.headers.get("Authorization") else {
            return Ok(Self(None));
        };

        let Ok(header) = header.to_str() else {
            warn!("Invalid Authorization header encoding");
            return Ok(Self(None));
        };

        let Some(token) = header.strip_prefix("Bearer ") else {
            warn!("Authorization header does not start with 'Bearer '");
            return Ok(Self(None));
        };

        Ok(Self(Some(token.to_string())))
    }
}
