// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::Serialize;

/// A validated email address.
///
/// Validation checks shape only (one `@`, non-empty local part, domain with
/// a dot, no whitespace); deliverability is not verified. Comparison is
/// case-sensitive and exact, which is what guest-cancellation matching
/// relies on.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Email(String);

impl Email {
    /// Parses and validates an email address.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidEmail` if the value does not have a
    /// plausible email shape.
    pub fn parse(value: &str) -> Result<Self, DomainError> {
        if value.chars().any(char::is_whitespace) {
            return Err(DomainError::InvalidEmail(String::from(
                "email must not contain whitespace",
            )));
        }

        let Some((local, domain)) = value.split_once('@') else {
            return Err(DomainError::InvalidEmail(String::from(
                "email must contain '@'",
            )));
        };

        if local.is_empty() {
            return Err(DomainError::InvalidEmail(String::from(
                "email local part must not be empty",
            )));
        }

        // Rule: the domain needs at least one dot with content on both sides
        let valid_domain: bool = domain
            .rsplit_once('.')
            .is_some_and(|(head, tail)| !head.is_empty() && !tail.is_empty());
        if !valid_domain || domain.contains('@') {
            return Err(DomainError::InvalidEmail(String::from(
                "email domain is malformed",
            )));
        }

        Ok(Self(value.to_string()))
    }

    /// Returns the email address as a string slice.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Email {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
