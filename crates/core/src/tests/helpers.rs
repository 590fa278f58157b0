// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use rust_decimal::Decimal;
use time::{Duration, OffsetDateTime};
use wayfarer_domain::{
    Booking, BookingOwner, BookingStatus, Email, GuestContact, Principal, Role, Tour,
};

pub fn create_test_tour() -> Tour {
    Tour::new(1, String::from("Fjord Hike"), Decimal::from(250)).unwrap()
}

pub fn create_test_guest(email: &str) -> GuestContact {
    GuestContact::new("Greta Vist", Email::parse(email).unwrap(), None).unwrap()
}

pub fn create_test_admin() -> Principal {
    Principal::new(1, Role::Admin, true)
}

pub fn create_test_user(id: i64) -> Principal {
    Principal::new(id, Role::User, true)
}

/// A confirmed booking with the given owner, dated `lead_hours` from `now`.
pub fn create_test_booking(
    owner: BookingOwner,
    now: OffsetDateTime,
    lead_hours: i64,
) -> Booking {
    Booking {
        id: 10,
        tour_id: 1,
        owner,
        people: 2,
        total: Decimal::from(500),
        date: now + Duration::hours(lead_hours),
        notes: None,
        status: BookingStatus::Confirmed,
        created_at: now - Duration::days(1),
    }
}
