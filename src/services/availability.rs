//! Booking availability and pricing.
//!
//! Stays are half-open `[check_in, check_out)` intervals, so a guest checking
//! out on the morning another checks in does not conflict with them.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::models::booking::{BookedStay, StayInterval};
use crate::utils::error::{AppError, AppResult};
use crate::utils::validation::max_amount;

const SECONDS_PER_DAY: i64 = 24 * 60 * 60;

pub fn overlaps(a: &StayInterval, b: &StayInterval) -> bool {
    a.check_in < b.check_out && a.check_out > b.check_in
}

/// Active bookings in `existing` that intersect `candidate`, ignoring the
/// booking `exclude_id` (the one being updated in place).
pub fn find_conflicts<'a>(
    candidate: &StayInterval,
    existing: &'a [BookedStay],
    exclude_id: Option<&str>,
) -> Vec<&'a BookedStay> {
    existing
        .iter()
        .filter(|booking| booking.status.is_active())
        .filter(|booking| exclude_id != Some(booking.id.as_str()))
        .filter(|booking| overlaps(candidate, &booking.stay()))
        .collect()
}

pub fn is_available(
    candidate: &StayInterval,
    existing: &[BookedStay],
    exclude_id: Option<&str>,
) -> bool {
    find_conflicts(candidate, existing, exclude_id).is_empty()
}

// Partial days are charged as a full night
pub fn count_nights(check_in: DateTime<Utc>, check_out: DateTime<Utc>) -> i64 {
    let seconds = (check_out - check_in).num_seconds();
    if seconds <= 0 {
        return 0;
    }
    (seconds + SECONDS_PER_DAY - 1) / SECONDS_PER_DAY
}

pub fn calculate_total_price(
    price_per_night: Decimal,
    check_in: DateTime<Utc>,
    check_out: DateTime<Utc>,
) -> Decimal {
    price_per_night * Decimal::from(count_nights(check_in, check_out))
}

/// Total price of a stay, refused when it would not fit the stored amount.
pub fn checked_total_price(price_per_night: Decimal, stay: &StayInterval) -> AppResult<Decimal> {
    let total = calculate_total_price(price_per_night, stay.check_in, stay.check_out);
    if total > max_amount() {
        return Err(AppError::invalid_field(
            "checkOut",
            "Stay is too long: total price exceeds 99999999.99",
        ));
    }
    Ok(total)
}
