use chrono::{DateTime, NaiveDate, Utc};
use rocket::FromForm;
use rust_decimal::Decimal;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use validator::{Validate, ValidateEmail, ValidationError, ValidationErrors};

use crate::models::hotel::HotelSummary;
use crate::models::room::{Room, RoomType};
use crate::utils::date::parse_query_date;
use crate::utils::error::{AppError, AppResult};
use crate::utils::validation::validate_not_blank;

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    JsonSchema,
    Display,
    EnumString,
)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum BookingStatus {
    #[default]
    Pending,
    Confirmed,
    Cancelled,
}

impl BookingStatus {
    // Pending and confirmed bookings hold the room
    pub fn is_active(&self) -> bool {
        matches!(self, BookingStatus::Pending | BookingStatus::Confirmed)
    }
}

/// Half-open `[check_in, check_out)` stay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StayInterval {
    pub check_in: DateTime<Utc>,
    pub check_out: DateTime<Utc>,
}

impl StayInterval {
    pub fn new(check_in: DateTime<Utc>, check_out: DateTime<Utc>) -> Self {
        StayInterval {
            check_in,
            check_out,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.check_out > self.check_in
    }
}

// Just enough of a booking to decide availability
#[derive(Debug, Clone, PartialEq, Eq, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookedStay {
    pub id: String,
    pub status: BookingStatus,
    pub check_in: DateTime<Utc>,
    pub check_out: DateTime<Utc>,
}

impl BookedStay {
    pub fn stay(&self) -> StayInterval {
        StayInterval::new(self.check_in, self.check_out)
    }
}

#[derive(Debug, sqlx::FromRow)]
pub struct BookedStayRow {
    pub id: String,
    pub status: String,
    pub check_in: DateTime<Utc>,
    pub check_out: DateTime<Utc>,
}

impl TryFrom<BookedStayRow> for BookedStay {
    type Error = AppError;

    fn try_from(row: BookedStayRow) -> Result<Self, Self::Error> {
        Ok(BookedStay {
            status: parse_status(&row.status)?,
            id: row.id,
            check_in: row.check_in,
            check_out: row.check_out,
        })
    }
}

// Booking joined with its room and hotel
#[derive(Debug, sqlx::FromRow)]
pub struct BookingRow {
    pub id: String,
    pub room_id: String,
    pub guest_name: String,
    pub guest_email: String,
    pub check_in: DateTime<Utc>,
    pub check_out: DateTime<Utc>,
    pub status: String,
    pub total_price: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub room_number: String,
    pub room_type: String,
    pub hotel_id: String,
    pub hotel_name: String,
}

#[derive(Debug, Clone, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookingRoom {
    pub id: String,
    pub room_number: String,
    #[serde(rename = "type")]
    pub room_type: RoomType,
    pub hotel: HotelSummary,
}

#[derive(Debug, Clone, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: String,
    pub room_id: String,
    pub guest_name: String,
    pub guest_email: String,
    pub check_in: DateTime<Utc>,
    pub check_out: DateTime<Utc>,
    pub status: BookingStatus,
    #[serde(with = "rust_decimal::serde::float")]
    #[schemars(with = "f64")]
    pub total_price: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub room: BookingRoom,
}

impl TryFrom<BookingRow> for Booking {
    type Error = AppError;

    fn try_from(row: BookingRow) -> Result<Self, Self::Error> {
        let room_type = row
            .room_type
            .parse::<RoomType>()
            .map_err(|_| AppError::Internal(format!("Unknown room type {}", row.room_type)))?;

        Ok(Booking {
            status: parse_status(&row.status)?,
            room: BookingRoom {
                id: row.room_id.clone(),
                room_number: row.room_number,
                room_type,
                hotel: HotelSummary {
                    id: row.hotel_id,
                    name: row.hotel_name,
                },
            },
            id: row.id,
            room_id: row.room_id,
            guest_name: row.guest_name,
            guest_email: row.guest_email,
            check_in: row.check_in,
            check_out: row.check_out,
            total_price: row.total_price,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

fn parse_status(raw: &str) -> AppResult<BookingStatus> {
    raw.parse::<BookingStatus>()
        .map_err(|_| AppError::Internal(format!("Unknown booking status {}", raw)))
}

fn check_out_error() -> ValidationError {
    ValidationError::new("check_out_before_check_in")
        .with_message("Check-out date must be after check-in date".into())
}

#[derive(Debug, Deserialize, Validate, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingRequest {
    #[validate(custom(function = "validate_not_blank"))]
    pub room_id: String,

    #[validate(length(
        min = 2,
        max = 100,
        message = "Guest name must be at least 2 characters"
    ))]
    pub guest_name: String,

    #[validate(email(message = "Invalid email format"))]
    pub guest_email: String,

    #[serde(deserialize_with = "crate::utils::date::deserialize")]
    pub check_in: DateTime<Utc>,

    #[serde(deserialize_with = "crate::utils::date::deserialize")]
    pub check_out: DateTime<Utc>,

    #[serde(default)]
    pub status: BookingStatus,
}

impl CreateBookingRequest {
    pub fn stay(&self) -> StayInterval {
        StayInterval::new(self.check_in, self.check_out)
    }

    /// Field rules plus the date rules: check-out after check-in, and
    /// check-in no earlier than `today`.
    pub fn check(&self, today: NaiveDate) -> Result<(), ValidationErrors> {
        let mut errors = self.validate().err().unwrap_or_else(ValidationErrors::new);

        if !self.stay().is_valid() {
            errors.add("check_out", check_out_error());
        }
        if self.check_in.date_naive() < today {
            errors.add(
                "check_in",
                ValidationError::new("past_check_in")
                    .with_message("Check-in date cannot be in the past".into()),
            );
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

#[derive(Debug, Default, Deserialize, Validate, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBookingRequest {
    #[validate(length(
        min = 2,
        max = 100,
        message = "Guest name must be at least 2 characters"
    ))]
    pub guest_name: Option<String>,

    #[validate(email(message = "Invalid email format"))]
    pub guest_email: Option<String>,

    #[serde(default, deserialize_with = "crate::utils::date::option::deserialize")]
    pub check_in: Option<DateTime<Utc>>,

    #[serde(default, deserialize_with = "crate::utils::date::option::deserialize")]
    pub check_out: Option<DateTime<Utc>>,

    pub status: Option<BookingStatus>,
}

impl UpdateBookingRequest {
    pub fn changes_dates(&self) -> bool {
        self.check_in.is_some() || self.check_out.is_some()
    }

    pub fn check(&self) -> Result<(), ValidationErrors> {
        let mut errors = self.validate().err().unwrap_or_else(ValidationErrors::new);

        if let (Some(check_in), Some(check_out)) = (self.check_in, self.check_out) {
            if check_out <= check_in {
                errors.add("check_out", check_out_error());
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityRequest {
    pub room_id: String,

    #[serde(deserialize_with = "crate::utils::date::deserialize")]
    pub check_in: DateTime<Utc>,

    #[serde(deserialize_with = "crate::utils::date::deserialize")]
    pub check_out: DateTime<Utc>,

    #[serde(default)]
    pub exclude_booking_id: Option<String>,
}

impl AvailabilityRequest {
    pub fn stay(&self) -> StayInterval {
        StayInterval::new(self.check_in, self.check_out)
    }

    pub fn check(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if let Err(e) = validate_not_blank(&self.room_id) {
            errors.add("room_id", e);
        }
        if !self.stay().is_valid() {
            errors.add("check_out", check_out_error());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityResponse {
    pub available: bool,
    pub conflicting_bookings: Vec<BookedStay>,
}

// Raw query string of `GET /api/bookings`
#[derive(Debug, Default, FromForm, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookingQuery {
    #[field(name = "roomId")]
    pub room_id: Option<String>,
    #[field(name = "hotelId")]
    pub hotel_id: Option<String>,
    pub status: Option<String>,
    #[field(name = "guestEmail")]
    pub guest_email: Option<String>,
    #[field(name = "checkInFrom")]
    pub check_in_from: Option<String>,
    #[field(name = "checkInTo")]
    pub check_in_to: Option<String>,
    pub page: Option<String>,
    #[serde(rename = "per_page")]
    pub per_page: Option<String>,
    pub order: Option<String>,
}

/// Optional filters for listing bookings.
#[derive(Debug, Default, Clone)]
pub struct BookingFilter {
    pub room_id: Option<String>,
    pub hotel_id: Option<String>,
    pub status: Option<BookingStatus>,
    pub guest_email: Option<String>,
    pub check_in_from: Option<DateTime<Utc>>,
    pub check_in_to: Option<DateTime<Utc>>,
}

impl BookingFilter {
    pub fn parse(
        room_id: Option<String>,
        hotel_id: Option<String>,
        status: Option<&str>,
        guest_email: Option<String>,
        check_in_from: Option<&str>,
        check_in_to: Option<&str>,
    ) -> AppResult<Self> {
        let status = status
            .map(|raw| {
                raw.parse::<BookingStatus>()
                    .map_err(|_| AppError::invalid_field("status", "Invalid booking status"))
            })
            .transpose()?;

        if let Some(email) = &guest_email {
            if !email.validate_email() {
                return Err(AppError::invalid_field("guestEmail", "Invalid email format"));
            }
        }

        Ok(BookingFilter {
            room_id: room_id.filter(|id| !id.is_empty()),
            hotel_id: hotel_id.filter(|id| !id.is_empty()),
            status,
            guest_email,
            check_in_from: parse_query_date("checkInFrom", check_in_from)?,
            check_in_to: parse_query_date("checkInTo", check_in_to)?,
        })
    }
}

#[derive(Debug, Serialize, JsonSchema)]
pub struct RoomBookings {
    pub room: Room,
    pub bookings: Vec<Booking>,
}

#[derive(Debug, Serialize, JsonSchema)]
pub struct HotelBookings {
    pub hotel: HotelSummary,
    pub bookings: Vec<Booking>,
}
