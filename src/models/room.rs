use chrono::{DateTime, Utc};
use rocket::FromForm;
use rust_decimal::Decimal;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use validator::Validate;

use crate::models::hotel::HotelSummary;
use crate::utils::error::{AppError, AppResult};
use crate::utils::validation::{validate_not_blank, validate_price};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema, Display, EnumString,
)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum RoomType {
    Single,
    Double,
    Suite,
    Family,
}

// Room joined with the name of its hotel
#[derive(Debug, sqlx::FromRow)]
pub struct RoomRow {
    pub id: String,
    pub hotel_id: String,
    pub room_number: String,
    pub room_type: String,
    pub price_per_night: Decimal,
    pub is_available: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub hotel_name: String,
}

#[derive(Debug, Clone, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    pub id: String,
    pub hotel_id: String,
    pub room_number: String,
    #[serde(rename = "type")]
    pub room_type: RoomType,
    #[serde(with = "rust_decimal::serde::float")]
    #[schemars(with = "f64")]
    pub price_per_night: Decimal,
    pub is_available: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub hotel: HotelSummary,
}

impl TryFrom<RoomRow> for Room {
    type Error = AppError;

    fn try_from(row: RoomRow) -> Result<Self, Self::Error> {
        let room_type = row
            .room_type
            .parse::<RoomType>()
            .map_err(|_| AppError::Internal(format!("Unknown room type {}", row.room_type)))?;

        Ok(Room {
            hotel: HotelSummary {
                id: row.hotel_id.clone(),
                name: row.hotel_name,
            },
            id: row.id,
            hotel_id: row.hotel_id,
            room_number: row.room_number,
            room_type,
            price_per_night: row.price_per_night,
            is_available: row.is_available,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[derive(Debug, Deserialize, Validate, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateRoomRequest {
    #[validate(custom(function = "validate_not_blank"))]
    pub hotel_id: String,

    #[validate(length(min = 1, max = 10, message = "Room number must be 1 to 10 characters"))]
    pub room_number: String,

    #[serde(rename = "type")]
    pub room_type: RoomType,

    #[serde(with = "rust_decimal::serde::float")]
    #[schemars(with = "f64")]
    #[validate(custom(function = "validate_price"))]
    pub price_per_night: Decimal,

    #[serde(default = "default_available")]
    pub is_available: bool,
}

fn default_available() -> bool {
    true
}

#[derive(Debug, Default, Deserialize, Validate, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRoomRequest {
    #[validate(length(min = 1, max = 10, message = "Room number must be 1 to 10 characters"))]
    pub room_number: Option<String>,

    #[serde(rename = "type")]
    pub room_type: Option<RoomType>,

    #[serde(default, with = "rust_decimal::serde::float_option")]
    #[schemars(with = "Option<f64>")]
    #[validate(custom(function = "validate_price"))]
    pub price_per_night: Option<Decimal>,

    pub is_available: Option<bool>,
}

// Raw query string of `GET /api/rooms`, validated into a `RoomFilter`
#[derive(Debug, Default, FromForm, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RoomQuery {
    #[field(name = "hotelId")]
    pub hotel_id: Option<String>,
    #[field(name = "type")]
    #[serde(rename = "type")]
    pub room_type: Option<String>,
    #[field(name = "isAvailable")]
    pub is_available: Option<String>,
    #[field(name = "minPrice")]
    pub min_price: Option<String>,
    #[field(name = "maxPrice")]
    pub max_price: Option<String>,
}

/// Optional filters for listing rooms.
#[derive(Debug, Default, Clone)]
pub struct RoomFilter {
    pub hotel_id: Option<String>,
    pub room_type: Option<RoomType>,
    pub is_available: Option<bool>,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
}

impl RoomFilter {
    pub fn parse(
        hotel_id: Option<String>,
        room_type: Option<&str>,
        is_available: Option<&str>,
        min_price: Option<&str>,
        max_price: Option<&str>,
    ) -> AppResult<Self> {
        let room_type = room_type
            .map(|raw| {
                raw.parse::<RoomType>()
                    .map_err(|_| AppError::invalid_field("type", "Invalid room type"))
            })
            .transpose()?;

        let is_available = is_available
            .map(|raw| match raw {
                "true" => Ok(true),
                "false" => Ok(false),
                _ => Err(AppError::invalid_field(
                    "isAvailable",
                    "isAvailable must be true or false",
                )),
            })
            .transpose()?;

        Ok(RoomFilter {
            hotel_id: hotel_id.filter(|id| !id.is_empty()),
            room_type,
            is_available,
            min_price: parse_price("minPrice", min_price)?,
            max_price: parse_price("maxPrice", max_price)?,
        })
    }
}

fn parse_price(field: &str, raw: Option<&str>) -> AppResult<Option<Decimal>> {
    match raw {
        Some(raw) => raw
            .trim()
            .parse::<Decimal>()
            .ok()
            .filter(|price| *price >= Decimal::ZERO)
            .map(Some)
            .ok_or_else(|| AppError::invalid_field(field, format!("{} must be a number ≥ 0", field))),
        None => Ok(None),
    }
}

#[derive(Debug, Serialize, JsonSchema)]
pub struct HotelRooms {
    pub hotel: HotelSummary,
    pub rooms: Vec<Room>,
}
