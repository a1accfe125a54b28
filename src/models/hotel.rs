use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::utils::error::AppError;

#[derive(Debug, sqlx::FromRow)]
pub struct HotelRow {
    pub id: String,
    pub name: String,
    pub description: String,
    // JSON array of amenity names
    pub amenities: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Hotel {
    pub id: String,
    pub name: String,
    pub description: String,
    pub amenities: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<HotelRow> for Hotel {
    type Error = AppError;

    fn try_from(row: HotelRow) -> Result<Self, Self::Error> {
        Ok(Hotel {
            amenities: serde_json::from_str(&row.amenities)?,
            id: row.id,
            name: row.name,
            description: row.description,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

// The slice of a hotel embedded in room and booking responses
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema, sqlx::FromRow)]
pub struct HotelSummary {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Deserialize, Validate, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateHotelRequest {
    #[validate(length(min = 2, max = 50, message = "Name must be between 2 and 50 characters"))]
    pub name: String,

    #[validate(length(
        min = 10,
        max = 200,
        message = "Description must be between 10 and 200 characters"
    ))]
    pub description: String,

    #[serde(default)]
    pub amenities: Vec<String>,
}

#[derive(Debug, Default, Deserialize, Validate, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateHotelRequest {
    #[validate(length(min = 2, max = 50, message = "Name must be between 2 and 50 characters"))]
    pub name: Option<String>,

    #[validate(length(
        min = 10,
        max = 200,
        message = "Description must be between 10 and 200 characters"
    ))]
    pub description: Option<String>,

    pub amenities: Option<Vec<String>>,
}
