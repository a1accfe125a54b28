use schemars::JsonSchema;
use serde::Serialize;

use crate::utils::pagination::PageMeta;

/// Success envelope: `{ data, success, meta?, count? }`.
#[derive(Debug, Serialize, JsonSchema)]
pub struct ApiResponse<T> {
    pub data: T,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<PageMeta>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        ApiResponse {
            data,
            success: true,
            meta: None,
            count: None,
        }
    }
}

impl<T> ApiResponse<Vec<T>> {
    pub fn paged(page: Page<T>) -> Self {
        ApiResponse {
            data: page.items,
            success: true,
            meta: Some(page.meta),
            count: None,
        }
    }

    pub fn counted(data: Vec<T>) -> Self {
        let count = data.len();
        ApiResponse {
            data,
            success: true,
            meta: None,
            count: Some(count),
        }
    }
}

// One page of rows plus its pagination meta, as returned by the services
#[derive(Debug)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub meta: PageMeta,
}

#[derive(Debug, Serialize, JsonSchema)]
pub struct MessageResponse {
    pub message: String,
    pub success: bool,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        MessageResponse {
            message: message.into(),
            success: true,
        }
    }
}

#[derive(Debug, Serialize, JsonSchema)]
pub struct Endpoints {
    pub hotels: String,
    pub rooms: String,
    pub bookings: String,
    pub docs: String,
}

#[derive(Debug, Serialize, JsonSchema)]
pub struct ServiceInfo {
    pub message: String,
    pub version: String,
    pub endpoints: Endpoints,
}
