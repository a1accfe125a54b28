use crate::models::hotel::{CreateHotelRequest, Hotel, UpdateHotelRequest};
use crate::models::response::{ApiResponse, MessageResponse};
use crate::services::hotel_service::HotelService;
use crate::utils::error::AppError;
use crate::utils::pagination::PageQuery;
use rocket::response::status::Created;
use rocket::serde::json::Json;
use rocket::State;
use rocket_okapi::openapi;
use validator::Validate;

/// List hotels, one page at a time
#[openapi(tag = "Hotels")]
#[get("/hotels?<page>&<per_page>&<order>")]
pub async fn list_hotels(
    page: Option<String>,
    per_page: Option<String>,
    order: Option<String>,
    hotel_service: &State<HotelService>,
) -> Result<Json<ApiResponse<Vec<Hotel>>>, AppError> {
    let query = PageQuery::parse(page.as_deref(), per_page.as_deref(), order.as_deref())?;
    let page = hotel_service.list_hotels_paged(query).await?;
    Ok(Json(ApiResponse::paged(page)))
}

/// Get a hotel by id
#[openapi(tag = "Hotels")]
#[get("/hotels/<id>")]
pub async fn get_hotel(
    id: String,
    hotel_service: &State<HotelService>,
) -> Result<Json<ApiResponse<Hotel>>, AppError> {
    let hotel = hotel_service.get_hotel(&id).await?;
    Ok(Json(ApiResponse::ok(hotel)))
}

/// Create a hotel
#[openapi(tag = "Hotels")]
#[post("/hotels", format = "json", data = "<request>")]
pub async fn create_hotel(
    request: Json<CreateHotelRequest>,
    hotel_service: &State<HotelService>,
) -> Result<Created<Json<ApiResponse<Hotel>>>, AppError> {
    let request = request.into_inner();
    request.validate()?;

    let hotel = hotel_service.create_hotel(request).await?;
    Ok(Created::new(format!("/api/hotels/{}", hotel.id)).body(Json(ApiResponse::ok(hotel))))
}

/// Update a hotel
#[openapi(tag = "Hotels")]
#[put("/hotels/<id>", format = "json", data = "<request>")]
pub async fn update_hotel(
    id: String,
    request: Json<UpdateHotelRequest>,
    hotel_service: &State<HotelService>,
) -> Result<Json<ApiResponse<Hotel>>, AppError> {
    let request = request.into_inner();
    request.validate()?;

    let hotel = hotel_service.update_hotel(&id, request).await?;
    Ok(Json(ApiResponse::ok(hotel)))
}

/// Delete a hotel together with its rooms
#[openapi(tag = "Hotels")]
#[delete("/hotels/<id>")]
pub async fn delete_hotel(
    id: String,
    hotel_service: &State<HotelService>,
) -> Result<Json<MessageResponse>, AppError> {
    hotel_service.delete_hotel(&id).await?;
    Ok(Json(MessageResponse::new("Hotel deleted successfully")))
}
