use crate::models::response::{ApiResponse, MessageResponse};
use crate::models::room::{
    CreateRoomRequest, HotelRooms, Room, RoomFilter, RoomQuery, UpdateRoomRequest,
};
use crate::services::room_service::RoomService;
use crate::utils::error::AppError;
use rocket::response::status::Created;
use rocket::serde::json::Json;
use rocket::State;
use rocket_okapi::openapi;
use validator::Validate;

/// List rooms, optionally filtered
#[openapi(tag = "Rooms")]
#[get("/rooms?<query..>")]
pub async fn list_rooms(
    query: RoomQuery,
    room_service: &State<RoomService>,
) -> Result<Json<ApiResponse<Vec<Room>>>, AppError> {
    let filter = RoomFilter::parse(
        query.hotel_id,
        query.room_type.as_deref(),
        query.is_available.as_deref(),
        query.min_price.as_deref(),
        query.max_price.as_deref(),
    )?;
    let rooms = room_service.list_rooms(filter).await?;
    Ok(Json(ApiResponse::counted(rooms)))
}

/// Get the rooms of one hotel, ordered by room number
#[openapi(tag = "Rooms")]
#[get("/rooms/hotel/<hotel_id>")]
pub async fn rooms_by_hotel(
    hotel_id: String,
    room_service: &State<RoomService>,
) -> Result<Json<ApiResponse<HotelRooms>>, AppError> {
    let result = room_service.rooms_by_hotel(&hotel_id).await?;
    Ok(Json(ApiResponse::ok(result)))
}

/// Get a room by id
#[openapi(tag = "Rooms")]
#[get("/rooms/<id>")]
pub async fn get_room(
    id: String,
    room_service: &State<RoomService>,
) -> Result<Json<ApiResponse<Room>>, AppError> {
    let room = room_service.get_room(&id).await?;
    Ok(Json(ApiResponse::ok(room)))
}

/// Create a room in a hotel
#[openapi(tag = "Rooms")]
#[post("/rooms", format = "json", data = "<request>")]
pub async fn create_room(
    request: Json<CreateRoomRequest>,
    room_service: &State<RoomService>,
) -> Result<Created<Json<ApiResponse<Room>>>, AppError> {
    let request = request.into_inner();
    request.validate()?;

    let room = room_service.create_room(request).await?;
    Ok(Created::new(format!("/api/rooms/{}", room.id)).body(Json(ApiResponse::ok(room))))
}

/// Update a room
#[openapi(tag = "Rooms")]
#[put("/rooms/<id>", format = "json", data = "<request>")]
pub async fn update_room(
    id: String,
    request: Json<UpdateRoomRequest>,
    room_service: &State<RoomService>,
) -> Result<Json<ApiResponse<Room>>, AppError> {
    let request = request.into_inner();
    request.validate()?;

    let room = room_service.update_room(&id, request).await?;
    Ok(Json(ApiResponse::ok(room)))
}

/// Delete a room together with its bookings
#[openapi(tag = "Rooms")]
#[delete("/rooms/<id>")]
pub async fn delete_room(
    id: String,
    room_service: &State<RoomService>,
) -> Result<Json<MessageResponse>, AppError> {
    room_service.delete_room(&id).await?;
    Ok(Json(MessageResponse::new("Room deleted successfully")))
}
