use crate::models::booking::{
    AvailabilityRequest, AvailabilityResponse, Booking, BookingFilter, BookingQuery,
    CreateBookingRequest, HotelBookings, RoomBookings, UpdateBookingRequest,
};
use crate::models::response::{ApiResponse, MessageResponse};
use crate::services::booking_service::BookingService;
use crate::utils::error::AppError;
use crate::utils::pagination::PageQuery;
use chrono::Utc;
use rocket::response::status::Created;
use rocket::serde::json::Json;
use rocket::State;
use rocket_okapi::openapi;

/// List bookings, filtered and paged
#[openapi(tag = "Bookings")]
#[get("/bookings?<query..>")]
pub async fn list_bookings(
    query: BookingQuery,
    booking_service: &State<BookingService>,
) -> Result<Json<ApiResponse<Vec<Booking>>>, AppError> {
    let page = PageQuery::parse(
        query.page.as_deref(),
        query.per_page.as_deref(),
        query.order.as_deref(),
    )?;
    let filter = BookingFilter::parse(
        query.room_id,
        query.hotel_id,
        query.status.as_deref(),
        query.guest_email,
        query.check_in_from.as_deref(),
        query.check_in_to.as_deref(),
    )?;

    let bookings = booking_service.list_bookings(filter, page).await?;
    Ok(Json(ApiResponse::paged(bookings)))
}

/// Get a booking by id
#[openapi(tag = "Bookings")]
#[get("/bookings/<id>")]
pub async fn get_booking(
    id: String,
    booking_service: &State<BookingService>,
) -> Result<Json<ApiResponse<Booking>>, AppError> {
    let booking = booking_service.get_booking(&id).await?;
    Ok(Json(ApiResponse::ok(booking)))
}

/// Book a room; the total price is computed from the room's nightly rate
#[openapi(tag = "Bookings")]
#[post("/bookings", format = "json", data = "<request>")]
pub async fn create_booking(
    request: Json<CreateBookingRequest>,
    booking_service: &State<BookingService>,
) -> Result<Created<Json<ApiResponse<Booking>>>, AppError> {
    let request = request.into_inner();
    request.check(Utc::now().date_naive())?;

    let booking = booking_service.create_booking(request).await?;
    Ok(Created::new(format!("/api/bookings/{}", booking.id)).body(Json(ApiResponse::ok(booking))))
}

/// Update a booking; changing dates re-checks availability
#[openapi(tag = "Bookings")]
#[put("/bookings/<id>", format = "json", data = "<request>")]
pub async fn update_booking(
    id: String,
    request: Json<UpdateBookingRequest>,
    booking_service: &State<BookingService>,
) -> Result<Json<ApiResponse<Booking>>, AppError> {
    let request = request.into_inner();
    request.check()?;

    let booking = booking_service.update_booking(&id, request).await?;
    Ok(Json(ApiResponse::ok(booking)))
}

/// Delete a booking
#[openapi(tag = "Bookings")]
#[delete("/bookings/<id>")]
pub async fn delete_booking(
    id: String,
    booking_service: &State<BookingService>,
) -> Result<Json<MessageResponse>, AppError> {
    booking_service.delete_booking(&id).await?;
    Ok(Json(MessageResponse::new("Booking deleted successfully")))
}

/// Get the bookings of one room, ordered by check-in
#[openapi(tag = "Bookings")]
#[get("/bookings/room/<room_id>")]
pub async fn bookings_by_room(
    room_id: String,
    booking_service: &State<BookingService>,
) -> Result<Json<ApiResponse<RoomBookings>>, AppError> {
    let result = booking_service.bookings_by_room(&room_id).await?;
    Ok(Json(ApiResponse::ok(result)))
}

/// Get the bookings of every room in a hotel, ordered by check-in
#[openapi(tag = "Bookings")]
#[get("/bookings/hotel/<hotel_id>")]
pub async fn bookings_by_hotel(
    hotel_id: String,
    booking_service: &State<BookingService>,
) -> Result<Json<ApiResponse<HotelBookings>>, AppError> {
    let result = booking_service.bookings_by_hotel(&hotel_id).await?;
    Ok(Json(ApiResponse::ok(result)))
}

/// Check whether a room is free for a stay
#[openapi(tag = "Bookings")]
#[post("/bookings/availability", format = "json", data = "<request>")]
pub async fn check_availability(
    request: Json<AvailabilityRequest>,
    booking_service: &State<BookingService>,
) -> Result<Json<ApiResponse<AvailabilityResponse>>, AppError> {
    let request = request.into_inner();
    request.check()?;

    let result = booking_service
        .check_room_availability(
            &request.room_id,
            request.stay(),
            request.exclude_booking_id.as_deref(),
        )
        .await?;
    Ok(Json(ApiResponse::ok(result)))
}
