use crate::models::response::{Endpoints, ServiceInfo};
use rocket::http::Status;
use rocket::serde::json::{json, Json, Value};
use rocket::Request;

#[get("/")]
pub fn index() -> Json<ServiceInfo> {
    Json(ServiceInfo {
        message: "Hotel Booking API".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        endpoints: Endpoints {
            hotels: "/api/hotels".to_string(),
            rooms: "/api/rooms".to_string(),
            bookings: "/api/bookings".to_string(),
            docs: "/swagger".to_string(),
        },
    })
}

// CORS preflight for any path; the headers come from the CORS fairing
#[options("/<_..>")]
pub fn preflight() -> Status {
    Status::NoContent
}

#[catch(400)]
pub fn bad_request() -> Json<Value> {
    Json(json!({
        "error": "Bad request",
        "success": false
    }))
}

#[catch(404)]
pub fn not_found() -> Json<Value> {
    Json(json!({
        "error": "Route not found",
        "success": false
    }))
}

// Rocket's JSON guard answers 422 when a body does not match the request type
#[catch(422)]
pub fn unprocessable(req: &Request) -> Json<Value> {
    log::warn!("{} {}: unreadable request body", req.method(), req.uri());
    Json(unprocessable_body())
}

pub fn unprocessable_body() -> Value {
    json!({
        "error": "Unprocessable entity",
        "message": "Request body does not match the expected format",
        "success": false
    })
}

#[catch(500)]
pub fn internal_error() -> Json<Value> {
    Json(json!({
        "error": "Internal server error",
        "success": false
    }))
}
