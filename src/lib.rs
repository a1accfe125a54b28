#[macro_use]
extern crate rocket;
extern crate rocket_okapi;

pub mod db;
pub mod models;
pub mod routes;
pub mod services;
pub mod swagger;
pub mod utils;

use rocket::fairing::AdHoc;
use rocket::http::Header;
use rocket::{Build, Rocket};
use rocket_okapi::openapi_get_routes;
use rocket_okapi::rapidoc::make_rapidoc;
use rocket_okapi::swagger_ui::make_swagger_ui;
use sqlx::MySqlPool;

use crate::services::booking_service::BookingService;
use crate::services::hotel_service::HotelService;
use crate::services::room_service::RoomService;

/// Assemble the HTTP application around an existing connection pool.
pub fn build_rocket(pool: MySqlPool) -> Rocket<Build> {
    let hotel_service = HotelService::new(pool.clone());
    let room_service = RoomService::new(pool.clone());
    let booking_service = BookingService::new(pool);

    rocket::build()
        .manage(hotel_service)
        .manage(room_service)
        .manage(booking_service)
        .mount(
            "/",
            routes![routes::index_route::index, routes::index_route::preflight],
        )
        .mount(
            "/api",
            openapi_get_routes![
                routes::hotel_route::list_hotels,
                routes::hotel_route::get_hotel,
                routes::hotel_route::create_hotel,
                routes::hotel_route::update_hotel,
                routes::hotel_route::delete_hotel,
                routes::room_route::list_rooms,
                routes::room_route::rooms_by_hotel,
                routes::room_route::get_room,
                routes::room_route::create_room,
                routes::room_route::update_room,
                routes::room_route::delete_room,
                routes::booking_route::list_bookings,
                routes::booking_route::get_booking,
                routes::booking_route::create_booking,
                routes::booking_route::update_booking,
                routes::booking_route::delete_booking,
                routes::booking_route::bookings_by_room,
                routes::booking_route::bookings_by_hotel,
                routes::booking_route::check_availability,
            ],
        )
        .mount("/swagger", make_swagger_ui(&swagger::swagger_ui()))
        .mount("/rapidoc", make_rapidoc(&swagger::rapidoc_ui()))
        .register(
            "/",
            catchers![
                routes::index_route::bad_request,
                routes::index_route::not_found,
                routes::index_route::unprocessable,
                routes::index_route::internal_error,
            ],
        )
        .attach(AdHoc::on_request("Request log", |req, _| {
            Box::pin(async move {
                log::info!("{} {}", req.method(), req.uri().path());
            })
        }))
        .attach(AdHoc::on_response("CORS", |_, res| {
            Box::pin(async move {
                res.set_header(Header::new("Access-Control-Allow-Origin", "*"));
                res.set_header(Header::new(
                    "Access-Control-Allow-Methods",
                    "GET, POST, PUT, DELETE, OPTIONS",
                ));
                res.set_header(Header::new(
                    "Access-Control-Allow-Headers",
                    "Content-Type, Authorization, X-Requested-With",
                ));
            })
        }))
}
