pub mod booking_route;
pub mod hotel_route;
pub mod index_route;
pub mod room_route;
