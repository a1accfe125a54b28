pub mod availability;
pub mod booking_service;
pub mod hotel_service;
pub mod room_service;
