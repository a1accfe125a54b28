pub mod booking;
pub mod hotel;
pub mod response;
pub mod room;
