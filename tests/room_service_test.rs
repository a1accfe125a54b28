use async_trait::async_trait;
use ctor::dtor;
use hotel_booking_system::{
    models::hotel::{CreateHotelRequest, Hotel},
    models::room::{CreateRoomRequest, RoomFilter, RoomType, UpdateRoomRequest},
    services::{hotel_service::HotelService, room_service::RoomService},
    utils::error::AppError,
};
use rust_decimal::Decimal;
use test_context::{test_context, AsyncTestContext};

mod common {
    pub mod test_utils;
}
use common::test_utils::TestDb;

struct Services {
    hotel_service: HotelService,
    room_service: RoomService,
}

struct RoomServiceContext {
    services: Services,
}

#[dtor]
fn cleanup() {
    if let Err(e) = TestDb::cleanup_database_sync() {
        eprintln!("Failed to cleanup test database: {}", e);
    }
}

#[async_trait]
impl AsyncTestContext for RoomServiceContext {
    async fn setup() -> Self {
        let pool = TestDb::get_instance()
            .await
            .expect("Failed to get test database instance");

        RoomServiceContext {
            services: Services {
                hotel_service: HotelService::new(pool.clone()),
                room_service: RoomService::new(pool),
            },
        }
    }

    async fn teardown(self) {}
}

impl Services {
    // Helper method to create a hotel to hang rooms on
    async fn create_test_hotel(&self, name: &str) -> Result<Hotel, AppError> {
        self.hotel_service
            .create_hotel(CreateHotelRequest {
                name: name.to_string(),
                description: "Modern hotel in the heart of downtown".to_string(),
                amenities: vec![],
            })
            .await
    }
}

fn room_request(hotel_id: &str, number: &str, room_type: RoomType, price: i64) -> CreateRoomRequest {
    CreateRoomRequest {
        hotel_id: hotel_id.to_string(),
        room_number: number.to_string(),
        room_type,
        price_per_night: Decimal::new(price, 0),
        is_available: true,
    }
}

#[test_context(RoomServiceContext)]
#[tokio::test]
#[ignore = "needs a MySQL server at ADMIN_DATABASE_URL"]
async fn test_create_room_includes_hotel(ctx: &RoomServiceContext) -> Result<(), AppError> {
    let s = &ctx.services;

    let hotel = s.create_test_hotel("Room Test Hotel").await?;
    let room = s
        .room_service
        .create_room(room_request(&hotel.id, "101", RoomType::Suite, 320))
        .await?;

    assert_eq!(room.hotel_id, hotel.id);
    assert_eq!(room.hotel.name, "Room Test Hotel");
    assert_eq!(room.room_type, RoomType::Suite);
    assert_eq!(room.price_per_night, Decimal::new(320, 0));
    assert!(room.is_available);

    Ok(())
}

#[test_context(RoomServiceContext)]
#[tokio::test]
#[ignore = "needs a MySQL server at ADMIN_DATABASE_URL"]
async fn test_create_room_in_missing_hotel(ctx: &RoomServiceContext) -> Result<(), AppError> {
    let s = &ctx.services;

    let result = s
        .room_service
        .create_room(room_request("no-such-hotel", "101", RoomType::Single, 80))
        .await;
    assert!(matches!(result, Err(AppError::NotFound(_))));

    Ok(())
}

#[test_context(RoomServiceContext)]
#[tokio::test]
#[ignore = "needs a MySQL server at ADMIN_DATABASE_URL"]
async fn test_duplicate_room_number_conflicts(ctx: &RoomServiceContext) -> Result<(), AppError> {
    let s = &ctx.services;

    let hotel = s.create_test_hotel("Duplicate Hotel").await?;
    let other = s.create_test_hotel("Other Hotel").await?;

    s.room_service
        .create_room(room_request(&hotel.id, "201", RoomType::Double, 100))
        .await?;

    let result = s
        .room_service
        .create_room(room_request(&hotel.id, "201", RoomType::Single, 90))
        .await;
    match result {
        Err(AppError::Conflict(message)) => {
            assert_eq!(message, "Room number already exists in this hotel")
        }
        other => panic!("expected conflict, got {:?}", other),
    }

    // Same number in another hotel is fine
    s.room_service
        .create_room(room_request(&other.id, "201", RoomType::Double, 100))
        .await?;

    Ok(())
}

#[test_context(RoomServiceContext)]
#[tokio::test]
#[ignore = "needs a MySQL server at ADMIN_DATABASE_URL"]
async fn test_update_room_number_conflicts(ctx: &RoomServiceContext) -> Result<(), AppError> {
    let s = &ctx.services;

    let hotel = s.create_test_hotel("Renumber Hotel").await?;
    s.room_service
        .create_room(room_request(&hotel.id, "301", RoomType::Double, 100))
        .await?;
    let room = s
        .room_service
        .create_room(room_request(&hotel.id, "302", RoomType::Double, 100))
        .await?;

    let result = s
        .room_service
        .update_room(
            &room.id,
            UpdateRoomRequest {
                room_number: Some("301".to_string()),
                ..Default::default()
            },
        )
        .await;
    assert!(matches!(result, Err(AppError::Conflict(_))));

    // Keeping its own number is not a conflict
    let updated = s
        .room_service
        .update_room(
            &room.id,
            UpdateRoomRequest {
                room_number: Some("302".to_string()),
                price_per_night: Some(Decimal::new(135, 0)),
                is_available: Some(false),
                ..Default::default()
            },
        )
        .await?;
    assert_eq!(updated.price_per_night, Decimal::new(135, 0));
    assert!(!updated.is_available);
    assert_eq!(updated.room_type, RoomType::Double);

    Ok(())
}

#[test_context(RoomServiceContext)]
#[tokio::test]
#[ignore = "needs a MySQL server at ADMIN_DATABASE_URL"]
async fn test_rooms_by_hotel_and_filters(ctx: &RoomServiceContext) -> Result<(), AppError> {
    let s = &ctx.services;

    let hotel = s.create_test_hotel("Filter Hotel").await?;
    s.room_service
        .create_room(room_request(&hotel.id, "12", RoomType::Family, 250))
        .await?;
    s.room_service
        .create_room(room_request(&hotel.id, "10", RoomType::Single, 70))
        .await?;
    s.room_service
        .create_room(room_request(&hotel.id, "11", RoomType::Single, 90))
        .await?;

    let result = s.room_service.rooms_by_hotel(&hotel.id).await?;
    assert_eq!(result.hotel.name, "Filter Hotel");
    let numbers: Vec<&str> = result.rooms.iter().map(|r| r.room_number.as_str()).collect();
    assert_eq!(numbers, vec!["10", "11", "12"]);

    let singles = s
        .room_service
        .list_rooms(RoomFilter {
            hotel_id: Some(hotel.id.clone()),
            room_type: Some(RoomType::Single),
            max_price: Some(Decimal::new(80, 0)),
            ..Default::default()
        })
        .await?;
    assert_eq!(singles.len(), 1);
    assert_eq!(singles[0].room_number, "10");

    let missing = s.room_service.rooms_by_hotel("no-such-hotel").await;
    assert!(matches!(missing, Err(AppError::NotFound(_))));

    Ok(())
}

#[test_context(RoomServiceContext)]
#[tokio::test]
#[ignore = "needs a MySQL server at ADMIN_DATABASE_URL"]
async fn test_delete_room(ctx: &RoomServiceContext) -> Result<(), AppError> {
    let s = &ctx.services;

    let hotel = s.create_test_hotel("Delete Room Hotel").await?;
    let room = s
        .room_service
        .create_room(room_request(&hotel.id, "401", RoomType::Double, 100))
        .await?;

    s.room_service.delete_room(&room.id).await?;

    assert!(matches!(
        s.room_service.get_room(&room.id).await,
        Err(AppError::NotFound(_))
    ));
    assert!(matches!(
        s.room_service.delete_room(&room.id).await,
        Err(AppError::NotFound(_))
    ));

    Ok(())
}
