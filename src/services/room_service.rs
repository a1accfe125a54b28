use crate::models::room::{
    CreateRoomRequest, HotelRooms, Room, RoomFilter, RoomRow, UpdateRoomRequest,
};
use crate::services::hotel_service::HotelService;
use crate::utils::error::{AppError, AppResult};
use sqlx::{MySql, MySqlPool, QueryBuilder};
use uuid::Uuid;

const ROOM_SELECT: &str = r#"
    SELECT
        r.id,
        r.hotel_id,
        r.room_number,
        r.room_type,
        r.price_per_night,
        r.is_available,
        r.created_at,
        r.updated_at,
        h.name AS hotel_name
    FROM room r
    JOIN hotel h ON h.id = r.hotel_id
"#;

const DUPLICATE_ROOM_NUMBER: &str = "Room number already exists in this hotel";

pub struct RoomService {
    pool: MySqlPool,
    hotel_service: HotelService,
}

impl RoomService {
    pub fn new(pool: MySqlPool) -> Self {
        RoomService {
            hotel_service: HotelService::new(pool.clone()),
            pool,
        }
    }

    // List rooms matching the filter, newest first
    pub async fn list_rooms(&self, filter: RoomFilter) -> AppResult<Vec<Room>> {
        let mut builder: QueryBuilder<MySql> = QueryBuilder::new(ROOM_SELECT);
        builder.push(" WHERE 1 = 1");

        if let Some(hotel_id) = filter.hotel_id {
            builder.push(" AND r.hotel_id = ").push_bind(hotel_id);
        }
        if let Some(room_type) = filter.room_type {
            builder.push(" AND r.room_type = ").push_bind(room_type.to_string());
        }
        if let Some(is_available) = filter.is_available {
            builder.push(" AND r.is_available = ").push_bind(is_available);
        }
        if let Some(min_price) = filter.min_price {
            builder.push(" AND r.price_per_night >= ").push_bind(min_price);
        }
        if let Some(max_price) = filter.max_price {
            builder.push(" AND r.price_per_night <= ").push_bind(max_price);
        }
        builder.push(" ORDER BY r.created_at DESC, r.id DESC");

        let rows = builder
            .build_query_as::<RoomRow>()
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(Room::try_from).collect()
    }

    pub async fn get_room(&self, id: &str) -> AppResult<Room> {
        let sql = format!("{} WHERE r.id = ?", ROOM_SELECT);
        let row = sqlx::query_as::<_, RoomRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Room not found".into()))?;

        Room::try_from(row)
    }

    pub async fn create_room(&self, request: CreateRoomRequest) -> AppResult<Room> {
        // Check if hotel exists
        self.hotel_service.get_hotel_summary(&request.hotel_id).await?;

        if self
            .room_number_taken(&request.hotel_id, &request.room_number, None)
            .await?
        {
            return Err(AppError::Conflict(DUPLICATE_ROOM_NUMBER.into()));
        }

        let id = Uuid::new_v4().to_string();
        sqlx::query(
            r#"
            INSERT INTO room (id, hotel_id, room_number, room_type, price_per_night, is_available)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&id)
        .bind(&request.hotel_id)
        .bind(&request.room_number)
        .bind(request.room_type.to_string())
        .bind(request.price_per_night)
        .bind(request.is_available)
        .execute(&self.pool)
        .await
        .map_err(duplicate_room_number)?;

        log::info!(
            "Created room {} ({}) in hotel {}",
            id,
            request.room_number,
            request.hotel_id
        );

        self.get_room(&id).await
    }

    pub async fn update_room(&self, id: &str, request: UpdateRoomRequest) -> AppResult<Room> {
        let existing = self.get_room(id).await?;

        // Room numbers stay unique within the room's own hotel
        if let Some(room_number) = &request.room_number {
            if *room_number != existing.room_number
                && self
                    .room_number_taken(&existing.hotel_id, room_number, Some(id))
                    .await?
            {
                return Err(AppError::Conflict(DUPLICATE_ROOM_NUMBER.into()));
            }
        }

        let room_number = request.room_number.unwrap_or(existing.room_number);
        let room_type = request.room_type.unwrap_or(existing.room_type);
        let price_per_night = request.price_per_night.unwrap_or(existing.price_per_night);
        let is_available = request.is_available.unwrap_or(existing.is_available);

        sqlx::query(
            r#"
            UPDATE room
            SET room_number = ?, room_type = ?, price_per_night = ?, is_available = ?
            WHERE id = ?
            "#,
        )
        .bind(&room_number)
        .bind(room_type.to_string())
        .bind(price_per_night)
        .bind(is_available)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(duplicate_room_number)?;

        self.get_room(id).await
    }

    // Bookings of the room go with it (ON DELETE CASCADE)
    pub async fn delete_room(&self, id: &str) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM room WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Room not found".into()));
        }

        log::info!("Deleted room {}", id);
        Ok(())
    }

    pub async fn rooms_by_hotel(&self, hotel_id: &str) -> AppResult<HotelRooms> {
        let hotel = self.hotel_service.get_hotel_summary(hotel_id).await?;

        let sql = format!("{} WHERE r.hotel_id = ? ORDER BY r.room_number ASC", ROOM_SELECT);
        let rows = sqlx::query_as::<_, RoomRow>(&sql)
            .bind(hotel_id)
            .fetch_all(&self.pool)
            .await?;

        let rooms = rows
            .into_iter()
            .map(Room::try_from)
            .collect::<AppResult<Vec<_>>>()?;

        Ok(HotelRooms { hotel, rooms })
    }

    async fn room_number_taken(
        &self,
        hotel_id: &str,
        room_number: &str,
        exclude_room_id: Option<&str>,
    ) -> AppResult<bool> {
        let existing: Option<String> = sqlx::query_scalar(
            r#"
            SELECT id FROM room
            WHERE hotel_id = ? AND room_number = ? AND (? IS NULL OR id <> ?)
            LIMIT 1
            "#,
        )
        .bind(hotel_id)
        .bind(room_number)
        .bind(exclude_room_id)
        .bind(exclude_room_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(existing.is_some())
    }
}

// A concurrent insert can still trip the (hotel_id, room_number) unique key
fn duplicate_room_number(err: sqlx::Error) -> AppError {
    match AppError::from(err) {
        AppError::Conflict(_) => AppError::Conflict(DUPLICATE_ROOM_NUMBER.into()),
        other => other,
    }
}
