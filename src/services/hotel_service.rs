use crate::models::hotel::{CreateHotelRequest, Hotel, HotelRow, HotelSummary, UpdateHotelRequest};
use crate::models::response::Page;
use crate::utils::error::{AppError, AppResult};
use crate::utils::pagination::{PageMeta, PageQuery};
use sqlx::MySqlPool;
use uuid::Uuid;

const HOTEL_COLUMNS: &str = "id, name, description, amenities, created_at, updated_at";

pub struct HotelService {
    pool: MySqlPool,
}

impl HotelService {
    pub fn new(pool: MySqlPool) -> Self {
        HotelService { pool }
    }

    // List one page of hotels ordered by creation time
    pub async fn list_hotels_paged(&self, query: PageQuery) -> AppResult<Page<Hotel>> {
        let order = query.order.as_sql();
        let sql = format!(
            "SELECT {} FROM hotel ORDER BY created_at {}, id {} LIMIT ? OFFSET ?",
            HOTEL_COLUMNS, order, order
        );

        let rows = sqlx::query_as::<_, HotelRow>(&sql)
            .bind(query.limit())
            .bind(query.skip())
            .fetch_all(&self.pool)
            .await?;

        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM hotel")
            .fetch_one(&self.pool)
            .await?;

        let items = rows
            .into_iter()
            .map(Hotel::try_from)
            .collect::<AppResult<Vec<_>>>()?;
        let meta = PageMeta::new(&query, total as u64, items.len());

        Ok(Page { items, meta })
    }

    pub async fn get_hotel(&self, id: &str) -> AppResult<Hotel> {
        let sql = format!("SELECT {} FROM hotel WHERE id = ?", HOTEL_COLUMNS);
        let row = sqlx::query_as::<_, HotelRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Hotel not found".into()))?;

        Hotel::try_from(row)
    }

    pub async fn get_hotel_summary(&self, id: &str) -> AppResult<HotelSummary> {
        sqlx::query_as::<_, HotelSummary>("SELECT id, name FROM hotel WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Hotel not found".into()))
    }

    pub async fn create_hotel(&self, request: CreateHotelRequest) -> AppResult<Hotel> {
        let id = Uuid::new_v4().to_string();
        let amenities = serde_json::to_string(&request.amenities)?;

        sqlx::query("INSERT INTO hotel (id, name, description, amenities) VALUES (?, ?, ?, ?)")
            .bind(&id)
            .bind(&request.name)
            .bind(&request.description)
            .bind(&amenities)
            .execute(&self.pool)
            .await?;

        log::info!("Created hotel {} ({})", id, request.name);

        self.get_hotel(&id).await
    }

    pub async fn update_hotel(&self, id: &str, request: UpdateHotelRequest) -> AppResult<Hotel> {
        let existing = self.get_hotel(id).await?;

        let name = request.name.unwrap_or(existing.name);
        let description = request.description.unwrap_or(existing.description);
        let amenities = serde_json::to_string(&request.amenities.unwrap_or(existing.amenities))?;

        sqlx::query("UPDATE hotel SET name = ?, description = ?, amenities = ? WHERE id = ?")
            .bind(&name)
            .bind(&description)
            .bind(&amenities)
            .bind(id)
            .execute(&self.pool)
            .await?;

        self.get_hotel(id).await
    }

    // Rooms and their bookings go with the hotel (ON DELETE CASCADE)
    pub async fn delete_hotel(&self, id: &str) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM hotel WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Hotel not found".into()));
        }

        log::info!("Deleted hotel {}", id);
        Ok(())
    }
}
