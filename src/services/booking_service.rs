use crate::models::booking::{
    AvailabilityResponse, BookedStay, BookedStayRow, Booking, BookingFilter, BookingRow,
    BookingStatus, CreateBookingRequest, HotelBookings, RoomBookings, StayInterval,
    UpdateBookingRequest,
};
use crate::models::response::Page;
use crate::services::availability::{checked_total_price, find_conflicts};
use crate::services::hotel_service::HotelService;
use crate::services::room_service::RoomService;
use crate::utils::error::{AppError, AppResult};
use crate::utils::pagination::{PageMeta, PageQuery};
use rust_decimal::Decimal;
use sqlx::{MySql, MySqlConnection, MySqlPool, QueryBuilder};
use uuid::Uuid;

const BOOKING_SELECT: &str = r#"
    SELECT
        b.id,
        b.room_id,
        b.guest_name,
        b.guest_email,
        b.check_in,
        b.check_out,
        b.status,
        b.total_price,
        b.created_at,
        b.updated_at,
        r.room_number,
        r.room_type,
        r.hotel_id,
        h.name AS hotel_name
    FROM booking b
    JOIN room r ON r.id = b.room_id
    JOIN hotel h ON h.id = r.hotel_id
"#;

// The columns of a room the booking flow needs
#[derive(Debug, sqlx::FromRow)]
struct RoomRate {
    price_per_night: Decimal,
    is_available: bool,
}

impl RoomRate {
    fn ensure_bookable(&self) -> AppResult<()> {
        if !self.is_available {
            return Err(AppError::Conflict("Room is not available for booking".into()));
        }
        Ok(())
    }
}

pub struct BookingService {
    pool: MySqlPool,
    room_service: RoomService,
    hotel_service: HotelService,
}

impl BookingService {
    pub fn new(pool: MySqlPool) -> Self {
        BookingService {
            room_service: RoomService::new(pool.clone()),
            hotel_service: HotelService::new(pool.clone()),
            pool,
        }
    }

    // Check if room is available for the given stay
    pub async fn check_room_availability(
        &self,
        room_id: &str,
        stay: StayInterval,
        exclude_booking_id: Option<&str>,
    ) -> AppResult<AvailabilityResponse> {
        let mut conn = self.pool.acquire().await?;

        fetch_room(&mut conn, room_id, false).await?.ensure_bookable()?;
        let existing = active_stays(&mut conn, room_id, false).await?;

        let conflicting_bookings: Vec<BookedStay> =
            find_conflicts(&stay, &existing, exclude_booking_id)
                .into_iter()
                .cloned()
                .collect();

        Ok(AvailabilityResponse {
            available: conflicting_bookings.is_empty(),
            conflicting_bookings,
        })
    }

    pub async fn list_bookings(
        &self,
        filter: BookingFilter,
        query: PageQuery,
    ) -> AppResult<Page<Booking>> {
        let order = query.order.as_sql();

        let mut builder: QueryBuilder<MySql> = QueryBuilder::new(BOOKING_SELECT);
        push_filters(&mut builder, &filter);
        builder.push(format!(" ORDER BY b.created_at {}, b.id {}", order, order));
        builder.push(" LIMIT ").push_bind(query.limit());
        builder.push(" OFFSET ").push_bind(query.skip());

        let rows = builder
            .build_query_as::<BookingRow>()
            .fetch_all(&self.pool)
            .await?;

        let mut count: QueryBuilder<MySql> = QueryBuilder::new(
            "SELECT COUNT(*) FROM booking b JOIN room r ON r.id = b.room_id",
        );
        push_filters(&mut count, &filter);
        let total: i64 = count.build_query_scalar().fetch_one(&self.pool).await?;

        let items = rows
            .into_iter()
            .map(Booking::try_from)
            .collect::<AppResult<Vec<_>>>()?;
        let meta = PageMeta::new(&query, total as u64, items.len());

        Ok(Page { items, meta })
    }

    pub async fn get_booking(&self, id: &str) -> AppResult<Booking> {
        let sql = format!("{} WHERE b.id = ?", BOOKING_SELECT);
        let row = sqlx::query_as::<_, BookingRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Booking not found".into()))?;

        Booking::try_from(row)
    }

    pub async fn create_booking(&self, request: CreateBookingRequest) -> AppResult<Booking> {
        let stay = request.stay();
        let mut tx = self.pool.begin().await?;

        // Lock the room row so concurrent bookings for it run one at a time
        let room = fetch_room(&mut tx, &request.room_id, true).await?;
        room.ensure_bookable()?;

        if request.status.is_active() {
            let existing = active_stays(&mut tx, &request.room_id, true).await?;
            if !find_conflicts(&stay, &existing, None).is_empty() {
                return Err(AppError::Conflict(
                    "Room is not available for the selected dates".into(),
                ));
            }
        }

        let total_price = checked_total_price(room.price_per_night, &stay)?;
        let id = Uuid::new_v4().to_string();

        sqlx::query(
            r#"
            INSERT INTO booking (id, room_id, guest_name, guest_email, check_in, check_out, status, total_price)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&id)
        .bind(&request.room_id)
        .bind(&request.guest_name)
        .bind(&request.guest_email)
        .bind(stay.check_in)
        .bind(stay.check_out)
        .bind(request.status.to_string())
        .bind(total_price)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        log::info!(
            "Booked room {} for {} from {} to {} ({})",
            request.room_id,
            request.guest_email,
            stay.check_in,
            stay.check_out,
            total_price
        );

        self.get_booking(&id).await
    }

    pub async fn update_booking(
        &self,
        id: &str,
        request: UpdateBookingRequest,
    ) -> AppResult<Booking> {
        // A booking never moves to another room
        let room_id: String = sqlx::query_scalar("SELECT room_id FROM booking WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Booking not found".into()))?;

        let mut tx = self.pool.begin().await?;

        // Room first, then its bookings: the same lock order as create_booking.
        // Every read below is a locking read and sees the latest committed rows.
        let room = fetch_room(&mut tx, &room_id, true)
            .await
            .map_err(|e| match e {
                AppError::NotFound(_) => AppError::NotFound("Booking not found".into()),
                other => other,
            })?;

        let current: BookedStay = sqlx::query_as::<_, BookedStayRow>(
            "SELECT id, status, check_in, check_out FROM booking WHERE id = ? FOR UPDATE",
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound("Booking not found".into()))?
        .try_into()?;

        let stay = StayInterval::new(
            request.check_in.unwrap_or(current.check_in),
            request.check_out.unwrap_or(current.check_out),
        );
        if !stay.is_valid() {
            return Err(AppError::invalid_field(
                "checkOut",
                "Check-out date must be after check-in date",
            ));
        }

        let status = request.status.unwrap_or(current.status);
        let reactivated = !current.status.is_active() && status.is_active();
        let dates_changed = request.changes_dates();

        if (dates_changed || reactivated) && status.is_active() {
            room.ensure_bookable()?;

            let existing = active_stays(&mut tx, &room_id, true).await?;
            if !find_conflicts(&stay, &existing, Some(id)).is_empty() {
                return Err(AppError::Conflict(
                    "Room is not available for the updated dates".into(),
                ));
            }
        }

        let total_price = if dates_changed {
            Some(checked_total_price(room.price_per_night, &stay)?)
        } else {
            None
        };

        let mut builder: QueryBuilder<MySql> = QueryBuilder::new("UPDATE booking SET status = ");
        builder.push_bind(status.to_string());
        builder.push(", check_in = ").push_bind(stay.check_in);
        builder.push(", check_out = ").push_bind(stay.check_out);
        if let Some(guest_name) = request.guest_name {
            builder.push(", guest_name = ").push_bind(guest_name);
        }
        if let Some(guest_email) = request.guest_email {
            builder.push(", guest_email = ").push_bind(guest_email);
        }
        if let Some(total_price) = total_price {
            builder.push(", total_price = ").push_bind(total_price);
        }
        builder.push(" WHERE id = ").push_bind(id);

        builder.build().execute(&mut *tx).await?;
        tx.commit().await?;

        self.get_booking(id).await
    }

    pub async fn delete_booking(&self, id: &str) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM booking WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Booking not found".into()));
        }

        log::info!("Deleted booking {}", id);
        Ok(())
    }

    pub async fn bookings_by_room(&self, room_id: &str) -> AppResult<RoomBookings> {
        let room = self.room_service.get_room(room_id).await?;

        let sql = format!("{} WHERE b.room_id = ? ORDER BY b.check_in ASC", BOOKING_SELECT);
        let bookings = sqlx::query_as::<_, BookingRow>(&sql)
            .bind(room_id)
            .fetch_all(&self.pool)
            .await?
            .into_iter()
            .map(Booking::try_from)
            .collect::<AppResult<Vec<_>>>()?;

        Ok(RoomBookings { room, bookings })
    }

    pub async fn bookings_by_hotel(&self, hotel_id: &str) -> AppResult<HotelBookings> {
        let hotel = self.hotel_service.get_hotel_summary(hotel_id).await?;

        let sql = format!("{} WHERE r.hotel_id = ? ORDER BY b.check_in ASC", BOOKING_SELECT);
        let bookings = sqlx::query_as::<_, BookingRow>(&sql)
            .bind(hotel_id)
            .fetch_all(&self.pool)
            .await?
            .into_iter()
            .map(Booking::try_from)
            .collect::<AppResult<Vec<_>>>()?;

        Ok(HotelBookings { hotel, bookings })
    }
}

// Load a room, optionally locking its row until the surrounding transaction
// ends
async fn fetch_room(
    conn: &mut MySqlConnection,
    room_id: &str,
    for_update: bool,
) -> AppResult<RoomRate> {
    let sql = if for_update {
        "SELECT price_per_night, is_available FROM room WHERE id = ? FOR UPDATE"
    } else {
        "SELECT price_per_night, is_available FROM room WHERE id = ?"
    };

    sqlx::query_as::<_, RoomRate>(sql)
        .bind(room_id)
        .fetch_optional(&mut *conn)
        .await?
        .ok_or_else(|| AppError::NotFound("Room not found".into()))
}

// With `locking` the rows are read FOR SHARE, so a booking transaction sees
// every booking committed while it waited for the room lock
async fn active_stays(
    conn: &mut MySqlConnection,
    room_id: &str,
    locking: bool,
) -> AppResult<Vec<BookedStay>> {
    let sql = format!(
        "SELECT id, status, check_in, check_out FROM booking WHERE room_id = ? AND status IN (?, ?){}",
        if locking { " FOR SHARE" } else { "" }
    );

    let rows = sqlx::query_as::<_, BookedStayRow>(&sql)
        .bind(room_id)
        .bind(BookingStatus::Pending.to_string())
        .bind(BookingStatus::Confirmed.to_string())
        .fetch_all(&mut *conn)
        .await?;

    rows.into_iter().map(BookedStay::try_from).collect()
}

fn push_filters(builder: &mut QueryBuilder<'_, MySql>, filter: &BookingFilter) {
    builder.push(" WHERE 1 = 1");

    if let Some(room_id) = &filter.room_id {
        builder.push(" AND b.room_id = ").push_bind(room_id.clone());
    }
    if let Some(hotel_id) = &filter.hotel_id {
        builder.push(" AND r.hotel_id = ").push_bind(hotel_id.clone());
    }
    if let Some(status) = filter.status {
        builder.push(" AND b.status = ").push_bind(status.to_string());
    }
    if let Some(guest_email) = &filter.guest_email {
        builder.push(" AND b.guest_email = ").push_bind(guest_email.clone());
    }
    if let Some(from) = filter.check_in_from {
        builder.push(" AND b.check_in >= ").push_bind(from);
    }
    if let Some(to) = filter.check_in_to {
        builder.push(" AND b.check_in <= ").push_bind(to);
    }
}
