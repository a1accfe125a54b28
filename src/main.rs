use dotenv::dotenv;
use hotel_booking_system::build_rocket;
use hotel_booking_system::db::Database;
use hotel_booking_system::utils::config::AppConfig;

#[rocket::launch]
async fn rocket() -> _ {
    dotenv().ok();

    let config = AppConfig::from_env().expect("Invalid configuration");

    // Connect to the database
    let database = Database::new(&config)
        .await
        .expect("Failed to connect to database");

    database
        .migrate()
        .await
        .expect("Failed to run database migrations");

    build_rocket(database.get_pool().clone())
}
