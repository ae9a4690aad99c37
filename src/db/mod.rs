use async_trait::async_trait;
use sqlx::mysql::MySqlConnectOptions;
use sqlx::{ConnectOptions, Connection, MySqlConnection};

use crate::config::Config;
use crate::models::{AirportRow, CountryTrip, Direction, MonthlyEmissions, NewTrip, Trip, YearlyEmissions};

pub mod trips_store;

pub use trips_store::MySqlSession;

/// Row cap for every "most recent" listing.
pub const RECENT_LIMIT: i64 = 10;

pub type DbResult<T> = Result<T, sqlx::Error>;

/// Hands out one scoped session per menu operation.
#[async_trait]
pub trait Gateway: Send + Sync {
    async fn open(&self) -> DbResult<Box<dyn Session>>;
}

/// One live connection. Dropping the box releases it, so every early return
/// in a handler gives the connection back.
#[async_trait]
pub trait Session: Send {
    // users
    async fn user_exists(&mut self, username: &str) -> DbResult<bool>;
    async fn authenticate(&mut self, username: &str, password: &str) -> DbResult<bool>;
    async fn is_admin(&mut self, username: &str) -> DbResult<bool>;
    async fn user_id(&mut self, username: &str) -> DbResult<Option<i64>>;
    async fn add_user(&mut self, username: &str, password: &str) -> DbResult<()>;
    async fn change_password(&mut self, username: &str, password: &str) -> DbResult<()>;
    async fn grant_admin(&mut self, username: &str) -> DbResult<()>;

    // aircraft
    async fn aircraft_exists(&mut self, aircraft_id: &str) -> DbResult<bool>;
    async fn set_emissions_per_mile(&mut self, aircraft_id: &str, per_mile: f64) -> DbResult<()>;

    // airports and countries
    async fn airport_exists(&mut self, airport_id: &str) -> DbResult<bool>;
    async fn country_by_code(&mut self, code: &str) -> DbResult<Option<String>>;
    async fn country_by_name(&mut self, name: &str) -> DbResult<Option<String>>;
    async fn airports_in_country(&mut self, country: &str) -> DbResult<Vec<AirportRow>>;
    async fn airports_by_city_initial(&mut self, country: &str, initial: &str) -> DbResult<Vec<AirportRow>>;
    async fn airports_in_city(&mut self, country: &str, city: &str) -> DbResult<Vec<String>>;

    // routes
    async fn route_exists(&mut self, from: &str, to: &str) -> DbResult<bool>;
    async fn add_route(&mut self, from: &str, to: &str, aircraft_id: &str) -> DbResult<()>;
    /// `None` when no route connects the two airports.
    async fn trip_distance(&mut self, from: &str, to: &str) -> DbResult<Option<f64>>;
    async fn route_emissions_per_mile(&mut self, from: &str, to: &str) -> DbResult<Option<f64>>;
    async fn calculate_emissions(&mut self, distance: f64, per_mile: f64, passengers: i32) -> DbResult<f64>;

    // trips
    async fn recent_trips(&mut self, user_id: i64, limit: i64) -> DbResult<Vec<Trip>>;
    async fn save_trip(&mut self, trip: &NewTrip, emissions: f64) -> DbResult<()>;
    async fn add_trip(&mut self, trip: &NewTrip) -> DbResult<()>;
    async fn trip_exists(&mut self, user_id: i64, trip_id: i64) -> DbResult<bool>;
    async fn delete_trip(&mut self, user_id: i64, trip_id: i64) -> DbResult<u64>;
    async fn emissions_by_year(&mut self, user_id: i64, limit: i64) -> DbResult<Vec<YearlyEmissions>>;
    async fn emissions_by_month(&mut self, user_id: i64, year: i32) -> DbResult<Vec<MonthlyEmissions>>;
    async fn trips_by_country(
        &mut self,
        user_id: i64,
        country: &str,
        direction: Direction,
        limit: i64,
    ) -> DbResult<Vec<CountryTrip>>;

    /// Graceful release. Dropping the session without it still frees the
    /// connection.
    async fn close(self: Box<Self>) -> DbResult<()>;
}

/// Gateway over a fresh MySQL connection per session. No pooling.
pub struct MySqlGateway {
    options: MySqlConnectOptions,
}

impl MySqlGateway {
    pub fn new(config: &Config) -> Self {
        Self {
            options: config.connect_options(),
        }
    }

    /// Start-up probe: connect, ping, disconnect.
    pub async fn ping(&self) -> DbResult<()> {
        let mut conn = self.options.connect().await?;
        conn.ping().await?;
        conn.close().await
    }
}

#[async_trait]
impl Gateway for MySqlGateway {
    async fn open(&self) -> DbResult<Box<dyn Session>> {
        let conn = MySqlConnection::connect_with(&self.options).await?;
        tracing::debug!("database connection opened");
        Ok(Box::new(MySqlSession::new(conn)))
    }
}
