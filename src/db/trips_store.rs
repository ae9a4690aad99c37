use async_trait::async_trait;
use sqlx::{Connection, MySqlConnection};

use crate::{
    db::{DbResult, Session},
    models::{AirportRow, CountryTrip, Direction, MonthlyEmissions, NewTrip, Trip, YearlyEmissions},
};

// Stored routines return whatever numeric type the schema declares, so scalar
// reads are cast to SIGNED / DOUBLE to decode into i64 / f64.

const TRIP_COLUMNS: &str = r#"
    CAST(t.trip_id AS SIGNED) AS trip_id,
    t.from_airport_id AS from_airport,
    t.to_airport_id AS to_airport,
    t.departure_date,
    CAST(t.num_passengers AS SIGNED) AS passengers,
    CAST(t.total_emissions AS DOUBLE) AS emissions
"#;

/// Session over a single MySQL connection
pub struct MySqlSession {
    conn: MySqlConnection,
}

impl MySqlSession {
    pub fn new(conn: MySqlConnection) -> Self {
        Self { conn }
    }

    async fn count(&mut self, query: &str, key: &str) -> DbResult<i64> {
        sqlx::query_scalar::<_, i64>(query)
            .bind(key)
            .fetch_one(&mut self.conn)
            .await
    }
}

#[async_trait]
impl Session for MySqlSession {
    async fn user_exists(&mut self, username: &str) -> DbResult<bool> {
        let count = self
            .count("SELECT COUNT(*) FROM users WHERE username = ?", username)
            .await?;
        Ok(count > 0)
    }

    async fn authenticate(&mut self, username: &str, password: &str) -> DbResult<bool> {
        tracing::info!("authenticate({})", username);
        let result = sqlx::query_scalar::<_, Option<i64>>("SELECT CAST(authenticate(?, ?) AS SIGNED)")
            .bind(username)
            .bind(password)
            .fetch_one(&mut self.conn)
            .await?;
        Ok(result.unwrap_or(0) != 0)
    }

    async fn is_admin(&mut self, username: &str) -> DbResult<bool> {
        let flag = sqlx::query_scalar::<_, Option<i64>>(
            "SELECT CAST(is_admin AS SIGNED) FROM users WHERE username = ?",
        )
        .bind(username)
        .fetch_optional(&mut self.conn)
        .await?;
        Ok(flag.flatten().unwrap_or(0) != 0)
    }

    async fn user_id(&mut self, username: &str) -> DbResult<Option<i64>> {
        sqlx::query_scalar::<_, i64>("SELECT CAST(user_id AS SIGNED) FROM users WHERE username = ?")
            .bind(username)
            .fetch_optional(&mut self.conn)
            .await
    }

    async fn add_user(&mut self, username: &str, password: &str) -> DbResult<()> {
        tracing::info!("sp_add_user({})", username);
        sqlx::query("CALL sp_add_user(?, ?)")
            .bind(username)
            .bind(password)
            .execute(&mut self.conn)
            .await?;
        Ok(())
    }

    async fn change_password(&mut self, username: &str, password: &str) -> DbResult<()> {
        tracing::info!("sp_change_password({})", username);
        sqlx::query("CALL sp_change_password(?, ?)")
            .bind(username)
            .bind(password)
            .execute(&mut self.conn)
            .await?;
        Ok(())
    }

    async fn grant_admin(&mut self, username: &str) -> DbResult<()> {
        tracing::info!("granting admin to {}", username);
        sqlx::query("UPDATE users SET is_admin = TRUE WHERE username = ?")
            .bind(username)
            .execute(&mut self.conn)
            .await?;
        Ok(())
    }

    async fn aircraft_exists(&mut self, aircraft_id: &str) -> DbResult<bool> {
        let count = self
            .count("SELECT COUNT(*) FROM aircrafts WHERE aircraft_id = ?", aircraft_id)
            .await?;
        Ok(count > 0)
    }

    async fn set_emissions_per_mile(&mut self, aircraft_id: &str, per_mile: f64) -> DbResult<()> {
        tracing::info!("aircraft {} emissions_per_mi = {:.2}", aircraft_id, per_mile);
        sqlx::query("UPDATE aircrafts SET emissions_per_mi = ? WHERE aircraft_id = ?")
            .bind(per_mile)
            .bind(aircraft_id)
            .execute(&mut self.conn)
            .await?;
        Ok(())
    }

    async fn airport_exists(&mut self, airport_id: &str) -> DbResult<bool> {
        let count = self
            .count("SELECT COUNT(*) FROM airports WHERE airport_id = ?", airport_id)
            .await?;
        Ok(count > 0)
    }

    async fn country_by_code(&mut self, code: &str) -> DbResult<Option<String>> {
        sqlx::query_scalar::<_, String>("SELECT country_name FROM countries WHERE country_id = ?")
            .bind(code)
            .fetch_optional(&mut self.conn)
            .await
    }

    async fn country_by_name(&mut self, name: &str) -> DbResult<Option<String>> {
        sqlx::query_scalar::<_, String>("SELECT country_name FROM countries WHERE country_name = ?")
            .bind(name)
            .fetch_optional(&mut self.conn)
            .await
    }

    async fn airports_in_country(&mut self, country: &str) -> DbResult<Vec<AirportRow>> {
        sqlx::query_as::<_, AirportRow>(
            "SELECT city, airport_id FROM airports WHERE country_name = ? ORDER BY city",
        )
        .bind(country)
        .fetch_all(&mut self.conn)
        .await
    }

    async fn airports_by_city_initial(&mut self, country: &str, initial: &str) -> DbResult<Vec<AirportRow>> {
        sqlx::query_as::<_, AirportRow>(
            "SELECT city, airport_id FROM airports WHERE country_name = ? AND city LIKE ? ORDER BY city",
        )
        .bind(country)
        .bind(format!("{}%", initial))
        .fetch_all(&mut self.conn)
        .await
    }

    async fn airports_in_city(&mut self, country: &str, city: &str) -> DbResult<Vec<String>> {
        sqlx::query_scalar::<_, String>(
            "SELECT airport_id FROM airports WHERE country_name = ? AND city = ? ORDER BY airport_id",
        )
        .bind(country)
        .bind(city)
        .fetch_all(&mut self.conn)
        .await
    }

    async fn route_exists(&mut self, from: &str, to: &str) -> DbResult<bool> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM routes WHERE from_airport_id = ? AND to_airport_id = ?",
        )
        .bind(from)
        .bind(to)
        .fetch_one(&mut self.conn)
        .await?;
        Ok(count > 0)
    }

    async fn add_route(&mut self, from: &str, to: &str, aircraft_id: &str) -> DbResult<()> {
        tracing::info!("adding route {} -> {} ({})", from, to, aircraft_id);
        sqlx::query("INSERT INTO routes (from_airport_id, to_airport_id, aircraft_id) VALUES (?, ?, ?)")
            .bind(from)
            .bind(to)
            .bind(aircraft_id)
            .execute(&mut self.conn)
            .await?;
        Ok(())
    }

    async fn trip_distance(&mut self, from: &str, to: &str) -> DbResult<Option<f64>> {
        sqlx::query_scalar::<_, Option<f64>>("SELECT CAST(get_trip_distance(?, ?) AS DOUBLE)")
            .bind(from)
            .bind(to)
            .fetch_one(&mut self.conn)
            .await
    }

    async fn route_emissions_per_mile(&mut self, from: &str, to: &str) -> DbResult<Option<f64>> {
        let per_mile = sqlx::query_scalar::<_, Option<f64>>(
            r#"
            SELECT CAST(a.emissions_per_mi AS DOUBLE)
            FROM routes r
            JOIN aircrafts a ON a.aircraft_id = r.aircraft_id
            WHERE r.from_airport_id = ? AND r.to_airport_id = ?
            "#,
        )
        .bind(from)
        .bind(to)
        .fetch_optional(&mut self.conn)
        .await?;
        Ok(per_mile.flatten())
    }

    async fn calculate_emissions(&mut self, distance: f64, per_mile: f64, passengers: i32) -> DbResult<f64> {
        let total = sqlx::query_scalar::<_, Option<f64>>(
            "SELECT CAST(calculate_trip_emissions(?, ?, ?) AS DOUBLE)",
        )
        .bind(distance)
        .bind(per_mile)
        .bind(passengers)
        .fetch_one(&mut self.conn)
        .await?;
        total.ok_or_else(|| sqlx::Error::Protocol("calculate_trip_emissions returned NULL".into()))
    }

    async fn recent_trips(&mut self, user_id: i64, limit: i64) -> DbResult<Vec<Trip>> {
        let query = format!(
            "SELECT {TRIP_COLUMNS} FROM trips t WHERE t.user_id = ? ORDER BY t.departure_date DESC, t.trip_id DESC LIMIT ?"
        );
        let mut trips = sqlx::query_as::<_, Trip>(&query)
            .bind(user_id)
            .bind(limit)
            .fetch_all(&mut self.conn)
            .await?;
        trips.reverse();
        Ok(trips)
    }

    async fn save_trip(&mut self, trip: &NewTrip, emissions: f64) -> DbResult<()> {
        tracing::info!(
            "saving trip {} -> {} for user {}",
            trip.from_airport,
            trip.to_airport,
            trip.user_id
        );
        sqlx::query(
            r#"
            INSERT INTO trips (user_id, from_airport_id, to_airport_id, departure_date, num_passengers, total_emissions)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(trip.user_id)
        .bind(&trip.from_airport)
        .bind(&trip.to_airport)
        .bind(trip.departure_date)
        .bind(trip.passengers)
        .bind(emissions)
        .execute(&mut self.conn)
        .await?;
        Ok(())
    }

    async fn add_trip(&mut self, trip: &NewTrip) -> DbResult<()> {
        tracing::info!(
            "sp_add_trip({}, {}, {}, {}, {})",
            trip.user_id,
            trip.from_airport,
            trip.to_airport,
            trip.departure_date,
            trip.passengers
        );
        sqlx::query("CALL sp_add_trip(?, ?, ?, ?, ?)")
            .bind(trip.user_id)
            .bind(&trip.from_airport)
            .bind(&trip.to_airport)
            .bind(trip.departure_date)
            .bind(trip.passengers)
            .execute(&mut self.conn)
            .await?;
        Ok(())
    }

    async fn trip_exists(&mut self, user_id: i64, trip_id: i64) -> DbResult<bool> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM trips WHERE trip_id = ? AND user_id = ?",
        )
        .bind(trip_id)
        .bind(user_id)
        .fetch_one(&mut self.conn)
        .await?;
        Ok(count > 0)
    }

    async fn delete_trip(&mut self, user_id: i64, trip_id: i64) -> DbResult<u64> {
        tracing::info!("deleting trip {} for user {}", trip_id, user_id);
        let result = sqlx::query("DELETE FROM trips WHERE trip_id = ? AND user_id = ?")
            .bind(trip_id)
            .bind(user_id)
            .execute(&mut self.conn)
            .await?;
        Ok(result.rows_affected())
    }

    async fn emissions_by_year(&mut self, user_id: i64, limit: i64) -> DbResult<Vec<YearlyEmissions>> {
        let mut years = sqlx::query_as::<_, YearlyEmissions>(
            r#"
            SELECT CAST(YEAR(departure_date) AS SIGNED) AS year,
                   CAST(SUM(total_emissions) AS DOUBLE) AS emissions
            FROM trips
            WHERE user_id = ?
            GROUP BY YEAR(departure_date)
            ORDER BY YEAR(departure_date) DESC
            LIMIT ?
            "#,
        )
        .bind(user_id)
        .bind(limit)
        .fetch_all(&mut self.conn)
        .await?;
        years.reverse();
        Ok(years)
    }

    async fn emissions_by_month(&mut self, user_id: i64, year: i32) -> DbResult<Vec<MonthlyEmissions>> {
        sqlx::query_as::<_, MonthlyEmissions>(
            r#"
            SELECT CAST(MONTH(departure_date) AS SIGNED) AS month,
                   CAST(SUM(total_emissions) AS DOUBLE) AS emissions
            FROM trips
            WHERE user_id = ? AND YEAR(departure_date) = ?
            GROUP BY MONTH(departure_date)
            ORDER BY MONTH(departure_date)
            "#,
        )
        .bind(user_id)
        .bind(year)
        .fetch_all(&mut self.conn)
        .await
    }

    async fn trips_by_country(
        &mut self,
        user_id: i64,
        country: &str,
        direction: Direction,
        limit: i64,
    ) -> DbResult<Vec<CountryTrip>> {
        let filter = match direction {
            Direction::From => "a1.country_name",
            Direction::To => "a2.country_name",
        };
        let query = format!(
            r#"
            SELECT CAST(t.trip_id AS SIGNED) AS trip_id,
                   t.from_airport_id AS from_airport, a1.city AS from_city,
                   t.to_airport_id AS to_airport, a2.city AS to_city,
                   t.departure_date,
                   CAST(t.num_passengers AS SIGNED) AS passengers,
                   CAST(t.total_emissions AS DOUBLE) AS emissions
            FROM trips t
            JOIN airports a1 ON t.from_airport_id = a1.airport_id
            JOIN airports a2 ON t.to_airport_id = a2.airport_id
            WHERE t.user_id = ? AND {filter} = ?
            ORDER BY t.departure_date DESC, t.trip_id DESC
            LIMIT ?
            "#
        );
        let mut trips = sqlx::query_as::<_, CountryTrip>(&query)
            .bind(user_id)
            .bind(country)
            .bind(limit)
            .fetch_all(&mut self.conn)
            .await?;
        trips.reverse();
        Ok(trips)
    }

    async fn close(self: Box<Self>) -> DbResult<()> {
        self.conn.close().await?;
        tracing::debug!("database connection closed");
        Ok(())
    }
}
