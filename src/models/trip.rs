use std::fmt;

use chrono::NaiveDate;
use sqlx::FromRow;

/// Database trip model, as listed under "View Saved Trips"
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Trip {
    pub trip_id: i64,
    pub from_airport: String,
    pub to_airport: String,
    pub departure_date: NaiveDate,
    pub passengers: i64,
    pub emissions: f64,
}

/// Trip joined with the cities of both endpoints
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct CountryTrip {
    pub trip_id: i64,
    pub from_airport: String,
    pub from_city: String,
    pub to_airport: String,
    pub to_city: String,
    pub departure_date: NaiveDate,
    pub passengers: i64,
    pub emissions: f64,
}

/// A trip about to be recorded
#[derive(Debug, Clone, PartialEq)]
pub struct NewTrip {
    pub user_id: i64,
    pub from_airport: String,
    pub to_airport: String,
    pub departure_date: NaiveDate,
    pub passengers: i32,
}

#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct YearlyEmissions {
    pub year: i64,
    pub emissions: f64,
}

#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct MonthlyEmissions {
    pub month: i64,
    pub emissions: f64,
}

/// Which endpoint of a trip a country filter applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    From,
    To,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::From => f.write_str("from"),
            Direction::To => f.write_str("to"),
        }
    }
}
