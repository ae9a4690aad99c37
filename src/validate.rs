//! Input checks applied before anything reaches the database.
//!
//! Every function takes the raw console line and returns the normalized value
//! the gateway expects, or the rule that was violated.

use std::fmt;

use chrono::NaiveDate;

use crate::models::{CityQuery, CountryQuery, Direction};

pub const MIN_CREDENTIAL_LEN: usize = 3;
pub const MAX_CREDENTIAL_LEN: usize = 20;
pub const CODE_LEN: usize = 3;
/// Seats on the largest passenger aircraft in service.
pub const MAX_PASSENGERS: i32 = 853;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Credential {
    Username,
    Password,
}

impl fmt::Display for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Credential::Username => f.write_str("Username"),
            Credential::Password => f.write_str("Password"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("{0} must be at least 3 characters. Please try again.")]
    TooShort(Credential),
    #[error("{0} must be at most 20 characters. Please try again.")]
    TooLong(Credential),
    #[error("Airport ID must be 3 characters. Please try again.")]
    AirportCode,
    #[error("Aircraft IATA code should be 3 characters. Please try again.")]
    AircraftCode,
    #[error("Departure and destination airports must differ. Returning to main menu.")]
    SameAirport,
    #[error("Number of passengers must be a whole number.")]
    PassengersNotNumber,
    #[error("Number of passengers must be a non-negative value.")]
    PassengersNegative,
    #[error("Number of passengers must be a non-zero value.")]
    PassengersZero,
    #[error("Number of passengers is too large. The largest plane can only hold 853 passengers!")]
    PassengersTooMany,
    #[error("Please enter a valid numerical value.")]
    NotANumber,
    #[error("Emissions value must be greater than 0 and less than or equal to 1.")]
    EmissionsRange,
    #[error("Invalid date format. Please enter the date in YYYY-MM-DD format.")]
    Date,
    #[error("Year must be a 4-digit number (i.e., 2024).")]
    Year,
    #[error("Trip ID must be a positive whole number.")]
    TripId,
    #[error("Please enter a country name or ID.")]
    EmptyCountry,
}

fn credential(raw: &str, kind: Credential) -> Result<String, ValidationError> {
    let value = raw.trim();
    let len = value.chars().count();
    if len < MIN_CREDENTIAL_LEN {
        return Err(ValidationError::TooShort(kind));
    }
    if len > MAX_CREDENTIAL_LEN {
        return Err(ValidationError::TooLong(kind));
    }
    Ok(value.to_string())
}

/// Usernames are stored lowercase.
pub fn username(raw: &str) -> Result<String, ValidationError> {
    credential(&raw.to_lowercase(), Credential::Username)
}

pub fn password(raw: &str) -> Result<String, ValidationError> {
    credential(raw, Credential::Password)
}

fn code(raw: &str) -> Option<String> {
    let value = raw.trim().to_uppercase();
    (value.chars().count() == CODE_LEN).then_some(value)
}

pub fn airport_code(raw: &str) -> Result<String, ValidationError> {
    code(raw).ok_or(ValidationError::AirportCode)
}

pub fn aircraft_code(raw: &str) -> Result<String, ValidationError> {
    code(raw).ok_or(ValidationError::AircraftCode)
}

fn all_digits(value: &str) -> bool {
    !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit())
}

pub fn passengers(raw: &str) -> Result<i32, ValidationError> {
    let value = raw.trim();
    let count: i64 = match value.parse() {
        Ok(count) => count,
        // a digit string that overflows is still a whole number, just out of range
        Err(_) if all_digits(value) => return Err(ValidationError::PassengersTooMany),
        Err(_) if value.strip_prefix('-').is_some_and(all_digits) => {
            return Err(ValidationError::PassengersNegative);
        }
        Err(_) => return Err(ValidationError::PassengersNotNumber),
    };
    match count {
        c if c < 0 => Err(ValidationError::PassengersNegative),
        0 => Err(ValidationError::PassengersZero),
        c if c > MAX_PASSENGERS as i64 => Err(ValidationError::PassengersTooMany),
        c => Ok(c as i32),
    }
}

/// Emissions coefficient in (0, 1], rounded to cents.
pub fn emissions_per_mile(raw: &str) -> Result<f64, ValidationError> {
    let value: f64 = raw.trim().parse().map_err(|_| ValidationError::NotANumber)?;
    if !(value > 0.0 && value <= 1.0) {
        return Err(ValidationError::EmissionsRange);
    }
    let rounded = (value * 100.0).round() / 100.0;
    if rounded <= 0.0 {
        return Err(ValidationError::EmissionsRange);
    }
    Ok(rounded)
}

pub fn departure_date(raw: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_err(|_| ValidationError::Date)
}

pub fn year(raw: &str) -> Result<i32, ValidationError> {
    let value = raw.trim();
    if value.len() != 4 || !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ValidationError::Year);
    }
    match value.parse::<i32>() {
        Ok(y) if y >= 1 => Ok(y),
        _ => Err(ValidationError::Year),
    }
}

pub fn trip_id(raw: &str) -> Result<i64, ValidationError> {
    match raw.trim().parse::<i64>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(ValidationError::TripId),
    }
}

/// Two characters are read as an ISO country code, anything longer as a name.
pub fn country(raw: &str) -> Result<CountryQuery, ValidationError> {
    let value = raw.trim();
    match value.chars().count() {
        0 => Err(ValidationError::EmptyCountry),
        2 => Ok(CountryQuery::Code(value.to_uppercase())),
        _ => Ok(CountryQuery::Name(title_case(value))),
    }
}

pub fn city(raw: &str) -> CityQuery {
    let value = raw.trim();
    match value.chars().count() {
        1 => CityQuery::Initial(value.to_uppercase()),
        n if n >= 3 => CityQuery::Name(title_case(value)),
        _ => CityQuery::Any,
    }
}

pub fn direction(raw: &str) -> Option<Direction> {
    match raw.trim().to_lowercase().as_str() {
        "from" => Some(Direction::From),
        "to" => Some(Direction::To),
        _ => None,
    }
}

/// Capitalize the first letter of every alphabetic run and lowercase the rest.
pub fn title_case(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut in_word = false;
    for ch in value.chars() {
        if ch.is_alphabetic() {
            if in_word {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(ch);
            in_word = false;
        }
    }
    out
}
