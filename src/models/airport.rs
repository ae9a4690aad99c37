use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct AirportRow {
    pub city: String,
    pub airport_id: String,
}

/// How the user named a country: ISO code or full name
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CountryQuery {
    Code(String),
    Name(String),
}

/// City filter for the airport search
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CityQuery {
    /// Every airport in the country
    Any,
    /// Cities starting with this letter
    Initial(String),
    /// Exact city name
    Name(String),
}
