pub mod airport;
pub mod trip;
pub mod user;

pub use airport::{AirportRow, CityQuery, CountryQuery};
pub use trip::{CountryTrip, Direction, MonthlyEmissions, NewTrip, Trip, YearlyEmissions};
pub use user::{AdminLogin, UserContext};
