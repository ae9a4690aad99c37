use crate::{
    console::Console,
    db::{Gateway, Session},
    error::{AppError, Result},
    format,
    handlers::release,
    models::{CityQuery, CountryQuery},
    validate,
};

/// Look up the stored country name for a code or a (title-cased) name.
/// `subject` names what was being searched for in the not-found message.
pub async fn resolve_country(
    session: &mut dyn Session,
    query: &CountryQuery,
    subject: &str,
) -> Result<String> {
    let (found, kind) = match query {
        CountryQuery::Code(code) => (session.country_by_code(code).await, "ID"),
        CountryQuery::Name(name) => (session.country_by_name(name).await, "name"),
    };
    found
        .map_err(AppError::Access)?
        .ok_or_else(|| AppError::NotFound(format!("No {} found for the given country {}.", subject, kind)))
}

/// Read-only search of airports by country and city.
pub async fn find_airport(gateway: &dyn Gateway, console: &mut dyn Console) -> Result<()> {
    let raw = console.read("Enter a country name or country ID (ISO 2-letter code)")?;
    let query = validate::country(&raw)?;

    let mut session = gateway.open().await.map_err(AppError::Access)?;
    let country = resolve_country(session.as_mut(), &query, "airports").await?;

    console.say("Enter a city name or first letter of the city");
    let raw = console.read(&format!("(Enter blank for all airports in {})", country))?;

    match validate::city(&raw) {
        CityQuery::Initial(initial) => {
            let airports = session
                .airports_by_city_initial(&country, &initial)
                .await
                .map_err(AppError::Access)?;
            if airports.is_empty() {
                return Err(AppError::NotFound(
                    "No cities found in the given country with that first letter.".to_string(),
                ));
            }
            console.say(&format!(
                "\nMatching Airports in {} in Cities Starting with `{}`",
                country, initial
            ));
            console.say(&format::airport_list(&airports));
        }
        CityQuery::Name(city) => {
            let codes = session
                .airports_in_city(&country, &city)
                .await
                .map_err(AppError::Access)?;
            if codes.is_empty() {
                return Err(AppError::NotFound(
                    "No airport found for the given city.".to_string(),
                ));
            }
            console.say(&format!("\nMatching Airports in {}, {}", city, country));
            console.say(&format::airport_codes(&codes));
        }
        CityQuery::Any => {
            let airports = session
                .airports_in_country(&country)
                .await
                .map_err(AppError::Access)?;
            if airports.is_empty() {
                return Err(AppError::NotFound(
                    "No airports found for the given country.".to_string(),
                ));
            }
            console.say(&format!("\nMatching Airports in {}", country));
            console.say(&format::airport_list(&airports));
        }
    }
    release(session).await;
    Ok(())
}
