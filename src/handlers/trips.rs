use crate::{
    console::Console,
    db::{Gateway, RECENT_LIMIT},
    error::{AppError, Result},
    format,
    handlers::{airports::resolve_country, release, settle},
    models::{Direction, NewTrip, UserContext},
    validate,
};

const NO_ROUTE: &str = "No flight route found between these airports.\n\
If you would like to update the database with this flight route,\n\
please contact your system administrator.";

const SAVE_MENU: &str = "\n-----------------Would you like to save this trip?-----------------\n\
1. Save Trip\n\
2. Go Back to Main Menu";

const VIEW_MENU: &str = "\n-------------------View Trip Aggregate Emissions-------------------\n\
1. View Trip Emissions by Year\n\
2. View Trip Emissions by Month\n\
3. View Trips to/from a Country\n\
4. Go Back to Main Menu";

const INVALID_OPTION: &str = "Invalid option. Please try again.";

/// Both endpoints of a trip, validated in one go.
fn read_airports(console: &mut dyn Console) -> Result<(String, String)> {
    let from = console.read("Enter departure airport ID (i.e., LAX)")?;
    let to = console.read("Enter destination airport ID (i.e., JFK)")?;
    Ok((validate::airport_code(&from)?, validate::airport_code(&to)?))
}

fn read_passengers(console: &mut dyn Console) -> Result<i32> {
    let raw = console.read("Enter the number of passengers")?;
    Ok(validate::passengers(&raw)?)
}

fn read_date(console: &mut dyn Console) -> Result<chrono::NaiveDate> {
    let raw = console.read("Enter departure date (YYYY-MM-DD)")?;
    Ok(validate::departure_date(&raw)?)
}

/// Estimate a flight's emissions and offer to save it as a trip.
pub async fn estimate_emissions(
    gateway: &dyn Gateway,
    console: &mut dyn Console,
    user: &UserContext,
) -> Result<()> {
    let (from, to) = read_airports(console)?;
    let passengers = read_passengers(console)?;

    let total = {
        let mut session = gateway.open().await.map_err(AppError::Access)?;
        let distance = session
            .trip_distance(&from, &to)
            .await
            .map_err(AppError::Access)?
            .ok_or_else(|| AppError::NotFound(NO_ROUTE.to_string()))?;
        let per_mile = session
            .route_emissions_per_mile(&from, &to)
            .await
            .map_err(AppError::Access)?
            .ok_or_else(|| AppError::NotFound("No emission data available for this route.".to_string()))?;
        let total = session
            .calculate_emissions(distance, per_mile, passengers)
            .await
            .map_err(AppError::Access)?;
        release(session).await;
        total
    };

    console.say(&format!(
        "\nEstimated emissions for flight from {} to {}: {} kg CO₂\n",
        from,
        to,
        format::emissions(total)
    ));

    save_trip_menu(gateway, console, user, &from, &to, passengers, total).await
}

async fn save_trip_menu(
    gateway: &dyn Gateway,
    console: &mut dyn Console,
    user: &UserContext,
    from: &str,
    to: &str,
    passengers: i32,
    total: f64,
) -> Result<()> {
    loop {
        console.say(SAVE_MENU);
        match console.read("Select an option")?.trim() {
            "1" => {
                let departure_date = match read_date(console) {
                    Ok(date) => date,
                    Err(err) if err.is_fatal() => return Err(err),
                    Err(err) => {
                        console.say(&err.to_string());
                        continue;
                    }
                };
                let trip = NewTrip {
                    user_id: user.user_id,
                    from_airport: from.to_string(),
                    to_airport: to.to_string(),
                    departure_date,
                    passengers,
                };
                let mut session = gateway.open().await.map_err(AppError::Access)?;
                session.save_trip(&trip, total).await.map_err(AppError::Update)?;
                release(session).await;
                console.say("Trip successfully saved!");
                return Ok(());
            }
            "2" => {
                console.say("Returning to main menu...");
                return Ok(());
            }
            _ => console.say(INVALID_OPTION),
        }
    }
}

/// List the ten most recent trips, then offer the aggregate views.
pub async fn view_trips(gateway: &dyn Gateway, console: &mut dyn Console, user: &UserContext) -> Result<()> {
    let trips = {
        let mut session = gateway.open().await.map_err(AppError::Access)?;
        let trips = session
            .recent_trips(user.user_id, RECENT_LIMIT)
            .await
            .map_err(AppError::Access)?;
        release(session).await;
        trips
    };

    if trips.is_empty() {
        console.say("No saved trips found.");
        return Ok(());
    }

    console.say(&format!("\nYour Last {} Trips:\n", RECENT_LIMIT));
    console.say(&format::trips_table(&trips));
    console.say(&format!(
        "\nTotal CO₂ Emissions from These Trips: {} kg\n",
        format::emissions(format::total(&trips, |t| t.emissions))
    ));

    loop {
        console.say(VIEW_MENU);
        match console.read("Select an option")?.trim() {
            "1" => {
                let outcome = emissions_by_year(gateway, console, user).await;
                settle(console, outcome)?;
            }
            "2" => {
                let outcome = emissions_by_month(gateway, console, user).await;
                settle(console, outcome)?;
            }
            "3" => {
                let outcome = trips_by_country(gateway, console, user).await;
                settle(console, outcome)?;
            }
            "4" => return Ok(()),
            _ => console.say(INVALID_OPTION),
        }
    }
}

pub async fn emissions_by_year(gateway: &dyn Gateway, console: &mut dyn Console, user: &UserContext) -> Result<()> {
    let mut session = gateway.open().await.map_err(AppError::Access)?;
    let years = session
        .emissions_by_year(user.user_id, RECENT_LIMIT)
        .await
        .map_err(AppError::Access)?;
    release(session).await;

    if years.is_empty() {
        console.say("No trips found.");
        return Ok(());
    }

    console.say(&format!("\nTrip Emissions by Year ({} Most Recent Years):\n", RECENT_LIMIT));
    console.say(&format::yearly_table(&years));
    console.say(&format!(
        "\nTotal Emissions from Your {} Most Recent Years: {} kg CO₂\n",
        RECENT_LIMIT,
        format::emissions(format::total(&years, |y| y.emissions))
    ));
    Ok(())
}

pub async fn emissions_by_month(gateway: &dyn Gateway, console: &mut dyn Console, user: &UserContext) -> Result<()> {
    let raw = console.read("Enter the year to view emissions (i.e., 2024)")?;
    let year = validate::year(&raw)?;

    let mut session = gateway.open().await.map_err(AppError::Access)?;
    let months = session
        .emissions_by_month(user.user_id, year)
        .await
        .map_err(AppError::Access)?;
    release(session).await;

    if months.is_empty() {
        console.say(&format!("No trips found for the year {}.", year));
        return Ok(());
    }

    console.say(&format!("\nTrip Emissions by Month for {}:\n", year));
    console.say(&format::monthly_table(&months));
    console.say(&format!(
        "\nTotal Emissions for {}: {} kg CO₂\n",
        year,
        format::emissions(format::total(&months, |m| m.emissions))
    ));
    Ok(())
}

pub async fn trips_by_country(gateway: &dyn Gateway, console: &mut dyn Console, user: &UserContext) -> Result<()> {
    let raw = console.read("Enter a country name or country ID (ISO 2-letter code)")?;
    let query = validate::country(&raw)?;

    let mut session = gateway.open().await.map_err(AppError::Access)?;
    let country = resolve_country(session.as_mut(), &query, "trips").await?;

    let direction: Direction = loop {
        let raw = console.read(
            "Do you want to see trips departing FROM or arriving TO this country? (Enter 'from' or 'to')",
        )?;
        match validate::direction(&raw) {
            Some(direction) => break direction,
            None => console.say("Invalid input. Please enter 'from' or 'to'."),
        }
    };

    let trips = session
        .trips_by_country(user.user_id, &country, direction, RECENT_LIMIT)
        .await
        .map_err(AppError::Access)?;
    release(session).await;

    if trips.is_empty() {
        console.say(&format!("No trips found {} {}.", direction, country));
        return Ok(());
    }

    console.say(&format!("\n{} Most Recent Trips {} {}:\n", RECENT_LIMIT, direction, country));
    console.say(&format::country_trips_table(&trips));
    console.say(&format!(
        "\nTotal Emissions from Trips {} {}: {} kg CO₂\n",
        direction,
        country,
        format::emissions(format::total(&trips, |t| t.emissions))
    ));
    Ok(())
}

/// Record a trip; `sp_add_trip` computes its emissions.
pub async fn insert_trip(gateway: &dyn Gateway, console: &mut dyn Console, user: &UserContext) -> Result<()> {
    let (from, to) = read_airports(console)?;
    let departure_date = read_date(console)?;
    let passengers = read_passengers(console)?;

    let mut session = gateway.open().await.map_err(AppError::Access)?;
    if session
        .trip_distance(&from, &to)
        .await
        .map_err(AppError::Access)?
        .is_none()
    {
        return Err(AppError::NotFound(NO_ROUTE.to_string()));
    }

    let trip = NewTrip {
        user_id: user.user_id,
        from_airport: from,
        to_airport: to,
        departure_date,
        passengers,
    };
    session.add_trip(&trip).await.map_err(AppError::Update)?;
    release(session).await;
    console.say("Trip successfully inserted!");
    Ok(())
}

pub async fn delete_trip(gateway: &dyn Gateway, console: &mut dyn Console, user: &UserContext) -> Result<()> {
    const NO_SUCH_TRIP: &str = "No trip with that ID was found in your saved trips.";

    let mut session = gateway.open().await.map_err(AppError::Access)?;
    let trips = session
        .recent_trips(user.user_id, RECENT_LIMIT)
        .await
        .map_err(AppError::Access)?;
    if trips.is_empty() {
        release(session).await;
        console.say("No saved trips found.");
        return Ok(());
    }

    console.say(&format!("\nYour Last {} Trips:\n", RECENT_LIMIT));
    console.say(&format::trips_table(&trips));

    let raw = console.read("Enter the ID of the trip to delete")?;
    let trip_id = validate::trip_id(&raw)?;

    if !session
        .trip_exists(user.user_id, trip_id)
        .await
        .map_err(AppError::Access)?
    {
        return Err(AppError::NotFound(NO_SUCH_TRIP.to_string()));
    }

    let deleted = session
        .delete_trip(user.user_id, trip_id)
        .await
        .map_err(AppError::Update)?;
    release(session).await;
    if deleted == 0 {
        return Err(AppError::NotFound(NO_SUCH_TRIP.to_string()));
    }
    console.say("Trip successfully deleted!");
    Ok(())
}
