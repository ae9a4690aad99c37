use crate::{
    console::Console,
    db::{Gateway, Session},
    error::{AppError, Result},
    handlers::release,
    models::AdminLogin,
    validate::{self, ValidationError},
};

const NO_SUCH_USER: &str = "This username does not exist. Please input a valid username.";

/// Admin login gate: valid credentials and the admin flag.
pub async fn login(gateway: &dyn Gateway, console: &mut dyn Console) -> Result<AdminLogin> {
    console.say("\n------------------- Admin Login ------------------");
    let username = console.read("Enter admin username")?.trim().to_lowercase();
    let password = console.read_secret("Enter admin password")?;

    let mut session = gateway.open().await.map_err(AppError::Access)?;

    if !session
        .authenticate(&username, &password)
        .await
        .map_err(AppError::Access)?
    {
        release(session).await;
        console.say("Error: Invalid credentials. Exiting.");
        return Ok(AdminLogin::InvalidCredentials);
    }

    let is_admin = session.is_admin(&username).await.map_err(AppError::Access)?;
    release(session).await;
    if !is_admin {
        console.say("Error: User does not have admin privileges. Exiting.");
        return Ok(AdminLogin::NotAdmin);
    }

    tracing::info!("admin {} logged in", username);
    console.say("Admin login successful.");
    Ok(AdminLogin::Granted)
}

async fn ensure_user_exists(session: &mut dyn Session, username: &str) -> Result<()> {
    if !session.user_exists(username).await.map_err(AppError::Access)? {
        return Err(AppError::NotFound(NO_SUCH_USER.to_string()));
    }
    Ok(())
}

pub async fn reset_user_password(gateway: &dyn Gateway, console: &mut dyn Console) -> Result<()> {
    let raw = console.read("Enter the username to reset the password for")?;
    let username = validate::username(&raw)?;
    let mut session = gateway.open().await.map_err(AppError::Access)?;
    ensure_user_exists(session.as_mut(), &username).await?;

    let raw = console.read_secret("Enter the new password (3-20 characters)")?;
    let password = validate::password(&raw)?;

    session
        .change_password(&username, &password)
        .await
        .map_err(AppError::Update)?;
    release(session).await;
    console.say("Password successfully reset!");
    Ok(())
}

pub async fn set_user_to_admin(gateway: &dyn Gateway, console: &mut dyn Console) -> Result<()> {
    let raw = console.read("Enter the username to set as an admin")?;
    let username = validate::username(&raw)?;
    let mut session = gateway.open().await.map_err(AppError::Access)?;
    ensure_user_exists(session.as_mut(), &username).await?;

    if session.is_admin(&username).await.map_err(AppError::Access)? {
        return Err(AppError::Duplicate(
            "Username is already an admin. Returning to main menu.".to_string(),
        ));
    }

    session.grant_admin(&username).await.map_err(AppError::Update)?;
    release(session).await;
    console.say(&format!("User '{}' is now an admin.", username));
    Ok(())
}

pub async fn update_aircraft_emissions(gateway: &dyn Gateway, console: &mut dyn Console) -> Result<()> {
    let raw = console.read("Enter the aircraft ID to update emissions for")?;
    let aircraft_id = validate::aircraft_code(&raw)?;

    let mut session = gateway.open().await.map_err(AppError::Access)?;
    if !session
        .aircraft_exists(&aircraft_id)
        .await
        .map_err(AppError::Access)?
    {
        return Err(AppError::NotFound(
            "Aircraft ID not found. Returning to the main menu.".to_string(),
        ));
    }

    let per_mile = loop {
        let raw = console.read("Enter the new emissions value (0.0 - 1.0)")?;
        match validate::emissions_per_mile(&raw) {
            Ok(value) => break value,
            Err(err) => console.say(&AppError::from(err).to_string()),
        }
    };

    session
        .set_emissions_per_mile(&aircraft_id, per_mile)
        .await
        .map_err(AppError::Update)?;
    release(session).await;
    console.say(&format!(
        "Updated emissions for aircraft {} to {:.2} kg CO₂ per mile.",
        aircraft_id, per_mile
    ));
    Ok(())
}

pub async fn add_new_flight_route(gateway: &dyn Gateway, console: &mut dyn Console) -> Result<()> {
    let from_raw = console.read("Enter departure airport ID (i.e., LAX)")?;
    let to_raw = console.read("Enter destination airport ID (i.e., JFK)")?;
    let from = validate::airport_code(&from_raw)?;
    let to = validate::airport_code(&to_raw)?;
    if from == to {
        return Err(ValidationError::SameAirport.into());
    }

    let mut session = gateway.open().await.map_err(AppError::Access)?;
    if !session.airport_exists(&from).await.map_err(AppError::Access)? {
        return Err(AppError::NotFound(
            "The source inputted airport does not exist. Returning to main menu.".to_string(),
        ));
    }
    if !session.airport_exists(&to).await.map_err(AppError::Access)? {
        return Err(AppError::NotFound(
            "The destination inputted airport does not exist. Returning to main menu.".to_string(),
        ));
    }

    let raw = console.read("Enter aircraft ID")?;
    let aircraft_id = validate::aircraft_code(&raw)?;
    if !session
        .aircraft_exists(&aircraft_id)
        .await
        .map_err(AppError::Access)?
    {
        return Err(AppError::NotFound(
            "Aircraft ID does not exist. Returning to main menu.".to_string(),
        ));
    }

    const DUPLICATE: &str = "This route already exists. Returning to main menu.";
    if session.route_exists(&from, &to).await.map_err(AppError::Access)? {
        return Err(AppError::Duplicate(DUPLICATE.to_string()));
    }

    session
        .add_route(&from, &to, &aircraft_id)
        .await
        .map_err(|e| AppError::update(e, DUPLICATE))?;
    release(session).await;
    console.say(&format!(
        "New route added: {} → {} using aircraft {}.",
        from, to, aircraft_id
    ));
    Ok(())
}
