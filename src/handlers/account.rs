use crate::{
    console::Console,
    db::Gateway,
    error::{AppError, Result},
    handlers::release,
    models::UserContext,
    validate,
};

const USERNAME_TAKEN: &str = "This username already exists. Please choose a different one.";

/// Client login. `None` means the attempt was rejected and the user stays
/// logged out.
pub async fn login(gateway: &dyn Gateway, console: &mut dyn Console) -> Result<Option<UserContext>> {
    console.say("\n-----------Please enter your login credentials below.---------------");
    let raw = console.read("Enter your username")?;
    let username = validate::username(&raw)?;
    let raw = console.read_secret("Enter your password")?;
    let password = validate::password(&raw)?;

    let mut session = gateway.open().await.map_err(AppError::Access)?;
    if !session
        .authenticate(&username, &password)
        .await
        .map_err(AppError::Access)?
    {
        release(session).await;
        console.say("Invalid credentials. Please try again.");
        return Ok(None);
    }

    let user_id = session
        .user_id(&username)
        .await
        .map_err(AppError::Access)?
        .ok_or_else(|| AppError::NotFound("User not found.".to_string()))?;
    release(session).await;

    tracing::info!("user {} logged in", username);
    console.say("Login successful!");
    Ok(Some(UserContext::new(username, user_id)))
}

pub async fn create_account(gateway: &dyn Gateway, console: &mut dyn Console) -> Result<()> {
    console.say("\n--------Welcome! Please provide login information below.-----------");
    let raw = console.read("Enter a username")?;
    let username = validate::username(&raw)?;

    let mut session = gateway.open().await.map_err(AppError::Access)?;
    if session.user_exists(&username).await.map_err(AppError::Access)? {
        return Err(AppError::Duplicate(USERNAME_TAKEN.to_string()));
    }

    let password = loop {
        let raw = console.read_secret("Enter a password")?;
        match validate::password(&raw) {
            Ok(password) => break password,
            Err(err) => console.say(&AppError::from(err).to_string()),
        }
    };

    session
        .add_user(&username, &password)
        .await
        .map_err(|e| AppError::update(e, USERNAME_TAKEN))?;
    release(session).await;
    console.say("Account created successfully! Please log in.");
    Ok(())
}

pub async fn change_password(
    gateway: &dyn Gateway,
    console: &mut dyn Console,
    user: &UserContext,
) -> Result<()> {
    let raw = console.read_secret("Enter your new password")?;
    let password = validate::password(&raw)?;

    let mut session = gateway.open().await.map_err(AppError::Access)?;
    session
        .change_password(&user.username, &password)
        .await
        .map_err(AppError::Update)?;
    release(session).await;
    console.say("Password successfully changed!");
    Ok(())
}
