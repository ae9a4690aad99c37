use crate::{
    console::Console,
    db::Gateway,
    error::Result,
    handlers::{account, admin, airports, settle, trips},
    models::{AdminLogin, UserContext},
};

const ADMIN_MENU: &str = "\n------------------Admin Dashboard------------------\n\
1. Reset a User's Password\n\
2. Set a User to Admin\n\
3. Update Aircraft Emissions\n\
4. Add a New Flight Route\n\
5. Exit";

const LOGIN_MENU: &str = "\n------------------Flight Carbon Footprint Tracker------------------\n\
1. Log In\n\
2. Create an Account\n\
3. Exit";

const INVALID_OPTION: &str = "Invalid option. Please try again.";

fn main_menu(username: &str) -> String {
    format!(
        "\n-----------------------Welcome {}!------------------------\n\
1. Get Emissions Estimate\n\
2. View Saved Trips\n\
3. Insert a New Trip\n\
4. Delete a Trip\n\
5. Find an Airport\n\
6. Change Password\n\
7. Log Out",
        username
    )
}

/// Admin console: login gate, then the dashboard loop
pub struct AdminController<G, C> {
    gateway: G,
    console: C,
}

impl<G: Gateway, C: Console> AdminController<G, C> {
    pub fn new(gateway: G, console: C) -> Self {
        Self { gateway, console }
    }

    pub fn console(&self) -> &C {
        &self.console
    }

    /// Runs until the user picks Exit or the login gate refuses them.
    pub async fn run(&mut self) -> Result<()> {
        let outcome = admin::login(&self.gateway, &mut self.console).await;
        match outcome {
            Ok(AdminLogin::Granted) => {}
            Ok(_) => return Ok(()),
            Err(err) if err.is_fatal() => return Err(err),
            Err(err) => {
                err.log();
                self.console.say(&err.to_string());
                return Ok(());
            }
        }

        loop {
            self.console.say(ADMIN_MENU);
            let choice = self.console.read("Select an option")?;
            let gateway = &self.gateway;
            let console = &mut self.console;
            let outcome = match choice.trim() {
                "1" => admin::reset_user_password(gateway, console).await,
                "2" => admin::set_user_to_admin(gateway, console).await,
                "3" => admin::update_aircraft_emissions(gateway, console).await,
                "4" => admin::add_new_flight_route(gateway, console).await,
                "5" => {
                    console.say("Exiting Admin Dashboard.");
                    return Ok(());
                }
                _ => {
                    console.say(INVALID_OPTION);
                    Ok(())
                }
            };
            settle(console, outcome)?;
        }
    }
}

/// Where the client console currently is
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientState {
    LoggedOut,
    LoggedIn(UserContext),
    Exited,
}

/// Client console: login/registration menu and the per-user main menu
pub struct ClientController<G, C> {
    gateway: G,
    console: C,
    state: ClientState,
}

impl<G: Gateway, C: Console> ClientController<G, C> {
    pub fn new(gateway: G, console: C) -> Self {
        Self {
            gateway,
            console,
            state: ClientState::LoggedOut,
        }
    }

    pub fn console(&self) -> &C {
        &self.console
    }

    pub fn state(&self) -> &ClientState {
        &self.state
    }

    pub async fn run(&mut self) -> Result<()> {
        loop {
            let next = match self.state.clone() {
                ClientState::LoggedOut => self.logged_out().await?,
                ClientState::LoggedIn(user) => self.logged_in(user).await?,
                ClientState::Exited => return Ok(()),
            };
            self.state = next;
        }
    }

    async fn logged_out(&mut self) -> Result<ClientState> {
        self.console.say(LOGIN_MENU);
        let choice = self.console.read("Select an option")?;
        let gateway = &self.gateway;
        let console = &mut self.console;
        match choice.trim() {
            "1" => match account::login(gateway, console).await {
                Ok(Some(user)) => Ok(ClientState::LoggedIn(user)),
                Ok(None) => Ok(ClientState::LoggedOut),
                Err(err) => {
                    settle(console, Err(err))?;
                    Ok(ClientState::LoggedOut)
                }
            },
            "2" => {
                let outcome = account::create_account(gateway, console).await;
                settle(console, outcome)?;
                Ok(ClientState::LoggedOut)
            }
            "3" => {
                console.say("Goodbye!");
                Ok(ClientState::Exited)
            }
            _ => {
                console.say(INVALID_OPTION);
                Ok(ClientState::LoggedOut)
            }
        }
    }

    async fn logged_in(&mut self, user: UserContext) -> Result<ClientState> {
        self.console.say(&main_menu(&user.username));
        let choice = self.console.read("Select an option")?;
        let gateway = &self.gateway;
        let console = &mut self.console;
        let outcome = match choice.trim() {
            "1" => trips::estimate_emissions(gateway, console, &user).await,
            "2" => trips::view_trips(gateway, console, &user).await,
            "3" => trips::insert_trip(gateway, console, &user).await,
            "4" => trips::delete_trip(gateway, console, &user).await,
            "5" => airports::find_airport(gateway, console).await,
            "6" => account::change_password(gateway, console, &user).await,
            "7" => {
                tracing::info!("user {} logged out", user.username);
                console.say("Logging out...");
                return Ok(ClientState::LoggedOut);
            }
            _ => {
                console.say(INVALID_OPTION);
                Ok(())
            }
        };
        settle(console, outcome)?;
        Ok(ClientState::LoggedIn(user))
    }
}
