/// The logged-in client user, passed explicitly to every handler
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserContext {
    pub username: String,
    pub user_id: i64,
}

impl UserContext {
    pub fn new(username: String, user_id: i64) -> Self {
        Self { username, user_id }
    }
}

/// Outcome of the admin login gate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminLogin {
    Granted,
    InvalidCredentials,
    NotAdmin,
}
