use std::env;

use sqlx::mysql::MySqlConnectOptions;

/// Which console the process is running; selects the database account.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Frontend {
	Admin,
	Client,
}

impl std::fmt::Display for Frontend {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Frontend::Admin => f.write_str("admin"),
			Frontend::Client => f.write_str("client"),
		}
	}
}

#[derive(Clone)]
pub struct Config {
	pub host: String,
	pub port: u16,
	pub database: String,
	pub user: String,
	pub password: String,
	pub frontend: Frontend,
}

impl Config {
	pub fn from_env(frontend: Frontend) -> Result<Self, ConfigError> {
		// Load .env file if it exists
		let _ = dotenvy::dotenv();

		let (user_var, password_var, default_user, default_password) = match frontend {
			Frontend::Admin => ("TRIPS_ADMIN_USER", "TRIPS_ADMIN_PASSWORD", "appadmin", "adminpw"),
			Frontend::Client => ("TRIPS_CLIENT_USER", "TRIPS_CLIENT_PASSWORD", "appclient", "clientpw"),
		};

		Ok(Self {
			host: env::var("TRIPS_DB_HOST").unwrap_or_else(|_| "localhost".to_string()),
			port: env::var("TRIPS_DB_PORT")
				.unwrap_or_else(|_| "3306".to_string())
				.parse()
				.map_err(|_| ConfigError::InvalidPort)?,
			database: env::var("TRIPS_DB_NAME").unwrap_or_else(|_| "tripsdb".to_string()),
			user: env::var(user_var).unwrap_or_else(|_| default_user.to_string()),
			password: env::var(password_var).unwrap_or_else(|_| default_password.to_string()),
			frontend,
		})
	}

	pub fn connect_options(&self) -> MySqlConnectOptions {
		MySqlConnectOptions::new()
			.host(&self.host)
			.port(self.port)
			.username(&self.user)
			.password(&self.password)
			.database(&self.database)
	}
}

// Keeps the password out of logs.
impl std::fmt::Debug for Config {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Config")
			.field("host", &self.host)
			.field("port", &self.port)
			.field("database", &self.database)
			.field("user", &self.user)
			.field("frontend", &self.frontend)
			.finish_non_exhaustive()
	}
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
	#[error("Invalid port number")]
	InvalidPort,
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn debug_output_hides_password() {
		let config = Config {
			host: "localhost".to_string(),
			port: 3306,
			database: "tripsdb".to_string(),
			user: "appclient".to_string(),
			password: "clientpw".to_string(),
			frontend: Frontend::Client,
		};

		let rendered = format!("{:?}", config);
		assert!(rendered.contains("appclient"));
		assert!(!rendered.contains("clientpw"));
	}

	#[test]
	fn frontend_names_the_console() {
		assert_eq!(Frontend::Admin.to_string(), "admin");
		assert_eq!(Frontend::Client.to_string(), "client");
	}
}
