use anyhow::{Context, Result, anyhow};
use clap::Parser;
use sqlx::postgres::PgSslMode;
use std::{env, fmt};

/// Centralized application configuration.
/// Combines environment variables and CLI arguments.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database: DatabaseConfig,
}

/// Connection parameters for the PostgreSQL store.
///
/// Every field is required; there are no defaults.
#[derive(Clone)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub database: String,
    pub ssl_mode: PgSslMode,
}

/// Command-line + environment configuration.
#[derive(Parser, Debug)]
#[command(author, version, about = "CRUD HTTP API for cars")]
pub struct Args {
    /// Host to bind to (overrides CAR_SERVICE_HOST)
    #[arg(long)]
    pub host: Option<String>,

    /// Port to bind to (overrides CAR_SERVICE_PORT)
    #[arg(long)]
    pub port: Option<u16>,

    /// Create the database schema and exit
    #[arg(long)]
    pub migrate: bool,
}

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;

impl AppConfig {
    /// Parse environment variables + CLI args into AppConfig and migrate flag.
    pub fn from_env_and_args() -> Result<(Self, bool)> {
        let args = Args::parse();
        let cfg = Self::resolve(args.host, args.port, |key| env::var(key).ok())?;
        Ok((cfg, args.migrate))
    }

    /// Merge CLI overrides with values looked up through `lookup`.
    pub fn resolve<F>(host: Option<String>, port: Option<u16>, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env_host = lookup("CAR_SERVICE_HOST").unwrap_or_else(|| DEFAULT_HOST.into());
        let env_port = match lookup("CAR_SERVICE_PORT") {
            Some(value) => parse_port("CAR_SERVICE_PORT", &value)?,
            None => DEFAULT_PORT,
        };

        Ok(Self {
            host: host.unwrap_or(env_host),
            port: port.unwrap_or(env_port),
            database: DatabaseConfig::from_lookup(lookup)?,
        })
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl DatabaseConfig {
    /// Read `DB_HOST`, `DB_PORT`, `DB_USER`, `DB_PASSWORD`, `DB_NAME` and
    /// `DB_SSL_MODE`. A missing or malformed value is an error.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| {
            lookup(key).ok_or_else(|| anyhow!("missing required environment variable {}", key))
        };

        let port = required("DB_PORT")?;
        let ssl_mode = required("DB_SSL_MODE")?;

        Ok(Self {
            host: required("DB_HOST")?,
            port: parse_port("DB_PORT", &port)?,
            user: required("DB_USER")?,
            password: required("DB_PASSWORD")?,
            database: required("DB_NAME")?,
            ssl_mode: ssl_mode
                .parse::<PgSslMode>()
                .with_context(|| format!("parsing DB_SSL_MODE value `{}`", ssl_mode))?,
        })
    }
}

impl fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("database", &self.database)
            .field("ssl_mode", &self.ssl_mode)
            .finish()
    }
}

fn parse_port(key: &str, value: &str) -> Result<u16> {
    value
        .parse::<u16>()
        .with_context(|| format!("parsing {} value `{}`", key, value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn database_vars() -> HashMap<String, String> {
        vars(&[
            ("DB_HOST", "localhost"),
            ("DB_PORT", "5432"),
            ("DB_USER", "postgres"),
            ("DB_PASSWORD", "secret"),
            ("DB_NAME", "cars"),
            ("DB_SSL_MODE", "disable"),
        ])
    }

    #[test]
    fn resolves_defaults_and_database_settings() {
        let env = database_vars();
        let cfg = AppConfig::resolve(None, None, |k| env.get(k).cloned()).unwrap();

        assert_eq!(cfg.addr(), "0.0.0.0:8080");
        assert_eq!(cfg.database.host, "localhost");
        assert_eq!(cfg.database.port, 5432);
        assert_eq!(cfg.database.database, "cars");
        assert!(matches!(cfg.database.ssl_mode, PgSslMode::Disable));
    }

    #[test]
    fn cli_overrides_environment() {
        let mut env = database_vars();
        env.insert("CAR_SERVICE_HOST".into(), "10.0.0.1".into());
        env.insert("CAR_SERVICE_PORT".into(), "9000".into());

        let cfg =
            AppConfig::resolve(Some("127.0.0.1".into()), None, |k| env.get(k).cloned()).unwrap();
        assert_eq!(cfg.addr(), "127.0.0.1:9000");
    }

    #[test]
    fn missing_database_variable_is_an_error() {
        let mut env = database_vars();
        env.remove("DB_PASSWORD");

        let err = DatabaseConfig::from_lookup(|k| env.get(k).cloned()).unwrap_err();
        assert!(err.to_string().contains("DB_PASSWORD"));
    }

    #[test]
    fn invalid_port_and_ssl_mode_are_rejected() {
        let mut env = database_vars();
        env.insert("DB_PORT".into(), "not-a-port".into());
        assert!(DatabaseConfig::from_lookup(|k| env.get(k).cloned()).is_err());

        let mut env = database_vars();
        env.insert("DB_SSL_MODE".into(), "sometimes".into());
        let err = DatabaseConfig::from_lookup(|k| env.get(k).cloned()).unwrap_err();
        assert!(err.to_string().contains("DB_SSL_MODE"));
    }

    #[test]
    fn debug_output_hides_password() {
        let env = database_vars();
        let cfg = DatabaseConfig::from_lookup(|k| env.get(k).cloned()).unwrap();
        let rendered = format!("{:?}", cfg);
        assert!(!rendered.contains("secret"));
        assert!(rendered.contains("<redacted>"));
    }
}
