/// Configuration management for the API server
///
/// Configuration is read from environment variables, with a `.env` file
/// loaded first when present (development convenience).
///
/// # Environment Variables
///
/// - `API_HOST`: Host to bind to (default: 0.0.0.0)
/// - `API_PORT`: Port to bind to (default: 8080)
/// - `CORS_ORIGINS`: Comma-separated allowed origins, `*` for any (default: *)
/// - `STORAGE_BACKEND`: `postgres` or `memory` (default: postgres)
/// - `DATABASE_URL`: PostgreSQL connection string (required for postgres)
/// - `DATABASE_MAX_CONNECTIONS`: Pool size (default: 10)
/// - `DATABASE_MIN_CONNECTIONS`: Warm connections (default: 2)
/// - `RUN_MIGRATIONS`: Apply migrations at startup (default: true)
/// - `JWT_SECRET`: Secret used to verify access tokens (required, >= 32 chars)
/// - `JWT_AUDIENCE`: Expected `aud` claim (default: authenticated)
/// - `LOG_FORMAT`: `pretty` or `json` (default: pretty)
///
/// # Example
///
/// ```no_run
/// use todo_api::config::Config;
///
/// # fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// println!("Server will listen on {}", config.bind_address());
/// # Ok(())
/// # }
/// ```

use std::env;
use std::str::FromStr;

use todo_shared::auth::jwt::DEFAULT_AUDIENCE;
use todo_shared::db::pool::DatabaseConfig as PoolConfig;

/// Complete application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// API server configuration
    pub api: ApiConfig,

    /// Where todos are kept
    pub storage: StorageBackend,

    /// Database configuration
    pub database: DatabaseConfig,

    /// JWT configuration
    pub jwt: JwtConfig,

    /// Log output format
    pub log_format: LogFormat,
}

/// API server configuration
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Host to bind to
    pub host: String,

    /// Port to bind to
    pub port: u16,

    /// Allowed CORS origins; `*` means permissive
    pub cors_origins: Vec<String>,
}

/// Database configuration
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// PostgreSQL connection URL
    pub url: String,

    /// Maximum number of connections in pool
    pub max_connections: u32,

    /// Minimum number of idle connections
    pub min_connections: u32,

    /// Apply embedded migrations at startup
    pub run_migrations: bool,
}

/// JWT configuration
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// Shared secret the identity provider signs access tokens with
    pub secret: String,

    /// Expected audience claim
    pub audience: String,
}

/// Todo storage backend
///
/// `Memory` keeps todos in process and loses them on exit; it needs no
/// database and suits local runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StorageBackend {
    /// PostgreSQL via `DATABASE_URL`
    #[default]
    Postgres,

    /// In-process store
    Memory,
}

impl FromStr for StorageBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(StorageBackend::Postgres),
            "memory" => Ok(StorageBackend::Memory),
            other => anyhow::bail!(
                "Unknown STORAGE_BACKEND '{}', expected 'postgres' or 'memory'",
                other
            ),
        }
    }
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable lines
    #[default]
    Pretty,

    /// One JSON object per line
    Json,
}

impl FromStr for LogFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pretty" | "text" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            other => anyhow::bail!("Unknown LOG_FORMAT '{}', expected 'pretty' or 'json'", other),
        }
    }
}

/// Minimum accepted JWT secret length
pub const MIN_JWT_SECRET_LENGTH: usize = 32;

fn parse_bool(name: &str, value: &str) -> anyhow::Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => anyhow::bail!("{} must be a boolean, got '{}'", name, other),
    }
}

/// Splits a comma-separated origin list, dropping blanks
pub fn parse_origins(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(String::from)
        .collect()
}

impl Config {
    /// Loads configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `JWT_SECRET` is missing, or `DATABASE_URL` is missing with the
    ///   postgres backend
    /// - `JWT_SECRET` is shorter than 32 characters
    /// - A numeric or boolean variable has an invalid value
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let host = env::var("API_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = env::var("API_PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse::<u16>()?;
        let cors_origins = parse_origins(&env::var("CORS_ORIGINS").unwrap_or_else(|_| "*".to_string()));

        let storage = env::var("STORAGE_BACKEND")
            .map(|v| v.parse::<StorageBackend>())
            .unwrap_or(Ok(StorageBackend::Postgres))?;

        let database_url = match env::var("DATABASE_URL") {
            Ok(url) => url,
            Err(_) if storage == StorageBackend::Memory => String::new(),
            Err(_) => anyhow::bail!("DATABASE_URL environment variable is required"),
        };
        let max_connections = env::var("DATABASE_MAX_CONNECTIONS")
            .unwrap_or_else(|_| "10".to_string())
            .parse::<u32>()?;
        let min_connections = env::var("DATABASE_MIN_CONNECTIONS")
            .unwrap_or_else(|_| "2".to_string())
            .parse::<u32>()?;
        let run_migrations = parse_bool(
            "RUN_MIGRATIONS",
            &env::var("RUN_MIGRATIONS").unwrap_or_else(|_| "true".to_string()),
        )?;

        let jwt_secret = env::var("JWT_SECRET")
            .map_err(|_| anyhow::anyhow!("JWT_SECRET environment variable is required"))?;
        let jwt_audience = env::var("JWT_AUDIENCE").unwrap_or_else(|_| DEFAULT_AUDIENCE.to_string());

        let log_format = env::var("LOG_FORMAT")
            .map(|v| v.parse::<LogFormat>())
            .unwrap_or(Ok(LogFormat::Pretty))?;

        let config = Self {
            api: ApiConfig {
                host,
                port,
                cors_origins,
            },
            storage,
            database: DatabaseConfig {
                url: database_url,
                max_connections,
                min_connections,
                run_migrations,
            },
            jwt: JwtConfig {
                secret: jwt_secret,
                audience: jwt_audience,
            },
            log_format,
        };

        config.validate()?;
        Ok(config)
    }

    /// Checks cross-field constraints
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.jwt.secret.len() < MIN_JWT_SECRET_LENGTH {
            anyhow::bail!(
                "JWT_SECRET must be at least {} characters long",
                MIN_JWT_SECRET_LENGTH
            );
        }

        if self.storage == StorageBackend::Postgres && self.database.url.trim().is_empty() {
            anyhow::bail!("DATABASE_URL must be set when STORAGE_BACKEND is postgres");
        }

        if self.database.max_connections == 0 {
            anyhow::bail!("DATABASE_MAX_CONNECTIONS must be greater than zero");
        }

        Ok(())
    }

    /// Returns the server bind address
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.api.host, self.api.port)
    }

    /// True when any origin may call the API
    pub fn cors_is_permissive(&self) -> bool {
        self.api.cors_origins.is_empty() || self.api.cors_origins.iter().any(|o| o == "*")
    }

    /// Pool settings derived from the database section
    pub fn pool_config(&self) -> PoolConfig {
        PoolConfig {
            max_connections: self.database.max_connections,
            min_connections: self.database.min_connections,
            ..PoolConfig::from_url(self.database.url.clone())
        }
    }
}
