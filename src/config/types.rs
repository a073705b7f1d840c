//! Process configuration types.

use sqlx::postgres::PgConnectOptions;
use std::fmt;
use std::net::SocketAddr;

/// Pool size used when `DB_MAX_CONNECTIONS` is unset.
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Address the HTTP server binds to.
pub const LISTEN_ADDR: ([u8; 4], u16) = ([0, 0, 0, 0], 8080);

/// PostgreSQL connection parameters.
#[derive(Clone)]
pub struct DbConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub name: String,
    pub max_connections: u32,
}

impl DbConfig {
    /// Key/value connection descriptor, as accepted by libpq.
    pub fn dsn(&self) -> String {
        format!(
            "host={} port={} user={} password={} dbname={} sslmode=disable",
            self.host, self.port, self.user, self.password, self.name
        )
    }

    /// Options equivalent to [`DbConfig::dsn`], used to open the pool.
    pub fn connect_options(&self) -> PgConnectOptions {
        PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.user)
            .password(&self.password)
            .database(&self.name)
            .ssl_mode(sqlx::postgres::PgSslMode::Disable)
    }
}

impl fmt::Debug for DbConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DbConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &"***")
            .field("name", &self.name)
            .field("max_connections", &self.max_connections)
            .finish()
    }
}

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub listen_addr: SocketAddr,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: SocketAddr::from(LISTEN_ADDR),
        }
    }
}
