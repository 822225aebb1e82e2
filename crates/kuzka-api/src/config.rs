//! API configuration.

use std::path::PathBuf;
use std::time::Instant;

use kuzka_core::Env;

pub const HOST_ENV: &str = "KUZKA_API_HOST";
pub const PORT_ENV: &str = "KUZKA_API_PORT";
pub const ADMIN_USER_ENV: &str = "ADMIN_USER";
pub const ADMIN_PASS_ENV: &str = "ADMIN_PASS";

/// Default port, shared with the order bot's `LEAD_API_URL`.
pub const DEFAULT_PORT: u16 = 59000;
const DEFAULT_HOST: &str = "0.0.0.0";

/// The single admin login.
#[derive(Clone, PartialEq, Eq)]
pub struct AdminCredentials {
    pub username: String,
    pub password: String,
}

impl AdminCredentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Whether the given pair matches.
    pub fn matches(&self, username: &str, password: &str) -> bool {
        // Compare both halves so a wrong user is not answered faster
        let user_ok = constant_time_eq(self.username.as_bytes(), username.as_bytes());
        let pass_ok = constant_time_eq(self.password.as_bytes(), password.as_bytes());
        user_ok & pass_ok
    }
}

impl std::fmt::Debug for AdminCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminCredentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

/// API server configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Host to bind to.
    pub host: String,
    /// Port to bind to.
    pub port: u16,
    pub credentials: AdminCredentials,
    /// Directory holding `leads/`.
    pub data_dir: PathBuf,
    /// Allowed CORS origins.
    pub cors_origins: Vec<String>,
    /// Server start time for uptime calculation.
    pub start_time: Instant,
}

impl ApiConfig {
    /// Creates a configuration storing leads under the shared data directory.
    pub fn new(
        host: impl Into<String>,
        port: u16,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            host: host.into(),
            port,
            credentials: AdminCredentials::new(username, password),
            data_dir: kuzka_core::data_dir(),
            cors_origins: vec!["*".to_string()],
            start_time: Instant::now(),
        }
    }

    /// Reads `KUZKA_API_HOST`, `KUZKA_API_PORT`, `ADMIN_USER` and `ADMIN_PASS`.
    pub fn from_env(env: &Env) -> kuzka_core::Result<Self> {
        Ok(Self::new(
            env.or(HOST_ENV, DEFAULT_HOST),
            env.parse_or(PORT_ENV, DEFAULT_PORT)?,
            env.require(ADMIN_USER_ENV)?,
            env.require(ADMIN_PASS_ENV)?,
        ))
    }

    /// Stores leads under another directory.
    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = dir.into();
        self
    }

    /// Sets the CORS origins.
    pub fn with_cors_origins(mut self, origins: Vec<String>) -> Self {
        self.cors_origins = origins;
        self
    }

    /// Returns the bind address.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Returns the uptime in seconds.
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}
