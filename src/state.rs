//! Implements the structs that hold the state of the server.

use std::sync::{Arc, Mutex};

use rusqlite::Connection;

use crate::{Error, db::initialize, pagination::PaginationConfig};

/// The default URL for the generative-AI summary endpoint.
pub const DEFAULT_ADVISOR_URL: &str =
    "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.0-flash:generateContent";

/// The configuration for the generative-AI summary endpoint.
#[derive(Debug, Clone)]
pub struct AdvisorConfig {
    /// The API key sent as the `key` query parameter. When `None`, the
    /// summary widget tells the user how to configure the key instead of
    /// making a request.
    pub api_key: Option<String>,
    /// The URL the summary request is POSTed to.
    pub api_url: String,
}

impl AdvisorConfig {
    /// Create a config pointing at the default endpoint.
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            api_key,
            api_url: DEFAULT_ADVISOR_URL.to_owned(),
        }
    }
}

impl Default for AdvisorConfig {
    fn default() -> Self {
        Self::new(None)
    }
}

/// The state of the server.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The database connection.
    pub db_connection: Arc<Mutex<Connection>>,
    /// The config that controls how to display pages of data.
    pub pagination_config: PaginationConfig,
    /// The config for the generative-AI summary endpoint.
    pub advisor_config: AdvisorConfig,
    /// The HTTP client shared by outbound requests.
    pub http_client: reqwest::Client,
}

impl AppState {
    /// Create a new [AppState], ensuring the database schema exists.
    pub fn new(
        db_connection: Connection,
        pagination_config: PaginationConfig,
        advisor_config: AdvisorConfig,
    ) -> Result<Self, Error> {
        initialize(&db_connection)?;

        Ok(Self {
            db_connection: Arc::new(Mutex::new(db_connection)),
            pagination_config,
            advisor_config,
            http_client: reqwest::Client::new(),
        })
    }
}
