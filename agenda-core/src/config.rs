//! Runtime configuration for the agenda service.

use std::env;

use crate::error::{AgendaError, AgendaResult};

const DEFAULT_MONGODB_URI: &str = "mongodb://localhost:27017";
const DEFAULT_DATABASE: &str = "agenda";
const DEFAULT_PORT: u16 = 4096;

/// Runtime configuration, read from the environment.
///
/// The server loads a `.env` file from the working directory at startup,
/// so any of these can also live there.
#[derive(Debug, Clone)]
pub struct AgendaConfig {
    /// MongoDB connection string (`AGENDA_MONGODB_URI`).
    pub mongodb_uri: String,

    /// Database holding the events collection (`AGENDA_DATABASE`).
    pub database: String,

    /// Port the HTTP server binds to (`AGENDA_PORT`).
    pub port: u16,
}

impl AgendaConfig {
    /// Read configuration from the environment, falling back to defaults
    /// for anything unset.
    pub fn from_env() -> AgendaResult<Self> {
        let mongodb_uri =
            env::var("AGENDA_MONGODB_URI").unwrap_or_else(|_| DEFAULT_MONGODB_URI.to_string());
        let database =
            env::var("AGENDA_DATABASE").unwrap_or_else(|_| DEFAULT_DATABASE.to_string());

        let port = match env::var("AGENDA_PORT") {
            Ok(raw) => raw.parse().map_err(|_| {
                AgendaError::Config(format!("AGENDA_PORT is not a valid port number: {}", raw))
            })?,
            Err(_) => DEFAULT_PORT,
        };

        Ok(Self {
            mongodb_uri,
            database,
            port,
        })
    }
}
