//! Runtime configuration
//!
//! The connection string is never embedded in code or mapping files; it
//! comes from the command line or the environment (a `.env` file is
//! loaded in main via dotenvy).

use std::env;

use anyhow::{Result, bail};

/// Environment variable holding the destination connection string
pub const DATABASE_URL_VAR: &str = "DATABASE_URL";

/// Resolve the destination connection string
///
/// A `--database-url` flag wins over the environment.
pub fn database_url(flag: Option<String>) -> Result<String> {
    resolve_database_url(flag, env::var(DATABASE_URL_VAR).ok())
}

fn resolve_database_url(flag: Option<String>, env_value: Option<String>) -> Result<String> {
    if let Some(url) = flag {
        if !url.trim().is_empty() {
            return Ok(url);
        }
    }
    match env_value {
        Some(url) if !url.trim().is_empty() => Ok(url),
        _ => bail!(
            "No database connection string. Pass --database-url or set {} (a .env file is honored).",
            DATABASE_URL_VAR
        ),
    }
}
