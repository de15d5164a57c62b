use std::{net::SocketAddr, path::PathBuf};

use anyhow::{Context, Result, bail};

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub data_file: PathBuf,
    pub create_if_missing: bool,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup so tests do not have to
    /// touch the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let value = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let bind_addr = value("ROSTER_BIND_ADDR", "127.0.0.1:3000")
            .parse::<SocketAddr>()
            .context("ROSTER_BIND_ADDR must be a valid host:port")?;

        let data_file = PathBuf::from(value("ROSTER_DATA_FILE", "user.json"));

        let create_if_missing = parse_bool(&value("ROSTER_CREATE_IF_MISSING", "true"))
            .context("ROSTER_CREATE_IF_MISSING must be true or false")?;

        Ok(Self {
            bind_addr,
            data_file,
            create_if_missing,
        })
    }
}

fn parse_bool(raw: &str) -> Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => bail!("unrecognised boolean '{other}'"),
    }
}
