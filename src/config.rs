use std::{env, fmt::Display, str::FromStr};

use log::{info, warn};

use crate::render::DEFAULT_MAX_DEPTH;

pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";
pub const DEFAULT_STATIC_DIR: &str = "static";

/// Runtime settings, read from the environment (and `.env` if present)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub bind_addr: String,
    pub static_dir: String,
    pub max_depth: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            static_dir: DEFAULT_STATIC_DIR.to_string(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl Config {
    pub fn load() -> Self {
        if dotenvy::dotenv().is_err() {
            info!("No .env file found, using process environment");
        }

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from any key lookup; unset or invalid values fall back
    /// to the defaults
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            bind_addr: try_load(&lookup, "BRD_BIND_ADDR", defaults.bind_addr),
            static_dir: try_load(&lookup, "BRD_STATIC_DIR", defaults.static_dir),
            max_depth: try_load(&lookup, "BRD_MAX_DEPTH", defaults.max_depth).max(1),
        }
    }
}

fn try_load<T, F>(lookup: &F, key: &str, default: T) -> T
where
    T: FromStr + Display,
    T::Err: Display,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) => raw.trim().parse().unwrap_or_else(|e| {
            warn!("Invalid {key} value {raw:?}: {e}, using default: {default}");
            default
        }),
        None => {
            info!("{key} not set, using default: {default}");
            default
        }
    }
}
