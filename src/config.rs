use std::env;
use std::str::FromStr;
use std::time::Duration;

use dotenvy::dotenv;

use crate::dispatch::{DEFAULT_MAX_ATTEMPTS, RetryPolicy};
use crate::error::SeedError;
use crate::utils::calendar::is_supported_year;

#[derive(Debug, Clone)]
pub struct Config {
    /// Base of the remote API, without trailing slash.
    pub api_base: String,
    pub total_employees: usize,
    pub year: i32,

    // Dispatch
    pub max_attempts: u32,
    pub retry_delay: Duration,
    pub request_timeout: Duration,
    /// Employees processed at once per date in phase 2; 1 keeps it strictly sequential.
    pub concurrency: usize,

    /// Fixed seed for reproducible data; entropy when unset.
    pub rng_seed: Option<u64>,

    pub log_dir: String,
    pub log_level: tracing::Level,
}

impl Config {
    pub fn from_env() -> Result<Self, SeedError> {
        dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, SeedError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_base = lookup("SEED_API_BASE")
            .unwrap_or_else(|| "http://localhost:3000/api/dsm44".to_string())
            .trim_end_matches('/')
            .to_string();

        let year = parse_or(&lookup, "SEED_YEAR", 2025)?;
        if !is_supported_year(year) {
            return Err(SeedError::Config {
                key: "SEED_YEAR".to_string(),
                message: format!("{year} has no full calendar"),
            });
        }

        Ok(Self {
            api_base,
            total_employees: parse_or(&lookup, "SEED_TOTAL_EMPLOYEES", 8000)?,
            year,

            max_attempts: parse_or(&lookup, "SEED_MAX_ATTEMPTS", DEFAULT_MAX_ATTEMPTS)?,
            retry_delay: Duration::from_secs(parse_or(&lookup, "SEED_RETRY_DELAY_SECS", 1)?),
            request_timeout: Duration::from_secs(parse_or(&lookup, "SEED_REQUEST_TIMEOUT_SECS", 30)?),
            concurrency: parse_or::<usize, _>(&lookup, "SEED_CONCURRENCY", 1)?.max(1),

            rng_seed: parse_opt(&lookup, "SEED_RNG_SEED")?,

            log_dir: lookup("SEED_LOG_DIR").unwrap_or_else(|| "logs".to_string()),
            log_level: parse_or(&lookup, "SEED_LOG_LEVEL", tracing::Level::INFO)?,
        })
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_attempts: self.max_attempts,
            delay: self.retry_delay,
        }
    }
}

fn parse_opt<T, F>(lookup: &F, key: &str) -> Result<Option<T>, SeedError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(None),
        Some(raw) if raw.trim().is_empty() => Ok(None),
        Some(raw) => raw.trim().parse().map(Some).map_err(|e: T::Err| SeedError::Config {
            key: key.to_string(),
            message: format!("{raw:?}: {e}"),
        }),
    }
}

fn parse_or<T, F>(lookup: &F, key: &str, default: T) -> Result<T, SeedError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    Ok(parse_opt(lookup, key)?.unwrap_or(default))
}
