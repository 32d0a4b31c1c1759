//! Engine configuration
//!
//! Environment variables:
//! - `MOJIMATCH_LIMIT`: Maximum results per page (default: 10)
//! - `MOJIMATCH_MIN_SCORE`: Minimum match score 0.0-1.0 (default: 0.0)
//! - `MOJIMATCH_PARALLEL_THRESHOLD`: Catalog size from which scoring runs in
//!   parallel (default: 256)

use std::fmt::Display;
use std::str::FromStr;

use mojimatch_core::SearchConfig;

use crate::error::{Error, Result};

pub const ENV_LIMIT: &str = "MOJIMATCH_LIMIT";
pub const ENV_MIN_SCORE: &str = "MOJIMATCH_MIN_SCORE";
pub const ENV_PARALLEL_THRESHOLD: &str = "MOJIMATCH_PARALLEL_THRESHOLD";

/// Configuration for the catalog engine
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// Maximum results to return
    pub limit: usize,
    /// Results skipped before the returned page
    pub offset: usize,
    /// Minimum score threshold (0.0-1.0)
    pub min_score: f64,
    /// Catalog size from which candidates are scored in parallel
    pub parallel_threshold: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            limit: 10,
            offset: 0,
            min_score: 0.0,
            parallel_threshold: 256,
        }
    }
}

impl EngineConfig {
    /// Read overrides from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read overrides through `lookup`; unset keys keep their defaults
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();
        let config = Self {
            limit: parse_var(&lookup, ENV_LIMIT, defaults.limit)?,
            offset: defaults.offset,
            min_score: parse_var(&lookup, ENV_MIN_SCORE, defaults.min_score)?,
            parallel_threshold: parse_var(
                &lookup,
                ENV_PARALLEL_THRESHOLD,
                defaults.parallel_threshold,
            )?,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.min_score) {
            return Err(Error::Config(format!(
                "min_score must be within 0.0-1.0, got {}",
                self.min_score
            )));
        }
        if self.limit == 0 {
            return Err(Error::Config("limit must be at least 1".to_string()));
        }
        Ok(())
    }

    pub fn search_config(&self) -> SearchConfig {
        SearchConfig {
            min_score: self.min_score,
            parallel_threshold: self.parallel_threshold,
        }
    }
}

fn parse_var<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: Display,
{
    match lookup(key) {
        Some(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .map_err(|e| Error::Config(format!("{key}={raw:?}: {e}"))),
        _ => Ok(default),
    }
}
