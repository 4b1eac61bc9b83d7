//! Runtime configuration loaded from environment variables.
//!
//! - `ASK_LIMIT`              = retrieved examples per question (default 5)
//! - `ASK_SCORE_THRESHOLD`    = minimum similarity (default 0.7)
//! - `ASK_MAX_CONTEXT_CHARS`  = context budget in the prompt (default 8500)
//! - `GENERATION_TIMEOUT_SECS` = default 9

use std::str::FromStr;
use std::time::Duration;

use crate::error::ContextorError;

/// Knobs of the answer composer.
#[derive(Clone, Debug, PartialEq)]
pub struct AskConfig {
    pub limit: usize,
    pub score_threshold: f32,
    pub max_context_chars: usize,
    pub generation_timeout: Duration,
}

impl Default for AskConfig {
    fn default() -> Self {
        Self {
            limit: 5,
            score_threshold: 0.7,
            max_context_chars: 8500,
            generation_timeout: Duration::from_secs(9),
        }
    }
}

impl AskConfig {
    /// Build from environment variables; unset keys keep their defaults.
    ///
    /// # Example
    /// ```
    /// # use contextor::AskConfig;
    /// let cfg = AskConfig::from_env().unwrap();
    /// assert!(cfg.limit >= 1);
    /// ```
    pub fn from_env() -> Result<Self, ContextorError> {
        let d = Self::default();
        let cfg = Self {
            limit: parse("ASK_LIMIT", d.limit)?,
            score_threshold: parse("ASK_SCORE_THRESHOLD", d.score_threshold)?,
            max_context_chars: parse("ASK_MAX_CONTEXT_CHARS", d.max_context_chars)?,
            generation_timeout: Duration::from_secs(parse(
                "GENERATION_TIMEOUT_SECS",
                d.generation_timeout.as_secs(),
            )?),
        };
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), ContextorError> {
        if self.limit == 0 {
            return Err(ContextorError::Config("ASK_LIMIT must be >= 1".into()));
        }
        if !(-1.0..=1.0).contains(&self.score_threshold) {
            return Err(ContextorError::Config(
                "ASK_SCORE_THRESHOLD must be within [-1, 1]".into(),
            ));
        }
        if self.generation_timeout.is_zero() {
            return Err(ContextorError::Config(
                "GENERATION_TIMEOUT_SECS must be > 0".into(),
            ));
        }
        Ok(())
    }
}

fn parse<T: FromStr>(key: &str, default: T) -> Result<T, ContextorError> {
    match std::env::var(key) {
        Ok(v) if !v.trim().is_empty() => v
            .trim()
            .parse()
            .map_err(|_| ContextorError::Config(format!("{key} has an invalid value: {v}"))),
        _ => Ok(default),
    }
}
