use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::{ensure, Context, Result};
use serde::Deserialize;

use crate::ranking::DEFAULT_PHRASE_DIVISOR;
use crate::selection::OverlapPolicy;

const DEFAULT_COOCCURRENCE_WINDOW: usize = 3;

/// Tunables for ranking, selection, and the built-in oracle.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HighlightConfig {
    /// Keep `phrase_count / phrase_divisor` top phrases when ranking
    pub phrase_divisor: usize,
    /// Upper bound on a single oracle call; unbounded when absent
    #[serde(alias = "oracleTimeoutMs")]
    pub oracle_timeout_ms: Option<u64>,
    #[serde(alias = "overlap")]
    pub overlap_policy: OverlapPolicy,
    /// Co-occurrence window of the built-in TextRank oracle
    pub cooccurrence_window: usize,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            phrase_divisor: DEFAULT_PHRASE_DIVISOR,
            oracle_timeout_ms: None,
            overlap_policy: OverlapPolicy::Keep,
            cooccurrence_window: DEFAULT_COOCCURRENCE_WINDOW,
        }
    }
}

impl HighlightConfig {
    /// Reads a JSON config file, falling back to defaults when no path is given.
    pub fn from_path(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(p) => {
                let data = fs::read_to_string(p)
                    .with_context(|| format!("failed to read config file {:?}", p))?;
                Self::from_json(&data)
                    .with_context(|| format!("failed to parse config file {:?}", p))?
            }
            None => Self::default(),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(raw).context("invalid config JSON")?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(self.phrase_divisor > 0, "phrase_divisor must be positive");
        if let Some(ms) = self.oracle_timeout_ms {
            ensure!(ms > 0, "oracle_timeout_ms must be positive when set");
        }
        ensure!(
            self.cooccurrence_window >= 2,
            "cooccurrence_window must be at least 2, got {}",
            self.cooccurrence_window
        );
        Ok(())
    }

    pub fn oracle_budget(&self) -> Option<Duration> {
        self.oracle_timeout_ms.map(Duration::from_millis)
    }
}
