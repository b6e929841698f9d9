//! Configuration Module — collector tuning parameters.
//!
//! The original collector this design is drawn from tunes a concurrent,
//! multi-region, NUMA-aware collector (TLABs, region sizes, GC thread
//! counts). None of that applies to the single-threaded semispace-nursery
//! design in §4.D, so this is a much smaller struct covering only what
//! that design actually varies: nursery size, tenure threshold, and the
//! stats/verbosity flags the CLI's `--gc-stats`/`-v` surface (§6).

use crate::error::{GcError, GcResult};

#[derive(Debug, Clone)]
pub struct GcConfig {
    /// Size in bytes of each nursery semispace. Doubled internally (two
    /// semispaces are allocated): actual nursery memory footprint is
    /// `2 * nursery_bytes`.
    ///
    /// Default: 1MB. Overridden by `--nursery-bytes` / `SCHEMATIKA_NURSERY_BYTES`.
    pub nursery_bytes: usize,

    /// Number of nursery collections a surviving object endures before it
    /// is promoted to the tenured generation.
    ///
    /// Default: 6.
    pub tenure_threshold: u8,

    /// Hard ceiling on tenured-generation size; exceeding it on promotion
    /// raises [`GcError::OutOfMemory`].
    ///
    /// Default: 512MB.
    pub max_tenured_bytes: usize,

    /// Collect [`crate::stats::GcStats`] during every cycle. Cheap enough to
    /// default on; `--gc-stats` just decides whether the CLI prints them.
    pub stats_enabled: bool,

    /// Log each collection at `tracing::Level::DEBUG` (nursery) / `INFO` (major).
    pub verbose: bool,
}

const MB: usize = 1024 * 1024;

impl Default for GcConfig {
    fn default() -> Self {
        GcConfig {
            nursery_bytes: MB,
            tenure_threshold: 6,
            max_tenured_bytes: 512 * MB,
            stats_enabled: true,
            verbose: false,
        }
    }
}

impl GcConfig {
    pub fn validate(&self) -> GcResult<()> {
        if self.nursery_bytes == 0 {
            return Err(GcError::Configuration("nursery_bytes must be > 0".into()));
        }
        if self.max_tenured_bytes < self.nursery_bytes {
            return Err(GcError::Configuration(
                "max_tenured_bytes must be >= nursery_bytes".into(),
            ));
        }
        if self.tenure_threshold == 0 {
            return Err(GcError::Configuration("tenure_threshold must be > 0".into()));
        }
        Ok(())
    }

    /// Overrides defaults with environment variables:
    /// `SCHEMATIKA_NURSERY_BYTES`, `SCHEMATIKA_TENURE_THRESHOLD`,
    /// `SCHEMATIKA_MAX_TENURED_BYTES`, `SCHEMATIKA_GC_VERBOSE` (§6).
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(val) = std::env::var("SCHEMATIKA_NURSERY_BYTES") {
            if let Ok(n) = val.parse() {
                config.nursery_bytes = n;
            }
        }
        if let Ok(val) = std::env::var("SCHEMATIKA_TENURE_THRESHOLD") {
            if let Ok(n) = val.parse() {
                config.tenure_threshold = n;
            }
        }
        if let Ok(val) = std::env::var("SCHEMATIKA_MAX_TENURED_BYTES") {
            if let Ok(n) = val.parse() {
                config.max_tenured_bytes = n;
            }
        }
        if let Ok(val) = std::env::var("SCHEMATIKA_GC_VERBOSE") {
            config.verbose = val == "1" || val.eq_ignore_ascii_case("true");
        }

        config
    }
}
