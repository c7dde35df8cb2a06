use crate::time::TickDuration;

/// How the scheduler decides that the tempo changed between two passes.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TempoComparison {
    /// Compare the tick durations as exact ratios.
    #[default]
    Exact,
    /// Compare milliseconds per tick as floats, ignoring differences up to the given amount.
    Epsilon(f64),
}

impl TempoComparison {
    /// The threshold, in milliseconds per tick, used by players that compare floats
    pub const LEGACY_EPSILON: f64 = 0.001;

    /// [`TempoComparison::Epsilon`] with [`TempoComparison::LEGACY_EPSILON`]
    pub const fn legacy() -> Self {
        Self::Epsilon(Self::LEGACY_EPSILON)
    }

    /// True if going from `previous` to `current` counts as a tempo change.
    pub fn has_changed(&self, previous: TickDuration, current: TickDuration) -> bool {
        match self {
            Self::Exact => previous != current,
            Self::Epsilon(epsilon) => {
                (previous.ms_per_tick() - current.ms_per_tick()).abs() > *epsilon
            }
        }
    }
}

#[doc = r#"
Settings of a [`Player`](crate::player::Player)

# Example
```rust
# use midix_player::prelude::*;
let config = PlayerConfig::default()
    .with_tempo_comparison(TempoComparison::legacy())
    .with_drift_threshold_ms(25.);

assert!(config.report_drift);
assert_eq!(config.drift_threshold_ms, 25.);
```
"#]
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PlayerConfig {
    /// How tempo changes are detected. Defaults to [`TempoComparison::Exact`].
    pub tempo_comparison: TempoComparison,
    /// Dispatch lateness, in milliseconds, above which drift is reported. Defaults to 10.
    pub drift_threshold_ms: f64,
    /// Whether drift is measured at all. Defaults to `true`.
    pub report_drift: bool,
}

impl PlayerConfig {
    /// The default drift threshold
    pub const DEFAULT_DRIFT_THRESHOLD_MS: f64 = 10.;

    /// Set [`PlayerConfig::tempo_comparison`]
    pub const fn with_tempo_comparison(mut self, comparison: TempoComparison) -> Self {
        self.tempo_comparison = comparison;
        self
    }

    /// Set [`PlayerConfig::drift_threshold_ms`]. Negative values become zero.
    pub fn with_drift_threshold_ms(mut self, threshold_ms: f64) -> Self {
        self.drift_threshold_ms = threshold_ms.max(0.);
        self
    }

    /// Set [`PlayerConfig::report_drift`]
    pub const fn with_drift_reporting(mut self, enabled: bool) -> Self {
        self.report_drift = enabled;
        self
    }
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            tempo_comparison: TempoComparison::default(),
            drift_threshold_ms: Self::DEFAULT_DRIFT_THRESHOLD_MS,
            report_drift: true,
        }
    }
}
