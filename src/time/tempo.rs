use core::fmt;

/// The tempo of a track, in microseconds per quarter note.
///
/// This is the payload of the `FF 51 03` meta-event. Files that never
/// set a tempo play at 120 beats per minute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tempo(u32);

impl Tempo {
    /// 120 BPM
    pub const DEFAULT: Self = Self(500_000);

    /// Create a tempo from microseconds per quarter note.
    ///
    /// A tempo of zero is meaningless, so it is raised to one microsecond.
    pub const fn new(micros_per_quarter_note: u32) -> Self {
        if micros_per_quarter_note == 0 {
            Self(1)
        } else {
            Self(micros_per_quarter_note)
        }
    }

    /// Create a tempo from beats (quarter notes) per minute.
    pub fn from_bpm(bpm: f64) -> Self {
        if bpm <= 0. {
            return Self::DEFAULT;
        }
        Self::new((60_000_000. / bpm).round() as u32)
    }

    /// Microseconds per quarter note
    pub const fn micros_per_quarter_note(&self) -> u32 {
        self.0
    }

    /// Beats (quarter notes) per minute
    pub fn bpm(&self) -> f64 {
        60_000_000. / self.0 as f64
    }
}

impl Default for Tempo {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for Tempo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2} bpm", self.bpm())
    }
}

#[doc = r#"
The wall-clock length of a single tick, kept as a ratio.

`micros / ticks` microseconds pass per tick. Keeping the ratio instead of a float
lets two durations be compared exactly, which is what
[`TempoComparison::Exact`](crate::scheduler::TempoComparison::Exact) relies on.

Equality is by value of the ratio, so `300/2` equals `150/1`.
"#]
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TickDuration {
    micros: u64,
    ticks: u64,
}

impl TickDuration {
    /// `micros` microseconds spread over `ticks` ticks.
    ///
    /// Both parts are raised to at least one.
    pub const fn new(micros: u64, ticks: u64) -> Self {
        Self {
            micros: if micros == 0 { 1 } else { micros },
            ticks: if ticks == 0 { 1 } else { ticks },
        }
    }

    /// Numerator, in microseconds
    pub const fn micros(&self) -> u64 {
        self.micros
    }

    /// Denominator, in ticks
    pub const fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Milliseconds per tick as a float.
    pub fn ms_per_tick(&self) -> f64 {
        self.micros as f64 / self.ticks as f64 / 1_000.
    }

    /// The number of whole ticks that fit in `elapsed_ms` milliseconds.
    pub const fn ticks_in(&self, elapsed_ms: u64) -> i64 {
        let ticks = (elapsed_ms as u128 * 1_000 * self.ticks as u128) / self.micros as u128;
        if ticks > i64::MAX as u128 {
            i64::MAX
        } else {
            ticks as i64
        }
    }

    /// Express `ticks` of this length as whole ticks of length `target`, truncating.
    ///
    /// The result never exceeds the exact value, so a position converted this way
    /// is never ahead of the same wall-clock time measured with [`ticks_in`](Self::ticks_in).
    pub const fn convert_ticks(&self, ticks: i64, target: Self) -> i64 {
        let scaled = ticks as i128 * self.micros as i128 * target.ticks as i128
            / (self.ticks as i128 * target.micros as i128);
        if scaled > i64::MAX as i128 {
            i64::MAX
        } else if scaled < i64::MIN as i128 {
            i64::MIN
        } else {
            scaled as i64
        }
    }
}

impl PartialEq for TickDuration {
    fn eq(&self, other: &Self) -> bool {
        self.micros as u128 * other.ticks as u128 == other.micros as u128 * self.ticks as u128
    }
}
impl Eq for TickDuration {}
