use crate::time::{SmpteFps, Tempo, TickDuration};

/// The header timing type.
///
/// This is either the number of ticks per quarter note or
/// an SMPTE frame rate with a number of ticks per frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Timing {
    /// Delta times count subdivisions of a quarter note, so their length follows the tempo.
    TicksPerQuarterNote(u16),

    /// Delta times count subdivisions of an SMPTE frame, independent of tempo.
    Smpte {
        /// Frame rate
        fps: SmpteFps,
        /// Ticks per frame
        ticks_per_frame: u8,
    },
}

impl Timing {
    /// The leading bit is disregarded, so 1-32767
    pub const fn new_ticks_per_quarter_note(tpqn: u16) -> Self {
        Self::TicksPerQuarterNote(tpqn & 0x7FFF)
    }

    /// Define the timing in terms of fps and ticks per frame
    pub const fn new_smpte(fps: SmpteFps, ticks_per_frame: u8) -> Self {
        Self::Smpte {
            fps,
            ticks_per_frame,
        }
    }

    /// Returns Some if the midi timing is defined
    /// as ticks per quarter note
    pub const fn ticks_per_quarter_note(&self) -> Option<u16> {
        match self {
            Self::TicksPerQuarterNote(t) => Some(*t),
            _ => None,
        }
    }

    /// The length of a tick at `tempo`.
    ///
    /// ```text
    /// µs_per_tick = tempo / tpqn                      (musical)
    /// µs_per_tick = 1 000 000 / (fps × ticks_per_frame) (SMPTE, tempo ignored)
    /// ```
    pub const fn tick_duration(&self, tempo: Tempo) -> TickDuration {
        match self {
            Self::TicksPerQuarterNote(tpqn) => {
                TickDuration::new(tempo.micros_per_quarter_note() as u64, *tpqn as u64)
            }
            Self::Smpte {
                fps,
                ticks_per_frame,
            } => TickDuration::new(1_000_000, fps.as_division() as u64 * *ticks_per_frame as u64),
        }
    }
}

impl From<midly::Timing> for Timing {
    fn from(value: midly::Timing) -> Self {
        match value {
            midly::Timing::Metrical(tpqn) => Self::new_ticks_per_quarter_note(tpqn.as_int()),
            midly::Timing::Timecode(fps, ticks_per_frame) => Self::new_smpte(fps.into(), ticks_per_frame),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn musical_timing_follows_tempo() {
        let timing = Timing::new_ticks_per_quarter_note(480);
        assert_eq!(timing.tick_duration(Tempo::DEFAULT), TickDuration::new(500_000, 480));
        assert_eq!(
            timing.tick_duration(Tempo::new(250_000)).ms_per_tick() * 2.,
            timing.tick_duration(Tempo::DEFAULT).ms_per_tick()
        );
    }

    #[test]
    fn smpte_timing_ignores_tempo() {
        // 25fps, 40 ticks per frame is the classic 1ms resolution
        let timing = Timing::new_smpte(SmpteFps::TwentyFive, 40);
        assert_eq!(timing.tick_duration(Tempo::DEFAULT).ms_per_tick(), 1.);
        assert_eq!(
            timing.tick_duration(Tempo::new(1)),
            timing.tick_duration(Tempo::DEFAULT)
        );
        assert_eq!(timing.ticks_per_quarter_note(), None);
    }
}
