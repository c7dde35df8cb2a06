#![doc = r#"
SMPTE Offset - the time code at which a track is meant to start

The `FF 54 05` meta-event pins a track to an absolute SMPTE position, which is
how MIDI sequences are lined up against video. The player does not shift
playback by it; the offset is handed to
[`EventHandler::smpte_offset`](crate::dispatch::EventHandler::smpte_offset) and
the caller decides what to do with it.
"#]

use crate::time::SmpteFps;

/// A track's starting position in SMPTE time code.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SmpteOffset {
    /// The frame rate for this offset.
    pub fps: SmpteFps,
    /// Hour component of the time code (0-23).
    pub hour: u8,
    /// Minute component of the time code (0-59).
    pub minute: u8,
    /// Second component of the time code (0-59).
    pub second: u8,
    /// Frame number within the current second.
    pub frame: u8,
    /// Hundredths of a frame (0-99).
    pub subframe: u8,
}

impl SmpteOffset {
    /// The offset in microseconds, using the offset's own frame rate.
    pub const fn as_micros(&self) -> f64 {
        self.as_micros_with_override(self.fps)
    }

    /// The offset in microseconds, counting frames at `fps` instead.
    ///
    /// Files with SMPTE header timing should be read with the header's rate.
    pub const fn as_micros_with_override(&self, fps: SmpteFps) -> f64 {
        ((((self.hour as u64 * 3600) + (self.minute as u64) * 60 + self.second as u64) * 1_000_000)
            as f64)
            + ((self.frame as u64) * 1_000_000) as f64 / fps.as_f64()
            + ((self.subframe as u32) * 10_000) as f64 / fps.as_f64()
    }
}

impl From<midly::SmpteTime> for SmpteOffset {
    fn from(value: midly::SmpteTime) -> Self {
        Self {
            fps: value.fps().into(),
            hour: value.hour(),
            minute: value.minute(),
            second: value.second(),
            frame: value.frame(),
            subframe: value.subframe(),
        }
    }
}

#[test]
fn smpte_offset_in_micros() {
    use pretty_assertions::assert_eq;
    let offset = SmpteOffset {
        fps: SmpteFps::TwentyFive,
        hour: 0,
        minute: 1,
        second: 2,
        frame: 5,
        subframe: 50,
    };
    // 62s + 5 frames of 40ms + half a frame
    assert_eq!(offset.as_micros(), 62_220_000.);
    assert_eq!(
        offset.as_micros_with_override(SmpteFps::TwentyFour).round(),
        (62_000_000_f64 + 5_500_000. / 24.).round()
    );
}
