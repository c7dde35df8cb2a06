/// The possible FPS (Frames Per Second) for MIDI timecode
///
/// The MIDI specification defines only four possible frame types:
/// - 24 fps: Standard film rate
/// - 25 fps: PAL/SECAM television standard
/// - 29.97 fps: NTSC color television (drop-frame timecode)
/// - 30 fps: NTSC black & white, some digital video formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SmpteFps {
    /// 24 frames per second
    TwentyFour,
    /// 25 frames per second
    TwentyFive,
    /// 29.97 frames per second (30000/1001), drop-frame
    TwentyNine,
    /// 30 frames per second
    Thirty,
}

impl SmpteFps {
    /// The nominal frame rate used to derive tick lengths.
    ///
    /// Drop-frame 29.97 fps counts as 30 here; the frame numbering
    /// skips values instead of the clock running slower.
    pub const fn as_division(&self) -> u8 {
        match self {
            Self::TwentyFour => 24,
            Self::TwentyFive => 25,
            Self::TwentyNine => 30,
            Self::Thirty => 30,
        }
    }

    /// The actual frame rate, including the fractional drop-frame rate.
    pub const fn as_f64(&self) -> f64 {
        match self {
            Self::TwentyFour => 24.,
            Self::TwentyFive => 25.,
            Self::TwentyNine => DROP_FRAME,
            Self::Thirty => 30.,
        }
    }
}

impl From<midly::Fps> for SmpteFps {
    fn from(value: midly::Fps) -> Self {
        match value {
            midly::Fps::Fps24 => Self::TwentyFour,
            midly::Fps::Fps25 => Self::TwentyFive,
            midly::Fps::Fps29 => Self::TwentyNine,
            midly::Fps::Fps30 => Self::Thirty,
        }
    }
}

const DROP_FRAME: f64 = 30_000. / 1001.;
