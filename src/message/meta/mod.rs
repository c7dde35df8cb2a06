mod smpte_offset;
pub use smpte_offset::*;

use core::fmt;
use std::borrow::Cow;

use num_enum::{IntoPrimitive, TryFromPrimitive};

use crate::time::Tempo;

#[doc = r#"
The type byte that follows `FF` in a meta-event.

```text
FF <kind> <length> <data...>
```
"#]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, TryFromPrimitive, IntoPrimitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum MetaKind {
    /// `FF 00 02`
    SequenceNumber = 0x00,
    /// `FF 01`
    Text = 0x01,
    /// `FF 02`
    Copyright = 0x02,
    /// `FF 03`, sequence or track name
    TrackName = 0x03,
    /// `FF 04`
    InstrumentName = 0x04,
    /// `FF 05`
    Lyric = 0x05,
    /// `FF 06`
    Marker = 0x06,
    /// `FF 07`
    CuePoint = 0x07,
    /// `FF 08`
    ProgramName = 0x08,
    /// `FF 09`
    DeviceName = 0x09,
    /// `FF 20 01`
    ChannelPrefix = 0x20,
    /// `FF 21 01`
    MidiPort = 0x21,
    /// `FF 2F 00`
    EndOfTrack = 0x2F,
    /// `FF 51 03`
    Tempo = 0x51,
    /// `FF 54 05`
    SmpteOffset = 0x54,
    /// `FF 58 04`
    TimeSignature = 0x58,
    /// `FF 59 02`
    KeySignature = 0x59,
    /// `FF 7F`
    SequencerSpecific = 0x7F,
}

/// A meta-event (`FF`) in a track.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MetaMessage {
    /// Sequence number. `None` when the event carried no data.
    SequenceNumber(Option<u16>),
    /// Any free text
    Text(Text),
    /// Copyright notice
    Copyright(Text),
    /// Sequence or track name
    TrackName(Text),
    /// Instrument name
    InstrumentName(Text),
    /// A lyric syllable
    Lyric(Text),
    /// Rehearsal letter or section name
    Marker(Text),
    /// A cue for something happening on stage or film
    CuePoint(Text),
    /// The output port the track's events are meant for
    MidiPort(u8),
    /// Last event of a track
    EndOfTrack,
    /// Tempo change
    Tempo(Tempo),
    /// SMPTE position the track starts at
    SmpteOffset(SmpteOffset),
    /// Time signature
    TimeSignature(TimeSignature),
    /// Key signature
    KeySignature(KeySignature),
    /// Opaque data for a particular sequencer
    SequencerSpecific(Vec<u8>),
    /// Anything else, including the rarely used program/device name and channel prefix events.
    Unknown {
        /// The meta type byte
        kind: u8,
        /// Raw payload
        data: Vec<u8>,
    },
}

impl MetaMessage {
    /// The type byte of this event, if it is one the MIDI file spec defines.
    pub fn kind(&self) -> Option<MetaKind> {
        Some(match self {
            Self::SequenceNumber(_) => MetaKind::SequenceNumber,
            Self::Text(_) => MetaKind::Text,
            Self::Copyright(_) => MetaKind::Copyright,
            Self::TrackName(_) => MetaKind::TrackName,
            Self::InstrumentName(_) => MetaKind::InstrumentName,
            Self::Lyric(_) => MetaKind::Lyric,
            Self::Marker(_) => MetaKind::Marker,
            Self::CuePoint(_) => MetaKind::CuePoint,
            Self::MidiPort(_) => MetaKind::MidiPort,
            Self::EndOfTrack => MetaKind::EndOfTrack,
            Self::Tempo(_) => MetaKind::Tempo,
            Self::SmpteOffset(_) => MetaKind::SmpteOffset,
            Self::TimeSignature(_) => MetaKind::TimeSignature,
            Self::KeySignature(_) => MetaKind::KeySignature,
            Self::SequencerSpecific(_) => MetaKind::SequencerSpecific,
            Self::Unknown { kind, .. } => return MetaKind::try_from(*kind).ok(),
        })
    }
}

impl From<midly::MetaMessage<'_>> for MetaMessage {
    fn from(value: midly::MetaMessage<'_>) -> Self {
        use midly::MetaMessage as M;
        match value {
            M::TrackNumber(number) => Self::SequenceNumber(number),
            M::Text(t) => Self::Text(t.into()),
            M::Copyright(t) => Self::Copyright(t.into()),
            M::TrackName(t) => Self::TrackName(t.into()),
            M::InstrumentName(t) => Self::InstrumentName(t.into()),
            M::Lyric(t) => Self::Lyric(t.into()),
            M::Marker(t) => Self::Marker(t.into()),
            M::CuePoint(t) => Self::CuePoint(t.into()),
            M::ProgramName(t) => Self::Unknown {
                kind: MetaKind::ProgramName.into(),
                data: t.to_vec(),
            },
            M::DeviceName(t) => Self::Unknown {
                kind: MetaKind::DeviceName.into(),
                data: t.to_vec(),
            },
            M::MidiChannel(channel) => Self::Unknown {
                kind: MetaKind::ChannelPrefix.into(),
                data: vec![channel.as_int()],
            },
            M::MidiPort(port) => Self::MidiPort(port.as_int()),
            M::EndOfTrack => Self::EndOfTrack,
            M::Tempo(tempo) => Self::Tempo(Tempo::new(tempo.as_int())),
            M::SmpteOffset(time) => Self::SmpteOffset(time.into()),
            M::TimeSignature(numerator, denominator_pow, clocks_per_click, thirty_seconds) => {
                Self::TimeSignature(TimeSignature {
                    numerator,
                    denominator_pow,
                    clocks_per_click,
                    thirty_seconds_per_quarter: thirty_seconds,
                })
            }
            M::KeySignature(sharps_flats, minor) => {
                Self::KeySignature(KeySignature { sharps_flats, minor })
            }
            M::SequencerSpecific(data) => Self::SequencerSpecific(data.to_vec()),
            M::Unknown(kind, data) => Self::Unknown {
                kind,
                data: data.to_vec(),
            },
        }
    }
}

/// Time signature as stored in a `FF 58 04 nn dd cc bb` event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimeSignature {
    /// Beats per bar
    pub numerator: u8,
    /// The beat's note value as a power of two (`2` is a quarter note)
    pub denominator_pow: u8,
    /// MIDI clocks per metronome click
    pub clocks_per_click: u8,
    /// Notated 32nd notes per MIDI quarter note (usually 8)
    pub thirty_seconds_per_quarter: u8,
}

impl TimeSignature {
    /// The beat's note value, e.g. `4` for x/4 time.
    ///
    /// Returns `None` for exponents that do not fit a `u32`.
    pub const fn denominator(&self) -> Option<u32> {
        1u32.checked_shl(self.denominator_pow as u32)
    }
}

/// Key signature as stored in a `FF 59 02 sf mi` event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct KeySignature {
    /// Negative for flats, positive for sharps
    pub sharps_flats: i8,
    /// Minor (`true`) or major (`false`) key
    pub minor: bool,
}

/// Text carried by a meta-event.
///
/// The MIDI file spec does not fix an encoding, so the raw bytes are kept.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Text(Vec<u8>);

impl Text {
    /// Wrap raw bytes
    pub fn new(data: impl Into<Vec<u8>>) -> Self {
        Self(data.into())
    }
    /// The raw bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
    /// Try to decode the text as utf8.
    pub fn as_str(&self) -> Result<&str, core::str::Utf8Error> {
        core::str::from_utf8(&self.0)
    }
    /// Decode as utf8, replacing invalid sequences.
    pub fn to_string_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.0)
    }
}

impl From<&[u8]> for Text {
    fn from(value: &[u8]) -> Self {
        Self(value.to_vec())
    }
}

impl From<&str> for Text {
    fn from(value: &str) -> Self {
        Self(value.as_bytes().to_vec())
    }
}

impl fmt::Display for Text {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_string_lossy())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn kind_of_unknown_meta_looks_up_the_byte() {
        let program_name = MetaMessage::Unknown {
            kind: 0x08,
            data: b"Piano".to_vec(),
        };
        assert_eq!(program_name.kind(), Some(MetaKind::ProgramName));

        let vendor = MetaMessage::Unknown {
            kind: 0x60,
            data: vec![],
        };
        assert_eq!(vendor.kind(), None);

        assert_eq!(MetaMessage::EndOfTrack.kind(), Some(MetaKind::EndOfTrack));
        assert_eq!(u8::from(MetaKind::Tempo), 0x51);
    }

    #[test]
    fn time_signature_denominator() {
        let six_eight = TimeSignature {
            numerator: 6,
            denominator_pow: 3,
            clocks_per_click: 36,
            thirty_seconds_per_quarter: 8,
        };
        assert_eq!(six_eight.denominator(), Some(8));

        let broken = TimeSignature {
            denominator_pow: 40,
            ..six_eight
        };
        assert_eq!(broken.denominator(), None);
    }

    #[test]
    fn text_is_lossy_for_invalid_utf8() {
        let text = Text::new(vec![b'h', b'i', 0xFF]);
        assert!(text.as_str().is_err());
        assert_eq!(text.to_string_lossy(), "hi\u{FFFD}");
        assert_eq!(Text::from("Lead").to_string(), "Lead");
    }
}
