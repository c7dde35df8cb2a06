use std::path::Path;

use super::{EventReader, ReadResult, ReaderEvent, SequenceReader, Timing};
use crate::{
    message::TrackMessage,
    time::{Tempo, TickDuration},
};

#[doc = r#"
The `MThd` format of a Standard MIDI File

```text
0: SingleMultiChannel       one track holding every channel
1: Simultaneous             several tracks played at the same time
2: SequentiallyIndependent  several independent single-track patterns
```
"#]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SmfFormat {
    /// Format 0
    SingleMultiChannel,
    /// Format 1
    Simultaneous,
    /// Format 2
    SequentiallyIndependent,
}

impl From<midly::Format> for SmfFormat {
    fn from(value: midly::Format) -> Self {
        match value {
            midly::Format::SingleTrack => Self::SingleMultiChannel,
            midly::Format::Parallel => Self::Simultaneous,
            midly::Format::Sequential => Self::SequentiallyIndependent,
        }
    }
}

#[doc = r#"
An [`EventReader`] over a Standard MIDI File.

The file is decoded by [`midly`] when it is opened. Every track is then handed
out message by message; all tracks share one tempo, which starts at 120 BPM.

Format 2 files are played like format 1: every pattern starts at tick zero.
"#]
#[derive(Debug, Clone)]
pub struct SmfReader {
    format: SmfFormat,
    sequence: SequenceReader,
}

impl SmfReader {
    /// Read and decode the file at `path`.
    pub fn open(path: impl AsRef<Path>) -> ReadResult<Self> {
        let bytes = std::fs::read(path)?;
        Self::from_bytes(&bytes)
    }

    /// Decode an in-memory file.
    pub fn from_bytes(bytes: &[u8]) -> ReadResult<Self> {
        let smf = midly::Smf::parse(bytes)?;

        let mut sequence = SequenceReader::new(smf.header.timing.into());
        for track in &smf.tracks {
            sequence.push_track(
                track
                    .iter()
                    .map(|event| (event.delta.as_int(), TrackMessage::from(event.kind))),
            );
        }

        Ok(Self {
            format: smf.header.format.into(),
            sequence,
        })
    }

    /// Returns the format type for the file.
    pub const fn format(&self) -> SmfFormat {
        self.format
    }

    /// Returns header info
    pub const fn timing(&self) -> Timing {
        self.sequence.timing()
    }

    /// The tempo currently in effect
    pub const fn tempo(&self) -> Tempo {
        self.sequence.tempo()
    }
}

impl EventReader for SmfReader {
    fn track_count(&self) -> usize {
        self.sequence.track_count()
    }

    fn next_message(&mut self, track: usize) -> Option<ReaderEvent> {
        self.sequence.next_message(track)
    }

    fn is_track_finished(&self, track: usize) -> bool {
        self.sequence.is_track_finished(track)
    }

    fn tick_duration(&self) -> TickDuration {
        self.sequence.tick_duration()
    }

    fn set_tempo(&mut self, tempo: Tempo) {
        self.sequence.set_tempo(tempo)
    }
}
