#![doc = r#"
Where the scheduler gets its messages from

The scheduler never touches bytes. It asks an [`EventReader`] for the next
message of a given track, and for the current length of a tick. Two readers are
provided:

- [`SmfReader`] loads a Standard MIDI File, decoding it with [`midly`].
- [`SequenceReader`] plays back tracks built in memory.

# Example
```rust
# use midix_player::prelude::*;
let mut reader = SequenceReader::new(Timing::new_ticks_per_quarter_note(96))
    .with_track([
        (0, TrackMessage::voice(0, VoiceEvent::NoteOn { note: 60, velocity: 100 })),
        (96, TrackMessage::voice(0, VoiceEvent::NoteOff { note: 60, velocity: 0 })),
    ]);

let first = reader.next_message(0).unwrap();
assert_eq!(first.delta_ticks(), 0);
let second = reader.next_message(0).unwrap();
assert_eq!(second.absolute_ticks(), 96);
assert!(reader.next_message(0).is_none());
assert!(reader.is_track_finished(0));
```
"#]

mod error;
pub use error::*;

mod sequence;
pub use sequence::*;

mod smf;
pub use smf::*;

mod timing;
pub use timing::*;

use crate::{
    message::TrackMessage,
    time::{Tempo, TickDuration},
};

/// The boundary between the scheduler and whatever decodes the file.
pub trait EventReader {
    /// Number of tracks. Track indices are `0..track_count()`.
    fn track_count(&self) -> usize;

    /// Take the next message of `track`.
    ///
    /// Returns `None` once the track is exhausted, and for indices out of range.
    fn next_message(&mut self, track: usize) -> Option<ReaderEvent>;

    /// True when [`next_message`](EventReader::next_message) has nothing left for `track`.
    fn is_track_finished(&self, track: usize) -> bool;

    /// The wall-clock length of one tick at the current tempo.
    fn tick_duration(&self) -> TickDuration;

    /// Milliseconds per tick at the current tempo.
    fn ms_per_tick(&self) -> f64 {
        self.tick_duration().ms_per_tick()
    }

    /// Change the current tempo.
    ///
    /// Readers whose timing does not depend on tempo (SMPTE) may ignore this.
    fn set_tempo(&mut self, tempo: Tempo);
}

impl<R: EventReader + ?Sized> EventReader for Box<R> {
    fn track_count(&self) -> usize {
        (**self).track_count()
    }
    fn next_message(&mut self, track: usize) -> Option<ReaderEvent> {
        (**self).next_message(track)
    }
    fn is_track_finished(&self, track: usize) -> bool {
        (**self).is_track_finished(track)
    }
    fn tick_duration(&self) -> TickDuration {
        (**self).tick_duration()
    }
    fn set_tempo(&mut self, tempo: Tempo) {
        (**self).set_tempo(tempo)
    }
}

/// A message handed out by an [`EventReader`], with its position on the track.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReaderEvent {
    delta_ticks: u32,
    absolute_ticks: u64,
    message: TrackMessage,
}

impl ReaderEvent {
    /// Create a new event
    pub const fn new(delta_ticks: u32, absolute_ticks: u64, message: TrackMessage) -> Self {
        Self {
            delta_ticks,
            absolute_ticks,
            message,
        }
    }
    /// Ticks since the previous message on the same track
    pub const fn delta_ticks(&self) -> u32 {
        self.delta_ticks
    }
    /// Ticks since the start of the track
    pub const fn absolute_ticks(&self) -> u64 {
        self.absolute_ticks
    }
    /// The decoded message
    pub const fn message(&self) -> &TrackMessage {
        &self.message
    }
    /// Take the decoded message
    pub fn into_message(self) -> TrackMessage {
        self.message
    }
}
