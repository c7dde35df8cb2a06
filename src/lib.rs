#![warn(missing_docs)]
#![warn(clippy::nursery)]
#![doc = r#"
A tick-driven playback scheduler for multi-track MIDI files.

`midix-player` replays every track of a Standard MIDI File against a wall clock.
All tracks share one tick timeline, and that timeline may change rate halfway
through the song (tempo meta-events). Each message that becomes due is handed to
an [`EventHandler`](crate::dispatch::EventHandler) exactly once.

The crate does not decode bytes, render sound, or print anything. Decoding is
delegated to [`midly`] through [`SmfReader`](crate::reader::SmfReader), and what
happens to an event is entirely up to your handler.

# Example
```no_run
use midix_player::prelude::*;

struct Printer;

impl EventHandler for Printer {
    fn note_on(&mut self, track: usize, tick: u64, channel: u8, note: u8, velocity: u8) {
        println!("[{track}@{tick}] ch{channel} note {note} vel {velocity}");
    }
}

let mut player = Player::open("song.mid", Printer).unwrap();
while player.tick() {
    std::thread::sleep(std::time::Duration::from_millis(1));
}
```

# Overview

- [`reader`] exposes the [`EventReader`](crate::reader::EventReader) boundary the scheduler
  pulls messages from, plus an SMF-backed and an in-memory implementation.
- [`scheduler`] holds the per-track countdowns and the catch-up loop.
- [`dispatch`] routes a decoded message to the matching handler slot.
- [`player`] ties a reader, a clock, a handler and the scheduler state together.
"#]

pub mod dispatch;
pub mod error;
pub mod message;
pub mod player;
pub mod reader;
pub mod scheduler;
pub mod time;

pub use error::*;

#[doc = r#"
Commonly used types
"#]
pub mod prelude {
    pub use crate::{
        dispatch::{EventHandler, HandlerFn, dispatch, route},
        error::*,
        message::*,
        player::Player,
        reader::{
            EventReader, ReadResult, ReaderError, ReaderErrorKind, ReaderEvent, SequenceReader,
            SmfFormat, SmfReader, Timing,
        },
        scheduler::{
            DriftReport, LogObserver, PlaybackObserver, PlayerConfig, PlayerState,
            TempoComparison, TrackCursor,
        },
        time::*,
    };
}
