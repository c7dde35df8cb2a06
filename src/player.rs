use std::path::Path;

use log::info;

use crate::{
    dispatch::EventHandler,
    error::{PlayerError, PlayerResult},
    reader::{EventReader, SmfReader},
    scheduler::{LogObserver, PassContext, PlaybackObserver, PlayerConfig, PlayerState},
    time::{Clock, SystemClock},
};

#[doc = r#"
Plays a MIDI file into an [`EventHandler`].

A player owns one reader, one clock, one handler and the scheduler state of
one open file. It never blocks and never spawns threads: the caller drives
it by calling [`Player::tick`] from its own loop, frame callback or timer.

Dropping the player stops playback and releases the reader.

# Example
```rust
# use midix_player::prelude::*;
let reader = SequenceReader::new(Timing::new_ticks_per_quarter_note(100))
    .with_track([
        (0, TrackMessage::voice(0, VoiceEvent::NoteOn { note: 60, velocity: 100 })),
        (100, TrackMessage::voice(0, VoiceEvent::NoteOff { note: 60, velocity: 0 })),
    ]);

let clock = ManualClock::new();
let mut fired = 0;
let mut player = Player::new(
    reader,
    clock.clone(),
    HandlerFn(|_track: usize, _tick: u64, _message: &TrackMessage| fired += 1),
);

assert!(player.tick()); // note on, at tick 0
clock.advance(500); // 100 ticks at 120 BPM
assert!(player.tick()); // note off, track finished
assert!(!player.tick());
drop(player);
assert_eq!(fired, 2);
```
"#]
pub struct Player<R = SmfReader, C = SystemClock, H = ()> {
    reader: R,
    clock: C,
    handler: H,
    observer: Box<dyn PlaybackObserver>,
    config: PlayerConfig,
    state: PlayerState,
}

impl<H: EventHandler> Player<SmfReader, SystemClock, H> {
    /// Open the Standard MIDI File at `path` and start playing it now.
    pub fn open(path: impl AsRef<Path>, handler: H) -> PlayerResult<Self> {
        Self::open_with_config(path, handler, PlayerConfig::default())
    }

    /// Open the Standard MIDI File at `path` with custom settings.
    pub fn open_with_config(
        path: impl AsRef<Path>,
        handler: H,
        config: PlayerConfig,
    ) -> PlayerResult<Self> {
        let path = path.as_ref();
        let reader = SmfReader::open(path).map_err(|e| PlayerError::file_open(path, e))?;

        info!("Midi format: {:?}", reader.format());
        info!("Number of tracks: {}", reader.track_count());
        info!("Timing: {:?}", reader.timing());

        Ok(Self::with_config(
            reader,
            SystemClock::new(),
            handler,
            config,
        ))
    }
}

impl<R, C, H> Player<R, C, H>
where
    R: EventReader,
    C: Clock,
    H: EventHandler,
{
    /// Start playing `reader` now, with default settings.
    pub fn new(reader: R, clock: C, handler: H) -> Self {
        Self::with_config(reader, clock, handler, PlayerConfig::default())
    }

    /// Start playing `reader` now.
    ///
    /// The first message of every track is buffered and the clock epoch is taken here.
    pub fn with_config(mut reader: R, clock: C, handler: H, config: PlayerConfig) -> Self {
        let state = PlayerState::prime(&mut reader, &clock);
        Self {
            reader,
            clock,
            handler,
            observer: Box::new(LogObserver),
            config,
            state,
        }
    }

    /// Replace the diagnostics observer. [`LogObserver`] is used by default.
    pub fn with_observer(mut self, observer: impl PlaybackObserver + 'static) -> Self {
        self.set_observer(observer);
        self
    }

    /// Replace the diagnostics observer.
    pub fn set_observer(&mut self, observer: impl PlaybackObserver + 'static) {
        self.observer = Box::new(observer);
    }

    /// Fire everything that is due by now.
    ///
    /// Call this repeatedly. It returns `true` while there may be more to play.
    /// The call that fires the last message still returns `true`; every call
    /// after that returns `false` and does nothing.
    pub fn tick(&mut self) -> bool {
        self.state.advance(PassContext {
            reader: &mut self.reader,
            clock: &self.clock,
            handler: &mut self.handler,
            observer: self.observer.as_mut(),
            config: &self.config,
        })
    }

    /// True once every track has run out of messages
    pub const fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    /// Scheduler state, for inspection
    pub const fn state(&self) -> &PlayerState {
        &self.state
    }

    /// The reader being played
    pub const fn reader(&self) -> &R {
        &self.reader
    }

    /// The handler
    pub const fn handler(&self) -> &H {
        &self.handler
    }

    /// The handler
    pub fn handler_mut(&mut self) -> &mut H {
        &mut self.handler
    }

    /// The clock
    pub const fn clock(&self) -> &C {
        &self.clock
    }

    /// The settings this player was created with
    pub const fn config(&self) -> &PlayerConfig {
        &self.config
    }

    /// Stop playing and take the reader and handler back.
    pub fn close(self) -> (R, H) {
        (self.reader, self.handler)
    }
}
