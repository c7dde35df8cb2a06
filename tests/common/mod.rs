#![allow(dead_code)]

use std::{cell::RefCell, rc::Rc};

use midix_player::prelude::*;

/// One fired message, as seen by [`Recorder`].
#[derive(Debug, Clone, PartialEq)]
pub struct Fired {
    pub track: usize,
    pub tick: u64,
    pub at_ms: u64,
    pub message: TrackMessage,
}

/// Records every message along with the wall-clock time it fired at.
pub struct Recorder {
    clock: ManualClock,
    pub fired: Vec<Fired>,
}

impl Recorder {
    pub fn new(clock: &ManualClock) -> Self {
        Self {
            clock: clock.clone(),
            fired: Vec::new(),
        }
    }

    pub fn ticks_of(&self, track: usize) -> Vec<u64> {
        self.fired
            .iter()
            .filter(|f| f.track == track)
            .map(|f| f.tick)
            .collect()
    }

    pub fn drain(&mut self) -> Vec<Fired> {
        std::mem::take(&mut self.fired)
    }
}

impl EventHandler for Recorder {
    fn handle(&mut self, track: usize, tick: u64, message: &TrackMessage) {
        self.fired.push(Fired {
            track,
            tick,
            at_ms: self.clock.now_millis(),
            message: message.clone(),
        });
    }
}

#[derive(Debug, Default)]
pub struct Diagnostics {
    pub anomalies: Vec<i64>,
    pub drifts: Vec<DriftReport>,
}

/// Observer whose findings stay readable after it is moved into a player.
#[derive(Clone, Default)]
pub struct SharedObserver(pub Rc<RefCell<Diagnostics>>);

impl PlaybackObserver for SharedObserver {
    fn clock_anomaly(&mut self, delta_tick: i64) {
        self.0.borrow_mut().anomalies.push(delta_tick);
    }
    fn drift(&mut self, report: &DriftReport) {
        self.0.borrow_mut().drifts.push(*report);
    }
}

pub fn note_on(delta: u32, note: u8) -> (u32, TrackMessage) {
    (
        delta,
        TrackMessage::voice(
            0,
            VoiceEvent::NoteOn {
                note,
                velocity: 100,
            },
        ),
    )
}

pub fn note_off(delta: u32, note: u8) -> (u32, TrackMessage) {
    (
        delta,
        TrackMessage::voice(0, VoiceEvent::NoteOff { note, velocity: 0 }),
    )
}

pub fn tempo(delta: u32, micros_per_quarter: u32) -> (u32, TrackMessage) {
    (delta, MetaMessage::Tempo(Tempo::new(micros_per_quarter)).into())
}

pub fn end_of_track(delta: u32) -> (u32, TrackMessage) {
    (delta, MetaMessage::EndOfTrack.into())
}

/// 100 ticks per quarter note at the default 120 BPM: 5ms per tick.
pub fn five_ms_ticks() -> SequenceReader {
    SequenceReader::new(Timing::new_ticks_per_quarter_note(100))
}

pub fn player<R: EventReader>(reader: R) -> (Player<R, ManualClock, Recorder>, ManualClock) {
    let clock = ManualClock::new();
    let player = Player::new(reader, clock.clone(), Recorder::new(&clock)).with_observer(());
    (player, clock)
}

/// Tick every `step_ms` until the player reports it is done. Returns the number of calls.
pub fn play_to_end<R: EventReader>(player: &mut Player<R, ManualClock, Recorder>, step_ms: u64) -> usize {
    let mut calls = 1;
    while player.tick() {
        player.clock().advance(step_ms);
        calls += 1;
        assert!(calls < 1_000_000, "playback never finished");
    }
    calls
}

/// Builds a Standard MIDI File byte by byte.
pub struct SmfBytes {
    format: u16,
    division: [u8; 2],
    tracks: Vec<Vec<u8>>,
}

impl SmfBytes {
    pub fn new(format: u16, ticks_per_quarter_note: u16) -> Self {
        Self {
            format,
            division: ticks_per_quarter_note.to_be_bytes(),
            tracks: Vec::new(),
        }
    }

    /// Raw track data (events only, without `MTrk` and length).
    pub fn track(mut self, data: &[u8]) -> Self {
        self.tracks.push(data.to_vec());
        self
    }

    pub fn build(&self) -> Vec<u8> {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(b"MThd");
        bytes.extend_from_slice(&[0x00, 0x00, 0x00, 0x06]);
        bytes.extend_from_slice(&self.format.to_be_bytes());
        bytes.extend_from_slice(&(self.tracks.len() as u16).to_be_bytes());
        bytes.extend_from_slice(&self.division);

        for track in &self.tracks {
            bytes.extend_from_slice(b"MTrk");
            bytes.extend_from_slice(&(track.len() as u32).to_be_bytes());
            bytes.extend_from_slice(track);
        }
        bytes
    }
}
