#![doc = r#"
Routing of due messages to handler slots

Every message kind has its own method on [`EventHandler`]. Each method has an
empty default body, so a handler only implements the slots it cares about and
every other event is dropped. A handler that prints lyrics does not have to
mention notes.

Handlers that would rather see every message in one place override
[`EventHandler::handle`] instead, or wrap a closure in [`HandlerFn`].

All slots receive the track index and the message's absolute position on its
track, in ticks.
"#]

use crate::{
    message::{
        ChannelVoiceMessage, KeySignature, MetaMessage, SmpteOffset, Text, TimeSignature,
        TrackMessage, VoiceEvent,
    },
    reader::{EventReader, ReaderEvent},
    time::Tempo,
};

/// The set of handler slots a due message can be routed to.
#[allow(unused_variables)]
pub trait EventHandler {
    /// Single entry point for every due message.
    ///
    /// The default implementation calls [`route`], which picks the slot below.
    fn handle(&mut self, track: usize, tick: u64, message: &TrackMessage) {
        route(self, track, tick, message)
    }

    /// `8n`
    fn note_off(&mut self, track: usize, tick: u64, channel: u8, note: u8, velocity: u8) {}
    /// `9n`
    fn note_on(&mut self, track: usize, tick: u64, channel: u8, note: u8, velocity: u8) {}
    /// `An`, polyphonic key pressure
    fn key_pressure(&mut self, track: usize, tick: u64, channel: u8, note: u8, pressure: u8) {}
    /// `Bn`
    fn control_change(&mut self, track: usize, tick: u64, channel: u8, controller: u8, value: u8) {
    }
    /// `Cn`
    fn program_change(&mut self, track: usize, tick: u64, channel: u8, program: u8) {}
    /// `Dn`
    fn channel_pressure(&mut self, track: usize, tick: u64, channel: u8, pressure: u8) {}
    /// `En`. `value` is `0..=16383`, centred on `8192`.
    fn pitch_wheel(&mut self, track: usize, tick: u64, channel: u8, value: u16) {}

    /// `FF 00`
    fn sequence_number(&mut self, track: usize, tick: u64, number: Option<u16>) {}
    /// `FF 01`
    fn text(&mut self, track: usize, tick: u64, text: &Text) {}
    /// `FF 02`
    fn copyright(&mut self, track: usize, tick: u64, text: &Text) {}
    /// `FF 03`
    fn track_name(&mut self, track: usize, tick: u64, text: &Text) {}
    /// `FF 04`
    fn instrument_name(&mut self, track: usize, tick: u64, text: &Text) {}
    /// `FF 05`
    fn lyric(&mut self, track: usize, tick: u64, text: &Text) {}
    /// `FF 06`
    fn marker(&mut self, track: usize, tick: u64, text: &Text) {}
    /// `FF 07`
    fn cue_point(&mut self, track: usize, tick: u64, text: &Text) {}
    /// `FF 21`
    fn midi_port(&mut self, track: usize, tick: u64, port: u8) {}
    /// `FF 2F`
    fn end_of_track(&mut self, track: usize, tick: u64) {}
    /// `FF 51`. The reader already plays at `tempo` when this is called.
    fn tempo(&mut self, track: usize, tick: u64, tempo: Tempo) {}
    /// `FF 54`
    fn smpte_offset(&mut self, track: usize, tick: u64, offset: &SmpteOffset) {}
    /// `FF 58`
    fn time_signature(&mut self, track: usize, tick: u64, signature: TimeSignature) {}
    /// `FF 59`
    fn key_signature(&mut self, track: usize, tick: u64, signature: KeySignature) {}
    /// `FF 7F`
    fn sequencer_specific(&mut self, track: usize, tick: u64, data: &[u8]) {}

    /// `F0` and `F7` system exclusive data
    fn system_exclusive(&mut self, track: usize, tick: u64, data: &[u8]) {}
}

/// Drops everything
impl EventHandler for () {}

impl<H: EventHandler + ?Sized> EventHandler for &mut H {
    fn handle(&mut self, track: usize, tick: u64, message: &TrackMessage) {
        (**self).handle(track, tick, message)
    }
}

impl<H: EventHandler + ?Sized> EventHandler for Box<H> {
    fn handle(&mut self, track: usize, tick: u64, message: &TrackMessage) {
        (**self).handle(track, tick, message)
    }
}

#[doc = r#"
Turns a closure into an [`EventHandler`] that sees every message.

# Example
```rust
# use midix_player::prelude::*;
let mut names = Vec::new();
let mut handler = HandlerFn(|track: usize, _tick: u64, message: &TrackMessage| {
    if let TrackMessage::Meta(MetaMessage::TrackName(name)) = message {
        names.push((track, name.to_string()));
    }
});
handler.handle(2, 0, &MetaMessage::TrackName("Bass".into()).into());
drop(handler);
assert_eq!(names, vec![(2, "Bass".to_string())]);
```
"#]
pub struct HandlerFn<F>(pub F);

impl<F> EventHandler for HandlerFn<F>
where
    F: FnMut(usize, u64, &TrackMessage),
{
    fn handle(&mut self, track: usize, tick: u64, message: &TrackMessage) {
        (self.0)(track, tick, message)
    }
}

/// Fire a message that just became due.
///
/// A tempo meta-event updates the reader before the handler sees it, so the
/// next scheduling pass already measures ticks at the new rate.
pub fn dispatch<R, H>(reader: &mut R, handler: &mut H, track: usize, event: &ReaderEvent)
where
    R: EventReader + ?Sized,
    H: EventHandler + ?Sized,
{
    if let Some(tempo) = event.message().tempo() {
        log::debug!("track {track} sets tempo to {tempo} at tick {}", event.absolute_ticks());
        reader.set_tempo(tempo);
    }
    handler.handle(track, event.absolute_ticks(), event.message());
}

/// Call the slot of `handler` that matches `message`.
///
/// Unknown meta-events have no slot and are dropped.
pub fn route<H>(handler: &mut H, track: usize, tick: u64, message: &TrackMessage)
where
    H: EventHandler + ?Sized,
{
    match message {
        TrackMessage::ChannelVoice(voice) => route_voice(handler, track, tick, voice),
        TrackMessage::Meta(meta) => route_meta(handler, track, tick, meta),
        TrackMessage::SystemExclusive(data) => handler.system_exclusive(track, tick, data),
    }
}

fn route_voice<H>(handler: &mut H, track: usize, tick: u64, voice: &ChannelVoiceMessage)
where
    H: EventHandler + ?Sized,
{
    let channel = voice.channel();
    match *voice.event() {
        VoiceEvent::NoteOff { note, velocity } => {
            handler.note_off(track, tick, channel, note, velocity)
        }
        VoiceEvent::NoteOn { note, velocity } => {
            handler.note_on(track, tick, channel, note, velocity)
        }
        VoiceEvent::Aftertouch { note, pressure } => {
            handler.key_pressure(track, tick, channel, note, pressure)
        }
        VoiceEvent::ControlChange { controller, value } => {
            handler.control_change(track, tick, channel, controller, value)
        }
        VoiceEvent::ProgramChange { program } => {
            handler.program_change(track, tick, channel, program)
        }
        VoiceEvent::ChannelPressure { pressure } => {
            handler.channel_pressure(track, tick, channel, pressure)
        }
        VoiceEvent::PitchBend { value } => handler.pitch_wheel(track, tick, channel, value),
    }
}

fn route_meta<H>(handler: &mut H, track: usize, tick: u64, meta: &MetaMessage)
where
    H: EventHandler + ?Sized,
{
    use MetaMessage as M;
    match meta {
        M::SequenceNumber(number) => handler.sequence_number(track, tick, *number),
        M::Text(text) => handler.text(track, tick, text),
        M::Copyright(text) => handler.copyright(track, tick, text),
        M::TrackName(text) => handler.track_name(track, tick, text),
        M::InstrumentName(text) => handler.instrument_name(track, tick, text),
        M::Lyric(text) => handler.lyric(track, tick, text),
        M::Marker(text) => handler.marker(track, tick, text),
        M::CuePoint(text) => handler.cue_point(track, tick, text),
        M::MidiPort(port) => handler.midi_port(track, tick, *port),
        M::EndOfTrack => handler.end_of_track(track, tick),
        M::Tempo(tempo) => handler.tempo(track, tick, *tempo),
        M::SmpteOffset(offset) => handler.smpte_offset(track, tick, offset),
        M::TimeSignature(signature) => handler.time_signature(track, tick, *signature),
        M::KeySignature(signature) => handler.key_signature(track, tick, *signature),
        M::SequencerSpecific(data) => handler.sequencer_specific(track, tick, data),
        M::Unknown { kind, .. } => {
            log::trace!("track {track} drops unknown meta-event {kind:#04x} at tick {tick}");
        }
    }
}
