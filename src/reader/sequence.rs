use std::vec;

use super::{EventReader, ReaderEvent, Timing};
use crate::{
    message::TrackMessage,
    time::{Tempo, TickDuration},
};

#[doc = r#"
An [`EventReader`] over tracks held in memory.

Every track is a list of `(delta_ticks, message)` pairs. The current tempo
starts at [`Tempo::DEFAULT`] and only changes through
[`set_tempo`](EventReader::set_tempo), which the dispatcher calls when a tempo
meta-event fires.
"#]
#[derive(Debug, Clone)]
pub struct SequenceReader {
    timing: Timing,
    tempo: Tempo,
    tracks: Vec<TrackStream>,
}

#[derive(Debug, Clone)]
struct TrackStream {
    events: vec::IntoIter<(u32, TrackMessage)>,
    absolute_ticks: u64,
}

impl SequenceReader {
    /// A reader without any tracks
    pub fn new(timing: Timing) -> Self {
        Self {
            timing,
            tempo: Tempo::DEFAULT,
            tracks: Vec::new(),
        }
    }

    /// Append a track
    pub fn with_track<I>(mut self, events: I) -> Self
    where
        I: IntoIterator<Item = (u32, TrackMessage)>,
    {
        self.push_track(events);
        self
    }

    /// Append a track
    pub fn push_track<I>(&mut self, events: I)
    where
        I: IntoIterator<Item = (u32, TrackMessage)>,
    {
        let events: Vec<_> = events.into_iter().collect();
        self.tracks.push(TrackStream {
            events: events.into_iter(),
            absolute_ticks: 0,
        });
    }

    /// Returns header info
    pub const fn timing(&self) -> Timing {
        self.timing
    }

    /// The tempo currently in effect
    pub const fn tempo(&self) -> Tempo {
        self.tempo
    }

    /// Messages left on `track`
    pub fn remaining(&self, track: usize) -> usize {
        self.tracks.get(track).map_or(0, |t| t.events.len())
    }
}

impl EventReader for SequenceReader {
    fn track_count(&self) -> usize {
        self.tracks.len()
    }

    fn next_message(&mut self, track: usize) -> Option<ReaderEvent> {
        let stream = self.tracks.get_mut(track)?;
        let (delta, message) = stream.events.next()?;
        stream.absolute_ticks += delta as u64;
        Some(ReaderEvent::new(delta, stream.absolute_ticks, message))
    }

    fn is_track_finished(&self, track: usize) -> bool {
        self.remaining(track) == 0
    }

    fn tick_duration(&self) -> TickDuration {
        self.timing.tick_duration(self.tempo)
    }

    fn set_tempo(&mut self, tempo: Tempo) {
        self.tempo = tempo;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::{MetaMessage, VoiceEvent};
    use pretty_assertions::assert_eq;

    fn note(delta: u32, note: u8) -> (u32, TrackMessage) {
        (
            delta,
            TrackMessage::voice(0, VoiceEvent::NoteOn { note, velocity: 64 }),
        )
    }

    #[test]
    fn absolute_ticks_accumulate_per_track() {
        let mut reader = SequenceReader::new(Timing::new_ticks_per_quarter_note(96))
            .with_track([note(10, 60), note(20, 61), (5, MetaMessage::EndOfTrack.into())])
            .with_track([note(7, 40)]);

        assert_eq!(reader.track_count(), 2);
        assert_eq!(reader.next_message(1).unwrap().absolute_ticks(), 7);
        assert_eq!(reader.next_message(0).unwrap().absolute_ticks(), 10);
        assert_eq!(reader.next_message(0).unwrap().absolute_ticks(), 30);

        let last = reader.next_message(0).unwrap();
        assert_eq!(last.delta_ticks(), 5);
        assert_eq!(last.absolute_ticks(), 35);
        assert!(last.message().is_end_of_track());

        assert!(reader.is_track_finished(0));
        assert!(reader.is_track_finished(1));
        assert_eq!(reader.next_message(0), None);
    }

    #[test]
    fn out_of_range_tracks_are_finished() {
        let mut reader = SequenceReader::new(Timing::new_ticks_per_quarter_note(96));
        assert!(reader.is_track_finished(3));
        assert_eq!(reader.next_message(3), None);
    }

    #[test]
    fn set_tempo_changes_tick_duration() {
        let mut reader = SequenceReader::new(Timing::new_ticks_per_quarter_note(100));
        assert_eq!(reader.ms_per_tick(), 5.);
        reader.set_tempo(Tempo::new(250_000));
        assert_eq!(reader.ms_per_tick(), 2.5);
        assert_eq!(reader.tempo(), Tempo::new(250_000));
    }
}
