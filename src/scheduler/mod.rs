#![doc = r#"
The tick-driven synchronization engine

Every track keeps a countdown: the number of ticks left until its buffered
message is due. Each call to [`Player::tick`](crate::player::Player::tick) converts the wall-clock
time elapsed since playback started into a virtual tick position, subtracts the
progress since the previous call from every countdown, and fires whatever
reached zero.

# Catch-up
A single call may come late (a slow frame, a slow handler), or a track may hold
several messages with a zero delta. After a track fires, its countdown is
refilled with the next message's delta; if that is still not positive, another
pass with zero progress runs. Passes repeat until no track is due, so nothing is
skipped and no track lags behind the others.

# Tempo changes
Virtual ticks are always measured at the current tempo. When the tempo changes,
the position reached by the previous call is rescaled into the new tick length
(rebasing), so that the next progress step only covers the wall-clock time that
actually passed since then:

```text
time_scale_factor = old ms_per_tick / new ms_per_tick
virtual_tick_last = virtual_tick_last * time_scale_factor
```

The product is computed on the exact tick ratios and truncated, so the rebased
position never runs ahead of the position the clock yields at the new tempo.
"#]

mod config;
pub use config::*;

mod observer;
pub use observer::*;

use log::debug;

use crate::{
    dispatch::{EventHandler, dispatch},
    reader::{EventReader, ReaderEvent},
    time::{Clock, TickDuration},
};

/// One track's position in the schedule.
#[derive(Debug, Clone)]
pub struct TrackCursor {
    countdown: i64,
    pending: Option<ReaderEvent>,
    finished: bool,
    last_dispatch_ms: u64,
    last_delta_ticks: u32,
}

impl TrackCursor {
    fn primed(pending: Option<ReaderEvent>, now_ms: u64) -> Self {
        let delta = pending.as_ref().map_or(0, ReaderEvent::delta_ticks);
        Self {
            countdown: delta as i64,
            finished: pending.is_none(),
            pending,
            last_dispatch_ms: now_ms,
            last_delta_ticks: delta,
        }
    }

    /// Ticks until the buffered message is due. Zero or less means due.
    pub const fn countdown(&self) -> i64 {
        self.countdown
    }

    /// The buffered message, fetched but not fired yet
    pub const fn pending(&self) -> Option<&ReaderEvent> {
        self.pending.as_ref()
    }

    /// True once the reader ran out of messages for this track
    pub const fn is_finished(&self) -> bool {
        self.finished
    }

    /// Wall-clock time of the previous dispatch (or of playback start)
    pub const fn last_dispatch_ms(&self) -> u64 {
        self.last_dispatch_ms
    }

    /// Delta time of the buffered message, as fetched
    pub const fn last_delta_ticks(&self) -> u32 {
        self.last_delta_ticks
    }

    fn is_due(&self) -> bool {
        !self.finished && self.countdown <= 0
    }
}

/// Everything the scheduler knows about one open file.
#[derive(Debug, Clone)]
pub struct PlayerState {
    tracks: Vec<TrackCursor>,
    clock_epoch: u64,
    virtual_tick_now: i64,
    virtual_tick_last: i64,
    last_tick_duration: TickDuration,
    time_scale_factor: f64,
    all_finished: bool,
}

/// What one pass needs besides the state itself.
pub(crate) struct PassContext<'a, R: ?Sized, C: ?Sized, H: ?Sized> {
    pub reader: &'a mut R,
    pub clock: &'a C,
    pub handler: &'a mut H,
    pub observer: &'a mut dyn PlaybackObserver,
    pub config: &'a PlayerConfig,
}

impl PlayerState {
    /// Buffer the first message of every track and start the clock.
    ///
    /// Tracks without a single message start out finished.
    pub fn prime<R, C>(reader: &mut R, clock: &C) -> Self
    where
        R: EventReader + ?Sized,
        C: Clock + ?Sized,
    {
        let clock_epoch = clock.now_millis();
        let tracks: Vec<_> = (0..reader.track_count())
            .map(|track| {
                let first = if reader.is_track_finished(track) {
                    None
                } else {
                    reader.next_message(track)
                };
                TrackCursor::primed(first, clock_epoch)
            })
            .collect();

        Self {
            all_finished: tracks.iter().all(TrackCursor::is_finished),
            tracks,
            clock_epoch,
            virtual_tick_now: 0,
            virtual_tick_last: 0,
            last_tick_duration: reader.tick_duration(),
            time_scale_factor: 1.,
        }
    }

    /// Per-track cursors, in track order
    pub fn tracks(&self) -> &[TrackCursor] {
        &self.tracks
    }

    /// Wall-clock time playback started at
    pub const fn clock_epoch(&self) -> u64 {
        self.clock_epoch
    }

    /// Virtual position computed by the latest call, in ticks at the current tempo
    pub const fn virtual_tick_now(&self) -> i64 {
        self.virtual_tick_now
    }

    /// Position progress was last measured from, in ticks at the current tempo
    pub const fn virtual_tick_last(&self) -> i64 {
        self.virtual_tick_last
    }

    /// The tick length in effect as of the latest call
    pub const fn tick_duration(&self) -> TickDuration {
        self.last_tick_duration
    }

    /// The factor of the most recent rebase; `1.0` until the tempo first changes
    pub const fn time_scale_factor(&self) -> f64 {
        self.time_scale_factor
    }

    /// True once every track is finished
    pub const fn is_finished(&self) -> bool {
        self.all_finished
    }

    /// Rescale the previous position if the reader's tick length changed.
    fn rebase(&mut self, current: TickDuration, comparison: TempoComparison) {
        if comparison.has_changed(self.last_tick_duration, current) {
            self.time_scale_factor = self.last_tick_duration.ms_per_tick() / current.ms_per_tick();
            let rebased = self
                .last_tick_duration
                .convert_ticks(self.virtual_tick_last, current);
            debug!(
                "tempo changed from {:.4} to {:.4} ms/tick, rebasing tick {} -> {}",
                self.last_tick_duration.ms_per_tick(),
                current.ms_per_tick(),
                self.virtual_tick_last,
                rebased
            );
            self.virtual_tick_last = rebased;
        }
        self.last_tick_duration = current;
    }

    /// Run one scheduling step: fire every message that is due by now.
    ///
    /// Returns `false` if every track had already finished before this call.
    pub(crate) fn advance<R, C, H>(&mut self, mut cx: PassContext<'_, R, C, H>) -> bool
    where
        R: EventReader + ?Sized,
        C: Clock + ?Sized,
        H: EventHandler + ?Sized,
    {
        if self.all_finished {
            return false;
        }

        self.rebase(cx.reader.tick_duration(), cx.config.tempo_comparison);
        let tick_duration = self.last_tick_duration;
        let elapsed = cx.clock.now_millis().saturating_sub(self.clock_epoch);
        self.virtual_tick_now = tick_duration.ticks_in(elapsed);

        let mut delta_tick = self.virtual_tick_now - self.virtual_tick_last;
        if delta_tick < 0 {
            cx.observer.clock_anomaly(delta_tick);
            delta_tick = 0;
        }

        loop {
            let mut catch_up = false;
            for (index, cursor) in self.tracks.iter_mut().enumerate() {
                if cursor.finished {
                    continue;
                }
                cursor.countdown -= delta_tick;
                if cursor.countdown <= 0 {
                    fire(index, cursor, tick_duration, &mut cx);
                    catch_up |= cursor.is_due();
                }
            }
            // never move the baseline backwards after a clamped step
            self.virtual_tick_last = self.virtual_tick_last.max(self.virtual_tick_now);

            if !catch_up {
                break;
            }
            delta_tick = 0;
        }

        self.all_finished = self.tracks.iter().all(TrackCursor::is_finished);
        true
    }
}

fn fire<R, C, H>(
    index: usize,
    cursor: &mut TrackCursor,
    tick_duration: TickDuration,
    cx: &mut PassContext<'_, R, C, H>,
) where
    R: EventReader + ?Sized,
    C: Clock + ?Sized,
    H: EventHandler + ?Sized,
{
    let Some(event) = cursor.pending.take() else {
        cursor.finished = true;
        return;
    };
    dispatch(&mut *cx.reader, &mut *cx.handler, index, &event);

    let now = cx.clock.now_millis();
    if cx.config.report_drift {
        let expected_ms = cursor.last_delta_ticks as f64 * tick_duration.ms_per_tick();
        let real_ms = now.saturating_sub(cursor.last_dispatch_ms);
        let diff_ms = real_ms as f64 - expected_ms;
        if diff_ms.abs() > cx.config.drift_threshold_ms {
            cx.observer.drift(&DriftReport {
                track: index,
                expected_ms,
                real_ms,
                diff_ms,
            });
        }
    }

    match cx.reader.next_message(index) {
        Some(next) => {
            cursor.countdown += next.delta_ticks() as i64;
            cursor.last_delta_ticks = next.delta_ticks();
            cursor.last_dispatch_ms = now;
            cursor.pending = Some(next);
        }
        None => {
            debug!("track {index} finished at tick {}", event.absolute_ticks());
            cursor.finished = true;
        }
    }
}
