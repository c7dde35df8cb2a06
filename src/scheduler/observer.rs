use log::warn;

/// How late (or early) a dispatch was compared to its track's previous one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DriftReport {
    /// Track that fired
    pub track: usize,
    /// The message's delta time converted to milliseconds
    pub expected_ms: f64,
    /// Wall-clock milliseconds since the track's previous dispatch
    pub real_ms: u64,
    /// `real_ms - expected_ms`
    pub diff_ms: f64,
}

/// Side channel for timing diagnostics.
///
/// Nothing reported here changes what the scheduler does.
#[allow(unused_variables)]
pub trait PlaybackObserver {
    /// The virtual clock went backwards by `delta_tick` ticks (always negative).
    /// The scheduler treats the pass as if no time passed.
    fn clock_anomaly(&mut self, delta_tick: i64) {}

    /// A dispatch happened further from its expected time than the configured threshold.
    fn drift(&mut self, report: &DriftReport) {}
}

/// Reports nothing
impl PlaybackObserver for () {}

/// Forwards everything to [`log`] at warn level. This is the default observer.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogObserver;

impl PlaybackObserver for LogObserver {
    fn clock_anomaly(&mut self, delta_tick: i64) {
        warn!("clock went back {} ticks, holding position", -delta_tick);
    }

    fn drift(&mut self, report: &DriftReport) {
        warn!(
            "track {}: expected {:.0} ms, real {} ms, diff {:.0} ms",
            report.track, report.expected_ms, report.real_ms, report.diff_ms
        );
    }
}
