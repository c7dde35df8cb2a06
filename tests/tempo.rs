mod common;

use common::*;
use midix_player::prelude::*;
use pretty_assertions::assert_eq;

#[test]
fn halving_the_tempo_rebases_the_previous_position() {
    let reader = five_ms_ticks().with_track([tempo(1000, 250_000), note_on(100, 60)]);
    let (mut player, clock) = player(reader);

    clock.set(5_000);
    assert!(player.tick());
    assert_eq!(player.handler().fired.len(), 1);
    assert_eq!(player.reader().tempo(), Tempo::new(250_000));
    assert_eq!(player.state().virtual_tick_last(), 1000);
    assert_eq!(player.state().time_scale_factor(), 1.);

    // same instant, new tick length: 1000 ticks of 5ms are 2000 ticks of 2.5ms
    assert!(player.tick());
    assert_eq!(player.state().time_scale_factor(), 2.);
    assert_eq!(player.state().virtual_tick_last(), 2000);
    assert_eq!(player.state().virtual_tick_now(), 2000);
    assert_eq!(player.state().tracks()[0].countdown(), 100);

    clock.set(5_249);
    assert!(player.tick());
    assert_eq!(player.handler().fired.len(), 1);

    clock.set(5_250);
    assert!(player.tick());
    let last = player.handler().fired.last().cloned();
    assert_eq!(last.map(|f| (f.tick, f.at_ms)), Some((1100, 5_250)));
}

#[test]
fn a_fractional_rebase_never_looks_like_the_clock_going_back() {
    // 5ms per tick, then 3ms per tick from tick 1 on
    let reader = five_ms_ticks().with_track([tempo(1, 300_000), note_on(10, 60)]);
    let diagnostics = SharedObserver::default();
    let (player, clock) = player(reader);
    let mut player = player.with_observer(diagnostics.clone());

    clock.set(5);
    assert!(player.tick());
    assert!(player.tick());

    let state = player.state();
    assert!(state.time_scale_factor() > 1.66 && state.time_scale_factor() < 1.67);
    assert!(state.virtual_tick_last() <= state.virtual_tick_now());
    assert!(diagnostics.0.borrow().anomalies.is_empty());

    play_to_end(&mut player, 1);
    assert!(diagnostics.0.borrow().anomalies.is_empty());

    // 5ms for the first tick, then 10 ticks of 3ms
    let fired = &player.handler().fired;
    assert_eq!(fired.len(), 2);
    assert!(fired[1].at_ms.abs_diff(35) <= 3, "fired at {}ms", fired[1].at_ms);
}

/// A note 400 ticks in, with the tempo changing at tick 200 on another track.
fn note_time_after_tempo_change(micros_per_quarter: u32, config: PlayerConfig) -> u64 {
    let reader = five_ms_ticks()
        .with_track([tempo(200, micros_per_quarter)])
        .with_track([note_on(400, 60)]);
    let clock = ManualClock::new();
    let mut player =
        Player::with_config(reader, clock.clone(), Recorder::new(&clock), config).with_observer(());
    play_to_end(&mut player, 1);

    let fired = &player.handler().fired;
    assert_eq!(fired.len(), 2);
    assert_eq!(fired[1].tick, 400);
    fired[1].at_ms
}

#[test]
fn wall_clock_time_survives_a_faster_tempo() {
    // 200 ticks at 5ms, then 200 ticks at 2.5ms
    let at = note_time_after_tempo_change(250_000, PlayerConfig::default());
    assert_eq!(at, 1_500);
}

#[test]
fn wall_clock_time_survives_a_slower_tempo() {
    // 200 ticks at 5ms, then 200 ticks at 10ms
    let at = note_time_after_tempo_change(1_000_000, PlayerConfig::default());
    assert_eq!(at, 3_000);
}

#[test]
fn legacy_tempo_comparison_behaves_the_same_for_real_changes() {
    let config = PlayerConfig::default().with_tempo_comparison(TempoComparison::legacy());
    assert_eq!(note_time_after_tempo_change(250_000, config), 1_500);
}

#[test]
fn repeating_the_current_tempo_does_not_rebase() {
    let reader = five_ms_ticks().with_track([tempo(100, 500_000), note_on(100, 60)]);
    let (mut player, clock) = player(reader);

    clock.set(500);
    assert!(player.tick());
    clock.set(501);
    assert!(player.tick());
    assert_eq!(player.state().time_scale_factor(), 1.);
    assert_eq!(player.state().virtual_tick_last(), 100);
}

#[test]
fn smpte_timing_ignores_tempo_events() {
    // 25 fps * 40 ticks per frame: 1ms per tick, whatever the tempo
    let reader = SequenceReader::new(Timing::new_smpte(SmpteFps::TwentyFive, 40))
        .with_track([tempo(0, 250_000), note_on(100, 60)]);
    let (mut player, _clock) = player(reader);
    play_to_end(&mut player, 1);

    assert_eq!(player.state().time_scale_factor(), 1.);
    let times: Vec<u64> = player.handler().fired.iter().map(|f| f.at_ms).collect();
    assert_eq!(times, vec![0, 100]);
}

#[test]
fn the_handler_sees_the_new_tempo_already_applied() {
    struct TempoLog {
        seen: Vec<(Tempo, f64)>,
    }

    impl EventHandler for TempoLog {
        fn tempo(&mut self, _track: usize, _tick: u64, tempo: Tempo) {
            self.seen.push((tempo, tempo.bpm()));
        }
    }

    let reader = five_ms_ticks().with_track([tempo(0, 250_000), tempo(10, 1_000_000)]);
    let clock = ManualClock::new();
    let mut player = Player::new(reader, clock.clone(), TempoLog { seen: Vec::new() })
        .with_observer(());

    while player.tick() {
        clock.advance(1);
    }

    let seen = &player.handler().seen;
    assert_eq!(seen.len(), 2);
    assert_eq!(seen[0], (Tempo::new(250_000), 240.));
    assert_eq!(seen[1], (Tempo::new(1_000_000), 60.));
    assert_eq!(player.reader().tempo(), Tempo::new(1_000_000));
}
