mod common;

use common::*;
use midix_player::prelude::*;
use pretty_assertions::assert_eq;

#[test]
fn a_clock_going_backwards_is_clamped_and_reported() {
    let reader = five_ms_ticks().with_track([note_on(0, 1), note_on(100, 2)]);
    let diagnostics = SharedObserver::default();
    let (player, clock) = player(reader);
    let mut player = player.with_observer(diagnostics.clone());

    assert!(player.tick());
    clock.set(300);
    assert!(player.tick());
    assert_eq!(player.state().tracks()[0].countdown(), 40);

    // 60 ticks back to 20
    clock.set(100);
    assert!(player.tick());
    assert_eq!(diagnostics.0.borrow().anomalies, vec![-40]);
    assert_eq!(player.state().tracks()[0].countdown(), 40);
    assert_eq!(player.state().virtual_tick_last(), 60);
    assert_eq!(player.handler().fired.len(), 1);

    // progress resumes from the highest position reached
    clock.set(400);
    assert!(player.tick());
    assert_eq!(player.state().tracks()[0].countdown(), 20);
    assert_eq!(diagnostics.0.borrow().anomalies.len(), 1);

    clock.set(500);
    assert!(player.tick());
    let fired = &player.handler().fired;
    assert_eq!(fired.len(), 2);
    assert_eq!(fired[1].at_ms, 500);
}

#[test]
fn a_stalled_clock_is_not_an_anomaly() {
    let reader = five_ms_ticks().with_track([note_on(0, 1), note_on(100, 2)]);
    let diagnostics = SharedObserver::default();
    let (player, clock) = player(reader);
    let mut player = player.with_observer(diagnostics.clone());

    clock.set(250);
    for _ in 0..5 {
        assert!(player.tick());
    }
    assert!(diagnostics.0.borrow().anomalies.is_empty());
    assert_eq!(player.state().tracks()[0].countdown(), 50);
}

#[test]
fn a_clock_behind_the_epoch_counts_as_the_epoch() {
    let clock = ManualClock::new();
    clock.set(1_000);
    let reader = five_ms_ticks().with_track([note_on(10, 1)]);
    let mut player = Player::new(reader, clock.clone(), Recorder::new(&clock)).with_observer(());
    assert_eq!(player.state().clock_epoch(), 1_000);

    clock.set(10);
    assert!(player.tick());
    assert_eq!(player.state().virtual_tick_now(), 0);
    assert_eq!(player.state().tracks()[0].countdown(), 10);

    clock.set(1_050);
    assert!(player.tick());
    assert!(player.is_finished());
}
