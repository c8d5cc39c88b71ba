use std::time::Duration;

use alien_turret::canvas::Canvas;
use alien_turret::config::GameConfig;
use alien_turret::driver::{Cadence, Driver, FrameOutcome, Phase};
use alien_turret::entities::EntityKind;
use alien_turret::store::{MemoryScoreStore, ScoreStore};

use rand::rngs::StdRng;
use rand::SeedableRng;

type TestDriver = Driver<Canvas, MemoryScoreStore, StdRng>;

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

fn driver_with(config: GameConfig, best: u32) -> TestDriver {
    Driver::new(
        config,
        Canvas::new(),
        MemoryScoreStore::new(best),
        StdRng::seed_from_u64(42),
    )
}

fn driver() -> TestDriver {
    driver_with(GameConfig::default(), 0)
}

fn aliens(d: &TestDriver) -> usize {
    d.state().stage.registry().count_of_kind(EntityKind::Alien)
}

// ── Cadence ───────────────────────────────────────────────────────────────────

#[test]
fn cadence_fires_once_per_interval() {
    let mut c = Cadence::new(ms(1000));
    c.rebaseline(ms(0));

    assert!(!c.due(ms(999)));
    assert!(c.due(ms(1000)));
    assert_eq!(c.last(), ms(1000));
    assert!(!c.due(ms(1500)));
    assert!(c.due(ms(2300)));
    assert_eq!(c.last(), ms(2300));
}

#[test]
fn cadence_skip_moves_the_baseline() {
    let mut c = Cadence::new(ms(1000));
    c.rebaseline(ms(0));
    c.skip(ms(2000));
    assert!(!c.due(ms(2999)));
    assert!(c.due(ms(3000)));
}

// ── Phases ────────────────────────────────────────────────────────────────────

#[test]
fn toggle_walks_the_state_machine() {
    let mut d = driver();
    assert_eq!(d.phase(), Phase::Idle);
    assert_eq!(d.toggle(ms(0)), Phase::Running);
    assert_eq!(d.toggle(ms(10)), Phase::Paused);
    assert_eq!(d.toggle(ms(20)), Phase::Running);
}

#[test]
fn idle_frames_do_nothing() {
    let mut d = driver();
    assert_eq!(d.frame(ms(5000)), FrameOutcome::Suspended);
    assert!(d.state().stage.registry().is_empty());
}

#[test]
fn start_places_the_turret_and_loads_the_best_score() {
    let mut d = driver_with(GameConfig::default(), 42);
    d.start(ms(0));

    assert_eq!(d.phase(), Phase::Running);
    assert_eq!(d.best_score(), 42);
    assert_eq!(d.score(), 0);
    assert_eq!(d.state().stage.registry().count_of_kind(EntityKind::Turret), 1);
    assert_eq!(d.state().stage.registry().len(), 1);
}

// ── Frames ────────────────────────────────────────────────────────────────────

#[test]
fn alien_tick_waits_for_its_interval() {
    let mut d = driver();
    d.start(ms(0));

    assert_eq!(d.frame(ms(16)), FrameOutcome::Rearm);
    assert_eq!(d.frame(ms(999)), FrameOutcome::Rearm);
    assert_eq!(aliens(&d), 0);

    d.frame(ms(1000));
    assert_eq!(aliens(&d), 1);
    assert_eq!(d.alien_cadence().last(), ms(1000));
    // The missile cadence fired on its own at 999
    assert_eq!(d.missile_cadence().last(), ms(999));
}

#[test]
fn pause_and_resume_do_not_count_the_pause() {
    let mut d = driver();
    d.start(ms(0));
    d.frame(ms(500));

    d.toggle(ms(500));
    assert_eq!(d.phase(), Phase::Paused);
    assert_eq!(d.frame(ms(1500)), FrameOutcome::Suspended);
    assert_eq!(aliens(&d), 0);

    // Two seconds later
    d.toggle(ms(2500));
    assert_eq!(d.phase(), Phase::Running);

    d.frame(ms(2500));
    assert_eq!(aliens(&d), 0, "resuming must not fire the alien tick at once");
    d.frame(ms(2999));
    assert_eq!(aliens(&d), 0);

    d.frame(ms(3000));
    assert_eq!(aliens(&d), 1);
}

#[test]
fn missiles_keep_their_own_pace() {
    let mut d = driver();
    d.start(ms(0));
    d.frame(ms(1000));
    let alien = d.state().stage.registry().ids_of_kind(EntityKind::Alien)[0];

    let missile = d.press(alien).unwrap();
    let start_y = d.state().stage.get(missile).unwrap().sprite.top();

    d.frame(ms(1020));
    assert_eq!(d.state().stage.get(missile).unwrap().sprite.top(), start_y);
    d.frame(ms(1050));
    assert_eq!(d.state().stage.get(missile).unwrap().sprite.top(), start_y - 10);
}

#[test]
fn presses_only_count_while_running() {
    let mut d = driver();
    d.start(ms(0));
    d.frame(ms(1000));
    let alien = d.state().stage.registry().ids_of_kind(EntityKind::Alien)[0];

    d.pause(ms(1001));
    assert_eq!(d.press(alien), None);
    assert_eq!(d.state().missile_population, 0);

    d.resume(ms(1002));
    assert!(d.press(alien).is_some());
    assert_eq!(d.state().missile_population, 1);
}

// ── Speed dial ────────────────────────────────────────────────────────────────

#[test]
fn speed_dial_snaps_and_locks_during_play() {
    let mut d = driver();
    assert!(d.set_speed(55));
    assert_eq!(d.speed(), 50);
    assert!(d.set_speed(5));
    assert_eq!(d.speed(), 10);
    assert!(d.set_speed(1000));
    assert_eq!(d.speed(), 100);

    d.start(ms(0));
    assert!(!d.set_speed(30));
    assert_eq!(d.speed(), 100);
    d.pause(ms(1));
    assert!(!d.set_speed(30));
}

// ── Game over ─────────────────────────────────────────────────────────────────

/// A short canvas: at full dial speed aliens land within a few ticks.
fn short_canvas() -> GameConfig {
    let mut config = GameConfig::default();
    config.canvas.height = 120;
    config
}

fn run_until_over(d: &mut TestDriver, from: u64) -> u64 {
    let mut now = from;
    while now < 10_000 {
        if d.frame(ms(now)) == FrameOutcome::GameOver {
            return now;
        }
        now += 50;
    }
    panic!("game never ended");
}

#[test]
fn landing_stops_the_driver() {
    let mut d = driver_with(short_canvas(), 7);
    d.set_speed(100);
    d.start(ms(0));

    let ended = run_until_over(&mut d, 50);

    assert!(ended <= 3000);
    assert_eq!(d.phase(), Phase::GameOver);
    assert_eq!(d.frame(ms(ended + 1000)), FrameOutcome::Suspended);
    // No points, so the stored best is untouched
    assert_eq!(d.best_score(), 7);
    assert_eq!(d.store().best().unwrap(), 7);
}

#[test]
fn beating_the_best_score_is_persisted() {
    let mut d = driver_with(short_canvas(), 0);
    d.set_speed(100);
    d.start(ms(0));
    d.frame(ms(1000));

    let alien = d.state().stage.registry().ids_of_kind(EntityKind::Alien)[0];
    d.press(alien).unwrap();

    run_until_over(&mut d, 1050);

    assert!(d.score() > 0);
    assert_eq!(d.best_score(), d.score());
    assert_eq!(d.store().best().unwrap(), d.score());
}

#[test]
fn toggle_after_game_over_clears_the_board() {
    let mut d = driver_with(short_canvas(), 0);
    d.set_speed(100);
    d.start(ms(0));
    run_until_over(&mut d, 50);

    assert_eq!(d.toggle(ms(5000)), Phase::Idle);
    assert!(d.state().stage.registry().is_empty());
    assert_eq!(d.surface().visible_count(), 0);
    assert_eq!(d.score(), 0);

    // And the dial is free again
    assert!(d.set_speed(20));
    assert_eq!(d.toggle(ms(6000)), Phase::Running);
}
