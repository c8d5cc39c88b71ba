use std::cell::Cell;
use std::rc::Rc;

use alien_turret::canvas::PressRegistration;
use alien_turret::entities::*;
use alien_turret::registry::Registry;

// ── Size & position ───────────────────────────────────────────────────────────

#[test]
fn size_is_at_least_one_unit() {
    let s = Size::new(0, -5);
    assert_eq!(s.width(), 1);
    assert_eq!(s.height(), 1);
    assert_eq!(Size::default(), Size::new(1, 1));
}

#[test]
fn move_is_relative() {
    let mut sprite = Sprite::new(Size::square(10));
    sprite.move_by(100, 100, false);
    sprite.move_by(10, 10, false);
    assert_eq!(sprite.position(), Position { x: 110, y: 110 });
}

#[test]
fn position_may_leave_the_canvas() {
    let mut sprite = Sprite::new(Size::square(10));
    sprite.move_by(-50, -70, false);
    assert_eq!(sprite.left(), -50);
    assert_eq!(sprite.top(), -70);
    assert_eq!(sprite.right(), -40);
    assert_eq!(sprite.bottom(), -60);
}

// ── Steps ─────────────────────────────────────────────────────────────────────

fn counting_steps(log: &Rc<Cell<[u32; 3]>>) -> Vec<Step> {
    (0..3)
        .map(|i| {
            let log = Rc::clone(log);
            Rc::new(move |_: &mut Sprite| {
                let mut counts = log.get();
                counts[i] += 1;
                log.set(counts);
            }) as Step
        })
        .collect()
}

#[test]
fn steps_cycle_and_wrap() {
    let log = Rc::new(Cell::new([0u32; 3]));
    let mut sprite = Sprite::new(Size::square(10));
    sprite.set_steps(counting_steps(&log));

    for _ in 0..7 {
        sprite.move_by(0, 1, true);
    }

    assert_eq!(log.get(), [3, 2, 2]);
    assert_eq!(sprite.step_cursor(), 1);
}

#[test]
fn move_without_step_leaves_cursor_alone() {
    let log = Rc::new(Cell::new([0u32; 3]));
    let mut sprite = Sprite::new(Size::square(10));
    sprite.set_steps(counting_steps(&log));

    sprite.move_by(0, 1, false);

    assert_eq!(log.get(), [0, 0, 0]);
    assert_eq!(sprite.step_cursor(), 0);
}

#[test]
fn replacing_steps_restarts_the_cycle() {
    let log = Rc::new(Cell::new([0u32; 3]));
    let mut sprite = Sprite::new(Size::square(10));
    sprite.set_steps(counting_steps(&log));
    sprite.perform_step();
    sprite.perform_step();
    assert_eq!(sprite.step_cursor(), 2);

    let step: Step = Rc::new(|s: &mut Sprite| s.set_frame(7));
    sprite.set_steps(vec![step]);
    assert_eq!(sprite.step_cursor(), 0);

    sprite.perform_step();
    assert_eq!(sprite.frame(), 7);
    assert_eq!(sprite.step_cursor(), 0);
}

#[test]
fn no_steps_is_fine() {
    let mut sprite = Sprite::new(Size::square(10)).with_frame(3);
    sprite.move_by(1, 1, true);
    assert_eq!(sprite.frame(), 3);
    assert_eq!(sprite.step_count(), 0);
}

// ── Kinds ─────────────────────────────────────────────────────────────────────

#[test]
fn alien_alternates_between_its_two_frames() {
    let mut alien = Entity::alien(20, 4);
    assert_eq!(alien.kind(), EntityKind::Alien);
    assert_eq!(alien.sprite.size(), Size::square(20));

    alien.sprite.move_by(0, 0, true);
    assert_eq!(alien.sprite.frame(), 8);
    alien.sprite.move_by(0, 10, true);
    assert_eq!(alien.sprite.frame(), 9);
    alien.sprite.move_by(0, 10, true);
    assert_eq!(alien.sprite.frame(), 8);
}

#[test]
fn missile_and_turret_have_no_steps() {
    let missile = Entity::missile(10);
    let turret = Entity::turret(30);
    assert_eq!(missile.kind(), EntityKind::Missile);
    assert_eq!(turret.kind(), EntityKind::Turret);
    assert_eq!(missile.sprite.step_count(), 0);
    assert_eq!(turret.sprite.step_count(), 0);
    assert_eq!(missile.sprite.frame(), MISSILE_FRAME);
    assert_eq!(turret.sprite.frame(), TURRET_FRAME);
}

#[test]
fn exploding_alien_marks_it_dead_and_hands_back_its_listener() {
    // Any id will do for the registration; mint one from a registry.
    let id = Registry::new().insert(Entity::missile(10));

    let mut alien = Entity::alien(10, 0);
    alien.as_alien_mut().unwrap().press = Some(PressRegistration::new(id));
    assert!(alien.is_live_alien());

    let registration = alien.explode();

    assert_eq!(registration, Some(PressRegistration::new(id)));
    assert!(alien.as_alien().unwrap().dead);
    assert!(alien.as_alien().unwrap().press.is_none());
    assert!(!alien.is_live_alien());
    assert_eq!(alien.sprite.frame(), ALIEN_EXPLOSION_FRAME);

    // Second explosion has nothing left to hand back
    assert_eq!(alien.explode(), None);
}

#[test]
fn turret_explosion_is_cosmetic() {
    let mut turret = Entity::turret(30);
    assert_eq!(turret.explode(), None);
    assert_eq!(turret.sprite.frame(), TURRET_EXPLODED_FRAME);
    match &turret.role {
        Role::Turret(state) => assert!(state.exploded),
        other => panic!("expected turret, got {:?}", other),
    }
}
