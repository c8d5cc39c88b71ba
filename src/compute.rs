/// Game rules: the alien tick, the missile tick, and the player's press.
///
/// Every function takes the current `GameState` mutably; the registry and
/// surface side effects all go through its `Stage`, so whatever is on
/// screen always matches what is in the registry.  Randomness comes only
/// through the injected RNG.

use log::{debug, info};
use rand::Rng;

use crate::canvas::Surface;
use crate::config::GameConfig;
use crate::entities::{Entity, EntityKind};
use crate::registry::EntityId;
use crate::spawn::{plan_spawn, Placement};
use crate::stage::Stage;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    Continue,
    GameOver,
}

/// The simulation state of one game.
#[derive(Debug)]
pub struct GameState<S> {
    pub stage: Stage<S>,
    pub config: GameConfig,
    pub turret: Option<EntityId>,
    /// Live (not exploded) aliens.
    pub alien_population: u32,
    pub missile_population: u32,
    pub score: u32,
    /// Alien descent per alien tick.
    pub speed: u32,
}

// ── Constructors ─────────────────────────────────────────────────────────────

/// An empty board at the dial's initial speed.
pub fn init_state<S: Surface>(config: GameConfig, surface: S) -> GameState<S> {
    let speed = config.speed.initial;
    GameState {
        stage: Stage::new(surface),
        config,
        turret: None,
        alien_population: 0,
        missile_population: 0,
        score: 0,
        speed,
    }
}

/// Remove every entity and zero the counters.
pub fn reset<S: Surface>(state: &mut GameState<S>) {
    state.stage.clear();
    state.turret = None;
    state.alien_population = 0;
    state.missile_population = 0;
    state.score = 0;
}

/// Put the turret at the bottom centre of the canvas.
pub fn place_turret<S: Surface>(state: &mut GameState<S>) -> EntityId {
    let size = state.config.turret.size;
    let x = state.config.canvas.width / 2 - size / 2;
    let y = state.config.canvas.height - size;
    let id = state.stage.render(Entity::turret(size), x, y, true);
    state.turret = Some(id);
    id
}

pub fn place_alien<S: Surface>(state: &mut GameState<S>, placement: Placement, variant: usize) -> EntityId {
    let id = state.stage.render(
        Entity::alien(placement.size, variant),
        placement.x,
        placement.y,
        true,
    );
    state.stage.listen_for_press(id);
    state.alien_population += 1;
    id
}

/// Plan and place one alien, if there is room.
pub fn spawn_alien<S: Surface>(state: &mut GameState<S>, rng: &mut impl Rng) -> Option<EntityId> {
    let placement = plan_spawn(state.stage.registry(), &state.config, rng)?;
    let variant = rng.gen_range(0..state.config.aliens.variants);
    Some(place_alien(state, placement, variant))
}

// ── Scoring ──────────────────────────────────────────────────────────────────

/// Smaller and faster aliens are worth more:
/// `((max_size - width + step) / step) * speed / 10`.
pub fn score_for(config: &GameConfig, alien_width: i32, speed: u32) -> u32 {
    let step = config.aliens.size_step;
    let size_factor = ((config.aliens.max_size() - alien_width + step) / step).max(0) as u32;
    size_factor * speed / 10
}

// ── Alien tick ───────────────────────────────────────────────────────────────

/// Sweep exploded aliens, push the rest down, then top the population up.
///
/// The first alien whose bottom edge touches the floor ends the game: it
/// and the turret explode and nothing else is processed this tick.
pub fn alien_tick<S: Surface>(state: &mut GameState<S>, rng: &mut impl Rng) -> TickOutcome {
    let floor = state.config.canvas.height;
    let speed = state.speed as i32;

    for id in state.stage.registry().ids_of_kind(EntityKind::Alien) {
        let dead = match state.stage.get(id).and_then(Entity::as_alien) {
            Some(alien) => alien.dead,
            None => continue,
        };

        if dead {
            state.stage.destroy(id);
            continue;
        }

        state.stage.move_entity(id, 0, speed, true);

        let landed = state
            .stage
            .get(id)
            .map(|alien| alien.sprite.bottom() >= floor)
            .unwrap_or(false);
        if landed {
            state.stage.explode(id);
            if let Some(turret) = state.turret {
                state.stage.explode(turret);
            }
            info!("alien reached the floor, final score {}", state.score);
            return TickOutcome::GameOver;
        }
    }

    if state.alien_population < state.config.aliens.max_population {
        spawn_alien(state, rng);
    }

    TickOutcome::Continue
}

// ── Missile tick ─────────────────────────────────────────────────────────────

/// Fly every missile upwards, drop the ones that left the canvas, and
/// resolve hits against live aliens.
pub fn missile_tick<S: Surface>(state: &mut GameState<S>) {
    let speed = state.config.missiles.speed;

    for id in state.stage.registry().ids_of_kind(EntityKind::Missile) {
        if !state.stage.move_entity(id, 0, speed, true) {
            continue;
        }
        let Some(position) = state.stage.get(id).map(|m| m.sprite.position()) else {
            continue;
        };

        if position.y < 0 {
            state.stage.destroy(id);
            state.missile_population = state.missile_population.saturating_sub(1);
            continue;
        }

        let hit = state
            .stage
            .registry()
            .all_of_kind(EntityKind::Alien)
            .find(|(_, alien)| {
                alien.is_live_alien()
                    && position.y <= alien.sprite.bottom()
                    && position.x >= alien.sprite.left()
                    && position.x <= alien.sprite.right()
            })
            .map(|(alien_id, alien)| (alien_id, alien.sprite.size().width()));

        if let Some((alien_id, width)) = hit {
            state.stage.explode(alien_id);
            state.stage.destroy(id);
            state.alien_population = state.alien_population.saturating_sub(1);
            state.missile_population = state.missile_population.saturating_sub(1);

            let points = score_for(&state.config, width, state.speed);
            state.score += points;
            debug!("alien hit for {} points, score {}", points, state.score);
        }
    }
}

// ── Player action ────────────────────────────────────────────────────────────

/// Slide the turret sideways so its centre sits under the target's centre.
pub fn move_turret_to_target<S: Surface>(state: &mut GameState<S>, target: EntityId) -> bool {
    let Some(turret_id) = state.turret else {
        return false;
    };
    let (Some(turret), Some(target)) = (state.stage.get(turret_id), state.stage.get(target)) else {
        return false;
    };
    let destination =
        target.sprite.size().width() / 2 - turret.sprite.size().width() / 2 + target.sprite.left();
    let dx = destination - turret.sprite.left();
    state.stage.move_entity(turret_id, dx, 0, true)
}

/// Launch a missile from the middle of the turret, just above it.
pub fn fire_missile<S: Surface>(state: &mut GameState<S>) -> Option<EntityId> {
    let turret = state.stage.get(state.turret?)?;
    let missile_size = state.config.missiles.size;
    let turret_size = turret.sprite.size();

    let x = turret.sprite.left() + (turret_size.width() / 2 - missile_size / 2);
    let y = state.config.canvas.height - turret_size.height() - state.config.missiles.launch_gap;

    let id = state.stage.render(Entity::missile(missile_size), x, y, true);
    state.missile_population += 1;
    Some(id)
}

/// What a press on an alien does: aim, then fire exactly one missile.
/// Aliens without a live press registration ignore presses.
pub fn press_alien<S: Surface>(state: &mut GameState<S>, alien: EntityId) -> Option<EntityId> {
    let pressable = state
        .stage
        .get(alien)
        .and_then(Entity::as_alien)
        .map(|a| !a.dead && a.press.is_some())
        .unwrap_or(false);
    if !pressable {
        return None;
    }

    move_turret_to_target(state, alien);
    fire_missile(state)
}
