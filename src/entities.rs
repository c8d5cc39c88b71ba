/// Entity types: sprites, per-kind state and the frame table.

use std::fmt;
use std::rc::Rc;

use crate::canvas::PressRegistration;

// ── Sprite-sheet rows ─────────────────────────────────────────────────────────

/// Aliens use rows `variant * 2` and `variant * 2 + 1` for their two
/// animation frames, so variants occupy rows 0..20.
pub const TURRET_FRAME: usize = 21;
pub const TURRET_EXPLODED_FRAME: usize = 22;
pub const MISSILE_FRAME: usize = 23;
pub const ALIEN_EXPLOSION_FRAME: usize = 24;

// ── Geometry ──────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum EntityKind {
    #[default]
    Alien,
    Missile,
    Turret,
}

/// Scene-unit coordinates.  Unbounded: the resolver decides what is
/// out of bounds, never the sprite.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Size {
    width: i32,
    height: i32,
}

impl Size {
    /// Each dimension is clamped to at least one unit.
    pub fn new(width: i32, height: i32) -> Self {
        Size {
            width: width.max(1),
            height: height.max(1),
        }
    }

    pub fn square(side: i32) -> Self {
        Size::new(side, side)
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }
}

impl Default for Size {
    fn default() -> Self {
        Size::new(1, 1)
    }
}

// ── Sprite ────────────────────────────────────────────────────────────────────

/// One animation step.  Receives the sprite that is moving.
pub type Step = Rc<dyn Fn(&mut Sprite)>;

/// Position, size and the cyclic step sequence shared by every entity.
#[derive(Clone, Default)]
pub struct Sprite {
    position: Position,
    size: Size,
    steps: Vec<Step>,
    cursor: usize,
    frame: usize,
}

impl fmt::Debug for Sprite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sprite")
            .field("position", &self.position)
            .field("size", &self.size)
            .field("steps", &self.steps.len())
            .field("cursor", &self.cursor)
            .field("frame", &self.frame)
            .finish()
    }
}

impl Sprite {
    pub fn new(size: Size) -> Self {
        Sprite {
            size,
            ..Sprite::default()
        }
    }

    pub fn with_frame(mut self, frame: usize) -> Self {
        self.frame = frame;
        self
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn frame(&self) -> usize {
        self.frame
    }

    pub fn set_frame(&mut self, frame: usize) {
        self.frame = frame;
    }

    pub fn left(&self) -> i32 {
        self.position.x
    }

    pub fn right(&self) -> i32 {
        self.position.x + self.size.width
    }

    pub fn top(&self) -> i32 {
        self.position.y
    }

    pub fn bottom(&self) -> i32 {
        self.position.y + self.size.height
    }

    /// Horizontal midpoint, rounded towards the left edge.
    pub fn center_x(&self) -> i32 {
        self.position.x + self.size.width / 2
    }

    /// Move relative to the current position, not to an absolute spot.
    /// With `run_step` the current step runs once and the cursor advances.
    pub fn move_by(&mut self, dx: i32, dy: i32, run_step: bool) {
        self.position.x += dx;
        self.position.y += dy;
        if run_step {
            self.perform_step();
        }
    }

    /// Replace the step sequence.  The cursor restarts at the first step.
    pub fn set_steps(&mut self, steps: Vec<Step>) {
        self.steps = steps;
        self.cursor = 0;
    }

    pub fn step_count(&self) -> usize {
        self.steps.len()
    }

    pub fn step_cursor(&self) -> usize {
        self.cursor
    }

    /// Run the current step and advance, wrapping after the last one.
    pub fn perform_step(&mut self) {
        let Some(step) = self.steps.get(self.cursor).cloned() else {
            return;
        };
        step(self);
        // The step may have swapped the sequence out from under us.
        self.cursor = if self.steps.is_empty() {
            0
        } else {
            (self.cursor + 1) % self.steps.len()
        };
    }
}

// ── Per-kind state ────────────────────────────────────────────────────────────

#[derive(Debug, Default)]
pub struct AlienState {
    /// Exploded and waiting for the next alien sweep.
    pub dead: bool,
    /// Cosmetic, fixed for the alien's lifetime.
    pub variant: usize,
    pub press: Option<PressRegistration>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TurretState {
    pub exploded: bool,
}

#[derive(Debug)]
pub enum Role {
    Alien(AlienState),
    Missile,
    Turret(TurretState),
}

// ── Entity ────────────────────────────────────────────────────────────────────

#[derive(Debug)]
pub struct Entity {
    pub sprite: Sprite,
    pub role: Role,
}

impl Entity {
    /// A square alien alternating between its variant's two frames.
    pub fn alien(side: i32, variant: usize) -> Self {
        let mut sprite = Sprite::new(Size::square(side)).with_frame(variant * 2);
        let steps: Vec<Step> = vec![
            Rc::new(move |s: &mut Sprite| s.set_frame(variant * 2)),
            Rc::new(move |s: &mut Sprite| s.set_frame(variant * 2 + 1)),
        ];
        sprite.set_steps(steps);
        Entity {
            sprite,
            role: Role::Alien(AlienState {
                variant,
                ..AlienState::default()
            }),
        }
    }

    pub fn missile(side: i32) -> Self {
        Entity {
            sprite: Sprite::new(Size::square(side)).with_frame(MISSILE_FRAME),
            role: Role::Missile,
        }
    }

    pub fn turret(side: i32) -> Self {
        Entity {
            sprite: Sprite::new(Size::square(side)).with_frame(TURRET_FRAME),
            role: Role::Turret(TurretState::default()),
        }
    }

    pub fn kind(&self) -> EntityKind {
        match self.role {
            Role::Alien(_) => EntityKind::Alien,
            Role::Missile => EntityKind::Missile,
            Role::Turret(_) => EntityKind::Turret,
        }
    }

    pub fn as_alien(&self) -> Option<&AlienState> {
        match &self.role {
            Role::Alien(alien) => Some(alien),
            _ => None,
        }
    }

    pub fn as_alien_mut(&mut self) -> Option<&mut AlienState> {
        match &mut self.role {
            Role::Alien(alien) => Some(alien),
            _ => None,
        }
    }

    pub fn is_live_alien(&self) -> bool {
        matches!(&self.role, Role::Alien(alien) if !alien.dead)
    }

    /// Switch to the exploded look.  Aliens are flagged dead and hand back
    /// their press registration so the caller can cancel it.
    pub fn explode(&mut self) -> Option<PressRegistration> {
        match &mut self.role {
            Role::Alien(alien) => {
                alien.dead = true;
                self.sprite.set_frame(ALIEN_EXPLOSION_FRAME);
                alien.press.take()
            }
            Role::Turret(turret) => {
                turret.exploded = true;
                self.sprite.set_frame(TURRET_EXPLODED_FRAME);
                None
            }
            Role::Missile => None,
        }
    }
}
