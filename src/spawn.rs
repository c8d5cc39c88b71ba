/// Randomized alien placement that refuses to stack aliens on each other.

use log::debug;
use rand::Rng;

use crate::config::GameConfig;
use crate::entities::{EntityKind, Sprite};
use crate::registry::Registry;

/// Where a new alien goes.  `y` is the render position: half the sprite
/// hangs above the canvas so it slides into view.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Placement {
    pub x: i32,
    pub y: i32,
    pub size: i32,
}

impl Placement {
    pub fn left(&self) -> i32 {
        self.x
    }

    pub fn right(&self) -> i32 {
        self.x + self.size
    }

    pub fn top(&self) -> i32 {
        self.y
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.size
    }

    /// Bottom edge as if the alien sat exactly on the top of the canvas.
    pub fn anchored_bottom(&self) -> i32 {
        self.size
    }

    /// Inclusive horizontal overlap: either edge resting on the other
    /// sprite, or this one covering it entirely.
    fn overlaps_horizontally(&self, other: &Sprite) -> bool {
        let (left, right) = (other.left(), other.right());
        let left_inside = self.left() >= left && self.left() <= right;
        let right_inside = self.right() >= left && self.right() <= right;
        let covers = self.left() <= left && self.right() >= right;
        left_inside || right_inside || covers
    }

    fn overlaps_vertically(&self, other: &Sprite) -> bool {
        self.top() < other.bottom() && other.top() < self.bottom()
    }

    pub fn collides_with(&self, other: &Sprite) -> bool {
        self.overlaps_horizontally(other)
            && (self.anchored_bottom() >= other.bottom() || self.overlaps_vertically(other))
    }
}

/// Try up to `spawn_max_attempts` random placements.  `None` just means
/// the top of the canvas is too crowded this tick.
pub fn plan_spawn(registry: &Registry, config: &GameConfig, rng: &mut impl Rng) -> Option<Placement> {
    let aliens = &config.aliens;
    let width = config.canvas.width;

    for attempt in 1..=aliens.spawn_max_attempts {
        let size = rng.gen_range(1..=aliens.size_steps) * aliens.size_step;
        let x = (rng.gen_range(1..=width) - size).clamp(0, (width - size).max(0));
        let candidate = Placement {
            x,
            y: -(size / 2),
            size,
        };

        let blocked = registry
            .all_of_kind(EntityKind::Alien)
            .any(|(_, alien)| candidate.collides_with(&alien.sprite));

        if !blocked {
            debug!("alien placement {:?} found on attempt {}", candidate, attempt);
            return Some(candidate);
        }
    }

    debug!(
        "no room for a new alien after {} attempts",
        aliens.spawn_max_attempts
    );
    None
}
