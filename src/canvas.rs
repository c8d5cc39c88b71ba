/// The rendering surface seam.
///
/// The simulation never draws anything itself; it tells a [`Surface`] which
/// visuals exist, where they are and which sprite-sheet row they show.
/// [`Canvas`] keeps that description in memory so a front-end can paint it
/// (and tests can inspect it).

use std::collections::HashMap;

use crate::entities::{EntityKind, Position, Size};
use crate::registry::EntityId;

/// Proof that a press listener is attached to a visual.  Not `Clone`:
/// whoever holds it is the one who cancels it.
#[derive(Debug, PartialEq, Eq)]
pub struct PressRegistration {
    target: EntityId,
}

impl PressRegistration {
    pub fn new(target: EntityId) -> Self {
        PressRegistration { target }
    }

    pub fn target(&self) -> EntityId {
        self.target
    }
}

pub trait Surface {
    fn create_visual(&mut self, id: EntityId, kind: EntityKind);
    fn set_size(&mut self, id: EntityId, size: Size);
    fn set_position(&mut self, id: EntityId, position: Position);
    fn set_variant(&mut self, id: EntityId, frame: usize);
    fn attach(&mut self, id: EntityId);
    fn detach(&mut self, id: EntityId);
    fn listen_for_press(&mut self, id: EntityId) -> PressRegistration;
    fn cancel_press(&mut self, registration: PressRegistration);
}

// ── In-memory surface ─────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Visual {
    pub kind: EntityKind,
    pub size: Size,
    pub position: Position,
    pub frame: usize,
    pub attached: bool,
    pub pressable: bool,
}

impl Visual {
    fn new(kind: EntityKind) -> Self {
        Visual {
            kind,
            size: Size::default(),
            position: Position::default(),
            frame: 0,
            attached: false,
            pressable: false,
        }
    }
}

#[derive(Debug, Default)]
pub struct Canvas {
    visuals: HashMap<EntityId, Visual>,
}

impl Canvas {
    pub fn new() -> Self {
        Canvas::default()
    }

    pub fn visual(&self, id: EntityId) -> Option<&Visual> {
        self.visuals.get(&id)
    }

    /// Attached visuals only.
    pub fn visible(&self) -> impl Iterator<Item = (EntityId, &Visual)> + '_ {
        self.visuals
            .iter()
            .filter(|(_, v)| v.attached)
            .map(|(id, v)| (*id, v))
    }

    pub fn visible_count(&self) -> usize {
        self.visible().count()
    }

    pub fn is_attached(&self, id: EntityId) -> bool {
        self.visuals.get(&id).map(|v| v.attached).unwrap_or(false)
    }

    pub fn is_pressable(&self, id: EntityId) -> bool {
        self.visuals.get(&id).map(|v| v.pressable).unwrap_or(false)
    }
}

impl Surface for Canvas {
    fn create_visual(&mut self, id: EntityId, kind: EntityKind) {
        self.visuals.insert(id, Visual::new(kind));
    }

    fn set_size(&mut self, id: EntityId, size: Size) {
        if let Some(v) = self.visuals.get_mut(&id) {
            v.size = size;
        }
    }

    fn set_position(&mut self, id: EntityId, position: Position) {
        if let Some(v) = self.visuals.get_mut(&id) {
            v.position = position;
        }
    }

    fn set_variant(&mut self, id: EntityId, frame: usize) {
        if let Some(v) = self.visuals.get_mut(&id) {
            v.frame = frame;
        }
    }

    fn attach(&mut self, id: EntityId) {
        if let Some(v) = self.visuals.get_mut(&id) {
            v.attached = true;
        }
    }

    fn detach(&mut self, id: EntityId) {
        self.visuals.remove(&id);
    }

    fn listen_for_press(&mut self, id: EntityId) -> PressRegistration {
        if let Some(v) = self.visuals.get_mut(&id) {
            v.pressable = true;
        }
        PressRegistration::new(id)
    }

    fn cancel_press(&mut self, registration: PressRegistration) {
        if let Some(v) = self.visuals.get_mut(&registration.target()) {
            v.pressable = false;
        }
    }
}
