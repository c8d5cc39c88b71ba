/// Registry and surface kept in lock-step.
///
/// Every entity that gets into the registry gets a visual, and every
/// destruction removes both at once.  All operations on ids that are no
/// longer live are no-ops.

use crate::canvas::Surface;
use crate::entities::{Entity, EntityKind};
use crate::registry::{EntityId, Registry};

#[derive(Debug, Default)]
pub struct Stage<S> {
    registry: Registry,
    surface: S,
}

impl<S: Surface> Stage<S> {
    pub fn new(surface: S) -> Self {
        Stage {
            registry: Registry::new(),
            surface,
        }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.registry.get(id)
    }

    /// Register `entity`, give it a visual and move it to `(x, y)`.
    pub fn render(&mut self, entity: Entity, x: i32, y: i32, run_first_step: bool) -> EntityId {
        let kind = entity.kind();
        let size = entity.sprite.size();
        let id = self.registry.insert(entity);
        self.surface.create_visual(id, kind);
        self.surface.set_size(id, size);
        self.move_entity(id, x, y, run_first_step);
        self.surface.attach(id);
        id
    }

    pub fn move_entity(&mut self, id: EntityId, dx: i32, dy: i32, run_step: bool) -> bool {
        let Some(entity) = self.registry.get_mut(id) else {
            return false;
        };
        entity.sprite.move_by(dx, dy, run_step);
        self.surface.set_position(id, entity.sprite.position());
        self.surface.set_variant(id, entity.sprite.frame());
        true
    }

    pub fn destroy(&mut self, id: EntityId) -> bool {
        let Some(mut entity) = self.registry.remove(id) else {
            return false;
        };
        if let Some(registration) = entity.as_alien_mut().and_then(|a| a.press.take()) {
            self.surface.cancel_press(registration);
        }
        self.surface.detach(id);
        true
    }

    /// Attach the press listener of a live alien.  At most one per alien.
    pub fn listen_for_press(&mut self, id: EntityId) -> bool {
        let Some(alien) = self
            .registry
            .get_mut(id)
            .filter(|e| e.is_live_alien())
            .and_then(|e| e.as_alien_mut())
        else {
            return false;
        };
        if alien.press.is_some() {
            return false;
        }
        alien.press = Some(self.surface.listen_for_press(id));
        true
    }

    pub fn explode(&mut self, id: EntityId) {
        let Some(entity) = self.registry.get_mut(id) else {
            return;
        };
        if let Some(registration) = entity.explode() {
            self.surface.cancel_press(registration);
        }
        self.surface.set_variant(id, entity.sprite.frame());
    }

    pub fn count_of_kind(&self, kind: EntityKind) -> usize {
        self.registry.count_of_kind(kind)
    }

    pub fn clear(&mut self) {
        for id in self.registry.ids() {
            self.destroy(id);
        }
    }
}
