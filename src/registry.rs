/// Owned store of every live entity, keyed by a generational id.

use slotmap::SlotMap;

use crate::entities::{Entity, EntityKind};

slotmap::new_key_type! {
    /// Unique for the lifetime of a registry; never reused for a new entity.
    pub struct EntityId;
}

#[derive(Debug, Default)]
pub struct Registry {
    entities: SlotMap<EntityId, Entity>,
}

impl Registry {
    pub fn new() -> Self {
        Registry::default()
    }

    pub fn insert(&mut self, entity: Entity) -> EntityId {
        self.entities.insert(entity)
    }

    /// Removing an id that is already gone is a no-op.
    pub fn remove(&mut self, id: EntityId) -> Option<Entity> {
        self.entities.remove(id)
    }

    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.entities.get(id)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.get_mut(id)
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.entities.contains_key(id)
    }

    /// Lazy view over the entities of one kind.  Each call starts a fresh
    /// pass; iteration order is unspecified.
    pub fn all_of_kind(&self, kind: EntityKind) -> impl Iterator<Item = (EntityId, &Entity)> + '_ {
        self.entities
            .iter()
            .filter(move |(_, entity)| entity.kind() == kind)
    }

    /// Snapshot of ids, for sweeps that remove entities as they go.
    pub fn ids_of_kind(&self, kind: EntityKind) -> Vec<EntityId> {
        self.all_of_kind(kind).map(|(id, _)| id).collect()
    }

    pub fn count_of_kind(&self, kind: EntityKind) -> usize {
        self.all_of_kind(kind).count()
    }

    pub fn ids(&self) -> Vec<EntityId> {
        self.entities.keys().collect()
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}
