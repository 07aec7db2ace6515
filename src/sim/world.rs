//! Entity storage
//!
//! One table per archetype, each a `Vec` of `(EntityId, component)` in
//! insertion order. Handles are stable integers that are never reused.
//! Bulk removal is a batch `retain`, done between passes and never while
//! a table is being iterated.

use serde::{Deserialize, Serialize};

use super::state::{Bullet, Goal, Player};

/// Stable entity handle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub u32);

/// A component set with its own table in the store
pub trait Archetype: Sized + 'static {
    fn table(store: &EntityStore) -> &Vec<(EntityId, Self)>;
    fn table_mut(store: &mut EntityStore) -> &mut Vec<(EntityId, Self)>;
}

/// Owns every entity in the session
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EntityStore {
    players: Vec<(EntityId, Player)>,
    bullets: Vec<(EntityId, Bullet)>,
    goals: Vec<(EntityId, Goal)>,
    next_id: u32,
}

impl EntityStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a new entity ID
    fn next_entity_id(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Add an entity, returning its handle
    pub fn spawn<T: Archetype>(&mut self, components: T) -> EntityId {
        let id = self.next_entity_id();
        T::table_mut(self).push((id, components));
        id
    }

    pub fn get<T: Archetype>(&self, id: EntityId) -> Option<&T> {
        T::table(self).iter().find(|(e, _)| *e == id).map(|(_, c)| c)
    }

    pub fn get_mut<T: Archetype>(&mut self, id: EntityId) -> Option<&mut T> {
        T::table_mut(self)
            .iter_mut()
            .find(|(e, _)| *e == id)
            .map(|(_, c)| c)
    }

    /// Entities of one archetype in insertion order
    pub fn iter<T: Archetype>(&self) -> impl Iterator<Item = (EntityId, &T)> {
        T::table(self).iter().map(|(e, c)| (*e, c))
    }

    pub fn iter_mut<T: Archetype>(&mut self) -> impl Iterator<Item = (EntityId, &mut T)> {
        T::table_mut(self).iter_mut().map(|(e, c)| (*e, c))
    }

    /// Visit every entity of one archetype
    pub fn for_each<T: Archetype>(&mut self, mut f: impl FnMut(EntityId, &mut T)) {
        for (e, c) in T::table_mut(self).iter_mut() {
            f(*e, c);
        }
    }

    pub fn len<T: Archetype>(&self) -> usize {
        T::table(self).len()
    }

    pub fn is_empty<T: Archetype>(&self) -> bool {
        T::table(self).is_empty()
    }

    /// Remove a single entity. Returns its components if it existed.
    pub fn despawn<T: Archetype>(&mut self, id: EntityId) -> Option<T> {
        let table = T::table_mut(self);
        let index = table.iter().position(|(e, _)| *e == id)?;
        Some(table.remove(index).1)
    }

    /// Remove every entity of one archetype matching `pred`, keeping order.
    /// Returns the number removed.
    pub fn remove_where<T: Archetype>(&mut self, mut pred: impl FnMut(&T) -> bool) -> usize {
        let table = T::table_mut(self);
        let before = table.len();
        table.retain(|(_, c)| !pred(c));
        before - table.len()
    }

    /// Remove every entity of one archetype
    pub fn clear<T: Archetype>(&mut self) -> usize {
        self.remove_where::<T>(|_| true)
    }
}

impl Archetype for Player {
    fn table(store: &EntityStore) -> &Vec<(EntityId, Self)> {
        &store.players
    }
    fn table_mut(store: &mut EntityStore) -> &mut Vec<(EntityId, Self)> {
        &mut store.players
    }
}

impl Archetype for Bullet {
    fn table(store: &EntityStore) -> &Vec<(EntityId, Self)> {
        &store.bullets
    }
    fn table_mut(store: &mut EntityStore) -> &mut Vec<(EntityId, Self)> {
        &mut store.bullets
    }
}

impl Archetype for Goal {
    fn table(store: &EntityStore) -> &Vec<(EntityId, Self)> {
        &store.goals
    }
    fn table_mut(store: &mut EntityStore) -> &mut Vec<(EntityId, Self)> {
        &mut store.goals
    }
}
