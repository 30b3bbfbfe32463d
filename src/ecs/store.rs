// src/ecs/store.rs
use legion::storage::Component;
use legion::world::EntryRef;
use legion::{Entity, EntityStore as _, World};

use super::components::Spawned;
use crate::error::{GameError, Result};

// A tuple of component kinds an entity must hold to match a query.
pub trait ComponentSet {
    fn held_by(entry: &EntryRef<'_>) -> bool;
}

macro_rules! component_set {
    ($($kind:ident),+) => {
        impl<$($kind: Component),+> ComponentSet for ($($kind,)+) {
            fn held_by(entry: &EntryRef<'_>) -> bool {
                $(entry.get_component::<$kind>().is_ok())&&+
            }
        }
    };
}

component_set!(A);
component_set!(A, B);
component_set!(A, B, C);
component_set!(A, B, C, D);

// Owns every entity of a level and their components.
//
// Components live in a `legion` world; the store adds insertion-ordered
// iteration and snapshot queries on top, so systems can spawn entities
// while walking a query result.
pub struct EntityStore {
    world: World,
    order: Vec<Entity>,
    next_seq: u64,
}

impl Default for EntityStore {
    fn default() -> Self {
        Self::new()
    }
}

impl EntityStore {
    pub fn new() -> Self {
        Self {
            world: World::default(),
            order: Vec::new(),
            next_seq: 0,
        }
    }

    // Create an entity with no gameplay components.
    pub fn create(&mut self) -> Entity {
        let seq = Spawned(self.next_seq);
        self.next_seq += 1;
        let entity = self.world.push((seq,));
        self.order.push(entity);
        entity
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn contains(&self, entity: Entity) -> bool {
        self.world.contains(entity)
    }

    // Attach a default `T` to `entity`. Attaching twice keeps the existing
    // component and returns it.
    pub fn attach<T: Component + Default>(&mut self, entity: Entity) -> Option<&mut T> {
        let mut entry = self.world.entry(entity)?;
        if entry.get_component::<T>().is_err() {
            entry.add_component(T::default());
        }
        entry.into_component_mut::<T>().ok()
    }

    // Attach `component` to `entity`. Returns false, leaving the entity
    // untouched, if it is gone or already holds a `T`.
    pub fn insert<T: Component>(&mut self, entity: Entity, component: T) -> bool {
        match self.world.entry(entity) {
            Some(mut entry) if entry.get_component::<T>().is_err() => {
                entry.add_component(component);
                true
            }
            _ => false,
        }
    }

    pub fn has<T: Component>(&self, entity: Entity) -> bool {
        self.get::<T>(entity).is_some()
    }

    pub fn get<T: Component>(&self, entity: Entity) -> Option<&T> {
        self.world.entry_ref(entity).ok()?.into_component::<T>().ok()
    }

    pub fn get_mut<T: Component>(&mut self, entity: Entity) -> Option<&mut T> {
        self.world.entry(entity)?.into_component_mut::<T>().ok()
    }

    // Like `get`, but a missing component is an error.
    pub fn require<T: Component>(&self, entity: Entity) -> Result<&T> {
        self.get::<T>(entity).ok_or(GameError::MissingComponent {
            entity,
            component: std::any::type_name::<T>(),
        })
    }

    pub fn require_mut<T: Component>(&mut self, entity: Entity) -> Result<&mut T> {
        self.get_mut::<T>(entity).ok_or(GameError::MissingComponent {
            entity,
            component: std::any::type_name::<T>(),
        })
    }

    // Entities holding every component in `Q`, in creation order.
    //
    // The result is a snapshot: entities created afterwards are not part of
    // it, and destroyed ones must be skipped by the caller.
    pub fn query<Q: ComponentSet>(&self) -> Vec<Entity> {
        self.order
            .iter()
            .copied()
            .filter(|&entity| match self.world.entry_ref(entity) {
                Ok(entry) => Q::held_by(&entry),
                Err(_) => false,
            })
            .collect()
    }

    // Remove an entity immediately. Removing an entity twice is a no-op.
    pub fn destroy(&mut self, entity: Entity) -> bool {
        if !self.world.remove(entity) {
            return false;
        }
        self.order.retain(|&e| e != entity);
        true
    }

    // Remove every entity holding marker `M`. Returns how many were removed.
    pub fn purge<M: Component>(&mut self) -> usize {
        let doomed = self.query::<(M,)>();
        for &entity in &doomed {
            self.world.remove(entity);
        }
        if !doomed.is_empty() {
            let world = &self.world;
            self.order.retain(|&e| world.contains(e));
        }
        doomed.len()
    }
}
