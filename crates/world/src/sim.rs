use std::collections::{BTreeMap, HashSet};
use std::sync::{Mutex, MutexGuard, PoisonError};

use glam::{DVec3, IVec3};
use hoard_common::{EntityId, EntityKind, Environment, ParticipantId, WorldId, block_of};

use crate::query::{EntitySnapshot, Participant, WorldQuery};

/// In-memory multi-world implementation of [`WorldQuery`].
///
/// Worlds hold a solid-block set and a BTreeMap-backed entity table, so
/// iteration order is deterministic. All methods take `&self`; state lives
/// behind a single mutex.
pub struct SimWorld {
    inner: Mutex<SimState>,
}

#[derive(Default)]
struct SimState {
    worlds: BTreeMap<WorldId, WorldState>,
    participants: Vec<Participant>,
}

struct WorldState {
    environment: Environment,
    solids: HashSet<IVec3>,
    entities: BTreeMap<EntityId, PlacedEntity>,
}

#[derive(Clone, Copy)]
struct PlacedEntity {
    kind: EntityKind,
    position: DVec3,
}

impl SimWorld {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(SimState::default()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, SimState> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Register a world. Queries against unregistered worlds report
    /// nothing passable and no entities.
    pub fn add_world(&self, id: WorldId, environment: Environment) {
        let state = WorldState {
            environment,
            solids: HashSet::new(),
            entities: BTreeMap::new(),
        };
        self.lock().worlds.insert(id, state);
    }

    /// Mark a single block solid.
    pub fn set_solid(&self, world: &WorldId, block: IVec3) {
        if let Some(w) = self.lock().worlds.get_mut(world) {
            w.solids.insert(block);
        }
    }

    /// Fill a square slab of solid blocks at height `y`, spanning
    /// `[-half_extent, half_extent]` on both horizontal axes.
    pub fn fill_floor(&self, world: &WorldId, y: i32, half_extent: i32) {
        let mut state = self.lock();
        if let Some(w) = state.worlds.get_mut(world) {
            for x in -half_extent..=half_extent {
                for z in -half_extent..=half_extent {
                    w.solids.insert(IVec3::new(x, y, z));
                }
            }
        }
    }

    pub fn add_participant(&self, world: WorldId, position: DVec3) -> ParticipantId {
        let id = ParticipantId::new();
        self.lock().participants.push(Participant {
            id,
            world,
            position,
        });
        id
    }

    pub fn remove_participant(&self, id: ParticipantId) {
        self.lock().participants.retain(|p| p.id != id);
    }

    /// Remove an entity, as a live backend would when one dies or unloads.
    pub fn despawn(&self, world: &WorldId, entity: EntityId) {
        if let Some(w) = self.lock().worlds.get_mut(world) {
            w.entities.remove(&entity);
        }
    }

    pub fn entity_count(&self, world: &WorldId) -> usize {
        self.lock()
            .worlds
            .get(world)
            .map(|w| w.entities.len())
            .unwrap_or(0)
    }

    pub fn entities(&self, world: &WorldId) -> Vec<EntitySnapshot> {
        self.lock()
            .worlds
            .get(world)
            .map(|w| {
                w.entities
                    .iter()
                    .map(|(id, e)| EntitySnapshot {
                        id: *id,
                        kind: e.kind,
                        position: e.position,
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Entity totals per kind, for summaries.
    pub fn kind_counts(&self, world: &WorldId) -> BTreeMap<EntityKind, usize> {
        let mut counts = BTreeMap::new();
        for snapshot in self.entities(world) {
            *counts.entry(snapshot.kind).or_insert(0) += 1;
        }
        counts
    }
}

impl Default for SimWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl WorldQuery for SimWorld {
    fn is_passable(&self, world: &WorldId, point: DVec3) -> bool {
        match self.lock().worlds.get(world) {
            Some(w) => !w.solids.contains(&block_of(point)),
            None => false,
        }
    }

    fn block_is_solid(&self, world: &WorldId, block: IVec3) -> bool {
        self.lock()
            .worlds
            .get(world)
            .map(|w| w.solids.contains(&block))
            .unwrap_or(false)
    }

    fn entities_near(&self, world: &WorldId, point: DVec3, radius: f64) -> Vec<EntitySnapshot> {
        self.lock()
            .worlds
            .get(world)
            .map(|w| {
                w.entities
                    .iter()
                    .filter(|(_, e)| e.position.distance(point) <= radius)
                    .map(|(id, e)| EntitySnapshot {
                        id: *id,
                        kind: e.kind,
                        position: e.position,
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    fn spawn_entity(&self, world: &WorldId, point: DVec3, kind: EntityKind) {
        let mut state = self.lock();
        match state.worlds.get_mut(world) {
            Some(w) => {
                let id = EntityId::new();
                w.entities.insert(id, PlacedEntity {
                    kind,
                    position: point,
                });
                tracing::debug!(?id, %kind, world = %world, "entity spawned");
            }
            None => {
                tracing::debug!(world = %world, "spawn request for unknown world ignored");
            }
        }
    }

    fn teleport(&self, world: &WorldId, entity: EntityId, to: DVec3) -> bool {
        let mut state = self.lock();
        match state
            .worlds
            .get_mut(world)
            .and_then(|w| w.entities.get_mut(&entity))
        {
            Some(e) => {
                e.position = to;
                true
            }
            None => false,
        }
    }

    fn environment(&self, world: &WorldId) -> Environment {
        self.lock()
            .worlds
            .get(world)
            .map(|w| w.environment)
            .unwrap_or(Environment::Standard)
    }

    fn active_participants(&self) -> Vec<Participant> {
        self.lock().participants.clone()
    }
}
