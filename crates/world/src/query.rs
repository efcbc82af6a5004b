use glam::{DVec3, IVec3};
use hoard_common::{EntityId, EntityKind, Environment, ParticipantId, WorldId};

/// One entity as reported by a proximity query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EntitySnapshot {
    pub id: EntityId,
    pub kind: EntityKind,
    pub position: DVec3,
}

/// An active participant whose presence drives nearby spawning.
#[derive(Debug, Clone, PartialEq)]
pub struct Participant {
    pub id: ParticipantId,
    pub world: WorldId,
    pub position: DVec3,
}

/// Contract over the world the spawner operates on.
///
/// The spawner core only ever talks to the world through this trait, so the
/// tick logic runs identically against a live backend or [`crate::SimWorld`].
pub trait WorldQuery {
    /// True when the block containing `point` can be occupied by an entity
    /// (empty / non-solid).
    fn is_passable(&self, world: &WorldId, point: DVec3) -> bool;

    /// True when the block at `block` is solid terrain.
    fn block_is_solid(&self, world: &WorldId, block: IVec3) -> bool;

    /// Entities of any kind within `radius` of `point`.
    fn entities_near(&self, world: &WorldId, point: DVec3, radius: f64) -> Vec<EntitySnapshot>;

    /// Place a new entity of `kind` at `point`. Placement reports no
    /// handle; callers that need one recover it via [`Self::entities_near`].
    fn spawn_entity(&self, world: &WorldId, point: DVec3, kind: EntityKind);

    /// Move an entity. Returns false when it no longer exists.
    fn teleport(&self, world: &WorldId, entity: EntityId, to: DVec3) -> bool;

    /// Environment classification of a world.
    fn environment(&self, world: &WorldId) -> Environment;

    /// Snapshot of the currently active participants, in registration order.
    fn active_participants(&self) -> Vec<Participant>;
}
