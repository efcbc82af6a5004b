use glam::DVec3;
use hoard_common::{Environment, WorldId};
use hoard_config::ResolvedWorldConfig;
use hoard_world::WorldQuery;
use rand::Rng;

use crate::search::find_safe_location;
use crate::snap::snap_to_ground;

/// Fixed distance policy for hazardous vertical-limited worlds; overrides
/// whatever the world's configuration says.
const HAZARD_MIN_DISTANCE: i32 = 5;
const HAZARD_MAX_DISTANCE: i32 = 10;

/// Radius of the query used to recover the just-placed entity.
const RECOVERY_RADIUS: f64 = 0.1;

/// Squared distance below which a nearby entity of the right kind counts
/// as the one just placed.
const RECOVERY_EPSILON_SQ: f64 = 0.1;

/// One placement attempt for one participant.
///
/// Draws an entity kind uniformly from the world's configured list,
/// searches for a safe location, places the entity there, then recovers it
/// by proximity and rests it on the ground. Returns false when no safe
/// location was found; the loop iteration that called this is consumed
/// either way.
pub fn spawn_cycle<W: WorldQuery + ?Sized>(
    world: &W,
    id: &WorldId,
    environment: Environment,
    config: &ResolvedWorldConfig,
    center: DVec3,
    rng: &mut impl Rng,
) -> bool {
    let kind = config.kinds[rng.gen_range(0..config.kinds.len())];
    let (min_distance, max_distance) = match environment {
        Environment::Hazardous => (HAZARD_MIN_DISTANCE, HAZARD_MAX_DISTANCE),
        Environment::Standard => (config.min_distance, config.max_distance),
    };

    let Some(candidate) =
        find_safe_location(world, id, center, min_distance, max_distance, rng)
    else {
        tracing::debug!(%kind, world = %id, "no safe spawn location found");
        return false;
    };

    world.spawn_entity(id, candidate, kind);

    // Placement reports no handle; recover the entity by proximity so it
    // can be rested on the ground.
    let placed = world
        .entities_near(id, candidate, RECOVERY_RADIUS)
        .into_iter()
        .find(|e| e.kind == kind && e.position.distance_squared(candidate) < RECOVERY_EPSILON_SQ);

    if let Some(entity) = placed {
        let grounded = snap_to_ground(world, id, entity.position);
        if world.teleport(id, entity.id, grounded) {
            tracing::debug!(%kind, world = %id, y = grounded.y, "entity placed and grounded");
        } else {
            tracing::debug!(%kind, world = %id, "placed entity vanished before ground snap");
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use hoard_common::EntityKind;
    use hoard_world::SimWorld;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn overworld() -> WorldId {
        WorldId::new("overworld")
    }

    fn flat_world(environment: Environment) -> SimWorld {
        let world = SimWorld::new();
        world.add_world(overworld(), environment);
        world.fill_floor(&overworld(), 40, 64);
        world
    }

    fn config(kinds: Vec<EntityKind>) -> ResolvedWorldConfig {
        ResolvedWorldConfig {
            kinds,
            min_distance: 10,
            max_distance: 20,
            spawn_limit: 3,
        }
    }

    #[test]
    fn places_a_configured_kind_and_grounds_it() {
        let world = flat_world(Environment::Standard);
        let mut rng = StdRng::seed_from_u64(3);

        let placed = spawn_cycle(
            &world,
            &overworld(),
            Environment::Standard,
            &config(vec![EntityKind::Zombie]),
            DVec3::new(0.5, 41.0, 0.5),
            &mut rng,
        );

        assert!(placed);
        let entities = world.entities(&overworld());
        assert_eq!(entities.len(), 1);
        assert_eq!(entities[0].kind, EntityKind::Zombie);
        // Snapped one above the floor slab, horizontally centered.
        assert_eq!(entities[0].position.y, 41.0);
        assert_eq!(entities[0].position.x.fract().abs(), 0.5);
        assert_eq!(entities[0].position.z.fract().abs(), 0.5);
    }

    #[test]
    fn standard_world_uses_configured_distances() {
        let world = flat_world(Environment::Standard);
        let mut rng = StdRng::seed_from_u64(11);
        let center = DVec3::new(0.5, 41.0, 0.5);

        for _ in 0..50 {
            spawn_cycle(
                &world,
                &overworld(),
                Environment::Standard,
                &config(vec![EntityKind::Skeleton]),
                center,
                &mut rng,
            );
        }
        for entity in world.entities(&overworld()) {
            let dx = (entity.position.x - 0.5) as i64;
            let dz = (entity.position.z - 0.5) as i64;
            assert!((10..20).contains(&dx.abs()), "dx = {dx}");
            assert!((10..20).contains(&dz.abs()), "dz = {dz}");
        }
    }

    #[test]
    fn hazardous_world_ignores_configured_distances() {
        let world = flat_world(Environment::Hazardous);
        let mut rng = StdRng::seed_from_u64(11);
        let center = DVec3::new(0.5, 41.0, 0.5);

        for _ in 0..50 {
            spawn_cycle(
                &world,
                &overworld(),
                Environment::Hazardous,
                &config(vec![EntityKind::Blaze]),
                center,
                &mut rng,
            );
        }
        for entity in world.entities(&overworld()) {
            let dx = (entity.position.x - 0.5) as i64;
            let dz = (entity.position.z - 0.5) as i64;
            assert!((5..10).contains(&dx.abs()), "dx = {dx}");
            assert!((5..10).contains(&dz.abs()), "dz = {dz}");
        }
    }

    #[test]
    fn no_safe_location_places_nothing() {
        // Zero distances pin every candidate to the center column; making
        // that column solid through the vertical band defeats the support
        // check on all ten attempts.
        let world = SimWorld::new();
        world.add_world(overworld(), Environment::Standard);
        for y in 49..100 {
            world.set_solid(&overworld(), glam::IVec3::new(0, y, 0));
        }
        let pinned = ResolvedWorldConfig {
            kinds: vec![EntityKind::Zombie],
            min_distance: 0,
            max_distance: 0,
            spawn_limit: 3,
        };
        let mut rng = StdRng::seed_from_u64(3);

        let placed = spawn_cycle(
            &world,
            &overworld(),
            Environment::Standard,
            &pinned,
            DVec3::new(0.5, 41.0, 0.5),
            &mut rng,
        );

        assert!(!placed);
        assert_eq!(world.entity_count(&overworld()), 0);
    }

    #[test]
    fn draws_only_from_the_configured_list() {
        let world = flat_world(Environment::Standard);
        let mut rng = StdRng::seed_from_u64(5);
        let kinds = vec![EntityKind::Zombie, EntityKind::Skeleton];

        for _ in 0..30 {
            spawn_cycle(
                &world,
                &overworld(),
                Environment::Standard,
                &config(kinds.clone()),
                DVec3::new(0.5, 41.0, 0.5),
                &mut rng,
            );
        }
        for entity in world.entities(&overworld()) {
            assert!(kinds.contains(&entity.kind));
        }
    }
}
