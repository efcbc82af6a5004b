use glam::DVec3;
use hoard_common::{COORD_LIMIT, WorldId};
use hoard_world::WorldQuery;
use rand::Rng;

/// Candidates examined before the search gives up.
pub const MAX_ATTEMPTS: u32 = 10;

/// Vertical band candidates are drawn from: `[BAND_MIN_Y, BAND_MAX_Y)`.
const BAND_MIN_Y: i32 = 50;
const BAND_MAX_Y: i32 = 100;

/// Randomized search for a spawn point near `center` whose supporting block
/// is passable.
///
/// Each attempt advances the running x and z block offsets by an
/// independently signed magnitude in `[min_distance, max_distance)`, clamps
/// them to the representable coordinate bound, and draws a block y from the
/// fixed vertical band. The candidate is the block center (`+0.5` on each
/// axis); it is accepted iff the block immediately below it is passable.
///
/// Returns `None` after [`MAX_ATTEMPTS`] rejected candidates. Callers treat
/// that as a normal outcome, not an error.
pub fn find_safe_location<W: WorldQuery + ?Sized>(
    world: &W,
    id: &WorldId,
    center: DVec3,
    min_distance: i32,
    max_distance: i32,
    rng: &mut impl Rng,
) -> Option<DVec3> {
    let limit = i64::from(COORD_LIMIT);
    let mut x = center.x.floor() as i64;
    let mut z = center.z.floor() as i64;

    for attempt in 0..MAX_ATTEMPTS {
        x = (x + signed_offset(rng, min_distance, max_distance)).clamp(-limit, limit);
        z = (z + signed_offset(rng, min_distance, max_distance)).clamp(-limit, limit);
        let y = rng.gen_range(BAND_MIN_Y..BAND_MAX_Y);

        let candidate = DVec3::new(x as f64 + 0.5, f64::from(y) + 0.5, z as f64 + 0.5);
        let below = candidate - DVec3::new(0.0, 1.0, 0.0);
        if world.is_passable(id, below) {
            return Some(candidate);
        }
        tracing::trace!(attempt, x, y, z, "candidate rejected");
    }
    None
}

/// Magnitude uniform in `[min, max)` with a random sign, truncated toward
/// zero. `min == max` degenerates to a fixed magnitude of `min`.
fn signed_offset(rng: &mut impl Rng, min: i32, max: i32) -> i64 {
    let min = f64::from(min);
    let max = f64::from(max);
    let magnitude = if max > min { rng.gen_range(min..max) } else { min };
    let signed = if rng.gen_bool(0.5) { magnitude } else { -magnitude };
    signed as i64
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::IVec3;
    use hoard_common::{EntityId, EntityKind, Environment, block_of};
    use hoard_world::{EntitySnapshot, Participant};
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// World whose passability is a fixed answer; counts probes.
    struct FlatAnswerWorld {
        passable: bool,
        probes: AtomicUsize,
    }

    impl FlatAnswerWorld {
        fn new(passable: bool) -> Self {
            Self {
                passable,
                probes: AtomicUsize::new(0),
            }
        }
    }

    impl WorldQuery for FlatAnswerWorld {
        fn is_passable(&self, _world: &WorldId, _point: DVec3) -> bool {
            self.probes.fetch_add(1, Ordering::SeqCst);
            self.passable
        }

        fn block_is_solid(&self, _world: &WorldId, _block: IVec3) -> bool {
            false
        }

        fn entities_near(
            &self,
            _world: &WorldId,
            _point: DVec3,
            _radius: f64,
        ) -> Vec<EntitySnapshot> {
            Vec::new()
        }

        fn spawn_entity(&self, _world: &WorldId, _point: DVec3, _kind: EntityKind) {}

        fn teleport(&self, _world: &WorldId, _entity: EntityId, _to: DVec3) -> bool {
            false
        }

        fn environment(&self, _world: &WorldId) -> Environment {
            Environment::Standard
        }

        fn active_participants(&self) -> Vec<Participant> {
            Vec::new()
        }
    }

    fn overworld() -> WorldId {
        WorldId::new("overworld")
    }

    #[test]
    fn accepted_candidate_is_centered_in_band_and_range() {
        let world = FlatAnswerWorld::new(true);
        let mut rng = StdRng::seed_from_u64(7);
        let center = DVec3::new(0.5, 64.5, 0.5);

        for _ in 0..200 {
            let found =
                find_safe_location(&world, &overworld(), center, 10, 20, &mut rng).unwrap();
            let block = block_of(found);

            // Half-block centering on every axis.
            assert_eq!(found.x, f64::from(block.x) + 0.5);
            assert_eq!(found.y, f64::from(block.y) + 0.5);
            assert_eq!(found.z, f64::from(block.z) + 0.5);

            // Vertical band.
            assert!((50..100).contains(&block.y), "y out of band: {}", block.y);

            // Everything is passable, so acceptance happens on the first
            // attempt and both axes moved exactly one truncated step.
            assert!((10..20).contains(&block.x.abs()), "x = {}", block.x);
            assert!((10..20).contains(&block.z.abs()), "z = {}", block.z);
        }
    }

    #[test]
    fn unsafe_world_probes_exactly_ten_times() {
        let world = FlatAnswerWorld::new(false);
        let mut rng = StdRng::seed_from_u64(7);

        let found = find_safe_location(&world, &overworld(), DVec3::ZERO, 10, 20, &mut rng);
        assert!(found.is_none());
        assert_eq!(world.probes.load(Ordering::SeqCst), MAX_ATTEMPTS as usize);
    }

    #[test]
    fn equal_min_and_max_uses_fixed_magnitude() {
        let world = FlatAnswerWorld::new(true);
        let mut rng = StdRng::seed_from_u64(7);

        let found =
            find_safe_location(&world, &overworld(), DVec3::new(0.5, 64.5, 0.5), 6, 6, &mut rng)
                .unwrap();
        let block = block_of(found);
        assert_eq!(block.x.abs(), 6);
        assert_eq!(block.z.abs(), 6);
    }

    #[test]
    fn coordinates_clamp_to_world_bound() {
        let world = FlatAnswerWorld::new(true);
        let mut rng = StdRng::seed_from_u64(7);
        let edge = DVec3::new(f64::from(COORD_LIMIT) + 0.5, 64.5, f64::from(COORD_LIMIT) + 0.5);

        for _ in 0..50 {
            let found = find_safe_location(&world, &overworld(), edge, 10, 20, &mut rng).unwrap();
            assert!(found.x.abs() <= f64::from(COORD_LIMIT) + 0.5);
            assert!(found.z.abs() <= f64::from(COORD_LIMIT) + 0.5);
        }
    }
}
