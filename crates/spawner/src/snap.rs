use glam::{DVec3, IVec3};
use hoard_common::{WORLD_CEILING, WorldId};
use hoard_world::WorldQuery;

/// Rest a point on the nearest solid surface below it.
///
/// Scans downward in unit steps from the point's block until a solid block
/// is found or the scan passes the world floor. The result sits one unit
/// above the solid block's base, horizontally centered; a column with no
/// solid block snaps to the floor instead of failing. The found height is
/// clamped to `[0, WORLD_CEILING]`.
pub fn snap_to_ground<W: WorldQuery + ?Sized>(world: &W, id: &WorldId, point: DVec3) -> DVec3 {
    let x = point.x.floor() as i32;
    let z = point.z.floor() as i32;
    let mut y = point.y.floor() as i32;

    while y >= 0 && !world.block_is_solid(id, IVec3::new(x, y, z)) {
        y -= 1;
    }
    let y = y.clamp(0, WORLD_CEILING);

    DVec3::new(f64::from(x) + 0.5, f64::from(y) + 1.0, f64::from(z) + 0.5)
}
