use glam::{DVec3, IVec3};

/// Largest representable horizontal block coordinate. X and Z are clamped
/// to `[-COORD_LIMIT, COORD_LIMIT]`.
pub const COORD_LIMIT: i32 = 30_000_000;

/// Highest valid vertical block coordinate.
pub const WORLD_CEILING: i32 = 255;

/// Block containing the given world point.
pub fn block_of(point: DVec3) -> IVec3 {
    IVec3::new(
        point.x.floor() as i32,
        point.y.floor() as i32,
        point.z.floor() as i32,
    )
}

/// Center of a block: `+0.5` on each axis.
pub fn block_center(block: IVec3) -> DVec3 {
    DVec3::new(
        f64::from(block.x) + 0.5,
        f64::from(block.y) + 0.5,
        f64::from(block.z) + 0.5,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn block_of_floors_toward_negative_infinity() {
        let block = block_of(DVec3::new(-0.1, 2.9, 3.0));
        assert_eq!(block, IVec3::new(-1, 2, 3));
    }

    #[test]
    fn block_center_is_half_offset() {
        let center = block_center(IVec3::new(4, 50, -7));
        assert_eq!(center, DVec3::new(4.5, 50.5, -6.5));
    }

    #[test]
    fn block_center_round_trips() {
        let block = IVec3::new(-3, 64, 12);
        assert_eq!(block_of(block_center(block)), block);
    }
}
