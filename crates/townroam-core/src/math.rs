use crate::types::{ChunkKey, Coordinate};
use glam::{IVec2, Vec2};

/// Convert a world position to the key of the chunk containing it.
pub fn world_to_chunk(pos: Coordinate, chunk_size: f32) -> ChunkKey {
    IVec2::new(
        (pos.x / chunk_size).floor() as i32,
        (pos.y / chunk_size).floor() as i32,
    )
}

/// World position of a chunk's minimum corner.
pub fn chunk_origin(key: ChunkKey, chunk_size: f32) -> Coordinate {
    Vec2::new(key.x as f32 * chunk_size, key.y as f32 * chunk_size)
}

/// World position of a chunk's centre.
pub fn chunk_center(key: ChunkKey, chunk_size: f32) -> Coordinate {
    chunk_origin(key, chunk_size) + Vec2::splat(chunk_size * 0.5)
}

/// Chebyshev (chessboard) distance between two chunk keys.
pub fn chebyshev(a: ChunkKey, b: ChunkKey) -> i32 {
    let d = (a - b).abs();
    d.x.max(d.y)
}

/// Distance from `value` to the nearest multiple of `spacing`.
pub fn distance_to_grid_line(value: f32, spacing: f32) -> f32 {
    let r = value.rem_euclid(spacing);
    r.min(spacing - r)
}

/// The multiple of `spacing` nearest to `value`.
pub fn nearest_grid_line(value: f32, spacing: f32) -> f32 {
    (value / spacing).round() * spacing
}

/// Frame-rate independent exponential smoothing factor.
pub fn smoothing_factor(rate: f32, dt: f32) -> f32 {
    1.0 - (-rate * dt).exp()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_world_to_chunk_negative() {
        assert_eq!(world_to_chunk(Vec2::new(0.0, 0.0), 20.0), IVec2::new(0, 0));
        assert_eq!(world_to_chunk(Vec2::new(19.9, 39.9), 20.0), IVec2::new(0, 1));
        assert_eq!(world_to_chunk(Vec2::new(-0.1, -20.0), 20.0), IVec2::new(-1, -1));
        assert_eq!(world_to_chunk(Vec2::new(-20.1, 5.0), 20.0), IVec2::new(-2, 0));
    }

    #[test]
    fn test_chunk_origin_inverts_world_to_chunk() {
        for key in [IVec2::new(0, 0), IVec2::new(-3, 7), IVec2::new(12, -1)] {
            let center = chunk_center(key, 20.0);
            assert_eq!(world_to_chunk(center, 20.0), key);
            assert_eq!(world_to_chunk(chunk_origin(key, 20.0), 20.0), key);
        }
    }

    #[test]
    fn test_chebyshev() {
        assert_eq!(chebyshev(IVec2::new(0, 0), IVec2::new(0, 0)), 0);
        assert_eq!(chebyshev(IVec2::new(0, 0), IVec2::new(2, -1)), 2);
        assert_eq!(chebyshev(IVec2::new(-3, 4), IVec2::new(1, 1)), 4);
    }

    #[test]
    fn test_distance_to_grid_line_symmetric() {
        assert_eq!(distance_to_grid_line(0.0, 60.0), 0.0);
        assert_eq!(distance_to_grid_line(3.0, 60.0), 3.0);
        assert_eq!(distance_to_grid_line(57.0, 60.0), 3.0);
        assert_eq!(distance_to_grid_line(-3.0, 60.0), 3.0);
        assert_eq!(distance_to_grid_line(30.0, 60.0), 30.0);
    }

    #[test]
    fn test_nearest_grid_line() {
        assert_eq!(nearest_grid_line(29.0, 60.0), 0.0);
        assert_eq!(nearest_grid_line(31.0, 60.0), 60.0);
        assert_eq!(nearest_grid_line(-31.0, 60.0), -60.0);
    }

    #[test]
    fn test_smoothing_factor_bounds() {
        assert_eq!(smoothing_factor(3.0, 0.0), 0.0);
        let f = smoothing_factor(3.0, 1.0 / 60.0);
        assert!(f > 0.0 && f < 1.0, "factor out of range: {f}");
        assert!(smoothing_factor(3.0, 100.0) > 0.999);
    }
}
