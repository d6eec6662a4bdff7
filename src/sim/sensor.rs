//! Discrete grid raycast ("sensor")
//!
//! Answers how far something at a world-space position can travel in one of
//! the four axis directions before hitting a solid tile or the edge of the
//! chunk. Movement uses the distance as a hard cap, which prevents tunneling
//! at one-tile granularity; the hit point doubles as a line-of-sight debug
//! ray endpoint.

use glam::Vec2;

use super::state::{Direction, TileGrid};

/// What terminated the ray
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorStatus {
    /// A solid tile stopped the ray; `hit` is the near face of that tile
    HitTile,
    /// The ray left the chunk; `hit` is the chunk edge coordinate
    HitBoundary,
}

/// Result of one sensor read
#[derive(Debug, Clone, Copy)]
pub struct SensorResult {
    pub status: SensorStatus,
    /// Distance along the ray axis from the query position to `hit`
    pub distance: f32,
    pub hit: Vec2,
}

/// Cast a sensor ray from `position` in `direction` across `grid`
///
/// The walk anchor starts on the tile edge facing the travel direction
/// (positive travel anchors at `floor(c)`, negative at `floor(c) + 1`) and
/// advances one full tile per step together with the integer cell, so the
/// reported hit lands on the near face of the stopping tile. The loop always
/// terminates: every step moves one cell closer to leaving the finite grid.
pub fn read_sensor(grid: TileGrid<'_>, position: Vec2, direction: Direction) -> SensorResult {
    let cell_step = direction.to_cell_step();
    let step = direction.to_vec();

    let mut cell_x = position.x.floor() as i32;
    let mut cell_y = position.y.floor() as i32;

    let mut walk = position;
    match direction {
        Direction::Right => walk.x = position.x.floor(),
        Direction::Left => walk.x = position.x.floor() + 1.0,
        Direction::Down => walk.y = position.y.floor(),
        Direction::Up => walk.y = position.y.floor() + 1.0,
    }

    let (status, hit) = loop {
        if !grid.in_bounds(cell_x, cell_y) {
            break (SensorStatus::HitBoundary, walk);
        }
        if grid.solid(cell_x, cell_y) {
            break (SensorStatus::HitTile, walk);
        }
        cell_x += cell_step.x;
        cell_y += cell_step.y;
        walk += step;
    };

    let distance = if direction.is_horizontal() {
        (hit.x - position.x).abs()
    } else {
        (hit.y - position.y).abs()
    };

    SensorResult {
        status,
        distance,
        hit,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Row-major tile bytes for a `size` x `size` room with a solid
    /// one-tile border and empty interior.
    fn bordered_room(size: i32) -> Vec<u8> {
        let mut tiles = vec![0_u8; (size * size) as usize];
        for i in 0..size {
            tiles[i as usize] = 1;
            tiles[(i + (size - 1) * size) as usize] = 1;
            tiles[(i * size) as usize] = 1;
            tiles[(size - 1 + i * size) as usize] = 1;
        }
        tiles
    }

    #[test]
    fn test_bordered_room_hits_in_all_directions() {
        let tiles = bordered_room(16);
        let grid = TileGrid::new(16, 16, &tiles);
        let pos = Vec2::new(2.0, 2.0);

        // (direction, expected hit face, expected distance)
        let cases = [
            (Direction::Left, Vec2::new(1.0, 2.0), 1.0),
            (Direction::Right, Vec2::new(15.0, 2.0), 13.0),
            (Direction::Up, Vec2::new(2.0, 1.0), 1.0),
            (Direction::Down, Vec2::new(2.0, 15.0), 13.0),
        ];
        for (direction, hit, distance) in cases {
            let result = read_sensor(grid, pos, direction);
            assert_eq!(result.status, SensorStatus::HitTile, "{direction:?}");
            assert_eq!(result.hit, hit, "{direction:?}");
            assert!((result.distance - distance).abs() < 1e-6, "{direction:?}");
        }
    }

    #[test]
    fn test_open_grid_reports_boundary_at_edge() {
        let tiles = vec![0_u8; 16 * 16];
        let grid = TileGrid::new(16, 16, &tiles);

        let right = read_sensor(grid, Vec2::new(2.0, 2.0), Direction::Right);
        assert_eq!(right.status, SensorStatus::HitBoundary);
        assert_eq!(right.hit.x, 16.0);
        assert!((right.distance - 14.0).abs() < 1e-6);

        let up = read_sensor(grid, Vec2::new(2.0, 2.0), Direction::Up);
        assert_eq!(up.status, SensorStatus::HitBoundary);
        assert_eq!(up.hit.y, 0.0);
        assert!((up.distance - 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_fractional_start_measures_from_query_point() {
        let tiles = bordered_room(16);
        let grid = TileGrid::new(16, 16, &tiles);

        let result = read_sensor(grid, Vec2::new(2.5, 2.0), Direction::Left);
        assert_eq!(result.status, SensorStatus::HitTile);
        // Face of the border tile at x=0 is x=1; from 2.5 that is 1.5 away
        assert!((result.distance - 1.5).abs() < 1e-6);

        let result = read_sensor(grid, Vec2::new(2.5, 2.0), Direction::Right);
        assert!((result.distance - 12.5).abs() < 1e-6);
    }

    #[test]
    fn test_adjacent_wall_gives_zero_distance() {
        let tiles = bordered_room(16);
        let grid = TileGrid::new(16, 16, &tiles);

        // Standing flush against the left border wall
        let result = read_sensor(grid, Vec2::new(1.0, 2.0), Direction::Left);
        assert_eq!(result.status, SensorStatus::HitTile);
        assert!((result.distance - 0.0).abs() < 1e-6);
    }
}
