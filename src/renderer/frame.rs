//! Per-frame batch construction from world state
//!
//! Walks the (possibly mutated) chunk grid and entity lists and emits one
//! colored quad per solid tile, tower, alive enemy and the player, plus a
//! thin debug quad for the active sensor ray. Everything is rebuilt from
//! scratch each frame; `RenderFrame::begin_frame` has already zeroed the
//! buffers by the time this runs.

use glam::Vec2;

use crate::arena::Arena;
use crate::consts::{DEBUG_RAY_HALF_WIDTH, TILE_SIZE};
use crate::error::CoreError;
use crate::sim::sensor::SensorResult;
use crate::sim::state::{Player, World};

use super::batch::{Layer, Primitive, RenderFrame};
use super::vertex::colors;

/// Build the full frame; returns the player's own primitive so the host can
/// reference that exact quad (e.g. for a highlight pass)
pub fn build_frame(
    world: &World,
    arena: &Arena,
    player: &Player,
    active_ray: Option<&SensorResult>,
    frame: &mut RenderFrame,
) -> Result<Primitive, CoreError> {
    frame.begin_frame();

    let tile = Vec2::splat(TILE_SIZE);

    for chunk_y in 0..world.chunks_y {
        for chunk_x in 0..world.chunks_x {
            let chunk = world.chunk(chunk_x, chunk_y);
            let origin = Vec2::new(
                (chunk_x as i32 * chunk.width) as f32,
                (chunk_y as i32 * chunk.height) as f32,
            );

            let grid = chunk.tile_grid(arena);
            for y in 0..chunk.height {
                for x in 0..chunk.width {
                    if grid.solid(x, y) {
                        let top_left = (origin + Vec2::new(x as f32, y as f32)) * TILE_SIZE;
                        frame.draw_quad(Layer::Level, top_left, tile, colors::TILE)?;
                    }
                }
            }

            for tower in &chunk.towers {
                let top_left = (origin + tower.cell.as_vec2()) * TILE_SIZE;
                frame.draw_quad(Layer::Level, top_left, tile, colors::TOWER)?;
            }

            for enemy in chunk.enemies.iter().filter(|e| !e.dead) {
                let top_left = (origin + enemy.position) * TILE_SIZE;
                frame.draw_quad(Layer::Entities, top_left, tile, colors::ENEMY)?;
            }
        }
    }

    let player_chunk = world.current_chunk(player);
    let player_origin = Vec2::new(
        (player.chunk_x as i32 * player_chunk.width) as f32,
        (player.chunk_y as i32 * player_chunk.height) as f32,
    );
    let player_top_left = (player_origin + player.position) * TILE_SIZE;
    // Single-quad variant: keep the primitive, then record it in the layer
    let player_primitive = frame.push_quad(player_top_left, tile, colors::PLAYER)?;
    frame.record(Layer::Player, player_primitive)?;

    if let Some(ray) = active_ray {
        let (top_left, size) = ray_quad(player_origin, player.position, ray.hit);
        frame.draw_quad(Layer::Debug, top_left, size, colors::DEBUG_RAY)?;
    }

    Ok(player_primitive)
}

/// Thin axis-aligned quad covering the sensor ray from `from` to `hit`,
/// centered on the mover's midline
fn ray_quad(origin: Vec2, from: Vec2, hit: Vec2) -> (Vec2, Vec2) {
    let center = from + Vec2::splat(0.5);
    if (hit.y - from.y).abs() < f32::EPSILON {
        // Horizontal ray
        let x0 = from.x.min(hit.x);
        let x1 = from.x.max(hit.x);
        let top_left = origin + Vec2::new(x0, center.y - DEBUG_RAY_HALF_WIDTH);
        let size = Vec2::new(x1 - x0, DEBUG_RAY_HALF_WIDTH * 2.0);
        (top_left * TILE_SIZE, size * TILE_SIZE)
    } else {
        let y0 = from.y.min(hit.y);
        let y1 = from.y.max(hit.y);
        let top_left = origin + Vec2::new(center.x - DEBUG_RAY_HALF_WIDTH, y0);
        let size = Vec2::new(DEBUG_RAY_HALF_WIDTH * 2.0, y1 - y0);
        (top_left * TILE_SIZE, size * TILE_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CoreConfig;
    use crate::sim::worldgen;

    fn build_test_world() -> (CoreConfig, Arena, World, Player) {
        let config = CoreConfig {
            chunks_x: 1,
            chunks_y: 1,
            chunk_width: 8,
            chunk_height: 8,
            spawn_enemies: 2,
            ..CoreConfig::default()
        };
        let mut arena = Arena::new(config.world_arena_bytes);
        let world = worldgen::generate(&config, 3, &mut arena).unwrap();
        let player =
            Player::spawned_at(world.player_spawn, world.spawn_chunk.0, world.spawn_chunk.1);
        (config, arena, world, player)
    }

    #[test]
    fn test_frame_layer_counts_match_world() {
        let (config, arena, world, player) = build_test_world();
        let mut frame = RenderFrame::new(&config);

        build_frame(&world, &arena, &player, None, &mut frame).unwrap();

        // 8x8 border ring = 28 solid tiles
        assert_eq!(frame.batch(Layer::Level).len(), 28);
        let alive = world.chunk(0, 0).enemies.iter().filter(|e| !e.dead).count();
        assert_eq!(frame.batch(Layer::Entities).len(), alive);
        assert_eq!(frame.batch(Layer::Player).len(), 1);
        assert_eq!(frame.batch(Layer::Debug).len(), 0);

        let total: usize = Layer::ALL.iter().map(|&l| frame.batch(l).len()).sum();
        assert_eq!(frame.vertex_count(), total * 4);
    }

    #[test]
    fn test_dead_enemies_are_not_drawn() {
        let (config, arena, mut world, player) = build_test_world();
        let mut frame = RenderFrame::new(&config);

        for enemy in &mut world.chunk_mut(0, 0).enemies {
            enemy.dead = true;
        }
        build_frame(&world, &arena, &player, None, &mut frame).unwrap();
        assert_eq!(frame.batch(Layer::Entities).len(), 0);
    }

    #[test]
    fn test_player_primitive_points_at_player_quad() {
        let (config, arena, world, player) = build_test_world();
        let mut frame = RenderFrame::new(&config);

        let prim = build_frame(&world, &arena, &player, None, &mut frame).unwrap();
        assert_eq!(prim.count, 4);
        let v = &frame.vertices()[prim.offset as usize];
        assert_eq!(v.position, [2.0 * TILE_SIZE, 2.0 * TILE_SIZE]);
        assert_eq!(frame.batch(Layer::Player).primitives()[0], prim);
    }

    #[test]
    fn test_active_ray_fills_debug_layer() {
        let (config, arena, world, player) = build_test_world();
        let mut frame = RenderFrame::new(&config);

        let ray = SensorResult {
            status: crate::sim::sensor::SensorStatus::HitTile,
            distance: 4.0,
            hit: Vec2::new(6.0, 2.0),
        };
        build_frame(&world, &arena, &player, Some(&ray), &mut frame).unwrap();
        assert_eq!(frame.batch(Layer::Debug).len(), 1);
    }
}
