//! World (re)generation
//!
//! Two sources: a procedural bordered-room layout, and a pre-decoded RGB
//! pixel map (black = solid, blue = player spawn, red = enemy spawn). Image
//! decoding itself is an external collaborator; this module only translates
//! pixels into tiles. Either path fully rewinds the world arena before
//! building, so "reload level" never leaks arena memory.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::arena::Arena;
use crate::config::CoreConfig;
use crate::error::CoreError;
use crate::math::halton;

use super::state::{Chunk, Enemy, World};

/// Player spawn cell for procedural worlds
const SPAWN_CELL: Vec2 = Vec2::new(2.0, 2.0);

/// Generate a procedural world of bordered chunks
///
/// Deterministic for a given `(config, seed)` pair: the seed only offsets
/// the Halton cursor used to scatter enemies.
pub fn generate(config: &CoreConfig, seed: u64, arena: &mut Arena) -> Result<World, CoreError> {
    arena.reset();

    let mut rng = Pcg32::seed_from_u64(seed);
    // Skip a seed-dependent prefix of the sequence so different runs get
    // different scatter patterns while staying reproducible
    let mut halton_cursor: u32 = rng.random_range(1..1024);

    let width = config.chunk_width as i32;
    let height = config.chunk_height as i32;
    let mut chunks = Vec::with_capacity(config.chunks_x * config.chunks_y);

    for chunk_y in 0..config.chunks_y {
        for chunk_x in 0..config.chunks_x {
            let region = arena.alloc_zeroed(config.chunk_tile_bytes(), 1)?;

            {
                let tiles = arena.bytes_mut(region);
                for y in 0..height {
                    for x in 0..width {
                        let border = x == 0 || y == 0 || x == width - 1 || y == height - 1;
                        if border {
                            tiles[(x + y * width) as usize] = 1;
                        }
                    }
                }
            }

            let mut chunk = Chunk::new(width, height, region, config);
            let spawn_here = chunk_x == 0 && chunk_y == 0;
            scatter_enemies(config, arena, &mut chunk, &mut halton_cursor, spawn_here)?;
            chunks.push(chunk);
        }
    }

    log::info!(
        "generated world: {}x{} chunks of {}x{} tiles, {} arena bytes used",
        config.chunks_x,
        config.chunks_y,
        width,
        height,
        arena.used()
    );

    Ok(World::new(
        chunks,
        config.chunks_x,
        config.chunks_y,
        SPAWN_CELL,
        (0, 0),
    ))
}

/// Scatter enemies over a chunk's free cells via the Halton sequence
fn scatter_enemies(
    config: &CoreConfig,
    arena: &Arena,
    chunk: &mut Chunk,
    cursor: &mut u32,
    avoid_spawn: bool,
) -> Result<(), CoreError> {
    let mut placed = 0;
    // Bounded scan: skip occupied candidates but never loop forever on a
    // chunk with too few free cells
    let mut attempts = 0;
    let max_attempts = config.spawn_enemies as u32 * 8;

    while placed < config.spawn_enemies && attempts < max_attempts {
        let x = (halton(*cursor, 2) * chunk.width as f32).floor();
        let y = (halton(*cursor, 3) * chunk.height as f32).floor();
        *cursor += 1;
        attempts += 1;

        let cell = Vec2::new(x, y);
        let free = chunk.is_tile_free(chunk.tile_grid(arena), x as i32, y as i32);
        let on_spawn = avoid_spawn && cell == SPAWN_CELL;
        if free && !on_spawn {
            chunk.push_enemy(Enemy::at(cell))?;
            placed += 1;
        }
    }

    if placed < config.spawn_enemies {
        log::warn!(
            "placed {placed}/{} enemies before giving up on a crowded chunk",
            config.spawn_enemies
        );
    }
    Ok(())
}

/// Build a single-chunk world from a decoded 3-channel RGB pixel map
///
/// Black pixels mark solid tiles, pure blue the player spawn, pure red an
/// enemy spawn. Dimension or length mismatches are load errors; a missing
/// spawn pixel falls back to the procedural spawn cell with a warning.
pub fn from_pixels(
    config: &CoreConfig,
    arena: &mut Arena,
    width: usize,
    height: usize,
    rgb: &[u8],
) -> Result<World, CoreError> {
    if width == 0 || height == 0 {
        return Err(CoreError::WorldLoad(format!(
            "degenerate map dimensions {width}x{height}"
        )));
    }
    if rgb.len() != width * height * 3 {
        return Err(CoreError::WorldLoad(format!(
            "pixel buffer holds {} bytes, expected {} for {width}x{height} rgb",
            rgb.len(),
            width * height * 3
        )));
    }

    arena.reset();
    let region = arena.alloc_zeroed(width * height, 1)?;
    let mut chunk = Chunk::new(width as i32, height as i32, region, config);
    let mut player_spawn = None;

    for y in 0..height {
        for x in 0..width {
            let px = &rgb[(x + y * width) * 3..][..3];
            match (px[0], px[1], px[2]) {
                (0, 0, 0) => arena.bytes_mut(region)[x + y * width] = 1,
                (0, 0, 255) => player_spawn = Some(Vec2::new(x as f32, y as f32)),
                (255, 0, 0) => chunk.push_enemy(Enemy::at(Vec2::new(x as f32, y as f32)))?,
                _ => {}
            }
        }
    }

    let player_spawn = player_spawn.unwrap_or_else(|| {
        log::warn!("map has no spawn pixel, using default {SPAWN_CELL}");
        SPAWN_CELL
    });

    log::info!(
        "loaded pixel map {width}x{height}: {} enemies",
        chunk.enemies.len()
    );

    Ok(World::new(vec![chunk], 1, 1, player_spawn, (0, 0)))
}
