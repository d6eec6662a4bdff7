//! Per-frame simulation update
//!
//! One `tick` consumes an input snapshot and advances the whole world:
//! reset handling, player commit-and-move bounded by the sensor raycast,
//! tower placement, enemy pursuit, overlap resolution, then a full batch
//! rebuild for the render sink.

use glam::{IVec2, Vec2};

use crate::consts::PURSUIT_EPSILON;
use crate::error::CoreError;
use crate::math::aabb_collision;
use crate::renderer::batch::Primitive;
use crate::renderer::frame::build_frame;

use super::sensor::{SensorResult, read_sensor};
use super::state::{Direction, SimContext, TileGrid, Tower};

/// The fixed key set sampled once per frame by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Up,
    Left,
    Down,
    Right,
    Action,
    Reset,
}

impl Key {
    #[inline]
    const fn bit(self) -> u8 {
        1 << self as u8
    }
}

/// Input snapshot for a single frame
///
/// `keys`/`prev_keys` are bitmasks over [`Key`]; the host shifts the current
/// mask into `prev_keys` between frames.
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Seconds since startup
    pub time: f32,
    /// Seconds since the previous frame
    pub delta: f32,
    pub keys: u8,
    pub prev_keys: u8,
}

impl TickInput {
    pub fn new(time: f32, delta: f32) -> Self {
        Self {
            time,
            delta,
            keys: 0,
            prev_keys: 0,
        }
    }

    /// Mark a key held this frame and the previous one
    pub fn hold(mut self, key: Key) -> Self {
        self.keys |= key.bit();
        self.prev_keys |= key.bit();
        self
    }

    /// Mark a key that just transitioned to down this frame
    pub fn press(mut self, key: Key) -> Self {
        self.keys |= key.bit();
        self.prev_keys &= !key.bit();
        self
    }

    #[inline]
    pub fn key_down(&self, key: Key) -> bool {
        self.keys & key.bit() != 0
    }

    #[inline]
    pub fn key_just_down(&self, key: Key) -> bool {
        self.keys & key.bit() != 0 && self.prev_keys & key.bit() == 0
    }
}

const DIRECTION_KEYS: [(Key, Direction); 4] = [
    (Key::Up, Direction::Up),
    (Key::Left, Direction::Left),
    (Key::Down, Direction::Down),
    (Key::Right, Direction::Right),
];

/// Advance the simulation by one frame and rebuild the render batches
///
/// Returns the player's primitive range within the rebuilt frame.
pub fn tick(ctx: &mut SimContext, input: &TickInput) -> Result<Primitive, CoreError> {
    if input.key_just_down(Key::Reset) {
        ctx.reset()?;
    }

    // A direction commits only from idle; it then runs until the sensor cap
    // is reached
    if ctx.player.motion.is_none() {
        for (key, direction) in DIRECTION_KEYS {
            if input.key_just_down(key) {
                ctx.player.motion = Some(direction);
                ctx.player.facing = direction;
                break;
            }
        }
    }

    let mut active_ray: Option<SensorResult> = None;
    if let Some(direction) = ctx.player.motion {
        let chunk = ctx.world.current_chunk(&ctx.player);
        let grid = chunk.tile_grid(&ctx.world_arena);
        let ray = read_sensor(grid, ctx.player.position, direction);

        let mut step = input.delta * ctx.config.player_speed;
        if step >= ray.distance {
            step = ray.distance;
            ctx.player.motion = None;
        }
        ctx.player.position += direction.to_vec() * step;
        active_ray = Some(ray);
    }

    if input.key_just_down(Key::Action) {
        place_tower(ctx)?;
    }

    update_enemies(ctx, input.delta);

    build_frame(
        &ctx.world,
        &ctx.world_arena,
        &ctx.player,
        active_ray.as_ref(),
        &mut ctx.frame,
    )
}

/// Insert a tower one tile in front of the player
///
/// An occupied or out-of-bounds target cell rejects the placement; a full
/// tower list is a capacity error the host decides about.
fn place_tower(ctx: &mut SimContext) -> Result<(), CoreError> {
    let cell = IVec2::new(
        ctx.player.position.x.floor() as i32,
        ctx.player.position.y.floor() as i32,
    ) + ctx.player.facing.to_cell_step();

    let free = {
        let chunk = ctx.world.current_chunk(&ctx.player);
        chunk.is_tile_free(chunk.tile_grid(&ctx.world_arena), cell.x, cell.y)
    };
    if !free {
        log::warn!("tower placement rejected at occupied cell {cell}");
        return Ok(());
    }

    ctx.world
        .current_chunk_mut(&ctx.player)
        .push_tower(Tower { cell })
}

/// Enemies in the player's chunk pursue the player; destination cells are
/// gated by tile/tower occupancy, and overlapping enemies are flagged dead
fn update_enemies(ctx: &mut SimContext, delta: f32) {
    let player_pos = ctx.player.position;
    let speed = ctx.config.enemy_speed;

    let arena = &ctx.world_arena;
    let chunk = ctx.world.current_chunk_mut(&ctx.player);
    let grid = TileGrid::new(chunk.width, chunk.height, arena.bytes(chunk.tiles));

    let towers = &chunk.towers;
    for enemy in chunk.enemies.iter_mut().filter(|e| !e.dead) {
        let to_player = player_pos - enemy.position;
        if to_player.length() > PURSUIT_EPSILON {
            let next = enemy.position + to_player.normalize() * speed * delta;
            let cell = IVec2::new(next.x.floor() as i32, next.y.floor() as i32);
            let blocked = !grid.in_bounds(cell.x, cell.y)
                || grid.solid(cell.x, cell.y)
                || towers.iter().any(|t| t.cell == cell);
            if !blocked {
                enemy.position = next;
            }
        }

        if aabb_collision(
            player_pos,
            player_pos + Vec2::ONE,
            enemy.position,
            enemy.position + Vec2::ONE,
        ) {
            enemy.dead = true;
        }
    }
}
