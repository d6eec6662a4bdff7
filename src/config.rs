//! Data-driven capacities and tuning
//!
//! Every fixed-size buffer in the core (vertex buffer, batch
//! primitive lists, per-chunk entity lists, world arena) is sized from here
//! instead of being a compile-time constant, so deployments and tests can
//! shrink or grow them without touching the core.

use serde::{Deserialize, Serialize};

use crate::consts;

/// Core configuration, deserializable from JSON
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CoreConfig {
    /// Chunk grid dimensions of the world, in chunks
    pub chunks_x: usize,
    pub chunks_y: usize,
    /// Tile dimensions of one chunk
    pub chunk_width: usize,
    pub chunk_height: usize,

    /// Per-chunk entity list capacities
    pub max_enemies: usize,
    pub max_towers: usize,
    /// Enemies scattered into each chunk at generation time
    pub spawn_enemies: usize,

    /// Shared vertex buffer capacity, in vertices
    pub max_vertices: usize,
    /// Primitive list capacity per batch layer
    pub max_primitives: usize,

    /// World arena size in bytes; must hold every chunk's tile grid
    pub world_arena_bytes: usize,

    /// Tiles per second
    pub player_speed: f32,
    pub enemy_speed: f32,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            chunks_x: 2,
            chunks_y: 2,
            chunk_width: 16,
            chunk_height: 16,
            max_enemies: 64,
            max_towers: 32,
            spawn_enemies: 4,
            max_vertices: 4096,
            max_primitives: 512,
            world_arena_bytes: 64 * 1024,
            player_speed: consts::PLAYER_SPEED,
            enemy_speed: consts::ENEMY_SPEED,
        }
    }
}

impl CoreConfig {
    /// Parse a configuration from JSON; missing fields take defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Bytes of tile storage one chunk needs
    pub fn chunk_tile_bytes(&self) -> usize {
        self.chunk_width * self.chunk_height
    }
}
