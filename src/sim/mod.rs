//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Per-frame input snapshots only, no platform polling
//! - Seeded RNG only (world generation)
//! - No rendering or GPU dependencies; the frame builder consumes this state
//!
//! One `tick` advances the world by one frame: player movement capped by the
//! sensor raycast, enemy pursuit, overlap resolution, then batch rebuild.

pub mod sensor;
pub mod state;
pub mod tick;
pub mod worldgen;

pub use sensor::{SensorResult, SensorStatus, read_sensor};
pub use state::{Chunk, Direction, Enemy, Player, SimContext, TileGrid, Tower, World};
pub use tick::{Key, TickInput, tick};
