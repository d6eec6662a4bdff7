//! Gridrun - a tile-grid action game core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (tile world, sensor raycasts, player/enemy update)
//! - `renderer`: CPU-side quad batch builder consumed by an external render sink
//! - `arena`: Bump-pointer allocator backing world data
//! - `config`: Data-driven capacities and tuning
//!
//! Windowing, input polling, GPU upload and image decoding live outside this
//! crate. The core takes a per-frame input snapshot and produces vertex
//! batches; the host wires both ends together once per frame.

pub mod arena;
pub mod config;
pub mod error;
pub mod math;
pub mod renderer;
pub mod sim;

pub use config::CoreConfig;
pub use error::CoreError;

/// Game configuration constants
pub mod consts {
    /// Side length of one tile in render units (pixels at native scale)
    pub const TILE_SIZE: f32 = 32.0;

    /// Reference resolution the level layer targets (30 x ~17 tiles)
    pub const SCREEN_WIDTH: f32 = 960.0;
    pub const SCREEN_HEIGHT: f32 = 540.0;

    /// Default player travel speed in tiles per second
    pub const PLAYER_SPEED: f32 = 20.0;
    /// Default enemy pursuit speed in tiles per second
    pub const ENEMY_SPEED: f32 = 3.0;

    /// Below this distance enemies stop pursuing, which also guards the
    /// zero-length normalize precondition
    pub const PURSUIT_EPSILON: f32 = 1e-4;

    /// Half-thickness of debug sensor ray quads, in tiles
    pub const DEBUG_RAY_HALF_WIDTH: f32 = 0.05;
}
