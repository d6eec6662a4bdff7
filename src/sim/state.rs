//! World, chunk and entity state
//!
//! The world is a grid of chunks; each chunk owns a row-major tile grid
//! (0 = walkable, nonzero = solid) stored in the world arena, plus bounded
//! enemy and tower lists. The player carries a continuous world-space
//! position in tile units and the index of the chunk it collides against.

use glam::{IVec2, Vec2};
use serde::{Deserialize, Serialize};

use crate::arena::{Arena, Region};
use crate::config::CoreConfig;
use crate::error::CoreError;
use crate::renderer::batch::RenderFrame;

/// One of the four committed movement directions
///
/// Screen-space convention: +Y points down, so `Up` is (0, -1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Left,
    Down,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Left,
        Direction::Down,
        Direction::Right,
    ];

    /// Unit direction vector in y-down screen space
    #[inline]
    pub fn to_vec(self) -> Vec2 {
        match self {
            Direction::Up => Vec2::new(0.0, -1.0),
            Direction::Left => Vec2::new(-1.0, 0.0),
            Direction::Down => Vec2::new(0.0, 1.0),
            Direction::Right => Vec2::new(1.0, 0.0),
        }
    }

    /// Integer cell step in the same convention
    #[inline]
    pub fn to_cell_step(self) -> IVec2 {
        let v = self.to_vec();
        IVec2::new(v.x as i32, v.y as i32)
    }

    #[inline]
    pub fn is_horizontal(self) -> bool {
        matches!(self, Direction::Left | Direction::Right)
    }
}

/// Borrowed view of one chunk's tile bytes
#[derive(Debug, Clone, Copy)]
pub struct TileGrid<'a> {
    pub width: i32,
    pub height: i32,
    tiles: &'a [u8],
}

impl<'a> TileGrid<'a> {
    pub fn new(width: i32, height: i32, tiles: &'a [u8]) -> Self {
        debug_assert_eq!(tiles.len(), (width * height) as usize);
        Self {
            width,
            height,
            tiles,
        }
    }

    #[inline]
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && x < self.width && y >= 0 && y < self.height
    }

    /// True if the cell holds a solid tile; out-of-bounds cells are not solid
    /// (the sensor reports them as boundary hits instead)
    #[inline]
    pub fn solid(&self, x: i32, y: i32) -> bool {
        self.in_bounds(x, y) && self.tiles[(x + y * self.width) as usize] != 0
    }
}

/// A pursuing enemy; dead enemies stay in the list, flagged
#[derive(Debug, Clone, Copy)]
pub struct Enemy {
    pub position: Vec2,
    pub dead: bool,
}

impl Enemy {
    pub fn at(position: Vec2) -> Self {
        Self {
            position,
            dead: false,
        }
    }
}

/// A static player-placed obstacle occupying exactly one tile
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tower {
    pub cell: IVec2,
}

/// A fixed-size tile grid plus the dynamic entities located within it
#[derive(Debug)]
pub struct Chunk {
    pub width: i32,
    pub height: i32,
    /// Row-major tile bytes in the world arena
    pub tiles: Region,
    pub enemies: Vec<Enemy>,
    pub towers: Vec<Tower>,
    enemy_capacity: usize,
    tower_capacity: usize,
}

impl Chunk {
    pub fn new(width: i32, height: i32, tiles: Region, config: &CoreConfig) -> Self {
        Self {
            width,
            height,
            tiles,
            enemies: Vec::with_capacity(config.max_enemies),
            towers: Vec::with_capacity(config.max_towers),
            enemy_capacity: config.max_enemies,
            tower_capacity: config.max_towers,
        }
    }

    /// Borrow the tile bytes out of the world arena
    pub fn tile_grid<'a>(&self, arena: &'a Arena) -> TileGrid<'a> {
        TileGrid::new(self.width, self.height, arena.bytes(self.tiles))
    }

    /// Bounds-checked enemy append
    pub fn push_enemy(&mut self, enemy: Enemy) -> Result<(), CoreError> {
        if self.enemies.len() >= self.enemy_capacity {
            return Err(CoreError::CapacityExceeded {
                what: "chunk enemy list",
                capacity: self.enemy_capacity,
            });
        }
        self.enemies.push(enemy);
        Ok(())
    }

    /// Bounds-checked tower append
    pub fn push_tower(&mut self, tower: Tower) -> Result<(), CoreError> {
        if self.towers.len() >= self.tower_capacity {
            return Err(CoreError::CapacityExceeded {
                what: "chunk tower list",
                capacity: self.tower_capacity,
            });
        }
        self.towers.push(tower);
        Ok(())
    }

    /// True if an entity may occupy cell `(x, y)`
    ///
    /// False outside the chunk, on a solid tile, or on a tower cell; both
    /// static and dynamic occupancy are consulted.
    pub fn is_tile_free(&self, grid: TileGrid<'_>, x: i32, y: i32) -> bool {
        if !grid.in_bounds(x, y) || grid.solid(x, y) {
            return false;
        }
        !self.towers.iter().any(|t| t.cell == IVec2::new(x, y))
    }
}

/// The player avatar
#[derive(Debug, Clone, Copy)]
pub struct Player {
    /// Continuous world-space position in tile units
    pub position: Vec2,
    /// Index of the chunk whose grid the player collides against
    pub chunk_x: usize,
    pub chunk_y: usize,
    /// Committed movement, `None` when idle
    pub motion: Option<Direction>,
    /// Last committed direction; tower placement faces this way
    pub facing: Direction,
}

impl Player {
    pub fn spawned_at(position: Vec2, chunk_x: usize, chunk_y: usize) -> Self {
        Self {
            position,
            chunk_x,
            chunk_y,
            motion: None,
            facing: Direction::Down,
        }
    }
}

/// The chunk grid plus spawn data recorded at generation time
#[derive(Debug)]
pub struct World {
    chunks: Vec<Chunk>,
    pub chunks_x: usize,
    pub chunks_y: usize,
    pub player_spawn: Vec2,
    pub spawn_chunk: (usize, usize),
}

impl World {
    pub fn new(
        chunks: Vec<Chunk>,
        chunks_x: usize,
        chunks_y: usize,
        player_spawn: Vec2,
        spawn_chunk: (usize, usize),
    ) -> Self {
        debug_assert_eq!(chunks.len(), chunks_x * chunks_y);
        Self {
            chunks,
            chunks_x,
            chunks_y,
            player_spawn,
            spawn_chunk,
        }
    }

    /// Chunk at `(x, y)`. Precondition: indices in range.
    #[inline]
    pub fn chunk(&self, x: usize, y: usize) -> &Chunk {
        &self.chunks[x + y * self.chunks_x]
    }

    #[inline]
    pub fn chunk_mut(&mut self, x: usize, y: usize) -> &mut Chunk {
        &mut self.chunks[x + y * self.chunks_x]
    }

    /// The chunk the player currently collides against.
    /// Precondition: the player's chunk index is always valid.
    #[inline]
    pub fn current_chunk(&self, player: &Player) -> &Chunk {
        self.chunk(player.chunk_x, player.chunk_y)
    }

    #[inline]
    pub fn current_chunk_mut(&mut self, player: &Player) -> &mut Chunk {
        self.chunk_mut(player.chunk_x, player.chunk_y)
    }

    pub fn chunks(&self) -> &[Chunk] {
        &self.chunks
    }
}

/// Everything one simulation instance owns
///
/// No module-level globals: tests and hosts can run any number of contexts
/// side by side.
#[derive(Debug)]
pub struct SimContext {
    pub config: CoreConfig,
    pub world_arena: Arena,
    pub world: World,
    pub player: Player,
    pub frame: RenderFrame,
    pub seed: u64,
}

impl SimContext {
    /// Build a context with a freshly generated world
    pub fn new(config: CoreConfig, seed: u64) -> Result<Self, CoreError> {
        let mut world_arena = Arena::new(config.world_arena_bytes);
        let world = super::worldgen::generate(&config, seed, &mut world_arena)?;
        let player =
            Player::spawned_at(world.player_spawn, world.spawn_chunk.0, world.spawn_chunk.1);
        let frame = RenderFrame::new(&config);
        Ok(Self {
            config,
            world_arena,
            world,
            player,
            frame,
            seed,
        })
    }

    /// Regenerate the world and respawn the player, discarding all transient
    /// enemy/tower state. The world arena is fully rewound first.
    pub fn reset(&mut self) -> Result<(), CoreError> {
        log::info!("world reset (seed {})", self.seed);
        self.world = super::worldgen::generate(&self.config, self.seed, &mut self.world_arena)?;
        self.player = Player::spawned_at(
            self.world.player_spawn,
            self.world.spawn_chunk.0,
            self.world.spawn_chunk.1,
        );
        Ok(())
    }
}
