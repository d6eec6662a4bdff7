//! Vertex record shared with the external render sink

use bytemuck::{Pod, Zeroable};

/// Simple 2D vertex with position and color
///
/// `#[repr(C)]` + `Pod` so the sink can upload the whole buffer without
/// conversion.
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }
}

/// Colors for game elements
pub mod colors {
    pub const TILE: [f32; 4] = [0.6, 0.6, 0.6, 1.0];
    pub const TOWER: [f32; 4] = [0.3, 0.5, 0.9, 1.0];
    pub const ENEMY: [f32; 4] = [0.9, 0.2, 0.2, 1.0];
    pub const PLAYER: [f32; 4] = [0.2, 0.8, 0.4, 1.0];
    pub const DEBUG_RAY: [f32; 4] = [1.0, 0.9, 0.2, 0.6];
    pub const BACKGROUND: [f32; 4] = [0.05, 0.05, 0.08, 1.0];
}
