//! Math helpers the simulation needs beyond glam
//!
//! Vectors and matrices are glam types throughout the crate; this module
//! holds the grid-game specifics: closed-interval AABB overlap, the Halton
//! low-discrepancy sequence used for deterministic entity scattering, and
//! the projection/view builders handed to the render sink.

use glam::{Mat4, Vec2, Vec3};

/// Closed-interval overlap test for two axis-aligned boxes
///
/// Boxes are given as (bottom-left, top-right) corner pairs; touching edges
/// count as a collision.
#[inline]
pub fn aabb_collision(bl0: Vec2, tr0: Vec2, bl1: Vec2, tr1: Vec2) -> bool {
    bl0.x <= tr1.x && tr0.x >= bl1.x && bl0.y <= tr1.y && tr0.y >= bl1.y
}

/// Round half-up: `floor(a + 0.5)`
///
/// Unlike `f32::round` this never rounds away from zero for negative `.5`
/// inputs, which keeps grid snapping direction-stable.
#[inline]
pub fn round_half_up(a: f32) -> f32 {
    (a + 0.5).floor()
}

/// The i-th element of the base-`b` Halton sequence, in [0, 1)
///
/// Used to scatter entities over a chunk deterministically without the
/// clumping a plain uniform draw produces.
pub fn halton(mut i: u32, base: u32) -> f32 {
    let mut f = 1.0_f32;
    let mut r = 0.0_f32;
    while i > 0 {
        f /= base as f32;
        r += f * (i % base) as f32;
        i /= base;
    }
    r
}

/// Orthographic projection for a y-down pixel-space viewport
///
/// Maps (0,0) to the top-left corner and (width, height) to the
/// bottom-right, matching the layer coordinates the batch builder emits.
pub fn ortho_projection(width: f32, height: f32) -> Mat4 {
    Mat4::orthographic_rh(0.0, width, height, 0.0, -1.0, 1.0)
}

/// View matrix for the render sink's camera
pub fn look_at(eye: Vec3, target: Vec3, up: Vec3) -> Mat4 {
    Mat4::look_at_rh(eye, target, up)
}
