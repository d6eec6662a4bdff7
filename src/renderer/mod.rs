//! CPU-side quad batch building
//!
//! The core renders nothing itself; it fills a shared vertex buffer with
//! colored quads each frame, partitioned into per-layer batches of
//! (offset, count) primitive ranges. An external sink uploads the buffer
//! once and issues one batched multi-draw per layer (triangle strips,
//! 4 vertices per quad).

pub mod batch;
pub mod frame;
pub mod vertex;

pub use batch::{Batch, Layer, Primitive, RenderFrame};
pub use frame::build_frame;
pub use vertex::Vertex;
