//! Capacity-checked quad batches
//!
//! `RenderFrame` is immediate-mode: the vertex cursor and every batch are
//! zeroed at the start of each frame and rebuilt from current world state.
//! Appends are bounds-checked against configured capacities and fail with a
//! structured error rather than truncating.

use glam::Vec2;

use crate::config::CoreConfig;
use crate::error::CoreError;

use super::vertex::Vertex;

/// One drawable primitive: a 4-vertex triangle-strip range into the shared
/// vertex buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Primitive {
    pub offset: u32,
    pub count: u32,
}

/// Named batch layers, drawn back to front
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layer {
    Level,
    Entities,
    Player,
    Debug,
}

impl Layer {
    pub const ALL: [Layer; 4] = [Layer::Level, Layer::Entities, Layer::Player, Layer::Debug];

    #[inline]
    fn index(self) -> usize {
        match self {
            Layer::Level => 0,
            Layer::Entities => 1,
            Layer::Player => 2,
            Layer::Debug => 3,
        }
    }
}

/// Primitive ranges belonging to one layer
#[derive(Debug)]
pub struct Batch {
    primitives: Vec<Primitive>,
    capacity: usize,
}

impl Batch {
    fn new(capacity: usize) -> Self {
        Self {
            primitives: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Bounds-checked primitive append
    pub fn record(&mut self, primitive: Primitive) -> Result<(), CoreError> {
        if self.primitives.len() >= self.capacity {
            return Err(CoreError::CapacityExceeded {
                what: "batch primitive list",
                capacity: self.capacity,
            });
        }
        self.primitives.push(primitive);
        Ok(())
    }

    pub fn primitives(&self) -> &[Primitive] {
        &self.primitives
    }

    pub fn len(&self) -> usize {
        self.primitives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }

    fn clear(&mut self) {
        self.primitives.clear();
    }
}

/// The shared per-frame vertex buffer plus one batch per layer
#[derive(Debug)]
pub struct RenderFrame {
    vertices: Vec<Vertex>,
    max_vertices: usize,
    batches: [Batch; 4],
}

impl RenderFrame {
    pub fn new(config: &CoreConfig) -> Self {
        Self {
            vertices: Vec::with_capacity(config.max_vertices),
            max_vertices: config.max_vertices,
            batches: [
                Batch::new(config.max_primitives),
                Batch::new(config.max_primitives),
                Batch::new(config.max_primitives),
                Batch::new(config.max_primitives),
            ],
        }
    }

    /// Zero the vertex cursor and every batch; call once per frame before
    /// any draw call
    pub fn begin_frame(&mut self) {
        self.vertices.clear();
        for batch in &mut self.batches {
            batch.clear();
        }
    }

    /// Append one quad's vertices without recording it in a batch
    ///
    /// Vertex order is TL, TR, BL, BR so the sink draws each primitive as a
    /// two-triangle strip. Returns the primitive range for callers that need
    /// to reference this exact quad later.
    pub fn push_quad(
        &mut self,
        top_left: Vec2,
        size: Vec2,
        color: [f32; 4],
    ) -> Result<Primitive, CoreError> {
        if self.vertices.len() + 4 > self.max_vertices {
            return Err(CoreError::CapacityExceeded {
                what: "frame vertex buffer",
                capacity: self.max_vertices,
            });
        }

        let offset = self.vertices.len() as u32;
        let (x, y) = (top_left.x, top_left.y);
        self.vertices.push(Vertex::new(x, y, color));
        self.vertices.push(Vertex::new(x + size.x, y, color));
        self.vertices.push(Vertex::new(x, y + size.y, color));
        self.vertices.push(Vertex::new(x + size.x, y + size.y, color));

        Ok(Primitive { offset, count: 4 })
    }

    /// Append one quad and record it in `layer`'s batch
    pub fn draw_quad(
        &mut self,
        layer: Layer,
        top_left: Vec2,
        size: Vec2,
        color: [f32; 4],
    ) -> Result<Primitive, CoreError> {
        let primitive = self.push_quad(top_left, size, color)?;
        self.batches[layer.index()].record(primitive)?;
        Ok(primitive)
    }

    /// Record an already-pushed primitive into a layer's batch
    pub fn record(&mut self, layer: Layer, primitive: Primitive) -> Result<(), CoreError> {
        self.batches[layer.index()].record(primitive)
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn batch(&self, layer: Layer) -> &Batch {
        &self.batches[layer.index()]
    }
}
