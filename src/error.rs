//! Structured error taxonomy for the core
//!
//! The original fixed-capacity design aborted on any overflow. Capacities are
//! configuration here, so exceeding one surfaces as an error the host can
//! treat as fatal; nothing is ever silently truncated.

use thiserror::Error;

/// Errors produced by the simulation and batch-building core
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// A bump allocation did not fit in the arena
    #[error("arena exhausted: requested {requested} bytes, {available} available")]
    ArenaExhausted { requested: usize, available: usize },

    /// A fixed-capacity list (vertex buffer, batch, towers, enemies) is full
    #[error("capacity exceeded for {what} (capacity {capacity})")]
    CapacityExceeded {
        what: &'static str,
        capacity: usize,
    },

    /// World pixel-map input was malformed
    #[error("world load failed: {0}")]
    WorldLoad(String),
}
