//! # Lantern
//!
//! A fog-of-war dungeon engine: agents move through rectangular rooms linked by
//! corridors and doors while a day/night solar cycle drives shadow rendering.
//!
//! ## Architecture Overview
//!
//! - **Game State**: the tick-driven [`GameState`] owns the topology, items,
//!   player, NPCs and viewport, and mutates them only inside `update`
//! - **Topology**: arena of rooms, corridors and doors addressed by stable ids
//! - **Containment / Fog**: per-agent current room/corridor tracking and
//!   monotone per-box visibility bitmaps
//! - **Generation**: a simple topology provider plus rejection-sampled item
//!   and NPC placement
//! - **Rendering**: a read-only frame producer writing onto any [`DrawSurface`]
//!
//! All randomness flows through one seedable `StdRng` owned by the game state.

pub mod game;
pub mod generation;
pub mod input;
pub mod rendering;
pub mod utils;

// Core module re-exports
pub use game::*;
pub use generation::*;
pub use input::*;
pub use rendering::*;
pub use utils::*;

/// Core error type for the Lantern engine.
#[derive(thiserror::Error, Debug)]
pub enum LanternError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// Topology handed to the engine is inconsistent
    #[error("Invalid topology: {0}")]
    InvalidTopology(String),

    /// A configuration call was rejected; the previous setting is kept
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// A rejection-sampling placement ran out of attempts
    #[error("Placement of {what} failed after {attempts} attempts")]
    PlacementExhausted { what: &'static str, attempts: u32 },

    /// Engine is in a state that does not permit the call
    #[error("Invalid engine state: {0}")]
    InvalidState(String),
}

/// Result type used throughout the Lantern codebase.
pub type LanternResult<T> = Result<T, LanternError>;

/// Version information for the engine.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Engine-wide constants.
pub mod config {
    /// Attempt budget shared by one placement call
    pub const MAX_PLACEMENT_ATTEMPTS: u32 = 100_000;

    /// Euclidean radius within which doors, items and NPCs are revealed
    pub const FOG_REVEAL_RADIUS: f32 = 2.3;

    /// Height/width ratio of a glyph cell, applied to NPC column motion
    pub const PIXEL_ASPECT: f32 = 1.5;

    /// Default length of a solar day in simulated minutes
    pub const DEFAULT_MINUTES_PER_DAY: f32 = 20.0;

    /// Default fraction of the viewport used as a page-wise scroll margin
    pub const DEFAULT_SCROLL_FRACTION: f32 = 0.2;

    /// Default viewport size in rows
    pub const DEFAULT_SCREEN_ROWS: i32 = 30;

    /// Default viewport size in columns
    pub const DEFAULT_SCREEN_COLS: i32 = 80;
}
