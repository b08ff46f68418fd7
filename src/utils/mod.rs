//! # Utilities Module
//!
//! Geometry and sampling helpers shared by the engine.

pub mod math;

pub use math::*;
