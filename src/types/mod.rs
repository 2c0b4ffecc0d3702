// src/types/mod.rs
pub mod bounds;

pub use bounds::*;

// Re-export häufig verwendeter externer Typen
pub use glam::Vec2;

// Einheitliche Typen für das gesamte Crate
pub type Point2D = Vec2;
