// src/geometry/mod.rs

// Deklaration der Untermodule für die Kern-Geometrie
pub mod properties; // Enthält den RingProperties-Trait
pub mod ring; // Enthält die Ring-Struktur selbst

// Re-Exporte für den einfachen Zugriff auf die wichtigsten Elemente
pub use self::properties::{Orientation, RingProperties};
pub use self::ring::Ring;
