// src/lib.rs
//! Kernbibliothek für das Freihand-Zeichnen geschlossener Polygone.
//!
//! Rohe Eingabepfade werden vereinfacht, optional zu einer konkaven Hülle
//! verdichtet und mit überlappenden Bestandspolygonen vereinigt. Die
//! [`engine::DrawEngine`] bündelt Bestand, Modusmaske, Eingabesitzungen
//! und Benachrichtigungen; die Bausteine darunter sind einzeln nutzbar.

pub mod algorithms;
pub mod engine;
pub mod error;
pub mod geometry;
pub mod types;
pub mod utils;

pub use algorithms::{
    ConcaveHullComputer, EditAction, EditClassifier, IntersectionAnalyzer, PathSimplifier,
    RingUnion,
};
pub use engine::{
    ChangeEvent, ChangeReason, CreateOptions, DrawEngine, DrawSession, MergeEngine, MergeOutcome,
    Mode, Polygon, PolygonId, PolygonSet,
};
pub use error::{DrawError, DrawResult};
pub use geometry::{Orientation, Ring, RingProperties};
pub use types::{Bounds2D, Point2D};
