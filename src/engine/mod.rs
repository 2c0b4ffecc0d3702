// src/engine/mod.rs

pub mod draw;
pub mod merge;
pub mod mode;
pub mod options;
pub mod session;
pub mod store;

pub use draw::{ChangeEvent, ChangeReason, DrawEngine};
pub use merge::{MergeEngine, MergeOutcome};
pub use mode::Mode;
pub use options::CreateOptions;
pub use session::DrawSession;
pub use store::{Polygon, PolygonId, PolygonSet};
