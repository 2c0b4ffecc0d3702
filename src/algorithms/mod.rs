// src/algorithms/mod.rs

pub mod concave_hull;
pub mod edit;
pub mod intersection;
pub mod simplify;
pub mod union;

pub use concave_hull::*;
pub use edit::*;
pub use intersection::*;
pub use simplify::*;
pub use union::*;
