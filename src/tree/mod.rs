//! Fractal tree engine: one seeded branching recursion, walked once to
//! measure and once to paint.

pub mod bounds;
pub mod geometry;
pub mod render;
pub mod traverse;
pub mod viewport;

pub use bounds::estimate_bounds;
pub use geometry::BBox;
pub use render::render;
pub use traverse::census;
pub use viewport::fit_viewport;
