//! # delaunay2d
//!
//! Incremental planar Delaunay triangulation over a Guibas-Stolfi quad-edge
//! subdivision.
//!
//! The caller supplies a point buffer with three reserved slots at the end,
//! inserts each site, and pulls the resulting faces as point-index triples:
//!
//! ```rust
//! use delaunay2d::prelude::*;
//!
//! let mut points = vec![
//!     Point2::new(0.0, 0.0),
//!     Point2::new(10.0, 0.0),
//!     Point2::new(10.0, 10.0),
//!     Point2::new(0.0, 10.0),
//!     // Three slots reserved for the synthetic bounding triangle.
//!     Point2::default(),
//!     Point2::default(),
//!     Point2::default(),
//! ];
//!
//! let mut subdivision = Subdivision::new(&mut points).unwrap();
//! for site in 0..subdivision.site_count() {
//!     subdivision.insert_site(site).unwrap();
//! }
//!
//! assert_eq!(subdivision.unique_faces().len(), 2);
//! assert!(subdivision.is_delaunay());
//! ```
//!
//! # Structure
//!
//! - [`core::quad_edge`] — the combinatorial layer: quad-edge groups in a
//!   per-instance arena, with `rot`/`sym`/`splice` surgery and the derived
//!   `connect`/`delete`/`swap` operators.
//! - [`core::subdivision`] — the incremental algorithm: synthetic bounding
//!   triangle, point location by mesh walking, triangle fan-out, and the
//!   local Delaunay repair sweep.
//! - [`geometry`] — the point type and the pure predicates (orientation,
//!   in-circle, on-segment) everything above is built on.
//!
//! Each [`core::subdivision::Subdivision`] owns its topology arena, so
//! independent triangulations never share state; dropping the subdivision
//! releases every quad-edge group.
//!
//! # Cargo features
//!
//! - `dense-slotmap` (default): cache-friendly `DenseSlotMap` arena backing;
//!   disable for the plain `SlotMap`.

/// Topological and algorithmic core: the quad-edge arena and the
/// subdivision built on it.
pub mod core {
    pub mod collections;
    pub mod quad_edge;
    pub mod subdivision;
    pub use quad_edge::*;
    pub use subdivision::*;
}

/// Geometric types and predicates.
pub mod geometry {
    pub mod point;
    pub mod predicates;
    /// Point-set generation utilities.
    pub mod util {
        pub mod point_generation;
        pub use point_generation::*;
    }
    pub use point::*;
    pub use predicates::*;
    pub use util::*;
}

/// Re-exports of the commonly used surface.
pub mod prelude {
    pub use crate::core::collections::{FastHashMap, FastHashSet, StorageMap};
    pub use crate::core::quad_edge::{EdgePool, EdgeRef, PointIndex, QuadEdge, QuadKey};
    pub use crate::core::subdivision::{
        BOUNDING_SLOTS, ConstructionError, DelaunayViolation, InsertionError, SiteOutcome,
        Subdivision,
    };
    pub use crate::geometry::point::Point2;
    pub use crate::geometry::predicates::{
        InCircle, Line, coincident, counterclockwise, in_circle, in_circle_position, on_segment,
        signed_area2,
    };
    pub use crate::geometry::util::point_generation::{
        PointGenerationError, generate_random_points, generate_random_points_seeded,
    };
}

/// Checks that structs implement the `auto` traits. Traits are checked at
/// compile time, so this function is only used for testing.
#[must_use]
pub const fn is_normal<T: Sized + Send + Sync + Unpin>() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use crate::is_normal;
    use crate::prelude::*;

    #[test]
    fn normal_types() {
        assert!(is_normal::<Point2>());
        assert!(is_normal::<EdgeRef>());
        assert!(is_normal::<EdgePool>());
        assert!(is_normal::<SiteOutcome>());
        assert!(is_normal::<Subdivision<'static>>());
    }
}
