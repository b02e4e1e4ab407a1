//! Layout resolution engine
//!
//! Converts the tree of relatively-positioned elements into absolute
//! coordinates, computes the diagram's bounding box, derives the
//! fit-and-center transform, and resolves arrow attachment points.
//!
//! The coordinate resolver runs first because both the bounding-box
//! calculator and the connection-point resolver need the id lookup to
//! resolve arrow anchors.

pub mod bounds;
pub mod connection;
pub mod fit;
pub mod resolver;
pub mod types;

pub use bounds::compute_bounding_box;
pub use connection::connection_point;
pub use fit::compute_fit;
pub use resolver::resolve;
pub use types::{BoundingBox, ElementLookup, FitTransform, Point, ResolvedElement};
