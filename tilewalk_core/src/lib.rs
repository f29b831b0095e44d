//! Lazy traversal of multi-resolution tile pyramids.
//!
//! A [`TileSource`] reports, for every zoom level, the rectangle of tiles that
//! intersects its data and materializes single tiles on request. A [`PyramidWalker`]
//! visits every tile of a source exactly once, from the highest zoom level down to
//! level 0, holding nothing but its current position.
//!
//! - [`types`] - coordinates, per-level bounds, zoom ranges, geographic bounding boxes
//! - [`source`] - the source contract plus grid- and list-based sources
//! - [`walker`] - the walker and the iterators built on it
//! - [`parallel`] - single-threaded enumeration with parallel materialization

pub mod parallel;
pub use parallel::*;

pub mod source;
pub use source::*;

pub mod types;
pub use types::*;

pub mod walker;
pub use walker::*;
