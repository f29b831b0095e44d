//! Contains the value types of a tile pyramid: coordinates, per-level bounds, zoom ranges
//! and geographic bounding boxes.

mod geo_bbox;
pub use geo_bbox::*;

mod tile_bounds;
pub use tile_bounds::*;

mod tile_coord;
pub use tile_coord::*;

mod zoom_range;
pub use zoom_range::*;
