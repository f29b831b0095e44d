//! Walking a tile pyramid level by level, from the highest zoom level down.

mod iter;
pub use iter::*;

mod pyramid_walker;
pub use pyramid_walker::*;
