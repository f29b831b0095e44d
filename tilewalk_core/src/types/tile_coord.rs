//! Three-dimensional tile coordinates in a tile pyramid
//!
//! This module provides the [`TileCoord`] type, the address of a single tile:
//! a zoom level plus column (`x`) and row (`y`) indices within that level's grid.
//!
//! # Examples
//!
//! ```
//! use tilewalk_core::TileCoord;
//!
//! let coord = TileCoord::new(5, 6, 7).unwrap();
//! assert_eq!(coord.level, 5);
//! assert_eq!(coord.x, 6);
//! assert_eq!(coord.y, 7);
//! assert_eq!(coord.to_string(), "5/6/7");
//! ```

use anyhow::{Result, ensure};
use std::fmt::{self, Debug, Display};

/// Highest zoom level a tile coordinate may address.
pub const MAX_ZOOM_LEVEL: u8 = 31;

/// A 3D tile coordinate with zoom level, x and y indices.
///
/// The coordinate does not know which grid it belongs to, so `x` and `y` are only
/// checked against the bounds reported by a [`TileSource`](crate::TileSource).
#[derive(Eq, PartialEq, Clone, Hash, Copy)]
pub struct TileCoord {
	/// The zoom level of the tile.
	pub level: u8,
	/// The x index (column) of the tile.
	pub x: u32,
	/// The y index (row) of the tile.
	pub y: u32,
}

impl TileCoord {
	/// Create a new `TileCoord` at the given zoom `level` and tile indices `x`, `y`.
	///
	/// # Errors
	/// Returns an error if `level` > 31.
	pub fn new(level: u8, x: u32, y: u32) -> Result<TileCoord> {
		ensure!(level <= MAX_ZOOM_LEVEL, "level ({level}) must be <= {MAX_ZOOM_LEVEL}");
		Ok(TileCoord { level, x, y })
	}

	/// Serialize this coordinate to a compact JSON string `{"z":…,"x":…,"y":…}`.
	#[must_use]
	pub fn as_json(&self) -> String {
		format!("{{\"z\":{},\"x\":{},\"y\":{}}}", self.level, self.x, self.y)
	}
}

/// Custom `Debug` format as `TileCoord(z, [x, y])` for readability.
impl Debug for TileCoord {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_fmt(format_args!("TileCoord({}, [{}, {}])", &self.level, &self.x, &self.y))
	}
}

/// Path-like `z/x/y` format.
impl Display for TileCoord {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}/{}/{}", self.level, self.x, self.y)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn partial_eq() {
		let c = TileCoord::new(2, 2, 2).unwrap();
		assert!(c.eq(&c));
		assert!(c.eq(&c.clone()));
		assert!(c.ne(&TileCoord::new(3, 2, 2).unwrap()));
		assert!(c.ne(&TileCoord::new(2, 3, 2).unwrap()));
		assert!(c.ne(&TileCoord::new(2, 2, 3).unwrap()));
	}

	#[test]
	fn new_and_getters() {
		let coord = TileCoord::new(5, 3, 4).unwrap();
		assert_eq!(coord.x, 3);
		assert_eq!(coord.y, 4);
		assert_eq!(coord.level, 5);
	}

	#[test]
	fn level_out_of_range() {
		assert!(TileCoord::new(31, 0, 0).is_ok());
		let err = TileCoord::new(32, 0, 0).unwrap_err();
		assert_eq!(err.to_string(), "level (32) must be <= 31");
	}

	#[test]
	fn formatting() {
		let coord = TileCoord::new(4, 7, 8).unwrap();
		assert_eq!(format!("{coord:?}"), "TileCoord(4, [7, 8])");
		assert_eq!(format!("{coord}"), "4/7/8");
		assert_eq!(coord.as_json(), "{\"z\":4,\"x\":7,\"y\":8}");
	}
}
