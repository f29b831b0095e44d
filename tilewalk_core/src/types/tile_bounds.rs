//! This module defines the `TileBounds` struct, the inclusive rectangle of tile indices
//! covered at a single zoom level.
//!
//! # Overview
//!
//! Bounds are produced by a [`TileSource`](crate::TileSource) for each zoom level and
//! are read-only afterwards. A constructed `TileBounds` is never empty or inverted:
//! "no tiles at this level" is expressed by the absence of bounds (`Option::None`).

use super::TileCoord;
use anyhow::{Result, ensure};
use itertools::Itertools;
use std::fmt;

/// Inclusive range of valid tile x/y values at one zoom level.
///
/// Invariant: `x_min <= x_max` and `y_min <= y_max`.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileBounds {
	/// Minimum x-coordinate.
	pub x_min: u32,
	/// Minimum y-coordinate.
	pub y_min: u32,
	/// Maximum x-coordinate.
	pub x_max: u32,
	/// Maximum y-coordinate.
	pub y_max: u32,
}

impl TileBounds {
	/// Creates new `TileBounds` from its corners.
	///
	/// # Errors
	///
	/// - If `x_min > x_max` or `y_min > y_max`.
	pub fn new(x_min: u32, y_min: u32, x_max: u32, y_max: u32) -> Result<TileBounds> {
		ensure!(x_min <= x_max, "x_min ({x_min}) must be <= x_max ({x_max})");
		ensure!(y_min <= y_max, "y_min ({y_min}) must be <= y_max ({y_max})");
		Ok(TileBounds {
			x_min,
			y_min,
			x_max,
			y_max,
		})
	}

	/// Creates bounds covering a single tile.
	pub fn new_single(x: u32, y: u32) -> TileBounds {
		TileBounds {
			x_min: x,
			y_min: y,
			x_max: x,
			y_max: y,
		}
	}

	/// Width in tiles, up to `2^32`.
	pub fn width(&self) -> u64 {
		u64::from(self.x_max - self.x_min) + 1
	}

	/// Height in tiles, up to `2^32`.
	pub fn height(&self) -> u64 {
		u64::from(self.y_max - self.y_min) + 1
	}

	/// Number of tiles within the bounds.
	///
	/// Saturates at `u64::MAX`, which only the full `2^32 x 2^32` square exceeds.
	pub fn count_tiles(&self) -> u64 {
		self.width().saturating_mul(self.height())
	}

	/// Checks if `(x, y)` lies within the bounds.
	pub fn contains(&self, x: u32, y: u32) -> bool {
		x >= self.x_min && x <= self.x_max && y >= self.y_min && y <= self.y_max
	}

	/// The first coordinate of these bounds in row-major order.
	pub fn first(&self, level: u8) -> TileCoord {
		TileCoord {
			level,
			x: self.x_min,
			y: self.y_min,
		}
	}

	/// Returns an iterator over all tile coordinates within the bounds at `level`.
	///
	/// The iteration is in row-major order: increasing `x` within a row, rows in
	/// increasing `y`.
	pub fn iter_coords(&self, level: u8) -> impl Iterator<Item = TileCoord> + use<> {
		let y_range = self.y_min..=self.y_max;
		let x_range = self.x_min..=self.x_max;
		y_range
			.cartesian_product(x_range)
			.map(move |(y, x)| TileCoord { level, x, y })
	}
}

impl fmt::Debug for TileBounds {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "TileBounds{self}")
	}
}

impl fmt::Display for TileBounds {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "[{},{},{},{}]", self.x_min, self.y_min, self.x_max, self.y_max)
	}
}
