//! This module defines the `TileBoundsPyramid` struct, an explicit list of tile bounds
//! per zoom level that acts as a coordinate-only [`TileSource`].

use super::TileSource;
use crate::{MAX_ZOOM_LEVEL, TileBounds, TileCoord};
use anyhow::{Result, ensure};
use std::fmt;

const LEVEL_COUNT: usize = MAX_ZOOM_LEVEL as usize + 1;

/// A pyramid of optional tile bounds for the levels `0..=max_zoom_level`.
///
/// Levels without bounds contain no tiles. Materializing a tile yields its own
/// coordinate, so walking this source enumerates coordinates without producing content.
#[derive(Clone, PartialEq, Eq)]
pub struct TileBoundsPyramid {
	level_bounds: [Option<TileBounds>; LEVEL_COUNT],
	max_zoom_level: u8,
}

impl TileBoundsPyramid {
	/// Creates a pyramid with no tiles at any level up to `max_zoom_level`.
	pub fn new_empty(max_zoom_level: u8) -> Result<TileBoundsPyramid> {
		ensure!(
			max_zoom_level <= MAX_ZOOM_LEVEL,
			"max_zoom_level ({max_zoom_level}) must be <= {MAX_ZOOM_LEVEL}"
		);
		Ok(TileBoundsPyramid {
			level_bounds: [None; LEVEL_COUNT],
			max_zoom_level,
		})
	}

	/// Creates a pyramid where every level up to `max_zoom_level` covers the full
	/// square grid `0..2^level` in both directions.
	pub fn new_full(max_zoom_level: u8) -> Result<TileBoundsPyramid> {
		let mut pyramid = TileBoundsPyramid::new_empty(max_zoom_level)?;
		for level in 0..=max_zoom_level {
			let max = (1u32 << level) - 1;
			pyramid.level_bounds[level as usize] = Some(TileBounds::new(0, 0, max, max)?);
		}
		Ok(pyramid)
	}

	/// Builds a pyramid from `(level, bounds)` pairs; the highest level given becomes the maximum.
	pub fn from_levels(levels: &[(u8, TileBounds)]) -> Result<TileBoundsPyramid> {
		let max_zoom_level = levels.iter().map(|(level, _)| *level).max().unwrap_or(0);
		let mut pyramid = TileBoundsPyramid::new_empty(max_zoom_level)?;
		for (level, bounds) in levels {
			pyramid.set_level_bounds(*level, *bounds)?;
		}
		Ok(pyramid)
	}

	/// Sets (in-place) the bounds at the specified zoom level.
	pub fn set_level_bounds(&mut self, level: u8, bounds: TileBounds) -> Result<()> {
		self.check_level(level)?;
		self.level_bounds[level as usize] = Some(bounds);
		Ok(())
	}

	/// Removes all tiles of a level.
	pub fn clear_level(&mut self, level: u8) -> Result<()> {
		self.check_level(level)?;
		self.level_bounds[level as usize] = None;
		Ok(())
	}

	pub fn get_level_bounds(&self, level: u8) -> Option<&TileBounds> {
		self.level_bounds.get(level as usize)?.as_ref()
	}

	/// Returns an iterator over all levels that contain tiles, lowest level first.
	pub fn iter_levels(&self) -> impl Iterator<Item = (u8, &TileBounds)> {
		self.level_bounds[..=self.max_zoom_level as usize]
			.iter()
			.enumerate()
			.filter_map(|(level, bounds)| bounds.as_ref().map(|b| (level as u8, b)))
	}

	fn check_level(&self, level: u8) -> Result<()> {
		ensure!(
			level <= self.max_zoom_level,
			"level ({level}) must be <= max_zoom_level ({})",
			self.max_zoom_level
		);
		Ok(())
	}
}

impl TileSource for TileBoundsPyramid {
	type Artifact = TileCoord;

	fn max_zoom_level(&self) -> u8 {
		self.max_zoom_level
	}

	fn bounds_for_zoom(&self, level: u8) -> Result<Option<TileBounds>> {
		self.check_level(level)?;
		Ok(self.level_bounds[level as usize])
	}

	fn materialize(&self, coord: &TileCoord) -> Result<TileCoord> {
		let inside = self
			.get_level_bounds(coord.level)
			.is_some_and(|bounds| bounds.contains(coord.x, coord.y));
		ensure!(inside, "{coord:?} is outside of the pyramid");
		Ok(*coord)
	}
}

impl fmt::Debug for TileBoundsPyramid {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_list().entries(self.iter_levels().map(|(z, b)| format!("{z}: {b}"))).finish()
	}
}
