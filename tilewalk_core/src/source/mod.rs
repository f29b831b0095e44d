//! The tile source contract consumed by the [`PyramidWalker`](crate::PyramidWalker),
//! plus two reference implementations.

mod grid;
pub use grid::*;

mod tile_bounds_pyramid;
pub use tile_bounds_pyramid::*;

use crate::{TileBounds, TileCoord, ZoomRange};
use anyhow::{Result, anyhow};

/// Trait defining a pyramid of tiles that can be walked and materialized.
///
/// Implementations must return bounds for every level in `0..=max_zoom_level()` and
/// must accept any coordinate inside the bounds they reported for its level.
/// Walkers borrow the source, so it has to outlive every walker built from it.
///
/// Using several walkers over one source from different threads is only sound if the
/// source's methods are safe for concurrent reads, which `Sync` expresses.
pub trait TileSource {
	/// The materialized content of one tile.
	type Artifact;

	/// Highest zoom level available.
	fn max_zoom_level(&self) -> u8;

	/// Get the tile bounds for a zoom `level`, or `None` if the level has no tiles.
	fn bounds_for_zoom(&self, level: u8) -> Result<Option<TileBounds>>;

	/// Produce the tile content for the given coordinate.
	fn materialize(&self, coord: &TileCoord) -> Result<Self::Artifact>;

	/// All levels of this source, `0..=max_zoom_level()`.
	fn zoom_range(&self) -> ZoomRange {
		ZoomRange {
			min: 0,
			max: self.max_zoom_level(),
		}
	}

	/// Count the tiles in all levels of `range` without visiting them.
	///
	/// Fails if the sum does not fit into `u64`.
	fn count_tiles(&self, range: &ZoomRange) -> Result<u64> {
		let mut sum: u64 = 0;
		for level in range.iter_descending() {
			if let Some(bounds) = self.bounds_for_zoom(level)? {
				sum = sum
					.checked_add(bounds.count_tiles())
					.ok_or_else(|| anyhow!("number of tiles in {range:?} exceeds u64"))?;
			}
		}
		Ok(sum)
	}
}

impl<S: TileSource + ?Sized> TileSource for &S {
	type Artifact = S::Artifact;

	fn max_zoom_level(&self) -> u8 {
		(**self).max_zoom_level()
	}

	fn bounds_for_zoom(&self, level: u8) -> Result<Option<TileBounds>> {
		(**self).bounds_for_zoom(level)
	}

	fn materialize(&self, coord: &TileCoord) -> Result<Self::Artifact> {
		(**self).materialize(coord)
	}
}
