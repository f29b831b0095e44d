//! The `PyramidWalker` visits every tile of a [`TileSource`], one position at a time.
//!
//! Levels are walked from the highest zoom level down to the lowest. Within a level the
//! walk is row-major: increasing `x` within a row, rows in increasing `y`.
//!
//! ```
//! use tilewalk_core::{PyramidWalker, TileBounds, TileBoundsPyramid};
//!
//! let pyramid = TileBoundsPyramid::from_levels(&[
//! 	(1, TileBounds::new(0, 0, 1, 0).unwrap()),
//! 	(0, TileBounds::new_single(0, 0)),
//! ])
//! .unwrap();
//!
//! let mut walker = PyramidWalker::new(&pyramid).unwrap();
//! let mut visited = Vec::new();
//! while !walker.exhausted() {
//! 	visited.push(walker.current().unwrap().to_string());
//! 	walker.advance().unwrap();
//! }
//! assert_eq!(visited, ["1/0/0", "1/1/0", "0/0/0"]);
//! ```

use crate::{TileBounds, TileCoord, TileSource, ZoomRange};
use anyhow::{Result, bail, ensure};
use std::fmt;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum Position {
	At { coord: TileCoord, bounds: TileBounds },
	Exhausted,
}

/// A single-pass cursor over all tiles of a [`TileSource`].
///
/// The walker borrows its source and only holds the current coordinate and the bounds
/// of the current level. It never logs, retries or buffers; source errors are returned
/// unchanged from the call that triggered them.
pub struct PyramidWalker<'a, S: TileSource> {
	source: &'a S,
	range: ZoomRange,
	position: Position,
}

impl<'a, S: TileSource> PyramidWalker<'a, S> {
	/// Creates a walker over all levels of `source`, positioned at the first tile of the
	/// highest level, or exhausted if the source has no tiles.
	pub fn new(source: &'a S) -> Result<Self> {
		Self::with_zoom_range(source, source.zoom_range())
	}

	/// Creates a walker over the levels `range.max` down to `range.min`.
	///
	/// # Errors
	///
	/// - If `range.max` exceeds the source's maximum zoom level.
	/// - If the source fails to report bounds.
	pub fn with_zoom_range(source: &'a S, range: ZoomRange) -> Result<Self> {
		let max_zoom = source.max_zoom_level();
		ensure!(
			range.max <= max_zoom,
			"zoom range {range:?} exceeds the maximum zoom level ({max_zoom}) of the source"
		);
		let position = first_position(source, range.min, range.max)?;
		Ok(PyramidWalker {
			source,
			range,
			position,
		})
	}

	/// `true` once the last tile of the lowest level has been passed.
	pub fn exhausted(&self) -> bool {
		self.position == Position::Exhausted
	}

	/// The current coordinate, or `None` if exhausted.
	pub fn coord(&self) -> Option<TileCoord> {
		match self.position {
			Position::At { coord, .. } => Some(coord),
			Position::Exhausted => None,
		}
	}

	/// The bounds of the current level, or `None` if exhausted.
	pub fn bounds(&self) -> Option<TileBounds> {
		match self.position {
			Position::At { bounds, .. } => Some(bounds),
			Position::Exhausted => None,
		}
	}

	pub fn zoom_range(&self) -> ZoomRange {
		self.range
	}

	pub fn source(&self) -> &'a S {
		self.source
	}

	/// Moves to the next tile.
	///
	/// When a level is finished, the bounds of the next lower level with tiles are
	/// fetched from the source. If that fetch fails the walker keeps its position.
	///
	/// # Errors
	///
	/// - If the walker is already exhausted.
	/// - If the source fails to report bounds for the next level.
	pub fn advance(&mut self) -> Result<()> {
		let Position::At { coord, bounds } = self.position else {
			bail!("cannot advance an exhausted pyramid walker");
		};

		self.position = if coord.x < bounds.x_max {
			Position::At {
				coord: TileCoord { x: coord.x + 1, ..coord },
				bounds,
			}
		} else if coord.y < bounds.y_max {
			Position::At {
				coord: TileCoord {
					x: bounds.x_min,
					y: coord.y + 1,
					..coord
				},
				bounds,
			}
		} else if coord.level > self.range.min {
			first_position(self.source, self.range.min, coord.level - 1)?
		} else {
			Position::Exhausted
		};

		Ok(())
	}

	/// Materializes the tile at the current position.
	///
	/// Every call asks the source again; nothing is cached.
	///
	/// # Errors
	///
	/// - If the walker is exhausted.
	/// - If the source fails to materialize the tile.
	pub fn current(&self) -> Result<S::Artifact> {
		let Position::At { coord, .. } = self.position else {
			bail!("cannot materialize a tile from an exhausted pyramid walker");
		};
		self.source.materialize(&coord)
	}
}

/// Finds the first tile of the highest level in `min..=max` that has tiles.
fn first_position<S: TileSource>(source: &S, min: u8, max: u8) -> Result<Position> {
	for level in (min..=max).rev() {
		if let Some(bounds) = source.bounds_for_zoom(level)? {
			return Ok(Position::At {
				coord: bounds.first(level),
				bounds,
			});
		}
	}
	Ok(Position::Exhausted)
}

/// Walkers are equal if both are exhausted or both point at the same coordinate.
///
/// Both walkers must walk the same source; comparing walkers of different sources
/// gives a meaningless result. Addresses are not compared, since walkers over `&S`
/// wrappers or zero-sized sources may reach the same source through different ones.
impl<S: TileSource> PartialEq for PyramidWalker<'_, S> {
	fn eq(&self, other: &Self) -> bool {
		match (self.position, other.position) {
			(Position::Exhausted, Position::Exhausted) => true,
			(Position::At { coord: a, .. }, Position::At { coord: b, .. }) => a == b,
			_ => false,
		}
	}
}

impl<S: TileSource> Clone for PyramidWalker<'_, S> {
	fn clone(&self) -> Self {
		PyramidWalker {
			source: self.source,
			range: self.range,
			position: self.position,
		}
	}
}

impl<S: TileSource> fmt::Debug for PyramidWalker<'_, S> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self.position {
			Position::At { coord, bounds } => write!(f, "PyramidWalker({coord:?}, {bounds:?})"),
			Position::Exhausted => write!(f, "PyramidWalker(exhausted)"),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::TileBoundsPyramid;
	use anyhow::anyhow;
	use pretty_assertions::assert_eq;
	use std::{cell::Cell, collections::HashSet};

	fn tc(z: u8, x: u32, y: u32) -> TileCoord {
		TileCoord::new(z, x, y).unwrap()
	}

	fn bounds(x_min: u32, y_min: u32, x_max: u32, y_max: u32) -> TileBounds {
		TileBounds::new(x_min, y_min, x_max, y_max).unwrap()
	}

	fn walk<S: TileSource>(walker: &mut PyramidWalker<'_, S>) -> Vec<TileCoord> {
		let mut result = Vec::new();
		while let Some(coord) = walker.coord() {
			result.push(coord);
			walker.advance().unwrap();
		}
		result
	}

	/// Source that counts calls and can be told to fail at one level.
	struct TestSource {
		pyramid: TileBoundsPyramid,
		failing_level: Cell<Option<u8>>,
		bounds_calls: Cell<usize>,
		materialize_calls: Cell<usize>,
	}

	impl TestSource {
		fn new(pyramid: TileBoundsPyramid) -> Self {
			TestSource {
				pyramid,
				failing_level: Cell::new(None),
				bounds_calls: Cell::new(0),
				materialize_calls: Cell::new(0),
			}
		}
	}

	impl TileSource for TestSource {
		type Artifact = String;

		fn max_zoom_level(&self) -> u8 {
			self.pyramid.max_zoom_level()
		}

		fn bounds_for_zoom(&self, level: u8) -> Result<Option<TileBounds>> {
			self.bounds_calls.set(self.bounds_calls.get() + 1);
			if self.failing_level.get() == Some(level) {
				return Err(anyhow!("no data for level {level}"));
			}
			self.pyramid.bounds_for_zoom(level)
		}

		fn materialize(&self, coord: &TileCoord) -> Result<String> {
			self.materialize_calls.set(self.materialize_calls.get() + 1);
			Ok(format!("tile {coord}"))
		}
	}

	fn two_level_pyramid() -> TileBoundsPyramid {
		TileBoundsPyramid::from_levels(&[(1, bounds(0, 0, 1, 0)), (0, bounds(0, 0, 0, 0))]).unwrap()
	}

	#[test]
	fn example_traversal() -> Result<()> {
		let source = TestSource::new(two_level_pyramid());
		let mut walker = PyramidWalker::new(&source)?;

		let mut tiles = Vec::new();
		while !walker.exhausted() {
			tiles.push(walker.current()?);
			walker.advance()?;
		}
		assert_eq!(tiles, ["tile 1/0/0", "tile 1/1/0", "tile 0/0/0"]);
		assert!(walker.exhausted());
		assert_eq!(source.materialize_calls.get(), 3);
		Ok(())
	}

	#[test]
	fn starts_at_first_tile_of_max_level() -> Result<()> {
		let pyramid = TileBoundsPyramid::from_levels(&[(3, bounds(2, 5, 4, 6)), (0, bounds(0, 0, 0, 0))])?;
		let walker = PyramidWalker::new(&pyramid)?;
		assert_eq!(walker.coord(), Some(tc(3, 2, 5)));
		assert_eq!(walker.bounds(), Some(bounds(2, 5, 4, 6)));
		assert!(!walker.exhausted());
		Ok(())
	}

	#[test]
	fn row_major_order_and_level_rollover() -> Result<()> {
		let pyramid = TileBoundsPyramid::from_levels(&[
			(2, bounds(1, 2, 2, 3)),
			(1, bounds(0, 1, 1, 1)),
			(0, bounds(0, 0, 0, 0)),
		])?;
		let mut walker = PyramidWalker::new(&pyramid)?;
		assert_eq!(
			walk(&mut walker),
			vec![
				tc(2, 1, 2),
				tc(2, 2, 2),
				tc(2, 1, 3),
				tc(2, 2, 3),
				tc(1, 0, 1),
				tc(1, 1, 1),
				tc(0, 0, 0),
			]
		);
		Ok(())
	}

	#[test]
	fn covers_every_tile_exactly_once() -> Result<()> {
		let pyramid = TileBoundsPyramid::new_full(5)?;
		let mut walker = PyramidWalker::new(&pyramid)?;
		let visited = walk(&mut walker);

		let expected: Vec<TileCoord> = pyramid
			.iter_levels()
			.collect::<Vec<_>>()
			.into_iter()
			.rev()
			.flat_map(|(level, b)| b.iter_coords(level))
			.collect();
		assert_eq!(visited, expected);

		let unique: HashSet<TileCoord> = visited.iter().copied().collect();
		assert_eq!(unique.len() as u64, pyramid.count_tiles(&pyramid.zoom_range())?);
		Ok(())
	}

	#[test]
	fn levels_strictly_decrease() -> Result<()> {
		let pyramid = TileBoundsPyramid::new_full(4)?;
		let mut walker = PyramidWalker::new(&pyramid)?;
		let visited = walk(&mut walker);
		for pair in visited.windows(2) {
			assert!(pair[1].level <= pair[0].level);
			if pair[1].level == pair[0].level {
				assert!((pair[1].y, pair[1].x) > (pair[0].y, pair[0].x));
			}
		}
		Ok(())
	}

	#[test]
	fn only_level_zero() -> Result<()> {
		let pyramid = TileBoundsPyramid::new_full(0)?;
		let mut walker = PyramidWalker::new(&pyramid)?;
		assert_eq!(walker.coord(), Some(tc(0, 0, 0)));
		walker.advance()?;
		assert!(walker.exhausted());
		Ok(())
	}

	#[test]
	fn empty_pyramid_is_exhausted_immediately() -> Result<()> {
		let pyramid = TileBoundsPyramid::new_empty(6)?;
		let walker = PyramidWalker::new(&pyramid)?;
		assert!(walker.exhausted());
		assert_eq!(walker.coord(), None);
		assert_eq!(walker.bounds(), None);
		Ok(())
	}

	#[test]
	fn empty_levels_are_skipped() -> Result<()> {
		let pyramid = TileBoundsPyramid::from_levels(&[(4, bounds(3, 3, 3, 3)), (1, bounds(1, 0, 1, 0))])?;
		let mut walker = PyramidWalker::new(&pyramid)?;
		assert_eq!(walk(&mut walker), vec![tc(4, 3, 3), tc(1, 1, 0)]);
		Ok(())
	}

	#[test]
	fn empty_top_level_is_skipped_at_construction() -> Result<()> {
		let mut pyramid = TileBoundsPyramid::new_full(2)?;
		pyramid.clear_level(2)?;
		let walker = PyramidWalker::new(&pyramid)?;
		assert_eq!(walker.coord(), Some(tc(1, 0, 0)));
		Ok(())
	}

	#[test]
	fn zoom_range_restricts_levels() -> Result<()> {
		let pyramid = TileBoundsPyramid::new_full(4)?;
		let mut walker = PyramidWalker::with_zoom_range(&pyramid, ZoomRange::new(1, 2)?)?;
		let visited = walk(&mut walker);
		assert_eq!(visited.len(), 16 + 4);
		assert_eq!(visited.first(), Some(&tc(2, 0, 0)));
		assert_eq!(visited.last(), Some(&tc(1, 1, 1)));
		Ok(())
	}

	#[test]
	fn zoom_range_beyond_source() -> Result<()> {
		let pyramid = TileBoundsPyramid::new_full(2)?;
		let err = PyramidWalker::with_zoom_range(&pyramid, ZoomRange::new(0, 3)?).unwrap_err();
		assert_eq!(
			err.to_string(),
			"zoom range ZoomRange(0..=3) exceeds the maximum zoom level (2) of the source"
		);
		Ok(())
	}

	#[test]
	fn misuse_after_exhaustion() -> Result<()> {
		let pyramid = TileBoundsPyramid::new_full(0)?;
		let mut walker = PyramidWalker::new(&pyramid)?;
		walker.advance()?;
		assert!(walker.exhausted());

		assert_eq!(
			walker.advance().unwrap_err().to_string(),
			"cannot advance an exhausted pyramid walker"
		);
		assert_eq!(
			walker.current().unwrap_err().to_string(),
			"cannot materialize a tile from an exhausted pyramid walker"
		);
		assert!(walker.exhausted());
		assert_eq!(walker.coord(), None);
		Ok(())
	}

	#[test]
	fn construction_error_is_propagated() {
		let source = TestSource::new(two_level_pyramid());
		source.failing_level.set(Some(1));
		let err = PyramidWalker::new(&source).unwrap_err();
		assert_eq!(err.to_string(), "no data for level 1");
	}

	#[test]
	fn rollover_error_keeps_position() -> Result<()> {
		let source = TestSource::new(two_level_pyramid());
		let mut walker = PyramidWalker::new(&source)?;
		walker.advance()?;
		assert_eq!(walker.coord(), Some(tc(1, 1, 0)));

		source.failing_level.set(Some(0));
		assert_eq!(walker.advance().unwrap_err().to_string(), "no data for level 0");
		assert_eq!(walker.coord(), Some(tc(1, 1, 0)));

		source.failing_level.set(None);
		walker.advance()?;
		assert_eq!(walker.coord(), Some(tc(0, 0, 0)));
		Ok(())
	}

	#[test]
	fn bounds_are_fetched_once_per_level() -> Result<()> {
		let source = TestSource::new(TileBoundsPyramid::new_full(3)?);
		let mut walker = PyramidWalker::new(&source)?;
		walk(&mut walker);
		assert_eq!(source.bounds_calls.get(), 4);
		assert_eq!(source.materialize_calls.get(), 0);
		Ok(())
	}

	#[test]
	fn current_is_not_memoized() -> Result<()> {
		let source = TestSource::new(two_level_pyramid());
		let walker = PyramidWalker::new(&source)?;
		assert_eq!(walker.current()?, "tile 1/0/0");
		assert_eq!(walker.current()?, "tile 1/0/0");
		assert_eq!(source.materialize_calls.get(), 2);
		Ok(())
	}

	#[test]
	fn equality_in_lockstep() -> Result<()> {
		let pyramid = TileBoundsPyramid::new_full(3)?;
		let mut a = PyramidWalker::new(&pyramid)?;
		let mut b = PyramidWalker::new(&pyramid)?;
		while !a.exhausted() {
			assert_eq!(a, b);
			a.advance()?;
			assert_ne!(a, b);
			b.advance()?;
		}
		assert!(b.exhausted());
		assert_eq!(a, b);
		Ok(())
	}

	#[test]
	fn equality_through_separate_references() -> Result<()> {
		let pyramid = TileBoundsPyramid::new_full(1)?;
		let (first, second) = (&pyramid, &pyramid);
		let mut a = PyramidWalker::new(&first)?;
		let b = PyramidWalker::new(&second)?;
		assert_eq!(a, b);
		a.advance()?;
		assert_ne!(a, b);
		Ok(())
	}

	#[test]
	fn clone_walks_independently() -> Result<()> {
		let pyramid = TileBoundsPyramid::new_full(1)?;
		let mut a = PyramidWalker::new(&pyramid)?;
		let b = a.clone();
		a.advance()?;
		assert_eq!(b.coord(), Some(tc(1, 0, 0)));
		assert_eq!(a.coord(), Some(tc(1, 1, 0)));
		Ok(())
	}

	#[test]
	fn debug_format() -> Result<()> {
		let pyramid = TileBoundsPyramid::new_full(0)?;
		let mut walker = PyramidWalker::new(&pyramid)?;
		assert_eq!(format!("{walker:?}"), "PyramidWalker(TileCoord(0, [0, 0]), TileBounds[0,0,0,0])");
		walker.advance()?;
		assert_eq!(format!("{walker:?}"), "PyramidWalker(exhausted)");
		Ok(())
	}
}
