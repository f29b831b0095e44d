//! Lazy sequences on top of [`PyramidWalker`].
//!
//! Both iterators advance the walker at the start of the *following* call, so a
//! coordinate is only left behind once the caller asks for the next one. After the
//! first error they return `None`.

use super::PyramidWalker;
use crate::{TileCoord, TileSource};
use anyhow::Result;
use std::iter::FusedIterator;

struct Stepper<'a, S: TileSource> {
	walker: PyramidWalker<'a, S>,
	started: bool,
	failed: bool,
}

impl<'a, S: TileSource> Stepper<'a, S> {
	fn new(walker: PyramidWalker<'a, S>) -> Self {
		Stepper {
			walker,
			started: false,
			failed: false,
		}
	}

	/// Moves to the next position and returns its coordinate.
	fn step(&mut self) -> Option<Result<TileCoord>> {
		if self.failed || self.walker.exhausted() {
			return None;
		}
		if self.started {
			if let Err(err) = self.walker.advance() {
				self.failed = true;
				return Some(Err(err));
			}
		} else {
			self.started = true;
		}
		self.walker.coord().map(Ok)
	}
}

/// Iterator over the coordinates of a pyramid, see [`PyramidWalker::into_coords`].
pub struct Coords<'a, S: TileSource> {
	stepper: Stepper<'a, S>,
}

impl<S: TileSource> Iterator for Coords<'_, S> {
	type Item = Result<TileCoord>;

	fn next(&mut self) -> Option<Self::Item> {
		self.stepper.step()
	}
}

impl<S: TileSource> FusedIterator for Coords<'_, S> {}

/// Iterator over materialized tiles of a pyramid, see [`PyramidWalker::into_tiles`].
pub struct Tiles<'a, S: TileSource> {
	stepper: Stepper<'a, S>,
}

impl<S: TileSource> Iterator for Tiles<'_, S> {
	type Item = Result<(TileCoord, S::Artifact)>;

	fn next(&mut self) -> Option<Self::Item> {
		let coord = match self.stepper.step()? {
			Ok(coord) => coord,
			Err(err) => return Some(Err(err)),
		};
		match self.stepper.walker.current() {
			Ok(artifact) => Some(Ok((coord, artifact))),
			Err(err) => {
				self.stepper.failed = true;
				Some(Err(err))
			}
		}
	}
}

impl<S: TileSource> FusedIterator for Tiles<'_, S> {}

impl<'a, S: TileSource> PyramidWalker<'a, S> {
	/// Turns the walker into an iterator over the remaining coordinates, starting with the
	/// current one. Nothing is materialized.
	pub fn into_coords(self) -> Coords<'a, S> {
		Coords {
			stepper: Stepper::new(self),
		}
	}

	/// Turns the walker into an iterator over the remaining tiles, starting with the
	/// current one. Each tile is materialized when it is yielded.
	pub fn into_tiles(self) -> Tiles<'a, S> {
		Tiles {
			stepper: Stepper::new(self),
		}
	}
}
