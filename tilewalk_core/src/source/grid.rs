//! Tile sources backed by a global tile grid and a geographic extent.
//!
//! [`GridSource`] computes the tile bounds of a [`GeoBBox`] at every zoom level of a
//! [`Grid`]. Materializing a tile yields its geographic footprint as a [`TileExtent`].
//!
//! # Examples
//!
//! ```
//! use tilewalk_core::{GeoBBox, Grid, GridSource, TileSource};
//!
//! let bbox = GeoBBox::new(-180.0, -90.0, 180.0, 90.0).unwrap();
//! let source = GridSource::new(Grid::Geodetic, bbox, 3).unwrap();
//!
//! // the geodetic grid starts with two root tiles
//! let bounds = source.bounds_for_zoom(0).unwrap().unwrap();
//! assert_eq!(bounds.count_tiles(), 2);
//! ```

use super::TileSource;
use crate::{GeoBBox, TileBounds, TileCoord};
use anyhow::{Result, ensure};
#[cfg(feature = "cli")]
use clap::ValueEnum;
use enumset::EnumSetType;
use std::{f64::consts::PI, fmt};

/// Offset that compensates floating point rounding at tile edges.
const EPSILON: f64 = 1e-6;

/// A global tile grid.
#[cfg_attr(feature = "cli", derive(ValueEnum))]
#[derive(Debug, EnumSetType)]
pub enum Grid {
	/// Web Mercator (XYZ): one root tile, rows counted from the north.
	Mercator,
	/// Global geodetic (TMS): two root tiles, rows counted from the south.
	Geodetic,
}

impl Grid {
	/// Highest zoom level whose column count still fits into `u32`.
	pub fn max_zoom_level(self) -> u8 {
		match self {
			Grid::Mercator => 31,
			Grid::Geodetic => 30,
		}
	}

	/// Number of columns and rows at `level`.
	pub fn size(self, level: u8) -> (u64, u64) {
		let rows = 1u64 << level;
		match self {
			Grid::Mercator => (rows, rows),
			Grid::Geodetic => (rows * 2, rows),
		}
	}

	/// Fractional grid position of a point at `level`, before rounding.
	fn position(self, lon: f64, lat: f64, level: u8) -> (f64, f64) {
		let zoom = 2.0f64.powi(i32::from(level));
		match self {
			Grid::Mercator => (
				zoom * (lon / 360.0 + 0.5),
				zoom * (0.5 - 0.5 * (lat * PI / 360.0 + PI / 4.0).tan().ln() / PI),
			),
			Grid::Geodetic => {
				let tile_degrees = 180.0 / zoom;
				((lon + 180.0) / tile_degrees, (lat + 90.0) / tile_degrees)
			}
		}
	}

	/// Computes the tile bounds covering `bbox` at `level`.
	pub fn bounds(self, bbox: &GeoBBox, level: u8) -> Result<TileBounds> {
		ensure!(
			level <= self.max_zoom_level(),
			"level ({level}) must be <= {} for the {self:?} grid",
			self.max_zoom_level()
		);
		let (cols, rows) = self.size(level);

		// corners that map to the lowest and the highest grid indices
		let (low, high) = match self {
			Grid::Mercator => ((bbox.x_min, bbox.y_max), (bbox.x_max, bbox.y_min)),
			Grid::Geodetic => ((bbox.x_min, bbox.y_min), (bbox.x_max, bbox.y_max)),
		};

		let clamp = |v: f64, size: u64| v.floor().clamp(0.0, (size - 1) as f64) as u32;

		let (x0, y0) = self.position(low.0, low.1, level);
		let (x1, y1) = self.position(high.0, high.1, level);
		let x_min = clamp(x0 + EPSILON, cols);
		let y_min = clamp(y0 + EPSILON, rows);
		let x_max = clamp(x1 - EPSILON, cols).max(x_min);
		let y_max = clamp(y1 - EPSILON, rows).max(y_min);

		TileBounds::new(x_min, y_min, x_max, y_max)
	}

	/// Geographic footprint of a tile.
	pub fn extent(self, coord: &TileCoord) -> Result<GeoBBox> {
		let zoom = 2.0f64.powi(i32::from(coord.level));
		let x = f64::from(coord.x);
		let y = f64::from(coord.y);
		match self {
			Grid::Mercator => {
				let lat = |y: f64| ((PI * (1.0 - 2.0 * y / zoom)).exp().atan() / PI - 0.25) * 360.0;
				GeoBBox::new(
					x / zoom * 360.0 - 180.0,
					lat(y + 1.0),
					(x + 1.0) / zoom * 360.0 - 180.0,
					lat(y),
				)
			}
			Grid::Geodetic => {
				let tile_degrees = 180.0 / zoom;
				GeoBBox::new(
					x * tile_degrees - 180.0,
					y * tile_degrees - 90.0,
					(x + 1.0) * tile_degrees - 180.0,
					(y + 1.0) * tile_degrees - 90.0,
				)
			}
		}
	}
}

/// The materialized footprint of one tile.
#[derive(Clone, Copy, PartialEq)]
pub struct TileExtent {
	pub coord: TileCoord,
	pub bbox: GeoBBox,
}

impl fmt::Debug for TileExtent {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "TileExtent({:?}, {:?})", self.coord, self.bbox)
	}
}

/// Formats as `z/x/y west,south,east,north`.
impl fmt::Display for TileExtent {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{} {}", self.coord, self.bbox.as_string_list())
	}
}

/// A [`TileSource`] covering a geographic extent on a global grid.
#[derive(Clone, Debug, PartialEq)]
pub struct GridSource {
	grid: Grid,
	bbox: GeoBBox,
	max_zoom: u8,
}

impl GridSource {
	/// Creates a source for `bbox` with levels `0..=max_zoom`.
	///
	/// Web Mercator extents are clamped to the projection's latitude limits.
	pub fn new(grid: Grid, bbox: GeoBBox, max_zoom: u8) -> Result<GridSource> {
		ensure!(
			max_zoom <= grid.max_zoom_level(),
			"max zoom ({max_zoom}) must be <= {} for the {grid:?} grid",
			grid.max_zoom_level()
		);
		let bbox = match grid {
			Grid::Mercator => bbox.limited_to_mercator(),
			Grid::Geodetic => bbox,
		};
		log::debug!("grid source {grid:?} {bbox:?} up to level {max_zoom}");
		Ok(GridSource { grid, bbox, max_zoom })
	}

	pub fn grid(&self) -> Grid {
		self.grid
	}

	pub fn bbox(&self) -> &GeoBBox {
		&self.bbox
	}

	fn check_level(&self, level: u8) -> Result<()> {
		ensure!(
			self.zoom_range().contains(level),
			"level ({level}) must be <= max zoom ({})",
			self.max_zoom
		);
		Ok(())
	}
}

impl TileSource for GridSource {
	type Artifact = TileExtent;

	fn max_zoom_level(&self) -> u8 {
		self.max_zoom
	}

	fn bounds_for_zoom(&self, level: u8) -> Result<Option<TileBounds>> {
		self.check_level(level)?;
		Ok(Some(self.grid.bounds(&self.bbox, level)?))
	}

	fn materialize(&self, coord: &TileCoord) -> Result<TileExtent> {
		self.check_level(coord.level)?;
		let (cols, rows) = self.grid.size(coord.level);
		ensure!(
			u64::from(coord.x) < cols && u64::from(coord.y) < rows,
			"{coord:?} is outside of the {:?} grid",
			self.grid
		);
		log::trace!("materialize {coord:?}");
		Ok(TileExtent {
			coord: *coord,
			bbox: self.grid.extent(coord)?,
		})
	}
}
