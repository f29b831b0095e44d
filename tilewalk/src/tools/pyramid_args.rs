use anyhow::{Context, Result};
use clap::Args;
use tilewalk_core::{GeoBBox, Grid, GridSource, ZoomRange};

/// Arguments that describe the pyramid to walk.
#[derive(Args, Debug)]
pub struct PyramidArgs {
	/// bounding box of the data: "lon_min,lat_min,lon_max,lat_max"
	#[arg(required = true, allow_hyphen_values = true, value_name = "BBOX")]
	bbox: String,

	/// tile grid
	#[arg(long, value_enum, default_value = "mercator")]
	grid: Grid,

	/// highest zoom level, where the walk starts
	#[arg(long, value_name = "int", default_value_t = 14)]
	max_zoom: u8,

	/// lowest zoom level, where the walk ends
	#[arg(long, value_name = "int", default_value_t = 0)]
	min_zoom: u8,
}

impl PyramidArgs {
	pub fn source(&self) -> Result<GridSource> {
		let bbox: GeoBBox = self
			.bbox
			.parse()
			.with_context(|| format!("invalid bounding box {:?}", self.bbox))?;
		GridSource::new(self.grid, bbox, self.max_zoom)
	}

	pub fn zoom_range(&self) -> Result<ZoomRange> {
		ZoomRange::new(self.min_zoom, self.max_zoom)
	}
}
