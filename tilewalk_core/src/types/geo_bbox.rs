use anyhow::{Context, Result, bail, ensure};
use std::{fmt::Debug, str::FromStr};

pub(crate) const MAX_MERCATOR_LAT: f64 = 85.051_128_779_806_59;
const MAX_LNG: f64 = 180.0;

/// A geographical bounding box (`GeoBBox`) represents a rectangular area on a map
/// defined by its minimum and maximum longitude (x) and latitude (y) coordinates
/// in WGS84 degrees.
///
/// - `x_min` (west): Minimum longitude.
/// - `y_min` (south): Minimum latitude.
/// - `x_max` (east): Maximum longitude.
/// - `y_max` (north): Maximum latitude.
///
/// # Examples
///
/// ```
/// use tilewalk_core::GeoBBox;
///
/// let bbox = GeoBBox::new(-10.0, -5.0, 10.0, 5.0).unwrap();
/// assert_eq!(bbox.as_tuple(), (-10.0, -5.0, 10.0, 5.0));
///
/// let parsed: GeoBBox = "13.08,52.33,13.77,52.68".parse().unwrap();
/// assert_eq!(parsed.as_array(), [13.08, 52.33, 13.77, 52.68]);
/// ```
#[derive(Clone, Copy, PartialEq)]
pub struct GeoBBox {
	pub x_min: f64,
	pub y_min: f64,
	pub x_max: f64,
	pub y_max: f64,
}

impl GeoBBox {
	/// Creates a new `GeoBBox` from `west, south, east, north`.
	///
	/// # Errors
	///
	/// Returns an error if a value is outside the WGS84 range or if min > max.
	pub fn new(x_min: f64, y_min: f64, x_max: f64, y_max: f64) -> Result<GeoBBox> {
		GeoBBox {
			x_min,
			y_min,
			x_max,
			y_max,
		}
		.checked()
	}

	/// Returns a copy clamped to the latitude limits of the Web Mercator projection.
	#[must_use]
	pub fn limited_to_mercator(&self) -> GeoBBox {
		GeoBBox {
			x_min: self.x_min.clamp(-MAX_LNG, MAX_LNG),
			y_min: self.y_min.clamp(-MAX_MERCATOR_LAT, MAX_MERCATOR_LAT),
			x_max: self.x_max.clamp(-MAX_LNG, MAX_LNG),
			y_max: self.y_max.clamp(-MAX_MERCATOR_LAT, MAX_MERCATOR_LAT),
		}
	}

	/// `[west, south, east, north]`
	#[must_use]
	pub fn as_array(&self) -> [f64; 4] {
		[self.x_min, self.y_min, self.x_max, self.y_max]
	}

	#[must_use]
	pub fn as_tuple(&self) -> (f64, f64, f64, f64) {
		(self.x_min, self.y_min, self.x_max, self.y_max)
	}

	/// Returns the bounding box as a string in the form `x_min,y_min,x_max,y_max`.
	#[must_use]
	pub fn as_string_list(&self) -> String {
		format!("{},{},{},{}", self.x_min, self.y_min, self.x_max, self.y_max)
	}

	fn checked(self) -> Result<Self> {
		ensure!(self.x_min >= -180., "x_min ({}) must be >= -180", self.x_min);
		ensure!(self.y_min >= -90., "y_min ({}) must be >= -90", self.y_min);
		ensure!(self.x_max <= 180., "x_max ({}) must be <= 180", self.x_max);
		ensure!(self.y_max <= 90., "y_max ({}) must be <= 90", self.y_max);
		ensure!(
			self.x_min <= self.x_max,
			"x_min ({}) must be <= x_max ({})",
			self.x_min,
			self.x_max
		);
		ensure!(
			self.y_min <= self.y_max,
			"y_min ({}) must be <= y_max ({})",
			self.y_min,
			self.y_max
		);
		Ok(self)
	}
}

impl Debug for GeoBBox {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(
			f,
			"GeoBBox({}, {}, {}, {})",
			self.x_min, self.y_min, self.x_max, self.y_max
		)
	}
}

impl TryFrom<Vec<f64>> for GeoBBox {
	type Error = anyhow::Error;

	/// Builds a `GeoBBox` from exactly four values `[west, south, east, north]`.
	fn try_from(input: Vec<f64>) -> Result<Self> {
		ensure!(
			input.len() == 4,
			"GeoBBox must have 4 elements (x_min, y_min, x_max, y_max)"
		);
		GeoBBox::new(input[0], input[1], input[2], input[3])
	}
}

impl TryFrom<[f64; 4]> for GeoBBox {
	type Error = anyhow::Error;

	fn try_from(input: [f64; 4]) -> Result<Self> {
		GeoBBox::new(input[0], input[1], input[2], input[3])
	}
}

/// Parses `"west,south,east,north"`. Values may be separated by commas, spaces or semicolons.
impl FromStr for GeoBBox {
	type Err = anyhow::Error;

	fn from_str(text: &str) -> Result<Self> {
		log::trace!("parsing bbox: {text:?}");
		let values = text
			.split([' ', ',', ';'])
			.filter(|s| !s.is_empty())
			.map(|s| {
				s.parse::<f64>()
					.with_context(|| format!("bbox value {s:?} is not a number"))
			})
			.collect::<Result<Vec<f64>>>()?;

		if values.len() != 4 {
			bail!("bbox must contain exactly 4 numbers, but got: {text:?}");
		}

		GeoBBox::try_from(values)
	}
}
