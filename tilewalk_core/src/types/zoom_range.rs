use super::MAX_ZOOM_LEVEL;
use anyhow::{Result, ensure};
use std::fmt;

/// Inclusive range of zoom levels, `min..=max`.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ZoomRange {
	pub min: u8,
	pub max: u8,
}

impl ZoomRange {
	/// # Errors
	///
	/// - If `max` > 31.
	/// - If `min` > `max`.
	pub fn new(min: u8, max: u8) -> Result<ZoomRange> {
		ensure!(max <= MAX_ZOOM_LEVEL, "max zoom ({max}) must be <= {MAX_ZOOM_LEVEL}");
		ensure!(min <= max, "min zoom ({min}) must be <= max zoom ({max})");
		Ok(ZoomRange { min, max })
	}

	/// All levels from 0 up to and including `max`.
	pub fn up_to(max: u8) -> Result<ZoomRange> {
		ZoomRange::new(0, max)
	}

	pub fn contains(&self, level: u8) -> bool {
		level >= self.min && level <= self.max
	}

	/// Levels from `max` down to `min`, the order in which a pyramid is walked.
	pub fn iter_descending(&self) -> impl Iterator<Item = u8> + use<> {
		(self.min..=self.max).rev()
	}
}

impl fmt::Debug for ZoomRange {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "ZoomRange({}..={})", self.min, self.max)
	}
}
