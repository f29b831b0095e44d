//! Thread counts for materializing tiles in parallel
//!
//! Tile sources in this crate compute their tiles, so the default is one worker
//! thread per logical CPU.
//!
//! ```
//! use tilewalk_core::ConcurrencyLimits;
//!
//! let limits = ConcurrencyLimits::default();
//! assert_eq!(limits.cpu_bound, ConcurrencyLimits::cpu_count());
//! ```

/// Thread count for CPU-bound tile sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConcurrencyLimits {
	/// Threads for sources that mostly compute.
	pub cpu_bound: usize,
}

impl ConcurrencyLimits {
	/// Create limits with a custom value, at least 1.
	pub fn new(cpu_bound: usize) -> Self {
		Self {
			cpu_bound: cpu_bound.max(1),
		}
	}

	/// Get the number of logical CPUs available
	pub fn cpu_count() -> usize {
		num_cpus::get()
	}
}

impl Default for ConcurrencyLimits {
	fn default() -> Self {
		Self::new(Self::cpu_count())
	}
}
