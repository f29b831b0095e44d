//! Parallel materialization: one walker enumerates coordinates, worker threads
//! produce the tiles.

mod concurrency;
pub use concurrency::*;

mod for_each;
pub use for_each::*;
