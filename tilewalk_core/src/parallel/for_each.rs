use crate::{PyramidWalker, TileCoord, TileSource};
use anyhow::{Result, ensure};
use rayon::{ThreadPoolBuilder, prelude::*};

/// Materializes all remaining tiles of `walker` on a pool of `threads` worker threads.
///
/// Coordinates are pulled from the walker in batches of `batch_size`. Each batch is
/// materialized in parallel, then `callback` receives the tiles one by one in traversal
/// order on the calling thread.
///
/// Returns the number of tiles passed to `callback`. The first error from the walker,
/// the source or the callback stops the run and is returned.
///
/// # Examples
///
/// ```
/// use tilewalk_core::{PyramidWalker, TileBoundsPyramid, for_each_tile_parallel};
///
/// let pyramid = TileBoundsPyramid::new_full(3).unwrap();
/// let walker = PyramidWalker::new(&pyramid).unwrap();
/// let mut levels = Vec::new();
/// let count = for_each_tile_parallel(walker, 4, 16, |coord, _| {
/// 	levels.push(coord.level);
/// 	Ok(())
/// })
/// .unwrap();
/// assert_eq!(count, 85);
/// assert!(levels.windows(2).all(|w| w[0] >= w[1]));
/// ```
pub fn for_each_tile_parallel<S, F>(
	walker: PyramidWalker<'_, S>,
	threads: usize,
	batch_size: usize,
	mut callback: F,
) -> Result<u64>
where
	S: TileSource + Sync,
	S::Artifact: Send,
	F: FnMut(TileCoord, S::Artifact) -> Result<()>,
{
	ensure!(threads > 0, "threads must be greater than 0");
	ensure!(batch_size > 0, "batch_size must be greater than 0");

	let pool = ThreadPoolBuilder::new()
		.num_threads(threads)
		.thread_name(|index| format!("tilewalk-{index}"))
		.build()?;

	let source = walker.source();
	let mut coords = walker.into_coords();
	let mut count = 0;

	loop {
		let batch = coords.by_ref().take(batch_size).collect::<Result<Vec<TileCoord>>>()?;
		let Some(first) = batch.first() else {
			break;
		};
		log::debug!("materializing {} tiles starting at {first:?}", batch.len());

		let artifacts = pool.install(|| {
			batch
				.par_iter()
				.map(|coord| source.materialize(coord))
				.collect::<Result<Vec<_>>>()
		})?;

		for (coord, artifact) in batch.into_iter().zip(artifacts) {
			callback(coord, artifact)?;
			count += 1;
		}
	}

	log::debug!("materialized {count} tiles");
	Ok(count)
}
