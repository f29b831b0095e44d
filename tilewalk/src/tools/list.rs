use super::PyramidArgs;
use anyhow::Result;
use clap::Args;
use std::io::{self, BufWriter, Write};
use tilewalk_core::{ConcurrencyLimits, PyramidWalker, TileSource, for_each_tile_parallel};

const BATCH_SIZE: usize = 4096;

#[derive(Args, Debug)]
#[command(arg_required_else_help = true, disable_version_flag = true)]
pub struct Subcommand {
	#[command(flatten)]
	pyramid: PyramidArgs,

	/// also print the geographic extent of every tile
	#[arg(long)]
	extent: bool,

	/// number of threads computing extents, defaults to the number of CPUs
	#[arg(long, short, value_name = "int")]
	threads: Option<usize>,
}

pub fn run(arguments: &Subcommand) -> Result<()> {
	let mut out = BufWriter::new(io::stdout().lock());
	list(arguments, &mut out)?;
	out.flush()?;
	Ok(())
}

fn list(arguments: &Subcommand, out: &mut impl Write) -> Result<()> {
	let source = arguments.pyramid.source()?;
	let range = arguments.pyramid.zoom_range()?;
	log::info!("listing {} tiles of levels {range:?}", source.count_tiles(&range)?);

	let walker = PyramidWalker::with_zoom_range(&source, range)?;

	if arguments.extent {
		let threads = arguments
			.threads
			.unwrap_or_else(|| ConcurrencyLimits::default().cpu_bound);
		for_each_tile_parallel(walker, threads, BATCH_SIZE, |_, extent| {
			writeln!(out, "{extent}")?;
			Ok(())
		})?;
	} else {
		let mut level = None;
		for coord in walker.into_coords() {
			let coord = coord?;
			if level != Some(coord.level) {
				log::info!("level {}", coord.level);
				level = Some(coord.level);
			}
			writeln!(out, "{coord}")?;
		}
	}

	Ok(())
}
