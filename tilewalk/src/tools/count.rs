use super::PyramidArgs;
use anyhow::Result;
use clap::Args;
use std::io::{self, Write};
use tilewalk_core::TileSource;

#[derive(Args, Debug)]
#[command(arg_required_else_help = true, disable_version_flag = true)]
pub struct Subcommand {
	#[command(flatten)]
	pyramid: PyramidArgs,
}

pub fn run(arguments: &Subcommand) -> Result<()> {
	count(arguments, &mut io::stdout().lock())
}

fn count(arguments: &Subcommand, out: &mut impl Write) -> Result<()> {
	let source = arguments.pyramid.source()?;
	let range = arguments.pyramid.zoom_range()?;

	for level in range.iter_descending() {
		let tiles = source.bounds_for_zoom(level)?.map_or(0, |bounds| bounds.count_tiles());
		writeln!(out, "level {level}: {tiles} tiles")?;
	}
	writeln!(out, "total: {}", source.count_tiles(&range)?)?;

	Ok(())
}
