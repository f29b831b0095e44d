pub mod count;
pub mod list;

mod pyramid_args;
pub use pyramid_args::PyramidArgs;
