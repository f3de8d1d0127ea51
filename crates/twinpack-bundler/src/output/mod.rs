//! Writing bundler output to the distribution directory.

mod emit;
pub mod writer;

pub use emit::{Chunk, EmitReport, Emitter};
pub use writer::write_files_to;
