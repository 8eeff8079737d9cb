//! Map and program text I/O (C9). Parsing is total: malformed input never
//! produces an error, it just truncates what gets read.

mod map_reader;
mod program_io;

pub use map_reader::read_map;
pub use program_io::{read_program, write_program};
