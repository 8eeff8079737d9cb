//! The world simulator (C2) and move legality (C4).

mod legal;
mod simulate;

pub use legal::legal_moves;
pub use simulate::{runsim, step};
