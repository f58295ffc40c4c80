//! The composition root: wires the connection manager, metadata catalog,
//! SQL translator, query executor, and session/statement managers into a
//! single `Emulator` the HTTP layer drives.

mod emulator;
mod stage;

pub use emulator::Emulator;
pub use stage::{get_file as get_stage_file, put_file as put_stage_file};
