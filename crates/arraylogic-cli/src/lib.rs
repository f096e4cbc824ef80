//! Host adapter for the arraylogic engine: opcode dispatch and bank files.
pub mod bank_io;
pub mod eval;
