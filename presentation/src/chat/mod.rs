//! Interactive chat mode

pub mod command;
pub mod repl;
