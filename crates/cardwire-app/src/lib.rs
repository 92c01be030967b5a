//! The `cardwire` command-line tool: converts single vCard properties
//! between wire formats and validates them.

pub mod cli;
pub mod commands;
