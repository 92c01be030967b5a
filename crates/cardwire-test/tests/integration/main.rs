//! Integration tests across the `cardwire` crates.

mod cli;
mod formats;
mod helpers;
