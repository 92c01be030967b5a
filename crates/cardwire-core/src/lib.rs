//! Shared configuration, errors and constants for the `cardwire` crates.

pub mod config;
pub mod constants;
pub mod error;
