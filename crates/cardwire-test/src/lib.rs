//! cardwire - integration test support.
//!
//! Re-exports the workspace crates so integration tests can use one set of
//! `cardwire_test::` paths.

pub mod component {
    pub use cardwire_core::*;
}

pub mod app {
    pub use cardwire_app::*;
}

pub use cardwire_rfc as rfc;
