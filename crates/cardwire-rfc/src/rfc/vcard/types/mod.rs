//! Concrete vCard property types.
//!
//! - [`Gender`] - GENDER (4.0), sex code plus optional identity
//! - [`TextProperty`] - FN, NOTE, TITLE and ROLE
//! - [`Categories`] - CATEGORIES, a list of text values
//! - [`Agent`] - AGENT (2.1 and 3.0), a URL or an embedded vCard
//! - [`RawProperty`] - any other name, kept as raw text
//!
//! [`PropertyRegistry`] maps type names to these.

mod agent;
mod categories;
mod gender;
mod raw;
mod registry;
mod text;

pub use agent::{AGENT, Agent, AgentValue};
pub use categories::{CATEGORIES, Categories};
pub use gender::{GENDER, Gender, Sex};
pub use raw::RawProperty;
pub use registry::{PropertyConstructor, PropertyRegistry};
pub use text::{TEXT_TYPES, TextProperty};
