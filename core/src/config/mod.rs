//! Configuration types

pub mod types;

pub use types::{ModelParams, Protocol, ResolvedLlmConfig};
