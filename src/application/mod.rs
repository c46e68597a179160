//! Application layer
//!
//! Use cases and application services that orchestrate domain logic.

pub mod dto;
mod identify_resource;

pub use identify_resource::{IdentifyResourceUseCase, STDIN_PATH};
