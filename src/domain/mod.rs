//! Domain layer - Core business logic
//!
//! This module contains the core domain entities, repository traits,
//! and domain services. Nothing in here performs I/O.

pub mod entities;
pub mod repositories;
pub mod services;
