//! Core domain models for the installer
//!
//! This module defines the fundamental data structures that represent
//! the install profile, the pipeline, and its steps.

pub mod context;
pub mod pipeline;
pub mod platform;
pub mod profile;
pub mod state;
pub mod step;
pub mod template;

pub use context::*;
pub use pipeline::*;
pub use state::*;
pub use step::*;
