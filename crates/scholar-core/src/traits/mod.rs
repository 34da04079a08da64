//! Core traits for scholar collaborators.

mod generator;
mod llm;

pub use generator::*;
pub use llm::*;
