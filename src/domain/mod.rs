//! Domain types and DTOs
//!
//! Project description, estimation output, generation payloads and
//! feedback tickets.

pub mod estimate;
pub mod feedback;
pub mod generation;
pub mod project;

// Re-export commonly used types
pub use estimate::*;
pub use generation::*;
pub use project::*;

// Feedback types are accessed via crate::domain::feedback:: to keep the
// estimation namespace small
