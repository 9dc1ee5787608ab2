//! Service layer: estimation, image providers, planning and feedback storage.

pub mod build_steps;
pub mod feedback_store;
pub mod images;
pub mod materials;
pub mod permits;
pub mod planner;

pub use feedback_store::FeedbackStore;
pub use planner::ProjectPlanner;
