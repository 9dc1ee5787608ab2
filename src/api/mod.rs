//! Response types shared across route handlers

pub mod response;

pub use response::{Created, Success};
