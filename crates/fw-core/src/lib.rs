//! femwell/crates/fw-core/src/lib.rs
//!
//! The central domain logic and interface definitions for FemWell.

pub mod accounts;
pub mod error;
pub mod intake;
pub mod models;
pub mod traits;

// Re-exporting for easier access in other crates
pub use error::*;
pub use models::*;
pub use traits::*;
