//! Runtime data model for application instances and their windows.
//!
//! # Responsibility
//! - Define records the registry owns and the renderer reads.
//! - Keep descriptor templates (manifest side) separate from live state.
//!
//! # Invariants
//! - Every instance and window is identified by a UUID v4.
//! - Window records live inside their owning instance only.

pub mod geometry;
pub mod instance;
pub mod window;
