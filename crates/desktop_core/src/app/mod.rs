//! Application contracts: manifests, loading, registry and command routing.
//!
//! Manifests are declarative data; this module turns them into validated,
//! immutable registrations and callable command tables.

pub mod command;
pub mod loader;
pub mod manifest;
pub mod registry;
