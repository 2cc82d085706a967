//! Window creation, lifecycle transitions and lazy component loading.

pub mod component;
pub mod factory;
pub mod lifecycle;
