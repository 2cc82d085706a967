//! Deferred view component resolution.
//!
//! # Responsibility
//! - Model lazy component loading as an explicit ticket so completion can
//!   arrive later without blocking other window transitions.
//! - Define the resolver seam implemented by the rendering layer.
//!
//! # Invariants
//! - A ticket only commits if its window is still live and the ticket is the
//!   newest one issued for that window.
//! - Resolution failure keeps the window; it moves to `failed`.

use crate::model::window::{ResolvedComponent, WindowId};
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Token for one outstanding component load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ResolveTicket {
    pub window_id: WindowId,
    pub(crate) generation: u64,
}

/// What happened to a completed load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolveOutcome {
    Resolved,
    Failed,
    /// Window gone or ticket superseded; nothing was mutated.
    Discarded,
}

/// View loading failure reported by a resolver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentResolutionError {
    pub reference: String,
    pub message: String,
}

impl ComponentResolutionError {
    pub fn new(reference: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            reference: reference.into(),
            message: message.into(),
        }
    }
}

impl Display for ComponentResolutionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "component `{}` could not be resolved: {}",
            self.reference, self.message
        )
    }
}

impl Error for ComponentResolutionError {}

/// Rendering-layer seam that turns a descriptor reference into a view handle.
pub trait ComponentResolver {
    fn resolve(&self, reference: &str) -> Result<ResolvedComponent, ComponentResolutionError>;
}

/// Resolver backed by a static reference-to-handle table.
#[derive(Debug, Default, Clone)]
pub struct StaticComponentResolver {
    entries: BTreeMap<String, String>,
}

impl StaticComponentResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, reference: impl Into<String>, handle: impl Into<String>) -> Self {
        self.entries.insert(reference.into(), handle.into());
        self
    }
}

impl ComponentResolver for StaticComponentResolver {
    fn resolve(&self, reference: &str) -> Result<ResolvedComponent, ComponentResolutionError> {
        self.entries
            .get(reference)
            .map(|handle| ResolvedComponent {
                source: reference.to_string(),
                handle: handle.clone(),
            })
            .ok_or_else(|| ComponentResolutionError::new(reference, "no component registered"))
    }
}

#[cfg(test)]
mod tests {
    use super::{ComponentResolver, StaticComponentResolver};

    #[test]
    fn static_resolver_maps_known_references() {
        let resolver = StaticComponentResolver::new()
            .with("./components/NotesWindow.vue", "notes-window");
        let resolved = resolver
            .resolve("./components/NotesWindow.vue")
            .expect("known reference");
        assert_eq!(resolved.handle, "notes-window");
        assert_eq!(resolved.source, "./components/NotesWindow.vue");
    }

    #[test]
    fn static_resolver_reports_unknown_references() {
        let err = StaticComponentResolver::new()
            .resolve("./components/Missing.vue")
            .unwrap_err();
        assert_eq!(err.reference, "./components/Missing.vue");
        assert!(err.to_string().contains("could not be resolved"));
    }
}
