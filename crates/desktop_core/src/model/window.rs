//! Live window record derived from a window descriptor.
//!
//! # Responsibility
//! - Hold the mutable runtime state the renderer reads (geometry, flags).
//! - Track lazy component loading separately from window visibility.
//!
//! # Invariants
//! - `id` is a fresh UUID v4 and is never reused for another window.
//! - Capability flags are copied from the descriptor and never change.
//! - A `failed` component does not remove the window.

use crate::model::geometry::{Position, Size};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Process-unique window identifier.
pub type WindowId = Uuid;

/// Owning application instance identifier.
pub type InstanceId = Uuid;

fn default_true() -> bool {
    true
}

/// Per-window capability flags. Omitted flags default to `true`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowCapabilities {
    #[serde(default = "default_true")]
    pub minimizable: bool,
    #[serde(default = "default_true")]
    pub maximizable: bool,
    #[serde(default = "default_true")]
    pub destroyable: bool,
    #[serde(default = "default_true")]
    pub draggable: bool,
    #[serde(default = "default_true")]
    pub resizable: bool,
}

impl Default for WindowCapabilities {
    fn default() -> Self {
        Self {
            minimizable: true,
            maximizable: true,
            destroyable: true,
            draggable: true,
            resizable: true,
        }
    }
}

/// Coarse lifecycle phase of one window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WindowLifecycle {
    /// Built by the factory, not yet shown.
    Created,
    /// Shown; may additionally be minimized or maximized.
    Visible,
    /// Close accepted, teardown in progress.
    Closing,
    /// Final. Records in this phase are no longer indexed.
    Destroyed,
}

/// Opaque handle produced by a successful component resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedComponent {
    /// Descriptor reference the handle was resolved from.
    pub source: String,
    /// Renderer-specific handle, e.g. a module path or registry key.
    pub handle: String,
}

/// Lazy view loading state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "state")]
pub enum ComponentState {
    Unresolved,
    Loading,
    Resolved { component: ResolvedComponent },
    Failed { reason: String },
}

impl ComponentState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unresolved => "unresolved",
            Self::Loading => "loading",
            Self::Resolved { .. } => "resolved",
            Self::Failed { .. } => "failed",
        }
    }
}

/// Mutable runtime window record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowInstance {
    pub id: WindowId,
    pub instance_id: InstanceId,
    /// Template name inside the owning manifest's `windows` table.
    pub window_key: String,
    pub title: String,
    pub size: Size,
    pub position: Position,
    pub visible: bool,
    pub minimized: bool,
    pub maximized: bool,
    pub focused: bool,
    pub lifecycle: WindowLifecycle,
    pub capabilities: WindowCapabilities,
    /// Unresolved view reference copied from the descriptor.
    pub component_ref: String,
    pub component: ComponentState,
}

impl WindowInstance {
    /// Returns whether the window is shown and not minimized.
    pub fn is_on_screen(&self) -> bool {
        self.visible && !self.minimized
    }
}
