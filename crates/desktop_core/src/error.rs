//! Desktop runtime error taxonomy.
//!
//! # Invariants
//! - Registration and validation errors never leave partial registry state.
//! - Disabled capability flags are silent no-ops, never errors.
//! - `StaleHandle` is always surfaced to the caller.

use crate::app::manifest::ManifestError;
use crate::model::window::{InstanceId, WindowId};
use crate::session::SessionError;
use crate::window::component::ComponentResolutionError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type DesktopResult<T> = Result<T, DesktopError>;

/// Errors surfaced by registry, router and lifecycle operations.
#[derive(Debug)]
pub enum DesktopError {
    DuplicateId(String),
    UnknownApp(String),
    UnknownEntry {
        app_id: String,
        entry: String,
    },
    UnknownCommand {
        app_id: String,
        command: String,
    },
    UnknownWindowKey {
        app_id: String,
        window_key: String,
    },
    UnknownInstance(InstanceId),
    /// Operation on a window that is destroyed or was never issued.
    StaleHandle(WindowId),
    /// Load requested for a window whose component is already resolved.
    ComponentAlreadyResolved(WindowId),
    Manifest(ManifestError),
    ComponentResolution(ComponentResolutionError),
    Session(SessionError),
}

impl DesktopError {
    /// Stable machine-readable code used in log records.
    pub fn code(&self) -> &'static str {
        match self {
            Self::DuplicateId(_) => "duplicate_id",
            Self::UnknownApp(_) => "unknown_app",
            Self::UnknownEntry { .. } => "unknown_entry",
            Self::UnknownCommand { .. } => "unknown_command",
            Self::UnknownWindowKey { .. } => "unknown_window_key",
            Self::UnknownInstance(_) => "unknown_instance",
            Self::StaleHandle(_) => "stale_handle",
            Self::ComponentAlreadyResolved(_) => "component_already_resolved",
            Self::Manifest(_) => "manifest_invalid",
            Self::ComponentResolution(_) => "component_resolution_failed",
            Self::Session(_) => "session_failed",
        }
    }
}

impl Display for DesktopError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicateId(id) => write!(f, "application id already registered: {id}"),
            Self::UnknownApp(id) => write!(f, "application not registered: {id}"),
            Self::UnknownEntry { app_id, entry } => {
                write!(f, "application `{app_id}` has no entry `{entry}`")
            }
            Self::UnknownCommand { app_id, command } => {
                write!(f, "application `{app_id}` has no command `{command}`")
            }
            Self::UnknownWindowKey { app_id, window_key } => {
                write!(f, "application `{app_id}` has no window `{window_key}`")
            }
            Self::UnknownInstance(id) => write!(f, "application instance not found: {id}"),
            Self::StaleHandle(id) => write!(f, "window handle is stale: {id}"),
            Self::ComponentAlreadyResolved(id) => {
                write!(f, "window component is already resolved: {id}")
            }
            Self::Manifest(err) => write!(f, "{err}"),
            Self::ComponentResolution(err) => write!(f, "{err}"),
            Self::Session(err) => write!(f, "{err}"),
        }
    }
}

impl Error for DesktopError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Manifest(err) => Some(err),
            Self::ComponentResolution(err) => Some(err),
            Self::Session(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ManifestError> for DesktopError {
    fn from(value: ManifestError) -> Self {
        match value {
            ManifestError::DuplicateId(id) => Self::DuplicateId(id),
            other => Self::Manifest(other),
        }
    }
}

impl From<ComponentResolutionError> for DesktopError {
    fn from(value: ComponentResolutionError) -> Self {
        Self::ComponentResolution(value)
    }
}

impl From<SessionError> for DesktopError {
    fn from(value: SessionError) -> Self {
        Self::Session(value)
    }
}
