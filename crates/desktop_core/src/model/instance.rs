//! Application instance records.
//!
//! # Invariants
//! - An instance exclusively owns its window records.
//! - `windows` keeps insertion order, which doubles as a z-order hint.

use crate::model::window::{InstanceId, WindowId, WindowInstance};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lifecycle state of one running occurrence of an application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InstanceState {
    Launching,
    Running,
    Terminated,
}

impl InstanceState {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Launching => "launching",
            Self::Running => "running",
            Self::Terminated => "terminated",
        }
    }
}

/// Runtime record owned by the application registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplicationInstance {
    pub id: InstanceId,
    pub app_id: String,
    pub state: InstanceState,
    pub(crate) windows: Vec<WindowInstance>,
}

impl ApplicationInstance {
    pub(crate) fn new(app_id: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            app_id: app_id.into(),
            state: InstanceState::Launching,
            windows: Vec::new(),
        }
    }

    /// Returns owned window ids in insertion order.
    pub fn window_ids(&self) -> Vec<WindowId> {
        self.windows.iter().map(|window| window.id).collect()
    }

    pub fn windows(&self) -> &[WindowInstance] {
        &self.windows
    }

    pub fn window(&self, id: WindowId) -> Option<&WindowInstance> {
        self.windows.iter().find(|window| window.id == id)
    }

    pub(crate) fn window_mut(&mut self, id: WindowId) -> Option<&mut WindowInstance> {
        self.windows.iter_mut().find(|window| window.id == id)
    }

    pub(crate) fn remove_window(&mut self, id: WindowId) -> Option<WindowInstance> {
        let index = self.windows.iter().position(|window| window.id == id)?;
        Some(self.windows.remove(index))
    }

    pub fn is_live(&self) -> bool {
        self.state != InstanceState::Terminated
    }

    /// Builds a read-only snapshot for callers outside the registry.
    pub fn handle(&self) -> ApplicationInstanceHandle {
        ApplicationInstanceHandle {
            id: self.id,
            app_id: self.app_id.clone(),
            state: self.state,
            window_ids: self.window_ids(),
        }
    }
}

/// Read-only snapshot of one application instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationInstanceHandle {
    pub id: InstanceId,
    pub app_id: String,
    pub state: InstanceState,
    pub window_ids: Vec<WindowId>,
}
