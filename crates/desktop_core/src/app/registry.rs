//! Application registry: manifests, instances and singleton policy.
//!
//! # Responsibility
//! - Hold one validated manifest per application id.
//! - Own every live `ApplicationInstance` (and through it, every window).
//! - Enforce at most one live instance for singleton applications.
//!
//! # Invariants
//! - Application ids are unique for the registry lifetime.
//! - `singletons` maps an app id to its only live instance; the entry is
//!   created with the instance and removed when it terminates.
//! - `instances` preserves launch order.

use crate::app::loader::ValidatedManifest;
use crate::app::manifest::{EntryDescriptor, EntryVisibility};
use crate::error::{DesktopError, DesktopResult};
use crate::model::instance::{ApplicationInstance, ApplicationInstanceHandle, InstanceState};
use crate::model::window::{InstanceId, WindowId, WindowInstance};
use log::info;
use std::collections::BTreeMap;

/// Result of asking the registry for an instance slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstanceSlot {
    /// Live singleton instance that must be reused.
    Existing(InstanceId),
    /// Freshly created instance in `launching` state.
    Created(InstanceId),
}

impl InstanceSlot {
    pub fn id(self) -> InstanceId {
        match self {
            Self::Existing(id) | Self::Created(id) => id,
        }
    }
}

/// Launcher-facing view of one entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LauncherEntry<'a> {
    pub app_id: &'a str,
    pub entry_key: &'a str,
    pub entry: &'a EntryDescriptor,
}

#[derive(Debug, Default)]
pub struct ApplicationRegistry {
    apps: BTreeMap<String, ValidatedManifest>,
    registration_order: Vec<String>,
    instances: Vec<ApplicationInstance>,
    singletons: BTreeMap<String, InstanceId>,
}

impl ApplicationRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers one validated manifest.
    pub fn register(&mut self, manifest: ValidatedManifest) -> DesktopResult<String> {
        let id = manifest.id().to_string();
        if self.apps.contains_key(id.as_str()) {
            return Err(DesktopError::DuplicateId(id));
        }
        self.registration_order.push(id.clone());
        self.apps.insert(id.clone(), manifest);
        info!("event=app_register module=registry status=ok app_id={id}");
        Ok(id)
    }

    pub fn is_registered(&self, app_id: &str) -> bool {
        self.apps.contains_key(app_id)
    }

    pub fn manifest(&self, app_id: &str) -> Option<&ValidatedManifest> {
        self.apps.get(app_id)
    }

    /// Returns application ids in registration order.
    pub fn app_ids(&self) -> Vec<&str> {
        self.registration_order.iter().map(String::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.apps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.apps.is_empty()
    }

    /// Lists launcher entries with the given visibility, in registration order.
    pub fn entries_by_visibility(&self, visibility: EntryVisibility) -> Vec<LauncherEntry<'_>> {
        self.registration_order
            .iter()
            .filter_map(|id| self.apps.get(id))
            .flat_map(|app| {
                app.manifest()
                    .entries
                    .iter()
                    .filter(move |(_, entry)| entry.visibility == visibility)
                    .map(move |(key, entry)| LauncherEntry {
                        app_id: app.id(),
                        entry_key: key.as_str(),
                        entry,
                    })
            })
            .collect()
    }

    /// Reuses the live singleton instance or creates a new `launching` one.
    pub(crate) fn acquire_instance(&mut self, app_id: &str) -> DesktopResult<InstanceSlot> {
        let manifest = self
            .apps
            .get(app_id)
            .ok_or_else(|| DesktopError::UnknownApp(app_id.to_string()))?;
        let singleton = manifest.manifest().singleton;

        if singleton {
            if let Some(existing) = self.singletons.get(app_id) {
                return Ok(InstanceSlot::Existing(*existing));
            }
        }

        let instance = ApplicationInstance::new(app_id);
        let id = instance.id;
        self.instances.push(instance);
        if singleton {
            self.singletons.insert(app_id.to_string(), id);
        }
        Ok(InstanceSlot::Created(id))
    }

    pub(crate) fn mark_running(&mut self, instance_id: InstanceId) -> DesktopResult<()> {
        let instance = self
            .instance_mut(instance_id)
            .ok_or(DesktopError::UnknownInstance(instance_id))?;
        instance.state = InstanceState::Running;
        Ok(())
    }

    /// Detaches one instance, marking it terminated and releasing its
    /// singleton slot. The caller owns window teardown.
    pub(crate) fn remove_instance(
        &mut self,
        instance_id: InstanceId,
    ) -> DesktopResult<ApplicationInstance> {
        let index = self
            .instances
            .iter()
            .position(|instance| instance.id == instance_id)
            .ok_or(DesktopError::UnknownInstance(instance_id))?;
        let mut instance = self.instances.remove(index);
        instance.state = InstanceState::Terminated;
        if self.singletons.get(instance.app_id.as_str()) == Some(&instance_id) {
            self.singletons.remove(instance.app_id.as_str());
        }
        Ok(instance)
    }

    pub fn instance(&self, instance_id: InstanceId) -> Option<&ApplicationInstance> {
        self.instances
            .iter()
            .find(|instance| instance.id == instance_id)
    }

    pub(crate) fn instance_mut(
        &mut self,
        instance_id: InstanceId,
    ) -> Option<&mut ApplicationInstance> {
        self.instances
            .iter_mut()
            .find(|instance| instance.id == instance_id)
    }

    /// Most recently launched live instance of `app_id`.
    pub fn running_instance(&self, app_id: &str) -> Option<InstanceId> {
        self.instances
            .iter()
            .rev()
            .find(|instance| instance.app_id == app_id && instance.is_live())
            .map(|instance| instance.id)
    }

    /// Lists instances in launch order, optionally filtered by app id.
    pub fn list_instances(&self, app_id: Option<&str>) -> Vec<ApplicationInstanceHandle> {
        self.instances
            .iter()
            .filter(|instance| app_id.map_or(true, |id| instance.app_id == id))
            .map(ApplicationInstance::handle)
            .collect()
    }

    pub(crate) fn push_window(
        &mut self,
        instance_id: InstanceId,
        window: WindowInstance,
    ) -> DesktopResult<()> {
        let instance = self
            .instance_mut(instance_id)
            .ok_or(DesktopError::UnknownInstance(instance_id))?;
        instance.windows.push(window);
        Ok(())
    }

    pub(crate) fn window(
        &self,
        instance_id: InstanceId,
        window_id: WindowId,
    ) -> Option<&WindowInstance> {
        self.instance(instance_id)?.window(window_id)
    }

    pub(crate) fn window_mut(
        &mut self,
        instance_id: InstanceId,
        window_id: WindowId,
    ) -> Option<&mut WindowInstance> {
        self.instance_mut(instance_id)?.window_mut(window_id)
    }

    /// Iterates every live window across all instances.
    pub fn windows(&self) -> impl Iterator<Item = &WindowInstance> {
        self.instances
            .iter()
            .flat_map(|instance| instance.windows.iter())
    }

    pub(crate) fn windows_mut(&mut self) -> impl Iterator<Item = &mut WindowInstance> {
        self.instances
            .iter_mut()
            .flat_map(|instance| instance.windows.iter_mut())
    }
}
