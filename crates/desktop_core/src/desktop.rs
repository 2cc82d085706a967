//! Desktop facade.
//!
//! # Responsibility
//! - Single entry point the launcher and renderer talk to.
//! - Wire registry, command router, window manager, event bus and the
//!   optional layout store together.
//! - Publish queued lifecycle events after each committed transition.
//!
//! # Invariants
//! - Every method takes `&mut self`; transitions never interleave.
//! - A failed launch leaves no live instance behind.
//! - Layout store failures are logged and never fail a transition.
//!
//! # See also
//! - `window::lifecycle` for the per-window state machine.

use crate::app::command::{CommandContext, CommandHandler, CommandRouter};
use crate::app::loader::{load_manifest, load_manifest_file, ValidatedManifest};
use crate::app::manifest::ApplicationManifest;
use crate::app::registry::{ApplicationRegistry, InstanceSlot};
use crate::error::{DesktopError, DesktopResult};
use crate::events::{DesktopEvent, EventBus, SubscriptionId};
use crate::model::geometry::{Position, Size};
use crate::model::instance::{ApplicationInstanceHandle, InstanceState};
use crate::model::window::{
    ComponentState, InstanceId, ResolvedComponent, WindowId, WindowInstance,
};
use crate::session::{LayoutStore, WindowLayout};
use crate::window::component::{
    ComponentResolutionError, ComponentResolver, ResolveOutcome, ResolveTicket,
};
use crate::window::factory::create_window;
use crate::window::lifecycle::WindowManager;
use log::{info, warn};
use std::path::Path;

/// Behavior switches for one desktop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DesktopOptions {
    /// Terminate an instance once its last window is destroyed.
    pub terminate_on_last_window_close: bool,
}

impl Default for DesktopOptions {
    fn default() -> Self {
        Self {
            terminate_on_last_window_close: true,
        }
    }
}

/// Result of a user-initiated close.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseOutcome {
    /// Window is not destroyable; nothing changed.
    Retained,
    Destroyed,
}

pub struct Desktop {
    options: DesktopOptions,
    registry: ApplicationRegistry,
    router: CommandRouter,
    windows: WindowManager,
    events: EventBus,
    layouts: Option<Box<dyn LayoutStore>>,
}

impl Default for Desktop {
    fn default() -> Self {
        Self::new()
    }
}

impl Desktop {
    pub fn new() -> Self {
        Self::with_options(DesktopOptions::default())
    }

    pub fn with_options(options: DesktopOptions) -> Self {
        Self {
            options,
            registry: ApplicationRegistry::new(),
            router: CommandRouter::new(),
            windows: WindowManager::new(),
            events: EventBus::new(),
            layouts: None,
        }
    }

    /// Attaches a layout store; window geometry is restored on open and saved
    /// on close or termination.
    pub fn with_layout_store(mut self, store: impl LayoutStore + 'static) -> Self {
        self.layouts = Some(Box::new(store));
        self
    }

    pub fn options(&self) -> DesktopOptions {
        self.options
    }

    pub fn registry(&self) -> &ApplicationRegistry {
        &self.registry
    }

    pub fn window_manager(&self) -> &WindowManager {
        &self.windows
    }

    pub fn router(&self) -> &CommandRouter {
        &self.router
    }

    /// Validates and registers a manifest in one step.
    pub fn load_and_register(&mut self, manifest: ApplicationManifest) -> DesktopResult<String> {
        let validated = load_manifest(manifest, &self.registry)?;
        self.register(validated)
    }

    /// Reads, validates and registers one manifest file.
    pub fn register_file(&mut self, path: impl AsRef<Path>) -> DesktopResult<String> {
        let validated = load_manifest_file(path, &self.registry)?;
        self.register(validated)
    }

    pub fn register(&mut self, manifest: ValidatedManifest) -> DesktopResult<String> {
        if self.registry.is_registered(manifest.id()) {
            return Err(DesktopError::DuplicateId(manifest.id().to_string()));
        }
        self.router.index(&manifest);
        let app_id = self.registry.register(manifest)?;
        self.emit(DesktopEvent::AppRegistered {
            app_id: app_id.clone(),
        });
        Ok(app_id)
    }

    /// Launches `app_id` through one of its entries.
    ///
    /// A live singleton instance is reused: its latest window is focused, or
    /// the entry command runs again when it owns no windows.
    pub fn launch(
        &mut self,
        app_id: &str,
        entry_key: &str,
    ) -> DesktopResult<ApplicationInstanceHandle> {
        let manifest = self
            .registry
            .manifest(app_id)
            .ok_or_else(|| DesktopError::UnknownApp(app_id.to_string()))?;
        let command = manifest
            .manifest()
            .entries
            .get(entry_key)
            .map(|entry| entry.command.clone())
            .ok_or_else(|| DesktopError::UnknownEntry {
                app_id: app_id.to_string(),
                entry: entry_key.to_string(),
            })?;

        match self.registry.acquire_instance(app_id)? {
            InstanceSlot::Existing(instance_id) => {
                let latest = self
                    .registry
                    .instance(instance_id)
                    .and_then(|instance| instance.windows().last())
                    .map(|window| window.id);
                match latest {
                    Some(window_id) => self.focus(window_id)?,
                    None => self.run_command(app_id, &command, instance_id, &[])?,
                }
                info!(
                    "event=app_launch module=registry status=ok app_id={app_id} entry={entry_key} instance_id={instance_id} reused=true"
                );
                Ok(self.handle(app_id, instance_id))
            }
            InstanceSlot::Created(instance_id) => {
                self.spawn_instance(app_id, instance_id, Some(&command))?;
                info!(
                    "event=app_launch module=registry status=ok app_id={app_id} entry={entry_key} instance_id={instance_id} reused=false"
                );
                Ok(self.handle(app_id, instance_id))
            }
        }
    }

    /// Runs the launch hook and the optional entry command on a fresh
    /// instance, rolling it back on failure.
    fn spawn_instance(
        &mut self,
        app_id: &str,
        instance_id: InstanceId,
        entry_command: Option<&str>,
    ) -> DesktopResult<()> {
        self.emit(DesktopEvent::InstanceLaunched {
            instance_id,
            app_id: app_id.to_string(),
        });
        let on_launch = self
            .registry
            .manifest(app_id)
            .and_then(|manifest| manifest.manifest().on_launch.clone());

        let mut result = Ok(());
        if let Some(hook) = on_launch.as_deref() {
            result = self.run_command(app_id, hook, instance_id, &[]);
        }
        if let (true, Some(command)) = (result.is_ok(), entry_command) {
            result = self.run_command(app_id, command, instance_id, &[]);
        }

        match result {
            Ok(()) => {
                if self.registry.instance(instance_id).is_some() {
                    self.registry.mark_running(instance_id)?;
                }
                Ok(())
            }
            Err(err) => {
                warn!(
                    "event=app_launch module=registry status=error app_id={app_id} instance_id={instance_id} error_code={} error={err}",
                    err.code()
                );
                self.roll_back(instance_id)?;
                Err(err)
            }
        }
    }

    /// Terminates an instance created by a failed launch or invoke, unless a
    /// handler already tore it down.
    fn roll_back(&mut self, instance_id: InstanceId) -> DesktopResult<()> {
        if self.registry.instance(instance_id).is_some() {
            self.terminate(instance_id)?;
        }
        Ok(())
    }

    /// Invokes a command on the most recent live instance of `app_id`,
    /// creating a bare instance when none is live.
    ///
    /// A bare instance created here is terminated again when the handler
    /// fails.
    pub fn invoke(&mut self, app_id: &str, command: &str, args: &[String]) -> DesktopResult<()> {
        let handler = self.router.resolve(app_id, command)?;
        let (instance_id, created) = match self.registry.running_instance(app_id) {
            Some(instance_id) => (instance_id, false),
            None => match self.registry.acquire_instance(app_id)? {
                InstanceSlot::Existing(instance_id) => (instance_id, false),
                InstanceSlot::Created(instance_id) => {
                    self.spawn_instance(app_id, instance_id, None)?;
                    (instance_id, true)
                }
            },
        };

        let result = self.call_handler(app_id, command, &handler, instance_id, args);
        if result.is_err() && created {
            self.roll_back(instance_id)?;
        }
        result
    }

    /// Invokes a command on one specific instance.
    pub fn invoke_on(
        &mut self,
        instance_id: InstanceId,
        command: &str,
        args: &[String],
    ) -> DesktopResult<()> {
        let app_id = self
            .registry
            .instance(instance_id)
            .map(|instance| instance.app_id.clone())
            .ok_or(DesktopError::UnknownInstance(instance_id))?;
        self.run_command(&app_id, command, instance_id, args)
    }

    fn run_command(
        &mut self,
        app_id: &str,
        command: &str,
        instance_id: InstanceId,
        args: &[String],
    ) -> DesktopResult<()> {
        let handler = self.router.resolve(app_id, command)?;
        self.call_handler(app_id, command, &handler, instance_id, args)
    }

    fn call_handler(
        &mut self,
        app_id: &str,
        command: &str,
        handler: &CommandHandler,
        instance_id: InstanceId,
        args: &[String],
    ) -> DesktopResult<()> {
        let result = {
            let mut ctx = CommandContext::new(self, instance_id);
            handler.call(&mut ctx, args)
        };
        self.flush();
        match &result {
            Ok(()) => info!(
                "event=command_invoke module=router status=ok app_id={app_id} command={command} instance_id={instance_id}"
            ),
            Err(err) => warn!(
                "event=command_invoke module=router status=error app_id={app_id} command={command} instance_id={instance_id} error_code={}",
                err.code()
            ),
        }
        result
    }

    /// Creates a window from `window_key`, opens it and gives it focus.
    pub fn open_window(
        &mut self,
        instance_id: InstanceId,
        window_key: &str,
    ) -> DesktopResult<WindowId> {
        let app_id = self
            .registry
            .instance(instance_id)
            .map(|instance| instance.app_id.clone())
            .ok_or(DesktopError::UnknownInstance(instance_id))?;
        let manifest = self
            .registry
            .manifest(&app_id)
            .map(ValidatedManifest::shared)
            .ok_or_else(|| DesktopError::UnknownApp(app_id.clone()))?;

        let mut window = create_window(instance_id, &manifest, window_key)?;
        self.apply_saved_layout(&app_id, &mut window);
        let window_id = self.windows.insert(&mut self.registry, window)?;
        self.windows.open(&mut self.registry, window_id)?;
        self.windows.focus(&mut self.registry, window_id)?;
        self.flush();
        Ok(window_id)
    }

    pub fn focus(&mut self, window_id: WindowId) -> DesktopResult<()> {
        let result = self.windows.focus(&mut self.registry, window_id);
        self.flush();
        result
    }

    pub fn minimize(&mut self, window_id: WindowId) -> DesktopResult<()> {
        let result = self.windows.minimize(&mut self.registry, window_id);
        self.flush();
        result
    }

    pub fn restore(&mut self, window_id: WindowId) -> DesktopResult<()> {
        let result = self.windows.restore(&mut self.registry, window_id);
        self.flush();
        result
    }

    pub fn maximize(&mut self, window_id: WindowId) -> DesktopResult<()> {
        let result = self.windows.maximize(&mut self.registry, window_id);
        self.flush();
        result
    }

    pub fn unmaximize(&mut self, window_id: WindowId) -> DesktopResult<()> {
        let result = self.windows.unmaximize(&mut self.registry, window_id);
        self.flush();
        result
    }

    pub fn move_to(&mut self, window_id: WindowId, position: Position) -> DesktopResult<()> {
        let result = self.windows.move_to(&mut self.registry, window_id, position);
        self.flush();
        result
    }

    pub fn resize(&mut self, window_id: WindowId, size: Size) -> DesktopResult<()> {
        let result = self.windows.resize(&mut self.registry, window_id, size);
        self.flush();
        result
    }

    /// User-initiated close.
    pub fn close(&mut self, window_id: WindowId) -> DesktopResult<CloseOutcome> {
        let owner = self.windows.owner(window_id)?;
        let Some(record) = self.windows.close(&mut self.registry, window_id)? else {
            return Ok(CloseOutcome::Retained);
        };
        self.flush();

        let Some(instance) = self.registry.instance(owner) else {
            return Ok(CloseOutcome::Destroyed);
        };
        let app_id = instance.app_id.clone();
        let now_empty = instance.windows().is_empty();
        self.save_layout(&app_id, &record);

        if now_empty && self.options.terminate_on_last_window_close {
            self.terminate(owner)?;
        }
        Ok(CloseOutcome::Destroyed)
    }

    /// Forced termination: every owned window is destroyed regardless of
    /// `destroyable`.
    pub fn terminate(&mut self, instance_id: InstanceId) -> DesktopResult<()> {
        let mut instance = self.registry.remove_instance(instance_id)?;
        for window in instance.windows.iter() {
            self.save_layout(&instance.app_id, window);
        }
        let closed = instance.windows.len();
        self.windows
            .discard_detached(&mut self.registry, &mut instance.windows);
        info!(
            "event=app_terminate module=registry status=ok app_id={} instance_id={instance_id} windows_closed={closed}",
            instance.app_id
        );
        self.emit(DesktopEvent::InstanceTerminated {
            instance_id,
            app_id: instance.app_id,
        });
        Ok(())
    }

    /// Drops every saved layout of `app_id`; `Ok(0)` without a store.
    pub fn forget_layouts(&mut self, app_id: &str) -> DesktopResult<usize> {
        match self.layouts.as_ref() {
            Some(store) => Ok(store.forget(app_id)?),
            None => Ok(0),
        }
    }

    pub fn begin_component_load(&mut self, window_id: WindowId) -> DesktopResult<ResolveTicket> {
        let result = self
            .windows
            .begin_component_load(&mut self.registry, window_id);
        self.flush();
        result
    }

    pub fn complete_component_load(
        &mut self,
        ticket: ResolveTicket,
        result: Result<ResolvedComponent, ComponentResolutionError>,
    ) -> ResolveOutcome {
        let outcome = self
            .windows
            .complete_component_load(&mut self.registry, ticket, result);
        self.flush();
        outcome
    }

    /// Resolves a window's component synchronously through `resolver`.
    ///
    /// An already resolved component is returned as is, without consulting
    /// `resolver`. On failure the window stays alive in the `failed` state and
    /// the resolver error is returned.
    pub fn resolve_component(
        &mut self,
        window_id: WindowId,
        resolver: &dyn ComponentResolver,
    ) -> DesktopResult<ResolvedComponent> {
        let window = self.window(window_id)?;
        if let ComponentState::Resolved { component } = &window.component {
            return Ok(component.clone());
        }
        let reference = window.component_ref.clone();
        let ticket = self.begin_component_load(window_id)?;
        let result = resolver.resolve(&reference);
        let returned = result.clone();
        match self.complete_component_load(ticket, result) {
            ResolveOutcome::Discarded => Err(DesktopError::StaleHandle(window_id)),
            ResolveOutcome::Resolved | ResolveOutcome::Failed => {
                returned.map_err(DesktopError::from)
            }
        }
    }

    pub fn window(&self, window_id: WindowId) -> DesktopResult<&WindowInstance> {
        self.windows.window(&self.registry, window_id)
    }

    pub fn windows(&self) -> impl Iterator<Item = &WindowInstance> {
        self.registry.windows()
    }

    pub fn focused_window(&self) -> Option<WindowId> {
        self.windows.focused()
    }

    /// Live window ids, bottom to top.
    pub fn z_order(&self) -> &[WindowId] {
        self.windows.z_order()
    }

    pub fn list_instances(&self, app_id: Option<&str>) -> Vec<ApplicationInstanceHandle> {
        self.registry.list_instances(app_id)
    }

    pub fn instance(&self, instance_id: InstanceId) -> Option<ApplicationInstanceHandle> {
        self.registry.instance(instance_id).map(|instance| instance.handle())
    }

    pub fn subscribe(
        &mut self,
        listener: impl FnMut(&DesktopEvent) + 'static,
    ) -> SubscriptionId {
        self.events.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.events.unsubscribe(id)
    }

    /// Snapshot of a launched instance. An instance its own entry command
    /// already tore down is reported as `terminated` with no windows.
    fn handle(&self, app_id: &str, instance_id: InstanceId) -> ApplicationInstanceHandle {
        self.instance(instance_id)
            .unwrap_or_else(|| ApplicationInstanceHandle {
                id: instance_id,
                app_id: app_id.to_string(),
                state: InstanceState::Terminated,
                window_ids: Vec::new(),
            })
    }

    fn flush(&mut self) {
        for event in self.windows.drain_events() {
            self.events.publish(&event);
        }
    }

    fn emit(&mut self, event: DesktopEvent) {
        self.flush();
        self.events.publish(&event);
    }

    fn apply_saved_layout(&self, app_id: &str, window: &mut WindowInstance) {
        let Some(store) = self.layouts.as_ref() else {
            return;
        };
        match store.load(app_id, &window.window_key) {
            Ok(Some(layout)) => layout.apply_to(window),
            Ok(None) => {}
            Err(err) => warn!(
                "event=layout_load module=session status=error app_id={app_id} window_key={} error={err}",
                window.window_key
            ),
        }
    }

    fn save_layout(&self, app_id: &str, window: &WindowInstance) {
        let Some(store) = self.layouts.as_ref() else {
            return;
        };
        if let Err(err) = store.save(&WindowLayout::capture(app_id, window)) {
            warn!(
                "event=layout_save module=session status=error app_id={app_id} window_key={} error={err}",
                window.window_key
            );
        }
    }
}
