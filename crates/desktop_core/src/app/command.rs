//! Command dispatch table.
//!
//! # Responsibility
//! - Turn manifest command declarations into callable handlers once, at load
//!   time.
//! - Resolve `(app id, command name)` to a handler for the desktop to invoke.
//!
//! # Invariants
//! - Lookups never fall back to another app's table.
//! - A resolved handler is invoked exactly once per `Desktop::invoke` call.

use crate::app::loader::ValidatedManifest;
use crate::app::manifest::{ApplicationManifest, CommandDecl};
use crate::desktop::{CloseOutcome, Desktop};
use crate::error::{DesktopError, DesktopResult};
use crate::model::window::{InstanceId, WindowId};
use std::collections::BTreeMap;
use std::fmt::{Debug, Formatter};
use std::rc::Rc;

type CommandFn = dyn Fn(&mut CommandContext<'_>, &[String]) -> DesktopResult<()>;

/// Callable command bound to an application instance at invocation time.
#[derive(Clone)]
pub struct CommandHandler(Rc<CommandFn>);

impl CommandHandler {
    pub fn new<F>(handler: F) -> Self
    where
        F: Fn(&mut CommandContext<'_>, &[String]) -> DesktopResult<()> + 'static,
    {
        Self(Rc::new(handler))
    }

    /// Handler equivalent to `app.openWindow(window_key)`.
    pub fn open_window(window_key: impl Into<String>) -> Self {
        let window_key = window_key.into();
        Self::new(move |ctx, _args| ctx.open_window(&window_key).map(|_| ()))
    }

    pub(crate) fn call(&self, ctx: &mut CommandContext<'_>, args: &[String]) -> DesktopResult<()> {
        (self.0)(ctx, args)
    }

    fn from_decl(decl: &CommandDecl) -> Self {
        match decl {
            CommandDecl::OpenWindow { window } => Self::open_window(window.clone()),
            CommandDecl::Custom(handler) => handler.clone(),
        }
    }
}

impl Debug for CommandHandler {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str("CommandHandler(..)")
    }
}

/// Builds the handler table for one manifest.
pub(crate) fn build_handlers(manifest: &ApplicationManifest) -> BTreeMap<String, CommandHandler> {
    manifest
        .commands
        .iter()
        .map(|(name, decl)| (name.clone(), CommandHandler::from_decl(decl)))
        .collect()
}

/// Per-application command tables.
#[derive(Debug, Default)]
pub struct CommandRouter {
    tables: BTreeMap<String, BTreeMap<String, CommandHandler>>,
}

impl CommandRouter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Indexes the command table of a freshly registered manifest.
    pub fn index(&mut self, manifest: &ValidatedManifest) {
        self.tables
            .insert(manifest.id().to_string(), manifest.handlers().clone());
    }

    /// Resolves one handler.
    pub fn resolve(&self, app_id: &str, command: &str) -> DesktopResult<CommandHandler> {
        let table = self
            .tables
            .get(app_id)
            .ok_or_else(|| DesktopError::UnknownApp(app_id.to_string()))?;
        table
            .get(command)
            .cloned()
            .ok_or_else(|| DesktopError::UnknownCommand {
                app_id: app_id.to_string(),
                command: command.to_string(),
            })
    }

    /// Returns command names of one app in sorted order.
    pub fn commands(&self, app_id: &str) -> Vec<&str> {
        self.tables
            .get(app_id)
            .map(|table| table.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }
}

/// Handle passed to command handlers, bound to the invoking instance.
pub struct CommandContext<'a> {
    desktop: &'a mut Desktop,
    instance_id: InstanceId,
}

impl<'a> CommandContext<'a> {
    pub(crate) fn new(desktop: &'a mut Desktop, instance_id: InstanceId) -> Self {
        Self {
            desktop,
            instance_id,
        }
    }

    pub fn instance_id(&self) -> InstanceId {
        self.instance_id
    }

    pub fn app_id(&self) -> DesktopResult<String> {
        self.desktop
            .registry()
            .instance(self.instance_id)
            .map(|instance| instance.app_id.clone())
            .ok_or(DesktopError::UnknownInstance(self.instance_id))
    }

    pub fn manifest(&self) -> DesktopResult<Rc<ApplicationManifest>> {
        let app_id = self.app_id()?;
        self.desktop
            .registry()
            .manifest(&app_id)
            .map(|manifest| manifest.shared())
            .ok_or(DesktopError::UnknownApp(app_id))
    }

    /// Creates, opens and focuses a window from `window_key`.
    pub fn open_window(&mut self, window_key: &str) -> DesktopResult<WindowId> {
        self.desktop.open_window(self.instance_id, window_key)
    }

    pub fn window_ids(&self) -> Vec<WindowId> {
        self.desktop
            .registry()
            .instance(self.instance_id)
            .map(|instance| instance.window_ids())
            .unwrap_or_default()
    }

    pub fn focus(&mut self, window_id: WindowId) -> DesktopResult<()> {
        self.desktop.focus(window_id)
    }

    pub fn close(&mut self, window_id: WindowId) -> DesktopResult<CloseOutcome> {
        self.desktop.close(window_id)
    }
}
