//! Window lifecycle manager.
//!
//! # Responsibility
//! - Keep the process-wide window index (`WindowId -> InstanceId`), z-order
//!   and focus.
//! - Apply every window state transition against records owned by the
//!   application registry.
//! - Queue lifecycle events for the desktop to publish.
//!
//! # Invariants
//! - At most one window has `focused = true` at any time.
//! - A window id absent from the index is stale; every operation on it fails
//!   with `StaleHandle`.
//! - Disabled capability flags turn the matching operation into a silent
//!   no-op.
//! - Component tickets commit only for live windows with the newest
//!   generation.

use crate::app::registry::ApplicationRegistry;
use crate::error::{DesktopError, DesktopResult};
use crate::events::DesktopEvent;
use crate::model::geometry::{Position, Size};
use crate::model::window::{
    ComponentState, InstanceId, ResolvedComponent, WindowId, WindowInstance, WindowLifecycle,
};
use crate::window::component::{ComponentResolutionError, ResolveOutcome, ResolveTicket};
use log::{debug, info, warn};
use std::collections::HashMap;

#[derive(Debug, Default)]
pub struct WindowManager {
    index: HashMap<WindowId, InstanceId>,
    /// Bottom to top.
    stack: Vec<WindowId>,
    focused: Option<WindowId>,
    tickets: HashMap<WindowId, u64>,
    next_generation: u64,
    outbox: Vec<DesktopEvent>,
}

impl WindowManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, window_id: WindowId) -> bool {
        self.index.contains_key(&window_id)
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Owning instance of a live window.
    pub fn owner(&self, window_id: WindowId) -> DesktopResult<InstanceId> {
        self.index
            .get(&window_id)
            .copied()
            .ok_or(DesktopError::StaleHandle(window_id))
    }

    pub fn focused(&self) -> Option<WindowId> {
        self.focused
    }

    /// Live window ids, bottom to top.
    pub fn z_order(&self) -> &[WindowId] {
        &self.stack
    }

    /// Events queued since the last drain, in transition order.
    pub fn drain_events(&mut self) -> Vec<DesktopEvent> {
        std::mem::take(&mut self.outbox)
    }

    pub fn window<'r>(
        &self,
        registry: &'r ApplicationRegistry,
        window_id: WindowId,
    ) -> DesktopResult<&'r WindowInstance> {
        let owner = self.owner(window_id)?;
        registry
            .window(owner, window_id)
            .ok_or(DesktopError::StaleHandle(window_id))
    }

    fn window_mut<'r>(
        &self,
        registry: &'r mut ApplicationRegistry,
        window_id: WindowId,
    ) -> DesktopResult<&'r mut WindowInstance> {
        let owner = self.owner(window_id)?;
        registry
            .window_mut(owner, window_id)
            .ok_or(DesktopError::StaleHandle(window_id))
    }

    /// Hands a factory-built window to its owning instance and indexes it.
    pub fn insert(
        &mut self,
        registry: &mut ApplicationRegistry,
        window: WindowInstance,
    ) -> DesktopResult<WindowId> {
        let window_id = window.id;
        let instance_id = window.instance_id;
        registry.push_window(instance_id, window)?;
        self.index.insert(window_id, instance_id);
        self.stack.push(window_id);
        self.outbox.push(DesktopEvent::WindowCreated {
            window_id,
            instance_id,
        });
        debug!("event=window_create module=lifecycle status=ok window_id={window_id} instance_id={instance_id}");
        Ok(window_id)
    }

    /// `created -> visible`. No-op when already visible.
    pub fn open(
        &mut self,
        registry: &mut ApplicationRegistry,
        window_id: WindowId,
    ) -> DesktopResult<()> {
        let window = self.window_mut(registry, window_id)?;
        if window.lifecycle != WindowLifecycle::Created {
            return Ok(());
        }
        window.lifecycle = WindowLifecycle::Visible;
        window.visible = true;
        self.outbox.push(DesktopEvent::WindowOpened(window_id));
        debug!("event=window_open module=lifecycle status=ok window_id={window_id}");
        Ok(())
    }

    /// Focuses and raises one window, restoring it when minimized.
    pub fn focus(
        &mut self,
        registry: &mut ApplicationRegistry,
        window_id: WindowId,
    ) -> DesktopResult<()> {
        let window = self.window_mut(registry, window_id)?;
        let was_minimized = window.minimized;
        window.minimized = false;
        if was_minimized {
            self.outbox.push(DesktopEvent::WindowRestored(window_id));
        }

        self.raise(window_id);
        self.set_focus(registry, Some(window_id));
        Ok(())
    }

    pub fn minimize(
        &mut self,
        registry: &mut ApplicationRegistry,
        window_id: WindowId,
    ) -> DesktopResult<()> {
        let window = self.window_mut(registry, window_id)?;
        if !window.capabilities.minimizable {
            debug!("event=window_minimize module=lifecycle status=noop reason=not_minimizable window_id={window_id}");
            return Ok(());
        }
        if window.minimized {
            return Ok(());
        }
        window.minimized = true;
        self.outbox.push(DesktopEvent::WindowMinimized(window_id));
        if self.focused == Some(window_id) {
            self.focus_topmost(registry, Some(window_id));
        }
        Ok(())
    }

    pub fn restore(
        &mut self,
        registry: &mut ApplicationRegistry,
        window_id: WindowId,
    ) -> DesktopResult<()> {
        let window = self.window_mut(registry, window_id)?;
        if !window.capabilities.minimizable || !window.minimized {
            return Ok(());
        }
        window.minimized = false;
        self.outbox.push(DesktopEvent::WindowRestored(window_id));
        Ok(())
    }

    pub fn maximize(
        &mut self,
        registry: &mut ApplicationRegistry,
        window_id: WindowId,
    ) -> DesktopResult<()> {
        let window = self.window_mut(registry, window_id)?;
        if !window.capabilities.maximizable {
            debug!("event=window_maximize module=lifecycle status=noop reason=not_maximizable window_id={window_id}");
            return Ok(());
        }
        if window.maximized {
            return Ok(());
        }
        window.maximized = true;
        self.outbox.push(DesktopEvent::WindowMaximized(window_id));
        Ok(())
    }

    pub fn unmaximize(
        &mut self,
        registry: &mut ApplicationRegistry,
        window_id: WindowId,
    ) -> DesktopResult<()> {
        let window = self.window_mut(registry, window_id)?;
        if !window.capabilities.maximizable || !window.maximized {
            return Ok(());
        }
        window.maximized = false;
        self.outbox.push(DesktopEvent::WindowUnmaximized(window_id));
        Ok(())
    }

    /// Moves a window. Bounds policy belongs to the renderer; no clamping.
    pub fn move_to(
        &mut self,
        registry: &mut ApplicationRegistry,
        window_id: WindowId,
        position: Position,
    ) -> DesktopResult<()> {
        let window = self.window_mut(registry, window_id)?;
        if !window.capabilities.draggable {
            debug!("event=window_move module=lifecycle status=noop reason=not_draggable window_id={window_id}");
            return Ok(());
        }
        window.position = position;
        self.outbox.push(DesktopEvent::WindowMoved {
            window_id,
            position,
        });
        Ok(())
    }

    pub fn resize(
        &mut self,
        registry: &mut ApplicationRegistry,
        window_id: WindowId,
        size: Size,
    ) -> DesktopResult<()> {
        let window = self.window_mut(registry, window_id)?;
        if !window.capabilities.resizable {
            debug!("event=window_resize module=lifecycle status=noop reason=not_resizable window_id={window_id}");
            return Ok(());
        }
        window.size = size;
        self.outbox
            .push(DesktopEvent::WindowResized { window_id, size });
        Ok(())
    }

    /// User-initiated close.
    ///
    /// Returns `Ok(None)` when the window is not destroyable (nothing
    /// changes), or the destroyed record otherwise.
    pub fn close(
        &mut self,
        registry: &mut ApplicationRegistry,
        window_id: WindowId,
    ) -> DesktopResult<Option<WindowInstance>> {
        let owner = self.owner(window_id)?;
        let window = self.window_mut(registry, window_id)?;
        if !window.capabilities.destroyable {
            debug!("event=window_close module=lifecycle status=noop reason=not_destroyable window_id={window_id}");
            return Ok(None);
        }
        window.lifecycle = WindowLifecycle::Closing;
        self.outbox.push(DesktopEvent::WindowClosing(window_id));

        let mut record = registry
            .instance_mut(owner)
            .and_then(|instance| instance.remove_window(window_id))
            .ok_or(DesktopError::StaleHandle(window_id))?;
        self.destroy(registry, &mut record);
        info!("event=window_close module=lifecycle status=ok window_id={window_id} instance_id={owner}");
        Ok(Some(record))
    }

    /// Forced teardown of windows already detached from a terminated
    /// instance. Ignores `destroyable`.
    pub fn discard_detached(
        &mut self,
        registry: &mut ApplicationRegistry,
        windows: &mut [WindowInstance],
    ) {
        for window in windows.iter_mut() {
            if window.lifecycle != WindowLifecycle::Destroyed {
                window.lifecycle = WindowLifecycle::Closing;
                self.outbox.push(DesktopEvent::WindowClosing(window.id));
                self.destroy(registry, window);
            }
        }
    }

    fn destroy(&mut self, registry: &mut ApplicationRegistry, window: &mut WindowInstance) {
        let window_id = window.id;
        window.lifecycle = WindowLifecycle::Destroyed;
        window.visible = false;
        window.focused = false;
        self.index.remove(&window_id);
        self.stack.retain(|id| *id != window_id);
        self.tickets.remove(&window_id);
        self.outbox.push(DesktopEvent::WindowDestroyed {
            window_id,
            instance_id: window.instance_id,
        });
        if self.focused == Some(window_id) {
            self.focused = None;
            self.focus_topmost(registry, None);
        }
    }

    /// Starts lazy loading for an `unresolved` or `failed` window, or
    /// restarts it while `loading`.
    ///
    /// A new ticket supersedes any ticket issued earlier for the same window.
    /// A resolved component is kept; the call fails with
    /// `ComponentAlreadyResolved`.
    pub fn begin_component_load(
        &mut self,
        registry: &mut ApplicationRegistry,
        window_id: WindowId,
    ) -> DesktopResult<ResolveTicket> {
        let window = self.window_mut(registry, window_id)?;
        if matches!(window.component, ComponentState::Resolved { .. }) {
            debug!("event=component_load module=component status=noop reason=already_resolved window_id={window_id}");
            return Err(DesktopError::ComponentAlreadyResolved(window_id));
        }
        window.component = ComponentState::Loading;
        self.next_generation += 1;
        let generation = self.next_generation;
        self.tickets.insert(window_id, generation);
        self.outbox.push(DesktopEvent::ComponentStateChanged {
            window_id,
            state: "loading",
        });
        debug!("event=component_load module=component status=start window_id={window_id} generation={generation}");
        Ok(ResolveTicket {
            window_id,
            generation,
        })
    }

    /// Delivers the result of a load started with `begin_component_load`.
    pub fn complete_component_load(
        &mut self,
        registry: &mut ApplicationRegistry,
        ticket: ResolveTicket,
        result: Result<ResolvedComponent, ComponentResolutionError>,
    ) -> ResolveOutcome {
        let window_id = ticket.window_id;
        if self.tickets.get(&window_id) != Some(&ticket.generation) {
            debug!("event=component_load module=component status=discarded window_id={window_id} generation={}", ticket.generation);
            return ResolveOutcome::Discarded;
        }
        let Ok(window) = self.window_mut(registry, window_id) else {
            return ResolveOutcome::Discarded;
        };

        let outcome = match result {
            Ok(component) => {
                window.component = ComponentState::Resolved { component };
                ResolveOutcome::Resolved
            }
            Err(err) => {
                warn!(
                    "event=component_load module=component status=error window_id={window_id} error={err}"
                );
                window.component = ComponentState::Failed {
                    reason: err.message,
                };
                ResolveOutcome::Failed
            }
        };
        let state = window.component.as_str();
        self.tickets.remove(&window_id);
        self.outbox
            .push(DesktopEvent::ComponentStateChanged { window_id, state });
        outcome
    }

    fn raise(&mut self, window_id: WindowId) {
        self.stack.retain(|id| *id != window_id);
        self.stack.push(window_id);
    }

    fn set_focus(&mut self, registry: &mut ApplicationRegistry, target: Option<WindowId>) {
        for window in registry.windows_mut() {
            window.focused = Some(window.id) == target;
        }
        let changed = self.focused != target;
        self.focused = target;
        if let (true, Some(window_id)) = (changed, target) {
            self.outbox.push(DesktopEvent::WindowFocused(window_id));
        }
    }

    /// Focuses the topmost on-screen window other than `skip`.
    fn focus_topmost(&mut self, registry: &mut ApplicationRegistry, skip: Option<WindowId>) {
        let next = self
            .stack
            .iter()
            .rev()
            .copied()
            .filter(|id| Some(*id) != skip)
            .find(|id| {
                self.index
                    .get(id)
                    .and_then(|owner| registry.window(*owner, *id))
                    .is_some_and(WindowInstance::is_on_screen)
            });
        self.set_focus(registry, next);
    }
}

#[cfg(test)]
mod tests {
    use super::WindowManager;
    use crate::app::loader::load_manifest;
    use crate::app::manifest::ApplicationManifest;
    use crate::app::registry::ApplicationRegistry;
    use crate::error::DesktopError;
    use crate::events::DesktopEvent;
    use crate::model::geometry::{Position, Size};
    use crate::model::window::{ComponentState, InstanceId, ResolvedComponent, WindowId};
    use crate::window::component::{ComponentResolutionError, ResolveOutcome};
    use crate::window::factory::create_window;

    const FIXED_JSON: &str = r#"{
        "id": "org.necloud.kiosk",
        "title": "Kiosk",
        "icon": "mdi:monitor",
        "category": "system-tools",
        "windows": {
            "default": {
                "component": "./components/KioskWindow.vue",
                "size": { "width": 640, "height": 480 },
                "position": { "x": 0, "y": 0 }
            },
            "pinned": {
                "component": "./components/PinnedWindow.vue",
                "size": { "width": 320, "height": 200 },
                "position": { "x": 10, "y": 10 },
                "minimizable": false,
                "maximizable": false,
                "destroyable": false,
                "draggable": false,
                "resizable": false
            }
        }
    }"#;

    struct Fixture {
        registry: ApplicationRegistry,
        manager: WindowManager,
        instance_id: InstanceId,
    }

    impl Fixture {
        fn new() -> Self {
            let mut registry = ApplicationRegistry::new();
            let manifest = ApplicationManifest::from_json_str(FIXED_JSON).expect("parse");
            let validated = load_manifest(manifest, &registry).expect("load");
            registry.register(validated).expect("register");
            let instance_id = registry
                .acquire_instance("org.necloud.kiosk")
                .expect("instance")
                .id();
            Self {
                registry,
                manager: WindowManager::new(),
                instance_id,
            }
        }

        fn open(&mut self, key: &str) -> WindowId {
            let manifest = self
                .registry
                .manifest("org.necloud.kiosk")
                .expect("manifest")
                .shared();
            let window = create_window(self.instance_id, &manifest, key).expect("window");
            let id = self
                .manager
                .insert(&mut self.registry, window)
                .expect("insert");
            self.manager.open(&mut self.registry, id).expect("open");
            id
        }

        fn focused_count(&self) -> usize {
            self.registry.windows().filter(|w| w.focused).count()
        }
    }

    #[test]
    fn open_is_idempotent() {
        let mut fx = Fixture::new();
        let id = fx.open("default");
        fx.manager.drain_events();

        fx.manager.open(&mut fx.registry, id).expect("second open");
        assert!(fx.manager.drain_events().is_empty());
        assert!(fx.manager.window(&fx.registry, id).expect("window").visible);
    }

    #[test]
    fn focus_keeps_exactly_one_window_focused_and_raises_it() {
        let mut fx = Fixture::new();
        let a = fx.open("default");
        let b = fx.open("default");
        let c = fx.open("pinned");

        for target in [a, c, b, a, a, c] {
            fx.manager.focus(&mut fx.registry, target).expect("focus");
            assert_eq!(fx.focused_count(), 1);
            assert_eq!(fx.manager.focused(), Some(target));
            assert_eq!(fx.manager.z_order().last(), Some(&target));
        }
    }

    #[test]
    fn disabled_capabilities_are_silent_noops() {
        let mut fx = Fixture::new();
        let id = fx.open("pinned");

        fx.manager.minimize(&mut fx.registry, id).expect("minimize");
        fx.manager.maximize(&mut fx.registry, id).expect("maximize");
        fx.manager
            .move_to(&mut fx.registry, id, Position::new(300, 300))
            .expect("move");
        fx.manager
            .resize(&mut fx.registry, id, Size::new(1, 1))
            .expect("resize");
        let outcome = fx.manager.close(&mut fx.registry, id).expect("close");
        assert!(outcome.is_none());

        let window = fx.manager.window(&fx.registry, id).expect("window survives");
        assert!(!window.minimized);
        assert!(!window.maximized);
        assert_eq!(window.position, Position::new(10, 10));
        assert_eq!(window.size, Size::new(320, 200));
        assert!(window.visible);
    }

    #[test]
    fn geometry_changes_are_not_clamped() {
        let mut fx = Fixture::new();
        let id = fx.open("default");
        fx.manager
            .move_to(&mut fx.registry, id, Position::new(-50, -20))
            .expect("move");
        fx.manager
            .resize(&mut fx.registry, id, Size::new(4000, 10))
            .expect("resize");

        let window = fx.manager.window(&fx.registry, id).expect("window");
        assert_eq!(window.position, Position::new(-50, -20));
        assert_eq!(window.size, Size::new(4000, 10));
    }

    #[test]
    fn minimizing_focused_window_hands_focus_down_the_stack() {
        let mut fx = Fixture::new();
        let below = fx.open("default");
        let top = fx.open("default");
        fx.manager.focus(&mut fx.registry, below).expect("focus");
        fx.manager.focus(&mut fx.registry, top).expect("focus");

        fx.manager.minimize(&mut fx.registry, top).expect("minimize");
        assert_eq!(fx.manager.focused(), Some(below));
        assert_eq!(fx.focused_count(), 1);

        fx.manager.restore(&mut fx.registry, top).expect("restore");
        assert!(!fx.manager.window(&fx.registry, top).expect("window").minimized);
    }

    #[test]
    fn focusing_minimized_window_restores_it() {
        let mut fx = Fixture::new();
        let id = fx.open("default");
        fx.manager.minimize(&mut fx.registry, id).expect("minimize");
        fx.manager.focus(&mut fx.registry, id).expect("focus");

        let window = fx.manager.window(&fx.registry, id).expect("window");
        assert!(!window.minimized);
        assert!(window.focused);
    }

    #[test]
    fn maximize_toggles() {
        let mut fx = Fixture::new();
        let id = fx.open("default");
        fx.manager.maximize(&mut fx.registry, id).expect("maximize");
        assert!(fx.manager.window(&fx.registry, id).expect("window").maximized);
        fx.manager.unmaximize(&mut fx.registry, id).expect("unmaximize");
        assert!(!fx.manager.window(&fx.registry, id).expect("window").maximized);
    }

    #[test]
    fn closed_window_handle_is_stale() {
        let mut fx = Fixture::new();
        let id = fx.open("default");
        fx.manager.focus(&mut fx.registry, id).expect("focus");

        let record = fx
            .manager
            .close(&mut fx.registry, id)
            .expect("close")
            .expect("destroyed record");
        assert_eq!(record.lifecycle, crate::model::window::WindowLifecycle::Destroyed);
        assert_eq!(fx.manager.focused(), None);
        assert!(fx.manager.z_order().is_empty());

        let events = fx.manager.drain_events();
        assert!(events.contains(&DesktopEvent::WindowClosing(id)));

        assert!(matches!(
            fx.manager.focus(&mut fx.registry, id),
            Err(DesktopError::StaleHandle(stale)) if stale == id
        ));
        assert!(matches!(
            fx.manager.minimize(&mut fx.registry, id),
            Err(DesktopError::StaleHandle(_))
        ));
        assert!(matches!(
            fx.manager.close(&mut fx.registry, id),
            Err(DesktopError::StaleHandle(_))
        ));
        assert!(matches!(
            fx.manager.begin_component_load(&mut fx.registry, id),
            Err(DesktopError::StaleHandle(_))
        ));
    }

    #[test]
    fn component_load_commits_for_live_window() {
        let mut fx = Fixture::new();
        let id = fx.open("default");
        let ticket = fx
            .manager
            .begin_component_load(&mut fx.registry, id)
            .expect("begin");
        assert_eq!(
            fx.manager.window(&fx.registry, id).expect("window").component,
            ComponentState::Loading
        );

        let outcome = fx.manager.complete_component_load(
            &mut fx.registry,
            ticket,
            Ok(ResolvedComponent {
                source: "./components/KioskWindow.vue".to_string(),
                handle: "kiosk".to_string(),
            }),
        );
        assert_eq!(outcome, ResolveOutcome::Resolved);
        assert!(matches!(
            fx.manager.window(&fx.registry, id).expect("window").component,
            ComponentState::Resolved { .. }
        ));
    }

    #[test]
    fn resolved_component_is_not_reloaded() {
        let mut fx = Fixture::new();
        let id = fx.open("default");
        let ticket = fx
            .manager
            .begin_component_load(&mut fx.registry, id)
            .expect("begin");
        fx.manager.complete_component_load(
            &mut fx.registry,
            ticket,
            Ok(ResolvedComponent {
                source: "./components/KioskWindow.vue".to_string(),
                handle: "kiosk".to_string(),
            }),
        );
        fx.manager.drain_events();

        let err = fx
            .manager
            .begin_component_load(&mut fx.registry, id)
            .unwrap_err();
        assert!(matches!(err, DesktopError::ComponentAlreadyResolved(window) if window == id));
        assert_eq!(
            fx.manager.window(&fx.registry, id).expect("window").component,
            ComponentState::Resolved {
                component: ResolvedComponent {
                    source: "./components/KioskWindow.vue".to_string(),
                    handle: "kiosk".to_string(),
                }
            }
        );
        assert!(fx.manager.drain_events().is_empty());
    }

    #[test]
    fn failed_component_keeps_window_and_can_retry() {
        let mut fx = Fixture::new();
        let id = fx.open("default");
        let ticket = fx
            .manager
            .begin_component_load(&mut fx.registry, id)
            .expect("begin");
        let outcome = fx.manager.complete_component_load(
            &mut fx.registry,
            ticket,
            Err(ComponentResolutionError::new("./components/KioskWindow.vue", "network down")),
        );
        assert_eq!(outcome, ResolveOutcome::Failed);
        assert!(fx.manager.contains(id));
        assert_eq!(
            fx.manager.window(&fx.registry, id).expect("window").component,
            ComponentState::Failed {
                reason: "network down".to_string()
            }
        );

        fx.manager
            .begin_component_load(&mut fx.registry, id)
            .expect("retry begins");
    }

    #[test]
    fn superseded_ticket_is_discarded() {
        let mut fx = Fixture::new();
        let id = fx.open("default");
        let old = fx
            .manager
            .begin_component_load(&mut fx.registry, id)
            .expect("begin");
        let new = fx
            .manager
            .begin_component_load(&mut fx.registry, id)
            .expect("begin again");

        let outcome = fx.manager.complete_component_load(
            &mut fx.registry,
            old,
            Err(ComponentResolutionError::new("x", "late failure")),
        );
        assert_eq!(outcome, ResolveOutcome::Discarded);
        assert_eq!(
            fx.manager.window(&fx.registry, id).expect("window").component,
            ComponentState::Loading
        );

        let outcome = fx.manager.complete_component_load(
            &mut fx.registry,
            new,
            Ok(ResolvedComponent {
                source: "x".to_string(),
                handle: "y".to_string(),
            }),
        );
        assert_eq!(outcome, ResolveOutcome::Resolved);
    }

    #[test]
    fn close_while_loading_discards_late_result() {
        let mut fx = Fixture::new();
        let id = fx.open("default");
        let ticket = fx
            .manager
            .begin_component_load(&mut fx.registry, id)
            .expect("begin");
        fx.manager.close(&mut fx.registry, id).expect("close");
        fx.manager.drain_events();

        let outcome = fx.manager.complete_component_load(
            &mut fx.registry,
            ticket,
            Ok(ResolvedComponent {
                source: "./components/KioskWindow.vue".to_string(),
                handle: "kiosk".to_string(),
            }),
        );
        assert_eq!(outcome, ResolveOutcome::Discarded);
        assert!(!fx.manager.contains(id));
        assert!(fx.registry.windows().all(|w| w.id != id));
        assert!(fx.manager.drain_events().is_empty());
    }
}
