//! Window factory: descriptor template to fresh window record.

use crate::app::manifest::ApplicationManifest;
use crate::error::{DesktopError, DesktopResult};
use crate::model::window::{ComponentState, InstanceId, WindowInstance, WindowLifecycle};
use uuid::Uuid;

/// Builds a window record from the manifest's `window_key` template.
///
/// # Contract
/// - Size, position and capability flags equal the descriptor defaults.
/// - Lifecycle starts at `created`, component at `unresolved`.
/// - The view component is never resolved here.
pub fn create_window(
    instance_id: InstanceId,
    manifest: &ApplicationManifest,
    window_key: &str,
) -> DesktopResult<WindowInstance> {
    let descriptor =
        manifest
            .windows
            .get(window_key)
            .ok_or_else(|| DesktopError::UnknownWindowKey {
                app_id: manifest.id.clone(),
                window_key: window_key.to_string(),
            })?;

    Ok(WindowInstance {
        id: Uuid::new_v4(),
        instance_id,
        window_key: window_key.to_string(),
        title: manifest.window_title(window_key).to_string(),
        size: descriptor.size,
        position: descriptor.position,
        visible: false,
        minimized: false,
        maximized: false,
        focused: false,
        lifecycle: WindowLifecycle::Created,
        capabilities: descriptor.capabilities,
        component_ref: descriptor.component.clone(),
        component: ComponentState::Unresolved,
    })
}

#[cfg(test)]
mod tests {
    use super::create_window;
    use crate::app::manifest::ApplicationManifest;
    use crate::error::DesktopError;
    use crate::model::geometry::{Position, Size};
    use crate::model::window::{ComponentState, WindowLifecycle};
    use uuid::Uuid;

    fn explorer() -> ApplicationManifest {
        ApplicationManifest::from_json_str(
            r#"{
                "id": "org.necloud.explorer",
                "title": "Explorer",
                "icon": "mdi:folder",
                "category": "system-tools",
                "windows": {
                    "default": {
                        "title": "Files",
                        "component": "./components/ExplorerWindow.vue",
                        "size": { "width": 900, "height": 600 },
                        "position": { "x": 120, "y": 80 },
                        "resizable": false
                    }
                }
            }"#,
        )
        .expect("explorer manifest parse")
    }

    #[test]
    fn copies_descriptor_defaults() {
        let instance_id = Uuid::new_v4();
        let window = create_window(instance_id, &explorer(), "default").expect("window");

        assert_eq!(window.instance_id, instance_id);
        assert_eq!(window.size, Size::new(900, 600));
        assert_eq!(window.position, Position::new(120, 80));
        assert_eq!(window.title, "Files");
        assert_eq!(window.lifecycle, WindowLifecycle::Created);
        assert_eq!(window.component, ComponentState::Unresolved);
        assert_eq!(window.component_ref, "./components/ExplorerWindow.vue");
        assert!(!window.capabilities.resizable);
        assert!(window.capabilities.draggable);
        assert!(!window.visible && !window.focused);
    }

    #[test]
    fn every_window_gets_a_fresh_id() {
        let manifest = explorer();
        let instance_id = Uuid::new_v4();
        let first = create_window(instance_id, &manifest, "default").expect("window");
        let second = create_window(instance_id, &manifest, "default").expect("window");
        assert_ne!(first.id, second.id);
    }

    #[test]
    fn rejects_unknown_window_key() {
        let err = create_window(Uuid::new_v4(), &explorer(), "preferences").unwrap_err();
        assert!(matches!(
            err,
            DesktopError::UnknownWindowKey { ref window_key, .. } if window_key == "preferences"
        ));
    }
}
