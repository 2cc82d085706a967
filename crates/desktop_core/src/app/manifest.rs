//! Application manifest declaration and validation.
//!
//! # Responsibility
//! - Describe one desktop application declaratively (entries, window
//!   templates, command table).
//! - Validate declaration-level invariants before anything is registered.
//!
//! # Invariants
//! - `id` is reverse-DNS style: lowercase `[a-z0-9-]` segments joined by `.`.
//! - Every entry command and `on_launch` command exists in `commands`.
//! - Every window referenced by a declared command exists in `windows`.
//! - Descriptor geometry is non-negative.

use crate::app::command::CommandHandler;
use crate::model::geometry::{Position, Size};
use crate::model::window::WindowCapabilities;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::Path;

static APP_ID_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-z0-9]+(-[a-z0-9]+)*(\.[a-z0-9]+(-[a-z0-9]+)*)+$").expect("valid app id regex")
});
static ICON_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z0-9]+([:-][a-z0-9]+)+$").expect("valid icon regex"));

/// Launcher visibility of one entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryVisibility {
    #[default]
    Primary,
    Secondary,
    Hidden,
}

/// Launcher entry pointing at one command.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EntryDescriptor {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Key into the manifest's `commands` table.
    pub command: String,
    #[serde(default)]
    pub visibility: EntryVisibility,
}

/// Immutable template for window instances.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct WindowDescriptor {
    /// Falls back to the manifest title when absent.
    #[serde(default)]
    pub title: Option<String>,
    pub size: Size,
    pub position: Position,
    #[serde(flatten)]
    pub capabilities: WindowCapabilities,
    /// Deferred view reference, resolved only when the window is rendered.
    pub component: String,
}

/// Command body as declared by a manifest.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum CommandDecl {
    /// `app.openWindow(window)`.
    OpenWindow { window: String },
    /// Programmatic handler; never read from manifest documents.
    #[serde(skip)]
    Custom(CommandHandler),
}

impl CommandDecl {
    /// Window key statically referenced by this command, if any.
    pub fn referenced_window(&self) -> Option<&str> {
        match self {
            Self::OpenWindow { window } => Some(window.as_str()),
            Self::Custom(_) => None,
        }
    }
}

/// Declarative application manifest.
#[derive(Debug, Clone, Deserialize)]
pub struct ApplicationManifest {
    /// Stable application identifier, e.g. `org.necloud.notes`.
    pub id: String,
    pub title: String,
    /// Icon name in `set:name` form, e.g. `mdi:cog`.
    pub icon: String,
    pub category: String,
    /// At most one live instance when set.
    #[serde(default)]
    pub singleton: bool,
    #[serde(default)]
    pub entries: BTreeMap<String, EntryDescriptor>,
    pub windows: BTreeMap<String, WindowDescriptor>,
    #[serde(default)]
    pub commands: BTreeMap<String, CommandDecl>,
    /// Command run when an instance is created without an entry.
    #[serde(default)]
    pub on_launch: Option<String>,
}

impl ApplicationManifest {
    /// Parses one manifest from a JSON document.
    pub fn from_json_str(text: &str) -> Result<Self, ManifestError> {
        serde_json::from_str(text).map_err(|err| ManifestError::Parse(err.to_string()))
    }

    /// Reads and parses one manifest JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ManifestError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|err| ManifestError::Io {
            path: path.display().to_string(),
            message: err.to_string(),
        })?;
        Self::from_json_str(&text)
    }

    /// Adds or replaces a programmatic command handler.
    pub fn with_command(mut self, name: impl Into<String>, handler: CommandHandler) -> Self {
        self.commands
            .insert(name.into(), CommandDecl::Custom(handler));
        self
    }

    /// Returns the window title for `window_key`, falling back to the app title.
    pub fn window_title(&self, window_key: &str) -> &str {
        self.windows
            .get(window_key)
            .and_then(|descriptor| descriptor.title.as_deref())
            .unwrap_or(self.title.as_str())
    }

    /// Validates declaration-level manifest invariants.
    pub fn validate(&self) -> Result<(), ManifestError> {
        let id = self.id.trim();
        if id.is_empty() {
            return Err(ManifestError::EmptyId);
        }
        if id != self.id || !APP_ID_RE.is_match(id) {
            return Err(ManifestError::InvalidId(self.id.clone()));
        }
        if self.title.trim().is_empty() {
            return Err(ManifestError::EmptyField("title"));
        }
        if self.category.trim().is_empty() {
            return Err(ManifestError::EmptyField("category"));
        }
        if !ICON_RE.is_match(self.icon.trim()) {
            return Err(ManifestError::InvalidIcon(self.icon.clone()));
        }

        if self.windows.is_empty() {
            return Err(ManifestError::MissingWindows);
        }
        for (key, descriptor) in &self.windows {
            if !descriptor.size.is_non_negative() {
                return Err(ManifestError::NegativeGeometry {
                    window: key.clone(),
                    field: "size",
                });
            }
            if !descriptor.position.is_non_negative() {
                return Err(ManifestError::NegativeGeometry {
                    window: key.clone(),
                    field: "position",
                });
            }
            if descriptor.component.trim().is_empty() {
                return Err(ManifestError::EmptyComponent(key.clone()));
            }
        }

        for (name, command) in &self.commands {
            if let Some(window) = command.referenced_window() {
                if !self.windows.contains_key(window) {
                    return Err(ManifestError::UnknownCommandWindow {
                        command: name.clone(),
                        window: window.to_string(),
                    });
                }
            }
        }

        for (key, entry) in &self.entries {
            if entry.title.trim().is_empty() {
                return Err(ManifestError::EmptyEntryTitle(key.clone()));
            }
            if !self.commands.contains_key(entry.command.as_str()) {
                return Err(ManifestError::UnknownEntryCommand {
                    entry: key.clone(),
                    command: entry.command.clone(),
                });
            }
        }

        if let Some(command) = &self.on_launch {
            if !self.commands.contains_key(command.as_str()) {
                return Err(ManifestError::UnknownLaunchCommand(command.clone()));
            }
        }
        Ok(())
    }
}

/// Manifest parse and validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ManifestError {
    Parse(String),
    Io {
        path: String,
        message: String,
    },
    EmptyId,
    InvalidId(String),
    DuplicateId(String),
    EmptyField(&'static str),
    InvalidIcon(String),
    MissingWindows,
    NegativeGeometry {
        window: String,
        field: &'static str,
    },
    EmptyComponent(String),
    EmptyEntryTitle(String),
    UnknownEntryCommand {
        entry: String,
        command: String,
    },
    UnknownCommandWindow {
        command: String,
        window: String,
    },
    UnknownLaunchCommand(String),
}

impl Display for ManifestError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse(message) => write!(f, "manifest could not be parsed: {message}"),
            Self::Io { path, message } => {
                write!(f, "manifest file `{path}` could not be read: {message}")
            }
            Self::EmptyId => write!(f, "manifest id must not be empty"),
            Self::InvalidId(value) => write!(
                f,
                "manifest id is invalid: {value} (expected reverse-DNS, e.g. org.example.app)"
            ),
            Self::DuplicateId(value) => write!(f, "application id already registered: {value}"),
            Self::EmptyField(name) => write!(f, "manifest field `{name}` must not be empty"),
            Self::InvalidIcon(value) => write!(f, "manifest icon is invalid: {value}"),
            Self::MissingWindows => write!(f, "manifest must declare at least one window"),
            Self::NegativeGeometry { window, field } => {
                write!(f, "window `{window}` has negative {field}")
            }
            Self::EmptyComponent(window) => {
                write!(f, "window `{window}` has an empty component reference")
            }
            Self::EmptyEntryTitle(entry) => write!(f, "entry `{entry}` has an empty title"),
            Self::UnknownEntryCommand { entry, command } => {
                write!(f, "entry `{entry}` references unknown command `{command}`")
            }
            Self::UnknownCommandWindow { command, window } => {
                write!(f, "command `{command}` references unknown window `{window}`")
            }
            Self::UnknownLaunchCommand(command) => {
                write!(f, "on_launch references unknown command `{command}`")
            }
        }
    }
}

impl Error for ManifestError {}

#[cfg(test)]
mod tests {
    use super::{ApplicationManifest, EntryDescriptor, EntryVisibility, ManifestError};
    use crate::app::command::CommandHandler;

    const SETTINGS_JSON: &str = r#"{
        "id": "org.necloud.settings",
        "title": "Settings",
        "icon": "mdi:cog",
        "category": "system-tools",
        "singleton": true,
        "entries": {
            "main": {
                "title": "Settings",
                "description": "System preferences and appearance",
                "command": "open-settings",
                "visibility": "primary"
            }
        },
        "windows": {
            "main": {
                "component": "./components/SettingsWindow.vue",
                "size": { "width": 760, "height": 560 },
                "position": { "x": 160, "y": 110 },
                "minimizable": true,
                "maximizable": true,
                "destroyable": true,
                "draggable": true,
                "resizable": true
            }
        },
        "commands": {
            "open-settings": { "action": "open_window", "window": "main" }
        }
    }"#;

    fn settings() -> ApplicationManifest {
        ApplicationManifest::from_json_str(SETTINGS_JSON).expect("settings manifest parse")
    }

    #[test]
    fn validates_settings_manifest() {
        let manifest = settings();
        manifest.validate().expect("settings manifest should validate");
        assert!(manifest.singleton);
        assert_eq!(manifest.entries["main"].visibility, EntryVisibility::Primary);
        assert_eq!(manifest.window_title("main"), "Settings");
    }

    #[test]
    fn entry_visibility_and_description_are_optional() {
        let entry: EntryDescriptor =
            serde_json::from_str(r#"{"title": "Notes", "command": "open-notes"}"#)
                .expect("entry parse");
        assert_eq!(entry.description, None);
        assert_eq!(entry.visibility, EntryVisibility::Primary);
    }

    #[test]
    fn rejects_invalid_id_format() {
        let mut manifest = settings();
        manifest.id = "Settings App".to_string();
        let err = manifest.validate().unwrap_err();
        assert!(matches!(err, ManifestError::InvalidId(_)));

        manifest.id = "settings".to_string();
        let err = manifest.validate().unwrap_err();
        assert!(matches!(err, ManifestError::InvalidId(_)));
    }

    #[test]
    fn rejects_entry_with_unknown_command() {
        let mut manifest = settings();
        manifest
            .entries
            .get_mut("main")
            .expect("main entry")
            .command = "open-nothing".to_string();
        let err = manifest.validate().unwrap_err();
        assert_eq!(
            err,
            ManifestError::UnknownEntryCommand {
                entry: "main".to_string(),
                command: "open-nothing".to_string(),
            }
        );
    }

    #[test]
    fn rejects_command_with_unknown_window() {
        let json = SETTINGS_JSON.replace(
            r#""window": "main" }"#,
            r#""window": "preferences" }"#,
        );
        let manifest = ApplicationManifest::from_json_str(&json).expect("manifest parse");
        let err = manifest.validate().unwrap_err();
        assert!(matches!(err, ManifestError::UnknownCommandWindow { .. }));
    }

    #[test]
    fn rejects_negative_geometry() {
        let mut manifest = settings();
        manifest.windows.get_mut("main").expect("main window").size.width = -5;
        let err = manifest.validate().unwrap_err();
        assert_eq!(
            err,
            ManifestError::NegativeGeometry {
                window: "main".to_string(),
                field: "size",
            }
        );
    }

    #[test]
    fn rejects_unknown_on_launch_command() {
        let mut manifest = settings();
        manifest.on_launch = Some("boot".to_string());
        let err = manifest.validate().unwrap_err();
        assert_eq!(err, ManifestError::UnknownLaunchCommand("boot".to_string()));
    }

    #[test]
    fn custom_handlers_satisfy_entry_references() {
        let mut manifest = settings();
        manifest.commands.clear();
        let manifest =
            manifest.with_command("open-settings", CommandHandler::new(|_ctx, _args| Ok(())));
        manifest.validate().expect("custom handler should satisfy entry");
    }

    #[test]
    fn reports_parse_errors() {
        let err = ApplicationManifest::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, ManifestError::Parse(_)));
    }
}
