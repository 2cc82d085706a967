//! Core of the desktop shell: application registry and window lifecycle.
//!
//! Manifests describe applications declaratively; the [`Desktop`] facade
//! registers them, launches instances, routes commands and drives every
//! window through its lifecycle.

pub mod app;
pub mod config;
pub mod db;
pub mod desktop;
pub mod error;
pub mod events;
pub mod logging;
pub mod model;
pub mod session;
pub mod window;

pub use app::command::{CommandContext, CommandHandler};
pub use app::loader::{load_manifest, load_manifest_file, ValidatedManifest};
pub use app::manifest::{
    ApplicationManifest, CommandDecl, EntryDescriptor, EntryVisibility, ManifestError,
    WindowDescriptor,
};
pub use app::registry::{ApplicationRegistry, LauncherEntry};
pub use config::{ConfigError, DesktopConfig};
pub use db::{open_db, open_db_in_memory, DbError, DbResult};
pub use desktop::{CloseOutcome, Desktop, DesktopOptions};
pub use error::{DesktopError, DesktopResult};
pub use events::{DesktopEvent, SubscriptionId};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::geometry::{Position, Size};
pub use model::instance::{ApplicationInstanceHandle, InstanceState};
pub use model::window::{
    ComponentState, InstanceId, ResolvedComponent, WindowCapabilities, WindowId, WindowInstance,
    WindowLifecycle,
};
pub use session::{LayoutStore, SessionError, SqliteLayoutStore, WindowLayout};
pub use window::component::{
    ComponentResolutionError, ComponentResolver, ResolveOutcome, ResolveTicket,
    StaticComponentResolver,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
