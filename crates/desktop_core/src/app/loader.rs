//! Manifest loading: validation without side effects.
//!
//! Registration is a separate step, so a validation failure never leaves
//! partial registry state behind.

use crate::app::command::{build_handlers, CommandHandler};
use crate::app::manifest::{ApplicationManifest, ManifestError};
use crate::app::registry::ApplicationRegistry;
use log::{info, warn};
use std::collections::BTreeMap;
use std::path::Path;
use std::rc::Rc;

/// Manifest that passed validation, with its command table resolved.
///
/// Only constructible through [`load_manifest`].
#[derive(Debug, Clone)]
pub struct ValidatedManifest {
    manifest: Rc<ApplicationManifest>,
    handlers: BTreeMap<String, CommandHandler>,
}

impl ValidatedManifest {
    pub fn id(&self) -> &str {
        self.manifest.id.as_str()
    }

    pub fn manifest(&self) -> &ApplicationManifest {
        &self.manifest
    }

    pub fn shared(&self) -> Rc<ApplicationManifest> {
        Rc::clone(&self.manifest)
    }

    pub(crate) fn handlers(&self) -> &BTreeMap<String, CommandHandler> {
        &self.handlers
    }
}

/// Validates `manifest` against its own invariants and the current registry.
pub fn load_manifest(
    manifest: ApplicationManifest,
    registry: &ApplicationRegistry,
) -> Result<ValidatedManifest, ManifestError> {
    if let Err(err) = manifest.validate() {
        warn!(
            "event=manifest_load module=loader status=error app_id={} error={}",
            manifest.id, err
        );
        return Err(err);
    }
    if registry.is_registered(&manifest.id) {
        warn!(
            "event=manifest_load module=loader status=error app_id={} error_code=duplicate_id",
            manifest.id
        );
        return Err(ManifestError::DuplicateId(manifest.id.clone()));
    }

    let handlers = build_handlers(&manifest);
    info!(
        "event=manifest_load module=loader status=ok app_id={} windows={} commands={}",
        manifest.id,
        manifest.windows.len(),
        handlers.len()
    );
    Ok(ValidatedManifest {
        manifest: Rc::new(manifest),
        handlers,
    })
}

/// Reads, parses and validates one manifest JSON file.
pub fn load_manifest_file(
    path: impl AsRef<Path>,
    registry: &ApplicationRegistry,
) -> Result<ValidatedManifest, ManifestError> {
    let manifest = ApplicationManifest::from_json_file(path)?;
    load_manifest(manifest, registry)
}
