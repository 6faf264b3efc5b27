//! Entity definitions synthesized by the review-fix pass
//!
//! The bundled catalog holds the Time & Attendance entities the original
//! ontology was missing (holiday calendars, clock events, timesheets, ...).
//! A different catalog file can be supplied through `fix.catalog_path`.

use once_cell::sync::OnceCell;
use std::path::Path;

use crate::model::EntityDocument;
use crate::{yaml_io, Result};

const BUNDLED: &str = include_str!("../catalog/time-attendance-additions.yaml");

static BUNDLED_CATALOG: OnceCell<EntityDocument> = OnceCell::new();

/// The catalog compiled into the crate, parsed on first use
pub fn bundled() -> Result<&'static EntityDocument> {
    BUNDLED_CATALOG.get_or_try_init(|| {
        yaml_io::parse_yaml(BUNDLED, Path::new("catalog/time-attendance-additions.yaml"))
    })
}

/// Load `path` when given, otherwise the bundled catalog
pub fn load(path: Option<&Path>) -> Result<EntityDocument> {
    match path {
        Some(path) => {
            log::info!("Loading entity catalog from {}", path.display());
            yaml_io::load_yaml(path)
        }
        None => bundled().cloned(),
    }
}
