//! Seam to the hosting platform's geometry-export routine.
//!
//! Geometry encoding itself lives in the host; this crate only fixes the
//! file-set contract the exporter must satisfy and hands the result to the
//! archive step.

use std::path::{Path, PathBuf};

use crate::error::ExportError;

/// File extensions of the four-member shapefile set, in packaging order:
/// geometry, index, attributes, projection.
pub const SHAPEFILE_EXTENSIONS: [&str; 4] = ["shp", "shx", "dbf", "prj"];

/// Paths of the sibling files a geometry export produces for `name`.
pub fn shapefile_members(directory: &Path, name: &str) -> [PathBuf; 4] {
    SHAPEFILE_EXTENSIONS.map(|ext| directory.join(format!("{}.{}", name, ext)))
}

/// Geometry-export collaborator supplied by the hosting platform.
///
/// `export` writes the full shapefile set for `features` next to `target`
/// (the `.shp` path) and fails if any member cannot be written. The feature
/// type `F` is opaque to this crate. `overwrite` carries the host's
/// overwrite-output setting.
pub trait GeometryExporter<F>: Send + Sync {
    fn export(&self, features: &F, target: &Path, overwrite: bool) -> Result<(), ExportError>;
}
