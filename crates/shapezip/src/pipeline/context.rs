use std::path::PathBuf;

use crate::job::JobState;

pub struct JobContext {
    pub name: String,
    pub state: JobState,

    // Stage 1 result — guaranteed Some after step_export
    pub shapefile_path: Option<PathBuf>,

    // Stage 2 result — guaranteed Some after step_package
    pub archive_path: Option<PathBuf>,

    // Stage 3 result — guaranteed Some after step_resolve_location
    pub location: Option<String>,
}

impl JobContext {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            state: JobState::Initialized,
            shapefile_path: None,
            archive_path: None,
            location: None,
        }
    }
}
