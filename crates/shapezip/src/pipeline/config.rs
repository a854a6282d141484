use std::path::{Path, PathBuf};

/// Host execution context for one job, passed explicitly so the pipeline
/// is testable without a real hosting environment.
#[derive(Debug, Clone)]
pub struct JobConfig {
    /// Scratch directory exclusive to this job for its full duration.
    pub working_directory: PathBuf,
    /// The host's overwrite-output setting, forwarded to the exporter.
    pub overwrite_output: bool,
}

impl JobConfig {
    pub fn new<P: AsRef<Path>>(working_directory: P) -> Self {
        Self {
            working_directory: working_directory.as_ref().to_path_buf(),
            overwrite_output: true,
        }
    }

    pub fn with_overwrite<P: AsRef<Path>>(working_directory: P, overwrite_output: bool) -> Self {
        Self {
            working_directory: working_directory.as_ref().to_path_buf(),
            overwrite_output,
        }
    }
}
