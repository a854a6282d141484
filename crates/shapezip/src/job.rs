use std::path::PathBuf;

/// Default output file stem when the caller does not supply one.
pub const DEFAULT_OUTPUT_NAME: &str = "data";

/// One invocation's inputs: the features to export and the output file
/// stem. The stem is used verbatim; the caller guarantees it is
/// filesystem-safe.
#[derive(Debug, Clone)]
pub struct JobRequest<F> {
    pub features: F,
    pub name: String,
}

impl<F> JobRequest<F> {
    pub fn new(features: F) -> Self {
        Self {
            features,
            name: DEFAULT_OUTPUT_NAME.to_string(),
        }
    }

    pub fn with_name(features: F, name: impl Into<String>) -> Self {
        Self {
            features,
            name: name.into(),
        }
    }
}

/// Pipeline progress states. `Failed` is terminal and reachable from any
/// state after `Initialized`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobState {
    Initialized,
    ExportingGeometry,
    Packaging,
    ResolvingLocation,
    Completed,
    Failed,
}

/// Externally visible result of one job run. A populated `url` is the only
/// success signal the hosting layer observes; on failure it stays `None`
/// and the error text appears in the diagnostics.
#[derive(Debug)]
pub struct JobOutcome {
    pub name: String,
    pub state: JobState,
    pub archive_path: Option<PathBuf>,
    /// Server-relative URL in hosted mode, local path in standalone mode.
    pub url: Option<String>,
    pub error: Option<String>,
}

impl JobOutcome {
    pub fn success(name: &str, archive_path: PathBuf, url: String) -> Self {
        Self {
            name: name.to_string(),
            state: JobState::Completed,
            archive_path: Some(archive_path),
            url: Some(url),
            error: None,
        }
    }

    pub fn failure(name: &str, error: String) -> Self {
        Self {
            name: name.to_string(),
            state: JobState::Failed,
            archive_path: None,
            url: None,
            error: Some(error),
        }
    }

    pub fn succeeded(&self) -> bool {
        self.state == JobState::Completed
    }
}
