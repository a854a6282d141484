//! shapezip — packages feature collections into zipped shapefile archives
//! and reports where the result can be retrieved.
//!
//! One synchronous job per invocation: export the features as a four-file
//! shapefile set into the job's working directory, package the set into
//! `<name>.zip`, then report either a hosting-server URL (when a server
//! configuration is resolvable two levels above the working directory) or
//! the archive's local path.

pub mod archive;
pub mod binding;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod export;
pub mod job;
pub mod pipeline;

pub use archive::ArchiveBuilder;
pub use binding::{resolve_location, try_resolve_server_binding, ServerBinding};
pub use config::{load_config, load_config_from_str, ServerConfig};
pub use diagnostics::{ConsoleSink, DiagnosticsSink, HostCallbackSink, NoopSink, Severity};
pub use error::{ArchiveError, ConfigError, ExportError, Result, ShapezipError};
pub use export::{GeometryExporter, SHAPEFILE_EXTENSIONS};
pub use job::{JobOutcome, JobRequest, JobState, DEFAULT_OUTPUT_NAME};
pub use pipeline::{JobConfig, Pipeline, PipelineError};
