pub mod config;
pub mod context;
pub mod error;
pub mod runner;

pub use config::JobConfig;
pub use context::JobContext;
pub use error::PipelineError;
pub use runner::Pipeline;
