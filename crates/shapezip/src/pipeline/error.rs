use thiserror::Error;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Geometry export failed: {0}")]
    Export(#[from] crate::error::ExportError),

    #[error("Packaging failed: {0}")]
    Package(#[from] crate::error::ArchiveError),
}
