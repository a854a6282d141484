use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ShapezipError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Export error: {0}")]
    Export(#[from] ExportError),

    #[error("Archive error: {0}")]
    Archive(#[from] ArchiveError),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config JSON: {0}")]
    ParseJson(#[from] serde_json::Error),

    #[error("Config validation failed: {message}")]
    Validation { message: String },
}

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Failed to write shapefile '{path}': {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Geometry export failed: {0}")]
    Collaborator(String),
}

#[derive(Error, Debug)]
pub enum ArchiveError {
    #[error("Expected shapefile member is missing: '{0}'")]
    MissingMember(PathBuf),

    #[error("Expected shapefile member is empty: '{0}'")]
    EmptyMember(PathBuf),

    #[error("Failed to read archive member '{path}': {source}")]
    ReadMember {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to create archive '{path}': {source}")]
    CreateArchive {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write archive entry '{name}': {source}")]
    WriteEntry {
        name: String,
        #[source]
        source: zip::result::ZipError,
    },

    #[error("Failed to finish archive '{path}': {source}")]
    FinishArchive {
        path: PathBuf,
        #[source]
        source: zip::result::ZipError,
    },
}

pub type Result<T> = std::result::Result<T, ShapezipError>;
