//! End-to-end pipeline runs against a real scratch directory: export a
//! feature set through a stand-in exporter, package it, and check the
//! reported location in both standalone and hosted layouts.

use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use tempfile::TempDir;

use shapezip::{
    DiagnosticsSink, ExportError, GeometryExporter, JobConfig, JobRequest, JobState, NoopSink,
    Pipeline, Severity, SHAPEFILE_EXTENSIONS,
};

type PointSet = Vec<(f64, f64)>;

struct FakeExporter;

impl GeometryExporter<PointSet> for FakeExporter {
    fn export(&self, features: &PointSet, target: &Path, _overwrite: bool) -> Result<(), ExportError> {
        let stem = target.file_stem().unwrap().to_str().unwrap().to_string();
        let dir = target.parent().unwrap();
        for ext in SHAPEFILE_EXTENSIONS {
            let path = dir.join(format!("{}.{}", stem, ext));
            std::fs::write(&path, format!("{}: {} features", ext, features.len()))
                .map_err(|e| ExportError::Write { path, source: e })?;
        }
        Ok(())
    }
}

struct BrokenExporter;

impl GeometryExporter<PointSet> for BrokenExporter {
    fn export(&self, _: &PointSet, _: &Path, _: bool) -> Result<(), ExportError> {
        Err(ExportError::Collaborator(
            "feature class is corrupt\nno geometry column".to_string(),
        ))
    }
}

struct RecordingSink {
    messages: Mutex<Vec<(Severity, String)>>,
}

impl RecordingSink {
    fn new() -> Self {
        Self {
            messages: Mutex::new(Vec::new()),
        }
    }

    fn at(&self, severity: Severity) -> Vec<String> {
        self.messages
            .lock()
            .unwrap()
            .iter()
            .filter(|(s, _)| *s == severity)
            .map(|(_, m)| m.clone())
            .collect()
    }
}

impl DiagnosticsSink for RecordingSink {
    fn emit(&self, severity: Severity, message: &str) {
        self.messages
            .lock()
            .unwrap()
            .push((severity, message.to_string()));
    }
}

fn points() -> PointSet {
    vec![(7.44, 46.95), (8.54, 47.37), (6.14, 46.20)]
}

fn archive_entries(path: &Path) -> Vec<String> {
    let mut archive = zip::ZipArchive::new(File::open(path).unwrap()).unwrap();
    (0..archive.len())
        .map(|i| archive.by_index(i).unwrap().name().to_string())
        .collect()
}

/// Hosted layout: a service document two levels above the job directory,
/// which itself sits under the server's jobs root.
fn hosted_workdir(tmp: &TempDir) -> PathBuf {
    let jobs_root = tmp.path().join("arcgisjobs");
    let workdir = jobs_root.join("svc").join("12345");
    std::fs::create_dir_all(&workdir).unwrap();
    std::fs::write(
        jobs_root.join("server.json"),
        r#"{
            "service": {
                "properties": { "jobsVirtualDirectory": "/jobs" },
                "extensions": [
                    {
                        "typeName": "WPSServer",
                        "properties": {
                            "onlineResource": "https://host/arcgis/services/svc/WPSServer"
                        }
                    }
                ]
            }
        }"#,
    )
    .unwrap();
    workdir
}

#[test]
fn test_standalone_job_produces_path_and_archive() {
    let tmp = TempDir::new().unwrap();
    let pipeline = Pipeline::new(FakeExporter, JobConfig::new(tmp.path()), Arc::new(NoopSink));
    assert!(pipeline.server_binding().is_none());

    let outcome = pipeline.run(JobRequest::new(points()));

    assert!(outcome.succeeded(), "job failed: {:?}", outcome.error);
    let expected = tmp.path().join("data.zip");
    assert_eq!(outcome.url.unwrap(), expected.display().to_string());
    assert_eq!(
        archive_entries(&expected),
        vec!["data.shp", "data.shx", "data.dbf", "data.prj"]
    );
}

#[test]
fn test_hosted_job_produces_url() {
    let tmp = TempDir::new().unwrap();
    let workdir = hosted_workdir(&tmp);

    let sink = Arc::new(RecordingSink::new());
    let pipeline = Pipeline::new(
        FakeExporter,
        JobConfig::new(&workdir),
        Arc::clone(&sink) as Arc<dyn DiagnosticsSink>,
    );
    assert!(pipeline.server_binding().is_some());

    let outcome = pipeline.run(JobRequest::new(points()));

    assert!(outcome.succeeded(), "job failed: {:?}", outcome.error);
    // Jobs-root component is stripped from the reported route
    assert_eq!(
        outcome.url.unwrap(),
        "https://host/arcgis/jobs/svc/12345/data.zip"
    );
    assert!(workdir.join("data.zip").exists());
    assert!(sink.at(Severity::Warning).is_empty());
}

#[test]
fn test_export_failure_leaves_no_archive_and_no_url() {
    let tmp = TempDir::new().unwrap();
    let sink = Arc::new(RecordingSink::new());
    let pipeline = Pipeline::new(
        BrokenExporter,
        JobConfig::new(tmp.path()),
        Arc::clone(&sink) as Arc<dyn DiagnosticsSink>,
    );

    let outcome = pipeline.run(JobRequest::new(points()));

    assert_eq!(outcome.state, JobState::Failed);
    assert!(outcome.url.is_none());
    assert!(!tmp.path().join("data.zip").exists());

    let fatals = sink.at(Severity::Fatal);
    assert_eq!(fatals.len(), 1);
    assert!(fatals[0].contains("feature class is corrupt"));
    assert!(!fatals[0].contains('\n'));
}

#[test]
fn test_rerun_with_same_name_is_idempotent() {
    let tmp = TempDir::new().unwrap();
    let pipeline = Pipeline::new(FakeExporter, JobConfig::new(tmp.path()), Arc::new(NoopSink));

    let first = pipeline.run(JobRequest::new(points()));
    let second = pipeline.run(JobRequest::new(points()));

    assert!(first.succeeded());
    assert!(second.succeeded());
    assert_eq!(first.url.unwrap(), second.url.unwrap());
    assert_eq!(archive_entries(&tmp.path().join("data.zip")).len(), 4);
}

#[test]
fn test_malformed_hosting_config_degrades_to_path() {
    let tmp = TempDir::new().unwrap();
    let jobs_root = tmp.path().join("arcgisjobs");
    let workdir = jobs_root.join("svc").join("12345");
    std::fs::create_dir_all(&workdir).unwrap();
    std::fs::write(jobs_root.join("server.json"), "{ truncated").unwrap();

    let sink = Arc::new(RecordingSink::new());
    let pipeline = Pipeline::new(
        FakeExporter,
        JobConfig::new(&workdir),
        Arc::clone(&sink) as Arc<dyn DiagnosticsSink>,
    );
    assert!(pipeline.server_binding().is_none());
    assert_eq!(sink.at(Severity::Warning).len(), 1);

    let outcome = pipeline.run(JobRequest::with_name(points(), "export"));

    assert!(outcome.succeeded());
    assert_eq!(
        outcome.url.unwrap(),
        workdir.join("export.zip").display().to_string()
    );
}
