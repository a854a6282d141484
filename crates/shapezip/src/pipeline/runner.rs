use std::sync::Arc;

use tracing::{debug, info_span};

use crate::archive::ArchiveBuilder;
use crate::binding::{self, ServerBinding};
use crate::diagnostics::{single_line, DiagnosticsSink};
use crate::export::GeometryExporter;
use crate::job::{JobOutcome, JobRequest, JobState};

use super::config::JobConfig;
use super::context::JobContext;
use super::error::PipelineError;

pub struct Pipeline<E> {
    exporter: E,
    config: JobConfig,
    archive: ArchiveBuilder,
    binding: Option<ServerBinding>,
    sink: Arc<dyn DiagnosticsSink>,
}

impl<E> Pipeline<E> {
    /// Production constructor — probes the hosting configuration once.
    /// A failed probe degrades to standalone mode, never to an error.
    pub fn new(exporter: E, config: JobConfig, sink: Arc<dyn DiagnosticsSink>) -> Self {
        let binding = binding::try_resolve_server_binding(&config.working_directory, sink.as_ref());
        Self::with_binding(exporter, config, binding, sink)
    }

    /// Constructor with a pre-resolved binding — inject a specific hosting
    /// context without a configuration document on disk.
    pub fn with_binding(
        exporter: E,
        config: JobConfig,
        binding: Option<ServerBinding>,
        sink: Arc<dyn DiagnosticsSink>,
    ) -> Self {
        let archive = ArchiveBuilder::new(&config.working_directory);
        Self {
            exporter,
            config,
            archive,
            binding,
            sink,
        }
    }

    pub fn server_binding(&self) -> Option<&ServerBinding> {
        self.binding.as_ref()
    }

    /// Runs one job to completion. Stage failures are logged at fatal
    /// severity on a single line and swallowed into a failed outcome;
    /// nothing propagates to the hosting invocation layer.
    pub fn run<F>(&self, request: JobRequest<F>) -> JobOutcome
    where
        E: GeometryExporter<F>,
    {
        let mut ctx = JobContext::new(&request.name);
        let _job_span = info_span!("job", name = %ctx.name).entered();

        {
            let _stage = info_span!("export_geometry").entered();
            ctx.state = JobState::ExportingGeometry;
            if let Err(e) = self.step_export(&request.features, &mut ctx) {
                return self.fail(&ctx.name, e);
            }
        }

        {
            let _stage = info_span!("package").entered();
            ctx.state = JobState::Packaging;
            if let Err(e) = self.step_package(&mut ctx) {
                return self.fail(&ctx.name, e);
            }
        }

        {
            let _stage = info_span!("resolve_location").entered();
            ctx.state = JobState::ResolvingLocation;
            self.step_resolve_location(&mut ctx);
        }

        ctx.state = JobState::Completed;
        let archive_path = ctx.archive_path.expect("archive path set during packaging");
        let location = ctx.location.expect("location set during resolution");

        self.sink.info(&format!("Result location: {}", location));

        JobOutcome::success(&ctx.name, archive_path, location)
    }

    fn fail(&self, name: &str, error: PipelineError) -> JobOutcome {
        let message = single_line(&error.to_string());
        self.sink.fatal(&message);
        JobOutcome::failure(name, message)
    }

    fn step_export<F>(&self, features: &F, ctx: &mut JobContext) -> Result<(), PipelineError>
    where
        E: GeometryExporter<F>,
    {
        let target = self
            .config
            .working_directory
            .join(format!("{}.shp", ctx.name));

        self.exporter
            .export(features, &target, self.config.overwrite_output)?;

        debug!("Exported feature set to {}", target.display());
        ctx.shapefile_path = Some(target);
        Ok(())
    }

    fn step_package(&self, ctx: &mut JobContext) -> Result<(), PipelineError> {
        let archive_path = self.archive.build(&ctx.name)?;
        debug!(
            "Packaged shapefile set into {}",
            archive_path.display()
        );
        ctx.archive_path = Some(archive_path);
        Ok(())
    }

    fn step_resolve_location(&self, ctx: &mut JobContext) {
        let archive_name = format!("{}.zip", ctx.name);
        let location = binding::resolve_location(
            self.binding.as_ref(),
            &self.config.working_directory,
            &archive_name,
        );
        ctx.location = Some(location);
    }
}
