//! Hosting-server detection and result-location translation.
//!
//! At job construction the pipeline probes for the hosting server's service
//! document; when it is present and usable, finished archives are reported
//! as URLs under the server's jobs virtual directory instead of local paths.
//! Every probe failure degrades to standalone mode, never aborts.

use std::path::{Component, Path, PathBuf};

use tracing::debug;

use crate::config::{self, ServerConfig};
use crate::diagnostics::DiagnosticsSink;

/// File name of the hosting server's service document, probed two levels
/// above the job working directory.
pub const HOSTING_CONFIG_FILE: &str = "server.json";

/// Path component the hosting server inserts above its job directories.
/// It is part of the on-disk layout but not of the public URL, so it is
/// dropped during translation. Environment-specific; if the hosting
/// platform renames its jobs root this constant must follow.
pub const JOBS_ROOT_TOKEN: &str = "arcgisjobs";

/// Marker separating the server base URL from service-specific routes in
/// an extension's online resource.
const SERVICES_MARKER: &str = "/services/";

/// Resolved hosting context: the base URL under which job outputs are
/// reachable. Absent binding means standalone mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerBinding {
    server_base_url: String,
}

impl ServerBinding {
    /// Combines an endpoint online resource with the jobs virtual
    /// directory. Returns `None` when the resource lacks the `/services/`
    /// marker that delimits the base URL.
    pub fn new(online_resource: &str, jobs_virtual_directory: &str) -> Option<Self> {
        let base = &online_resource[..online_resource.find(SERVICES_MARKER)?];
        let vdir = jobs_virtual_directory.trim_end_matches('/');

        let server_base_url = if vdir.starts_with('/') {
            format!("{}{}", base, vdir)
        } else {
            format!("{}/{}", base, vdir)
        };

        Some(Self { server_base_url })
    }

    pub fn from_config(config: &ServerConfig) -> Option<Self> {
        let online_resource = config.wps_online_resource()?;
        Self::new(
            online_resource,
            &config.service.properties.jobs_virtual_directory,
        )
    }

    pub fn server_base_url(&self) -> &str {
        &self.server_base_url
    }
}

/// `<working_directory>/../../server.json`, when the directory is deep
/// enough to have a grandparent.
pub fn hosting_config_path(working_directory: &Path) -> Option<PathBuf> {
    working_directory
        .ancestors()
        .nth(2)
        .map(|dir| dir.join(HOSTING_CONFIG_FILE))
}

/// Probes for a hosting-server configuration. Any failure along the way
/// (missing document, malformed JSON, no WPS endpoint, unusable online
/// resource) is reported as a warning through `sink` and yields `None`;
/// the job then runs in standalone mode.
pub fn try_resolve_server_binding(
    working_directory: &Path,
    sink: &dyn DiagnosticsSink,
) -> Option<ServerBinding> {
    let Some(config_path) = hosting_config_path(working_directory) else {
        sink.warning("Working directory has no grandparent, reporting local paths");
        return None;
    };

    if !config_path.exists() {
        sink.warning(&format!(
            "No hosting configuration at '{}', reporting local paths",
            config_path.display()
        ));
        return None;
    }

    let config = match config::load_config(&config_path) {
        Ok(config) => config,
        Err(e) => {
            sink.warning(&format!(
                "Hosting configuration unusable, reporting local paths: {}",
                e
            ));
            return None;
        }
    };

    match ServerBinding::from_config(&config) {
        Some(binding) => {
            debug!("Resolved server base URL {}", binding.server_base_url());
            Some(binding)
        }
        None => {
            sink.warning(
                "Hosting configuration has no usable WPSServer endpoint, reporting local paths",
            );
            None
        }
    }
}

/// Translates a finished archive into the location reported to the caller.
///
/// With a server binding, the last three working-directory segments (minus
/// the jobs-root component) become the URL route under the server base.
/// Without one, the location is the archive's local filesystem path.
pub fn resolve_location(
    binding: Option<&ServerBinding>,
    working_directory: &Path,
    archive_name: &str,
) -> String {
    let Some(binding) = binding else {
        return working_directory.join(archive_name).display().to_string();
    };

    let segments: Vec<&str> = working_directory
        .components()
        .filter_map(|component| match component {
            Component::Normal(segment) => segment.to_str(),
            _ => None,
        })
        .collect();

    let tail_start = segments.len().saturating_sub(3);
    let route: Vec<&str> = segments[tail_start..]
        .iter()
        .copied()
        .filter(|segment| *segment != JOBS_ROOT_TOKEN)
        .collect();

    if route.is_empty() {
        format!("{}/{}", binding.server_base_url(), archive_name)
    } else {
        format!(
            "{}/{}/{}",
            binding.server_base_url(),
            route.join("/"),
            archive_name
        )
    }
}
