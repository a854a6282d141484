use serde::Deserialize;

/// Extension type name identifying the hosting protocol endpoint whose
/// online resource carries the server base URL.
pub const WPS_EXTENSION_TYPE: &str = "WPSServer";

/// The hosting server's service document. Read-only input; only the keys
/// the location resolver needs are modeled.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub service: ServiceConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServiceConfig {
    pub properties: ServiceProperties,
    #[serde(default)]
    pub extensions: Vec<ExtensionEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServiceProperties {
    #[serde(rename = "jobsVirtualDirectory")]
    pub jobs_virtual_directory: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExtensionEntry {
    #[serde(rename = "typeName")]
    pub type_name: String,
    pub properties: ExtensionProperties,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExtensionProperties {
    #[serde(rename = "onlineResource")]
    pub online_resource: String,
}

impl ServerConfig {
    /// The online resource of the WPS endpoint extension, if declared.
    pub fn wps_online_resource(&self) -> Option<&str> {
        self.service
            .extensions
            .iter()
            .find(|e| e.type_name == WPS_EXTENSION_TYPE)
            .map(|e| e.properties.online_resource.as_str())
    }
}
