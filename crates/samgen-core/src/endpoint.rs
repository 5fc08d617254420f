//! Endpoint discovery and the validated endpoint catalog.
//!
//! Endpoints come from an [`EndpointSource`]. Two sources are provided:
//!
//! - [`EndpointRegistry`]: endpoints declared in code, either as a static
//!   slice of [`EndpointDef`] literals or through the builder methods.
//! - [`EndpointManifest`]: an endpoint manifest file (JSON or YAML) shipped
//!   alongside the deployable artifact.
//!
//! Either way the result goes through [`EndpointCatalog::from_source`], which
//! rejects names that cannot form resource identifiers and duplicate names.
//!
//! # Examples
//!
//! ```
//! use samgen_core::endpoint::{EndpointCatalog, EndpointDef, EndpointRegistry};
//!
//! static ENDPOINTS: &[EndpointDef] = &[
//!     EndpointDef { name: "SOAPProxy", path: Some("MapMEWebServices.asmx") },
//!     EndpointDef { name: "CheckStatus", path: None },
//! ];
//!
//! let catalog = EndpointCatalog::from_source(&EndpointRegistry::from_static(ENDPOINTS)).unwrap();
//! assert_eq!(catalog.len(), 2);
//! assert_eq!(catalog.endpoints()[1].route_path, "CheckStatus");
//! ```

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tokio::fs;

use crate::naming;
use crate::{Error, Result};

/// A named, independently routable unit of deployable logic
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Endpoint {
    /// Entry point name, the stem of every derived resource id
    pub name: String,
    /// API path segment the endpoint is mounted on
    pub route_path: String,
}

impl Endpoint {
    /// Endpoint whose route path is its name
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            route_path: name.clone(),
            name,
        }
    }

    /// Endpoint with explicit routing metadata
    pub fn with_path(name: impl Into<String>, route_path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            route_path: route_path.into(),
        }
    }

    fn validate(&self) -> Result<()> {
        if !naming::is_identifier(&self.name) {
            return Err(Error::invalid_endpoint(
                &self.name,
                "name must start with a letter and contain only ASCII letters and digits",
            ));
        }
        if self.route_path.trim().is_empty() {
            return Err(Error::invalid_endpoint(&self.name, "route path is empty"));
        }
        if self.route_path.contains('/') {
            return Err(Error::invalid_endpoint(
                &self.name,
                format!("route path '{}' must be a single segment", self.route_path),
            ));
        }
        Ok(())
    }
}

/// Anything that can yield the list of endpoints to deploy
pub trait EndpointSource {
    fn endpoints(&self) -> Result<Vec<Endpoint>>;
}

/// Static declaration of one endpoint. `path` defaults to `name`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EndpointDef {
    pub name: &'static str,
    pub path: Option<&'static str>,
}

impl From<&EndpointDef> for Endpoint {
    fn from(def: &EndpointDef) -> Self {
        match def.path {
            Some(path) => Endpoint::with_path(def.name, path),
            None => Endpoint::new(def.name),
        }
    }
}

/// Endpoints registered in code, in registration order
#[derive(Debug, Clone, Default)]
pub struct EndpointRegistry {
    entries: Vec<Endpoint>,
}

impl EndpointRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from a static table of declarations
    pub fn from_static(defs: &[EndpointDef]) -> Self {
        Self {
            entries: defs.iter().map(Endpoint::from).collect(),
        }
    }

    /// Register an endpoint routed at its own name
    pub fn route(mut self, name: impl Into<String>) -> Self {
        self.entries.push(Endpoint::new(name));
        self
    }

    /// Register an endpoint routed at an explicit path segment
    pub fn route_at(mut self, name: impl Into<String>, path: impl Into<String>) -> Self {
        self.entries.push(Endpoint::with_path(name, path));
        self
    }
}

impl EndpointSource for EndpointRegistry {
    fn endpoints(&self) -> Result<Vec<Endpoint>> {
        Ok(self.entries.clone())
    }
}

#[derive(Debug, Deserialize)]
struct ManifestFile {
    endpoints: Vec<ManifestEntry>,
}

#[derive(Debug, Deserialize)]
struct ManifestEntry {
    name: String,
    #[serde(default)]
    path: Option<String>,
}

/// Endpoint manifest loaded from disk.
///
/// ```yaml
/// endpoints:
///   - name: SOAPProxy
///     path: MapMEWebServices.asmx
///   - name: CheckStatus
/// ```
#[derive(Debug, Clone)]
pub struct EndpointManifest {
    entries: Vec<Endpoint>,
}

impl EndpointManifest {
    /// Load a manifest file. JSON is tried first, then YAML.
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).await.map_err(|e| {
            Error::discovery(format!(
                "Failed to read endpoint manifest {}: {}",
                path.display(),
                e
            ))
        })?;
        Self::parse_content(&content).map_err(|e| {
            Error::discovery(format!(
                "Failed to parse endpoint manifest {}: {}",
                path.display(),
                e
            ))
        })
    }

    fn parse_content(content: &str) -> std::result::Result<Self, String> {
        let file: ManifestFile = match serde_json::from_str(content) {
            Ok(file) => file,
            Err(_) => serde_yaml::from_str(content).map_err(|e| e.to_string())?,
        };
        let entries = file
            .endpoints
            .into_iter()
            .map(|entry| match entry.path {
                Some(path) => Endpoint::with_path(entry.name, path),
                None => Endpoint::new(entry.name),
            })
            .collect();
        Ok(Self { entries })
    }
}

impl EndpointSource for EndpointManifest {
    fn endpoints(&self) -> Result<Vec<Endpoint>> {
        Ok(self.entries.clone())
    }
}

/// Validated, ordered list of endpoints.
///
/// Order is kept exactly as the source yields it; it only affects the
/// order of the generated declarations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EndpointCatalog {
    endpoints: Vec<Endpoint>,
}

impl EndpointCatalog {
    /// Validate a list of endpoints
    pub fn new(endpoints: Vec<Endpoint>) -> Result<Self> {
        let mut seen = HashSet::new();
        for endpoint in &endpoints {
            endpoint.validate()?;
            if !seen.insert(endpoint.name.as_str()) {
                return Err(Error::DuplicateEndpoint(endpoint.name.clone()));
            }
        }
        log::debug!("Endpoint catalog holds {} endpoint(s)", endpoints.len());
        Ok(Self { endpoints })
    }

    pub fn from_source(source: &dyn EndpointSource) -> Result<Self> {
        Self::new(source.endpoints()?)
    }

    pub fn endpoints(&self) -> &[Endpoint] {
        &self.endpoints
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Endpoint> {
        self.endpoints.iter()
    }

    pub fn len(&self) -> usize {
        self.endpoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.endpoints.is_empty()
    }
}

impl<'a> IntoIterator for &'a EndpointCatalog {
    type Item = &'a Endpoint;
    type IntoIter = std::slice::Iter<'a, Endpoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.endpoints.iter()
    }
}
