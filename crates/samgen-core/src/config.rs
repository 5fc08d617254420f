//! Configuration management for samgen.
//!
//! This module defines the `Config` struct holding the naming conventions the
//! generated resources follow. Every field has a default, so an empty file (or
//! no file at all) reproduces the stock stack layout. The configuration can be
//! loaded from a YAML or TOML file, or created programmatically.
//!
//! # Examples
//!
//! ```no_run
//! use samgen_core::config::Config;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> samgen_core::Result<()> {
//! let mut config = Config::default();
//! config.function_prefix = "acme".to_string();
//!
//! // Or load from a config file
//! let config = Config::from_file("templates/samgen.yaml").await?;
//! # Ok(())
//! # }
//! ```

// Internal imports (std, crate)
use std::path::Path;

// External imports (alphabetized)
use serde::{Deserialize, Serialize};
use tokio::fs;

use crate::naming;

/// Staging and production release points of the base stack
pub const DEPLOYMENT_COUNT: usize = 2;

/// File name looked up in the template directory when no config is given
pub const DEFAULT_CONFIG_FILE: &str = "samgen.yaml";

/// Naming conventions and fixed references used by the synthesizers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Prefix of every physical function name (`<prefix>-{Name}`)
    pub function_prefix: String,

    /// Handler reference; `{name}` is replaced with the endpoint name
    pub handler_format: String,

    /// Execution role of the functions and credentials of the integrations
    pub role_arn: String,

    /// Logical id of the REST API the routes hang off
    pub rest_api_id: String,

    /// Token in the skeletons replaced by generated resources
    pub placeholder: String,

    /// Environment id that gets odd version numbers; any other gets even ones
    pub staging_environment: String,

    /// Logical ids of the deployment declarations appended to the base stack
    pub deployments: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            function_prefix: "nway".to_string(),
            handler_format: "nwayapi::nWAY.API::{name}".to_string(),
            role_arn: r#"!Sub "arn:aws:iam::${AWS::AccountId}:role/nway-lambdas""#.to_string(),
            rest_api_id: "nWAYApi".to_string(),
            placeholder: "@INJECT".to_string(),
            staging_environment: "staging".to_string(),
            deployments: vec!["StagingDeployment".to_string(), "ProdDeployment".to_string()],
        }
    }
}

impl Config {
    /// Load configuration from a file. `.toml` files are read as TOML,
    /// anything else as YAML.
    pub async fn from_file<P: AsRef<Path>>(path: P) -> crate::Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).await?;
        let config: Self = if is_toml(path) {
            toml::from_str(&content)?
        } else if content.trim().is_empty() {
            Self::default()
        } else {
            serde_yaml::from_str(&content)?
        };
        config.validate()?;
        Ok(config)
    }

    /// Load `samgen.yaml` from the template directory if it exists
    pub async fn discover<P: AsRef<Path>>(template_dir: P) -> crate::Result<Self> {
        let candidate = template_dir.as_ref().join(DEFAULT_CONFIG_FILE);
        if fs::try_exists(&candidate).await? {
            log::info!("Using configuration from {}", candidate.display());
            Self::from_file(&candidate).await
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to a file as YAML
    pub async fn save<P: AsRef<Path>>(&self, path: P) -> crate::Result<()> {
        let content = serde_yaml::to_string(self)?;
        fs::write(path, content).await?;
        Ok(())
    }

    /// Render the handler reference for an endpoint
    pub fn handler_for(&self, name: &str) -> String {
        self.handler_format.replace("{name}", name)
    }

    /// Check the values that end up in logical ids and references
    pub fn validate(&self) -> crate::Result<()> {
        if self.placeholder.is_empty() {
            return Err(crate::Error::config("placeholder must not be empty"));
        }
        if self.function_prefix.is_empty() {
            return Err(crate::Error::config("function_prefix must not be empty"));
        }
        if !naming::is_identifier(&self.rest_api_id) {
            return Err(crate::Error::config(format!(
                "rest_api_id '{}' is not a valid logical id",
                self.rest_api_id
            )));
        }
        if self.deployments.len() != DEPLOYMENT_COUNT {
            return Err(crate::Error::config(format!(
                "deployments must name exactly {DEPLOYMENT_COUNT} logical ids, found {}",
                self.deployments.len()
            )));
        }
        if let Some(bad) = self.deployments.iter().find(|id| !naming::is_identifier(id)) {
            return Err(crate::Error::config(format!(
                "deployment '{bad}' is not a valid logical id"
            )));
        }
        if self.deployments[0] == self.deployments[1] {
            return Err(crate::Error::config("deployment ids must differ"));
        }
        Ok(())
    }
}

fn is_toml(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"))
}
