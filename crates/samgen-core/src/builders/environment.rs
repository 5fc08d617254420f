//! Environment stack: function versions and the alias an environment routes to.

use super::StackBuilder;
use crate::config::Config;
use crate::endpoint::{Endpoint, EndpointCatalog};
use crate::naming;
use crate::resource::{Resource, ResourceDocument};
use crate::version::VersionPair;
use crate::Error;

pub const VERSION_TYPE: &str = "AWS::Lambda::Version";
pub const ALIAS_TYPE: &str = "AWS::Lambda::Alias";

/// Builds the versioned stack of one environment.
///
/// For an existing stack both versions of the pair are declared so the
/// previously published version stays live alongside the new one. A fresh
/// stack has nothing to preserve and only declares the current version.
#[derive(Debug, Clone)]
pub struct EnvironmentStackBuilder<'a> {
    config: &'a Config,
    environment: &'a str,
    build_counter: u32,
    fresh_stack: bool,
}

impl<'a> EnvironmentStackBuilder<'a> {
    pub fn new(config: &'a Config, environment: &'a str, build_counter: u32, fresh_stack: bool) -> Self {
        Self {
            config,
            environment,
            build_counter,
            fresh_stack,
        }
    }

    pub fn versions(&self) -> VersionPair {
        VersionPair::for_environment(
            self.environment,
            self.build_counter,
            &self.config.staging_environment,
        )
    }

    fn version(&self, endpoint: &Endpoint, number: i64) -> Resource {
        Resource::new(naming::version_id(&endpoint.name, number), VERSION_TYPE).property(
            "FunctionName",
            naming::function_name(&self.config.function_prefix, &endpoint.name),
        )
    }

    fn alias(&self, endpoint: &Endpoint, current: i64) -> Resource {
        Resource::new(naming::alias_id(&endpoint.name), ALIAS_TYPE)
            .property(
                "FunctionName",
                naming::function_name(&self.config.function_prefix, &endpoint.name),
            )
            .property(
                "FunctionVersion",
                format!("!GetAtt {}.Version", naming::version_id(&endpoint.name, current)),
            )
            .property("Name", self.environment)
    }
}

impl StackBuilder for EnvironmentStackBuilder<'_> {
    fn build(&self, catalog: &EndpointCatalog) -> crate::Result<ResourceDocument> {
        let versions = self.versions();
        if !self.fresh_stack && versions.previous < 0 {
            return Err(Error::argument(format!(
                "build counter {} yields version {} for '{}'; an existing stack needs a build counter of at least 1",
                self.build_counter, versions.previous, self.environment
            )));
        }
        log::debug!(
            "Environment '{}' build {}: versions {}/{} (fresh stack: {})",
            self.environment,
            self.build_counter,
            versions.previous,
            versions.current,
            self.fresh_stack
        );

        let mut doc = ResourceDocument::new();
        for endpoint in catalog {
            if !self.fresh_stack {
                doc.push(self.version(endpoint, versions.previous));
            }
            doc.push(self.version(endpoint, versions.current));
            doc.push(self.alias(endpoint, versions.current));
        }
        Ok(doc)
    }
}
