//! samgen Core Library
//!
//! This library generates SAM resource declarations for a catalog of API
//! endpoints and injects them into hand-written base and environment
//! template skeletons.

pub mod builders;
pub mod config;
pub mod endpoint;
pub mod error;
pub mod generate;
pub mod inject;
pub mod naming;
pub mod resource;
pub mod utils;
pub mod version;

pub use crate::{
    builders::{BaseStackBuilder, EnvironmentStackBuilder, StackBuilder},
    config::Config,
    endpoint::{Endpoint, EndpointCatalog, EndpointDef, EndpointManifest, EndpointRegistry, EndpointSource},
    error::{Error, Result},
    generate::{generate, generate_with_catalog, GenerateReport, Invocation},
    inject::{InjectionTarget, TemplateInjector},
    resource::{Node, Resource, ResourceDocument},
    version::VersionPair,
};
