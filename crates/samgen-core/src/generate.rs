//! Generation pipeline: discover endpoints, build both stacks, inject them.

use std::path::PathBuf;

use crate::{
    builders::{BaseStackBuilder, EnvironmentStackBuilder, StackBuilder},
    config::Config,
    endpoint::{EndpointCatalog, EndpointManifest},
    error::{Error, Result},
    inject::{InjectionTarget, TemplateInjector},
    naming,
};

/// Fully parsed inputs of one run
#[derive(Debug, Clone)]
pub struct Invocation {
    /// Endpoint manifest describing the deployable artifact
    pub artifact: PathBuf,
    /// Directory holding the skeletons; outputs are written next to them
    pub template_dir: PathBuf,
    /// Environment id, also the alias name and the output file suffix
    pub environment: String,
    /// Monotonically increasing build number
    pub build_counter: u32,
    /// No environment stack exists yet
    pub fresh_stack: bool,
}

impl Invocation {
    /// Parse the raw positional values.
    ///
    /// The stack flag is `"0"` for a fresh stack; any other value means the
    /// stack already exists.
    pub fn from_args(
        artifact: impl Into<PathBuf>,
        template_dir: impl Into<PathBuf>,
        environment: &str,
        build_counter: &str,
        stack_flag: &str,
    ) -> Result<Self> {
        check_environment(environment)?;
        let build_counter = build_counter.trim().parse::<u32>().map_err(|e| {
            Error::argument(format!("invalid build counter '{build_counter}': {e}"))
        })?;
        Ok(Self {
            artifact: artifact.into(),
            template_dir: template_dir.into(),
            environment: environment.to_string(),
            build_counter,
            fresh_stack: stack_flag == "0",
        })
    }
}

fn check_environment(environment: &str) -> Result<()> {
    if naming::is_environment_id(environment) {
        Ok(())
    } else {
        Err(Error::argument(format!(
            "invalid environment '{environment}': expected letters, digits and '-'"
        )))
    }
}

/// What a run produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateReport {
    pub endpoints: usize,
    pub base_output: PathBuf,
    pub base_resources: usize,
    pub environment_output: PathBuf,
    pub environment_resources: usize,
}

/// Run both passes for a catalog that is already loaded.
///
/// Both documents are built before anything is written, so a build error
/// leaves every output untouched. The passes then write sequentially; a
/// failure of the environment write leaves the base output in place.
pub async fn generate_with_catalog(
    catalog: &EndpointCatalog,
    invocation: &Invocation,
    config: &Config,
) -> Result<GenerateReport> {
    config.validate()?;
    check_environment(&invocation.environment)?;
    let injector = TemplateInjector::new(config.placeholder.as_str());

    let base = BaseStackBuilder::new(config).build(catalog)?;
    let environment = EnvironmentStackBuilder::new(
        config,
        &invocation.environment,
        invocation.build_counter,
        invocation.fresh_stack,
    )
    .build(catalog)?;

    // 1. Base stack
    let base_target = InjectionTarget::base(&invocation.template_dir);
    injector
        .inject(&base_target.skeleton, &base_target.output, &base.render())
        .await?;

    // 2. Environment stack
    let env_target = InjectionTarget::environment(&invocation.template_dir, &invocation.environment);
    injector
        .inject(&env_target.skeleton, &env_target.output, &environment.render())
        .await?;

    Ok(GenerateReport {
        endpoints: catalog.len(),
        base_output: base_target.output,
        base_resources: base.len(),
        environment_output: env_target.output,
        environment_resources: environment.len(),
    })
}

/// Main entry point: load the endpoint manifest named by the invocation and
/// generate both stacks.
pub async fn generate(invocation: &Invocation, config: &Config) -> Result<GenerateReport> {
    let manifest = EndpointManifest::from_file(&invocation.artifact).await?;
    let catalog = EndpointCatalog::from_source(&manifest)?;
    log::info!(
        "Discovered {} endpoint(s) in {}",
        catalog.len(),
        invocation.artifact.display()
    );
    generate_with_catalog(&catalog, invocation, config).await
}
