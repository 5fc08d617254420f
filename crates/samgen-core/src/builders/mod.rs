//! Resource builders for the two generated stacks.
pub mod base;
pub mod environment;

pub use base::BaseStackBuilder;
pub use environment::EnvironmentStackBuilder;

use crate::endpoint::EndpointCatalog;
use crate::resource::ResourceDocument;

/// Trait for turning an endpoint catalog into the declarations of one stack.
///
/// Builders hold no state between calls; the same catalog always yields the
/// same document.
pub trait StackBuilder {
    fn build(&self, catalog: &EndpointCatalog) -> crate::Result<ResourceDocument>;

    /// Build and serialize in one step
    fn render(&self, catalog: &EndpointCatalog) -> crate::Result<String> {
        Ok(self.build(catalog)?.render())
    }
}
