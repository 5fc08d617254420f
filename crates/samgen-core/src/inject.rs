//! Splicing generated resources into template skeletons.
//!
//! A skeleton is a hand-written template containing the placeholder token
//! exactly once, typically at the end of its `Resources:` section. The
//! injector replaces that token with a marker comment, the generated text and
//! a closing marker, then writes the result to a separate output file. The
//! skeleton itself is never modified.

use std::path::{Path, PathBuf};

use tokio::fs;

use crate::utils::{count_occurrences, indent};
use crate::{Error, Result};

/// Comment text opening the injected block, following the placeholder's position
pub const BEGIN_MARKER: &str = " INJECTED CODE:";
/// Comment closing the injected block
pub const END_MARKER: &str = "# END of injected code";

/// Replaces a placeholder token in skeleton documents
#[derive(Debug, Clone)]
pub struct TemplateInjector {
    placeholder: String,
}

impl TemplateInjector {
    pub fn new(placeholder: impl Into<String>) -> Self {
        Self {
            placeholder: placeholder.into(),
        }
    }

    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    /// Substitute the placeholder in `source`.
    ///
    /// `origin` only labels the error when the placeholder is missing or
    /// repeated.
    pub fn splice(&self, source: &str, generated: &str, origin: &Path) -> Result<String> {
        let found = count_occurrences(source, &self.placeholder);
        if found != 1 {
            return Err(Error::Placeholder {
                path: origin.to_path_buf(),
                placeholder: self.placeholder.clone(),
                found,
            });
        }
        let replacement = format!("{BEGIN_MARKER}{generated}{}", indent(1, END_MARKER));
        Ok(source.replacen(&self.placeholder, &replacement, 1))
    }

    /// Read `skeleton`, splice `generated` in, and write the result to
    /// `output`, replacing any existing file there.
    pub async fn inject(&self, skeleton: &Path, output: &Path, generated: &str) -> Result<()> {
        log::debug!("Reading skeleton: {}", skeleton.display());
        let source = fs::read_to_string(skeleton).await.map_err(|e| {
            Error::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to read skeleton {}: {}", skeleton.display(), e),
            ))
        })?;

        let document = self.splice(&source, generated, skeleton)?;

        if fs::try_exists(output).await? {
            log::debug!("Removing previous output: {}", output.display());
            fs::remove_file(output).await?;
        }
        fs::write(output, document).await.map_err(|e| {
            Error::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to write {}: {}", output.display(), e),
            ))
        })?;
        log::info!("Wrote {}", output.display());
        Ok(())
    }
}

/// Skeleton and output locations of one injection pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InjectionTarget {
    pub skeleton: PathBuf,
    pub output: PathBuf,
}

impl InjectionTarget {
    /// `sam.yml` into `sam-base.yml`
    pub fn base(template_dir: &Path) -> Self {
        Self {
            skeleton: template_dir.join("sam.yml"),
            output: template_dir.join("sam-base.yml"),
        }
    }

    /// `samx.yml` into `sam-{environment}.yml`
    pub fn environment(template_dir: &Path, environment: &str) -> Self {
        Self {
            skeleton: template_dir.join("samx.yml"),
            output: template_dir.join(format!("sam-{environment}.yml")),
        }
    }
}
