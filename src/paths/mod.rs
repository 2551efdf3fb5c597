//! Path resolution across the input and output spaces.
//!
//! The engine works with two independent pairs of directories: the *input
//! space* (the scanned document's directory plus the alternate input base
//! directory) used for every read, and the *output space* (the written
//! document's directory plus the alternate output base directory) used for
//! every write. The submodules keep placeholder recognition, reference
//! resolution and relative-path algebra independently testable.

mod placeholder;
mod relative;
mod resolve;

pub use placeholder::{has_templating_placeholder, strip_templating_placeholder};
pub use relative::relative_path_between;
pub use resolve::{normalize_lexically, resolve_reference, Space};

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::config::BundleConfig;

/// The input and output resolution spaces derived from a configuration.
#[derive(Debug, Clone)]
pub struct PathSpaces {
    /// Space used to resolve source reads.
    pub input: Space,
    /// Space used to resolve artifact writes.
    pub output: Space,
}

impl PathSpaces {
    /// Derive both spaces from the configured document and base paths.
    pub fn from_config(config: &BundleConfig) -> Result<Self> {
        Ok(Self {
            input: Space {
                document_dir: document_dir(&config.input_file)?,
                base_dir: absolute_base(config.input_base_dir.as_deref())?,
            },
            output: Space {
                document_dir: document_dir(&config.output_file)?,
                base_dir: absolute_base(config.output_base_dir.as_deref())?,
            },
        })
    }
}

fn document_dir(file: &Path) -> Result<PathBuf> {
    let absolute = std::path::absolute(file)
        .with_context(|| format!("failed to resolve an absolute path for {}", file.display()))?;
    let dir = absolute.parent().unwrap_or(&absolute);
    Ok(normalize_lexically(dir))
}

fn absolute_base(base: Option<&Path>) -> Result<Option<PathBuf>> {
    base.map(|dir| {
        std::path::absolute(dir)
            .map(|abs| normalize_lexically(&abs))
            .with_context(|| format!("failed to resolve an absolute path for {}", dir.display()))
    })
    .transpose()
}
