//! Resolution of raw references to absolute filesystem paths.

use std::path::{Component, Path, PathBuf};

use crate::error::BundleError;

use super::placeholder::strip_templating_placeholder;

/// One resolution space: a referring document directory plus an optional
/// alternate base directory for templated references.
#[derive(Debug, Clone)]
pub struct Space {
    /// Directory containing the referring document.
    pub document_dir: PathBuf,
    /// Alternate base directory used when a reference carries a templating
    /// placeholder.
    pub base_dir: Option<PathBuf>,
}

/// Resolve a raw reference to an absolute, lexically normalized path.
///
/// References starting with a templating placeholder resolve against the
/// space's alternate base directory; everything else resolves against the
/// referring document's directory. A templated reference without a
/// configured base directory is a fatal configuration error.
pub fn resolve_reference(space: &Space, raw: &str) -> Result<PathBuf, BundleError> {
    let joined = match strip_templating_placeholder(raw) {
        Some(remainder) => {
            let base = space
                .base_dir
                .as_ref()
                .ok_or_else(|| BundleError::MissingBaseDir {
                    reference: raw.to_string(),
                })?;
            base.join(remainder.trim_start_matches('/'))
        }
        None => space.document_dir.join(raw),
    };
    Ok(normalize_lexically(&joined))
}

/// Collapse `.` and `..` components without touching the filesystem.
///
/// `..` never climbs above the root of an absolute path; on relative paths
/// leading `..` components are kept so the caller can still resolve them.
pub fn normalize_lexically(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Prefix(prefix) => normalized.push(prefix.as_os_str()),
            Component::RootDir => normalized.push(component.as_os_str()),
            Component::CurDir => {}
            Component::ParentDir => {
                let ends_with_normal =
                    matches!(normalized.components().next_back(), Some(Component::Normal(_)));
                let at_root = matches!(
                    normalized.components().next_back(),
                    Some(Component::RootDir) | Some(Component::Prefix(_))
                );
                if ends_with_normal {
                    normalized.pop();
                } else if !at_root {
                    normalized.push(component.as_os_str());
                }
            }
            Component::Normal(name) => normalized.push(name),
        }
    }
    normalized
}
