//! Relative-path algebra between two absolute locations.

use std::path::{Component, Path};

/// Compute the relative path leading from `from_dir` to `to`.
///
/// Both inputs must be absolute and lexically normalized. The result always
/// uses forward slashes so it can be embedded in markup and stylesheets
/// regardless of the native separator.
pub fn relative_path_between(from_dir: &Path, to: &Path) -> String {
    let from: Vec<Component<'_>> = from_dir.components().collect();
    let target: Vec<Component<'_>> = to.components().collect();

    let mut shared = 0;
    while shared < from.len() && shared < target.len() && from[shared] == target[shared] {
        shared += 1;
    }

    let mut segments: Vec<String> = Vec::new();
    for _ in shared..from.len() {
        segments.push(String::from(".."));
    }
    for component in &target[shared..] {
        segments.push(component.as_os_str().to_string_lossy().into_owned());
    }

    if segments.is_empty() {
        String::from(".")
    } else {
        segments.join("/")
    }
}
