//! Recognition of server-side templating placeholders in references.

const TEMPLATING_PLACEHOLDERS: [&str; 2] = [
    "#{request.contextPath}",
    "#{facesContext.externalContext.request.contextPath}",
];

/// Strip a templating placeholder prefix from a raw reference.
///
/// Returns the remainder after the placeholder when one of the fixed
/// placeholder literals starts the reference, or `None` when the reference
/// is plain. The placeholder signals that resolution must use the alternate
/// base directory; it is never stripped from emitted markup.
pub fn strip_templating_placeholder(raw: &str) -> Option<&str> {
    TEMPLATING_PLACEHOLDERS
        .iter()
        .find_map(|placeholder| raw.strip_prefix(placeholder))
}

/// Whether the reference starts with one of the templating placeholders.
pub fn has_templating_placeholder(raw: &str) -> bool {
    strip_templating_placeholder(raw).is_some()
}
