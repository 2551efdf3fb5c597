//! Error taxonomy for the bundling engine.

/// Errors raised by the bundling engine itself.
///
/// I/O and optimizer failures are reported through [`anyhow::Error`] at the
/// call sites that produce them; this enum covers the conditions the engine
/// detects on its own.
#[derive(Debug)]
pub enum BundleError {
    /// A directive that produces an artifact was declared without a target
    /// filename attribute.
    MissingTargetFileName,
    /// A reference uses a templating placeholder but the matching alternate
    /// base directory is not configured.
    MissingBaseDir {
        /// The raw reference that triggered alternate-base resolution.
        reference: String,
    },
    /// The configured hashing algorithm has no implementation.
    UnsupportedHashAlgorithm {
        /// The algorithm name as configured.
        name: String,
    },
}

impl std::fmt::Display for BundleError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingTargetFileName => {
                write!(f, "target file name attribute is required")
            }
            Self::MissingBaseDir { reference } => {
                write!(
                    f,
                    "reference `{reference}` uses a templating placeholder but no base directory is configured"
                )
            }
            Self::UnsupportedHashAlgorithm { name } => {
                write!(f, "unsupported hashing algorithm `{name}`")
            }
        }
    }
}

impl std::error::Error for BundleError {}
