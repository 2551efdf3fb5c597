#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

pub mod access;
pub mod config;
pub mod directive;
pub mod document;
pub mod error;
pub mod hash;
pub mod optimize;
pub mod paths;
pub mod processor;
pub mod rewrite;

pub use config::{BundleConfig, FileConfig};
pub use directive::{BundleDirective, DirectiveKind};
pub use document::process_document;
pub use error::BundleError;
pub use optimize::{ResourceOptimizer, ScriptOptions};
pub use processor::BundleProcessor;
