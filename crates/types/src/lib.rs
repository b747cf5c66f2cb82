#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Core type definitions for rpmpack
//!
//! File selections as written by users, the per-file directives understood
//! by `rpmbuild`, and the manifest produced by staging.

pub mod directive;
pub mod manifest;
pub mod selection;

pub use directive::{DirectiveKind, FileDirective};
pub use manifest::ManifestEntry;
pub use selection::{FileSelection, Patterns};

use serde::{Deserialize, Serialize};

/// Output format for CLI commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Plain,
    Json,
}

impl clap::ValueEnum for OutputFormat {
    fn value_variants<'a>() -> &'a [Self] {
        &[Self::Plain, Self::Json]
    }

    fn to_possible_value(&self) -> Option<clap::builder::PossibleValue> {
        Some(match self {
            Self::Plain => clap::builder::PossibleValue::new("plain"),
            Self::Json => clap::builder::PossibleValue::new("json"),
        })
    }
}

impl Default for OutputFormat {
    fn default() -> Self {
        Self::Plain
    }
}
