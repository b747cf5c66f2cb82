#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! RPM package building for rpmpack
//!
//! A build creates a fresh rpmbuild tree, copies the selected files into its
//! `BUILDROOT`, writes a spec file listing them and runs `rpmbuild -bb`
//! against it. Progress is reported through the event channel carried by
//! [`BuildContext`].

pub mod artifact;
pub mod build_root;
mod core;
pub mod descriptor;
pub mod exclusion;
pub mod pattern;
pub mod staging;
mod utils;

pub use artifact::locate_artifact;
pub use build_root::{BuildRoot, BUILD_ROOT_SUBDIRS};
pub use core::builder::Builder;
pub use core::context::BuildContext;
pub use core::types::{BuildResult, StagedBuild};
pub use descriptor::{DescriptorWriter, SpecFileWriter};
pub use exclusion::ExclusionSet;
pub use pattern::PatternResolver;
pub use staging::FileStager;

use rpmpack_config::BuildConfig;
use rpmpack_errors::Error;
use rpmpack_events::EventSender;
use std::path::PathBuf;

/// Build a package and return the path of the finished rpm
///
/// # Errors
///
/// See [`Builder::build`].
pub async fn build(config: BuildConfig, events: Option<EventSender>) -> Result<PathBuf, Error> {
    let mut context = BuildContext::new().with_verbose(config.verbose);
    if let Some(sender) = events {
        context = context.with_event_sender(sender);
    }

    Builder::new()
        .build(&config, &context)
        .await
        .map(|result| result.package_path)
}
