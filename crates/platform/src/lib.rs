//! Platform abstraction layer for rpmpack.
//!
//! Everything that leaves the process goes through here. For now that is
//! spawning external tools (`rpmbuild`) with captured output and event
//! emission around each run.

pub mod core;
pub mod implementations;
pub mod process;

pub use core::{Platform, PlatformContext};
pub use implementations::native::NativePlatform;

pub use process::{CommandOutput, PlatformCommand, ProcessOperations};
