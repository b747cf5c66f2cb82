//! Command line interface definition

use clap::{Args, Parser, Subcommand};
use rpmpack_config::{BuildOptions, ExecOptions};
use rpmpack_types::OutputFormat;
use std::path::PathBuf;

/// rpmpack - stage files and package them with rpmbuild
#[derive(Parser)]
#[command(name = "rpmpack")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Stage files into an rpmbuild tree and package them as an RPM")]
#[command(long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalArgs,
}

/// Global arguments available for all commands
#[derive(Args)]
pub struct GlobalArgs {
    /// Output format for the final result
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Plain)]
    pub output: OutputFormat,

    /// Shorthand for `--output json`; logs are written as JSON too
    #[arg(long, global = true)]
    pub json: bool,

    /// Pass -vv to rpmbuild and log every staged file and tool output line
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Use alternate config file (default: ./rpmpack.toml when present)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

impl GlobalArgs {
    #[must_use]
    pub fn output_format(&self) -> OutputFormat {
        if self.json {
            OutputFormat::Json
        } else {
            self.output
        }
    }
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Stage files, write the spec and run rpmbuild
    Build(BuildArgs),

    /// Stage files and write the spec without running rpmbuild
    Stage(BuildArgs),
}

/// Per-build overrides, applied over the config file and environment
#[derive(Args, Default)]
pub struct BuildArgs {
    /// Package name
    #[arg(long)]
    pub name: Option<String>,

    /// Package version
    #[arg(long)]
    pub version: Option<String>,

    /// Package release
    #[arg(long)]
    pub release: Option<String>,

    /// rpmbuild top directory (recreated on every run)
    #[arg(long, value_name = "DIR")]
    pub temp_dir: Option<PathBuf>,

    /// Keep the rpmbuild tree after a successful build
    #[arg(long)]
    pub keep_temp: bool,

    /// Directory the finished package is copied into
    #[arg(long, value_name = "DIR")]
    pub rpm_dest: Option<PathBuf>,

    /// rpmbuild executable to run
    #[arg(long, value_name = "PROGRAM")]
    pub rpmbuild: Option<String>,
}

impl BuildArgs {
    /// Options layer holding only what was given on the command line
    #[must_use]
    pub fn to_options(&self, verbose: bool) -> BuildOptions {
        BuildOptions {
            name: self.name.clone(),
            version: self.version.clone(),
            release: self.release.clone(),
            temp_dir: self.temp_dir.clone(),
            rpm_dest: self.rpm_dest.clone(),
            keep_temp: self.keep_temp.then_some(true),
            verbose: verbose.then_some(true),
            ..BuildOptions::default()
        }
    }

    /// Program override, applied after all layers are merged
    pub fn apply_program(&self, exec: &mut ExecOptions) {
        if let Some(program) = &self.rpmbuild {
            exec.program.clone_from(program);
        }
    }
}
