#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Configuration management for rpmpack
//!
//! A build is described by [`BuildConfig`]. Users supply a sparse
//! [`BuildOptions`] from any of:
//! - a TOML file (`rpmpack.toml`)
//! - environment variables (`RPMPACK_*`)
//! - CLI flags
//!
//! Layers are combined with [`BuildOptions::merge`] and then laid over the
//! defaults one field at a time. A field that is set replaces the default
//! wholesale; nested values such as `exec_opts` are never merged key by key.

use rpmpack_errors::{ConfigError, Error};
use rpmpack_types::FileSelection;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Name of the config file looked up in the current directory
pub const DEFAULT_CONFIG_FILE: &str = "rpmpack.toml";

/// Fully resolved build configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildConfig {
    pub name: String,
    pub summary: String,
    pub description: String,
    pub version: String,
    pub release: String,
    pub epoch: Option<u32>,
    pub license: String,
    pub vendor: Option<String>,
    pub group: String,
    pub url: Option<String>,
    pub build_arch: String,
    pub requires: Vec<String>,
    /// Root of the rpmbuild tree; relative paths resolve against the process cwd
    pub temp_dir: PathBuf,
    pub files: Vec<FileSelection>,
    pub exclude_files: Vec<String>,
    /// Directory the finished rpm is copied into
    pub rpm_dest: Option<PathBuf>,
    pub keep_temp: bool,
    pub verbose: bool,
    pub exec_opts: ExecOptions,
}

/// How the packaging tool is spawned
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecOptions {
    #[serde(default = "default_program")]
    pub program: String,
    #[serde(default)]
    pub env: BTreeMap<String, String>,
    #[serde(default)]
    pub cwd: Option<PathBuf>,
}

impl Default for ExecOptions {
    fn default() -> Self {
        Self {
            program: default_program(),
            env: BTreeMap::new(),
            cwd: None,
        }
    }
}

fn default_program() -> String {
    "rpmbuild".to_string()
}

/// Fresh temp directory name, unique per call
#[must_use]
pub fn default_temp_dir() -> PathBuf {
    let id = uuid::Uuid::new_v4().simple().to_string();
    PathBuf::from(format!("tmp-{}", &id[..8]))
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            name: "noname".to_string(),
            summary: "No summary".to_string(),
            description: "No description".to_string(),
            version: "0.0.0".to_string(),
            release: "1".to_string(),
            epoch: None,
            license: "MIT".to_string(),
            vendor: None,
            group: "Development/Tools".to_string(),
            url: None,
            build_arch: "noarch".to_string(),
            requires: Vec::new(),
            temp_dir: default_temp_dir(),
            files: Vec::new(),
            exclude_files: Vec::new(),
            rpm_dest: None,
            keep_temp: false,
            verbose: false,
            exec_opts: ExecOptions::default(),
        }
    }
}

impl BuildConfig {
    /// Lay user options over the defaults
    #[must_use]
    pub fn from_options(options: BuildOptions) -> Self {
        let defaults = Self::default();
        Self {
            name: options.name.unwrap_or(defaults.name),
            summary: options.summary.unwrap_or(defaults.summary),
            description: options.description.unwrap_or(defaults.description),
            version: options.version.unwrap_or(defaults.version),
            release: options.release.unwrap_or(defaults.release),
            epoch: options.epoch.or(defaults.epoch),
            license: options.license.unwrap_or(defaults.license),
            vendor: options.vendor.or(defaults.vendor),
            group: options.group.unwrap_or(defaults.group),
            url: options.url.or(defaults.url),
            build_arch: options.build_arch.unwrap_or(defaults.build_arch),
            requires: options.requires.unwrap_or(defaults.requires),
            temp_dir: options.temp_dir.unwrap_or(defaults.temp_dir),
            files: options.files.unwrap_or(defaults.files),
            exclude_files: options.exclude_files.unwrap_or(defaults.exclude_files),
            rpm_dest: options.rpm_dest.or(defaults.rpm_dest),
            keep_temp: options.keep_temp.unwrap_or(defaults.keep_temp),
            verbose: options.verbose.unwrap_or(defaults.verbose),
            exec_opts: options.exec_opts.unwrap_or(defaults.exec_opts),
        }
    }

    /// `name-version-release` as used by rpm
    #[must_use]
    pub fn package_id(&self) -> String {
        format!("{}-{}-{}", self.name, self.version, self.release)
    }
}

/// Sparse, user-supplied build options
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildOptions {
    pub name: Option<String>,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub version: Option<String>,
    pub release: Option<String>,
    pub epoch: Option<u32>,
    pub license: Option<String>,
    pub vendor: Option<String>,
    pub group: Option<String>,
    pub url: Option<String>,
    pub build_arch: Option<String>,
    pub requires: Option<Vec<String>>,
    pub temp_dir: Option<PathBuf>,
    pub files: Option<Vec<FileSelection>>,
    pub exclude_files: Option<Vec<String>>,
    pub rpm_dest: Option<PathBuf>,
    pub keep_temp: Option<bool>,
    pub verbose: Option<bool>,
    pub exec_opts: Option<ExecOptions>,
}

impl BuildOptions {
    /// Load options from a TOML file
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NotFound`] if the file does not exist, an I/O
    /// error if it cannot be read, or a parse error if it is not valid TOML.
    pub async fn load_from_file(path: &Path) -> Result<Self, Error> {
        let contents = fs::read_to_string(path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ConfigError::NotFound {
                    path: path.display().to_string(),
                }
                .into()
            } else {
                Error::io_with_path(&e, path)
            }
        })?;

        Self::from_toml_str(&contents)
    }

    /// Parse options from TOML text
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not valid TOML for [`BuildOptions`].
    pub fn from_toml_str(contents: &str) -> Result<Self, Error> {
        toml::from_str(contents)
            .map_err(|e| ConfigError::ParseError {
                message: e.to_string(),
            })
            .map_err(Into::into)
    }

    /// Load from `path` if given, else from `rpmpack.toml` in the current
    /// directory when it exists, else start empty
    ///
    /// # Errors
    ///
    /// Returns an error if a config file exists but cannot be read or parsed.
    pub async fn load_or_default(path: Option<&Path>) -> Result<Self, Error> {
        match path {
            Some(path) => Self::load_from_file(path).await,
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_FILE);
                if fs::try_exists(default_path).await.unwrap_or(false) {
                    Self::load_from_file(default_path).await
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Combine two layers; fields set in `other` win
    #[must_use]
    pub fn merge(self, other: Self) -> Self {
        Self {
            name: other.name.or(self.name),
            summary: other.summary.or(self.summary),
            description: other.description.or(self.description),
            version: other.version.or(self.version),
            release: other.release.or(self.release),
            epoch: other.epoch.or(self.epoch),
            license: other.license.or(self.license),
            vendor: other.vendor.or(self.vendor),
            group: other.group.or(self.group),
            url: other.url.or(self.url),
            build_arch: other.build_arch.or(self.build_arch),
            requires: other.requires.or(self.requires),
            temp_dir: other.temp_dir.or(self.temp_dir),
            files: other.files.or(self.files),
            exclude_files: other.exclude_files.or(self.exclude_files),
            rpm_dest: other.rpm_dest.or(self.rpm_dest),
            keep_temp: other.keep_temp.or(self.keep_temp),
            verbose: other.verbose.or(self.verbose),
            exec_opts: other.exec_opts.or(self.exec_opts),
        }
    }

    /// Merge with environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if a boolean variable holds an unrecognized value.
    pub fn merge_env(&mut self) -> Result<(), Error> {
        if let Ok(dir) = std::env::var("RPMPACK_TEMP_DIR") {
            self.temp_dir = Some(PathBuf::from(dir));
        }

        if let Ok(dest) = std::env::var("RPMPACK_RPM_DEST") {
            self.rpm_dest = Some(PathBuf::from(dest));
        }

        if let Ok(value) = std::env::var("RPMPACK_KEEP_TEMP") {
            self.keep_temp = Some(parse_bool("RPMPACK_KEEP_TEMP", value)?);
        }

        if let Ok(value) = std::env::var("RPMPACK_VERBOSE") {
            self.verbose = Some(parse_bool("RPMPACK_VERBOSE", value)?);
        }

        // Only the program is replaced here; env and cwd keep whatever the
        // file said.
        if let Ok(program) = std::env::var("RPMPACK_RPMBUILD") {
            let mut exec = self.exec_opts.take().unwrap_or_default();
            exec.program = program;
            self.exec_opts = Some(exec);
        }

        Ok(())
    }
}

fn parse_bool(field: &str, value: String) -> Result<bool, Error> {
    match value.as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            field: field.to_string(),
            value,
        }
        .into()),
    }
}
