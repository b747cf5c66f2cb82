//! High-level build orchestration

use super::context::BuildContext;
use super::types::{BuildResult, StagedBuild};
use crate::artifact::locate_artifact;
use crate::build_root::BuildRoot;
use crate::descriptor::{DescriptorWriter, SpecFileWriter};
use crate::exclusion::ExclusionSet;
use crate::staging::FileStager;
use crate::utils::events::{send_event, send_verbose_event};
use crate::utils::paths::absolutize;
use rpmpack_config::BuildConfig;
use rpmpack_errors::{BuildError, Error};
use rpmpack_events::{BuildEvent, BuildPhase, EventEmitter, FailureContext};
use rpmpack_platform::{CommandOutput, Platform};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tokio::fs;

/// Package builder
pub struct Builder {
    platform: Platform,
    descriptor_writer: Box<dyn DescriptorWriter>,
}

impl Builder {
    /// Builder using the host platform and the rpm spec writer
    #[must_use]
    pub fn new() -> Self {
        Self {
            platform: Platform::current(),
            descriptor_writer: Box::new(SpecFileWriter::new()),
        }
    }

    /// Run the packaging tool through `platform`
    #[must_use]
    pub fn with_platform(mut self, platform: Platform) -> Self {
        self.platform = platform;
        self
    }

    /// Replace the descriptor writer
    #[must_use]
    pub fn with_descriptor_writer(mut self, writer: Box<dyn DescriptorWriter>) -> Self {
        self.descriptor_writer = writer;
        self
    }

    /// Build a package from `config`
    ///
    /// Steps run strictly in order: fresh build root, exclusions, staging,
    /// descriptor, packaging tool, optional copy to `rpm_dest`, and removal
    /// of the build root unless `keep_temp` is set. On failure the build root
    /// is left in place.
    ///
    /// When neither `rpm_dest` nor `keep_temp` is set the package is copied
    /// into the process working directory so the returned path outlives the
    /// build root.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - a file selection is incomplete or a pattern is malformed
    /// - a directive is not recognized
    /// - copying, creating or removing files fails
    /// - the packaging tool cannot be spawned or exits unsuccessfully
    /// - the tool's output names no package
    pub async fn build(
        &self,
        config: &BuildConfig,
        context: &BuildContext,
    ) -> Result<BuildResult, Error> {
        let start = Instant::now();
        context.emit_operation_started(format!("Building {}", config.package_id()));
        send_event(
            context,
            BuildEvent::SessionStarted {
                session_id: context.session_id.clone(),
                package: config.name.clone(),
                version: config.version.clone(),
                temp_dir: config.temp_dir.clone(),
            },
        );

        let mut phase = BuildPhase::Prepare;
        match self.run(config, context, &mut phase).await {
            Ok(result) => {
                send_event(
                    context,
                    BuildEvent::Completed {
                        session_id: context.session_id.clone(),
                        package: config.name.clone(),
                        version: config.version.clone(),
                        path: result.package_path.clone(),
                        duration: start.elapsed(),
                    },
                );
                context.emit_operation_completed(format!("Built {}", config.package_id()), true);
                Ok(result)
            }
            Err(err) => {
                send_event(
                    context,
                    BuildEvent::Failed {
                        session_id: context.session_id.clone(),
                        package: config.name.clone(),
                        phase: Some(phase),
                        failure: FailureContext::from_error(&err),
                    },
                );
                Err(err)
            }
        }
    }

    /// Set up the build root, stage files and write the descriptor
    ///
    /// This is everything [`Builder::build`] does before invoking the
    /// packaging tool. The build root is left in place.
    ///
    /// # Errors
    ///
    /// Same as the corresponding steps of [`Builder::build`].
    pub async fn prepare(
        &self,
        config: &BuildConfig,
        context: &BuildContext,
    ) -> Result<StagedBuild, Error> {
        let mut phase = BuildPhase::Prepare;
        self.prepare_in_phases(config, context, &mut phase).await
    }

    async fn run(
        &self,
        config: &BuildConfig,
        context: &BuildContext,
        phase: &mut BuildPhase,
    ) -> Result<BuildResult, Error> {
        let staged = self.prepare_in_phases(config, context, phase).await?;

        enter_phase(context, phase, BuildPhase::Package);
        let output = self.invoke_tool(config, context, &staged).await?;
        let program = &config.exec_opts.program;

        if !output.status.success() {
            return Err(BuildError::ExternalTool {
                program: program.clone(),
                status: output.status.code(),
                stderr: output.stderr_lossy().trim().to_string(),
            }
            .into());
        }

        let stdout = output.stdout_lossy();
        let artifact = locate_artifact(&stdout)
            .or_else(|| locate_artifact(&output.stderr_lossy()))
            .ok_or_else(|| BuildError::ArtifactNotFound {
                program: program.clone(),
                stdout: stdout.clone(),
            })?;
        send_event(
            context,
            BuildEvent::ArtifactProduced {
                session_id: context.session_id.clone(),
                path: artifact.clone(),
            },
        );

        enter_phase(context, phase, BuildPhase::Cleanup);
        let destination = match &config.rpm_dest {
            Some(dir) => Some(dir.clone()),
            // The tree is about to go, so the package lands in the working directory
            None if !config.keep_temp => {
                Some(absolutize(Path::new(".")).map_err(|e| Error::io_with_path(&e, "."))?)
            }
            None => None,
        };
        let package_path = match destination {
            Some(dir) => copy_artifact(context, &artifact, &dir).await?,
            None => artifact,
        };

        let build_root = if config.keep_temp {
            Some(staged.build_root.top_dir().to_path_buf())
        } else {
            staged.build_root.teardown().await?;
            send_event(
                context,
                BuildEvent::BuildRootRemoved {
                    session_id: context.session_id.clone(),
                    path: staged.build_root.top_dir().to_path_buf(),
                },
            );
            None
        };

        Ok(BuildResult {
            package_path,
            manifest: staged.manifest,
            descriptor_path: staged.descriptor_path,
            build_root,
        })
    }

    async fn prepare_in_phases(
        &self,
        config: &BuildConfig,
        context: &BuildContext,
        phase: &mut BuildPhase,
    ) -> Result<StagedBuild, Error> {
        enter_phase(context, phase, BuildPhase::Prepare);
        let build_root = BuildRoot::setup(&config.temp_dir).await?;
        send_event(
            context,
            BuildEvent::BuildRootPrepared {
                session_id: context.session_id.clone(),
                path: build_root.top_dir().to_path_buf(),
                replaced_existing: build_root.replaced_existing(),
            },
        );

        enter_phase(context, phase, BuildPhase::Stage);
        let exclusions = ExclusionSet::build(Path::new("."), &config.exclude_files)?;
        let manifest = FileStager::new(&build_root, &exclusions)
            .with_context(context)
            .stage(&config.files)
            .await?;

        enter_phase(context, phase, BuildPhase::Describe);
        let descriptor_path = self
            .descriptor_writer
            .write(&manifest, config, &build_root)
            .await?;
        send_event(
            context,
            BuildEvent::DescriptorWritten {
                session_id: context.session_id.clone(),
                path: descriptor_path.clone(),
            },
        );

        Ok(StagedBuild {
            build_root,
            manifest,
            descriptor_path,
        })
    }

    /// `<program> -bb [-vv] --buildroot <BUILDROOT> <descriptor>`
    async fn invoke_tool(
        &self,
        config: &BuildConfig,
        context: &BuildContext,
        staged: &StagedBuild,
    ) -> Result<CommandOutput, Error> {
        let exec = &config.exec_opts;
        // Bare names are looked up first for a clearer error, on the PATH
        // the child will see
        if !exec.program.contains('/') {
            let search_cwd = match &exec.cwd {
                Some(cwd) => cwd.clone(),
                None => std::env::current_dir().map_err(|e| Error::io_with_path(&e, "."))?,
            };
            let search_path = exec
                .env
                .get("PATH")
                .map(OsString::from)
                .or_else(|| std::env::var_os("PATH"));
            let process = self.platform.process();
            match search_path {
                Some(paths) => process.which_in(&exec.program, &paths, &search_cwd).await?,
                None => process.which(&exec.program).await?,
            };
        }

        let mut cmd = self.platform.command(&exec.program);
        cmd.arg("-bb");
        if config.verbose {
            cmd.arg("-vv");
        }
        cmd.arg("--buildroot")
            .arg(staged.build_root.staging_dir().to_string_lossy())
            .arg(staged.descriptor_path.to_string_lossy());
        if let Some(cwd) = &exec.cwd {
            cmd.current_dir(cwd);
        }
        for (key, value) in &exec.env {
            cmd.env(key.clone(), value.clone());
        }

        let platform_ctx = self.platform.create_context(context.event_sender.clone());
        let output = self.platform.execute_command(&platform_ctx, cmd).await?;

        if context.verbose {
            for line in output
                .stdout_lossy()
                .lines()
                .chain(output.stderr_lossy().lines())
            {
                send_verbose_event(context, || BuildEvent::ToolOutput {
                    session_id: context.session_id.clone(),
                    line: line.to_string(),
                });
            }
        }

        Ok(output)
    }
}

impl Default for Builder {
    fn default() -> Self {
        Self::new()
    }
}

fn enter_phase(context: &BuildContext, current: &mut BuildPhase, next: BuildPhase) {
    *current = next;
    send_event(
        context,
        BuildEvent::PhaseStarted {
            session_id: context.session_id.clone(),
            phase: next,
        },
    );
}

async fn copy_artifact(context: &BuildContext, artifact: &Path, dir: &Path) -> Result<PathBuf, Error> {
    let file_name = artifact
        .file_name()
        .ok_or_else(|| Error::internal(format!("artifact path {} has no file name", artifact.display())))?;

    fs::create_dir_all(dir)
        .await
        .map_err(|e| Error::io_with_path(&e, dir))?;
    let target = dir.join(file_name);
    fs::copy(artifact, &target)
        .await
        .map_err(|e| Error::io_with_path(&e, artifact))?;

    send_event(
        context,
        BuildEvent::ArtifactCopied {
            session_id: context.session_id.clone(),
            from: artifact.to_path_buf(),
            to: target.clone(),
        },
    );
    Ok(target)
}
