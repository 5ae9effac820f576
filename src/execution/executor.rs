//! Step executor - runs one step against the install context

use crate::{
    core::{context, InstallContext, Step, StepAction},
    runner::{CommandRunner, CommandSpec, StepError},
};
use std::path::Path;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info};

/// Executes a single step
///
/// All actions go through one contract: run to completion, return a
/// structured result. Subprocess invocations are delegated to the
/// command runner; file writes are performed here with tokio::fs.
pub struct StepExecutor<R> {
    runner: R,
}

impl<R: CommandRunner> StepExecutor<R> {
    pub fn new(runner: R) -> Self {
        Self { runner }
    }

    /// Access the underlying runner (test hook)
    #[cfg(test)]
    pub(crate) fn runner_ref(&self) -> &R {
        &self.runner
    }

    /// Execute a step, recording any produced values into the context
    pub async fn execute(&self, step: &Step, ctx: &mut InstallContext) -> Result<(), StepError> {
        info!("Executing step: {}", step.id);

        match &step.action {
            StepAction::EnsureInstallDir => {
                let dir = ctx.install_dir().to_path_buf();
                debug!("Ensuring install directory {}", dir.display());
                tokio::fs::create_dir_all(&dir)
                    .await
                    .map_err(|e| StepError::Io {
                        path: dir,
                        source: e,
                    })?;
            }

            StepAction::DownloadArchive { url, file_name } => {
                let spec = CommandSpec::new(
                    "curl",
                    &[
                        "-fsSL".to_string(),
                        url.clone(),
                        "-o".to_string(),
                        file_name.clone(),
                    ],
                )
                .with_cwd(ctx.install_dir().to_path_buf());
                self.runner.run(&spec).await?;
                ctx.set_value(context::ARCHIVE_FILE, file_name.clone());
            }

            StepAction::ExtractArchive => {
                let archive = ctx
                    .value(context::ARCHIVE_FILE)
                    .ok_or(StepError::MissingContextValue(context::ARCHIVE_FILE))?
                    .to_string();
                let spec = CommandSpec::new("tar", &["-xzf".to_string(), archive])
                    .with_cwd(ctx.install_dir().to_path_buf());
                self.runner.run(&spec).await?;
            }

            StepAction::RunCommand {
                program,
                args,
                in_install_dir,
            } => {
                let mut spec = CommandSpec::new(program, args);
                if *in_install_dir {
                    spec = spec.with_cwd(ctx.install_dir().to_path_buf());
                }
                self.runner.run(&spec).await?;
            }

            StepAction::WriteServiceUnit {
                unit_path,
                contents,
            } => {
                debug!("Writing service unit {}", unit_path.display());
                write_flushed(unit_path, contents).await?;
            }

            StepAction::WriteStartScript {
                file_name,
                contents,
            } => {
                let path = ctx.path_in_install_dir(file_name);
                debug!("Writing start script {}", path.display());
                // The permission change must happen strictly after the
                // write has been flushed, and the step only succeeds once
                // both are confirmed.
                write_flushed(&path, contents).await?;
                mark_executable(&path).await?;
            }
        }

        info!("Step {} completed successfully", step.id);
        Ok(())
    }
}

/// Write a file and flush it to disk before returning
async fn write_flushed(path: &Path, contents: &str) -> Result<(), StepError> {
    let io_err = |e| StepError::Io {
        path: path.to_path_buf(),
        source: e,
    };

    let mut file = tokio::fs::File::create(path).await.map_err(io_err)?;
    file.write_all(contents.as_bytes()).await.map_err(io_err)?;
    file.sync_all().await.map_err(io_err)?;
    Ok(())
}

/// Set the executable bit on a written script
async fn mark_executable(path: &Path) -> Result<(), StepError> {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let perms = std::fs::Permissions::from_mode(0o755);
        tokio::fs::set_permissions(path, perms)
            .await
            .map_err(|e| StepError::Io {
                path: path.to_path_buf(),
                source: e,
            })?;
    }
    #[cfg(not(unix))]
    {
        let _ = path;
    }
    Ok(())
}
