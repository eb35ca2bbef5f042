use std::path::Path;
use std::process::Command;

use crate::error::{Error, Result};

/// Runs `poetry install` in the project directory to bootstrap the
/// workspace. A missing poetry binary turns into a dedicated error with an
/// installation hint.
pub fn run_poetry_install(project_dir: &Path) -> Result<()> {
    log::info!("Running poetry install in {}", project_dir.display());
    let status = Command::new("poetry")
        .arg("install")
        .current_dir(project_dir)
        .status()
        .map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::InstallerNotFound
            } else {
                Error::ProcessError { command: "poetry install".to_string(), e: e.to_string() }
            }
        })?;

    if !status.success() {
        return Err(Error::InstallExecutionError { status });
    }
    Ok(())
}
