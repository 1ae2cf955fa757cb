use anyhow::Result;
use std::path::PathBuf;

const LOG_FOLDER_NAME: &str = "Migration_Wizard_Log";

/// Resolve the folder the binary is running from (absolute path).
pub fn resolve_deployment_folder() -> Result<PathBuf> {
    // Prefer the folder where the executable lives (works in dev and deployed).
    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(dir) = exe_path.parent() {
            return Ok(dir.to_path_buf());
        }
    }

    // Fallback: current working directory.
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    Ok(cwd)
}

/// Resolve the log folder (absolute path), creating it if needed.
///
/// Walk up from the CWD looking for an existing `Migration_Wizard_Log/` so that
/// runs from nested directories reuse the workspace-level folder instead of
/// scattering new ones.
pub fn resolve_log_folder() -> Result<PathBuf> {
    if let Ok(mut dir) = std::env::current_dir() {
        for _ in 0..12 {
            let candidate = dir.join(LOG_FOLDER_NAME);
            if candidate.exists() {
                return Ok(candidate);
            }
            if let Some(parent) = dir.parent() {
                dir = parent.to_path_buf();
            } else {
                break;
            }
        }
    }

    // No existing folder found: create one next to the binary (best-effort).
    let base = resolve_deployment_folder()?;
    let log_dir = base.join(LOG_FOLDER_NAME);
    std::fs::create_dir_all(&log_dir)
        .map_err(|e| anyhow::anyhow!("Failed to create log folder: {}", e))?;
    Ok(log_dir)
}
