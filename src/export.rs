//! Writes exported quiz documents to disk.

use std::io::Write;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::info;

use crate::app_dirs;
use crate::config::ExportSettings;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Export path {0} has no parent directory")]
    NoParent(PathBuf),
    #[error("Failed to create export folder {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Could not resolve an export folder: {0}")]
    AppDir(#[from] app_dirs::AppDirError),
}

/// Write `html` to `path` exactly as given.
///
/// The bytes go to a temp file beside the destination that is renamed into
/// place once complete; a failed write leaves no partial file behind.
pub fn write_export(path: &Path, html: &str) -> Result<u64, ExportError> {
    let dir = path
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .ok_or_else(|| ExportError::NoParent(path.to_path_buf()))?;
    std::fs::create_dir_all(dir).map_err(|source| ExportError::CreateDir {
        path: dir.to_path_buf(),
        source,
    })?;
    let write_err = |source| ExportError::Write {
        path: path.to_path_buf(),
        source,
    };
    let mut temp = tempfile::Builder::new()
        .prefix(".quantquiz-export")
        .suffix(".tmp")
        .tempfile_in(dir)
        .map_err(write_err)?;
    temp.write_all(html.as_bytes()).map_err(write_err)?;
    temp.as_file().sync_all().map_err(write_err)?;
    temp.persist(path).map_err(|err| write_err(err.error))?;
    let written = html.len() as u64;
    info!(path = %path.display(), bytes = written, "wrote quiz export");
    Ok(written)
}

/// Destination offered when the save dialog opens.
pub fn default_destination(settings: &ExportSettings) -> Result<PathBuf, ExportError> {
    let dir = match &settings.default_dir {
        Some(dir) => dir.clone(),
        None => app_dirs::exports_dir()?,
    };
    Ok(dir.join(&settings.file_name))
}
