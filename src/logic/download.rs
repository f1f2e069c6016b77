//! Saving downloaded NZBs to disk.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::sources::ApiClient;
use crate::state::types::{NzbFile, StatusLine};
use crate::util::nzb_file_name;

/// First path under `dir` for `name` that does not exist yet (`name`, `stem-1.nzb`, ...).
fn free_path(dir: &Path, name: &str) -> PathBuf {
    let first = dir.join(name);
    if !first.exists() {
        return first;
    }
    let stem = if name.to_ascii_lowercase().ends_with(".nzb") {
        &name[..name.len() - 4]
    } else {
        name
    };
    (1u32..)
        .map(|n| dir.join(format!("{stem}-{n}.nzb")))
        .find(|p| !p.exists())
        .unwrap_or(first)
}

/// What: Write a downloaded NZB into `dir`.
///
/// Inputs:
/// - `dir`: Target directory (created when missing).
/// - `key`: Download key, used as the name when the server sent none.
/// - `file`: Downloaded payload.
///
/// Output:
/// - Full path of the written file.
///
/// Details:
/// - An existing file is never overwritten; a numbered name is used instead.
///
/// # Errors
/// - Directory creation or file write failures.
pub fn save_nzb(dir: &Path, key: &str, file: &NzbFile) -> std::io::Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let name = nzb_file_name(file.filename.as_deref().unwrap_or_default(), key);
    let path = free_path(dir, &name);
    if path.file_name().and_then(|n| n.to_str()) != Some(name.as_str()) {
        info!(name = %name, path = %path.display(), "nzb exists; saving under a new name");
    }
    fs::write(&path, &file.bytes)?;
    Ok(path)
}

/// What: Download the NZB behind `key` and save it into `dir`.
///
/// Output:
/// - `Saved {file}` or `Download failed: {msg}`.
///
/// Details:
/// - The file write runs on the blocking pool.
pub async fn download_to(api: &ApiClient, dir: &Path, key: &str) -> StatusLine {
    let file = match api.download_nzb(key).await {
        Ok(file) => file,
        Err(e) => {
            warn!(key, error = %e, "nzb download failed");
            return StatusLine::error(format!("Download failed: {e}"));
        }
    };
    let bytes = file.bytes.len();
    let (dir_owned, key_owned) = (dir.to_path_buf(), key.to_string());
    let written =
        tokio::task::spawn_blocking(move || save_nzb(&dir_owned, &key_owned, &file)).await;
    match written {
        Ok(Ok(path)) => {
            info!(path = %path.display(), bytes, "nzb saved");
            StatusLine::neutral(format!("Saved {}", path.display()))
        }
        Ok(Err(e)) => {
            warn!(key, error = %e, "writing nzb failed");
            StatusLine::error(format!("Download failed: {e}"))
        }
        Err(e) => {
            warn!(key, error = %e, "nzb write task failed");
            StatusLine::error(format!("Download failed: {e}"))
        }
    }
}
