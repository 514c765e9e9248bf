//! Materializes a downloaded payload on disk.
//!
//! The payload is first staged into a temporary file, then handed to the save
//! target. The staged file is removed when [`StagedPayload`] drops, whichever way
//! delivery ends.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use bytes::Bytes;
use tokio::fs::{File, OpenOptions};

use crate::{domain::AppError, utils::get_timestamp_millis};

static STAGE_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Where a delivered file ends up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveTarget {
    /// Ask the user through the native save dialog.
    Prompt,
    /// Write straight into a directory without asking.
    Directory(PathBuf),
}

/// Temporary on-disk copy of a payload, removed on drop.
#[derive(Debug)]
pub struct StagedPayload {
    path: PathBuf,
}

impl StagedPayload {
    pub async fn stage(dir: &Path, payload: &Bytes) -> Result<Self, AppError> {
        let name = format!(
            "quick-grab-{}-{}-{}.part",
            std::process::id(),
            get_timestamp_millis(),
            STAGE_COUNTER.fetch_add(1, Ordering::Relaxed)
        );
        let path = dir.join(name);
        // Guard exists before the write so a partial file is still cleaned up.
        let staged = Self { path };
        tokio::fs::write(&staged.path, payload)
            .await
            .map_err(|e| AppError::Io(format!("Failed to stage payload: {}", e)))?;
        Ok(staged)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for StagedPayload {
    fn drop(&mut self) {
        if let Err(e) = std::fs::remove_file(&self.path) {
            if e.kind() != ErrorKind::NotFound {
                tracing::warn!(path = %self.path.display(), error = %e, "failed to release staged payload");
            }
        }
    }
}

fn numbered_name(file_name: &str, n: u32) -> String {
    if n == 0 {
        return file_name.to_string();
    }
    match file_name.rsplit_once('.') {
        Some((stem, ext)) => format!("{} ({}).{}", stem, n, ext),
        None => format!("{} ({})", file_name, n),
    }
}

/// Creates `dir/name`, or `dir/stem (n).ext` when that already exists.
///
/// Uses `create_new` so a file appearing concurrently is never overwritten.
pub async fn create_unique(dir: &Path, file_name: &str) -> Result<(PathBuf, File), AppError> {
    let mut n = 0;
    loop {
        let candidate = dir.join(numbered_name(file_name, n));
        match OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&candidate)
            .await
        {
            Ok(file) => return Ok((candidate, file)),
            Err(e) if e.kind() == ErrorKind::AlreadyExists => n += 1,
            Err(e) => {
                return Err(AppError::Io(format!(
                    "Failed to create {}: {}",
                    candidate.display(),
                    e
                )))
            }
        }
    }
}

async fn copy_staged(staged: &StagedPayload, destination: &Path, mut file: File) -> Result<(), AppError> {
    let result = async {
        let mut source = File::open(staged.path()).await?;
        tokio::io::copy(&mut source, &mut file).await?;
        file.sync_all().await
    }
    .await;

    if let Err(e) = result {
        drop(file);
        // A partial destination is worse than none.
        let _ = tokio::fs::remove_file(destination).await;
        return Err(AppError::Io(format!(
            "Failed to write {}: {}",
            destination.display(),
            e
        )));
    }
    Ok(())
}

/// Stages the payload in the system temp directory, then delivers it.
///
/// Returns `Ok(None)` when the user dismisses the save dialog.
pub async fn deliver(
    payload: Bytes,
    file_name: String,
    target: SaveTarget,
) -> Result<Option<PathBuf>, AppError> {
    deliver_in(&std::env::temp_dir(), payload, file_name, target).await
}

/// Stages the payload under `stage_dir`, places it per `target`, and releases the
/// staged copy on every return path.
pub async fn deliver_in(
    stage_dir: &Path,
    payload: Bytes,
    file_name: String,
    target: SaveTarget,
) -> Result<Option<PathBuf>, AppError> {
    let staged = StagedPayload::stage(stage_dir, &payload).await?;

    let (destination, file) = match target {
        SaveTarget::Directory(dir) => {
            tokio::fs::create_dir_all(&dir)
                .await
                .map_err(|e| AppError::Io(format!("Failed to create {}: {}", dir.display(), e)))?;
            create_unique(&dir, &file_name).await?
        }
        SaveTarget::Prompt => {
            let path = match rfd::AsyncFileDialog::new()
                .set_file_name(&file_name)
                .save_file()
                .await
            {
                Some(handle) => handle.path().to_path_buf(),
                None => return Ok(None),
            };
            // The dialog already confirmed any overwrite.
            let file = File::create(&path)
                .await
                .map_err(|e| AppError::Io(format!("Failed to create {}: {}", path.display(), e)))?;
            (path, file)
        }
    };

    copy_staged(&staged, &destination, file).await?;

    tracing::info!(path = %destination.display(), bytes = payload.len(), "payload saved");
    Ok(Some(destination))
}
