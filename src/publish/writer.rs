use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::publish::PublishError;

/// A file written next to its target and not yet renamed into place.
#[derive(Debug)]
pub struct StagedFile {
    temp: PathBuf,
    target: PathBuf,
}

/// Serialize `value` as pretty JSON into `<target>.tmp` and fsync it.
pub fn stage_json<T: Serialize>(target: &Path, value: &T) -> Result<StagedFile, PublishError> {
    let temp = target.with_extension("json.tmp");
    if let Some(parent) = target.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| PublishError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    let mut json = serde_json::to_vec_pretty(value)?;
    json.push(b'\n');

    let io_err = |source: std::io::Error| PublishError::Io {
        path: temp.clone(),
        source,
    };
    let mut f = fs::File::create(&temp).map_err(io_err)?;
    f.write_all(&json).map_err(io_err)?;
    f.sync_all().map_err(io_err)?;

    Ok(StagedFile {
        temp,
        target: target.to_path_buf(),
    })
}

/// Rename every staged file into place.
///
/// Nothing is renamed until all files are staged, so a failure while
/// staging leaves the previous outputs untouched.
pub fn commit(staged: Vec<StagedFile>) -> Result<(), PublishError> {
    for file in staged {
        fs::rename(&file.temp, &file.target).map_err(|source| PublishError::Io {
            path: file.target.clone(),
            source,
        })?;
    }
    Ok(())
}

/// Remove staged temp files after a failed run.
pub fn discard(staged: Vec<StagedFile>) {
    for file in staged {
        if let Err(e) = fs::remove_file(&file.temp) {
            tracing::debug!(path = %file.temp.display(), error = %e, "Failed to remove staged file");
        }
    }
}
