//! Recursive batch decoding.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::{Error, Result};
use crate::file::SceneFile;

/// Result of decoding one file.
#[derive(Debug)]
pub struct Outcome {
    pub path: PathBuf,
    /// Number of distinct objects on success.
    pub result: Result<usize>,
}

impl Outcome {
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(extension))
}

/// Decode every regular file under `dir` whose extension matches
/// `extension` (without the dot), in file-name order.
///
/// Each file is decoded independently. Directory entries that cannot be
/// read are reported as failed outcomes rather than ending the walk.
#[must_use]
pub fn run(dir: &Path, extension: &str) -> Vec<Outcome> {
    let mut outcomes = Vec::new();

    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                let path = err.path().map(Path::to_path_buf).unwrap_or_default();
                tracing::warn!(path = %path.display(), %err, "skipping unreadable entry");
                outcomes.push(Outcome {
                    path,
                    result: Err(Error::Walk(err)),
                });
                continue;
            }
        };

        let path = entry.path();
        if !entry.file_type().is_file() || !has_extension(path, extension) {
            continue;
        }

        let result = SceneFile::open(path).and_then(|file| file.decode().map(|scene| scene.len()));
        match &result {
            Ok(objects) => tracing::debug!(path = %path.display(), objects, "decoded"),
            Err(err) => tracing::warn!(path = %path.display(), %err, "decode failed"),
        }
        outcomes.push(Outcome {
            path: path.to_path_buf(),
            result,
        });
    }

    tracing::info!(
        files = outcomes.len(),
        failed = outcomes.iter().filter(|o| !o.is_ok()).count(),
        "batch complete"
    );
    outcomes
}
