//! Scene files held in memory.

use std::path::{Path, PathBuf};

use osgb_decode::Scene;

use crate::error::{Error, Result};

/// A scene file read fully into memory.
///
/// Decoded scenes borrow the buffer, so the file must stay alive for as long
/// as any [`Scene`] taken from it.
#[derive(Debug, Clone)]
pub struct SceneFile {
    path: PathBuf,
    bytes: Vec<u8>,
}

impl SceneFile {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let bytes = std::fs::read(&path).map_err(|source| Error::Io {
            path: path.clone(),
            source,
        })?;
        tracing::debug!(path = %path.display(), bytes = bytes.len(), "read scene file");
        Ok(Self { path, bytes })
    }

    /// Wrap bytes that did not come from disk.
    #[must_use]
    pub fn from_bytes(path: impl Into<PathBuf>, bytes: Vec<u8>) -> Self {
        Self {
            path: path.into(),
            bytes,
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn decode(&self) -> Result<Scene<'_>> {
        osgb_decode::decode(&self.bytes).map_err(|source| Error::Decode {
            path: self.path.clone(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use osgb_decode::ErrorKind;

    use super::*;
    use crate::test_util::{minimal_group, scratch_dir};

    #[test]
    fn open_and_decode() {
        let dir = scratch_dir("file_open");
        let path = dir.join("tile.osgb");
        std::fs::write(&path, minimal_group()).unwrap();

        let file = SceneFile::open(&path).unwrap();
        let scene = file.decode().unwrap();
        assert_eq!(scene.root_object().class_name(), "Group");
        std::fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = SceneFile::open("/nonexistent/tile.osgb").unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
        assert_eq!(err.path(), Some(Path::new("/nonexistent/tile.osgb")));
    }

    #[test]
    fn decode_error_keeps_path() {
        let file = SceneFile::from_bytes("bad.osgb", vec![0; 4]);
        let err = file.decode().unwrap_err();
        let Error::Decode { path, source } = &err else {
            panic!("expected decode error");
        };
        assert_eq!(path, Path::new("bad.osgb"));
        assert!(matches!(source.kind, ErrorKind::TruncatedInput { .. }));
    }
}
