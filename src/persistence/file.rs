//! File-backed storage with atomic replacement

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use super::{PersistError, PersistResult, Storage};

/// One JSON file on disk.
///
/// Writes go to `<path>.tmp`, are flushed to disk, then renamed over the
/// target, so a crash leaves either the old or the new record.
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_owned();
        name.push(".tmp");
        PathBuf::from(name)
    }
}

impl Storage for FileStorage {
    fn read(&self) -> PersistResult<Option<String>> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(PersistError::io(&self.path, e)),
        }
    }

    fn write(&mut self, contents: &str) -> PersistResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| PersistError::io(parent, e))?;
        }

        let tmp = self.tmp_path();
        let mut file = fs::File::create(&tmp).map_err(|e| PersistError::io(&tmp, e))?;
        file.write_all(contents.as_bytes())
            .and_then(|_| file.sync_all())
            .map_err(|e| PersistError::io(&tmp, e))?;
        drop(file);

        fs::rename(&tmp, &self.path).map_err(|e| PersistError::io(&self.path, e))
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}
