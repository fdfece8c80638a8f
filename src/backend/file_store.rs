use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use log::debug;

use crate::backend::interface::{BackendError, KeyValueStore, Result};

const FILE_EXTENSION: &str = "json";
const TMP_SUFFIX: &str = "tmp";

/// Keeps every key in its own file under a data directory.
///
/// Keys map to file names unchanged, so only letters, digits, `-` and `_`
/// are accepted. Two distinct keys never share a file.
#[derive(Debug, Clone)]
pub struct FileKeyValueStore {
    root: PathBuf
}

impl FileKeyValueStore {
    /// The directory is created lazily on the first write.
    pub fn new(root: impl AsRef<Path>) -> FileKeyValueStore {
        FileKeyValueStore { root: root.as_ref().to_path_buf() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path_for(&self, key: &str) -> Result<PathBuf> {
        check_key(key)?;
        Ok(self.root.join(format!("{}.{}", key, FILE_EXTENSION)))
    }
}

impl KeyValueStore for FileKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into())
        }
    }

    fn put(&self, key: &str, value: &str) -> Result<()> {
        let path = self.path_for(key)?;
        fs::create_dir_all(&self.root)?;
        let tmp = path.with_extension(format!("{}.{}", FILE_EXTENSION, TMP_SUFFIX));

        let written = write_file(&tmp, value).and_then(|_| fs::rename(&tmp, &path));
        if let Err(err) = written {
            let _ = fs::remove_file(&tmp);
            return Err(err.into());
        }

        debug!("wrote {} bytes to {}", value.len(), path.display());
        Ok(())
    }
}

fn write_file(path: &Path, value: &str) -> std::io::Result<()> {
    let mut file = fs::File::create(path)?;
    file.write_all(value.as_bytes())?;
    file.sync_all()
}

/// Accepts keys that are already valid file stems.
pub fn check_key(key: &str) -> Result<()> {
    let valid = !key.is_empty()
        && key.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if valid {
        Ok(())
    } else {
        Err(BackendError::InvalidKey(key.to_owned()))
    }
}
