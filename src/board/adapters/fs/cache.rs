//! Local cache persisted as one JSON file per key.

use camino::Utf8Path;
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use std::io;

use crate::board::ports::{LocalCache, LocalCacheError, LocalCacheResult};

/// Local cache backed by a capability directory.
///
/// Each key maps to one `.json` file named after the encoded key. Writes go
/// to a temporary file first and are renamed into place so a crash never
/// leaves a half-written snapshot.
#[derive(Debug)]
pub struct FileLocalCache {
    dir: Dir,
}

impl FileLocalCache {
    /// Opens a cache rooted at an existing directory.
    ///
    /// # Errors
    ///
    /// Returns [`LocalCacheError::Storage`] when the directory cannot be
    /// opened.
    pub fn open(path: &Utf8Path) -> LocalCacheResult<Self> {
        let dir =
            Dir::open_ambient_dir(path, ambient_authority()).map_err(LocalCacheError::storage)?;
        Ok(Self { dir })
    }

    /// Wraps an already opened directory.
    #[must_use]
    pub const fn from_dir(dir: Dir) -> Self {
        Self { dir }
    }
}

/// Maps a key to `{encoded}.json`.
///
/// ASCII letters, digits, `-` and `_` are kept; every other byte becomes
/// `%XX`. The mapping is injective and never yields a dot, a separator or
/// a hidden name, so distinct keys always land in distinct files.
fn file_name(key: &str) -> LocalCacheResult<String> {
    if key.is_empty() {
        return Err(LocalCacheError::InvalidKey(key.to_owned()));
    }
    let mut name = String::with_capacity(key.len() + 5);
    for byte in key.bytes() {
        if byte.is_ascii_alphanumeric() || matches!(byte, b'-' | b'_') {
            name.push(char::from(byte));
        } else {
            name.push_str(&format!("%{byte:02X}"));
        }
    }
    name.push_str(".json");
    Ok(name)
}

impl LocalCache for FileLocalCache {
    fn get(&self, key: &str) -> LocalCacheResult<Option<String>> {
        let name = file_name(key)?;
        match self.dir.read_to_string(&name) {
            Ok(contents) => Ok(Some(contents)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(LocalCacheError::storage(err)),
        }
    }

    fn set(&self, key: &str, value: &str) -> LocalCacheResult<()> {
        let name = file_name(key)?;
        let staging = format!("{name}.tmp");
        self.dir
            .write(&staging, value)
            .map_err(LocalCacheError::storage)?;
        self.dir
            .rename(&staging, &self.dir, &name)
            .map_err(LocalCacheError::storage)
    }
}
