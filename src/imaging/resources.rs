//! Named, embedded image resources.
//!
//! A [`Resources`] table maps a name to encoded image bytes. Bytes can be
//! compiled in with `include_bytes!` and registered via
//! [`Resources::insert_static`], or picked up from a directory at startup with
//! [`Resources::from_dir`]:
//!
//! ```text
//! res/
//! ├── avatar_placeholder.png   → "avatar_placeholder"
//! └── icons/
//!     └── star.jpg             → "star"
//! ```

use super::backend::BackendError;
use std::borrow::Cow;
use std::collections::BTreeMap;
use std::path::Path;
use walkdir::WalkDir;

/// Table of encoded image bytes, keyed by resource name.
#[derive(Debug, Clone, Default)]
pub struct Resources {
    entries: BTreeMap<String, Cow<'static, [u8]>>,
}

impl Resources {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register every file under `dir` by its file stem.
    ///
    /// Walks recursively in file-name order. When two files share a stem the
    /// later one in walk order replaces the earlier.
    pub fn from_dir(dir: &Path) -> Result<Self, BackendError> {
        let mut resources = Self::new();
        for entry in WalkDir::new(dir).sort_by_file_name() {
            let entry = entry.map_err(|e| {
                BackendError::Io(e.into_io_error().unwrap_or_else(|| {
                    std::io::Error::other(format!("failed to walk {}", dir.display()))
                }))
            })?;
            if !entry.file_type().is_file() {
                continue;
            }
            let Some(stem) = entry.path().file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            let bytes = std::fs::read(entry.path())?;
            resources.insert(stem, bytes);
        }
        Ok(resources)
    }

    /// Register owned bytes under `name`, replacing any previous entry.
    pub fn insert(&mut self, name: impl Into<String>, bytes: Vec<u8>) {
        self.entries.insert(name.into(), Cow::Owned(bytes));
    }

    /// Register bytes that live for the whole program, e.g. `include_bytes!`.
    pub fn insert_static(&mut self, name: impl Into<String>, bytes: &'static [u8]) {
        self.entries.insert(name.into(), Cow::Borrowed(bytes));
    }

    pub fn get(&self, name: &str) -> Option<&[u8]> {
        self.entries.get(name).map(|b| b.as_ref())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Resource names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up `name`, mapping a miss to [`BackendError::MissingResource`].
    pub(crate) fn require(&self, name: &str) -> Result<&[u8], BackendError> {
        self.get(name)
            .ok_or_else(|| BackendError::MissingResource(name.to_string()))
    }
}
