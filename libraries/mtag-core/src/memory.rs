//! In-memory tag engine
//!
//! Keeps a simulated disk of files in process memory. Opening a file copies
//! its stored state; `save` copies it back. Useful for tests and dry runs.

use crate::engine::TagEngine;
use crate::error::{MTagError, Result};
use crate::fields::RawField;
use crate::flavor::FlavorId;
use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use tracing::warn;

#[derive(Debug, Clone, Default)]
struct StoredFile {
    file_type: String,
    default_flavor: Option<FlavorId>,
    read_only: bool,
    tags: BTreeMap<FlavorId, Vec<RawField>>,
}

/// Open in-memory file
#[derive(Debug)]
pub struct MemoryFile {
    path: PathBuf,
    contents: StoredFile,
}

/// Tag engine backed by process memory
#[derive(Debug, Default)]
pub struct MemoryEngine {
    disk: RefCell<HashMap<PathBuf, StoredFile>>,
    open_handles: Cell<usize>,
}

impl MemoryEngine {
    /// Create an engine with an empty disk
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file with no tags
    pub fn with_file(mut self, path: impl Into<PathBuf>, file_type: &str) -> Self {
        self.disk.get_mut().insert(
            path.into(),
            StoredFile {
                file_type: file_type.to_string(),
                ..StoredFile::default()
            },
        );
        self
    }

    /// Set the flavor returned (and created if missing) as the default tag
    pub fn with_default_flavor(mut self, path: impl Into<PathBuf>, flavor: &str) -> Self {
        self.stored_mut(path.into()).default_flavor = Some(FlavorId::new(flavor));
        self
    }

    /// Make `save` fail for the file
    pub fn with_read_only(mut self, path: impl Into<PathBuf>) -> Self {
        self.stored_mut(path.into()).read_only = true;
        self
    }

    /// Append a field to a stored tag, creating the tag if needed
    ///
    /// Repeated keys are kept as separate entries.
    pub fn with_field(self, path: impl Into<PathBuf>, flavor: &str, key: &str, value: &str) -> Self {
        self.with_raw_field(path, flavor, RawField::new(key, value))
    }

    /// Append a possibly incomplete field to a stored tag
    pub fn with_raw_field(mut self, path: impl Into<PathBuf>, flavor: &str, field: RawField) -> Self {
        self.stored_mut(path.into())
            .tags
            .entry(FlavorId::new(flavor))
            .or_default()
            .push(field);
        self
    }

    /// Whether the stored (saved) file has a tag of `flavor`
    pub fn has_stored_tag(&self, path: impl AsRef<Path>, flavor: &str) -> bool {
        self.disk
            .borrow()
            .get(path.as_ref())
            .is_some_and(|file| file.tags.contains_key(&FlavorId::new(flavor)))
    }

    /// Fields of a stored tag
    pub fn stored_fields(&self, path: impl AsRef<Path>, flavor: &str) -> Option<Vec<RawField>> {
        self.disk
            .borrow()
            .get(path.as_ref())
            .and_then(|file| file.tags.get(&FlavorId::new(flavor)).cloned())
    }

    /// Number of files currently open
    pub fn open_handles(&self) -> usize {
        self.open_handles.get()
    }

    fn stored_mut(&mut self, path: PathBuf) -> &mut StoredFile {
        self.disk.get_mut().entry(path).or_default()
    }

    fn ensure_tag(file: &mut MemoryFile, flavor: &FlavorId, create: bool) -> Option<FlavorId> {
        if file.contents.tags.contains_key(flavor) {
            return Some(flavor.clone());
        }
        if !create {
            return None;
        }
        file.contents.tags.insert(flavor.clone(), Vec::new());
        Some(flavor.clone())
    }
}

impl TagEngine for MemoryEngine {
    type File = MemoryFile;
    type Tag = FlavorId;

    fn open(&self, path: &Path) -> Result<MemoryFile> {
        let contents = self
            .disk
            .borrow()
            .get(path)
            .cloned()
            .ok_or_else(|| MTagError::open_failure(path, "no such file"))?;

        self.open_handles.set(self.open_handles.get() + 1);
        Ok(MemoryFile {
            path: path.to_path_buf(),
            contents,
        })
    }

    fn close(&self, _file: MemoryFile) {
        self.open_handles.set(self.open_handles.get().saturating_sub(1));
    }

    fn file_type(&self, file: &MemoryFile) -> String {
        file.contents.file_type.clone()
    }

    fn default_tag(&self, file: &mut MemoryFile) -> Option<FlavorId> {
        let flavor = file.contents.default_flavor.clone()?;
        Self::ensure_tag(file, &flavor, true)
    }

    fn tag(&self, file: &mut MemoryFile, flavor: &FlavorId, create: bool) -> Option<FlavorId> {
        Self::ensure_tag(file, flavor, create)
    }

    fn remove_tag(&self, file: &mut MemoryFile, flavor: &FlavorId) {
        file.contents.tags.remove(flavor);
    }

    fn save(&self, file: &mut MemoryFile) -> Result<()> {
        if file.contents.read_only {
            return Err(MTagError::save(&file.path, "file is read-only"));
        }
        // Fabricated tags without fields are not written
        let mut stored = file.contents.clone();
        stored.tags.retain(|_, fields| !fields.is_empty());
        self.disk.borrow_mut().insert(file.path.clone(), stored);
        Ok(())
    }

    fn field(&self, file: &MemoryFile, tag: &FlavorId, key: &str) -> Option<String> {
        file.contents
            .tags
            .get(tag)?
            .iter()
            .rev()
            .find(|field| field.key.as_deref() == Some(key) && field.value.is_some())
            .and_then(|field| field.value.clone())
    }

    fn set_field(&self, file: &mut MemoryFile, tag: &FlavorId, key: &str, value: &str) {
        let Some(fields) = file.contents.tags.get_mut(tag) else {
            warn!("Tag '{}' was removed from {}; ignoring {}", tag, file.path.display(), key);
            return;
        };
        fields.retain(|field| field.key.as_deref() != Some(key));
        fields.push(RawField::new(key, value));
    }

    fn fields(&self, file: &MemoryFile, tag: &FlavorId) -> Vec<RawField> {
        file.contents.tags.get(tag).cloned().unwrap_or_default()
    }
}
