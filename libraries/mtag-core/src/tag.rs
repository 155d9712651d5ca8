//! Tag handle and field access

use crate::engine::TagEngine;
use crate::error::{MTagError, Result};
use crate::fields::{collect_fields, FieldMap};
use crate::file::FileShared;
use crate::flavor::TagOrigin;
use std::fmt;
use std::path::Path;
use std::rc::Rc;

const ARTIST: &str = "artist";
const TITLE: &str = "title";

/// Native tag resource plus how it was acquired
///
/// An absent resource stays absent for the lifetime of the state.
pub(crate) struct TagState<E: TagEngine> {
    origin: TagOrigin,
    native: Option<E::Tag>,
}

impl<E: TagEngine> TagState<E> {
    pub(crate) fn new(origin: TagOrigin, native: Option<E::Tag>) -> Self {
        Self { origin, native }
    }
}

/// A tag inside an open [`File`](crate::File)
///
/// Keeps its file's state alive. Clones refer to the same tag instance.
pub struct Tag<E: TagEngine> {
    file: Rc<FileShared<E>>,
    state: Rc<TagState<E>>,
}

impl<E: TagEngine> Tag<E> {
    pub(crate) fn new(file: Rc<FileShared<E>>, state: Rc<TagState<E>>) -> Self {
        Self { file, state }
    }

    /// How this tag was acquired
    pub fn origin(&self) -> &TagOrigin {
        &self.state.origin
    }

    /// Whether the engine returned a tag resource
    pub fn is_present(&self) -> bool {
        self.state.native.is_some()
    }

    /// Path of the owning file
    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Whether `self` and `other` are the same tag instance
    pub fn same_instance(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.state, &other.state)
    }

    /// Value of `key`, or `None` if the tag has no such field
    ///
    /// # Errors
    /// `MTagError::FieldAccessOnAbsentTag` if the tag is absent,
    /// `MTagError::Closed` if the file has been closed
    pub fn get(&self, key: &str) -> Result<Option<String>> {
        let tag = self.native()?;
        self.file
            .with_native(|engine, file| engine.field(file, tag, key))
    }

    /// Assign `value` to `key`; persisted by `File::save`
    pub fn set(&self, key: &str, value: &str) -> Result<()> {
        let tag = self.native()?;
        self.file
            .with_native_mut(|engine, file| engine.set_field(file, tag, key, value))
    }

    pub fn artist(&self) -> Result<Option<String>> {
        self.get(ARTIST)
    }

    pub fn title(&self) -> Result<Option<String>> {
        self.get(TITLE)
    }

    pub fn set_artist(&self, artist: &str) -> Result<()> {
        self.set(ARTIST, artist)
    }

    pub fn set_title(&self, title: &str) -> Result<()> {
        self.set(TITLE, title)
    }

    /// All fields as a mapping, rebuilt on every call
    ///
    /// When the engine reports a key more than once, the last value wins.
    pub fn get_all(&self) -> Result<FieldMap> {
        let tag = self.native()?;
        let fields = self
            .file
            .with_native(|engine, file| engine.fields(file, tag))?;
        Ok(collect_fields(fields))
    }

    fn native(&self) -> Result<&E::Tag> {
        self.state
            .native
            .as_ref()
            .ok_or_else(|| MTagError::FieldAccessOnAbsentTag {
                origin: self.state.origin.clone(),
            })
    }
}

impl<E: TagEngine> Clone for Tag<E> {
    fn clone(&self) -> Self {
        Self {
            file: Rc::clone(&self.file),
            state: Rc::clone(&self.state),
        }
    }
}

impl<E: TagEngine> fmt::Debug for Tag<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tag")
            .field("path", &self.file.path())
            .field("origin", &self.state.origin)
            .field("present", &self.is_present())
            .finish()
    }
}
