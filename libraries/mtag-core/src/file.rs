//! File handle and tag acquisition

use crate::engine::TagEngine;
use crate::error::{MTagError, Result};
use crate::flavor::{FlavorId, TagOrigin};
use crate::tag::{Tag, TagState};
use std::cell::RefCell;
use std::fmt;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use tracing::{debug, trace};

/// State shared between a [`File`] and every [`Tag`] acquired from it
pub(crate) struct FileShared<E: TagEngine> {
    engine: Rc<E>,
    path: PathBuf,
    /// Taken exactly once, on close or drop
    native: RefCell<Option<E::File>>,
    /// Single memoization slot
    slot: RefCell<Option<Rc<TagState<E>>>>,
}

impl<E: TagEngine> FileShared<E> {
    pub(crate) fn path(&self) -> &Path {
        &self.path
    }

    pub(crate) fn with_native<R>(&self, f: impl FnOnce(&E, &E::File) -> R) -> Result<R> {
        let native = self.native.borrow();
        let file = native.as_ref().ok_or(MTagError::Closed)?;
        Ok(f(&self.engine, file))
    }

    pub(crate) fn with_native_mut<R>(&self, f: impl FnOnce(&E, &mut E::File) -> R) -> Result<R> {
        let mut native = self.native.borrow_mut();
        let file = native.as_mut().ok_or(MTagError::Closed)?;
        Ok(f(&self.engine, file))
    }

    fn release(&self) {
        let taken = self.native.borrow_mut().take();
        if let Some(file) = taken {
            debug!("Closing {}", self.path.display());
            self.engine.close(file);
        }
    }
}

impl<E: TagEngine> Drop for FileShared<E> {
    fn drop(&mut self) {
        self.release();
    }
}

/// An open media file
///
/// Owns the engine's native file resource and a single cached [`Tag`].
/// Handles are `!Send`: a file and its tags belong to one thread.
///
/// # Tag acquisition
///
/// - [`File::tag`] and [`File::tag_with`] are memoized in one slot. The first
///   call decides which tag is cached; later calls return that same tag and
///   ignore their arguments.
/// - [`File::lookup`] always asks the engine (never creating anything),
///   replaces the cached tag with its result and reports a missing flavor
///   as `None`.
pub struct File<E: TagEngine> {
    shared: Rc<FileShared<E>>,
}

impl<E: TagEngine> File<E> {
    /// Open `path` with `engine`
    ///
    /// # Errors
    /// Returns `MTagError::OpenFailure` if the engine cannot open the file
    pub fn open_with(engine: Rc<E>, path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let native = engine.open(path)?;
        debug!("Opened {}", path.display());

        Ok(Self {
            shared: Rc::new(FileShared {
                engine,
                path: path.to_path_buf(),
                native: RefCell::new(Some(native)),
                slot: RefCell::new(None),
            }),
        })
    }

    /// Path this file was opened from
    pub fn path(&self) -> &Path {
        self.shared.path()
    }

    /// Descriptive type label, queried from the engine on every call
    pub fn file_type(&self) -> Result<String> {
        self.shared.with_native(|engine, file| engine.file_type(file))
    }

    /// Remove a tag flavor in memory
    ///
    /// Takes effect on disk at the next [`File::save`]. Does not touch the
    /// cached tag.
    pub fn strip(&self, flavor: impl Into<FlavorId>) -> Result<()> {
        let flavor = flavor.into();
        debug!("Stripping '{}' from {}", flavor, self.path().display());
        self.shared
            .with_native_mut(|engine, file| engine.remove_tag(file, &flavor))
    }

    /// Write the in-memory state (field edits, strips) to disk
    ///
    /// # Errors
    /// Propagates the engine's write failure
    pub fn save(&self) -> Result<()> {
        debug!("Saving {}", self.path().display());
        self.shared.with_native_mut(|engine, file| engine.save(file))?
    }

    /// Release the native file resource
    ///
    /// Tags acquired from this file remain valid values, but every field
    /// operation on them fails with `MTagError::Closed`.
    pub fn close(self) {
        self.shared.release();
    }

    /// Default tag, memoized
    pub fn tag(&self) -> Result<Tag<E>> {
        self.memoized(TagOrigin::Default, |engine, file| engine.default_tag(file))
    }

    /// Tag of `flavor`, memoized
    ///
    /// Only consulted while the cache slot is empty; once any tag is cached
    /// it is returned regardless of `flavor` and `create`. The cached tag may
    /// be absent when the flavor is missing and `create` is false.
    pub fn tag_with(&self, flavor: impl Into<FlavorId>, create: bool) -> Result<Tag<E>> {
        let flavor = flavor.into();
        let origin = TagOrigin::Flavor(flavor.clone());
        self.memoized(origin, |engine, file| engine.tag(file, &flavor, create))
    }

    /// Tag of `flavor`, memoized, without creating it
    ///
    /// Same as `tag_with(flavor, false)`.
    pub fn tag_for(&self, flavor: impl Into<FlavorId>) -> Result<Tag<E>> {
        self.tag_with(flavor, false)
    }

    /// One-shot query for a tag flavor
    ///
    /// Never creates a tag. The fresh result always replaces the cached
    /// tag, even when the flavor is missing.
    pub fn lookup(&self, flavor: impl Into<FlavorId>) -> Result<Option<Tag<E>>> {
        let flavor = flavor.into();
        let native = self
            .shared
            .with_native_mut(|engine, file| engine.tag(file, &flavor, false))?;

        trace!(
            "Lookup of '{}' in {}: {}",
            flavor,
            self.path().display(),
            if native.is_some() { "present" } else { "absent" }
        );

        let state = Rc::new(TagState::new(TagOrigin::Flavor(flavor), native));
        *self.shared.slot.borrow_mut() = Some(Rc::clone(&state));

        let tag = Tag::new(Rc::clone(&self.shared), state);
        Ok(tag.is_present().then_some(tag))
    }

    /// The tag currently held in the cache slot, if any
    pub fn cached_tag(&self) -> Option<Tag<E>> {
        self.shared
            .slot
            .borrow()
            .as_ref()
            .map(|state| Tag::new(Rc::clone(&self.shared), Rc::clone(state)))
    }

    fn memoized(
        &self,
        origin: TagOrigin,
        acquire: impl FnOnce(&E, &mut E::File) -> Option<E::Tag>,
    ) -> Result<Tag<E>> {
        if let Some(cached) = self.cached_tag() {
            trace!("Tag cache hit for {}", self.path().display());
            return Ok(cached);
        }

        let native = self.shared.with_native_mut(acquire)?;
        trace!(
            "Caching tag {} for {} ({})",
            origin,
            self.path().display(),
            if native.is_some() { "present" } else { "absent" }
        );

        let state = Rc::new(TagState::new(origin, native));
        *self.shared.slot.borrow_mut() = Some(Rc::clone(&state));
        Ok(Tag::new(Rc::clone(&self.shared), state))
    }
}

impl<E: TagEngine> fmt::Debug for File<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("File")
            .field("path", &self.shared.path)
            .field("closed", &self.shared.native.borrow().is_none())
            .finish_non_exhaustive()
    }
}
