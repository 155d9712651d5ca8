/// Entry point object
use crate::engine::TagEngine;
use crate::error::Result;
use crate::file::File;
use std::path::Path;
use std::rc::Rc;

/// Opens files with one engine
///
/// Construct once at startup and keep it for the life of the program.
pub struct MTag<E: TagEngine> {
    engine: Rc<E>,
}

impl<E: TagEngine> MTag<E> {
    /// Create a new factory around `engine`
    pub fn new(engine: E) -> Self {
        Self {
            engine: Rc::new(engine),
        }
    }

    /// The engine used to open files
    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Open a media file
    ///
    /// # Errors
    /// Returns `MTagError::OpenFailure` if the file cannot be opened; no
    /// `File` is produced in that case
    pub fn open(&self, path: impl AsRef<Path>) -> Result<File<E>> {
        File::open_with(Rc::clone(&self.engine), path)
    }
}

impl<E: TagEngine + Default> Default for MTag<E> {
    fn default() -> Self {
        Self::new(E::default())
    }
}
