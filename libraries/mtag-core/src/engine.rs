/// Tag engine trait
use crate::error::Result;
use crate::fields::RawField;
use crate::flavor::FlavorId;
use std::path::Path;

/// Backend that parses and writes tag formats
///
/// The object model never looks inside `File` or `Tag`; it only hands them
/// back to the engine. A `Tag` is only meaningful together with the `File`
/// it was acquired from.
///
/// Engines are driven from a single thread, one call at a time.
pub trait TagEngine {
    /// Native file resource
    type File;

    /// Native tag resource
    type Tag;

    /// Open and parse the file at `path`
    ///
    /// # Errors
    /// Returns `MTagError::OpenFailure` if the file is missing, unreadable or
    /// of an unrecognised type
    fn open(&self, path: &Path) -> Result<Self::File>;

    /// Release a native file resource
    fn close(&self, file: Self::File);

    /// Descriptive label for the file's type
    fn file_type(&self, file: &Self::File) -> String;

    /// The file's default tag, if the format has one
    fn default_tag(&self, file: &mut Self::File) -> Option<Self::Tag>;

    /// Tag of the given flavor
    ///
    /// With `create` set, an empty tag is fabricated when the file has none
    /// of that flavor. Returns `None` when the flavor is missing (and not
    /// created) or unknown to the engine.
    fn tag(&self, file: &mut Self::File, flavor: &FlavorId, create: bool) -> Option<Self::Tag>;

    /// Remove a tag flavor from the in-memory file; no-op if absent
    fn remove_tag(&self, file: &mut Self::File, flavor: &FlavorId);

    /// Persist the in-memory file to disk
    ///
    /// # Errors
    /// Returns an error if writing fails
    fn save(&self, file: &mut Self::File) -> Result<()>;

    /// Value of `key`, or `None` if the tag has no such field
    fn field(&self, file: &Self::File, tag: &Self::Tag, key: &str) -> Option<String>;

    /// Assign `value` to `key` in memory
    fn set_field(&self, file: &mut Self::File, tag: &Self::Tag, key: &str, value: &str);

    /// Every field of the tag, in engine order
    ///
    /// Keys may repeat; either half of a pair may be missing.
    fn fields(&self, file: &Self::File, tag: &Self::Tag) -> Vec<RawField>;
}
