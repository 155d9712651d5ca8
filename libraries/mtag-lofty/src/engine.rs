/// Tag engine implementation using lofty
use crate::config::EngineConfig;
use crate::error::{LoftyEngineError, Result};
use crate::keys;
use lofty::{Probe, Tag, TagExt, TagType, TaggedFile, TaggedFileExt};
use mtag_core::{FlavorId, MTagError, RawField, TagEngine};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// A file parsed by lofty
///
/// Strips are recorded and applied to disk on save, before the remaining
/// tags are written.
pub struct LoftyFile {
    path: PathBuf,
    tagged_file: TaggedFile,
    pending_strips: Vec<TagType>,
}

impl LoftyFile {
    /// Path the file was read from
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Tag engine using the lofty library
#[derive(Debug, Clone, Default)]
pub struct LoftyEngine {
    config: EngineConfig,
}

impl LoftyEngine {
    /// Create a new engine
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    /// Engine settings
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Probe and read the file
    fn read(&self, path: &Path) -> Result<TaggedFile> {
        if !path.is_file() {
            return Err(LoftyEngineError::FileNotFound(path.display().to_string()));
        }

        let tagged_file = Probe::open(path)?
            .options(self.config.parse_options())
            .guess_file_type()?
            .read()?;

        Ok(tagged_file)
    }

    /// Find (or create) the tag of `tag_type`
    fn ensure_tag(file: &mut LoftyFile, tag_type: TagType, create: bool) -> Option<TagType> {
        if file.tagged_file.tag(tag_type).is_some() {
            return Some(tag_type);
        }
        if !create {
            return None;
        }
        if !file.tagged_file.supports_tag_type(tag_type) {
            debug!(
                "{} cannot hold a {} tag",
                file.path.display(),
                keys::flavor_name(tag_type)
            );
            return None;
        }

        debug!(
            "Creating empty {} tag in {}",
            keys::flavor_name(tag_type),
            file.path.display()
        );
        file.tagged_file.insert_tag(Tag::new(tag_type));
        Some(tag_type)
    }

    fn write(file: &mut LoftyFile) -> Result<()> {
        for tag_type in &file.pending_strips {
            debug!(
                "Removing {} tag from {}",
                keys::flavor_name(*tag_type),
                file.path.display()
            );
            tag_type.remove_from_path(&file.path)?;
        }
        file.pending_strips.clear();

        for tag in file.tagged_file.tags() {
            // Nothing to write; an empty tag only exists in memory
            if tag.is_empty() {
                continue;
            }
            tag.save_to_path(&file.path)?;
        }

        Ok(())
    }
}

impl TagEngine for LoftyEngine {
    type File = LoftyFile;
    type Tag = TagType;

    fn open(&self, path: &Path) -> mtag_core::Result<LoftyFile> {
        let tagged_file = self
            .read(path)
            .map_err(|e| MTagError::open_failure(path, e.to_string()))?;

        Ok(LoftyFile {
            path: path.to_path_buf(),
            tagged_file,
            pending_strips: Vec::new(),
        })
    }

    fn close(&self, file: LoftyFile) {
        if !file.pending_strips.is_empty() {
            debug!(
                "Discarding {} unsaved strip(s) for {}",
                file.pending_strips.len(),
                file.path.display()
            );
        }
    }

    fn file_type(&self, file: &LoftyFile) -> String {
        keys::file_type_label(file.tagged_file.file_type())
    }

    fn default_tag(&self, file: &mut LoftyFile) -> Option<TagType> {
        let tag_type = file.tagged_file.primary_tag_type();
        Self::ensure_tag(file, tag_type, true)
    }

    fn tag(&self, file: &mut LoftyFile, flavor: &FlavorId, create: bool) -> Option<TagType> {
        let Some(tag_type) = keys::tag_type(flavor) else {
            debug!("Unknown tag flavor '{}'", flavor);
            return None;
        };
        Self::ensure_tag(file, tag_type, create)
    }

    fn remove_tag(&self, file: &mut LoftyFile, flavor: &FlavorId) {
        let Some(tag_type) = keys::tag_type(flavor) else {
            debug!("Unknown tag flavor '{}', nothing to strip", flavor);
            return;
        };
        if !file.tagged_file.supports_tag_type(tag_type) {
            return;
        }

        file.tagged_file.remove(tag_type);
        if !file.pending_strips.contains(&tag_type) {
            file.pending_strips.push(tag_type);
        }
    }

    fn save(&self, file: &mut LoftyFile) -> mtag_core::Result<()> {
        Self::write(file).map_err(|e| match e {
            LoftyEngineError::Io(io) => MTagError::Io(io),
            other => MTagError::save(&file.path, other.to_string()),
        })?;

        debug!("Wrote tags to {}", file.path.display());
        Ok(())
    }

    fn field(&self, file: &LoftyFile, tag: &TagType, key: &str) -> Option<String> {
        let item_key = keys::item_key(*tag, key);
        file.tagged_file
            .tag(*tag)?
            .get_string(&item_key)
            .map(str::to_string)
    }

    fn set_field(&self, file: &mut LoftyFile, tag: &TagType, key: &str, value: &str) {
        let item_key = keys::item_key(*tag, key);
        let Some(lofty_tag) = file.tagged_file.tag_mut(*tag) else {
            warn!(
                "{} tag was removed from {}; ignoring {}",
                keys::flavor_name(*tag),
                file.path.display(),
                key
            );
            return;
        };

        if !lofty_tag.insert_text(item_key, value.to_string()) {
            warn!(
                "{} tag cannot hold '{}'; value not set",
                keys::flavor_name(*tag),
                key
            );
        }
    }

    fn fields(&self, file: &LoftyFile, tag: &TagType) -> Vec<RawField> {
        let Some(lofty_tag) = file.tagged_file.tag(*tag) else {
            return Vec::new();
        };

        let mut fields = Vec::new();
        for item in lofty_tag.items() {
            fields.push(RawField {
                key: keys::key_name(*tag, item.key()),
                value: item.value().text().map(str::to_string),
            });
        }
        fields
    }
}
