//! Subcommand implementations
//!
//! Generic over the tag engine so they can run against the in-memory engine
//! in tests.

use anyhow::{anyhow, Result};
use mtag_core::{MTag, Tag, TagEngine};
use std::io::Write;
use std::path::Path;

fn or_empty(value: Option<String>) -> String {
    value.unwrap_or_default()
}

/// Pick the tag a command operates on
///
/// Without a flavor this is the file's default tag. With one, the flavor is
/// looked up, or created when `create` is set.
fn select_tag<E: TagEngine>(
    file: &mtag_core::File<E>,
    flavor: Option<&str>,
    create: bool,
) -> Result<Tag<E>> {
    match flavor {
        None => Ok(file.tag()?),
        Some(flavor) if create => Ok(file.tag_with(flavor, true)?),
        Some(flavor) => file
            .lookup(flavor)?
            .ok_or_else(|| anyhow!("No '{}' tag in {}", flavor, file.path().display())),
    }
}

/// Print the file type
pub fn info<E: TagEngine>(mtag: &MTag<E>, path: &Path, out: &mut impl Write) -> Result<()> {
    let file = mtag.open(path)?;
    writeln!(out, "{}", file.file_type()?)?;
    file.close();
    Ok(())
}

/// Print every field as `key=value`
pub fn show<E: TagEngine>(
    mtag: &MTag<E>,
    path: &Path,
    flavor: Option<&str>,
    out: &mut impl Write,
) -> Result<()> {
    let file = mtag.open(path)?;
    let fields = select_tag(&file, flavor, false)?.get_all()?;
    for (key, value) in &fields {
        writeln!(out, "{}={}", key, value)?;
    }
    file.close();
    Ok(())
}

/// Print one field; missing fields print an empty line
pub fn get<E: TagEngine>(
    mtag: &MTag<E>,
    path: &Path,
    key: &str,
    flavor: Option<&str>,
    out: &mut impl Write,
) -> Result<()> {
    let file = mtag.open(path)?;
    let value = select_tag(&file, flavor, false)?.get(key)?;
    writeln!(out, "{}", or_empty(value))?;
    file.close();
    Ok(())
}

/// Assign one field and save
pub fn set<E: TagEngine>(
    mtag: &MTag<E>,
    path: &Path,
    key: &str,
    value: &str,
    flavor: Option<&str>,
    create: bool,
) -> Result<()> {
    let file = mtag.open(path)?;
    select_tag(&file, flavor, create)?.set(key, value)?;
    file.save()?;
    tracing::info!("Set {} in {}", key, path.display());
    file.close();
    Ok(())
}

/// Remove tag flavors and save
pub fn strip<E: TagEngine>(mtag: &MTag<E>, path: &Path, flavors: &[String]) -> Result<()> {
    let file = mtag.open(path)?;
    for flavor in flavors {
        file.strip(flavor.as_str())?;
    }
    file.save()?;
    tracing::info!("Stripped {} from {}", flavors.join(", "), path.display());
    file.close();
    Ok(())
}

/// Report whether the file has a tag of `flavor`
pub fn has<E: TagEngine>(
    mtag: &MTag<E>,
    path: &Path,
    flavor: &str,
    out: &mut impl Write,
) -> Result<bool> {
    let file = mtag.open(path)?;
    let present = file.lookup(flavor)?.is_some();
    writeln!(out, "{}", if present { "yes" } else { "no" })?;
    file.close();
    Ok(present)
}

/// Smoke run: strip ID3v1, dump the default tag, edit the artist in memory
///
/// Nothing is saved.
pub fn demo<E: TagEngine>(mtag: &MTag<E>, path: &Path, out: &mut impl Write) -> Result<()> {
    let file = mtag.open(path)?;
    file.strip("id3v1")?;

    let tag = file.tag()?;
    writeln!(out, "{:?}", tag.get_all()?)?;
    writeln!(out, "{} - {}", or_empty(tag.artist()?), or_empty(tag.title()?))?;

    file.tag()?.set("artist", "foo")?;
    writeln!(
        out,
        "{} - {}",
        or_empty(tag.get("artist")?),
        or_empty(tag.get("title")?)
    )?;
    writeln!(out, "{} - {}", or_empty(tag.artist()?), or_empty(tag.title()?))?;

    file.close();
    Ok(())
}
