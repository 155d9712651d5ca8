//! Flavor and field-key naming
//!
//! Flavors map onto lofty's `TagType`. Field keys are either generic
//! lowercase names shared by every flavor (`title`, `artist`, ...) or the
//! flavor's native key (`TPE1`, `IART`, ...).

use lofty::{FileType, ItemKey, TagType};
use mtag_core::FlavorId;

/// Resolve a flavor id (case-insensitive)
pub(crate) fn tag_type(flavor: &FlavorId) -> Option<TagType> {
    match flavor.as_str().to_ascii_lowercase().as_str() {
        "id3v1" => Some(TagType::Id3v1),
        "id3v2" => Some(TagType::Id3v2),
        "ape" => Some(TagType::Ape),
        "vorbis" | "vorbiscomments" | "xiph" => Some(TagType::VorbisComments),
        "mp4" | "ilst" | "mp4ilst" => Some(TagType::Mp4Ilst),
        "riff" | "riffinfo" => Some(TagType::RiffInfo),
        "aiff" | "aifftext" => Some(TagType::AiffText),
        _ => None,
    }
}

/// Canonical flavor id of a tag type
pub(crate) fn flavor_name(tag_type: TagType) -> &'static str {
    match tag_type {
        TagType::Id3v1 => "id3v1",
        TagType::Id3v2 => "id3v2",
        TagType::Ape => "ape",
        TagType::VorbisComments => "vorbis",
        TagType::Mp4Ilst => "mp4",
        TagType::RiffInfo => "riff",
        TagType::AiffText => "aiff",
        _ => "unknown",
    }
}

pub(crate) fn file_type_label(file_type: FileType) -> String {
    let label = match file_type {
        FileType::Aac => "AAC",
        FileType::Aiff => "AIFF",
        FileType::Ape => "Monkey's Audio",
        FileType::Flac => "FLAC",
        FileType::Mpeg => "MPEG",
        FileType::Mp4 => "MP4",
        FileType::Mpc => "Musepack",
        FileType::Opus => "Opus",
        FileType::Vorbis => "Ogg Vorbis",
        FileType::Speex => "Speex",
        FileType::Wav => "WAV",
        FileType::WavPack => "WavPack",
        other => return format!("{:?}", other),
    };
    label.to_string()
}

fn generic_item_key(name: &str) -> Option<ItemKey> {
    let key = match name {
        "title" => ItemKey::TrackTitle,
        "artist" => ItemKey::TrackArtist,
        "album" => ItemKey::AlbumTitle,
        "albumartist" => ItemKey::AlbumArtist,
        "genre" => ItemKey::Genre,
        "comment" => ItemKey::Comment,
        "composer" => ItemKey::Composer,
        "date" => ItemKey::RecordingDate,
        "year" => ItemKey::Year,
        "tracknumber" => ItemKey::TrackNumber,
        "tracktotal" => ItemKey::TrackTotal,
        "discnumber" => ItemKey::DiscNumber,
        "disctotal" => ItemKey::DiscTotal,
        "lyrics" => ItemKey::Lyrics,
        "copyright" => ItemKey::CopyrightMessage,
        "encoder" => ItemKey::EncoderSoftware,
        _ => return None,
    };
    Some(key)
}

fn generic_name(key: &ItemKey) -> Option<&'static str> {
    let name = match key {
        ItemKey::TrackTitle => "title",
        ItemKey::TrackArtist => "artist",
        ItemKey::AlbumTitle => "album",
        ItemKey::AlbumArtist => "albumartist",
        ItemKey::Genre => "genre",
        ItemKey::Comment => "comment",
        ItemKey::Composer => "composer",
        ItemKey::RecordingDate => "date",
        ItemKey::Year => "year",
        ItemKey::TrackNumber => "tracknumber",
        ItemKey::TrackTotal => "tracktotal",
        ItemKey::DiscNumber => "discnumber",
        ItemKey::DiscTotal => "disctotal",
        ItemKey::Lyrics => "lyrics",
        ItemKey::CopyrightMessage => "copyright",
        ItemKey::EncoderSoftware => "encoder",
        _ => return None,
    };
    Some(name)
}

/// Resolve a caller-supplied key for `tag_type`
pub(crate) fn item_key(tag_type: TagType, key: &str) -> ItemKey {
    generic_item_key(&key.to_ascii_lowercase())
        .or_else(|| Some(ItemKey::from_key(tag_type, key)))
        .unwrap_or_else(|| ItemKey::Unknown(key.to_string()))
}

/// Name reported for an item during enumeration
///
/// `None` when the format has no name for the key.
pub(crate) fn key_name(tag_type: TagType, key: &ItemKey) -> Option<String> {
    generic_name(key)
        .map(str::to_string)
        .or_else(|| key.map_key(tag_type, true).map(str::to_string))
}
