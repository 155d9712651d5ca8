/// Integration tests for the File/Tag lifecycle
///
/// Runs against the in-memory engine so every engine call is observable.
use mtag_core::{MTag, MTagError, MemoryEngine, RawField, TagOrigin};

const SONG: &str = "/music/song.mp3";

/// A file with an ID3v1 and an ID3v2 tag; ID3v2 is the default
fn library() -> MTag<MemoryEngine> {
    let engine = MemoryEngine::new()
        .with_file(SONG, "MPEG")
        .with_default_flavor(SONG, "id3v2")
        .with_field(SONG, "id3v2", "artist", "Test Artist")
        .with_field(SONG, "id3v2", "title", "Test Song")
        .with_field(SONG, "id3v1", "title", "Test Song (v1)");
    MTag::new(engine)
}

// ===== Opening =====

#[test]
fn open_nonexistent_path_fails() {
    let mtag = library();
    let err = mtag.open("/music/missing.mp3").unwrap_err();
    assert!(matches!(err, MTagError::OpenFailure { .. }));
    assert_eq!(mtag.engine().open_handles(), 0);
}

#[test]
fn file_type_comes_from_engine() {
    let mtag = library();
    let file = mtag.open(SONG).unwrap();
    assert_eq!(file.file_type().unwrap(), "MPEG");
    assert_eq!(file.path(), std::path::Path::new(SONG));
}

// ===== Memoized acquisition =====

#[test]
fn default_tag_is_memoized() {
    let mtag = library();
    let file = mtag.open(SONG).unwrap();

    let first = file.tag().unwrap();
    let second = file.tag().unwrap();

    assert!(first.same_instance(&second));
    assert_eq!(first.origin(), &TagOrigin::Default);
}

#[test]
fn memoized_tag_ignores_later_flavor_arguments() {
    let mtag = library();
    let file = mtag.open(SONG).unwrap();

    let first = file.tag().unwrap();
    let second = file.tag_with("id3v1", false).unwrap();
    let third = file.tag_with("ape", true).unwrap();

    assert!(first.same_instance(&second));
    assert!(first.same_instance(&third));
    assert_eq!(third.title().unwrap().as_deref(), Some("Test Song"));
    // "ape" was never requested from the engine
    file.save().unwrap();
    assert!(!mtag.engine().has_stored_tag(SONG, "ape"));
}

#[test]
fn flavored_acquisition_fills_empty_slot() {
    let mtag = library();
    let file = mtag.open(SONG).unwrap();

    let v1 = file.tag_with("id3v1", false).unwrap();
    assert!(v1.is_present());
    assert_eq!(v1.title().unwrap().as_deref(), Some("Test Song (v1)"));

    let default = file.tag().unwrap();
    assert!(default.same_instance(&v1));
}

#[test]
fn missing_flavor_without_create_caches_absent_tag() {
    let mtag = library();
    let file = mtag.open(SONG).unwrap();

    let ape = file.tag_with("ape", false).unwrap();
    assert!(!ape.is_present());
    assert!(file.tag().unwrap().same_instance(&ape));

    let err = ape.get("title").unwrap_err();
    assert!(matches!(err, MTagError::FieldAccessOnAbsentTag { .. }));
    assert!(matches!(
        ape.set("title", "X"),
        Err(MTagError::FieldAccessOnAbsentTag { .. })
    ));
    assert!(matches!(
        ape.get_all(),
        Err(MTagError::FieldAccessOnAbsentTag { .. })
    ));
}

#[test]
fn missing_flavor_with_create_fabricates_empty_tag() {
    let mtag = library();
    let file = mtag.open(SONG).unwrap();

    let ape = file.tag_with("ape", true).unwrap();
    assert!(ape.is_present());
    assert!(ape.get_all().unwrap().is_empty());

    ape.set_title("Created").unwrap();
    file.save().unwrap();
    assert_eq!(
        mtag.engine().stored_fields(SONG, "ape"),
        Some(vec![RawField::new("title", "Created")])
    );
}

#[test]
fn fabricated_tag_without_fields_is_not_saved() {
    let mtag = library();
    let file = mtag.open(SONG).unwrap();

    assert!(file.tag_with("ape", true).unwrap().is_present());
    file.save().unwrap();
    file.close();

    assert!(!mtag.engine().has_stored_tag(SONG, "ape"));
    assert!(mtag.open(SONG).unwrap().lookup("ape").unwrap().is_none());
}

#[test]
fn tag_for_never_creates() {
    let mtag = library();
    let file = mtag.open(SONG).unwrap();

    let ape = file.tag_for("ape").unwrap();
    assert!(!ape.is_present());
    assert_eq!(ape.origin(), &TagOrigin::Flavor("ape".into()));
    assert!(file.tag_for("id3v1").unwrap().same_instance(&ape));
}

#[test]
fn tag_for_returns_existing_flavor() {
    let mtag = library();
    let file = mtag.open(SONG).unwrap();

    let v1 = file.tag_for("id3v1").unwrap();
    assert!(v1.is_present());
    assert_eq!(v1.title().unwrap().as_deref(), Some("Test Song (v1)"));
}

// ===== One-shot lookup =====

#[test]
fn lookup_of_missing_flavor_is_none() {
    let mtag = library();
    let file = mtag.open(SONG).unwrap();
    assert!(file.lookup("ape").unwrap().is_none());
    assert!(file.lookup("no-such-flavor").unwrap().is_none());
}

#[test]
fn lookup_does_not_create() {
    let mtag = library();
    let file = mtag.open(SONG).unwrap();
    file.lookup("ape").unwrap();
    file.save().unwrap();
    assert!(!mtag.engine().has_stored_tag(SONG, "ape"));
}

#[test]
fn lookup_returns_fresh_tag_and_replaces_cache() {
    let mtag = library();
    let file = mtag.open(SONG).unwrap();

    let default = file.tag().unwrap();
    let v1 = file.lookup("id3v1").unwrap().unwrap();

    assert!(!v1.same_instance(&default));
    assert!(file.tag().unwrap().same_instance(&v1));

    let again = file.lookup("id3v1").unwrap().unwrap();
    assert!(!again.same_instance(&v1));
}

#[test]
fn lookup_of_missing_flavor_still_replaces_cache() {
    let mtag = library();
    let file = mtag.open(SONG).unwrap();

    let default = file.tag().unwrap();
    assert!(file.lookup("ape").unwrap().is_none());

    let cached = file.tag().unwrap();
    assert!(!cached.same_instance(&default));
    assert!(!cached.is_present());
    assert_eq!(cached.origin(), &TagOrigin::Flavor("ape".into()));

    // The earlier handle keeps working
    assert_eq!(default.artist().unwrap().as_deref(), Some("Test Artist"));
}

// ===== Field access =====

#[test]
fn set_then_get_and_get_all_agree() {
    let mtag = library();
    let file = mtag.open(SONG).unwrap();
    let tag = file.tag().unwrap();

    tag.set("title", "X").unwrap();
    assert_eq!(tag.get("title").unwrap().as_deref(), Some("X"));

    let all = tag.get_all().unwrap();
    assert_eq!(all.get("title").map(String::as_str), Some("X"));
    assert_eq!(all.get("artist").map(String::as_str), Some("Test Artist"));
}

#[test]
fn named_accessors_match_generic_keys() {
    let mtag = library();
    let file = mtag.open(SONG).unwrap();
    let tag = file.tag().unwrap();

    tag.set_artist("foo").unwrap();
    assert_eq!(tag.get("artist").unwrap().as_deref(), Some("foo"));

    tag.set("title", "bar").unwrap();
    assert_eq!(tag.title().unwrap().as_deref(), Some("bar"));
}

#[test]
fn get_of_missing_key_is_none() {
    let mtag = library();
    let file = mtag.open(SONG).unwrap();
    assert_eq!(file.tag().unwrap().get("composer").unwrap(), None);
}

#[test]
fn get_all_keeps_last_duplicate_and_skips_incomplete_pairs() {
    let engine = MemoryEngine::new()
        .with_file(SONG, "MPEG")
        .with_field(SONG, "ape", "key", "v1")
        .with_raw_field(
            SONG,
            "ape",
            RawField {
                key: Some("cover".into()),
                value: None,
            },
        )
        .with_field(SONG, "ape", "key", "v2");
    let mtag = MTag::new(engine);
    let file = mtag.open(SONG).unwrap();

    let all = file.lookup("ape").unwrap().unwrap().get_all().unwrap();
    assert_eq!(all["key"], "v2");
    assert!(!all.contains_key("cover"));
}

#[test]
fn field_edits_reach_disk_only_on_save() {
    let mtag = library();
    let file = mtag.open(SONG).unwrap();
    file.tag().unwrap().set_title("Edited").unwrap();

    let reopened = mtag.open(SONG).unwrap();
    assert_eq!(reopened.tag().unwrap().title().unwrap().as_deref(), Some("Test Song"));

    file.save().unwrap();
    let reopened = mtag.open(SONG).unwrap();
    assert_eq!(reopened.tag().unwrap().title().unwrap().as_deref(), Some("Edited"));
}

// ===== Strip and save =====

#[test]
fn strip_then_save_removes_flavor() {
    let mtag = library();
    let file = mtag.open(SONG).unwrap();

    file.strip("id3v1").unwrap();
    assert!(mtag.engine().has_stored_tag(SONG, "id3v1"));

    file.save().unwrap();
    file.close();

    let reopened = mtag.open(SONG).unwrap();
    assert!(reopened.lookup("id3v1").unwrap().is_none());
    assert!(reopened.lookup("id3v2").unwrap().is_some());
}

#[test]
fn strip_then_empty_recreate_still_removes_flavor() {
    let mtag = library();
    let file = mtag.open(SONG).unwrap();

    file.strip("id3v1").unwrap();
    let v1 = file.tag_with("id3v1", true).unwrap();
    assert!(v1.get_all().unwrap().is_empty());
    file.save().unwrap();
    file.close();

    assert!(!mtag.engine().has_stored_tag(SONG, "id3v1"));
    assert!(mtag.open(SONG).unwrap().lookup("id3v1").unwrap().is_none());
}

#[test]
fn strip_does_not_clear_cache_slot() {
    let mtag = library();
    let file = mtag.open(SONG).unwrap();

    let tag = file.tag().unwrap();
    file.strip("id3v2").unwrap();
    assert!(file.tag().unwrap().same_instance(&tag));
    assert!(file.cached_tag().is_some());
}

#[test]
fn strip_of_missing_flavor_is_silent() {
    let mtag = library();
    let file = mtag.open(SONG).unwrap();
    file.strip("ape").unwrap();
    file.save().unwrap();
}

#[test]
fn save_failure_propagates() {
    let engine = MemoryEngine::new()
        .with_file(SONG, "MPEG")
        .with_default_flavor(SONG, "id3v2")
        .with_read_only(SONG);
    let mtag = MTag::new(engine);
    let file = mtag.open(SONG).unwrap();

    file.tag().unwrap().set_title("X").unwrap();
    assert!(matches!(file.save(), Err(MTagError::Save { .. })));
}

// ===== Release =====

#[test]
fn close_releases_native_resource_once() {
    let mtag = library();
    let file = mtag.open(SONG).unwrap();
    let tag = file.tag().unwrap();
    assert_eq!(mtag.engine().open_handles(), 1);

    file.close();
    assert_eq!(mtag.engine().open_handles(), 0);

    assert!(matches!(tag.get("title"), Err(MTagError::Closed)));
    drop(tag);
    assert_eq!(mtag.engine().open_handles(), 0);
}

#[test]
fn drop_releases_after_last_tag() {
    let mtag = library();
    let file = mtag.open(SONG).unwrap();
    let tag = file.tag().unwrap();

    drop(file);
    assert_eq!(mtag.engine().open_handles(), 1);
    assert_eq!(tag.artist().unwrap().as_deref(), Some("Test Artist"));

    drop(tag);
    assert_eq!(mtag.engine().open_handles(), 0);
}
