use clid::{Action, Database, Error, ExtensionFilter, MemoryTagCodec, Session, Tags};
use std::fs;
use std::path::{Path, PathBuf};

fn touch(root: &Path, relative: &str) -> PathBuf {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, b"").unwrap();
    path
}

/// A preference file whose music_dir points at `music`.
fn config_for(dir: &Path, music: &Path) -> PathBuf {
    let config = dir.join("clid.toml");
    fs::write(
        &config,
        format!(
            "[general]\nmusic_dir = \"{}\"\npreview_format = \"%a - %t\"\n",
            music.display()
        ),
    )
    .unwrap();
    config
}

#[test]
fn session_scans_configured_music_dir() {
    let config_dir = tempfile::tempdir().unwrap();
    let music = tempfile::tempdir().unwrap();
    touch(music.path(), "a/b/c.mp3");
    touch(music.path(), "a/b/d.MP3");
    touch(music.path(), "a/x.ogg");

    let session = Session::open(
        config_for(config_dir.path(), music.path()),
        Box::new(MemoryTagCodec::new()),
    )
    .unwrap();

    let index = session.library().index();
    assert_eq!(
        index.get_files("mp3".parse().unwrap()),
        vec![music.path().join("a/b/c.mp3"), music.path().join("a/b/d.MP3")]
    );
    assert_eq!(index.get_files(ExtensionFilter::All).len(), 3);
}

#[test]
fn changing_music_dir_rescans_through_hook() {
    let config_dir = tempfile::tempdir().unwrap();
    let first = tempfile::tempdir().unwrap();
    let second = tempfile::tempdir().unwrap();
    touch(first.path(), "one.mp3");
    touch(second.path(), "two.ogg");
    touch(second.path(), "three.ogg");

    let mut session = Session::open(
        config_for(config_dir.path(), first.path()),
        Box::new(MemoryTagCodec::new()),
    )
    .unwrap();
    assert_eq!(session.library().index().len(), 1);
    let redraws = session.library().ui.redraws;

    session
        .set_preference("music_dir", second.path().to_str().unwrap())
        .unwrap();
    assert_eq!(session.library().index().root(), Some(second.path()));
    assert_eq!(session.library().display_values(), vec!["three.ogg", "two.ogg"]);
    assert_eq!(session.library().ui.redraws, redraws + 1);
}

#[test]
fn rejected_music_dir_keeps_previous_state() {
    let config_dir = tempfile::tempdir().unwrap();
    let music = tempfile::tempdir().unwrap();
    touch(music.path(), "one.mp3");

    let mut session = Session::open(
        config_for(config_dir.path(), music.path()),
        Box::new(MemoryTagCodec::new()),
    )
    .unwrap();
    let before = session.preferences().get("music_dir").unwrap().to_string();
    let redraws = session.library().ui.redraws;

    let err = session
        .set_preference("music_dir", "/path/does/not/exist")
        .unwrap_err();
    assert!(matches!(err, Error::Validation(_)));
    assert!(err.is_user_error());
    assert_eq!(session.preferences().get("music_dir").unwrap(), before);
    assert_eq!(session.library().index().len(), 1);
    assert_eq!(session.library().ui.redraws, redraws);
}

#[test]
fn unknown_preference_is_a_user_error() {
    let config_dir = tempfile::tempdir().unwrap();
    let music = tempfile::tempdir().unwrap();
    let mut session = Session::open(
        config_for(config_dir.path(), music.path()),
        Box::new(MemoryTagCodec::new()),
    )
    .unwrap();

    let err = session.set_preference("colour", "red").unwrap_err();
    assert!(matches!(err, Error::UnknownPreference(_)));
    assert!(err.is_user_error());
}

#[test]
fn ui_flags_and_keymap_follow_preferences() {
    let config_dir = tempfile::tempdir().unwrap();
    let music = tempfile::tempdir().unwrap();
    let mut session = Session::open(
        config_for(config_dir.path(), music.path()),
        Box::new(MemoryTagCodec::new()),
    )
    .unwrap();

    assert!(!session.library().ui.smooth_scroll);
    session.set_preference("smooth_scroll", "true").unwrap();
    assert!(session.library().ui.smooth_scroll);
    assert!(session.preferences().is_enabled("smooth_scroll").unwrap());

    session.set_preference("general.vim_mode", "true").unwrap();
    assert!(session.library().ui.vim_mode);

    assert_eq!(session.library().ui.keymap[&Action::Quit], "q");
    session.bind_key(Action::Quit, "x").unwrap();
    assert_eq!(session.library().ui.keymap[&Action::Quit], "x");
    assert!(session.bind_key(Action::Reload, "x").is_err());
    assert_eq!(session.library().ui.keymap[&Action::Reload], "u");
}

#[test]
fn preview_format_change_reaches_describe_item() {
    let config_dir = tempfile::tempdir().unwrap();
    let music = tempfile::tempdir().unwrap();
    let song = touch(music.path(), "song.mp3");
    let codec = MemoryTagCodec::new().with_tags(
        &song,
        Tags {
            artist: "Nina".into(),
            title: "Sinnerman".into(),
            album: "Pastel Blues".into(),
            ..Default::default()
        },
    );

    let mut session =
        Session::open(config_for(config_dir.path(), music.path()), Box::new(codec)).unwrap();
    assert_eq!(
        session.library_mut().describe_item("song.mp3").as_deref(),
        Some("Nina - Sinnerman")
    );

    session.set_preference("preview_format", "%l: %t").unwrap();
    assert_eq!(
        session.library_mut().describe_item("song.mp3").as_deref(),
        Some("Pastel Blues: Sinnerman")
    );

    assert!(session.set_preference("preview_format", "%l %").is_err());
    assert_eq!(session.library().preview_format().as_str(), "%l: %t");
}

#[test]
fn preferences_survive_reopening() {
    let config_dir = tempfile::tempdir().unwrap();
    let music = tempfile::tempdir().unwrap();
    let config = config_for(config_dir.path(), music.path());

    {
        let mut session = Session::open(&config, Box::new(MemoryTagCodec::new())).unwrap();
        session.set_preference("vim_mode", "true").unwrap();
        session.bind_key(Action::Search, "s").unwrap();
    }

    let session = Session::open(&config, Box::new(MemoryTagCodec::new())).unwrap();
    assert!(session.library().ui.vim_mode);
    assert_eq!(session.preferences().get_key(Action::Search), "s");
    assert_eq!(session.preferences().get("preview_format").unwrap(), "%a - %t");
}
