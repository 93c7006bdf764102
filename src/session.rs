use crate::error::Result;
use crate::library::Library;
use crate::prefs::{Action, PrefKey, PreferenceStore};
use crate::tags::TagCodec;
use std::path::PathBuf;
use tracing::{info, warn};

/// One interactive session: the preference store and the library its hooks
/// reconfigure. Changing a preference here takes effect immediately.
#[derive(Debug)]
pub struct Session {
    prefs: PreferenceStore<Library>,
    library: Library,
}

impl Session {
    /// Load preferences from `config_path` and build the library from them.
    ///
    /// A `music_dir` that cannot be scanned is logged and leaves the library
    /// empty; the user can fix it from the preferences window.
    pub fn open(config_path: impl Into<PathBuf>, codec: Box<dyn TagCodec>) -> Result<Self> {
        let mut prefs = PreferenceStore::load(config_path)?;
        let mut library = Library::new(codec);

        if let Err(err) = library.set_music_dir(prefs.get_pref(PrefKey::MusicDir)) {
            warn!("Music directory not loaded: {}", err);
        }
        library.set_preview_format(prefs.get_pref(PrefKey::PreviewFormat))?;
        library.ui.smooth_scroll = prefs.is_pref_enabled(PrefKey::SmoothScroll);
        library.ui.vim_mode = prefs.is_pref_enabled(PrefKey::VimMode);
        for action in Action::ALL {
            library
                .ui
                .keymap
                .insert(action, prefs.get_key(action).to_string());
        }

        register_hooks(&mut prefs);
        info!("Session ready with {} files", library.index().len());

        Ok(Self { prefs, library })
    }

    pub fn preferences(&self) -> &PreferenceStore<Library> {
        &self.prefs
    }

    pub fn preferences_mut(&mut self) -> &mut PreferenceStore<Library> {
        &mut self.prefs
    }

    pub fn library(&self) -> &Library {
        &self.library
    }

    pub fn library_mut(&mut self) -> &mut Library {
        &mut self.library
    }

    /// `:set option=value`
    pub fn set_preference(&mut self, key: &str, value: &str) -> Result<()> {
        self.prefs.set(&mut self.library, key, value)
    }

    /// `:bind action=key`
    pub fn bind_key(&mut self, action: Action, key: &str) -> Result<()> {
        self.prefs.set_pref(&mut self.library, PrefKey::Key(action), key)
    }
}

fn register_hooks(prefs: &mut PreferenceStore<Library>) {
    prefs.register_hook(PrefKey::MusicDir, |library: &mut Library, value: &str| {
        if let Err(err) = library.set_music_dir(value) {
            warn!("Rescan of {} failed: {}", value, err);
        }
        library.request_redraw();
    });

    prefs.register_hook(PrefKey::PreviewFormat, |library: &mut Library, value: &str| {
        if let Err(err) = library.set_preview_format(value) {
            warn!("Preview format not applied: {}", err);
        }
        library.request_redraw();
    });

    prefs.register_hook(PrefKey::SmoothScroll, |library: &mut Library, value: &str| {
        library.ui.smooth_scroll = value == "true";
        library.request_redraw();
    });

    prefs.register_hook(PrefKey::VimMode, |library: &mut Library, value: &str| {
        library.ui.vim_mode = value == "true";
        library.request_redraw();
    });

    for action in Action::ALL {
        prefs.register_hook(PrefKey::Key(action), move |library: &mut Library, value: &str| {
            library.ui.keymap.insert(action, value.to_string());
            library.request_redraw();
        });
    }
}
