use crate::error::{Error, Result, ValidationError};
use crate::prefs::keys::{Action, PrefKey, Section};
use crate::prefs::persist::{self, RawPreferences};
use crate::prefs::validators;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Callback run after a preference change has been persisted. It receives
/// the store's context and the new value.
pub type Hook<C> = Box<dyn FnMut(&mut C, &str)>;

/// Preferences backed by a TOML file, with per-key validation and change
/// hooks.
///
/// `C` is whatever state the hooks reconfigure. The store never owns it;
/// callers pass it to [`PreferenceStore::set`], so hooks can mutate it
/// without shared ownership.
pub struct PreferenceStore<C> {
    path: PathBuf,
    values: BTreeMap<PrefKey, String>,
    hooks: HashMap<PrefKey, Hook<C>>,
}

impl<C> fmt::Debug for PreferenceStore<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PreferenceStore")
            .field("path", &self.path)
            .field("values", &self.values)
            .field("hooks", &self.hooks.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl<C> PreferenceStore<C> {
    /// Load preferences from `path`, creating the file from the default
    /// template if it is missing.
    ///
    /// Options missing from the file take their default. Unknown options
    /// are ignored and values failing validation are replaced by defaults,
    /// except `music_dir`, which may legitimately point at a directory that
    /// is unavailable right now.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        info!("Loading preferences from {}", path.display());

        let defaults = persist::default_preferences()?;
        let stored = persist::read_or_create(&path)?;
        warn_unknown_options(&stored, &path);

        let mut values = BTreeMap::new();
        for key in PrefKey::all() {
            let default = raw_value(&defaults, key).unwrap_or_default().to_string();
            let value = match raw_value(&stored, key) {
                None => default,
                Some(value) if key == PrefKey::MusicDir => value.to_string(),
                Some(value) => match validators::validate(key, value) {
                    Ok(()) => value.to_string(),
                    Err(err) => {
                        warn!("Ignoring stored value for {}: {}", key, err);
                        default
                    }
                },
            };
            values.insert(key, value);
        }

        let mut store = Self {
            path,
            values,
            hooks: HashMap::new(),
        };
        store.drop_conflicting_bindings(&defaults);
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Value of a preference addressed by name (`music_dir`,
    /// `keybindings.quit`, ...).
    pub fn get(&self, key: &str) -> Result<&str> {
        let key: PrefKey = key.parse()?;
        Ok(self.get_pref(key))
    }

    pub fn get_pref(&self, key: PrefKey) -> &str {
        self.values.get(&key).map(String::as_str).unwrap_or_default()
    }

    pub fn get_key(&self, action: Action) -> &str {
        self.get_pref(PrefKey::Key(action))
    }

    /// Whether a boolean preference is `"true"`. Any other stored value
    /// reads as disabled.
    pub fn is_enabled(&self, key: &str) -> Result<bool> {
        Ok(self.get(key)? == "true")
    }

    pub fn is_pref_enabled(&self, key: PrefKey) -> bool {
        self.get_pref(key) == "true"
    }

    /// Run the validator for `key` without changing anything.
    pub fn validate(&self, key: PrefKey, value: &str) -> std::result::Result<(), ValidationError> {
        match key {
            PrefKey::Key(action) => {
                let in_use = self
                    .values
                    .iter()
                    .filter(|(other, _)| matches!(other, PrefKey::Key(a) if *a != action))
                    .map(|(_, bound)| bound.as_str());
                validators::key_binding(value, in_use)
            }
            _ => validators::validate(key, value),
        }
    }

    /// Install the hook for `key`, replacing any previous one.
    pub fn register_hook<F>(&mut self, key: PrefKey, hook: F)
    where
        F: FnMut(&mut C, &str) + 'static,
    {
        if self.hooks.insert(key, Box::new(hook)).is_some() {
            debug!("Replaced change hook for {}", key);
        }
    }

    pub fn has_hook(&self, key: PrefKey) -> bool {
        self.hooks.contains_key(&key)
    }

    /// Change a preference addressed by name. See [`PreferenceStore::set_pref`].
    pub fn set(&mut self, context: &mut C, key: &str, value: &str) -> Result<()> {
        let key: PrefKey = key.parse()?;
        self.set_pref(context, key, value)
    }

    /// Validate, persist, then run the change hook.
    ///
    /// On validation or write failure nothing changes and no hook runs.
    /// Binding an action to the key it already has is accepted as a no-op.
    pub fn set_pref(&mut self, context: &mut C, key: PrefKey, value: &str) -> Result<()> {
        if matches!(key, PrefKey::Key(_)) && self.get_pref(key) == value {
            debug!("{} already bound to {:?}", key, value);
            return Ok(());
        }

        self.validate(key, value)?;

        let mut updated = self.values.clone();
        updated.insert(key, value.to_string());
        persist::write(&self.path, &to_raw(&updated))?;
        self.values = updated;
        info!("Preference {} set to {:?}", key, value);

        if let Some(hook) = self.hooks.get_mut(&key) {
            debug!("Running change hook for {}", key);
            hook(context, value);
        }
        Ok(())
    }

    /// `(key, value)` pairs of one section in display order.
    pub fn entries(&self, section: Section) -> impl Iterator<Item = (PrefKey, &str)> + '_ {
        self.values
            .iter()
            .filter(move |(key, _)| key.section() == section)
            .map(|(key, value)| (*key, value.as_str()))
    }

    /// Keys are handed out in action order. An action whose loaded key is
    /// already taken falls back to its default, or is left unbound when the
    /// default is taken too.
    fn drop_conflicting_bindings(&mut self, defaults: &RawPreferences) {
        let mut taken: Vec<String> = Vec::with_capacity(Action::ALL.len());
        let mut conflicting = Vec::new();
        for action in Action::ALL {
            let value = self.get_key(action);
            if taken.iter().any(|bound| bound == value) {
                conflicting.push(action);
            } else {
                taken.push(value.to_string());
            }
        }

        for action in conflicting {
            let key = PrefKey::Key(action);
            let default = raw_value(defaults, key).unwrap_or_default();
            if taken.iter().any(|bound| bound == default) {
                warn!(
                    "Leaving {} unbound: {:?} and its default {:?} are both in use",
                    key,
                    self.get_pref(key),
                    default
                );
                self.values.insert(key, String::new());
            } else {
                warn!(
                    "Resetting {} to {:?}: {:?} is already bound",
                    key,
                    default,
                    self.get_pref(key)
                );
                taken.push(default.to_string());
                self.values.insert(key, default.to_string());
            }
        }
    }
}

fn raw_value(raw: &RawPreferences, key: PrefKey) -> Option<&str> {
    raw.get(key.section().name())
        .and_then(|options| options.get(key.name()))
        .map(String::as_str)
}

fn to_raw(values: &BTreeMap<PrefKey, String>) -> RawPreferences {
    let mut raw = RawPreferences::new();
    for (key, value) in values {
        raw.entry(key.section().name().to_string())
            .or_default()
            .insert(key.name().to_string(), value.clone());
    }
    raw
}

fn warn_unknown_options(raw: &RawPreferences, path: &Path) {
    for (section, options) in raw {
        for option in options.keys() {
            let known = Section::from_name(section)
                .and_then(|_| format!("{section}.{option}").parse::<PrefKey>().ok())
                .is_some();
            if !known {
                warn!(
                    "Unknown preference {}.{} in {}",
                    section,
                    option,
                    path.display()
                );
            }
        }
    }
}
