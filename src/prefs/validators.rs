//! Pure checks run before a preference value is accepted.

use crate::error::ValidationError;
use crate::path_utils::expand_tilde;
use crate::preview::PreviewFormat;
use crate::prefs::keys::PrefKey;

/// Named keys accepted in addition to single printable characters.
pub const NAMED_KEYS: &[&str] = &[
    "space",
    "tab",
    "enter",
    "esc",
    "backspace",
    "insert",
    "delete",
    "home",
    "end",
    "page_up",
    "page_down",
    "up",
    "down",
    "left",
    "right",
];

pub fn music_dir(value: &str) -> Result<(), ValidationError> {
    let path = expand_tilde(value);
    if !path.exists() {
        return Err(ValidationError::new(format!("\"{value}\" doesn't exist")));
    }
    if !path.is_dir() {
        return Err(ValidationError::new(format!("\"{value}\" is not a directory")));
    }
    Ok(())
}

pub fn preview_format(value: &str) -> Result<(), ValidationError> {
    PreviewFormat::parse(value).map(|_| ())
}

pub fn boolean(key: PrefKey, value: &str) -> Result<(), ValidationError> {
    match value {
        "true" | "false" => Ok(()),
        _ => Err(ValidationError::new(format!(
            "Can't make sense of \"{value}\"; acceptable values for {} are \"true\" or \"false\"",
            key.name()
        ))),
    }
}

pub fn is_valid_key(value: &str) -> bool {
    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => !c.is_control() && !c.is_whitespace(),
        _ => NAMED_KEYS.contains(&value),
    }
}

/// `keys_in_use` holds the keys bound to every *other* action.
pub fn key_binding<'a>(
    value: &str,
    mut keys_in_use: impl Iterator<Item = &'a str>,
) -> Result<(), ValidationError> {
    if !is_valid_key(value) {
        return Err(ValidationError::new(format!("\"{value}\" is not a valid key")));
    }
    if keys_in_use.any(|used| used == value) {
        return Err(ValidationError::new(format!(
            "\"{value}\" is already bound to another action"
        )));
    }
    Ok(())
}

/// Validate `value` for `key`, without any store context. Keybindings are
/// only checked for shape here; conflicts need the store.
pub fn validate(key: PrefKey, value: &str) -> Result<(), ValidationError> {
    match key {
        PrefKey::MusicDir => music_dir(value),
        PrefKey::PreviewFormat => preview_format(value),
        PrefKey::SmoothScroll | PrefKey::VimMode => boolean(key, value),
        PrefKey::Key(_) => key_binding(value, std::iter::empty()),
    }
}
