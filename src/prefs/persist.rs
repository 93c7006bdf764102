use crate::error::{Error, Result};
use directories::ProjectDirs;
use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

/// Section name -> option name -> value, as stored on disk.
pub type RawPreferences = BTreeMap<String, BTreeMap<String, String>>;

pub const DEFAULT_TEMPLATE: &str = include_str!("default_config.toml");

pub const CONFIG_FILE_NAME: &str = "clid.toml";

/// `<config dir>/clid.toml` for the current platform, if a home directory
/// can be determined.
pub fn default_config_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "clid").map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
}

pub fn parse(text: &str, path: &Path) -> Result<RawPreferences> {
    toml::from_str(text).map_err(|source| Error::ConfigParse {
        path: path.to_path_buf(),
        source,
    })
}

pub fn default_preferences() -> Result<RawPreferences> {
    parse(DEFAULT_TEMPLATE, Path::new(CONFIG_FILE_NAME))
}

/// Read the preference file, creating it from the default template first if
/// it does not exist yet.
pub fn read_or_create(path: &Path) -> Result<RawPreferences> {
    if !path.exists() {
        info!("Creating preference file {} from defaults", path.display());
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
        }
        fs::write(path, DEFAULT_TEMPLATE).map_err(|e| Error::io(path, e))?;
    }

    let text = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    parse(&text, path)
}

/// Leading comment block of the default template, kept on every rewrite.
fn template_header() -> String {
    DEFAULT_TEMPLATE
        .lines()
        .take_while(|line| line.is_empty() || line.starts_with('#'))
        .map(|line| format!("{line}\n"))
        .collect()
}

/// Replace the preference file. The new contents go to a sibling temp file
/// that is renamed over `path`, so a failed write leaves the old file intact.
pub fn write(path: &Path, preferences: &RawPreferences) -> Result<()> {
    let text = format!("{}{}", template_header(), toml::to_string_pretty(preferences)?);
    let directory = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut file = tempfile::NamedTempFile::new_in(directory).map_err(|e| Error::io(directory, e))?;
    file.write_all(text.as_bytes())
        .and_then(|()| file.as_file().sync_all())
        .map_err(|e| Error::io(file.path(), e))?;
    file.persist(path).map_err(|e| Error::io(path, e.error))?;
    Ok(())
}
