use crate::error::Error;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Section {
    General,
    Keybindings,
}

impl Section {
    pub const ALL: [Section; 2] = [Section::General, Section::Keybindings];

    pub fn name(self) -> &'static str {
        match self {
            Section::General => "general",
            Section::Keybindings => "keybindings",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Section::ALL.into_iter().find(|section| section.name() == name)
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// UI actions that can be bound to a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Action {
    Search,
    Reload,
    Settings,
    Edit,
    Select,
    Quit,
}

impl Action {
    pub const ALL: [Action; 6] = [
        Action::Search,
        Action::Reload,
        Action::Settings,
        Action::Edit,
        Action::Select,
        Action::Quit,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Action::Search => "search",
            Action::Reload => "reload",
            Action::Settings => "settings",
            Action::Edit => "edit",
            Action::Select => "select",
            Action::Quit => "quit",
        }
    }
}

/// Every preference the store knows about. Anything not listed here is
/// rejected as `UnknownPreference` when parsed from a string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PrefKey {
    MusicDir,
    PreviewFormat,
    SmoothScroll,
    VimMode,
    Key(Action),
}

impl PrefKey {
    pub const GENERAL: [PrefKey; 4] = [
        PrefKey::MusicDir,
        PrefKey::PreviewFormat,
        PrefKey::SmoothScroll,
        PrefKey::VimMode,
    ];

    /// All keys, general settings first, in display order.
    pub fn all() -> impl Iterator<Item = PrefKey> {
        PrefKey::GENERAL
            .into_iter()
            .chain(Action::ALL.into_iter().map(PrefKey::Key))
    }

    pub fn section(self) -> Section {
        match self {
            PrefKey::Key(_) => Section::Keybindings,
            _ => Section::General,
        }
    }

    /// Name within its section.
    pub fn name(self) -> &'static str {
        match self {
            PrefKey::MusicDir => "music_dir",
            PrefKey::PreviewFormat => "preview_format",
            PrefKey::SmoothScroll => "smooth_scroll",
            PrefKey::VimMode => "vim_mode",
            PrefKey::Key(action) => action.name(),
        }
    }

    pub fn is_boolean(self) -> bool {
        matches!(self, PrefKey::SmoothScroll | PrefKey::VimMode)
    }

    /// One-line description shown on the status line.
    pub fn help(self) -> &'static str {
        match self {
            PrefKey::MusicDir => "Directory scanned for audio files",
            PrefKey::PreviewFormat => {
                "Tag preview of the selected file; %t title, %a artist, %l album, %A album artist, %g genre, %y date, %n track, %c comment"
            }
            PrefKey::SmoothScroll => "Scroll line by line instead of a page at a time",
            PrefKey::VimMode => "Vim-style movement and editing in tag fields",
            PrefKey::Key(Action::Search) => "Start a filename search",
            PrefKey::Key(Action::Reload) => "Rescan the music directory",
            PrefKey::Key(Action::Settings) => "Open the preferences window",
            PrefKey::Key(Action::Edit) => "Edit tags of the selected file",
            PrefKey::Key(Action::Select) => "Select files for batch tagging",
            PrefKey::Key(Action::Quit) => "Quit",
        }
    }

    fn lookup(section: Option<Section>, name: &str) -> Option<PrefKey> {
        PrefKey::all().find(|key| {
            key.name() == name && section.map_or(true, |section| key.section() == section)
        })
    }
}

impl fmt::Display for PrefKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.section(), self.name())
    }
}

/// Accepts `name` or `section.name`, e.g. `music_dir`,
/// `general.music_dir` or `keybindings.search`.
impl FromStr for PrefKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = match s.split_once('.') {
            Some((section, name)) => {
                Section::from_name(section).and_then(|section| Self::lookup(Some(section), name))
            }
            None => Self::lookup(None, s),
        };
        key.ok_or_else(|| Error::UnknownPreference(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_keys() {
        assert_eq!("music_dir".parse::<PrefKey>().unwrap(), PrefKey::MusicDir);
        assert_eq!("general.vim_mode".parse::<PrefKey>().unwrap(), PrefKey::VimMode);
        assert_eq!(
            "keybindings.search".parse::<PrefKey>().unwrap(),
            PrefKey::Key(Action::Search)
        );
        assert_eq!("quit".parse::<PrefKey>().unwrap(), PrefKey::Key(Action::Quit));
    }

    #[test]
    fn test_parse_unknown_keys() {
        for bad in ["colour", "general.search", "keybindings.music_dir", "other.quit", ""] {
            assert!(
                matches!(bad.parse::<PrefKey>(), Err(Error::UnknownPreference(k)) if k == bad),
                "{bad} should be unknown"
            );
        }
    }

    #[test]
    fn test_display_round_trips() {
        for key in PrefKey::all() {
            assert_eq!(key.to_string().parse::<PrefKey>().unwrap(), key);
        }
    }

    #[test]
    fn test_names_are_unique() {
        let mut names: Vec<_> = PrefKey::all().map(PrefKey::name).collect();
        let total = names.len();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), total);
    }
}
