use crate::prefs::{PrefKey, PreferenceStore, Section};

/// A list of items the UI can show, narrow down and describe on the status
/// line.
pub trait Database {
    /// Lines to display, in display order.
    fn display_values(&self) -> Vec<String>;

    /// Display values containing `search`, ignoring case. An empty search
    /// returns everything.
    fn filter_values(&self, search: &str) -> Vec<String> {
        let values = self.display_values();
        if search.is_empty() {
            return values;
        }

        let needle = search.to_lowercase();
        values
            .into_iter()
            .filter(|value| value.to_lowercase().contains(&needle))
            .collect()
    }

    /// Extra information about one displayed item, if there is any.
    fn describe_item(&mut self, item: &str) -> Option<String>;
}

/// Padding added after the longest option name so values line up.
const VALUE_COLUMN_GAP: usize = 3;

impl<C> Database for PreferenceStore<C> {
    /// Each section is preceded by a blank line and an underlined header.
    fn display_values(&self) -> Vec<String> {
        let mut lines = Vec::new();
        for section in Section::ALL {
            let entries: Vec<_> = self.entries(section).collect();
            let width = entries
                .iter()
                .map(|(key, _)| key.name().len())
                .max()
                .unwrap_or(0)
                + VALUE_COLUMN_GAP;

            lines.push(" ".to_string());
            lines.push(section.name().to_string());
            lines.push("-".repeat(section.name().len()));
            for (key, value) in entries {
                lines.push(format!("{:<width$}{}", key.name(), value));
            }
        }
        lines
    }

    fn describe_item(&mut self, item: &str) -> Option<String> {
        let name = item.split_whitespace().next()?;
        name.parse::<PrefKey>().ok().map(|key| key.help().to_string())
    }
}
