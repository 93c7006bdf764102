// Preference modules - typed keys, validation, persistence and the store

pub mod keys;
pub mod persist;
pub mod store;
pub mod validators;

pub use keys::{Action, PrefKey, Section};
pub use persist::default_config_path;
pub use store::{Hook, PreferenceStore};
