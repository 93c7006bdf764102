// Music index modules - scanning and the bucketed file index

pub mod core;
pub mod scanner;

pub use core::{FileIndex, PathIndex};
pub use scanner::scan_music_dir;
