use chrono::{DateTime, Local};
use clap::Parser;
use clid::prefs::default_config_path;
use clid::types::{ExtensionFilter, SearchQuery, SortCriterion};
use clid::{MemoryTagCodec, Session};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::Level;

/// Scan the configured music directory and list what clid would show.
#[derive(Parser, Debug)]
#[command(name = "clid-scan", version)]
struct Args {
    /// Preference file to use instead of the default location
    #[arg(long)]
    config: Option<PathBuf>,

    /// Scan this directory instead of the configured music_dir
    #[arg(long)]
    music_dir: Option<String>,

    /// Only list one format: mp3, ogg or all
    #[arg(long, default_value = "all")]
    ext: String,

    /// Sort by none, name, ext or mod_time
    #[arg(long, default_value = "none")]
    sort: String,

    /// Reverse the sort direction
    #[arg(long)]
    reverse: bool,

    /// Case-insensitive search
    #[arg(short, long)]
    ignore_case: bool,

    /// Fuzzy (subsequence) search
    #[arg(short, long)]
    fuzzy: bool,

    /// Log debug output to stderr
    #[arg(short, long)]
    verbose: bool,

    /// Text to search for in file names
    query: Option<String>,
}

fn run(args: Args) -> clid::Result<()> {
    let config = args
        .config
        .or_else(default_config_path)
        .unwrap_or_else(|| PathBuf::from("clid.toml"));

    let filter: ExtensionFilter = args.ext.parse()?;
    let criterion: SortCriterion = args.sort.parse()?;
    let query = SearchQuery::new(args.query.unwrap_or_default())
        .ignore_case(args.ignore_case)
        .fuzzy(args.fuzzy);

    let mut session = Session::open(config, Box::new(MemoryTagCodec::new()))?;
    if let Some(music_dir) = args.music_dir {
        session.library_mut().set_music_dir(&music_dir)?;
    }

    let library = session.library();
    let root = library.index().root().map(|root| root.to_path_buf());
    for path in library.find_files(filter, &query, criterion, args.reverse) {
        let modified = std::fs::metadata(&path)
            .and_then(|metadata| metadata.modified())
            .map(|time| DateTime::<Local>::from(time).format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|_| "-".repeat(16));
        println!(
            "{}  {}",
            modified,
            clid::path_utils::display_path(&path, root.as_deref())
        );
    }

    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();
    let level = if args.verbose { Level::DEBUG } else { Level::WARN };
    if let Err(err) = clid::log::init_tracing(level, None) {
        eprintln!("{err}");
    }

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("clid-scan: {err}");
            ExitCode::FAILURE
        }
    }
}
