//! indexxo - index filesystem spaces in memory and browse them over HTTP.
//!
//! Usage:
//!   indexxo serve [SPACE...]          Index spaces and serve the HTTP API
//!   indexxo scan PATH                 Index a space and print a summary
//!   indexxo ls PATH --space ROOT      Print the contents of one folder
//!   indexxo export PATH               Export every entry to JSON
//!   indexxo empty PATH                List empty files and folders
//!   indexxo duplicates PATH           List names shared by several entries
//!   indexxo search PATH [TEXT]        Search entries by name, type and size
//!   indexxo --help                    Show help

use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand, ValueEnum};
use color_eyre::eyre::{Context, Result, eyre};
use tracing_subscriber::EnvFilter;

use indexxo_analyze::{
    DuplicateNameConfig, DuplicateNameFinder, EmptyReport, NameTarget, SearchQuery, SortKey,
};
use indexxo_core::{Entry, EntryKind, FileTypes, Settings, SpaceConfig};
use indexxo_index::IndexStore;

#[derive(Parser)]
#[command(
    name = "indexxo",
    version,
    about = "Index filesystem spaces and browse them over HTTP",
    long_about = "indexxo walks one or more directories (spaces) once, keeps every file and \
                  folder in memory with aggregated folder sizes, and answers folder \
                  listings without touching the disk again."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Index spaces and serve the HTTP API
    Serve {
        /// Settings file (TOML)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Address to listen on (overrides the settings file)
        #[arg(short, long)]
        bind: Option<String>,

        /// Extension mapping file (JSON, overrides the settings file)
        #[arg(short, long)]
        filetypes: Option<PathBuf>,

        /// Extra spaces to index, with nothing ignored
        spaces: Vec<PathBuf>,
    },

    /// Index a space and print a summary
    Scan {
        #[command(flatten)]
        space: SpaceArgs,

        /// Number of largest entries to show in the space root listing
        #[arg(short = 'n', long, default_value = "10")]
        top: usize,
    },

    /// Index a space and print the contents of one folder
    Ls {
        /// Folder to list
        path: PathBuf,

        /// Space root to index (defaults to PATH)
        #[arg(short, long)]
        space: Option<PathBuf>,

        /// Paths to leave out of the index
        #[arg(short, long)]
        ignore: Vec<PathBuf>,

        /// Extension mapping file (JSON)
        #[arg(short, long)]
        filetypes: Option<PathBuf>,

        /// Output format
        #[arg(long, default_value = "text")]
        format: OutputFormat,
    },

    /// Index a space and export every entry to JSON
    Export {
        #[command(flatten)]
        space: SpaceArgs,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Index a space and list zero-byte files and childless folders
    Empty {
        #[command(flatten)]
        space: SpaceArgs,

        /// Output format
        #[arg(long, default_value = "text")]
        format: OutputFormat,
    },

    /// Index a space and list base names shared by several entries
    Duplicates {
        #[command(flatten)]
        space: SpaceArgs,

        /// Compare files or folders
        #[arg(short, long, default_value = "files")]
        target: NameTarget,

        /// Compare names case-sensitively
        #[arg(long)]
        case_sensitive: bool,

        /// Maximum number of groups to show (0 = all)
        #[arg(short = 'n', long, default_value = "20")]
        max_groups: usize,

        /// Output format
        #[arg(long, default_value = "text")]
        format: OutputFormat,
    },

    /// Index a space and search its entries by metadata
    Search {
        #[command(flatten)]
        space: SpaceArgs,

        /// Text the base name must contain (case-insensitive)
        #[arg(short = 'q', long, default_value = "")]
        text: String,

        /// Categories to keep (repeatable)
        #[arg(short = 't', long = "type")]
        kinds: Vec<EntryKind>,

        /// Smallest size to keep, in bytes
        #[arg(long)]
        min_size: Option<u64>,

        /// Largest size to keep, in bytes
        #[arg(long)]
        max_size: Option<u64>,

        /// Sort by name or size
        #[arg(long, default_value = "name")]
        sort: SortKey,

        /// Reverse the ordering
        #[arg(long)]
        descending: bool,

        /// Maximum number of results (0 = all)
        #[arg(short = 'n', long, default_value = "0")]
        limit: usize,

        /// Output format
        #[arg(long, default_value = "text")]
        format: OutputFormat,
    },
}

#[derive(Args)]
struct SpaceArgs {
    /// Space root
    #[arg(default_value = ".")]
    path: PathBuf,

    /// Paths to leave out of the index
    #[arg(short, long)]
    ignore: Vec<PathBuf>,

    /// Extension mapping file (JSON)
    #[arg(short, long)]
    filetypes: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, ValueEnum, Default)]
enum OutputFormat {
    #[default]
    Text,
    Json,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    init_logging();

    let cli = Cli::parse();

    match cli.command {
        Command::Serve {
            config,
            bind,
            filetypes,
            spaces,
        } => run_serve(config, bind, filetypes, spaces),
        Command::Scan { space, top } => run_scan(&space, top),
        Command::Ls {
            path,
            space,
            ignore,
            filetypes,
            format,
        } => {
            let space = SpaceArgs {
                path: space.unwrap_or_else(|| path.clone()),
                ignore,
                filetypes,
            };
            run_ls(&path, &space, format)
        }
        Command::Export { space, output } => run_export(&space, output),
        Command::Empty { space, format } => run_empty(&space, format),
        Command::Duplicates {
            space,
            target,
            case_sensitive,
            max_groups,
            format,
        } => {
            let config = DuplicateNameConfig::builder()
                .case_sensitive(case_sensitive)
                .max_groups(max_groups)
                .build()
                .map_err(|e| eyre!("Invalid duplicate settings: {e}"))?;
            run_duplicates(&space, target, config, format)
        }
        Command::Search {
            space,
            text,
            kinds,
            min_size,
            max_size,
            sort,
            descending,
            limit,
            format,
        } => {
            let query = SearchQuery {
                text,
                kinds,
                within: None,
                min_size,
                max_size,
                sort,
                descending,
                limit,
            };
            run_search(&space, &query, format)
        }
    }
}

/// Log to stderr, `RUST_LOG` overrides the default `info` level.
fn init_logging() {
    let env_filter = EnvFilter::builder()
        .with_default_directive(tracing::Level::INFO.into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Index every configured space, then serve until Ctrl+C.
fn run_serve(
    config: Option<PathBuf>,
    bind: Option<String>,
    filetypes: Option<PathBuf>,
    spaces: Vec<PathBuf>,
) -> Result<()> {
    let mut settings = match config {
        Some(path) => Settings::load(&path)
            .with_context(|| format!("Failed to load settings from {}", path.display()))?,
        None => Settings::default(),
    };
    if let Some(bind) = bind {
        settings.bind = bind;
    }
    if filetypes.is_some() {
        settings.filetypes = filetypes;
    }
    settings.spaces.extend(spaces.into_iter().map(SpaceConfig::new));

    if settings.spaces.is_empty() {
        return Err(eyre!("No spaces to index; pass a path or a settings file"));
    }

    let file_types = settings.file_types().context("Failed to load file types")?;
    let mut index = IndexStore::new(file_types);
    for space in &settings.spaces {
        index
            .add_space(space)
            .with_context(|| format!("Failed to index {}", space.root.display()))?;
    }

    let runtime = tokio::runtime::Runtime::new().context("Failed to start runtime")?;
    runtime
        .block_on(indexxo_server::serve(index, &settings.bind))
        .context("Server failed")?;

    Ok(())
}

/// Index a single space described by command line arguments.
fn build_index(args: &SpaceArgs) -> Result<IndexStore> {
    let file_types = match &args.filetypes {
        Some(path) => FileTypes::load(path)
            .with_context(|| format!("Failed to load file types from {}", path.display()))?,
        None => FileTypes::default(),
    };

    let config = SpaceConfig::builder()
        .root(args.path.clone())
        .ignore(args.ignore.clone())
        .build()
        .map_err(|e| eyre!("Invalid space: {e}"))?;

    let mut index = IndexStore::new(file_types);
    index
        .add_space(&config)
        .with_context(|| format!("Failed to index {}", args.path.display()))?;
    Ok(index)
}

/// Run a scan and display a summary.
fn run_scan(args: &SpaceArgs, top_n: usize) -> Result<()> {
    let index = build_index(args)?;
    let space = index
        .spaces()
        .first()
        .ok_or_else(|| eyre!("No space was registered"))?;

    let files = index.entries().filter(|e| !e.is_dir()).count();
    let folders = index.entries().filter(|e| e.is_dir()).count();

    println!();
    println!("{}", "─".repeat(60));
    println!(" {} - {}", space.path.display(), format_size(space.size));
    println!(" {files} files, {folders} folders");
    println!("{}", "─".repeat(60));
    println!();

    let mut content = index.get_content(&space.path).content;
    content.sort_by(|a, b| b.size.cmp(&a.size));
    print_listing(&content, space.size, top_n);

    Ok(())
}

/// Print the contents of one folder.
fn run_ls(path: &Path, args: &SpaceArgs, format: OutputFormat) -> Result<()> {
    let index = build_index(args)?;
    let path = path.canonicalize().context("Invalid path")?;

    let found = index
        .find(&path)
        .ok_or_else(|| eyre!("{} is not found in index", path.display()))?;
    let listing = index.get_content(&found.path);

    match format {
        OutputFormat::Text => {
            if let Some(parent) = listing.parent {
                println!(" ↑ {}", parent.path.display());
            }
            println!(" {} - {}", found.path.display(), format_size(found.size));
            println!();

            let mut content = listing.content;
            content.sort_by(|a, b| b.is_dir().cmp(&a.is_dir()).then(a.name.cmp(&b.name)));
            print_listing(&content, found.size, usize::MAX);
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&listing)?);
        }
    }

    Ok(())
}

/// Export every entry as a JSON array.
fn run_export(args: &SpaceArgs, output: Option<PathBuf>) -> Result<()> {
    let index = build_index(args)?;
    let entries: Vec<&Entry> = index.entries().collect();
    let json = serde_json::to_string_pretty(&entries)?;

    match output {
        Some(output_path) => {
            std::fs::write(&output_path, json)?;
            eprintln!("Exported {} entries to {}", entries.len(), output_path.display());
        }
        None => {
            println!("{json}");
        }
    }

    Ok(())
}

/// List empty files and folders.
fn run_empty(args: &SpaceArgs, format: OutputFormat) -> Result<()> {
    let index = build_index(args)?;
    let report = EmptyReport::find(&index);

    match format {
        OutputFormat::Text => {
            println!();
            println!(" Empty files ({})", report.files.len());
            for entry in &report.files {
                println!("  {}", entry.path.display());
            }
            println!();
            println!(" Empty folders ({})", report.folders.len());
            for entry in &report.folders {
                println!("  {}/", entry.path.display());
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    Ok(())
}

/// List groups of entries sharing a base name.
fn run_duplicates(
    args: &SpaceArgs,
    target: NameTarget,
    config: DuplicateNameConfig,
    format: OutputFormat,
) -> Result<()> {
    let index = build_index(args)?;
    let report = DuplicateNameFinder::with_config(config).find(&index, target);

    match format {
        OutputFormat::Text => {
            if !report.has_duplicates() {
                println!("No duplicate {target} names among {} entries", report.entries_analyzed);
                return Ok(());
            }

            println!();
            println!(
                " {} shared names, {} of {} entries",
                report.group_count, report.entries_with_duplicates, report.entries_analyzed
            );
            println!();
            for group in &report.groups {
                println!(
                    "  {} x{} ({})",
                    group.name,
                    group.count(),
                    format_size(group.total_size)
                );
                for path in &group.paths {
                    println!("    {}", path.display());
                }
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    Ok(())
}

/// List entries matching a metadata query.
fn run_search(args: &SpaceArgs, query: &SearchQuery, format: OutputFormat) -> Result<()> {
    if let Some((min, max)) = query.min_size.zip(query.max_size).filter(|(min, max)| min > max) {
        return Err(eyre!("Minimum size {min} is larger than maximum size {max}"));
    }

    let index = build_index(args)?;
    let results = indexxo_analyze::search(&index, query);

    match format {
        OutputFormat::Text => {
            for entry in &results {
                let marker = if entry.is_dir() { "/" } else { "" };
                println!(
                    "  {:<60} {:>10} {}",
                    truncate(&format!("{}{marker}", entry.path.display()), 60),
                    format_size(entry.size),
                    entry.kind
                );
            }
            println!();
            println!(" {} matches", results.len());
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&results)?);
        }
    }

    Ok(())
}

/// Print entries with their share of `total`.
fn print_listing(entries: &[&Entry], total: u64, top_n: usize) {
    for entry in entries.iter().take(top_n) {
        let ratio = if total > 0 {
            entry.size as f64 / total as f64 * 100.0
        } else {
            0.0
        };
        let marker = if entry.is_dir() { "/" } else { "" };

        println!(
            "  {:<40} {:>10} {:>5.1}% {}",
            truncate(&format!("{}{marker}", entry.full_name), 40),
            format_size(entry.size),
            ratio,
            entry.kind
        );
    }

    let remaining = entries.len().saturating_sub(top_n);
    if remaining > 0 {
        println!("  ... and {remaining} more");
    }
}

/// Format size in human-readable form.
fn format_size(bytes: u64) -> String {
    humansize::format_size(bytes, humansize::BINARY)
}

/// Truncate a string to max length.
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len - 1).collect();
        format!("{kept}…")
    }
}
