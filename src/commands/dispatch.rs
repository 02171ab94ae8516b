//! Command dispatch logic for solace
use std::env;
use std::path::PathBuf;
use std::time::Instant;

use crate::cli::{Cli, Commands, TagCommands};
use crate::commands;
use solace_core::config::ApiConfig;
use solace_core::error::{Result, SolaceError};
use solace_core::store::Store;

pub fn run(cli: &Cli, start: Instant) -> Result<()> {
    // Determine the root directory
    let root = cli
        .root
        .clone()
        .unwrap_or_else(|| env::current_dir().unwrap_or_else(|_| PathBuf::from(".")));

    if cli.verbose {
        eprintln!("resolve_root: {:?}", start.elapsed());
    }

    // Handle commands
    match &cli.command {
        None => handle_no_command(),

        Some(Commands::Init) => commands::init::execute(cli, &root),

        Some(Commands::Analyze {
            text,
            stdin,
            with_rebuttals,
            tag,
            no_save,
            summary,
        }) => handle_analyze(
            cli,
            &root,
            text.as_deref(),
            *stdin,
            *with_rebuttals,
            tag,
            *no_save,
            summary.as_deref(),
            start,
        ),

        Some(Commands::Transcribe { file }) => handle_transcribe(cli, &root, file, start),

        Some(Commands::List {
            favorites,
            recent,
            tag,
            limit,
            offset,
        }) => handle_list(cli, &root, *favorites, *recent, tag, *limit, *offset, start),

        Some(Commands::Show { id, no_touch }) => handle_show(cli, &root, id, *no_touch, start),

        Some(Commands::Search { query, tag }) => handle_search(cli, &root, query, tag, start),

        Some(Commands::Similar { text, id }) => {
            handle_similar(cli, &root, text.as_deref(), id.as_deref(), start)
        }

        Some(Commands::Edit {
            id,
            summary,
            content,
        }) => handle_edit(cli, &root, id, summary.as_deref(), content.as_deref(), start),

        Some(Commands::Favorite { id }) => handle_favorite(cli, &root, id, start),

        Some(Commands::Delete { id }) => handle_delete(cli, &root, id, start),

        Some(Commands::Tag { command }) => handle_tag(cli, &root, command, start),

        Some(Commands::Export { id, output }) => {
            handle_export(cli, &root, id, output.as_deref(), start)
        }

        Some(Commands::Dump { output }) => handle_dump(cli, &root, output.as_deref(), start),

        Some(Commands::Import { file }) => handle_import(cli, &root, file, start),

        Some(Commands::Status) => handle_status(cli, &root, start),
    }
}

fn discover_or_open_store(cli: &Cli, root: &PathBuf) -> Result<Store> {
    if let Some(path) = &cli.store {
        let resolved = if path.is_absolute() {
            path.clone()
        } else {
            root.join(path)
        };
        Store::open(&resolved)
    } else {
        Store::discover(root)
    }
}

// ============================================================================
// Command Handlers
// ============================================================================

fn handle_no_command() -> Result<()> {
    println!("solace {}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("A local-first CBT journaling CLI.");
    println!();
    println!("Run `solace --help` for usage information.");
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn handle_analyze(
    cli: &Cli,
    root: &PathBuf,
    text: Option<&str>,
    stdin: bool,
    with_rebuttals: bool,
    tags: &[String],
    no_save: bool,
    summary: Option<&str>,
    start: Instant,
) -> Result<()> {
    let store = discover_or_open_store(cli, root)?;
    if cli.verbose {
        eprintln!("discover_store: {:?}", start.elapsed());
    }
    commands::analyze::execute(
        cli,
        &store,
        text,
        stdin,
        with_rebuttals,
        tags,
        no_save,
        summary,
    )
}

fn handle_transcribe(
    cli: &Cli,
    root: &PathBuf,
    file: &std::path::Path,
    start: Instant,
) -> Result<()> {
    // Transcription only needs endpoint config. An explicit --store must
    // exist, but a failed discovery falls back to the defaults.
    let api = if cli.store.is_some() {
        discover_or_open_store(cli, root)?.config().api.clone()
    } else {
        match Store::discover(root) {
            Ok(store) => store.config().api.clone(),
            Err(SolaceError::StoreNotFound { .. }) => ApiConfig::default(),
            Err(e) => return Err(e),
        }
    };
    if cli.verbose {
        eprintln!("discover_store: {:?}", start.elapsed());
    }
    commands::transcribe::execute(cli, &api, file)
}

#[allow(clippy::too_many_arguments)]
fn handle_list(
    cli: &Cli,
    root: &PathBuf,
    favorites: bool,
    recent: bool,
    tags: &[String],
    limit: Option<usize>,
    offset: usize,
    start: Instant,
) -> Result<()> {
    let store = discover_or_open_store(cli, root)?;
    if cli.verbose {
        eprintln!("discover_store: {:?}", start.elapsed());
    }
    commands::list::execute(cli, &store, favorites, recent, tags, limit, offset)
}

fn handle_show(cli: &Cli, root: &PathBuf, id: &str, no_touch: bool, start: Instant) -> Result<()> {
    let store = discover_or_open_store(cli, root)?;
    if cli.verbose {
        eprintln!("discover_store: {:?}", start.elapsed());
    }
    commands::show::execute(cli, &store, id, no_touch)
}

fn handle_search(
    cli: &Cli,
    root: &PathBuf,
    query: &str,
    tags: &[String],
    start: Instant,
) -> Result<()> {
    let store = discover_or_open_store(cli, root)?;
    if cli.verbose {
        eprintln!("discover_store: {:?}", start.elapsed());
    }
    commands::search::execute(cli, &store, query, tags)
}

fn handle_similar(
    cli: &Cli,
    root: &PathBuf,
    text: Option<&str>,
    id: Option<&str>,
    start: Instant,
) -> Result<()> {
    let store = discover_or_open_store(cli, root)?;
    if cli.verbose {
        eprintln!("discover_store: {:?}", start.elapsed());
    }
    commands::similar::execute(cli, &store, text, id)
}

fn handle_edit(
    cli: &Cli,
    root: &PathBuf,
    id: &str,
    summary: Option<&str>,
    content: Option<&str>,
    start: Instant,
) -> Result<()> {
    let store = discover_or_open_store(cli, root)?;
    if cli.verbose {
        eprintln!("discover_store: {:?}", start.elapsed());
    }
    commands::edit::execute(cli, &store, id, summary, content)
}

fn handle_favorite(cli: &Cli, root: &PathBuf, id: &str, start: Instant) -> Result<()> {
    let store = discover_or_open_store(cli, root)?;
    if cli.verbose {
        eprintln!("discover_store: {:?}", start.elapsed());
    }
    commands::favorite::execute(cli, &store, id)
}

fn handle_delete(cli: &Cli, root: &PathBuf, id: &str, start: Instant) -> Result<()> {
    let store = discover_or_open_store(cli, root)?;
    if cli.verbose {
        eprintln!("discover_store: {:?}", start.elapsed());
    }
    commands::delete::execute(cli, &store, id)
}

fn handle_tag(cli: &Cli, root: &PathBuf, command: &TagCommands, start: Instant) -> Result<()> {
    let store = discover_or_open_store(cli, root)?;
    if cli.verbose {
        eprintln!("discover_store: {:?}", start.elapsed());
    }
    commands::tag::execute(cli, &store, command)
}

fn handle_export(
    cli: &Cli,
    root: &PathBuf,
    id: &str,
    output: Option<&std::path::Path>,
    start: Instant,
) -> Result<()> {
    let store = discover_or_open_store(cli, root)?;
    if cli.verbose {
        eprintln!("discover_store: {:?}", start.elapsed());
    }
    commands::export::execute(cli, &store, id, output)
}

fn handle_dump(
    cli: &Cli,
    root: &PathBuf,
    output: Option<&std::path::Path>,
    start: Instant,
) -> Result<()> {
    let store = discover_or_open_store(cli, root)?;
    if cli.verbose {
        eprintln!("discover_store: {:?}", start.elapsed());
    }
    commands::dump::execute(cli, &store, output)
}

fn handle_import(cli: &Cli, root: &PathBuf, file: &std::path::Path, start: Instant) -> Result<()> {
    let store = discover_or_open_store(cli, root)?;
    if cli.verbose {
        eprintln!("discover_store: {:?}", start.elapsed());
    }
    commands::import::execute(cli, &store, file)
}

fn handle_status(cli: &Cli, root: &PathBuf, start: Instant) -> Result<()> {
    let store = discover_or_open_store(cli, root)?;
    if cli.verbose {
        eprintln!("discover_store: {:?}", start.elapsed());
    }
    commands::status::execute(cli, &store)
}
