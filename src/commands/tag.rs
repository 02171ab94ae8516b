//! `solace tag` command - manage the tag palette
//!
//! System tags (`Level 1`-`Level 5`, `What ifs`) show up in listings but
//! reject every mutation; the store enforces that.

use crate::cli::{Cli, OutputFormat, TagCommands};
use solace_core::error::Result;
use solace_core::store::Store;
use solace_core::tag;

/// Execute a tag subcommand
pub fn execute(cli: &Cli, store: &Store, command: &TagCommands) -> Result<()> {
    match command {
        TagCommands::List => list(cli, store),
        TagCommands::Set { name, color } => set(cli, store, name, color),
        TagCommands::Rm { name } => remove(cli, store, name),
        TagCommands::Rename { old, new } => rename(cli, store, old, new),
        TagCommands::Add { id, tags } => add(cli, store, id, tags),
    }
}

fn list(cli: &Cli, store: &Store) -> Result<()> {
    let tags = store.list_tags_with_usage()?;

    match cli.format {
        OutputFormat::Json => {
            let output: Vec<_> = tags
                .iter()
                .map(|(tag, count)| {
                    serde_json::json!({
                        "name": tag.name,
                        "color": tag.color,
                        "reserved": tag::is_reserved(&tag.name),
                        "records": count,
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Human => {
            for (tag, count) in &tags {
                let marker = if tag::is_reserved(&tag.name) {
                    " [system]"
                } else {
                    ""
                };
                println!("{} {} ({} records){}", tag.color, tag.name, count, marker);
            }
        }
    }

    Ok(())
}

fn set(cli: &Cli, store: &Store, name: &str, color: &str) -> Result<()> {
    let tag = store.set_tag(name, color)?;

    match cli.format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&tag)?);
        }
        OutputFormat::Human => {
            if !cli.quiet {
                println!("Set tag {} to {}", tag.name, tag.color);
            }
        }
    }

    Ok(())
}

fn remove(cli: &Cli, store: &Store, name: &str) -> Result<()> {
    store.delete_tag(name)?;

    match cli.format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "name": name,
                "deleted": true,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Human => {
            if !cli.quiet {
                println!("Deleted tag {}", name);
            }
        }
    }

    Ok(())
}

fn rename(cli: &Cli, store: &Store, old: &str, new: &str) -> Result<()> {
    let tag = store.rename_tag(old, new)?;

    match cli.format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&tag)?);
        }
        OutputFormat::Human => {
            if !cli.quiet {
                println!("Renamed {} to {}", old, tag.name);
            }
        }
    }

    Ok(())
}

fn add(cli: &Cli, store: &Store, id: &str, tags: &[String]) -> Result<()> {
    let record = store.add_tags(id, tags)?;

    match cli.format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&record)?);
        }
        OutputFormat::Human => {
            if !cli.quiet {
                println!("Tagged {}: {}", record.id, record.tags.join(", "));
            }
        }
    }

    Ok(())
}
