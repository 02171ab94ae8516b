//! CLI argument parsing for solace
//!
//! Uses clap for argument parsing. Supports global flags: --root,
//! --store, --format, --quiet, --verbose, --log-level, --log-json.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Output format for command results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Plain text for people
    Human,
    /// Pretty-printed JSON for scripts
    Json,
}

/// Solace - local-first CBT journaling CLI
#[derive(Parser, Debug)]
#[command(name = "solace")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Base directory for resolving the store
    #[arg(long, global = true)]
    pub root: Option<PathBuf>,

    /// Explicit store root path
    #[arg(long, global = true)]
    pub store: Option<PathBuf>,

    /// Output format
    #[arg(long, global = true, value_enum, default_value = "human")]
    pub format: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, short, global = true)]
    pub quiet: bool,

    /// Debug-level logging and phase timing
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Explicit log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize a new journal store
    Init,

    /// Analyze a concern and save the result
    Analyze {
        /// Concern text (omit to read from stdin)
        text: Option<String>,

        /// Read the concern from stdin
        #[arg(long)]
        stdin: bool,

        /// Ask for rebuttals to the underlying worries
        #[arg(long)]
        with_rebuttals: bool,

        /// Tags to attach (can be specified multiple times)
        #[arg(long, short, action = clap::ArgAction::Append)]
        tag: Vec<String>,

        /// Print the analysis without saving it
        #[arg(long)]
        no_save: bool,

        /// Override the generated summary
        #[arg(long)]
        summary: Option<String>,
    },

    /// Transcribe an audio file to text
    Transcribe {
        /// Audio file path
        file: PathBuf,
    },

    /// List saved analyses
    List {
        /// Only favorites
        #[arg(long)]
        favorites: bool,

        /// Order by most recently viewed
        #[arg(long)]
        recent: bool,

        /// Filter by tag (can be repeated; records must carry all)
        #[arg(long, short, action = clap::ArgAction::Append)]
        tag: Vec<String>,

        /// Maximum records to print
        #[arg(long)]
        limit: Option<usize>,

        /// Records to skip
        #[arg(long, default_value = "0")]
        offset: usize,
    },

    /// Show one analysis
    Show {
        /// Record ID
        id: String,

        /// Do not update the last-viewed timestamp
        #[arg(long)]
        no_touch: bool,
    },

    /// Search analyses by content and summary
    Search {
        /// Search query
        query: String,

        /// Filter by tag (can be repeated; records must carry all)
        #[arg(long, short, action = clap::ArgAction::Append)]
        tag: Vec<String>,
    },

    /// Rank saved analyses similar to a draft
    Similar {
        /// Draft text (omit to read from stdin)
        text: Option<String>,

        /// Rank against an existing record's content instead of a draft
        #[arg(long, conflicts_with = "text")]
        id: Option<String>,
    },

    /// Edit a record's summary or content
    Edit {
        /// Record ID
        id: String,

        /// New summary
        #[arg(long)]
        summary: Option<String>,

        /// New content
        #[arg(long)]
        content: Option<String>,
    },

    /// Toggle the favorite flag on a record
    Favorite {
        /// Record ID
        id: String,
    },

    /// Delete an analysis
    Delete {
        /// Record ID
        id: String,
    },

    /// Manage tags
    Tag {
        #[command(subcommand)]
        command: TagCommands,
    },

    /// Export one analysis as a Markdown artifact
    Export {
        /// Record ID
        id: String,

        /// Output file (`-` for stdout; defaults to <id>-<summary>.md)
        #[arg(long, short)]
        output: Option<PathBuf>,
    },

    /// Dump the whole store as JSON
    Dump {
        /// Output file (defaults to stdout)
        #[arg(long, short)]
        output: Option<PathBuf>,
    },

    /// Import a dump file into the store
    Import {
        /// Dump file path
        file: PathBuf,
    },

    /// Show store status
    Status,
}

/// Tag subcommands
#[derive(Subcommand, Debug)]
pub enum TagCommands {
    /// List tags with usage counts
    List,

    /// Create a tag or change its color
    Set {
        /// Tag name
        name: String,

        /// Color as #RRGGBB
        color: String,
    },

    /// Delete a tag and detach it from every record
    Rm {
        /// Tag name
        name: String,
    },

    /// Rename a tag, merging into the target if it exists
    Rename {
        /// Current name
        old: String,

        /// New name
        new: String,
    },

    /// Attach tags to a record
    Add {
        /// Record ID
        id: String,

        /// Tag names
        #[arg(required = true)]
        tags: Vec<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_cli_help() {
        // Should not panic
        let result = Cli::try_parse_from(["solace", "--help"]);
        assert!(result.is_err()); // --help exits
    }

    #[test]
    fn test_parse_cli_version() {
        // Should not panic
        let result = Cli::try_parse_from(["solace", "--version"]);
        assert!(result.is_err()); // --version exits
    }

    #[test]
    fn test_parse_init() {
        let cli = Cli::try_parse_from(["solace", "init"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Init)));
    }

    #[test]
    fn test_parse_analyze_with_options() {
        let cli = Cli::try_parse_from([
            "solace",
            "analyze",
            "I'm worried about tomorrow",
            "--with-rebuttals",
            "--tag",
            "Work",
            "--tag",
            "Evening",
            "--no-save",
        ])
        .unwrap();
        if let Some(Commands::Analyze {
            text,
            with_rebuttals,
            tag,
            no_save,
            ..
        }) = cli.command
        {
            assert_eq!(text.as_deref(), Some("I'm worried about tomorrow"));
            assert!(with_rebuttals);
            assert!(no_save);
            assert_eq!(tag, vec!["Work", "Evening"]);
        } else {
            panic!("Expected Analyze command");
        }
    }

    #[test]
    fn test_parse_list_with_filters() {
        let cli = Cli::try_parse_from([
            "solace", "list", "--favorites", "--tag", "Work", "--limit", "5",
        ])
        .unwrap();
        if let Some(Commands::List {
            favorites,
            tag,
            limit,
            offset,
            ..
        }) = cli.command
        {
            assert!(favorites);
            assert_eq!(tag, vec!["Work"]);
            assert_eq!(limit, Some(5));
            assert_eq!(offset, 0);
        } else {
            panic!("Expected List command");
        }
    }

    #[test]
    fn test_parse_tag_subcommands() {
        let cli = Cli::try_parse_from(["solace", "tag", "set", "Work", "#112233"]).unwrap();
        if let Some(Commands::Tag {
            command: TagCommands::Set { name, color },
        }) = cli.command
        {
            assert_eq!(name, "Work");
            assert_eq!(color, "#112233");
        } else {
            panic!("Expected tag set command");
        }

        let cli = Cli::try_parse_from(["solace", "tag", "rename", "Old", "New"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::Tag {
                command: TagCommands::Rename { .. }
            })
        ));

        let result = Cli::try_parse_from(["solace", "tag", "add", "sol-1"]);
        assert!(result.is_err()); // tags are required
    }

    #[test]
    fn test_parse_similar_id_conflicts_with_text() {
        let cli = Cli::try_parse_from(["solace", "similar", "--id", "sol-1"]).unwrap();
        if let Some(Commands::Similar { text, id }) = cli.command {
            assert!(text.is_none());
            assert_eq!(id.as_deref(), Some("sol-1"));
        } else {
            panic!("Expected Similar command");
        }

        let result = Cli::try_parse_from(["solace", "similar", "draft", "--id", "sol-1"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_format() {
        let cli = Cli::try_parse_from(["solace", "--format", "json", "list"]).unwrap();
        assert_eq!(cli.format, OutputFormat::Json);
    }

    #[test]
    fn test_parse_export_output() {
        let cli = Cli::try_parse_from(["solace", "export", "sol-1", "--output", "-"]).unwrap();
        if let Some(Commands::Export { id, output }) = cli.command {
            assert_eq!(id, "sol-1");
            assert_eq!(output, Some(PathBuf::from("-")));
        } else {
            panic!("Expected Export command");
        }
    }
}
