use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

use moodlog_core::VERSION;

/// Moodlog - A local, CLI-first mood journal
#[derive(Parser)]
#[command(name = "moodlog")]
#[command(author, version = VERSION, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the journal file
    #[arg(short, long, global = true, env = "MOODLOG_PATH")]
    pub journal: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Quiet mode (minimal output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Use ASCII symbols only
    #[arg(long, global = true)]
    pub ascii: bool,
}

/// Arguments for the `init` command
#[derive(Args)]
pub struct InitArgs {
    /// Where the journal file lives
    #[arg(value_name = "PATH")]
    pub path: Option<String>,

    /// Overwrite an existing config file
    #[arg(long)]
    pub force: bool,
}

/// Arguments for the `add` command
#[derive(Args, Debug, Clone)]
pub struct AddArgs {
    /// What happened
    #[arg(short, long)]
    pub content: Option<String>,

    /// Mood rating (1-5)
    #[arg(short, long)]
    pub mood: Option<String>,

    /// Date (YYYY-MM-DD, defaults to today)
    #[arg(long)]
    pub date: Option<String>,

    /// Time (HH:MM, defaults to now)
    #[arg(long)]
    pub time: Option<String>,

    /// Mark the record as completed
    #[arg(long)]
    pub completed: bool,
}

/// Arguments for the `edit` command
#[derive(Args, Debug, Clone)]
pub struct EditArgs {
    /// Record ID (or a unique prefix)
    #[arg(value_name = "ID")]
    pub id: String,

    /// New date (YYYY-MM-DD)
    #[arg(long)]
    pub date: Option<String>,

    /// New time (HH:MM)
    #[arg(long)]
    pub time: Option<String>,

    /// New content
    #[arg(short, long)]
    pub content: Option<String>,

    /// New mood rating (1-5)
    #[arg(short, long)]
    pub mood: Option<String>,

    /// Set the completion flag
    #[arg(long, value_name = "BOOL")]
    pub completed: Option<bool>,
}

/// Arguments for commands that target a single record
#[derive(Args, Debug, Clone)]
pub struct RecordArgs {
    /// Record ID (or a unique prefix)
    #[arg(value_name = "ID")]
    pub id: String,
}

/// Arguments for the `delete` command
#[derive(Args, Debug, Clone)]
pub struct DeleteArgs {
    /// Record ID (or a unique prefix)
    #[arg(value_name = "ID")]
    pub id: String,

    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}

/// Filters shared by `list` and the shell's `filter`
#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// Case-insensitive text search in content
    #[arg(short, long)]
    pub search: Option<String>,

    /// Only this mood rating (1-5)
    #[arg(short, long)]
    pub mood: Option<String>,

    /// Start date, inclusive (YYYY-MM-DD)
    #[arg(long)]
    pub from: Option<String>,

    /// End date, inclusive (YYYY-MM-DD)
    #[arg(long)]
    pub to: Option<String>,
}

/// Arguments for the `list` command
#[derive(Args, Debug, Clone, Default)]
pub struct ListArgs {
    #[command(flatten)]
    pub filter: FilterArgs,

    /// Sort order (date-desc, date-asc, mood-desc, mood-asc, none)
    #[arg(long, value_name = "MODE")]
    pub sort: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Output format (table, plain)
    #[arg(long, value_name = "FORMAT")]
    pub format: Option<String>,
}

/// Arguments for the `show` command
#[derive(Args, Debug, Clone)]
pub struct ShowArgs {
    /// Record ID (or a unique prefix)
    #[arg(value_name = "ID")]
    pub id: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `stats` command
#[derive(Args, Debug, Clone, Default)]
pub struct StatsArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `export` command
#[derive(Args, Debug, Clone, Default)]
pub struct ExportArgs {
    /// Destination file, or `-` for stdout (default: moodRecords.json)
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<String>,
}

/// Arguments for the `import` command
#[derive(Args, Debug, Clone)]
pub struct ImportArgs {
    /// JSON file holding an array of records
    #[arg(value_name = "FILE")]
    pub file: String,
}

/// Arguments for the `completions` command
#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_name = "SHELL")]
    pub shell: Shell,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write a config file pointing at the journal
    Init(InitArgs),

    /// Add a mood record
    Add(AddArgs),

    /// Edit fields of an existing record
    Edit(EditArgs),

    /// Flip the completed flag of a record
    Toggle(RecordArgs),

    /// Delete a record
    Delete(DeleteArgs),

    /// List records with optional filters
    List(ListArgs),

    /// Show a single record in detail
    Show(ShowArgs),

    /// Show mood statistics
    Stats(StatsArgs),

    /// Export all records as JSON
    Export(ExportArgs),

    /// Import records from a JSON file
    Import(ImportArgs),

    /// Start an interactive session with undo
    Shell,

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// A single line typed into `moodlog shell`
#[derive(Parser)]
#[command(name = "moodlog", no_binary_name = true)]
#[command(disable_version_flag = true)]
pub struct ShellLine {
    #[command(subcommand)]
    pub command: ShellCommand,
}

/// Arguments for the shell's `undo`
#[derive(Args, Debug, Clone, Default)]
pub struct UndoArgs {
    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}

/// Arguments for the shell's `sort`
#[derive(Args, Debug, Clone)]
pub struct SortArgs {
    /// date-desc, date-asc, mood-desc, mood-asc or none
    #[arg(value_name = "MODE")]
    pub mode: String,
}

#[derive(Subcommand)]
pub enum ShellCommand {
    /// Add a mood record
    Add(AddArgs),

    /// Edit fields of an existing record
    Edit(EditArgs),

    /// Flip the completed flag of a record
    Toggle(RecordArgs),

    /// Delete a record
    Delete(DeleteArgs),

    /// List records using the session filters
    #[command(visible_alias = "ls")]
    List(ListArgs),

    /// Show a single record in detail
    Show(ShowArgs),

    /// Show mood statistics
    Stats(StatsArgs),

    /// Export all records as JSON
    Export(ExportArgs),

    /// Import records from a JSON file
    Import(ImportArgs),

    /// Revert the last change made in this session
    Undo(UndoArgs),

    /// Set session filters used by `list`
    Filter(FilterArgs),

    /// Set the session sort order
    Sort(SortArgs),

    /// Drop every session filter
    Clear,

    /// Leave the session
    #[command(visible_alias = "exit")]
    Quit,
}
