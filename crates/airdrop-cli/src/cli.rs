use airdrop_domain::{CardPriority, CardStatus, ColumnId, Language, Theme};
use chrono::{DateTime, NaiveDate, Utc};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "airdrop")]
#[command(about = "A terminal kanban board for tracking airdrop tasks", long_about = None)]
#[command(version, arg_required_else_help = false)]
pub struct Cli {
    /// Directory holding the board, reminders and preferences (or set AIRDROP_DATA_DIR)
    #[arg(long, global = true, value_name = "DIR", env = "AIRDROP_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Config file to use instead of the platform default
    #[arg(long, global = true, value_name = "FILE", env = "AIRDROP_CONFIG")]
    pub config: Option<PathBuf>,

    /// Keep everything in memory; nothing is written to disk
    #[arg(long, global = true)]
    pub ephemeral: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Column operations
    Column(ColumnCommand),
    /// Card operations
    Card(CardCommand),
    /// Board statistics
    Stats,
    /// Export the board as a dated JSON backup
    Export(ExportArgs),
    /// Replace the board with an exported JSON file
    Import(ImportArgs),
    /// Reminder operations
    Reminder(ReminderCommand),
    /// Colour theme preference
    Theme(ThemeCommand),
    /// Interface language preference
    Lang(LangCommand),
    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

// Column commands
#[derive(Args)]
pub struct ColumnCommand {
    #[command(subcommand)]
    pub action: ColumnAction,
}

#[derive(Subcommand)]
pub enum ColumnAction {
    /// Add a column at the end of the board
    Add {
        #[arg(long)]
        name: String,
        /// Hex colour such as #16a34a
        #[arg(long)]
        color: Option<String>,
    },
    /// Rename or recolour a column
    Edit {
        #[arg(long)]
        id: ColumnId,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        color: Option<String>,
    },
    /// Remove a column and every card in it
    Remove {
        #[arg(long)]
        id: ColumnId,
        #[arg(long)]
        yes: bool,
    },
    /// List columns in display order
    List,
    /// Move a column to a 1-based position
    Reorder {
        #[arg(long)]
        id: ColumnId,
        #[arg(long)]
        position: usize,
    },
}

// Card commands
#[derive(Args)]
pub struct CardCommand {
    #[command(subcommand)]
    pub action: CardAction,
}

#[derive(Subcommand)]
pub enum CardAction {
    /// Add a card to a column
    Add(CardAddArgs),
    /// Edit fields of a card
    Edit(CardEditArgs),
    /// Move a card to another column
    Move {
        #[arg(long)]
        id: u64,
        #[arg(long)]
        to: ColumnId,
    },
    /// Remove a card
    Remove {
        #[arg(long)]
        id: u64,
        #[arg(long)]
        yes: bool,
    },
    /// Copy a card into the same column
    Duplicate {
        #[arg(long)]
        id: u64,
    },
    /// List cards, optionally filtered
    List(CardListArgs),
    /// Show a single card
    Get {
        #[arg(long)]
        id: u64,
    },
    /// Toggle a checklist item
    Check {
        #[arg(long)]
        id: u64,
        #[arg(long)]
        item: u32,
    },
}

#[derive(Args)]
pub struct CardAddArgs {
    #[arg(long)]
    pub column: ColumnId,
    #[arg(long)]
    pub title: String,
    #[arg(long)]
    pub description: Option<String>,
    /// in-progress, done, waiting, rejected
    #[arg(long)]
    pub status: Option<CardStatus>,
    /// high, medium, low
    #[arg(long)]
    pub priority: Option<CardPriority>,
    /// Due date (YYYY-MM-DD)
    #[arg(long)]
    pub due: Option<NaiveDate>,
    #[arg(long)]
    pub link: Option<String>,
    /// Comma separated tags
    #[arg(long)]
    pub tags: Option<String>,
    /// Checklist item, repeatable
    #[arg(long = "item")]
    pub items: Vec<String>,
    #[arg(long)]
    pub notes: Option<String>,
}

#[derive(Args)]
pub struct CardEditArgs {
    #[arg(long)]
    pub id: u64,
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long)]
    pub status: Option<CardStatus>,
    #[arg(long)]
    pub priority: Option<CardPriority>,
    #[arg(long, conflicts_with = "clear_due")]
    pub due: Option<NaiveDate>,
    #[arg(long)]
    pub clear_due: bool,
    #[arg(long, conflicts_with = "clear_link")]
    pub link: Option<String>,
    #[arg(long)]
    pub clear_link: bool,
    /// Comma separated tags, replacing the current ones
    #[arg(long)]
    pub tags: Option<String>,
    /// Checklist item, repeatable; replaces the whole checklist
    #[arg(long = "item")]
    pub items: Vec<String>,
    #[arg(long)]
    pub notes: Option<String>,
}

#[derive(Args)]
pub struct CardListArgs {
    #[arg(long)]
    pub column: Option<ColumnId>,
    #[arg(long)]
    pub status: Option<CardStatus>,
    #[arg(long)]
    pub priority: Option<CardPriority>,
    /// Free-text search over title, description and tags
    #[arg(long)]
    pub search: Option<String>,
    /// Only cards past their due date and not done
    #[arg(long)]
    pub overdue: bool,
}

// Export/import
#[derive(Args)]
pub struct ExportArgs {
    /// Target file or directory (defaults to the current directory)
    #[arg(long, short)]
    pub output: Option<PathBuf>,
}

#[derive(Args)]
pub struct ImportArgs {
    /// Previously exported JSON file
    #[arg(long, short)]
    pub file: PathBuf,
}

// Reminder commands
#[derive(Args)]
pub struct ReminderCommand {
    #[command(subcommand)]
    pub action: ReminderAction,
}

#[derive(Subcommand)]
pub enum ReminderAction {
    /// Schedule a reminder; an existing id is replaced
    Add {
        #[arg(long)]
        title: String,
        #[arg(long, default_value = "")]
        message: String,
        /// When to fire (RFC 3339, e.g. 2024-06-01T08:00:00Z)
        #[arg(long, required_unless_present = "in_minutes", conflicts_with = "in_minutes")]
        at: Option<DateTime<Utc>>,
        /// Fire this many minutes from now
        #[arg(long)]
        in_minutes: Option<i64>,
        #[arg(long)]
        id: Option<String>,
    },
    /// List scheduled reminders
    List,
    /// Cancel one reminder
    Cancel {
        #[arg(long)]
        id: String,
    },
    /// Remove every reminder
    Clear {
        #[arg(long)]
        yes: bool,
    },
    /// Fire due reminders and report deadline alerts
    Check,
}

#[derive(Args)]
pub struct ThemeCommand {
    #[command(subcommand)]
    pub action: ThemeAction,
}

#[derive(Subcommand)]
pub enum ThemeAction {
    Get,
    Set { theme: Theme },
    Toggle,
}

#[derive(Args)]
pub struct LangCommand {
    #[command(subcommand)]
    pub action: LangAction,
}

#[derive(Subcommand)]
pub enum LangAction {
    Get,
    /// pt, en, es or zh
    Set { language: Language },
}
