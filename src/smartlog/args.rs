use clap::{Parser, Subcommand, ValueEnum};
use smartlog::codec::ExportFormat;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "smartlog", version)]
#[command(about = "Keep a log book of short, timestamped notes", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Directory holding the log book (defaults to $SMARTLOG_HOME or the platform data dir)
    #[arg(long, global = true, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Add a new log
    #[command(aliases = ["n", "new"])]
    Add {
        /// Title of the log
        title: Option<String>,

        /// Content of the log ("-" reads it from stdin)
        #[arg(short, long)]
        content: Option<String>,
    },

    /// List logs
    #[command(alias = "ls")]
    List {
        /// Only show logs whose title, content or timestamp contain TERM
        #[arg(short, long, value_name = "TERM")]
        search: Option<String>,

        /// Newest first
        #[arg(short, long, conflicts_with = "asc")]
        desc: bool,

        /// Oldest first
        #[arg(short, long)]
        asc: bool,

        /// Show full content under each entry
        #[arg(short, long)]
        expand: bool,
    },

    /// Show one log in full
    #[command(alias = "v")]
    View {
        /// Id of the log
        id: u64,
    },

    /// Delete one or more logs
    #[command(alias = "rm")]
    Delete {
        /// Ids of the logs (e.g. 1 3 5)
        #[arg(required = true, num_args = 1..)]
        ids: Vec<u64>,

        /// Do not ask for confirmation
        #[arg(short, long)]
        yes: bool,
    },

    /// Delete every log and reset numbering
    Clear {
        /// Do not ask for confirmation
        #[arg(short, long)]
        yes: bool,
    },

    /// Copy a log to the clipboard
    #[command(alias = "cp")]
    Copy {
        /// Id of the log
        id: u64,
    },

    /// Export all logs as JSON, text or CSV
    Export {
        #[arg(short, long, value_enum, default_value_t = FormatArg::Json)]
        format: FormatArg,

        /// Output file (defaults to smart-logger-export-<date>.<ext> in the current directory)
        #[arg(short, long, conflicts_with = "stdout")]
        output: Option<PathBuf>,

        /// Print to stdout instead of writing a file
        #[arg(long)]
        stdout: bool,
    },

    /// Import logs from a .json, .csv or text file and append them
    Import {
        path: PathBuf,
    },

    /// Save all logs to a JSON backup file
    Backup {
        /// Output file (defaults to smart-logger-backup-<date>.json in the current directory)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Replace all logs with the contents of a JSON backup
    Restore {
        path: PathBuf,
    },

    /// Get or set configuration
    Config {
        /// Configuration key (timestamp-format, descending, seed)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },
}

#[derive(Copy, Clone, Debug, ValueEnum)]
pub enum FormatArg {
    Json,
    Text,
    Csv,
}

impl From<FormatArg> for ExportFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Json => ExportFormat::Json,
            FormatArg::Text => ExportFormat::Text,
            FormatArg::Csv => ExportFormat::Csv,
        }
    }
}
