use crate::export::ExportFormat;
use clap::{Parser, Subcommand, ValueEnum};

/// Command-line interface definition for rollcall
/// CLI application to draw students at random and take attendance
#[derive(Parser)]
#[command(
    name = "rollcall",
    version = env!("CARGO_PKG_VERSION"),
    about = "A classroom roll-call CLI: import a roster, roll through names at random and take attendance",
    long_about = None
)]
pub struct Cli {
    /// Override the application directory (config, cache, preferences, log)
    #[arg(global = true, long = "home", value_name = "DIR")]
    pub home: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Toggle {
    On,
    Off,
}

impl Toggle {
    pub fn is_on(self) -> bool {
        self == Toggle::On
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the application directory, configuration and activity log
    Init,

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration file")]
        print_config: bool,

        #[arg(long = "check", help = "Check configuration file for missing fields")]
        check: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(
            long = "editor",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
        editor: Option<String>,
    },

    /// Import a roster (.xlsx, .xls, .ods or .csv) and refresh the cache
    Import {
        /// Spreadsheet with an id column and a name column
        #[arg(value_name = "FILE")]
        file: String,
    },

    /// Show the cached roster
    List {
        #[arg(long, short, help = "Only rows whose id or name contains KW")]
        search: Option<String>,
    },

    /// Draw random students from the cached roster
    Pick {
        #[arg(long, short = 'n', default_value_t = 1, help = "How many names to draw")]
        count: usize,
    },

    /// Enable or disable no-repeat drawing
    NoRepeat {
        #[arg(value_enum)]
        state: Toggle,
    },

    /// Export the roster with attendance columns
    Export {
        #[arg(long, value_enum, default_value = "xlsx")]
        format: ExportFormat,

        #[arg(
            long,
            value_name = "FILE",
            help = "Output file (default: attendance_<timestamp>.<ext>)"
        )]
        file: Option<String>,

        #[arg(long, short = 'f', help = "Overwrite without confirmation")]
        force: bool,
    },

    /// Print or manage the activity log
    Log {
        #[arg(long = "print", help = "Print rows from the activity log")]
        print: bool,
    },

    /// Interactive roll call: commands are read from stdin, one per line
    Session {
        #[arg(long, value_name = "MS", help = "Roll speed in ms (10-200)")]
        interval: Option<u64>,

        #[arg(
            long,
            value_name = "SECS",
            help = "Auto sign-in this many seconds after the roll starts (0-10, 0 = off)"
        )]
        countdown: Option<u64>,
    },
}
