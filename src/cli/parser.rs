use crate::export::ExportFormat;
use crate::models::resource::Resource;
use clap::{Parser, Subcommand};

/// Command-line interface definition for opsgrid
/// Browse and edit business-operations tables served by a REST backend
#[derive(Parser)]
#[command(
    name = "opsgrid",
    version = env!("CARGO_PKG_VERSION"),
    about = "Operations console: list, search and edit backend tables with confirmed cell edits",
    long_about = None
)]
pub struct Cli {
    /// Override the audit database path
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Override the API base url (e.g. http://127.0.0.1:8000/api)
    #[arg(global = true, long = "api")]
    pub api: Option<String>,

    /// Bearer token for the API
    #[arg(global = true, long = "token")]
    pub token: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// `field=value`
pub fn parse_assignment(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((field, value)) if !field.trim().is_empty() => {
            Ok((field.trim().to_string(), value.to_string()))
        }
        _ => Err(format!("expected field=value, got '{s}'")),
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the audit database and configuration
    Init,

    /// Manage the configuration file (view or edit)
    Config {
        /// Print the current configuration file to stdout
        #[arg(long = "print", help = "Print the current configuration file")]
        print_config: bool,

        /// Edit the configuration file with your preferred editor
        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/vim/notepad)"
        )]
        edit_config: bool,

        /// Specify the editor to use (overrides $EDITOR/$VISUAL).
        #[arg(
            long = "editor",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
        editor: Option<String>,
    },

    /// Print the internal audit log
    Log {
        /// Print rows from the internal `log` table
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,

        /// Only entries for this resource
        #[arg(long, value_enum)]
        resource: Option<Resource>,
    },

    /// List the rows of a resource
    List {
        #[arg(value_enum)]
        resource: Resource,

        /// Case-insensitive substring search over the displayed values
        #[arg(long, short)]
        search: Option<String>,

        /// Page number (1-based)
        #[arg(long, short, default_value_t = 1)]
        page: usize,

        /// Rows per page (default from config)
        #[arg(long = "page-size")]
        page_size: Option<usize>,

        /// Columns to hide, comma separated (e.g. --hide id,status)
        #[arg(long, value_delimiter = ',')]
        hide: Vec<String>,
    },

    /// Edit one cell; the change is shown and must be confirmed before it is sent
    Edit {
        #[arg(value_enum)]
        resource: Resource,

        /// Row id
        id: String,

        /// Field name (as in the column list)
        field: String,

        /// New value; empty string clears the field
        value: String,

        /// Confirm without asking
        #[arg(long, short = 'y')]
        yes: bool,
    },

    /// Submit several fields of one row in a single request (no per-field confirmation)
    Submit {
        #[arg(value_enum)]
        resource: Resource,

        /// Row id
        id: String,

        /// field=value, repeatable
        #[arg(long = "set", value_parser = parse_assignment, required = true)]
        set: Vec<(String, String)>,
    },

    /// Export the rows of a resource as displayed
    Export {
        #[arg(value_enum)]
        resource: Resource,

        /// Export format: csv, json
        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,

        /// Output file path (absolute path required)
        #[arg(long, value_name = "FILE")]
        file: String,

        /// Only rows matching this search
        #[arg(long, short)]
        search: Option<String>,

        /// Columns to leave out, comma separated
        #[arg(long, value_delimiter = ',')]
        hide: Vec<String>,

        /// Overwrite output file without confirmation
        #[arg(long, short = 'f')]
        force: bool,
    },
}
