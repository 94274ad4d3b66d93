// CLI module: argument parsing and command dispatch

pub mod menu;

use std::io::{self, Write};
use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::app_data::AppData;
use crate::config::AppSettings;
use crate::types::OperationContext;

pub use menu::Menu;

/// International Student Visa Facilitator
#[derive(Parser, Debug)]
#[command(name = "visa-facilitator")]
#[command(about = "Manage international student visa applications", long_about = None)]
pub struct Cli {
    /// Application records file (overrides VISA_DATA_FILE)
    #[arg(long, global = true)]
    pub data_file: Option<PathBuf>,

    /// User accounts file (overrides USER_DATA_FILE)
    #[arg(long, global = true)]
    pub user_file: Option<PathBuf>,

    /// Application id counter file (overrides SEQUENCE_FILE)
    #[arg(long, global = true)]
    pub sequence_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Run the interactive menu (default)
    Menu,

    /// Print a single application
    View {
        /// Application id, e.g. APP0001
        id: String,
    },

    /// Print the id the next application would receive
    NextId,
}

impl Cli {
    /// Apply command-line file overrides on top of environment settings
    pub fn apply_overrides(&self, settings: &mut AppSettings) {
        if let Some(path) = &self.data_file {
            settings.data_file = path.clone();
        }
        if let Some(path) = &self.user_file {
            settings.user_file = path.clone();
        }
        if let Some(path) = &self.sequence_file {
            settings.sequence_file = path.clone();
        }
    }
}

/// Execute CLI command
///
/// Routes the parsed CLI command to the appropriate handler. Without a
/// subcommand the interactive menu runs on stdin/stdout.
pub fn execute_command(cli: Cli, app_data: &AppData) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command.unwrap_or(Commands::Menu) {
        Commands::Menu => {
            let stdin = io::stdin();
            let mut menu = Menu::new(app_data, stdin.lock(), io::stdout());
            menu.run()?;
        }
        Commands::View { id } => {
            let ctx = OperationContext::for_cli("view");
            let application = app_data.lifecycle_service.view(&ctx, &id)?;
            let mut stdout = io::stdout();
            menu::write_application(&mut stdout, &application)?;
            stdout.flush()?;
        }
        Commands::NextId => {
            println!("{}", app_data.application_store.next_id()?);
        }
    }

    Ok(())
}
