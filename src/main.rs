use std::process::ExitCode;

use clap::Parser;

use visa_facilitator::app_data::AppData;
use visa_facilitator::cli::{self, Cli};
use visa_facilitator::config::{init_logging, AppSettings, SecretManager, SystemEnvironment};

fn main() -> ExitCode {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    let env = SystemEnvironment;

    if let Err(e) = init_logging(&env) {
        eprintln!("Failed to initialize logging: {}", e);
        return ExitCode::FAILURE;
    }

    let cli = Cli::parse();

    let mut settings = match AppSettings::from_env(&env) {
        Ok(settings) => settings,
        Err(e) => {
            tracing::error!("Failed to load settings: {}", e);
            eprintln!("Configuration error: {}", e);
            return ExitCode::FAILURE;
        }
    };
    cli.apply_overrides(&mut settings);

    let secret_manager = match SecretManager::init(&env) {
        Ok(manager) => manager,
        Err(e) => {
            tracing::error!("Failed to load secrets: {}", e);
            eprintln!("Configuration error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let app_data = AppData::init(&settings, &secret_manager);

    match cli::execute_command(cli, &app_data) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("Command failed: {}", e);
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
