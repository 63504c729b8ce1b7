mod cli;
mod logging;

use clap::Parser;
use cli::Cli;
use colored::*;
use std::process::ExitCode;
use termenu::App;
use tracing::{error, info};

fn main() -> ExitCode {
    // Pick up RUST_LOG from a .env file when present
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    let _log_guard = match logging::init(cli.log_file.as_deref()) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("{} {:#}", "Error: Failed to initialize logging:".red(), e);
            return ExitCode::FAILURE;
        },
    };

    info!("Starting menu demo...");
    let mut app = App::new(cli::demo_menu()).with_config(cli.config());
    let result = app.run();

    if let Err(e) = &result {
        error!("Failed to start menu session: {:?}", e);
        eprintln!("{} {}", "Error:".red(), e.to_string().red());
    }
    termenu::exit_code(&result)
}
