use clap::Parser;
use homepage_generator::app_log;
use homepage_generator::cli::{self, Cli};
use homepage_generator::core::ConfigManager;
use homepage_generator::logging::init_logging;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match ConfigManager::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("configuration failed: {:#}", e);
            return ExitCode::FAILURE;
        }
    };

    let log_file = cli
        .log_file
        .clone()
        .or_else(|| config.environment.log_file.clone());
    if let Err(e) = init_logging(log_file.as_deref()) {
        eprintln!("{:#}", e);
        return ExitCode::FAILURE;
    }

    if let Some(path) = &config.source {
        app_log!(info, "Loaded configuration from {}", path.display());
    }
    app_log!(debug, "Output directory: {}", config.environment.output_path.display());
    app_log!(debug, "Default theme: {}", config.environment.default_theme);

    match cli::run(cli, &config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            app_log!(error, "{:?}", err);
            eprintln!("{}", err.status_line());
            ExitCode::FAILURE
        }
    }
}
