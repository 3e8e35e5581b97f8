use clap::Parser;
use portfolio_client::app::commands;
use portfolio_client::utils::error::PortfolioError;
use portfolio_client::utils::{logger, validation::Validate};
use portfolio_client::{CliConfig, Command, ConfigProvider, HttpPortfolioApi, TomlConfig};
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = CliConfig::parse();

    // Load the config file first: it may turn on verbose or JSON logs
    let file_config = cli.config.as_deref().map(TomlConfig::from_file).transpose();
    let (verbose, json_logs) = match &file_config {
        Ok(Some(file)) => (
            cli.verbose || file.verbose_logging(),
            cli.json_logs || file.json_logging(),
        ),
        _ => (cli.verbose, cli.json_logs),
    };
    // Initialize logging
    if json_logs {
        logger::init_json_logger(verbose);
    } else {
        logger::init_cli_logger(verbose);
    }

    tracing::info!("Starting portfolio-client");
    tracing::debug!("CLI config: {:?}", cli);

    // Validate configuration
    let provider: Box<dyn ConfigProvider> = match file_config.and_then(|file| resolve(&cli, file)) {
        Ok(provider) => provider,
        Err(e) => exit_with(&e, 1),
    };

    // Create the backend client
    let api = match HttpPortfolioApi::new(provider.as_ref()) {
        Ok(api) => Arc::new(api),
        Err(e) => exit_with(&e, 1),
    };
    tracing::debug!("Using API root {}", api.api_root());

    // Run the command; Ok(false) means the backend answered but something failed
    let mut stdout = std::io::stdout();
    let result = match &cli.command {
        Command::Load => commands::load_portfolio(api, &mut stdout)
            .await
            .map(|state| !state.has_errors),
        Command::Project { id } => commands::show_project(api, id, &mut stdout)
            .await
            .map(|_| true),
        Command::Contact { .. } => match cli.command.contact_payload() {
            Some(payload) => commands::send_contact(api, payload, &mut stdout)
                .await
                .map(|outcome| outcome.is_success()),
            None => Ok(false),
        },
        Command::Contacts => commands::list_contacts(api, &mut stdout)
            .await
            .map(|_| true),
    };

    // Exit code: 1 for configuration errors, 2 for failed requests
    match result {
        Ok(true) => Ok(()),
        Ok(false) => std::process::exit(2),
        Err(e) => exit_with(&e, 2),
    }
}

/// Picks the file configuration when one was given, otherwise the flags.
fn resolve(
    cli: &CliConfig,
    file: Option<TomlConfig>,
) -> portfolio_client::Result<Box<dyn ConfigProvider>> {
    match file {
        Some(file) => {
            file.validate()?;
            // contact fields still come from the flags
            cli.validate_command()?;
            Ok(Box::new(file))
        }
        None => {
            cli.validate()?;
            Ok(Box::new(cli.clone()))
        }
    }
}

fn exit_with(e: &PortfolioError, code: i32) -> ! {
    // Log the details, then print the user-facing message
    tracing::error!("❌ {} (Category: {:?})", e, e.category());
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());
    std::process::exit(code);
}
