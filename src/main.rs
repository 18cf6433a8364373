use clap::Parser;
use customer_import::utils::{logger, validation::Validate};
use customer_import::{exit_code, import_into_store, Cli, Command};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    if cli.log_json {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    let Command::CustomerImport(args) = &cli.command;

    let settings = match args.validate().and_then(|_| cli.settings()) {
        Ok(settings) => settings,
        Err(e) => {
            tracing::error!("❌ Configuration validation failed: {}", e);
            tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(e.severity().exit_code());
        }
    };
    tracing::debug!("settings: {:?}", settings);

    let result = import_into_store(settings, &args.profile, &args.source).await;

    match &result {
        Ok(summary) => {
            for failure in &summary.failures {
                eprintln!("❌ {}", failure);
            }
            println!(
                "Customer import completed: {} saved ({} created, {} updated), {} failed",
                summary.succeeded(),
                summary.created,
                summary.updated,
                summary.failed()
            );
        }
        Err(e) => {
            tracing::error!(
                "❌ Customer import aborted: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
        }
    }

    let code = exit_code(&result, args.strict);
    if code != 0 {
        std::process::exit(code);
    }

    Ok(())
}
