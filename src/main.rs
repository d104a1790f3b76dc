use clap::Parser;
use consult_site::utils::error::ErrorSeverity;
use consult_site::utils::{logger, validation::Validate};
use consult_site::{AppState, CliConfig, SiteError, SiteServer};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 初始化日誌
    if cli.json_logs {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting consult-site API server");
    tracing::info!("📁 Loading configuration from: {}", cli.config);

    if let Err(e) = run(&cli).await {
        tracing::error!(
            "❌ Server failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e);
        eprintln!("💡 {}", e.recovery_suggestion());

        let exit_code = match e.severity() {
            ErrorSeverity::Low | ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        };
        std::process::exit(exit_code);
    }

    Ok(())
}

async fn run(cli: &CliConfig) -> Result<(), SiteError> {
    let config = cli.load_site_config()?;
    config.validate()?;
    tracing::info!("✅ Configuration loaded and validated");

    if cli.verbose {
        tracing::debug!(
            "Plans: {}, chat backend: {:?}, mail transport: {:?}",
            config.payment.plans.len(),
            config.chat.backend,
            config.mail.transport
        );
    }

    let state = AppState::from_config(config)?;
    SiteServer::new(state).run().await
}
