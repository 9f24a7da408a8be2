use anyhow::Context;
use clap::Parser;
use mbta_subway::core::ConfigProvider;
use mbta_subway::utils::error::ErrorSeverity;
use mbta_subway::utils::{logger, validation::Validate};
use mbta_subway::{CliConfig, MbtaClient, OutputFormat, Report, ReportEngine, TomlConfig, TransitError};

async fn execute<C: ConfigProvider>(config: &C, monitor: bool) -> Result<Report, TransitError> {
    let client = MbtaClient::from_config(config)?;
    let engine = ReportEngine::from_config(client, config).with_monitoring(monitor);
    engine.run().await
}

fn exit_with(e: &TransitError) -> ! {
    tracing::error!(
        "❌ Run failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());

    let exit_code = match e.severity() {
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    };
    std::process::exit(exit_code);
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    match cli.format {
        OutputFormat::Json => logger::init_json_logger(),
        OutputFormat::Text => logger::init_cli_logger(cli.verbose),
    }

    tracing::info!("Starting mbta-subway");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let result = match &cli.config {
        Some(path) => {
            tracing::info!("📁 Loading configuration from: {}", path);
            let mut config = match TomlConfig::from_file(path) {
                Ok(config) => config,
                Err(e) => exit_with(&e),
            };
            config.apply_cli_overrides(&cli);
            if let Err(e) = config.validate() {
                exit_with(&e);
            }
            let monitor = config.monitoring_enabled();
            execute(&config, monitor).await
        }
        None => {
            if let Err(e) = cli.validate() {
                exit_with(&e);
            }
            execute(&cli, cli.monitor).await
        }
    };

    let report = match result {
        Ok(report) => report,
        Err(e) => exit_with(&e),
    };

    match cli.format {
        OutputFormat::Text => print!("{}", report),
        OutputFormat::Json => println!("{}", report.to_json().context("serializing report")?),
    }

    Ok(())
}
