mod command;
mod infrastructure;

use std::fmt::Display;

use clap::Parser;
use colored::Colorize;

use command::Cli;
use infrastructure::{config::load_config, telemetry::initialize_telemetry, ServiceProvider};

fn report(context: &str, e: impl Display) -> i32 {
    eprintln!("{}: {}", context.red(), e);
    1
}

async fn run(cli: Cli) -> Result<(), i32> {
    let config = load_config(&cli.config).map_err(|e| report("Cannot build config", e))?;
    initialize_telemetry(&config.telemetry).map_err(|e| report("Cannot build logger", e))?;
    let service_provider = ServiceProvider::build(config)
        .await
        .map_err(|e| report("Cannot build Service Provider", format!("{e:#}")))?;

    let compliance_service = service_provider.compliance_service();
    let output = command::execute(cli.command, compliance_service.as_ref())
        .await
        .map_err(|e| {
            tracing::error!("{e:#}");
            report("Cannot compute", format!("{e:#}"))
        })?;
    println!("{output}");
    Ok(())
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    if let Err(code) = run(cli).await {
        std::process::exit(code);
    }
}
