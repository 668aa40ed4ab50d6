use autorest_date_test_service::config::cli::{CliConfig, DateCommand};
use autorest_date_test_service::utils::error::Result;
use autorest_date_test_service::utils::logger;
use autorest_date_test_service::AutoRestDateTestService;
use chrono::NaiveDate;
use clap::Parser;

#[tokio::main]
async fn main() {
    let cli = CliConfig::parse();

    if cli.json_logs {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose);
    }
    tracing::debug!(
        "command: {:?}, base_url: {:?}, config: {:?}",
        cli.command,
        cli.base_url,
        cli.config
    );

    match run(&cli).await {
        Ok(Some(output)) => println!("{}", output),
        Ok(None) => {}
        Err(e) => {
            tracing::error!("{:?} failed: {}", cli.command, e);
            if let Some(status) = e.status() {
                tracing::error!("service status: {}", status);
            }
            eprintln!("error: {}", e);
            eprintln!("hint: {}", e.recovery_suggestion());
            std::process::exit(e.exit_code());
        }
    }
}

async fn run(cli: &CliConfig) -> Result<Option<String>> {
    let config = cli.to_configuration()?;
    let service = AutoRestDateTestService::new(config)?;
    let ops = &service.date_model;

    let fetched = match &cli.command {
        DateCommand::GetNull => ops.get_null().await?,
        DateCommand::GetInvalid => ops.get_invalid_date().await?,
        DateCommand::GetOverflow => ops.get_overflow_date().await?,
        DateCommand::GetUnderflow => ops.get_underflow_date().await?,
        DateCommand::GetMax => ops.get_max_date().await?,
        DateCommand::GetMin => ops.get_min_date().await?,
        DateCommand::PutMax { date } => {
            ops.put_max_date(*date).await?;
            tracing::info!("stored max date {}", date);
            return Ok(None);
        }
        DateCommand::PutMin { date } => {
            ops.put_min_date(*date).await?;
            tracing::info!("stored min date {}", date);
            return Ok(None);
        }
    };

    Ok(Some(render(fetched)))
}

fn render(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "null".to_string())
}
