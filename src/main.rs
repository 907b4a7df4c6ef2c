use clap::Parser;
use mollie_gateway::app::commands::{execute, exit_code_for_response, report_error};
use mollie_gateway::utils::logger;
use mollie_gateway::{CliConfig, MollieGateway, PaymentGateway};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    let config = match cli.gateway_config() {
        Ok(config) => config,
        Err(e) => {
            // 設定錯誤時尚未初始化日誌，直接輸出
            std::process::exit(report_error(&e));
        }
    };

    if config.json_logging() {
        logger::init_json_logger(if cli.verbose { "debug" } else { config.log_level() });
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    let gateway = match MollieGateway::new(&config) {
        Ok(gateway) => gateway,
        Err(e) => {
            tracing::error!("❌ Failed to build gateway: {}", e);
            std::process::exit(report_error(&e));
        }
    };
    tracing::info!(
        "Starting {} gateway ({} mode)",
        gateway.name(),
        if gateway.test_mode() { "test" } else { "live" }
    );

    match execute(&gateway, &cli.command).await {
        Ok(response) => {
            println!("{}", serde_json::to_string_pretty(&response)?);
            let exit_code = exit_code_for_response(&response);
            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
        Err(e) => {
            tracing::error!(
                "❌ Operation failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );

            let exit_code = report_error(&e);
            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }

    Ok(())
}
