use clap::Parser;

use microservice::cli::ServerCli;
use microservice::config::{StaticConfig, get_config, init_config_from};
use microservice::runtime::modes::run_server;
use microservice::system::init_logging;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = ServerCli::parse();

    if cli.print_sample_config {
        print!("{}", StaticConfig::generate_sample_config());
        return Ok(());
    }

    init_config_from(&cli.config);
    let config = get_config();

    // Keep the guard alive so buffered log lines are flushed on exit
    let _log_guard = init_logging(&config.logging)?;

    run_server(&config).await
}
