//! Write an Ansible inventory from `terraform output -json`.
//!
//! Exits with status 1, without writing anything, if terraform cannot be
//! run, its output is not valid JSON, or `vm_public_ip` is missing.

use clap::Parser;
use colored::Colorize;
use std::path::PathBuf;
use std::process::ExitCode;

use microservice::cli::InventoryCli;
use microservice::config::StaticConfig;
use microservice::inventory::{InventoryGenerator, JsonFile, OutputSource, TerraformCommand};
use microservice::system::init_logging;

fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    let cli = InventoryCli::parse();
    let config = StaticConfig::load_from(&cli.config);

    let _log_guard = match init_logging(&config.logging) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("{}", e.format_colored());
            return ExitCode::FAILURE;
        }
    };

    let inventory = config.inventory;

    let source: Box<dyn OutputSource> = match cli.input {
        Some(path) => Box::new(JsonFile::new(path)),
        None => {
            let dir = cli
                .terraform_dir
                .unwrap_or_else(|| PathBuf::from(&inventory.terraform_dir));
            Box::new(TerraformCommand::new(dir).with_program(cli.terraform_bin))
        }
    };
    let output = cli
        .output
        .unwrap_or_else(|| PathBuf::from(&inventory.output_path));

    let generator = InventoryGenerator::new(inventory);
    match generator.generate(source.as_ref(), &output) {
        Ok(report) => {
            println!(
                "{} Generated {} with VM IP: {}",
                "✓".green().bold(),
                report.path.display(),
                report.public_ip
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{}", e.format_colored());
            eprintln!("Failed to generate inventory; nothing was written");
            ExitCode::FAILURE
        }
    }
}
