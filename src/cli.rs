//! Command-line interface definitions using clap
//!
//! Both binaries share the `-c/--config` flag; everything else they accept
//! overrides the matching `config.toml` value for one run.

use clap::Parser;
use std::path::PathBuf;

use crate::config::DEFAULT_CONFIG_PATH;

/// User/product microservice with health and Prometheus metrics endpoints
#[derive(Parser, Debug)]
#[command(name = "microservice")]
#[command(version)]
#[command(about = "User/product HTTP microservice with /health and /metrics", long_about = None)]
pub struct ServerCli {
    /// Path to the TOML configuration file
    #[arg(long, short = 'c', default_value = DEFAULT_CONFIG_PATH)]
    pub config: String,

    /// Print a sample configuration file and exit
    #[arg(long)]
    pub print_sample_config: bool,
}

/// Generate an Ansible inventory from Terraform outputs
#[derive(Parser, Debug)]
#[command(name = "generate-inventory")]
#[command(version)]
#[command(about = "Generate an Ansible inventory from Terraform outputs", long_about = None)]
pub struct InventoryCli {
    /// Path to the TOML configuration file
    #[arg(long, short = 'c', default_value = DEFAULT_CONFIG_PATH)]
    pub config: String,

    /// Read `terraform output -json` from this file instead of running terraform
    #[arg(long, short = 'i')]
    pub input: Option<PathBuf>,

    /// Terraform working directory (overrides inventory.terraform_dir)
    #[arg(long)]
    pub terraform_dir: Option<PathBuf>,

    /// Terraform executable
    #[arg(long, default_value = "terraform")]
    pub terraform_bin: String,

    /// Where to write the inventory (overrides inventory.output_path)
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_cli_defaults() {
        let cli = ServerCli::try_parse_from(["microservice"]).unwrap();
        assert_eq!(cli.config, DEFAULT_CONFIG_PATH);
        assert!(!cli.print_sample_config);
    }

    #[test]
    fn test_server_cli_short_config_flag() {
        let cli = ServerCli::try_parse_from(["microservice", "-c", "custom.toml"]).unwrap();
        assert_eq!(cli.config, "custom.toml");
    }

    #[test]
    fn test_server_cli_equals_config_flag() {
        let cli = ServerCli::try_parse_from(["microservice", "--config=custom.toml"]).unwrap();
        assert_eq!(cli.config, "custom.toml");
    }

    #[test]
    fn test_inventory_cli_overrides() {
        let cli = InventoryCli::try_parse_from([
            "generate-inventory",
            "--input",
            "outputs.json",
            "-o",
            "/tmp/inventory.ini",
        ])
        .unwrap();
        assert_eq!(cli.input, Some(PathBuf::from("outputs.json")));
        assert_eq!(cli.output, Some(PathBuf::from("/tmp/inventory.ini")));
        assert_eq!(cli.terraform_bin, "terraform");
        assert!(cli.terraform_dir.is_none());
    }

    #[test]
    fn test_inventory_cli_rejects_unknown_flag() {
        assert!(InventoryCli::try_parse_from(["generate-inventory", "--force"]).is_err());
    }
}
